use armada::{BoardError, Orientation, Ship, ShipClass};

#[test]
fn mask_covers_the_run() -> Result<(), BoardError> {
    const N: usize = 5;
    let class = ShipClass::new("Test", 3);
    let ship = Ship::<u32, N>::new(class, Orientation::Horizontal, 2, 1)?;
    for c in 1..4 {
        assert!(ship.contains(2, c));
    }
    assert!(!ship.contains(2, 0));
    assert_eq!(ship.mask().count(), 3);
    Ok(())
}

#[test]
fn cells_iterate_in_order() -> Result<(), BoardError> {
    const N: usize = 5;
    let class = ShipClass::new("Test", 4);
    let ship = Ship::<u32, N>::new(class, Orientation::Vertical, 0, 0)?;
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    Ok(())
}

#[test]
fn out_of_bounds_placement_fails() {
    const N: usize = 5;
    let class = ShipClass::new("Test", 4);
    let err = Ship::<u32, N>::new(class, Orientation::Horizontal, 0, 2).unwrap_err();
    assert_eq!(err, BoardError::ShipOutOfBounds);
    let err = Ship::<u32, N>::new(class, Orientation::Vertical, 3, 0).unwrap_err();
    assert_eq!(err, BoardError::ShipOutOfBounds);
}

#[test]
fn hits_accumulate_until_sunk() -> Result<(), BoardError> {
    const N: usize = 4;
    let class = ShipClass::new("Test", 2);
    let mut ship = Ship::<u32, N>::new(class, Orientation::Horizontal, 1, 1)?;
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(1, 1));
    assert!(!ship.is_sunk());
    // re-hitting the same cell does not sink the ship
    assert!(ship.register_hit(1, 1));
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(1, 2));
    assert!(ship.is_sunk());
    // miss
    assert!(!ship.register_hit(0, 0));
    Ok(())
}
