use armada::{Grid, GridError};

#[test]
fn set_get_clear() -> Result<(), GridError> {
    let mut g: Grid<u16, 4> = Grid::new();
    assert!(!g.get(2, 3)?);
    g.set(2, 3)?;
    assert!(g.get(2, 3)?);
    assert_eq!(g.count(), 1);
    g.clear(2, 3)?;
    assert!(!g.get(2, 3)?);
    assert!(g.is_empty());
    Ok(())
}

#[test]
fn out_of_bounds_is_rejected() {
    let mut g: Grid<u16, 4> = Grid::new();
    assert_eq!(g.set(4, 0), Err(GridError::OutOfBounds { row: 4, col: 0 }));
    assert_eq!(g.get(0, 4), Err(GridError::OutOfBounds { row: 0, col: 4 }));
}

#[test]
fn capacity_is_checked() {
    assert!(Grid::<u16, 4>::try_new().is_ok());
    assert_eq!(
        Grid::<u16, 5>::try_new(),
        Err(GridError::CapacityExceeded { n: 5, capacity: 16 })
    );
    assert!(Grid::<u128, 10>::try_new().is_ok());
}

#[test]
fn cells_iterate_in_ascending_row_col_order() -> Result<(), GridError> {
    let mut g: Grid<u128, 10> = Grid::new();
    // set in scrambled order
    for (r, c) in [(7, 2), (0, 9), (3, 3), (0, 1), (7, 0)] {
        g.set(r, c)?;
    }
    let cells: Vec<(usize, usize)> = g.cells().collect();
    assert_eq!(cells, vec![(0, 1), (0, 9), (3, 3), (7, 0), (7, 2)]);
    Ok(())
}

#[test]
fn intersects_and_bitops() -> Result<(), GridError> {
    let mut a: Grid<u128, 10> = Grid::new();
    let mut b: Grid<u128, 10> = Grid::new();
    a.set(1, 1)?;
    b.set(2, 2)?;
    assert!(!a.intersects(&b));
    let both = a | b;
    assert_eq!(both.count(), 2);
    b.set(1, 1)?;
    assert!(a.intersects(&b));
    assert_eq!((a & b).count(), 1);
    Ok(())
}
