use armada::{Coord, Message, MessageKind, WireError};

fn coord(row: u8, col: u8) -> Coord {
    Coord::new(row, col).unwrap()
}

#[test]
fn ready_wire_form_is_zero_padded() -> Result<(), WireError> {
    let bytes = Message::Ready { commitment: 42 }.encode()?;
    assert_eq!(bytes, b"r00042");
    let bytes = Message::Ready { commitment: 65535 }.encode()?;
    assert_eq!(bytes, b"r65535");
    Ok(())
}

#[test]
fn bomb_wire_form_pads_single_digit_columns() -> Result<(), WireError> {
    // canonical column encoding: zero-padded, 1-based
    let bytes = Message::Bomb { target: coord(0, 0) }.encode()?;
    assert_eq!(bytes, b"bA01");
    let bytes = Message::Bomb { target: coord(9, 9) }.encode()?;
    assert_eq!(bytes, b"bJ10");
    Ok(())
}

#[test]
fn stat_wire_form_carries_two_digit_length() -> Result<(), WireError> {
    let bytes = Message::Stat { hit: true, text: "Ouch".into() }.encode()?;
    assert_eq!(bytes, b"sh04Ouch");
    let bytes = Message::Stat { hit: false, text: String::new() }.encode()?;
    assert_eq!(bytes, b"sm00");
    Ok(())
}

#[test]
fn bare_tag_messages() -> Result<(), WireError> {
    assert_eq!(Message::Quit.encode()?, b"q");
    assert_eq!(Message::End.encode()?, b"e");
    Ok(())
}

#[test]
fn sunk_roundtrip() -> Result<(), WireError> {
    let msg = Message::Sunk { text: "You sank my Destroyer!".into() };
    let bytes = msg.encode()?;
    assert_eq!(&bytes[..3], b"u22");
    let (decoded, used) = Message::decode(&bytes)?;
    assert_eq!(used, bytes.len());
    assert_eq!(decoded, msg);
    Ok(())
}

#[test]
fn decode_consumes_exactly_one_message() -> Result<(), WireError> {
    let mut bytes = Message::Bomb { target: coord(3, 6) }.encode()?;
    bytes.extend_from_slice(b"qtrailing");
    let (msg, used) = Message::decode(&bytes)?;
    assert_eq!(msg, Message::Bomb { target: coord(3, 6) });
    assert_eq!(used, 4);
    Ok(())
}

#[test]
fn unknown_tag_is_rejected() {
    assert_eq!(Message::decode(b"z123"), Err(WireError::UnknownTag(b'z')));
    assert_eq!(MessageKind::from_tag(b'x'), Err(WireError::UnknownTag(b'x')));
}

#[test]
fn bomb_column_bounds() {
    // column text 00 and 11 fall outside [1, 10]
    assert_eq!(Message::decode(b"bA00"), Err(WireError::ColOutOfRange(0)));
    assert_eq!(Message::decode(b"bA11"), Err(WireError::ColOutOfRange(11)));
    assert!(Message::decode(b"bA01").is_ok());
    assert!(Message::decode(b"bA10").is_ok());
}

#[test]
fn bomb_row_bounds() {
    assert_eq!(Message::decode(b"bK01"), Err(WireError::RowOutOfRange(b'K')));
    assert_eq!(Message::decode(b"ba01"), Err(WireError::RowOutOfRange(b'a')));
    assert!(Message::decode(b"bJ01").is_ok());
}

#[test]
fn digits_are_validated_before_arithmetic() {
    assert_eq!(Message::decode(b"bAx1"), Err(WireError::BadDigit(b'x')));
    assert_eq!(Message::decode(b"r1a234"), Err(WireError::BadDigit(b'a')));
    assert_eq!(Message::decode(b"shx9"), Err(WireError::BadDigit(b'x')));
}

#[test]
fn stat_flag_is_validated() {
    assert_eq!(Message::decode(b"sx00"), Err(WireError::BadStatFlag(b'x')));
}

#[test]
fn commitment_range_is_checked() {
    assert_eq!(
        Message::decode(b"r99999"),
        Err(WireError::CommitmentOutOfRange(99999))
    );
    assert!(Message::decode(b"r65535").is_ok());
}

#[test]
fn truncated_slices_are_reported() {
    assert_eq!(
        Message::decode(b""),
        Err(WireError::Truncated { expected: 1, got: 0 })
    );
    assert_eq!(
        Message::decode(b"bA1"),
        Err(WireError::Truncated { expected: 4, got: 3 })
    );
    // STAT declaring 10 bytes of text but carrying 4
    assert_eq!(
        Message::decode(b"sh10four"),
        Err(WireError::Truncated { expected: 14, got: 8 })
    );
}

#[test]
fn oversized_text_is_rejected_on_encode() {
    // the two-digit length field tops out at 99
    let ok: String = core::iter::repeat('x').take(99).collect();
    assert!(Message::Stat { hit: true, text: ok }.encode().is_ok());
    let long: String = core::iter::repeat('x').take(100).collect();
    assert_eq!(
        Message::Stat { hit: true, text: long }.encode(),
        Err(WireError::TextTooLong(100))
    );
}

#[test]
fn non_ascii_text_is_rejected() {
    let msg = Message::Sunk { text: "coulé".into() };
    assert_eq!(msg.encode(), Err(WireError::NonAscii));
}

#[test]
fn header_lengths_match_wire_forms() {
    assert_eq!(MessageKind::Ready.header_len(), 5);
    assert_eq!(MessageKind::Bomb.header_len(), 3);
    assert_eq!(MessageKind::Stat.header_len(), 3);
    assert_eq!(MessageKind::Sunk.header_len(), 2);
    assert_eq!(MessageKind::Quit.header_len(), 0);
    assert_eq!(MessageKind::End.header_len(), 0);
}
