//! Wire codec for the turn protocol.
//!
//! Messages are ASCII with no outer length prefix: a one-byte tag, a
//! fixed-width header per message kind, and for STAT/SUNK a text payload
//! whose length rides in a fixed two-digit decimal field inside the
//! header. A stream reader therefore works in stages: read the tag,
//! read `header_len()` bytes, then read `text_len()` more.
//!
//! Every digit position is checked with an ASCII-digit test before any
//! arithmetic touches it, and coordinates are range-checked during
//! decode, so a `Message` value is always well-formed.

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::common::Coord;
use crate::config::{GRID_SIZE, MAX_TEXT_LEN, TEXT_LEN_DIGITS};

pub const TAG_READY: u8 = b'r';
pub const TAG_BOMB: u8 = b'b';
pub const TAG_STAT: u8 = b's';
pub const TAG_QUIT: u8 = b'q';
pub const TAG_SUNK: u8 = b'u';
pub const TAG_END: u8 = b'e';

pub const FLAG_HIT: u8 = b'h';
pub const FLAG_MISS: u8 = b'm';

/// Digits in the READY commitment field (zero-padded 0..=65535).
pub const COMMITMENT_DIGITS: usize = 5;

/// Longest fixed header across all message kinds.
pub const MAX_HEADER_LEN: usize = COMMITMENT_DIGITS;

/// Decode failures. All of these are fatal to a session: the protocol
/// has no self-delimiting frame to resynchronize on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Tag byte does not name any message kind.
    UnknownTag(u8),
    /// A numeric field contained a non-digit byte.
    BadDigit(u8),
    /// Row letter outside `A..A+10`.
    RowOutOfRange(u8),
    /// Column number outside `1..=10`.
    ColOutOfRange(u8),
    /// STAT flag byte is neither `h` nor `m`.
    BadStatFlag(u8),
    /// READY commitment field above 65535.
    CommitmentOutOfRange(u32),
    /// Text payload longer than the protocol allows.
    TextTooLong(usize),
    /// Text payload contains non-ASCII bytes.
    NonAscii,
    /// Slice ends before the declared message length.
    Truncated { expected: usize, got: usize },
}

impl core::fmt::Display for WireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WireError::UnknownTag(t) => write!(f, "unknown message tag {:#04x}", t),
            WireError::BadDigit(b) => write!(f, "non-digit byte {:#04x} in numeric field", b),
            WireError::RowOutOfRange(b) => write!(f, "row letter {:#04x} outside grid", b),
            WireError::ColOutOfRange(c) => write!(f, "column {} outside grid", c),
            WireError::BadStatFlag(b) => write!(f, "bad status flag {:#04x}", b),
            WireError::CommitmentOutOfRange(v) => write!(f, "commitment {} exceeds 16 bits", v),
            WireError::TextTooLong(n) => write!(f, "text payload of {} bytes exceeds {}", n, MAX_TEXT_LEN),
            WireError::NonAscii => write!(f, "text payload is not ASCII"),
            WireError::Truncated { expected, got } => {
                write!(f, "message truncated: expected {} bytes, got {}", expected, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WireError {}

/// Message kinds, one per wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Ready,
    Bomb,
    Stat,
    Quit,
    Sunk,
    End,
}

impl MessageKind {
    pub fn from_tag(tag: u8) -> Result<Self, WireError> {
        match tag {
            TAG_READY => Ok(MessageKind::Ready),
            TAG_BOMB => Ok(MessageKind::Bomb),
            TAG_STAT => Ok(MessageKind::Stat),
            TAG_QUIT => Ok(MessageKind::Quit),
            TAG_SUNK => Ok(MessageKind::Sunk),
            TAG_END => Ok(MessageKind::End),
            other => Err(WireError::UnknownTag(other)),
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            MessageKind::Ready => TAG_READY,
            MessageKind::Bomb => TAG_BOMB,
            MessageKind::Stat => TAG_STAT,
            MessageKind::Quit => TAG_QUIT,
            MessageKind::Sunk => TAG_SUNK,
            MessageKind::End => TAG_END,
        }
    }

    /// Fixed byte count that follows the tag, before any text payload.
    pub fn header_len(self) -> usize {
        match self {
            MessageKind::Ready => COMMITMENT_DIGITS,
            MessageKind::Bomb => 3,
            MessageKind::Stat => 1 + TEXT_LEN_DIGITS,
            MessageKind::Sunk => TEXT_LEN_DIGITS,
            MessageKind::Quit | MessageKind::End => 0,
        }
    }

    /// Text payload length declared by a complete header. Zero for
    /// kinds that carry no text.
    pub fn text_len(self, header: &[u8]) -> Result<usize, WireError> {
        match self {
            MessageKind::Stat => decimal_field(&header[1..1 + TEXT_LEN_DIGITS]).map(|n| n as usize),
            MessageKind::Sunk => decimal_field(&header[..TEXT_LEN_DIGITS]).map(|n| n as usize),
            _ => Ok(0),
        }
    }
}

/// One protocol message, typed per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Fleet is placed; carries its commitment digest.
    Ready { commitment: u16 },
    /// Attack the given cell.
    Bomb { target: Coord },
    /// Result of the bomb the peer just sent, plus a taunt.
    Stat { hit: bool, text: String },
    /// Leaving the game.
    Quit,
    /// One of the sender's ships was just destroyed. Advisory.
    Sunk { text: String },
    /// The sender's fleet is eliminated; terminal.
    End,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Ready { .. } => MessageKind::Ready,
            Message::Bomb { .. } => MessageKind::Bomb,
            Message::Stat { .. } => MessageKind::Stat,
            Message::Quit => MessageKind::Quit,
            Message::Sunk { .. } => MessageKind::Sunk,
            Message::End => MessageKind::End,
        }
    }

    /// Encode into wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let mut buf = Vec::with_capacity(1 + MAX_HEADER_LEN + MAX_TEXT_LEN);
        buf.push(self.kind().tag());
        match self {
            Message::Ready { commitment } => {
                push_decimal(&mut buf, *commitment as u32, COMMITMENT_DIGITS);
            }
            Message::Bomb { target } => {
                buf.push(b'A' + target.row());
                push_decimal(&mut buf, target.col_number() as u32, 2);
            }
            Message::Stat { hit, text } => {
                buf.push(if *hit { FLAG_HIT } else { FLAG_MISS });
                push_text(&mut buf, text)?;
            }
            Message::Sunk { text } => {
                push_text(&mut buf, text)?;
            }
            Message::Quit | Message::End => {}
        }
        Ok(buf)
    }

    /// Decode one complete message from the front of `buf`, returning
    /// it together with the number of bytes consumed.
    pub fn decode(buf: &[u8]) -> Result<(Message, usize), WireError> {
        let tag = *buf.first().ok_or(WireError::Truncated { expected: 1, got: 0 })?;
        let kind = MessageKind::from_tag(tag)?;
        let header_end = 1 + kind.header_len();
        if buf.len() < header_end {
            return Err(WireError::Truncated { expected: header_end, got: buf.len() });
        }
        let header = &buf[1..header_end];
        let text_len = kind.text_len(header)?;
        let total = header_end + text_len;
        if buf.len() < total {
            return Err(WireError::Truncated { expected: total, got: buf.len() });
        }
        let msg = Message::assemble(kind, header, &buf[header_end..total])?;
        Ok((msg, total))
    }

    /// Build a message from its already-separated header and text
    /// bytes. `header` must be exactly `kind.header_len()` bytes and
    /// `text` exactly the declared payload; stream readers obtain both
    /// with exact reads.
    pub fn assemble(kind: MessageKind, header: &[u8], text: &[u8]) -> Result<Message, WireError> {
        if header.len() != kind.header_len() {
            return Err(WireError::Truncated { expected: kind.header_len(), got: header.len() });
        }
        let declared = kind.text_len(header)?;
        if text.len() != declared {
            return Err(WireError::Truncated { expected: declared, got: text.len() });
        }
        match kind {
            MessageKind::Ready => {
                let value = decimal_field(header)?;
                let commitment = u16::try_from(value)
                    .map_err(|_| WireError::CommitmentOutOfRange(value))?;
                Ok(Message::Ready { commitment })
            }
            MessageKind::Bomb => {
                let row_letter = header[0];
                if !(b'A'..b'A' + GRID_SIZE as u8).contains(&row_letter) {
                    return Err(WireError::RowOutOfRange(row_letter));
                }
                let col_number = decimal_field(&header[1..3])?;
                if !(1..=GRID_SIZE as u32).contains(&col_number) {
                    return Err(WireError::ColOutOfRange(col_number as u8));
                }
                let target = Coord::new(row_letter - b'A', (col_number - 1) as u8)
                    .ok_or(WireError::ColOutOfRange(col_number as u8))?;
                Ok(Message::Bomb { target })
            }
            MessageKind::Stat => {
                let hit = match header[0] {
                    FLAG_HIT => true,
                    FLAG_MISS => false,
                    other => return Err(WireError::BadStatFlag(other)),
                };
                Ok(Message::Stat { hit, text: take_text(text)? })
            }
            MessageKind::Sunk => Ok(Message::Sunk { text: take_text(text)? }),
            MessageKind::Quit => Ok(Message::Quit),
            MessageKind::End => Ok(Message::End),
        }
    }
}

/// Parse a fixed-width decimal field, validating every byte first.
fn decimal_field(digits: &[u8]) -> Result<u32, WireError> {
    let mut value: u32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(WireError::BadDigit(b));
        }
        value = value * 10 + (b - b'0') as u32;
    }
    Ok(value)
}

/// Append `value` as a zero-padded decimal of exactly `width` digits.
fn push_decimal(buf: &mut Vec<u8>, value: u32, width: usize) {
    for i in (0..width).rev() {
        let digit = (value / 10u32.pow(i as u32)) % 10;
        buf.push(b'0' + digit as u8);
    }
}

/// Append the two-digit length field and the text bytes.
fn push_text(buf: &mut Vec<u8>, text: &str) -> Result<(), WireError> {
    if text.len() > MAX_TEXT_LEN {
        return Err(WireError::TextTooLong(text.len()));
    }
    if !text.is_ascii() {
        return Err(WireError::NonAscii);
    }
    push_decimal(buf, text.len() as u32, TEXT_LEN_DIGITS);
    buf.extend_from_slice(text.as_bytes());
    Ok(())
}

fn take_text(bytes: &[u8]) -> Result<String, WireError> {
    if !bytes.is_ascii() {
        return Err(WireError::NonAscii);
    }
    String::from_utf8(bytes.to_vec()).map_err(|_| WireError::NonAscii)
}
