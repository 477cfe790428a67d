//! Line-oriented wire format for orientation readings.
//!
//! A reading is one newline-terminated text line holding exactly three
//! comma-separated decimal values: roll, pitch and yaw in degrees.
//! Anything else is a malformed reading and is reported as a
//! [`ReadingError`] rather than raised to the frame loop.
use nom::{
    bytes::complete::take_till,
    character::complete::{char, space0},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::float,
    sequence::delimited,
    IResult,
};
use tracing::trace;

use crate::error::ReadingError;
use crate::transform::Orientation;

/// Pending bytes without a newline beyond this are discarded
pub const MAX_PENDING_BYTES: usize = 4096;

fn fields(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(','), take_till(|c: char| c == ','))(input)
}

fn padded_float(input: &str) -> IResult<&str, f32> {
    all_consuming(delimited(space0, float, space0))(input)
}

/// Parse one line into an orientation (degrees on the wire, radians out)
pub fn parse_reading(line: &str) -> Result<Orientation, ReadingError> {
    let line = line.trim();
    let parts = match fields(line) {
        Ok((_, parts)) => parts,
        Err(_) => return Err(ReadingError::FieldCount { found: 0 }),
    };
    if parts.len() != 3 {
        return Err(ReadingError::FieldCount { found: parts.len() });
    }

    let mut degrees = [0.0f32; 3];
    for (field, (slot, text)) in degrees.iter_mut().zip(&parts).enumerate() {
        let (_, value) = padded_float(text).map_err(|_| ReadingError::NotNumeric {
            field,
            value: text.to_string(),
        })?;
        if !value.is_finite() {
            return Err(ReadingError::NonFinite { field });
        }
        *slot = value;
    }

    let orientation = Orientation::from_degrees(degrees[0], degrees[1], degrees[2]);
    if !orientation.is_finite() {
        return Err(ReadingError::NonFinite { field: 0 });
    }
    Ok(orientation)
}

/// Parse one line, collapsing every malformed case to `None`
pub fn parse_line(line: &str) -> Option<Orientation> {
    parse_reading(line).ok()
}

/// Frames a byte stream into complete lines.
///
/// Bytes are accumulated across pushes; only newline-terminated lines are
/// returned. Invalid UTF-8 sequences are dropped from the line.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly received bytes
    pub fn push(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
        if self.pending.len() > MAX_PENDING_BYTES && !self.pending.contains(&b'\n') {
            trace!(bytes = self.pending.len(), "Dropping unterminated input");
            self.pending.clear();
        }
    }

    /// Pop the next complete line, without its terminator
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let raw: Vec<u8> = self.pending.drain(..=end).collect();
        let line: String = String::from_utf8_lossy(&raw[..end])
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect();
        Some(line.trim_end_matches('\r').to_string())
    }

    /// Consume every complete line and return the newest valid reading.
    ///
    /// Malformed lines are skipped. `None` means no complete valid line
    /// arrived since the last call.
    pub fn latest_reading(&mut self) -> Option<Orientation> {
        let mut latest = None;
        while let Some(line) = self.next_line() {
            match parse_reading(&line) {
                Ok(orientation) => latest = Some(orientation),
                Err(e) => trace!(%e, line = %line, "Discarding malformed reading"),
            }
        }
        latest
    }

    /// Bytes held back waiting for a newline
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
