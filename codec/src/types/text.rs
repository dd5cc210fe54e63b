//! Text as 16-bit code units.
//!
//! Text is not written in a byte-oriented encoding: a [Char16] is one big-endian UTF-16
//! code unit and a [Text] is a 4-byte unit count followed by its UTF-16 code units.
//!
//! A [Char16] value is a Rust `char`, so it cannot hold a lone surrogate; use
//! [U16](crate::types::primitives::U16) to carry raw code units with the same layout.

use crate::{
    channel::{Sink, Source},
    types::primitives::U16,
    util::{read_len, write_len},
    Codec, Error, RangeCfg,
};
use core::ops::RangeBounds;

/// A single character stored as one 16-bit code unit.
///
/// Only characters of the Basic Multilingual Plane fit in one unit; anything else is
/// rejected on encode, and a surrogate unit is rejected on decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Char16;

impl Codec for Char16 {
    type Value = char;

    fn encode(&self, sink: &mut dyn Sink, value: &char) -> Result<(), Error> {
        let unit = u16::try_from(u32::from(*value))
            .map_err(|_| Error::InvalidData("Char16", "outside basic multilingual plane"))?;
        U16.encode(sink, &unit)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<char, Error> {
        let unit = U16.decode(source)?;
        char::from_u32(u32::from(unit)).ok_or(Error::InvalidData("Char16", "surrogate unit"))
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        self.encode(sink, &'\0')?;
        Ok(true)
    }
}

/// A count-prefixed string of UTF-16 code units.
///
/// The prefix counts code units, not bytes or characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text {
    limit: RangeCfg,
}

impl Text {
    pub const fn new() -> Self {
        Self {
            limit: RangeCfg::unbounded(),
        }
    }

    /// Rejects decoded unit counts outside `range`.
    pub fn limit(mut self, range: impl RangeBounds<usize>) -> Self {
        self.limit = RangeCfg::new(range);
        self
    }
}

impl Codec for Text {
    type Value = String;

    fn encode(&self, sink: &mut dyn Sink, value: &String) -> Result<(), Error> {
        let units: Vec<u16> = value.encode_utf16().collect();
        write_len(sink, units.len())?;
        for unit in &units {
            U16.encode(sink, unit)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<String, Error> {
        let len = read_len(source, &self.limit)?;
        let mut units = Vec::with_capacity(len.min(source.available() / 2));
        for _ in 0..len {
            units.push(U16.decode(source)?);
        }
        String::from_utf16(&units).map_err(|_| Error::InvalidData("Text", "unpaired surrogate"))
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        write_len(sink, 0)?;
        Ok(true)
    }
}
