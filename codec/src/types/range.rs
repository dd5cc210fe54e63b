//! Numeric ranges and progressions.
//!
//! A range is its bounds written back to back with the element codec: `start` then `end`,
//! plus `step` for a [Progression]. Any element codec works, so every integer width and
//! [Char16](crate::types::text::Char16) get the same layout.

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use std::ops::{Range, RangeInclusive};

/// An inclusive arithmetic progression from `first` to `last` in increments of `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Progression<T> {
    pub first: T,
    pub last: T,
    pub step: T,
}

impl<T> Progression<T> {
    pub fn new(first: T, last: T, step: T) -> Self {
        Self { first, last, step }
    }
}

/// Encodes [Range] as `start` then `end`.
#[derive(Clone, Debug)]
pub struct RangeCodec<C> {
    bound: C,
}

impl<C: Codec> RangeCodec<C> {
    pub fn new(bound: C) -> Self {
        Self { bound }
    }
}

impl<C: Codec> Codec for RangeCodec<C> {
    type Value = Range<C::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        self.bound.encode(sink, &value.start)?;
        self.bound.encode(sink, &value.end)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let start = self.bound.decode(source)?;
        let end = self.bound.decode(source)?;
        Ok(start..end)
    }
}

/// Encodes [RangeInclusive] as `start` then `end`.
#[derive(Clone, Debug)]
pub struct RangeInclusiveCodec<C> {
    bound: C,
}

impl<C: Codec> RangeInclusiveCodec<C> {
    pub fn new(bound: C) -> Self {
        Self { bound }
    }
}

impl<C: Codec> Codec for RangeInclusiveCodec<C> {
    type Value = RangeInclusive<C::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        self.bound.encode(sink, value.start())?;
        self.bound.encode(sink, value.end())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let start = self.bound.decode(source)?;
        let end = self.bound.decode(source)?;
        Ok(start..=end)
    }
}

/// Encodes [Progression] as `first`, `last` then `step`.
#[derive(Clone, Debug)]
pub struct ProgressionCodec<C> {
    bound: C,
}

impl<C: Codec> ProgressionCodec<C> {
    pub fn new(bound: C) -> Self {
        Self { bound }
    }
}

impl<C: Codec> Codec for ProgressionCodec<C> {
    type Value = Progression<C::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        self.bound.encode(sink, &value.first)?;
        self.bound.encode(sink, &value.last)?;
        self.bound.encode(sink, &value.step)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let first = self.bound.decode(source)?;
        let last = self.bound.decode(source)?;
        let step = self.bound.decode(source)?;
        Ok(Progression { first, last, step })
    }
}
