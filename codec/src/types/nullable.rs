//! Optional values behind a presence byte.

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};

/// One presence byte followed by the wrapped encoding when present.
///
/// Absent values are written as a single `0`. Present values are written as `1` and then
/// the value. When decoding, any non-zero presence byte counts as present.
///
/// The default is the absent value.
#[derive(Clone, Debug)]
pub struct Nullable<C> {
    inner: C,
}

impl<C: Codec> Nullable<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for Nullable<C> {
    type Value = Option<C::Value>;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        match value {
            Some(inner) => {
                sink.write(1)?;
                self.inner.encode(sink, inner)
            }
            None => sink.write(0),
        }
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        if source.next()? == 0 {
            return Ok(None);
        }
        self.inner.decode(source).map(Some)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        sink.write(0)?;
        Ok(true)
    }
}
