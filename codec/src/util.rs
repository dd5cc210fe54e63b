//! Helpers shared by length-prefixed codecs.

use crate::{
    channel::{Sink, Source},
    Error, RangeCfg,
};

/// Size of every count prefix.
pub const LENGTH_PREFIX: usize = 4;

/// Writes `len` as a 4-byte big-endian count.
#[inline]
pub fn write_len(sink: &mut dyn Sink, len: usize) -> Result<(), Error> {
    let len = u32::try_from(len).map_err(|_| Error::InvalidLength(len))?;
    sink.write_all(&len.to_be_bytes())
}

/// Reads a 4-byte big-endian count and checks it against `range`.
#[inline]
pub fn read_len(source: &mut dyn Source, range: &RangeCfg) -> Result<usize, Error> {
    let mut prefix = [0u8; LENGTH_PREFIX];
    source.read_exact(&mut prefix)?;
    let len = u32::from_be_bytes(prefix);
    let len = usize::try_from(len).map_err(|_| Error::InvalidLength(usize::MAX))?;
    range.check(len)
}

/// A [Source] that counts the bytes read through it.
struct Metered<'a> {
    inner: &'a mut dyn Source,
    consumed: usize,
}

impl Source for Metered<'_> {
    #[inline]
    fn next(&mut self) -> Result<u8, Error> {
        let byte = self.inner.next()?;
        self.consumed += 1;
        Ok(byte)
    }

    fn available(&self) -> usize {
        self.inner.available()
    }

    fn close(&mut self) -> Result<(), Error> {
        self.inner.close()
    }

    fn skip(&mut self, n: usize) -> Result<usize, Error> {
        let skipped = self.inner.skip(n)?;
        self.consumed += skipped;
        Ok(skipped)
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        self.inner.read_exact(dst)?;
        self.consumed += dst.len();
        Ok(())
    }
}

/// Runs `decode` once per element of a count-prefixed run of `len` elements.
///
/// Elements that consume no input are bounded by the upper end of `limit` or, when the
/// limit is open-ended, by the bytes available before the first element. Past that the
/// run fails with [Error::InvalidLength], so a count prefix alone cannot drive unbounded
/// allocation.
pub(crate) fn decode_elements(
    source: &mut dyn Source,
    len: usize,
    limit: &RangeCfg,
    mut decode: impl FnMut(&mut dyn Source) -> Result<(), Error>,
) -> Result<(), Error> {
    let allowance = limit.max().unwrap_or_else(|| source.available());
    let mut metered = Metered {
        inner: source,
        consumed: 0,
    };
    let mut empty = 0usize;
    for _ in 0..len {
        let before = metered.consumed;
        decode(&mut metered)?;
        if metered.consumed == before {
            empty += 1;
            if empty > allowance {
                return Err(Error::InvalidLength(len));
            }
        }
    }
    Ok(())
}
