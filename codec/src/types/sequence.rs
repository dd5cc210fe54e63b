//! Sequences of values.
//!
//! * [List] writes a 4-byte count and then each element in order.
//! * [Collection] writes exactly `arity` elements and no count: the arity is agreed
//!   out-of-band, when the codec is built.
//! * [Array] is a [Collection] whose arity is a const generic.

use crate::{
    channel::{Sink, Source},
    util::{decode_elements, read_len, write_len},
    Codec, Error, RangeCfg,
};
use core::ops::RangeBounds;

/// A count-prefixed sequence.
///
/// Elements that encode to nothing (such as [Unit](crate::types::primitives::Unit)) are
/// only decoded up to the upper end of [List::limit], or, without one, up to the number of
/// bytes left in the source.
///
/// The default is the empty list.
#[derive(Clone, Debug)]
pub struct List<C> {
    element: C,
    limit: RangeCfg,
}

impl<C: Codec> List<C> {
    pub fn new(element: C) -> Self {
        Self {
            element,
            limit: RangeCfg::unbounded(),
        }
    }

    /// Rejects decoded counts outside `range`.
    pub fn limit(mut self, range: impl RangeBounds<usize>) -> Self {
        self.limit = RangeCfg::new(range);
        self
    }
}

impl<C: Codec> Codec for List<C> {
    type Value = Vec<C::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        write_len(sink, value.len())?;
        for item in value {
            self.element.encode(sink, item)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let len = read_len(source, &self.limit)?;
        let mut items = Vec::with_capacity(len.min(source.available()));
        decode_elements(source, len, &self.limit, |source| {
            items.push(self.element.decode(source)?);
            Ok(())
        })?;
        Ok(items)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        write_len(sink, 0)?;
        Ok(true)
    }
}

/// A sequence of a fixed number of elements, without a count prefix.
#[derive(Clone, Debug)]
pub struct Collection<C> {
    element: C,
    arity: usize,
}

impl<C: Codec> Collection<C> {
    pub fn new(element: C, arity: usize) -> Self {
        Self { element, arity }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl<C: Codec> Codec for Collection<C> {
    type Value = Vec<C::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        if value.len() != self.arity {
            return Err(Error::InvalidLength(value.len()));
        }
        for item in value {
            self.element.encode(sink, item)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let mut items = Vec::with_capacity(self.arity);
        for _ in 0..self.arity {
            items.push(self.element.decode(source)?);
        }
        Ok(items)
    }

    fn has_default(&self) -> bool {
        self.arity == 0 || self.element.has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        if !self.has_default() {
            return Ok(false);
        }
        for _ in 0..self.arity {
            self.element.encode_default(sink)?;
        }
        Ok(true)
    }
}

/// Exactly `N` elements, without a count prefix.
#[derive(Clone, Debug)]
pub struct Array<C, const N: usize> {
    element: C,
}

impl<C: Codec, const N: usize> Array<C, N> {
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<C: Codec, const N: usize> Codec for Array<C, N> {
    type Value = [C::Value; N];

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        for item in value {
            self.element.encode(sink, item)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(self.element.decode(source)?);
        }
        items
            .try_into()
            .map_err(|items: Vec<C::Value>| Error::InvalidLength(items.len()))
    }

    fn has_default(&self) -> bool {
        N == 0 || self.element.has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        if !self.has_default() {
            return Ok(false);
        }
        for _ in 0..N {
            self.element.encode_default(sink)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        channel::BufSink,
        types::{
            primitives::{I32, U16, U8},
            text::Text,
        },
        CodecExt,
    };
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_list() {
        let codec = U8.list();
        for value in [vec![], vec![1u8], vec![1u8, 2u8, 3u8]] {
            let encoded = codec.to_bytes(&value).unwrap();
            assert_eq!(encoded.len(), 4 + value.len());
            assert_eq!(codec.from_bytes(encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_list_length_law() {
        let codec = Text::new().list();
        let value = vec!["a".to_string(), "bcd".to_string()];
        let expected = 4 + (4 + 2) + (4 + 6);
        assert_eq!(codec.to_bytes(&value).unwrap().len(), expected);
    }

    #[test]
    fn test_list_limit() {
        let encoded = U8.list().to_bytes(&vec![1, 2, 3]).unwrap();
        assert!(matches!(
            U8.list().limit(..3).from_bytes(encoded.clone()),
            Err(Error::InvalidLength(3))
        ));
        assert!(matches!(
            U8.list().limit(4..).from_bytes(encoded),
            Err(Error::InvalidLength(3))
        ));
    }

    #[test]
    fn test_list_huge_count_fails_without_allocating() {
        let encoded = [0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert!(matches!(
            U8.list().from_bytes(&encoded[..]),
            Err(Error::EndOfInput)
        ));
    }

    #[test]
    fn test_zero_width_elements() {
        use crate::{types::primitives::Unit, Union};

        // A four-byte prefix alone cannot produce millions of elements.
        let encoded = [0x00, 0x20, 0x00, 0x00];
        assert!(matches!(
            Union::new(["x"]).list().from_bytes(&encoded[..]),
            Err(Error::InvalidLength(0x0020_0000))
        ));
        assert!(matches!(
            Unit.list().from_bytes(&[0xFF, 0xFF, 0xFF, 0xFF][..]),
            Err(Error::InvalidLength(_))
        ));

        // Within a limit they round trip.
        let codec = Unit.list().limit(..=8);
        let encoded = codec.to_bytes(&vec![(); 8]).unwrap();
        assert_eq!(encoded, &[0, 0, 0, 8][..]);
        assert_eq!(codec.from_bytes(encoded).unwrap().len(), 8);

        // Unlimited, they may not outnumber the bytes that follow the prefix.
        let codec = Unit.list().pair(U8.collection(3));
        let encoded = codec.to_bytes(&(vec![(); 3], vec![1, 2, 3])).unwrap();
        assert_eq!(codec.from_bytes(encoded).unwrap().0.len(), 3);
        let encoded = codec.to_bytes(&(vec![(); 4], vec![1, 2, 3])).unwrap();
        assert!(matches!(codec.from_bytes(encoded), Err(Error::InvalidLength(4))));
    }

    #[test]
    fn test_list_default() {
        let mut sink = BufSink::new(Vec::new());
        assert!(U8.required().list().encode_default(&mut sink).unwrap());
        assert_eq!(sink.into_inner(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_collection() {
        let codec = U16.collection(3);
        let value = vec![1u16, 2, 3];
        let encoded = codec.to_bytes(&value).unwrap();
        assert_eq!(encoded, &[0, 1, 0, 2, 0, 3][..]);
        assert_eq!(codec.from_bytes(encoded).unwrap(), value);
        assert!(matches!(
            codec.to_bytes(&vec![1, 2]),
            Err(Error::InvalidLength(2))
        ));
    }

    #[test]
    fn test_collection_default() {
        let mut sink = BufSink::new(Vec::new());
        assert!(U16.collection(2).encode_default(&mut sink).unwrap());
        assert_eq!(sink.into_inner(), vec![0, 0, 0, 0]);
        assert!(!U16.required().collection(2).has_default());
        assert!(U16.required().collection(0).has_default());
    }

    #[test]
    fn test_array() {
        let codec = I32.array::<3>();
        let value = [-1, 0, 1];
        let encoded = codec.to_bytes(&value).unwrap();
        assert_eq!(encoded.len(), 12);
        assert_eq!(codec.from_bytes(encoded).unwrap(), value);
    }

    #[test]
    fn test_sets() {
        let value: HashSet<u16> = [5, 1, 3].into_iter().collect();
        let codec = U16.set();
        let encoded = codec.to_bytes(&value).unwrap();
        assert_eq!(encoded.len(), 4 + 3 * 2);
        assert_eq!(codec.from_bytes(encoded).unwrap(), value);

        let value: BTreeSet<u16> = [5, 1, 3].into_iter().collect();
        let codec = U16.btree_set();
        let encoded = codec.to_bytes(&value).unwrap();
        assert_eq!(encoded, &[0, 0, 0, 3, 0, 1, 0, 3, 0, 5][..]);
        assert_eq!(codec.from_bytes(encoded).unwrap(), value);
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let encoded = U16.list().to_bytes(&vec![2, 2, 1]).unwrap();
        let decoded = U16.btree_set().from_bytes(encoded).unwrap();
        assert_eq!(decoded.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }
}
