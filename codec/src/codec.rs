//! Core codec traits and implementations

use crate::{
    channel::{BufSink, BufSource, CountingSink, Sink, Source},
    types::{
        either::{EitherCodec, IorCodec},
        map::MapCodec,
        nullable::Nullable,
        range::{ProgressionCodec, RangeCodec, RangeInclusiveCodec},
        sequence::{Array, Collection, List},
        transform::{Defaulted, Required, Transform},
        tuple::Tuple2,
    },
    Error,
};
use bytes::{Buf, Bytes, BytesMut};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
    sync::Arc,
};

/// A bidirectional mapping between a value and a sequence of bytes.
///
/// A codec is built once and then invoked any number of times. Implementations hold no
/// per-call state, so a single codec may be shared across threads as long as every call
/// uses its own channel.
pub trait Codec: Send + Sync {
    /// The type of value this codec reads and writes.
    type Value;

    /// Writes exactly the bytes defined for `value`.
    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error>;

    /// Consumes the bytes written for some value and reconstructs it.
    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error>;

    /// Whether [Codec::encode_default] writes a placeholder.
    fn has_default(&self) -> bool {
        false
    }

    /// Writes a placeholder encoding without a value.
    ///
    /// Returns `Ok(false)` (and writes nothing) if the codec has no default.
    fn encode_default(&self, _sink: &mut dyn Sink) -> Result<bool, Error> {
        Ok(false)
    }
}

/// A type-erased codec.
pub type BoxCodec<T> = Box<dyn Codec<Value = T>>;

impl<C: Codec + ?Sized> Codec for Box<C> {
    type Value = C::Value;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        (**self).encode(sink, value)
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        (**self).decode(source)
    }

    fn has_default(&self) -> bool {
        (**self).has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        (**self).encode_default(sink)
    }
}

impl<C: Codec + ?Sized> Codec for Arc<C> {
    type Value = C::Value;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        (**self).encode(sink, value)
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        (**self).decode(source)
    }

    fn has_default(&self) -> bool {
        (**self).has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        (**self).encode_default(sink)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    type Value = C::Value;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        (**self).encode(sink, value)
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        (**self).decode(source)
    }

    fn has_default(&self) -> bool {
        (**self).has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        (**self).encode_default(sink)
    }
}

/// Combinators and buffer helpers available on every [Codec].
pub trait CodecExt: Codec + Sized {
    /// Encodes a value into a freshly allocated buffer.
    fn to_bytes(&self, value: &Self::Value) -> Result<Bytes, Error> {
        let mut sink = BufSink::new(BytesMut::new());
        self.encode(&mut sink, value)?;
        Ok(sink.into_inner().freeze())
    }

    /// Decodes a value from a buffer, ensuring the buffer is fully consumed.
    fn from_bytes(&self, buf: impl Buf) -> Result<Self::Value, Error> {
        let mut source = BufSource::new(buf);
        let value = self.decode(&mut source)?;

        // Check that the buffer is fully consumed.
        let remaining = source.available();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(value)
    }

    /// Returns the number of bytes [Codec::encode] writes for `value`.
    fn encode_size(&self, value: &Self::Value) -> Result<usize, Error> {
        let mut sink = CountingSink::new();
        self.encode(&mut sink, value)?;
        Ok(sink.count())
    }

    /// Encodes `self` followed by `other`.
    fn pair<B: Codec>(self, other: B) -> Tuple2<Self, B> {
        Tuple2::new(self, other)
    }

    /// Prefixes the encoding with a presence byte.
    fn nullable(self) -> Nullable<Self> {
        Nullable::new(self)
    }

    /// A count-prefixed sequence of values.
    fn list(self) -> List<Self> {
        List::new(self)
    }

    /// Exactly `arity` values with no count prefix.
    fn collection(self, arity: usize) -> Collection<Self> {
        Collection::new(self, arity)
    }

    /// Exactly `N` values with no count prefix.
    fn array<const N: usize>(self) -> Array<Self, N> {
        Array::new(self)
    }

    /// A list materialized into a [HashSet].
    fn set(self) -> Transform<List<Self>, HashSet<Self::Value>>
    where
        Self::Value: Eq + Hash + Clone,
    {
        let to: fn(Vec<Self::Value>) -> HashSet<Self::Value> = |items| items.into_iter().collect();
        let from: fn(&HashSet<Self::Value>) -> Vec<Self::Value> = |set| set.iter().cloned().collect();
        self.list().transform(to, from)
    }

    /// A list materialized into a [BTreeSet].
    fn btree_set(self) -> Transform<List<Self>, BTreeSet<Self::Value>>
    where
        Self::Value: Ord + Clone,
    {
        let to: fn(Vec<Self::Value>) -> BTreeSet<Self::Value> = |items| items.into_iter().collect();
        let from: fn(&BTreeSet<Self::Value>) -> Vec<Self::Value> = |set| set.iter().cloned().collect();
        self.list().transform(to, from)
    }

    /// Associates keys encoded by `self` with values encoded by `values` in a [HashMap].
    fn map_to<V: Codec>(self, values: V) -> MapCodec<Self, V, HashMap<Self::Value, V::Value>>
    where
        Self::Value: Eq + Hash,
    {
        MapCodec::new(self, values)
    }

    /// Associates keys encoded by `self` with values encoded by `values` in a [BTreeMap].
    fn btree_map_to<V: Codec>(
        self,
        values: V,
    ) -> MapCodec<Self, V, BTreeMap<Self::Value, V::Value>>
    where
        Self::Value: Ord,
    {
        MapCodec::new(self, values)
    }

    /// A half-open range of values.
    fn range(self) -> RangeCodec<Self> {
        RangeCodec::new(self)
    }

    /// An inclusive range of values.
    fn range_inclusive(self) -> RangeInclusiveCodec<Self> {
        RangeInclusiveCodec::new(self)
    }

    /// An inclusive progression with a step.
    fn progression(self) -> ProgressionCodec<Self> {
        ProgressionCodec::new(self)
    }

    /// Either a value of `self` or of `right`, behind a tag byte.
    fn either<R: Codec>(self, right: R) -> EitherCodec<Self, R> {
        EitherCodec::new(self, right)
    }

    /// A value of `self`, of `right`, or both, behind a tag byte.
    fn ior<R: Codec>(self, right: R) -> IorCodec<Self, R> {
        IorCodec::new(self, right)
    }

    /// Views the value through a lossless pair of conversions.
    fn transform<O, To, From>(self, to: To, from: From) -> Transform<Self, O, To, From>
    where
        To: Fn(Self::Value) -> O + Send + Sync,
        From: Fn(&O) -> Self::Value + Send + Sync,
    {
        Transform::new(self, to, from)
    }

    /// Hides the default of the wrapped codec.
    fn required(self) -> Required<Self> {
        Required::new(self)
    }

    /// Uses `value` as the placeholder when no value is supplied.
    fn with_default(self, value: Self::Value) -> Defaulted<Self>
    where
        Self::Value: Send + Sync,
    {
        Defaulted::new(self, value)
    }

    /// Erases the concrete codec type.
    fn boxed(self) -> BoxCodec<Self::Value>
    where
        Self: 'static,
    {
        Box::new(self)
    }

    /// Wraps the codec for cheap cloning.
    fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<C: Codec> CodecExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::primitives::{U32, U8};
    use bytes::Bytes;

    #[test]
    fn test_insufficient_buffer() {
        let reader = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(U32.from_bytes(reader), Err(Error::EndOfInput)));
    }

    #[test]
    fn test_extra_data() {
        let encoded = Bytes::from_static(&[0x01, 0x02]);
        assert!(matches!(U8.from_bytes(encoded), Err(Error::ExtraData(1))));
    }

    #[test]
    fn test_encode_size() {
        let codec = U32.list();
        assert_eq!(codec.encode_size(&vec![1, 2, 3]).unwrap(), 4 + 3 * 4);
        assert_eq!(
            codec.encode_size(&vec![1, 2, 3]).unwrap(),
            codec.to_bytes(&vec![1, 2, 3]).unwrap().len()
        );
    }

    #[test]
    fn test_indirection() {
        let shared = U32.shared();
        let boxed = shared.clone().boxed();
        let by_ref = &boxed;
        let encoded = by_ref.to_bytes(&7).unwrap();
        assert_eq!(encoded, Bytes::from_static(&[0, 0, 0, 7]));
        assert_eq!(shared.from_bytes(encoded).unwrap(), 7);
        assert!(boxed.has_default());
    }
}
