//! Key/value associations.
//!
//! A map is written as a 4-byte entry count followed by each key and its value, in the
//! map's iteration order. Decoding inserts entries in the order read, so a repeated key
//! keeps the last value.

use crate::{
    channel::{Sink, Source},
    util::{decode_elements, read_len, write_len},
    Codec, Error, RangeCfg,
};
use core::ops::RangeBounds;
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

/// A container that [MapCodec] can fill and walk.
pub trait Association: Default {
    type Key;
    type Value;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an entry, replacing any previous value for `key`.
    fn insert(&mut self, key: Self::Key, value: Self::Value);

    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

impl<K: Eq + Hash, V, S: BuildHasher + Default> Association for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) {
        HashMap::insert(self, key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K: Ord, V> Association for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn insert(&mut self, key: K, value: V) {
        BTreeMap::insert(self, key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

/// A count-prefixed run of key/value pairs.
///
/// The default is the empty map.
pub struct MapCodec<K, V, M> {
    keys: K,
    values: V,
    limit: RangeCfg,
    _map: PhantomData<fn() -> M>,
}

impl<K: Clone, V: Clone, M> Clone for MapCodec<K, V, M> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
            limit: self.limit,
            _map: PhantomData,
        }
    }
}

impl<K, V, M> MapCodec<K, V, M>
where
    K: Codec,
    V: Codec,
    M: Association<Key = K::Value, Value = V::Value>,
{
    pub fn new(keys: K, values: V) -> Self {
        Self {
            keys,
            values,
            limit: RangeCfg::unbounded(),
            _map: PhantomData,
        }
    }

    /// Rejects decoded entry counts outside `range`.
    pub fn limit(mut self, range: impl RangeBounds<usize>) -> Self {
        self.limit = RangeCfg::new(range);
        self
    }
}

impl<K, V, M> Codec for MapCodec<K, V, M>
where
    K: Codec,
    V: Codec,
    M: Association<Key = K::Value, Value = V::Value>,
{
    type Value = M;

    fn encode(&self, sink: &mut dyn Sink, value: &M) -> Result<(), Error> {
        write_len(sink, value.len())?;
        for (key, item) in value.entries() {
            self.keys.encode(sink, key)?;
            self.values.encode(sink, item)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<M, Error> {
        let len = read_len(source, &self.limit)?;
        let mut map = M::default();
        decode_elements(source, len, &self.limit, |source| {
            let key = self.keys.decode(source)?;
            let item = self.values.decode(source)?;
            map.insert(key, item);
            Ok(())
        })?;
        Ok(map)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        write_len(sink, 0)?;
        Ok(true)
    }
}
