//! Declarative codecs for product types.
//!
//! # Overview
//!
//! A [Record] is built from an ordered list of slots, each wrapping a child codec. The wire
//! layout is the concatenation of every slot's encoding in declaration order: there are no
//! tags, separators or counts between slots.
//!
//! Two closures connect the slots to the product type:
//! - the _decoder_ receives every decoded slot value (through [Decoded]) and builds the
//!   result, reading slots in whatever order it likes;
//! - the _encoder_ receives the value being written and stores zero or more slot values
//!   (through [Pending]), again in any order.
//!
//! When encoding, each slot is written in declaration order using the pending value if the
//! encoder supplied one, otherwise the slot codec's default (see [Codec::has_default]). A
//! slot with neither fails with [Error::MissingRequiredField].
//!
//! # Defaults and required fields
//!
//! Most codecs in this crate have a default: numbers and `bool` write zero, text, bytes,
//! lists and maps write an empty count, and [Nullable](crate::types::nullable::Nullable)
//! writes absent. A slot the encoder leaves unset is therefore written as that placeholder
//! rather than rejected. Wrap a slot's codec in [required](crate::CodecExt::required) to
//! make leaving it unset fail with [Error::MissingRequiredField]; [Transform] and
//! [Union](crate::Union) slots are required already.
//!
//! [Transform]: crate::types::transform::Transform
//!
//! # Sessions
//!
//! The decoded and pending values of a call form its session. A session is created when a
//! call starts and dropped when it returns (on success or error), and it is never stored on
//! the [Record] itself. A slot's codec may therefore be another record, or the same record
//! through [recursive](crate::recursive::recursive), and one record may be used from many
//! threads at once.
//!
//! # Example
//!
//! ```
//! use weft_codec::{
//!     types::{primitives::I32, text::Text},
//!     CodecExt, RecordBuilder,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let mut builder = RecordBuilder::new("person");
//! let name = builder.field("name", Text::new());
//! let age = builder.field("age", I32);
//! let codec = builder.build(
//!     move |fields| {
//!         Ok(Person {
//!             age: fields.take(&age)?,
//!             name: fields.take(&name)?,
//!         })
//!     },
//!     move |person: &Person, out| {
//!         out.set(&age, person.age)?;
//!         out.set(&name, person.name.clone())
//!     },
//! );
//!
//! let person = Person { name: "ab".into(), age: 7 };
//! let encoded = codec.to_bytes(&person).unwrap();
//! assert_eq!(encoded, &[0, 0, 0, 2, 0, b'a', 0, b'b', 0, 0, 0, 7][..]);
//! assert_eq!(codec.from_bytes(encoded).unwrap(), person);
//! ```

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use std::{
    any::Any,
    fmt,
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};
use tracing::{debug, trace};

/// Source of unique record identifiers, used to reject slots of another record.
static NEXT_RECORD: AtomicU64 = AtomicU64::new(0);

/// Identifies a slot: its owning record, position and name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    record: u64,
    index: usize,
    name: &'static str,
}

impl SlotId {
    /// Position of the slot in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (#{})", self.name, self.index)
    }
}

/// A typed handle to one slot of a record.
pub struct Slot<K> {
    id: SlotId,
    _value: PhantomData<fn() -> K>,
}

impl<K> Slot<K> {
    pub fn id(&self) -> SlotId {
        self.id
    }
}

impl<K> Clone for Slot<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Slot<K> {}

impl<K> fmt::Debug for Slot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.id).finish()
    }
}

/// A slot codec with its value type erased.
trait ErasedCodec: Send + Sync {
    fn decode(&self, source: &mut dyn Source) -> Result<Box<dyn Any>, Error>;
    fn encode(&self, sink: &mut dyn Sink, value: &dyn Any) -> Result<(), Error>;
    fn has_default(&self) -> bool;
    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error>;
}

struct Erased<C>(C);

impl<C> ErasedCodec for Erased<C>
where
    C: Codec,
    C::Value: 'static,
{
    fn decode(&self, source: &mut dyn Source) -> Result<Box<dyn Any>, Error> {
        let value = self.0.decode(source)?;
        Ok(Box::new(value))
    }

    fn encode(&self, sink: &mut dyn Sink, value: &dyn Any) -> Result<(), Error> {
        let value = value
            .downcast_ref::<C::Value>()
            .ok_or(Error::InvalidData("Record", "slot value has the wrong type"))?;
        self.0.encode(sink, value)
    }

    fn has_default(&self) -> bool {
        self.0.has_default()
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        self.0.encode_default(sink)
    }
}

type Values = Vec<Option<Box<dyn Any>>>;

/// Checks that `id` belongs to `record` and returns its position.
fn position(record: u64, len: usize, id: SlotId) -> Result<usize, Error> {
    if id.record != record || id.index >= len {
        return Err(Error::ForeignSlot(id));
    }
    Ok(id.index)
}

/// Slot values read during one decode call.
pub struct Decoded {
    record: u64,
    values: Values,
}

impl Decoded {
    /// Borrows the decoded value of `slot`.
    pub fn get<K: 'static>(&self, slot: &Slot<K>) -> Result<&K, Error> {
        let index = position(self.record, self.values.len(), slot.id)?;
        self.values[index]
            .as_ref()
            .ok_or(Error::SlotTaken(slot.id))?
            .downcast_ref::<K>()
            .ok_or(Error::ForeignSlot(slot.id))
    }

    /// Moves the decoded value of `slot` out. A slot can be taken once.
    pub fn take<K: 'static>(&mut self, slot: &Slot<K>) -> Result<K, Error> {
        let index = position(self.record, self.values.len(), slot.id)?;
        let value = self.values[index].take().ok_or(Error::SlotTaken(slot.id))?;
        value
            .downcast::<K>()
            .map(|value| *value)
            .map_err(|_| Error::ForeignSlot(slot.id))
    }
}

/// Slot values supplied for one encode call.
pub struct Pending {
    record: u64,
    values: Values,
}

impl Pending {
    /// Supplies the value written for `slot`, replacing any earlier one.
    pub fn set<K: 'static>(&mut self, slot: &Slot<K>, value: K) -> Result<(), Error> {
        let index = position(self.record, self.values.len(), slot.id)?;
        self.values[index] = Some(Box::new(value));
        Ok(())
    }

    /// Returns true if a value was supplied for `slot`.
    pub fn is_set<K>(&self, slot: &Slot<K>) -> bool {
        position(self.record, self.values.len(), slot.id)
            .map(|index| self.values[index].is_some())
            .unwrap_or(false)
    }
}

type DecodeFn<T> = Box<dyn Fn(&mut Decoded) -> Result<T, Error> + Send + Sync>;
type EncodeFn<T> = Box<dyn Fn(&T, &mut Pending) -> Result<(), Error> + Send + Sync>;

/// Declares the slots of a [Record].
pub struct RecordBuilder<T> {
    name: &'static str,
    id: u64,
    slots: Vec<(SlotId, Box<dyn ErasedCodec>)>,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordBuilder<T> {
    /// Starts a record. `name` only appears in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            id: NEXT_RECORD.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Appends a slot and returns its handle.
    pub fn field<C>(&mut self, name: &'static str, codec: C) -> Slot<C::Value>
    where
        C: Codec + 'static,
        C::Value: 'static,
    {
        let id = SlotId {
            record: self.id,
            index: self.slots.len(),
            name,
        };
        self.slots.push((id, Box::new(Erased(codec))));
        Slot {
            id,
            _value: PhantomData,
        }
    }

    /// Finishes the record.
    ///
    /// `decoder` builds the value from the decoded slots and `encoder` supplies slot values
    /// for a value being written.
    pub fn build<D, E>(self, decoder: D, encoder: E) -> Record<T>
    where
        D: Fn(&mut Decoded) -> Result<T, Error> + Send + Sync + 'static,
        E: Fn(&T, &mut Pending) -> Result<(), Error> + Send + Sync + 'static,
    {
        Record {
            name: self.name,
            id: self.id,
            slots: self.slots,
            decoder: Box::new(decoder),
            encoder: Box::new(encoder),
        }
    }
}

/// A codec for a product type, assembled from named slots.
pub struct Record<T> {
    name: &'static str,
    id: u64,
    slots: Vec<(SlotId, Box<dyn ErasedCodec>)>,
    decoder: DecodeFn<T>,
    encoder: EncodeFn<T>,
}

impl<T> Record<T> {
    pub fn builder(name: &'static str) -> RecordBuilder<T> {
        RecordBuilder::new(name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Slots in declaration (and wire) order.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().map(|(id, _)| *id)
    }
}

impl<T> fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("slots", &self.slots().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Codec for Record<T> {
    type Value = T;

    fn encode(&self, sink: &mut dyn Sink, value: &T) -> Result<(), Error> {
        trace!(record = self.name, slots = self.slots.len(), "encoding record");
        let mut pending = Pending {
            record: self.id,
            values: self.slots.iter().map(|_| None).collect(),
        };
        (self.encoder)(value, &mut pending)?;

        for ((id, codec), value) in self.slots.iter().zip(&pending.values) {
            match value {
                Some(value) => codec.encode(sink, &**value)?,
                None => {
                    if !codec.encode_default(sink)? {
                        debug!(record = self.name, slot = %id, "missing required field");
                        return Err(Error::MissingRequiredField(*id));
                    }
                    trace!(record = self.name, slot = %id, "encoded default");
                }
            }
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<T, Error> {
        trace!(record = self.name, slots = self.slots.len(), "decoding record");
        let mut values = Vec::with_capacity(self.slots.len());
        for (id, codec) in &self.slots {
            match codec.decode(source) {
                Ok(value) => values.push(Some(value)),
                Err(err) => {
                    debug!(record = self.name, slot = %id, ?err, "failed to decode slot");
                    return Err(Error::DependencyDecodeFailed {
                        slot: *id,
                        source: Box::new(err),
                    });
                }
            }
        }

        let mut decoded = Decoded {
            record: self.id,
            values,
        };
        (self.decoder)(&mut decoded)
    }

    fn has_default(&self) -> bool {
        self.slots.iter().all(|(_, codec)| codec.has_default())
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        if !self.has_default() {
            return Ok(false);
        }
        for (_, codec) in &self.slots {
            codec.encode_default(sink)?;
        }
        Ok(true)
    }
}
