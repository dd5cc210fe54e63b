#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use std::collections::{BTreeMap, BTreeSet};
use weft_codec::{
    types::{
        primitives::{Bool, ByteArray, F64, I16, I64, U32, U64, U8},
        range::Progression,
        text::Text,
    },
    Codec, CodecExt, RecordBuilder, Union,
};

fn roundtrip<C>(codec: &C, value: &C::Value)
where
    C: Codec,
    C::Value: PartialEq + std::fmt::Debug,
{
    let encoded = codec.to_bytes(value).expect("Failed to encode!");
    assert_eq!(codec.encode_size(value).unwrap(), encoded.len());
    let decoded = codec
        .from_bytes(encoded)
        .expect("Failed to decode a successfully encoded input!");
    assert_eq!(&decoded, value);
}

fn roundtrip_float(value: f64) {
    let encoded = F64.to_bytes(&value).unwrap();
    assert_eq!(encoded.len(), 8);
    let decoded = F64.from_bytes(encoded).unwrap();
    assert_eq!(decoded.to_bits(), value.to_bits());
}

#[derive(Arbitrary, Debug, Clone, PartialEq)]
struct Entry {
    id: u64,
    label: String,
    flags: Vec<bool>,
    parent: Option<u32>,
}

fn roundtrip_record(entry: Entry) {
    let mut builder = RecordBuilder::new("entry");
    let id = builder.field("id", U64);
    let label = builder.field("label", Text::new());
    let flags = builder.field("flags", Bool.list());
    let parent = builder.field("parent", U32.nullable());
    let codec = builder.build(
        move |fields| {
            Ok(Entry {
                id: fields.take(&id)?,
                label: fields.take(&label)?,
                flags: fields.take(&flags)?,
                parent: fields.take(&parent)?,
            })
        },
        move |entry: &Entry, out| {
            out.set(&parent, entry.parent)?;
            out.set(&flags, entry.flags.clone())?;
            out.set(&label, entry.label.clone())?;
            out.set(&id, entry.id)
        },
    );
    roundtrip(&codec, &entry);
}

fn roundtrip_union(choices: Vec<u16>, pick: usize) {
    let codec = Union::new(choices);
    if codec.choices().is_empty() {
        return;
    }
    let value = codec.choices()[pick % codec.choices().len()];
    let encoded = codec.to_bytes(&value).unwrap();
    assert_eq!(encoded.len(), codec.width());
    assert_eq!(codec.from_bytes(encoded).unwrap(), value);
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Bytes(&'a [u8]),
    Text(String),
    Float(f64),
    Signed(i16, i64),
    Pairs(Vec<(u8, Option<i64>)>),
    Map(BTreeMap<u32, String>),
    Set(BTreeSet<i64>),
    Range(u32, u32),
    Progression(i64, i64, i64),
    Record(Entry),
    Union(Vec<u16>, usize),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Bytes(it) => roundtrip(&ByteArray::new(), &Bytes::from(it.to_vec())),
        FuzzInput::Text(it) => roundtrip(&Text::new(), &it),
        FuzzInput::Float(it) => roundtrip_float(it),
        FuzzInput::Signed(a, b) => roundtrip(&I16.pair(I64), &(a, b)),
        FuzzInput::Pairs(it) => roundtrip(&U8.pair(I64.nullable()).list(), &it),
        FuzzInput::Map(it) => roundtrip(&U32.btree_map_to(Text::new()), &it),
        FuzzInput::Set(it) => roundtrip(&I64.btree_set(), &it),
        FuzzInput::Range(a, b) => roundtrip(&U32.range(), &(a..b)),
        FuzzInput::Progression(first, last, step) => {
            roundtrip(&I64.progression(), &Progression::new(first, last, step))
        }
        FuzzInput::Record(it) => roundtrip_record(it),
        FuzzInput::Union(choices, pick) => roundtrip_union(choices, pick),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
