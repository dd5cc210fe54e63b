#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use weft_codec::{
    recursive,
    types::{
        primitives::{Bool, ByteArray, Unit, I32, U16, U32},
        text::Text,
    },
    CodecExt, RecordBuilder, Recursive, RecursiveCodec, Union,
};

#[derive(Debug)]
#[allow(dead_code)]
struct Node {
    value: i32,
    children: Vec<Node>,
}

fn node_codec() -> &'static RecursiveCodec<Node> {
    static CODEC: OnceLock<RecursiveCodec<Node>> = OnceLock::new();
    CODEC.get_or_init(|| {
        recursive(|this: Recursive<Node>| {
            let mut builder = RecordBuilder::new("node");
            let value = builder.field("value", I32);
            let children = builder.field("children", this.list());
            builder.build(
                move |fields| {
                    Ok(Node {
                        value: fields.take(&value)?,
                        children: fields.take(&children)?,
                    })
                },
                |_: &Node, _| Ok(()),
            )
        })
    })
}

// Decoding arbitrary input must fail cleanly, never panic, overflow the stack or over-allocate.
fuzz_target!(|data: &[u8]| {
    let _ = ByteArray::new().limit(..=1024).from_bytes(data);
    let _ = Text::new().from_bytes(data);
    let _ = U16.pair(Bool.nullable()).list().from_bytes(data);
    let _ = U32.btree_map_to(Text::new()).from_bytes(data);
    let _ = U32.either(Text::new()).from_bytes(data);
    let _ = U16.ior(U16).list().from_bytes(data);
    let _ = Unit.list().from_bytes(data);
    let _ = Union::new(["only"]).list().list().from_bytes(data);
    let _ = node_codec().from_bytes(data);
});
