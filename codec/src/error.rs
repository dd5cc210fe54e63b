//! Error types for codec operations

use crate::record::SlotId;
use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("channel closed")]
    ChannelClosed,
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("sink capacity exhausted")]
    SinkFull,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, &'static str), // context, message
    #[error("value not in union: {0}")]
    ValueNotInUnion(String),
    #[error("union index {index} out of range for {len} choices")]
    IndexOutOfRange { index: u64, len: usize },
    #[error("missing required field: {0}")]
    MissingRequiredField(SlotId),
    #[error("failed to decode dependency {slot}: {source}")]
    DependencyDecodeFailed {
        slot: SlotId,
        #[source]
        source: Box<Error>,
    },
    #[error("slot {0} does not belong to this record")]
    ForeignSlot(SlotId),
    #[error("slot {0} already taken")]
    SlotTaken(SlotId),
    #[error("recursive codec used after its owner was dropped")]
    UnboundRecursion,
    #[error("recursion depth exceeded: {0}")]
    RecursionLimit(usize), // max
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
