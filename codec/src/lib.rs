//! Compose byte-exact binary codecs.
//!
//! # Overview
//!
//! A [Codec] is a value describing how one type maps to bytes and back. Codecs are built
//! once, from primitives and combinators, and then invoked any number of times (from any
//! number of threads) against a byte [Source](channel::Source) or [Sink](channel::Sink).
//!
//! The format is defined entirely by the shape of the codec: no type tags, field names or
//! schema are written. Every integer is big-endian and every length or count prefix is a
//! 4-byte unsigned integer.
//!
//! # Supported Types
//!
//! - Primitives: fixed-width integers, floats, `bool`, `()`, 16-bit characters, text and
//!   byte arrays (see [types::primitives] and [types::text])
//! - Combinators: pairs and tuples, nullable values, lists, sets, fixed-arity collections,
//!   maps, ranges and progressions, [Either](either::Either) and [Ior](types::either::Ior)
//!   (see [CodecExt])
//! - Closed sets of values, written as a minimal-width index (see [Union])
//! - Product types assembled from named slots (see [RecordBuilder]), including types that
//!   contain themselves (see [recursive()])
//!
//! # Example
//!
//! ```
//! use weft_codec::{
//!     types::primitives::{Bool, U16},
//!     CodecExt,
//! };
//!
//! let codec = U16.pair(Bool.nullable()).list();
//! let value = vec![(1, Some(true)), (2, None)];
//!
//! let encoded = codec.to_bytes(&value).unwrap();
//! assert_eq!(encoded, &[0, 0, 0, 2, 0, 1, 1, 1, 0, 2, 0][..]);
//! assert_eq!(codec.from_bytes(encoded).unwrap(), value);
//! ```
//!
//! # Safety
//!
//! Decoding untrusted input never allocates more than the input could describe: collection
//! capacity is capped by the bytes a source reports as available, and every count-prefixed
//! codec accepts a [RangeCfg] limit on the decoded count. Elements that encode to nothing
//! are accepted only up to that limit's upper end, or (without one) up to the bytes left
//! after the count.
//!
//! Nesting through [recursive()] codecs is bounded per call (see [DEFAULT_MAX_DEPTH]), so
//! hostile input fails with [Error::RecursionLimit] rather than exhausting the stack.

pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod record;
pub mod recursive;
pub mod types;
pub mod union;
pub mod util;

// Re-export main types and traits
pub use channel::{BufSink, BufSource, CountingSink, IoSink, IoSource, Sink, Source};
pub use codec::{BoxCodec, Codec, CodecExt};
pub use config::RangeCfg;
pub use error::Error;
pub use record::{Decoded, Pending, Record, RecordBuilder, Slot, SlotId};
pub use recursive::{
    recursive, recursive_with_depth, Recursive, RecursiveCodec, DEFAULT_MAX_DEPTH,
};
pub use types::primitives;
pub use union::{enumeration, index_width, Enumerated, Union};
