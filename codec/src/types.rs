//! Codec implementations for common values and the combinators that compose them.
//!
//! Every codec here is an ordinary value implementing [crate::Codec]; combinators are
//! usually reached through [crate::CodecExt].

pub mod either;
pub mod map;
pub mod nullable;
pub mod primitives;
pub mod range;
pub mod sequence;
pub mod text;
pub mod transform;
pub mod tuple;
