//! Tagged sums of two codecs.
//!
//! A one-byte tag selects the side: `0` for left, `1` for right and, for [Ior], `2` for
//! both (left then right). Any other tag is rejected when decoding.

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use either::Either;

const LEFT: u8 = 0;
const RIGHT: u8 = 1;
const BOTH: u8 = 2;

/// Encodes [Either] with a side tag.
#[derive(Clone, Debug)]
pub struct EitherCodec<L, R> {
    left: L,
    right: R,
}

impl<L: Codec, R: Codec> EitherCodec<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Codec, R: Codec> Codec for EitherCodec<L, R> {
    type Value = Either<L::Value, R::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        match value {
            Either::Left(left) => {
                sink.write(LEFT)?;
                self.left.encode(sink, left)
            }
            Either::Right(right) => {
                sink.write(RIGHT)?;
                self.right.encode(sink, right)
            }
        }
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        match source.next()? {
            LEFT => self.left.decode(source).map(Either::Left),
            RIGHT => self.right.decode(source).map(Either::Right),
            _ => Err(Error::InvalidData("Either", "invalid tag")),
        }
    }
}

/// An inclusive-or: a left value, a right value, or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ior<A, B> {
    Left(A),
    Right(B),
    Both(A, B),
}

impl<A, B> Ior<A, B> {
    pub fn left(&self) -> Option<&A> {
        match self {
            Ior::Left(a) | Ior::Both(a, _) => Some(a),
            Ior::Right(_) => None,
        }
    }

    pub fn right(&self) -> Option<&B> {
        match self {
            Ior::Right(b) | Ior::Both(_, b) => Some(b),
            Ior::Left(_) => None,
        }
    }
}

/// Encodes [Ior] with a side tag.
#[derive(Clone, Debug)]
pub struct IorCodec<L, R> {
    left: L,
    right: R,
}

impl<L: Codec, R: Codec> IorCodec<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L: Codec, R: Codec> Codec for IorCodec<L, R> {
    type Value = Ior<L::Value, R::Value>;

    fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
        match value {
            Ior::Left(left) => {
                sink.write(LEFT)?;
                self.left.encode(sink, left)
            }
            Ior::Right(right) => {
                sink.write(RIGHT)?;
                self.right.encode(sink, right)
            }
            Ior::Both(left, right) => {
                sink.write(BOTH)?;
                self.left.encode(sink, left)?;
                self.right.encode(sink, right)
            }
        }
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
        match source.next()? {
            LEFT => self.left.decode(source).map(Ior::Left),
            RIGHT => self.right.decode(source).map(Ior::Right),
            BOTH => {
                let left = self.left.decode(source)?;
                let right = self.right.decode(source)?;
                Ok(Ior::Both(left, right))
            }
            _ => Err(Error::InvalidData("Ior", "invalid tag")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{
            primitives::{U16, U8},
            text::Text,
        },
        CodecExt,
    };

    #[test]
    fn test_either() {
        let codec = U16.either(Text::new());
        let values = [Either::Left(513u16), Either::Right("hi".to_string())];
        for value in values {
            let encoded = codec.to_bytes(&value).unwrap();
            assert_eq!(codec.from_bytes(encoded).unwrap(), value);
        }
        assert_eq!(
            codec.to_bytes(&Either::Left(513)).unwrap(),
            &[0, 2, 1][..]
        );
        assert!(matches!(
            codec.from_bytes(&[2, 0, 0][..]),
            Err(Error::InvalidData("Either", _))
        ));
    }

    #[test]
    fn test_ior() {
        let codec = U8.ior(U16);
        let values = [Ior::Left(1u8), Ior::Right(2u16), Ior::Both(3u8, 4u16)];
        for value in values {
            let encoded = codec.to_bytes(&value).unwrap();
            assert_eq!(codec.from_bytes(encoded).unwrap(), value);
        }
        assert_eq!(codec.to_bytes(&Ior::Both(3, 4)).unwrap(), &[2, 3, 0, 4][..]);
        assert!(matches!(
            codec.from_bytes(&[3][..]),
            Err(Error::InvalidData("Ior", _))
        ));
        assert_eq!(Ior::<u8, u16>::Both(1, 2).left(), Some(&1));
        assert_eq!(Ior::<u8, u16>::Left(1).right(), None);
    }
}
