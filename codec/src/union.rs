//! Codecs over a closed set of values.
//!
//! # Format
//!
//! A [Union] of `N` admissible values writes only the position of the value in its
//! definition order, as a big-endian unsigned integer of the fewest whole bytes able to
//! represent `N - 1`:
//!
//! | choices  | index width |
//! |----------|-------------|
//! | 1        | 0 bytes     |
//! | 2..=256  | 1 byte      |
//! | 257..=65536 | 2 bytes  |
//!
//! The width depends only on the set of choices, never on the value being written, so
//! every value of a given union has the same encoded length.
//!
//! # Enumerations
//!
//! Types with a fixed list of members implement [Enumerated] and are encoded with
//! [enumeration]:
//!
//! ```
//! use weft_codec::{enumeration, CodecExt, Enumerated};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Suit {
//!     Clubs,
//!     Diamonds,
//!     Hearts,
//!     Spades,
//! }
//!
//! impl Enumerated for Suit {
//!     const VARIANTS: &'static [Self] = &[Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];
//! }
//!
//! let codec = enumeration::<Suit>();
//! assert_eq!(codec.to_bytes(&Suit::Hearts).unwrap(), &[2][..]);
//! ```

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use std::fmt::Debug;

/// Returns the number of bytes needed to index `choices` values.
pub const fn index_width(choices: usize) -> usize {
    if choices <= 1 {
        return 0;
    }
    let max = (choices - 1) as u64;
    let bits = (u64::BITS - max.leading_zeros()) as usize;
    bits.div_ceil(8)
}

/// A codec over a fixed, ordered list of admissible values.
#[derive(Clone, Debug)]
pub struct Union<T> {
    choices: Vec<T>,
    width: usize,
}

impl<T: PartialEq> Union<T> {
    /// Builds a union over `choices` in the given order.
    ///
    /// Repeated values keep their first position.
    pub fn new(choices: impl IntoIterator<Item = T>) -> Self {
        let mut unique: Vec<T> = Vec::new();
        for choice in choices {
            if !unique.contains(&choice) {
                unique.push(choice);
            }
        }
        let width = index_width(unique.len());
        Self {
            choices: unique,
            width,
        }
    }

    pub fn choices(&self) -> &[T] {
        &self.choices
    }

    /// Number of bytes every value of this union encodes to.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl<T> Codec for Union<T>
where
    T: PartialEq + Clone + Debug + Send + Sync,
{
    type Value = T;

    fn encode(&self, sink: &mut dyn Sink, value: &T) -> Result<(), Error> {
        let index = self
            .choices
            .iter()
            .position(|choice| choice == value)
            .ok_or_else(|| Error::ValueNotInUnion(format!("{value:?}")))?;
        let bytes = (index as u64).to_be_bytes();
        sink.write_all(&bytes[bytes.len() - self.width..])
    }

    fn decode(&self, source: &mut dyn Source) -> Result<T, Error> {
        let mut index = 0u64;
        for _ in 0..self.width {
            index = (index << 8) | u64::from(source.next()?);
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.choices.get(i))
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.choices.len(),
            })
    }
}

/// A type with a fixed list of members, in declaration order.
pub trait Enumerated: Sized + 'static {
    const VARIANTS: &'static [Self];
}

/// A [Union] over every member of `E`.
pub fn enumeration<E>() -> Union<E>
where
    E: Enumerated + PartialEq + Clone,
{
    Union::new(E::VARIANTS.iter().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecExt;
    use test_case::test_case;

    #[test_case(0, 0; "empty")]
    #[test_case(1, 0; "singleton")]
    #[test_case(2, 1; "two")]
    #[test_case(256, 1; "byte boundary")]
    #[test_case(257, 2; "past byte boundary")]
    #[test_case(65536, 2; "short boundary")]
    #[test_case(65537, 3; "past short boundary")]
    fn test_index_width(choices: usize, expected: usize) {
        assert_eq!(index_width(choices), expected);
    }

    #[test]
    fn test_definition_order() {
        let codec = Union::new(["zeta", "alpha", "mu"]);
        assert_eq!(codec.to_bytes(&"zeta").unwrap(), &[0][..]);
        assert_eq!(codec.to_bytes(&"alpha").unwrap(), &[1][..]);
        assert_eq!(codec.from_bytes(&[2][..]).unwrap(), "mu");
    }

    #[test]
    fn test_minimality() {
        let codec = Union::new(0u32..256);
        assert_eq!(codec.width(), 1);
        for value in [0u32, 1, 128, 255] {
            let encoded = codec.to_bytes(&value).unwrap();
            assert_eq!(encoded, &[value as u8][..]);
            assert_eq!(codec.from_bytes(encoded).unwrap(), value);
        }

        let codec = Union::new(0u32..257);
        assert_eq!(codec.width(), 2);
        assert_eq!(codec.to_bytes(&0).unwrap(), &[0, 0][..]);
        assert_eq!(codec.to_bytes(&256).unwrap(), &[1, 0][..]);
        assert_eq!(codec.from_bytes(&[1, 0][..]).unwrap(), 256);
    }

    #[test]
    fn test_singleton() {
        let codec = Union::new(["only"]);
        assert!(codec.to_bytes(&"only").unwrap().is_empty());
        assert_eq!(codec.from_bytes(&[][..]).unwrap(), "only");
        assert!(matches!(
            codec.to_bytes(&"other"),
            Err(Error::ValueNotInUnion(v)) if v == "\"other\""
        ));
    }

    #[test]
    fn test_deduplicates() {
        let codec = Union::new([3u8, 1, 3, 2, 1]);
        assert_eq!(codec.choices(), &[3, 1, 2]);
        assert_eq!(codec.to_bytes(&2).unwrap(), &[2][..]);
    }

    #[test]
    fn test_index_out_of_range() {
        let codec = Union::new(['a', 'b', 'c']);
        assert!(matches!(
            codec.from_bytes(&[3][..]),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_empty_union() {
        let codec = Union::<u8>::new([]);
        assert!(matches!(codec.to_bytes(&0), Err(Error::ValueNotInUnion(_))));
        assert!(matches!(
            codec.from_bytes(&[][..]),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl Enumerated for Color {
        const VARIANTS: &'static [Self] = &[Self::Red, Self::Green, Self::Blue];
    }

    #[test]
    fn test_enumeration() {
        let codec = enumeration::<Color>();
        assert_eq!(codec.width(), 1);
        for (index, color) in Color::VARIANTS.iter().enumerate() {
            let encoded = codec.to_bytes(color).unwrap();
            assert_eq!(encoded, &[index as u8][..]);
            assert_eq!(codec.from_bytes(encoded).unwrap(), *color);
        }
        let list = codec.list();
        let value = vec![Color::Blue, Color::Red];
        assert_eq!(list.to_bytes(&value).unwrap(), &[0, 0, 0, 2, 2, 0][..]);
    }
}
