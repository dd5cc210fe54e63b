//! Codecs for fixed-width scalars and raw bytes.
//!
//! # Layout
//!
//! * Integers are written big-endian, most significant byte first.
//! * Floats are written as the IEEE-754 bit pattern through the integer codec of the same
//!   width.
//! * `bool` is one byte: `0` is false and anything else decodes as true (encode always
//!   writes `1`).
//! * [ByteArray] is a 4-byte count followed by the raw bytes.
//!
//! Every codec in this module is default-capable: the default is the zero value of the
//! type (an empty buffer for [ByteArray]).

use crate::{
    channel::{Sink, Source},
    util::{read_len, write_len},
    Codec, Error, RangeCfg,
};
use bytes::Bytes;
use core::ops::RangeBounds;

// Numeric types implementation
macro_rules! impl_integer {
    ($name:ident, $type:ty) => {
        #[doc = concat!("Big-endian `", stringify!($type), "`.")]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Codec for $name {
            type Value = $type;

            #[inline]
            fn encode(&self, sink: &mut dyn Sink, value: &$type) -> Result<(), Error> {
                sink.write_all(&value.to_be_bytes())
            }

            #[inline]
            fn decode(&self, source: &mut dyn Source) -> Result<$type, Error> {
                let mut bytes = [0u8; std::mem::size_of::<$type>()];
                source.read_exact(&mut bytes)?;
                Ok(<$type>::from_be_bytes(bytes))
            }

            fn has_default(&self) -> bool {
                true
            }

            fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
                self.encode(sink, &0)?;
                Ok(true)
            }
        }
    };
}

impl_integer!(U8, u8);
impl_integer!(U16, u16);
impl_integer!(U32, u32);
impl_integer!(U64, u64);
impl_integer!(I8, i8);
impl_integer!(I16, i16);
impl_integer!(I32, i32);
impl_integer!(I64, i64);

macro_rules! impl_float {
    ($name:ident, $type:ty, $bits:ident) => {
        #[doc = concat!("`", stringify!($type), "` as its big-endian IEEE-754 bits.")]
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Codec for $name {
            type Value = $type;

            #[inline]
            fn encode(&self, sink: &mut dyn Sink, value: &$type) -> Result<(), Error> {
                $bits.encode(sink, &value.to_bits())
            }

            #[inline]
            fn decode(&self, source: &mut dyn Source) -> Result<$type, Error> {
                $bits.decode(source).map(<$type>::from_bits)
            }

            fn has_default(&self) -> bool {
                true
            }

            fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
                self.encode(sink, &0.0)?;
                Ok(true)
            }
        }
    };
}

impl_float!(F32, f32, U32);
impl_float!(F64, f64, U64);

/// One byte per boolean.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bool;

impl Codec for Bool {
    type Value = bool;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &bool) -> Result<(), Error> {
        sink.write(u8::from(*value))
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<bool, Error> {
        Ok(source.next()? != 0)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        self.encode(sink, &false)?;
        Ok(true)
    }
}

/// The empty value. Writes and reads nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unit;

impl Codec for Unit {
    type Value = ();

    fn encode(&self, _: &mut dyn Sink, _: &()) -> Result<(), Error> {
        Ok(())
    }

    fn decode(&self, _: &mut dyn Source) -> Result<(), Error> {
        Ok(())
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, _: &mut dyn Sink) -> Result<bool, Error> {
        Ok(true)
    }
}

/// Structural filler of a fixed width.
///
/// Encoding writes `width` zero bytes; decoding discards `width` bytes whatever their
/// content.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noop {
    width: usize,
}

impl Noop {
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    pub const fn width(&self) -> usize {
        self.width
    }
}

impl Codec for Noop {
    type Value = ();

    fn encode(&self, sink: &mut dyn Sink, _: &()) -> Result<(), Error> {
        for _ in 0..self.width {
            sink.write(0)?;
        }
        Ok(())
    }

    fn decode(&self, source: &mut dyn Source) -> Result<(), Error> {
        if source.skip(self.width)? < self.width {
            return Err(Error::EndOfInput);
        }
        Ok(())
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        self.encode(sink, &())?;
        Ok(true)
    }
}

/// A count-prefixed run of raw bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteArray {
    limit: RangeCfg,
}

impl ByteArray {
    pub const fn new() -> Self {
        Self {
            limit: RangeCfg::unbounded(),
        }
    }

    /// Rejects decoded lengths outside `limit`.
    pub fn limit(mut self, range: impl RangeBounds<usize>) -> Self {
        self.limit = RangeCfg::new(range);
        self
    }
}

impl Codec for ByteArray {
    type Value = Bytes;

    fn encode(&self, sink: &mut dyn Sink, value: &Bytes) -> Result<(), Error> {
        write_len(sink, value.len())?;
        sink.write_all(value)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Bytes, Error> {
        let len = read_len(source, &self.limit)?;
        if source.available() >= len {
            let mut data = vec![0u8; len];
            source.read_exact(&mut data)?;
            return Ok(Bytes::from(data));
        }

        // Streaming sources may not report everything up front.
        let mut data = Vec::with_capacity(source.available());
        for _ in 0..len {
            data.push(source.next()?);
        }
        Ok(Bytes::from(data))
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        write_len(sink, 0)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{channel::BufSink, CodecExt};
    use bytes::Bytes;
    use paste::paste;

    macro_rules! impl_num_test {
        ($name:ident, $type:ty, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let encoded = $name.to_bytes(value).unwrap();
                        assert_eq!(encoded.len(), $size);
                        assert_eq!(encoded.as_ref(), &value.to_be_bytes()[..]);
                        let decoded = $name.from_bytes(encoded).unwrap();
                        assert_eq!(*value, decoded);
                    }

                    let mut sink = BufSink::new(Vec::new());
                    assert!($name.encode_default(&mut sink).unwrap());
                    assert_eq!(sink.into_inner(), vec![0u8; $size]);
                }
            }
        };
    }
    impl_num_test!(U8, u8, 1);
    impl_num_test!(U16, u16, 2);
    impl_num_test!(U32, u32, 4);
    impl_num_test!(U64, u64, 8);
    impl_num_test!(I8, i8, 1);
    impl_num_test!(I16, i16, 2);
    impl_num_test!(I32, i32, 4);
    impl_num_test!(I64, i64, 8);
    impl_num_test!(F32, f32, 4);
    impl_num_test!(F64, f64, 8);

    #[test]
    fn test_i64_max() {
        let encoded = I64.to_bytes(&i64::MAX).unwrap();
        assert_eq!(I64.from_bytes(encoded).unwrap(), 9223372036854775807);
    }

    #[test]
    fn test_conformity() {
        assert_eq!(U16.to_bytes(&0xABCD).unwrap(), &[0xAB, 0xCD][..]);
        assert_eq!(I16.to_bytes(&-1).unwrap(), &[0xFF, 0xFF][..]);
        assert_eq!(
            U32.to_bytes(&0xABCDEF01).unwrap(),
            &[0xAB, 0xCD, 0xEF, 0x01][..]
        );
        assert_eq!(
            U64.to_bytes(&0x0123456789ABCDEF).unwrap(),
            &[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF][..]
        );
        assert_eq!(I8.to_bytes(&-128).unwrap(), &[0x80][..]);

        // Big-endian IEEE 754
        assert_eq!(F32.to_bytes(&1.0).unwrap(), &[0x3F, 0x80, 0x00, 0x00][..]);
        assert_eq!(F32.to_bytes(&-1.0).unwrap(), &[0xBF, 0x80, 0x00, 0x00][..]);
        assert_eq!(
            F64.to_bytes(&1.0).unwrap(),
            &[0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00][..]
        );
    }

    #[test]
    fn test_float_nan_bits() {
        let encoded = F64.to_bytes(&f64::NAN).unwrap();
        assert_eq!(encoded.as_ref(), &f64::NAN.to_be_bytes()[..]);
        assert!(F64.from_bytes(encoded).unwrap().is_nan());
    }

    #[test]
    fn test_bool() {
        assert_eq!(Bool.to_bytes(&true).unwrap(), &[0x01][..]);
        assert_eq!(Bool.to_bytes(&false).unwrap(), &[0x00][..]);
        assert!(!Bool.from_bytes(&[0x00][..]).unwrap());
        assert!(Bool.from_bytes(&[0x01][..]).unwrap());
        assert!(Bool.from_bytes(&[0x7F][..]).unwrap());
    }

    #[test]
    fn test_unit() {
        assert!(Unit.to_bytes(&()).unwrap().is_empty());
        Unit.from_bytes(&[][..]).unwrap();
        assert!(Unit.has_default());
    }

    #[test]
    fn test_noop() {
        let noop = Noop::new(3);
        assert_eq!(noop.to_bytes(&()).unwrap(), &[0, 0, 0][..]);
        noop.from_bytes(&[9, 9, 9][..]).unwrap();
        assert!(matches!(
            noop.from_bytes(&[9, 9][..]),
            Err(Error::EndOfInput)
        ));
        assert_eq!(Noop::new(0).to_bytes(&()).unwrap().len(), 0);
    }

    #[test]
    fn test_byte_array() {
        let values = [
            Bytes::new(),
            Bytes::from_static(&[1, 2, 3]),
            Bytes::from(vec![0; 300]),
        ];
        for value in values {
            let encoded = ByteArray::new().to_bytes(&value).unwrap();
            assert_eq!(encoded.len(), 4 + value.len());
            assert_eq!(ByteArray::new().from_bytes(encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_byte_array_limit() {
        let encoded = ByteArray::new()
            .to_bytes(&Bytes::from_static(&[1, 2, 3]))
            .unwrap();
        assert!(matches!(
            ByteArray::new().limit(..3).from_bytes(encoded),
            Err(Error::InvalidLength(3))
        ));
    }

    #[test]
    fn test_byte_array_truncated() {
        assert!(matches!(
            ByteArray::new().from_bytes(&[0, 0, 0, 4, 1, 2][..]),
            Err(Error::EndOfInput)
        ));
    }
}
