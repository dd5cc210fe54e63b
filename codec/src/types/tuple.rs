//! Codecs for tuples of values.
//!
//! A tuple is the plain concatenation of its components, written and read in order. The
//! two-element [Tuple2] is the pair codec (see [crate::CodecExt::pair]).

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use paste::paste;

// Tuple implementation
macro_rules! impl_codec_for_tuple {
    ($arity:literal; $($index:literal),*) => {
        paste! {
            #[doc = concat!("Concatenation of ", stringify!($arity), " codecs.")]
            #[derive(Clone, Debug)]
            pub struct [<Tuple $arity>]<$( [<C $index>] ),*>($( [<C $index>] ),*);

            impl<$( [<C $index>]: Codec ),*> [<Tuple $arity>]<$( [<C $index>] ),*> {
                pub fn new($( [<c $index>]: [<C $index>] ),*) -> Self {
                    Self($( [<c $index>] ),*)
                }
            }

            impl<$( [<C $index>]: Codec ),*> Codec for [<Tuple $arity>]<$( [<C $index>] ),*> {
                type Value = ( $( [<C $index>]::Value, )* );

                #[inline]
                fn encode(&self, sink: &mut dyn Sink, value: &Self::Value) -> Result<(), Error> {
                    $( self.$index.encode(sink, &value.$index)?; )*
                    Ok(())
                }

                #[inline]
                fn decode(&self, source: &mut dyn Source) -> Result<Self::Value, Error> {
                    Ok(( $( self.$index.decode(source)?, )* ))
                }

                fn has_default(&self) -> bool {
                    true $( && self.$index.has_default() )*
                }

                fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
                    if !self.has_default() {
                        return Ok(false);
                    }
                    $( self.$index.encode_default(sink)?; )*
                    Ok(true)
                }
            }

            #[doc = concat!("Builds a [", stringify!([<Tuple $arity>]), "].")]
            pub fn [<tuple $arity>]<$( [<C $index>]: Codec ),*>(
                $( [<c $index>]: [<C $index>] ),*
            ) -> [<Tuple $arity>]<$( [<C $index>] ),*> {
                [<Tuple $arity>]::new($( [<c $index>] ),*)
            }
        }
    };
}

impl_codec_for_tuple!(2; 0, 1);
impl_codec_for_tuple!(3; 0, 1, 2);
impl_codec_for_tuple!(4; 0, 1, 2, 3);
impl_codec_for_tuple!(5; 0, 1, 2, 3, 4);
impl_codec_for_tuple!(6; 0, 1, 2, 3, 4, 5);
