//! Codecs that reinterpret another codec.

use crate::{
    channel::{Sink, Source},
    Codec, Error,
};
use std::marker::PhantomData;

/// Views a base codec's value as another type.
///
/// `to` converts a decoded base value into the outer value and `from` converts an outer
/// value back before encoding. The pair must round-trip losslessly for the result to be a
/// lawful codec. A transform never has a default.
pub struct Transform<C: Codec, O, To = fn(<C as Codec>::Value) -> O, From = fn(&O) -> <C as Codec>::Value>
{
    base: C,
    to: To,
    from: From,
    _outer: PhantomData<fn() -> O>,
}

impl<C, O, To, From> Transform<C, O, To, From>
where
    C: Codec,
    To: Fn(C::Value) -> O + Send + Sync,
    From: Fn(&O) -> C::Value + Send + Sync,
{
    pub fn new(base: C, to: To, from: From) -> Self {
        Self {
            base,
            to,
            from,
            _outer: PhantomData,
        }
    }
}

impl<C, O, To, From> Codec for Transform<C, O, To, From>
where
    C: Codec,
    To: Fn(C::Value) -> O + Send + Sync,
    From: Fn(&O) -> C::Value + Send + Sync,
{
    type Value = O;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &O) -> Result<(), Error> {
        self.base.encode(sink, &(self.from)(value))
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<O, Error> {
        self.base.decode(source).map(&self.to)
    }
}

/// Forwards to the wrapped codec but never offers a default.
#[derive(Clone, Debug)]
pub struct Required<C> {
    inner: C,
}

impl<C: Codec> Required<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for Required<C> {
    type Value = C::Value;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &C::Value) -> Result<(), Error> {
        self.inner.encode(sink, value)
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<C::Value, Error> {
        self.inner.decode(source)
    }
}

/// Forwards to the wrapped codec and encodes a fixed value as its default.
#[derive(Clone, Debug)]
pub struct Defaulted<C: Codec> {
    inner: C,
    value: C::Value,
}

impl<C: Codec> Defaulted<C>
where
    C::Value: Send + Sync,
{
    pub fn new(inner: C, value: C::Value) -> Self {
        Self { inner, value }
    }
}

impl<C: Codec> Codec for Defaulted<C>
where
    C::Value: Send + Sync,
{
    type Value = C::Value;

    #[inline]
    fn encode(&self, sink: &mut dyn Sink, value: &C::Value) -> Result<(), Error> {
        self.inner.encode(sink, value)
    }

    #[inline]
    fn decode(&self, source: &mut dyn Source) -> Result<C::Value, Error> {
        self.inner.decode(source)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        self.inner.encode(sink, &self.value)?;
        Ok(true)
    }
}
