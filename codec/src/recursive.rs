//! Self-referential codecs.
//!
//! A recursive type (a tree node holding optional children of its own type) needs a codec
//! that refers to itself. [recursive] hands the builder a [Recursive] handle standing in
//! for the codec under construction. The handle only holds a weak reference, so the
//! finished codec does not keep itself alive.
//!
//! # Depth
//!
//! Every pass through a [Recursive] handle counts as one level of nesting on the current
//! thread. Once a call nests deeper than the codec's maximum depth it fails with
//! [Error::RecursionLimit] instead of exhausting the stack, so hostile input cannot abort
//! the process. [recursive] uses [DEFAULT_MAX_DEPTH]; [recursive_with_depth] picks another
//! limit.

use crate::{
    channel::{Sink, Source},
    BoxCodec, Codec, Error,
};
use std::{
    cell::Cell,
    sync::{Arc, OnceLock, Weak},
};

/// Nesting allowed by [recursive].
pub const DEFAULT_MAX_DEPTH: usize = 128;

thread_local! {
    /// Nesting of recursive calls on this thread.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Holds one level of nesting until dropped.
struct DepthGuard;

impl DepthGuard {
    fn enter(max_depth: usize) -> Result<Self, Error> {
        DEPTH.with(|depth| {
            let next = depth.get() + 1;
            if next > max_depth {
                return Err(Error::RecursionLimit(max_depth));
            }
            depth.set(next);
            Ok(Self)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

struct Shared<T> {
    codec: OnceLock<BoxCodec<T>>,
    max_depth: usize,
}

impl<T> Shared<T> {
    fn codec(&self) -> Result<&BoxCodec<T>, Error> {
        self.codec.get().ok_or(Error::UnboundRecursion)
    }
}

/// A placeholder for the codec being built by [recursive].
///
/// Fails with [Error::UnboundRecursion] if used before the codec is built or after it has
/// been dropped.
pub struct Recursive<T> {
    shared: Weak<Shared<T>>,
}

impl<T> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Codec for Recursive<T> {
    type Value = T;

    fn encode(&self, sink: &mut dyn Sink, value: &T) -> Result<(), Error> {
        let shared = self.shared.upgrade().ok_or(Error::UnboundRecursion)?;
        let _guard = DepthGuard::enter(shared.max_depth)?;
        shared.codec()?.encode(sink, value)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<T, Error> {
        let shared = self.shared.upgrade().ok_or(Error::UnboundRecursion)?;
        let _guard = DepthGuard::enter(shared.max_depth)?;
        shared.codec()?.decode(source)
    }
}

/// The codec produced by [recursive].
pub struct RecursiveCodec<T> {
    shared: Arc<Shared<T>>,
}

impl<T> RecursiveCodec<T> {
    /// Deepest nesting a single call may reach.
    pub fn max_depth(&self) -> usize {
        self.shared.max_depth
    }
}

impl<T> Clone for RecursiveCodec<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Codec for RecursiveCodec<T> {
    type Value = T;

    fn encode(&self, sink: &mut dyn Sink, value: &T) -> Result<(), Error> {
        self.shared.codec()?.encode(sink, value)
    }

    fn decode(&self, source: &mut dyn Source) -> Result<T, Error> {
        self.shared.codec()?.decode(source)
    }

    fn has_default(&self) -> bool {
        self.shared
            .codec
            .get()
            .is_some_and(|codec| codec.has_default())
    }

    fn encode_default(&self, sink: &mut dyn Sink) -> Result<bool, Error> {
        match self.shared.codec.get() {
            Some(codec) => codec.encode_default(sink),
            None => Ok(false),
        }
    }
}

/// Builds a codec that may contain itself, nesting at most [DEFAULT_MAX_DEPTH] levels.
///
/// `build` receives a handle to the codec it is building; the handle must be wrapped in
/// something that terminates (such as [Nullable](crate::types::nullable::Nullable) or a
/// [List](crate::types::sequence::List)) for values to be finite.
pub fn recursive<T, C, F>(build: F) -> RecursiveCodec<T>
where
    F: FnOnce(Recursive<T>) -> C,
    C: Codec<Value = T> + 'static,
{
    recursive_with_depth(DEFAULT_MAX_DEPTH, build)
}

/// Like [recursive], failing with [Error::RecursionLimit] past `max_depth` levels.
pub fn recursive_with_depth<T, C, F>(max_depth: usize, build: F) -> RecursiveCodec<T>
where
    F: FnOnce(Recursive<T>) -> C,
    C: Codec<Value = T> + 'static,
{
    let shared = Arc::new(Shared {
        codec: OnceLock::new(),
        max_depth,
    });
    let codec = build(Recursive {
        shared: Arc::downgrade(&shared),
    });
    if shared.codec.set(Box::new(codec)).is_err() {
        unreachable!("recursive codec cell is only set once");
    }
    RecursiveCodec { shared }
}
