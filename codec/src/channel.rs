//! Sequential byte sources and sinks.
//!
//! Codecs never seek: a [Source] is read front to back exactly once and a [Sink] is
//! append-only. The traits are object safe so that codecs can be invoked through
//! `&mut dyn Source` / `&mut dyn Sink` regardless of what backs the channel.
//!
//! A few collaborators are provided:
//! - [BufSource] / [BufSink] adapt any [bytes::Buf] / [bytes::BufMut] (memory buffers,
//!   growable or fixed capacity).
//! - [IoSource] / [IoSink] adapt blocking [std::io] streams.
//! - [CountingSink] discards bytes and only records how many were written.

use crate::Error;
use bytes::{Buf, BufMut};
use std::io::{self, BufRead, BufReader};

/// A finite, forward-only source of bytes.
pub trait Source {
    /// Returns the next byte.
    ///
    /// Fails with [Error::EndOfInput] once exhausted and [Error::ChannelClosed] after [Source::close].
    fn next(&mut self) -> Result<u8, Error>;

    /// Number of bytes that can be read without blocking.
    ///
    /// Exact for memory sources, a lower bound for streaming sources.
    fn available(&self) -> usize;

    /// Closes the source. Closing more than once has no further effect.
    fn close(&mut self) -> Result<(), Error>;

    /// Skips up to `n` bytes, returning the number actually skipped.
    fn skip(&mut self, n: usize) -> Result<usize, Error> {
        let mut skipped = 0;
        while skipped < n {
            match self.next() {
                Ok(_) => skipped += 1,
                Err(Error::EndOfInput) => break,
                Err(err) => return Err(err),
            }
        }
        Ok(skipped)
    }

    /// Fills `dst` completely or fails.
    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        for byte in dst.iter_mut() {
            *byte = self.next()?;
        }
        Ok(())
    }
}

/// An append-only sink of bytes.
pub trait Sink {
    /// Appends a byte. Fails with [Error::ChannelClosed] after [Sink::close].
    fn write(&mut self, byte: u8) -> Result<(), Error>;

    /// Closes the sink. Closing more than once has no further effect.
    fn close(&mut self) -> Result<(), Error>;

    /// Appends every byte of `src` in order.
    fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
        for byte in src {
            self.write(*byte)?;
        }
        Ok(())
    }
}

/// A [Source] over an in-memory [Buf].
#[derive(Debug)]
pub struct BufSource<B: Buf> {
    buf: B,
    closed: bool,
}

impl<B: Buf> BufSource<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, closed: false }
    }

    /// Returns the unread remainder of the buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: Buf> Source for BufSource<B> {
    #[inline]
    fn next(&mut self) -> Result<u8, Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        if !self.buf.has_remaining() {
            return Err(Error::EndOfInput);
        }
        Ok(self.buf.get_u8())
    }

    fn available(&self) -> usize {
        if self.closed {
            return 0;
        }
        self.buf.remaining()
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<usize, Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        let n = n.min(self.buf.remaining());
        self.buf.advance(n);
        Ok(n)
    }

    fn read_exact(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        if self.buf.remaining() < dst.len() {
            return Err(Error::EndOfInput);
        }
        self.buf.copy_to_slice(dst);
        Ok(())
    }
}

/// A [Sink] over a [BufMut].
///
/// Growable buffers (`BytesMut`, `Vec<u8>`) never fill up. Fixed buffers (`&mut [u8]`)
/// fail with [Error::SinkFull] once their capacity is used.
#[derive(Debug)]
pub struct BufSink<B: BufMut> {
    buf: B,
    closed: bool,
}

impl<B: BufMut> BufSink<B> {
    pub fn new(buf: B) -> Self {
        Self { buf, closed: false }
    }

    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: BufMut> Sink for BufSink<B> {
    #[inline]
    fn write(&mut self, byte: u8) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        if !self.buf.has_remaining_mut() {
            return Err(Error::SinkFull);
        }
        self.buf.put_u8(byte);
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }

    fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        if self.buf.remaining_mut() < src.len() {
            return Err(Error::SinkFull);
        }
        self.buf.put_slice(src);
        Ok(())
    }
}

/// A [Source] over a blocking reader.
///
/// [Source::available] reports only what is already buffered.
#[derive(Debug)]
pub struct IoSource<R: io::Read> {
    reader: BufReader<R>,
    closed: bool,
}

impl<R: io::Read> IoSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            closed: false,
        }
    }
}

impl<R: io::Read> Source for IoSource<R> {
    fn next(&mut self) -> Result<u8, Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        let buffered = self.reader.fill_buf()?;
        let Some(&byte) = buffered.first() else {
            return Err(Error::EndOfInput);
        };
        self.reader.consume(1);
        Ok(byte)
    }

    fn available(&self) -> usize {
        if self.closed {
            return 0;
        }
        self.reader.buffer().len()
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }
}

/// A [Sink] over a blocking writer. Closing flushes the writer once.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    writer: W,
    closed: bool,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            closed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write(&mut self, byte: u8) -> Result<(), Error> {
        self.write_all(&[byte])
    }

    fn close(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.writer.flush()?;
        Ok(())
    }

    fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        self.writer.write_all(src)?;
        Ok(())
    }
}

/// A [Sink] that only counts the bytes written to it.
#[derive(Debug, Default)]
pub struct CountingSink {
    count: usize,
    closed: bool,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Sink for CountingSink {
    fn write(&mut self, _: u8) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        self.count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.closed = true;
        Ok(())
    }

    fn write_all(&mut self, src: &[u8]) -> Result<(), Error> {
        if self.closed {
            return Err(Error::ChannelClosed);
        }
        self.count += src.len();
        Ok(())
    }
}
