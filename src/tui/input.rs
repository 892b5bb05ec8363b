//! Raw key input decoding on a background thread.
//!
//! The decoder thread owns every blocking read. It hands each decoded chunk
//! to the session loop over a single-slot channel and then waits on a
//! rendezvous acknowledgment before reading again, so it never reads ahead of
//! a session that is about to end.

use std::{
    io::{self, Read},
    sync::mpsc::{Receiver, SyncSender, sync_channel},
    thread::{self, JoinHandle},
};

use derive_more::Display;
use log::debug;

const READ_BUFFER_SIZE: usize = 128;

/// One classified chunk of raw terminal input.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    MoveUp,
    MoveDown,
    Confirm,
    Interrupt,
    Unrecognized,
}

impl KeyEvent {
    /// Classifies a raw input chunk by exact byte match.
    #[must_use]
    pub fn decode(chunk: &[u8]) -> Self {
        match chunk {
            b"\x1b[A" => Self::MoveUp,
            b"\x1b[B" => Self::MoveDown,
            b"\r" => Self::Confirm,
            b"\x03" => Self::Interrupt,
            _ => Self::Unrecognized,
        }
    }

    /// An unrecognized key is a cue that the user needs guidance.
    #[must_use]
    pub fn shows_help(self) -> bool {
        self == Self::Unrecognized
    }
}

/// Tells the decoder thread whether to read again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ack {
    Continue,
    Stop,
}

/// Handle on the background decoding thread.
pub(crate) struct InputDecoder {
    events: Receiver<io::Result<KeyEvent>>,
    acks: SyncSender<Ack>,
    handle: Option<JoinHandle<()>>,
}

impl InputDecoder {
    /// Starts decoding `input` on a dedicated thread.
    pub(crate) fn spawn<R>(input: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (event_tx, events) = sync_channel(1);
        let (acks, ack_rx) = sync_channel(0);

        let handle = thread::Builder::new()
            .name("dilemma-input".into())
            .spawn(move || decode_loop(input, &event_tx, &ack_rx))?;

        Ok(Self {
            events,
            acks,
            handle: Some(handle),
        })
    }

    /// Blocks until the next key event or a read failure.
    pub(crate) fn next(&self) -> io::Result<KeyEvent> {
        self.events.recv().unwrap_or_else(|_| Err(decoder_stopped()))
    }

    /// Lets the decoder perform its next read.
    pub(crate) fn resume(&self) -> io::Result<()> {
        self.acks
            .send(Ack::Continue)
            .map_err(|_| decoder_stopped())
    }

    /// Stops the decoder and waits for its thread to finish.
    ///
    /// Must only be called while the decoder is not blocked on a read, that
    /// is after [`next`](Self::next) returned and before any further
    /// [`resume`](Self::resume).
    pub(crate) fn shutdown(mut self) {
        // The decoder may already be gone after a read failure.
        let _ = self.acks.send(Ack::Stop);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            debug!("input decoder thread panicked");
        }
    }
}

fn decoder_stopped() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "input decoder stopped")
}

fn decode_loop<R: Read>(
    mut input: R,
    events: &SyncSender<io::Result<KeyEvent>>,
    acks: &Receiver<Ack>,
) {
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let event = match input.read(&mut buf) {
            Ok(0) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            )),
            Ok(n) => Ok(KeyEvent::decode(buf.get(..n).unwrap_or_default())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => Err(e),
        };

        let failed = event.is_err();
        if events.send(event).is_err() || failed {
            break;
        }

        match acks.recv() {
            Ok(Ack::Continue) => {}
            Ok(Ack::Stop) | Err(_) => break,
        }
    }

    debug!("input decoder stopped");
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;

    /// Returns one scripted chunk per read, then fails.
    struct Chunks {
        chunks: VecDeque<&'static [u8]>,
        reads: Arc<AtomicUsize>,
    }

    impl Chunks {
        fn new(chunks: &[&'static [u8]]) -> (Self, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            let input = Self {
                chunks: chunks.iter().copied().collect(),
                reads: Arc::clone(&reads),
            };
            (input, reads)
        }
    }

    impl Read for Chunks {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(chunk);
                    Ok(chunk.len())
                }
                None => Err(io::Error::other("script exhausted")),
            }
        }
    }

    #[test]
    fn test_decode_known_sequences() {
        assert_eq!(KeyEvent::decode(b"\x1b[A"), KeyEvent::MoveUp);
        assert_eq!(KeyEvent::decode(b"\x1b[B"), KeyEvent::MoveDown);
        assert_eq!(KeyEvent::decode(b"\x0d"), KeyEvent::Confirm);
        assert_eq!(KeyEvent::decode(b"\x03"), KeyEvent::Interrupt);
    }

    #[test]
    fn test_decode_requires_exact_match() {
        assert_eq!(KeyEvent::decode(b"\x1b[C"), KeyEvent::Unrecognized);
        assert_eq!(KeyEvent::decode(b"\x1b[A\x1b[A"), KeyEvent::Unrecognized);
        assert_eq!(KeyEvent::decode(b"\r\n"), KeyEvent::Unrecognized);
        assert_eq!(KeyEvent::decode(b"q"), KeyEvent::Unrecognized);
        assert_eq!(KeyEvent::decode(b""), KeyEvent::Unrecognized);
    }

    #[test]
    fn test_only_unrecognized_shows_help() {
        assert!(KeyEvent::Unrecognized.shows_help());
        assert!(!KeyEvent::MoveUp.shows_help());
        assert!(!KeyEvent::MoveDown.shows_help());
        assert!(!KeyEvent::Confirm.shows_help());
        assert!(!KeyEvent::Interrupt.shows_help());
    }

    #[test]
    fn test_decoder_waits_for_ack_before_reading_again() {
        let (input, reads) = Chunks::new(&[b"\x1b[B", b"\r"]);
        let decoder = InputDecoder::spawn(input).unwrap();

        assert_eq!(decoder.next().unwrap(), KeyEvent::MoveDown);
        assert_eq!(reads.load(Ordering::SeqCst), 1);

        decoder.resume().unwrap();
        assert_eq!(decoder.next().unwrap(), KeyEvent::Confirm);
        decoder.shutdown();

        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_decoder_surfaces_read_failure() {
        let (input, _) = Chunks::new(&[]);
        let decoder = InputDecoder::spawn(input).unwrap();

        let err = decoder.next().unwrap_err();
        assert_eq!(err.to_string(), "script exhausted");
        assert!(decoder.resume().is_err());
        decoder.shutdown();
    }

    #[test]
    fn test_decoder_reports_end_of_stream() {
        let decoder = InputDecoder::spawn(io::empty()).unwrap();

        let err = decoder.next().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        decoder.shutdown();
    }
}
