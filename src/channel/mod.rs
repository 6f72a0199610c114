//! Bounded multi-producer, multi-consumer channels.
//!
//! This module contains the channel plumbing of the pipeline scheduler.
//!
//! The structs are:
//! - [`InputChannel<T>`]: the receiver side of a channel.
//! - [`OutputChannel<T>`]: the sender side of a channel.
//!
//! Channels are bounded: a sender blocks while the channel is full. The
//! receiving mode is chosen at creation: a polling receiver returns
//! `Ok(None)` when the channel is currently empty, a blocking receiver parks
//! until a message arrives. In both modes a receive fails only once the
//! channel is disconnected *and* drained, so a consumer that loops until the
//! error has seen every message ever sent.

/// Channel errors.
pub mod err;

use crossbeam_channel::TryRecvError;

use err::{ReceiverError, SenderError};

/// The receiver side of a channel.
///
/// Cloneable: the pipeline's task queue is drained by every worker at once.
pub struct InputChannel<T> {
    rx: crossbeam_channel::Receiver<T>,
    blocking: bool,
}

impl<T: Send> InputChannel<T> {
    /// Receive a message from the channel.
    ///
    /// In polling mode, `Ok(None)` means the channel is currently empty. An
    /// error means the channel is disconnected and nothing is left in it.
    pub fn receive(&self) -> Result<Option<T>, ReceiverError> {
        if self.blocking {
            match self.rx.recv() {
                Ok(msg) => Ok(Some(msg)),
                Err(_) => Err(ReceiverError),
            }
        } else {
            match self.rx.try_recv() {
                Ok(msg) => Ok(Some(msg)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(ReceiverError),
            }
        }
    }

    /// Check if the channel is in blocking mode.
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Check if the channel is empty.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> Clone for InputChannel<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            blocking: self.blocking,
        }
    }
}

/// The sender side of a channel.
pub struct OutputChannel<T> {
    tx: crossbeam_channel::Sender<T>,
}

impl<T: Send> OutputChannel<T> {
    /// Send a message to the channel, blocking while the channel is full.
    pub fn send(&self, msg: T) -> Result<(), SenderError> {
        self.tx.send(msg).map_err(|_| SenderError)
    }
}

impl<T> Clone for OutputChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Channel factory.
pub struct Channel;

impl Channel {
    /// Create a new bounded channel holding at most `capacity` messages.
    pub fn channel<T: Send + 'static>(
        capacity: usize,
        blocking: bool,
    ) -> (InputChannel<T>, OutputChannel<T>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (InputChannel { rx, blocking }, OutputChannel { tx })
    }
}
