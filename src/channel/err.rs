use std::{error, fmt};

/// An error returned from the [`receive`] method.
///
/// The channel is disconnected and every buffered message has already been
/// delivered: nothing will ever come out of it again.
///
/// [`receive`]: super::InputChannel::receive
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ReceiverError;

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiving on a disconnected, drained channel")
    }
}

impl error::Error for ReceiverError {}

/// An error returned from the [`send`] method.
///
/// Every receiver of the channel is gone, so the message would never be
/// delivered.
///
/// [`send`]: super::OutputChannel::send
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SenderError;

impl fmt::Display for SenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sending on a channel with no receivers")
    }
}

impl error::Error for SenderError {}
