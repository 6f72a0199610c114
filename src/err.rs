//! Editor errors.
//!
//! Every failure in the editor is fatal to the whole run: there is no task-level
//! retry and no partial-batch continuation. The single-threaded paths propagate
//! [`EditorError`] with `?`; worker threads, which have nowhere to propagate to,
//! terminate the process through [`EditorError::abort`].

use std::{error, fmt, process};

use log::error;

/// An error raised while processing a batch.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EditorError {
    /// A task descriptor record could not be decoded.
    Descriptor(String),
    /// An input image could not be loaded.
    Load(String),
    /// An effect identifier was not recognized.
    UnknownEffect(String),
    /// An output image could not be written.
    Save(String),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Descriptor(msg) => write!(f, "Can't decode task descriptor: {}", msg),
            EditorError::Load(msg) => write!(f, "Can't load image: {}", msg),
            EditorError::UnknownEffect(id) => write!(f, "Invalid effect: {}", id),
            EditorError::Save(msg) => write!(f, "Can't save image: {}", msg),
        }
    }
}

impl error::Error for EditorError {}

impl EditorError {
    /// Terminate the whole run.
    ///
    /// Called from worker threads, where returning the error would leave the
    /// other workers blocked on channels or barriers that will never fill.
    pub fn abort(self) -> ! {
        error!("{}", self);
        process::exit(1);
    }
}
