//! Single-threaded baseline.

use log::trace;

use crate::core::configuration::Configuration;
use crate::err::EditorError;
use crate::task::TaskReader;

/// Process the whole batch on the calling thread: load each task in file
/// order, apply every listed effect, persist, move on. The first failure ends
/// the run.
pub fn run_sequential(config: &Configuration) -> Result<(), EditorError> {
    let mut reader = TaskReader::open(config)?;
    while let Some(mut task) = reader.next_task()? {
        task.apply_all()?;
        task.save()?;
        trace!("saved {:?}", task.dest());
    }
    Ok(())
}
