//! Tasks and the descriptor stream feeding them.
//!
//! A batch is described by a stream of JSON records, one per image, read
//! incrementally by [`TaskReader`]. Each record becomes a [`Task`]: the loaded
//! image, the ordered list of effects still to apply, and the destination of
//! the result. A task is only ever mutated by the single worker holding it,
//! and is persisted exactly once, when its effect list is empty.

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::de::IoRead;
use serde_json::StreamDeserializer;

use crate::core::configuration::Configuration;
use crate::err::EditorError;
use crate::image::{effects, Image};

/// One record of the descriptor stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub in_path: String,
    pub out_path: String,
    pub effects: Vec<String>,
}

/// Outcome of applying one pending effect to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Effects remain; the freshly written pixels became the new read side.
    Pending,
    /// The effect list is exhausted; the task is ready to persist.
    Done,
}

/// A unit of work: an image, the effects not yet applied to it, in order, and
/// the path its final pixels go to.
pub struct Task {
    dest: PathBuf,
    effects: VecDeque<String>,
    image: Image,
}

impl Task {
    /// Bind a decoded record and its loaded image to a destination under
    /// `out_dir`.
    pub fn build(raw: RawTask, image: Image, out_dir: &Path) -> Task {
        Task {
            dest: out_dir.join(raw.out_path),
            effects: raw.effects.into(),
            image,
        }
    }

    /// Apply exactly the first remaining effect.
    ///
    /// With an empty effect list this is the no-op pass: the untouched pixels
    /// move to the write side and the task is [`Step::Done`]. After the last
    /// listed effect the written pixels stay where persistence expects them;
    /// in every other case they are promoted to the read side for the next
    /// call.
    pub fn step(&mut self) -> Result<Step, EditorError> {
        match self.effects.pop_front() {
            None => {
                self.image.pass_through();
                Ok(Step::Done)
            }
            Some(effect) => {
                effects::apply(&mut self.image, &effect)?;
                if self.effects.is_empty() {
                    Ok(Step::Done)
                } else {
                    self.image.promote();
                    Ok(Step::Pending)
                }
            }
        }
    }

    /// Apply every remaining effect, in order, in one pass.
    pub fn apply_all(&mut self) -> Result<(), EditorError> {
        while self.step()? == Step::Pending {}
        Ok(())
    }

    /// Persist the task's written pixels to its destination.
    pub fn save(&self) -> Result<(), EditorError> {
        self.image.save(&self.dest)
    }

    /// Number of effects not yet applied.
    pub fn remaining(&self) -> usize {
        self.effects.len()
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

/// The task descriptor source.
///
/// Wraps the incremental JSON decoder over the descriptor file and loads each
/// record's image as it is decoded. Malformed records and unreadable images
/// are fatal.
pub struct TaskReader {
    stream: StreamDeserializer<'static, IoRead<BufReader<File>>, RawTask>,
    in_dir: PathBuf,
    out_dir: PathBuf,
}

impl TaskReader {
    /// Open the descriptor file of the configured batch.
    pub fn open(config: &Configuration) -> Result<TaskReader, EditorError> {
        let path = config.descriptor_path();
        let file = File::open(&path)
            .map_err(|e| EditorError::Descriptor(format!("{}: {}", path.display(), e)))?;
        Ok(TaskReader {
            stream: serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter(),
            in_dir: config.input_dir(),
            out_dir: config.output_dir(),
        })
    }

    /// Decode the next record and load its image. `Ok(None)` once the stream
    /// is exhausted.
    pub fn next_task(&mut self) -> Result<Option<Task>, EditorError> {
        match self.stream.next() {
            None => Ok(None),
            Some(Err(e)) => Err(EditorError::Descriptor(e.to_string())),
            Some(Ok(raw)) => {
                let image = Image::load(&self.in_dir.join(&raw.in_path))?;
                Ok(Some(Task::build(raw, image, &self.out_dir)))
            }
        }
    }
}
