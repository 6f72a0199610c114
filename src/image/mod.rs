//! PNG image state.
//!
//! An [`Image`] holds two 16-bit RGBA pixel buffers: `current`, the pixels an
//! effect reads, and `next`, the pixels it writes. Between two effects the
//! buffers are rotated with [`Image::promote`]; a task whose effect list is
//! empty collapses them with [`Image::pass_through`] before being persisted.
//! Persistence always encodes the `next` buffer.

/// Effects that can be applied to an [`Image`].
pub mod effects;

use std::mem;
use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::err::EditorError;

pub(crate) type Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A 16-bit RGBA image with separate read and write buffers.
pub struct Image {
    current: Buffer,
    next: Buffer,
}

impl Image {
    /// Decode the PNG at `path` into the read buffer, paired with a blank
    /// write buffer of the same dimensions.
    pub fn load(path: &Path) -> Result<Image, EditorError> {
        let decoded = image::open(path)
            .map_err(|e| EditorError::Load(format!("{}: {}", path.display(), e)))?;
        let current = decoded.into_rgba16();
        let (width, height) = current.dimensions();
        Ok(Image {
            current,
            next: Buffer::new(width, height),
        })
    }

    /// Encode the write buffer as a PNG at `path`.
    pub fn save(&self, path: &Path) -> Result<(), EditorError> {
        self.next
            .save(path)
            .map_err(|e| EditorError::Save(format!("{}: {}", path.display(), e)))
    }

    /// Promote the freshly written pixels to the read side and hand the next
    /// effect a blank write buffer.
    pub fn promote(&mut self) {
        let (width, height) = self.next.dimensions();
        self.current = mem::replace(&mut self.next, Buffer::new(width, height));
    }

    /// Move the untouched read buffer to the write side.
    ///
    /// Used when a task has no effect left to apply: the pixels that would be
    /// read are exactly the pixels that must be persisted. The read side is
    /// never consulted again afterwards.
    pub fn pass_through(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
    }

    #[cfg(test)]
    pub(crate) fn from_buffer(current: Buffer) -> Image {
        let (width, height) = current.dimensions();
        Image {
            current,
            next: Buffer::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }
}
