//! Shared fixtures: a scratch batch layout with synthesized PNGs and a
//! descriptor stream, matching what the schedulers expect on disk.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;

use image::{ImageBuffer, Rgba};
use tempfile::TempDir;

use pixelpipe::prelude::*;

pub type Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A deterministic test image; `seed` makes distinct inputs distinguishable.
pub fn gradient(width: u32, height: u32, seed: u16) -> Buffer {
    Buffer::from_fn(width, height, |x, y| {
        Rgba([
            (x as u16).wrapping_mul(5000).wrapping_add(seed),
            (y as u16).wrapping_mul(7000),
            ((x + y) as u16).wrapping_mul(3000),
            60000,
        ])
    })
}

/// The grayscale the editor is specified to produce for `input`.
pub fn expected_grayscale(input: &Buffer) -> Buffer {
    Buffer::from_fn(input.width(), input.height(), |x, y| {
        let Rgba([r, g, b, a]) = *input.get_pixel(x, y);
        let grey = ((r as u32 + g as u32 + b as u32) / 3) as u16;
        Rgba([grey, grey, grey, a])
    })
}

/// A scratch batch: `<root>/effects.txt`, `<root>/in/batch/`, `<root>/out/`.
pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    /// Build a batch of tasks, one per `(input name, output name, effects)`
    /// entry, with an 8x6 gradient image per input.
    pub fn new(specs: &[(&str, &str, &[&str])]) -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let in_dir = root.path().join("in").join("batch");
        fs::create_dir_all(&in_dir).unwrap();
        fs::create_dir_all(root.path().join("out")).unwrap();

        let mut descriptor = File::create(root.path().join("effects.txt")).unwrap();
        for (i, (in_name, out_name, effects)) in specs.iter().enumerate() {
            gradient(8, 6, i as u16 * 1000)
                .save(in_dir.join(in_name))
                .unwrap();
            let quoted: Vec<String> = effects.iter().map(|e| format!("\"{}\"", e)).collect();
            writeln!(
                descriptor,
                "{{\"inPath\": \"{}\", \"outPath\": \"{}\", \"effects\": [{}]}}",
                in_name,
                out_name,
                quoted.join(", ")
            )
            .unwrap();
        }
        Fixture { root }
    }

    /// An empty batch (no descriptor records, no inputs).
    pub fn empty() -> Fixture {
        Fixture::new(&[])
    }

    pub fn config(&self, strategy: Strategy, threads: usize) -> Configuration {
        Configuration::new(strategy, threads, "batch").with_data_root(self.root.path())
    }

    pub fn input(&self, name: &str) -> Buffer {
        image::open(self.root.path().join("in").join("batch").join(name))
            .unwrap()
            .into_rgba16()
    }

    pub fn output(&self, name: &str) -> Buffer {
        image::open(self.root.path().join("out").join(name))
            .unwrap()
            .into_rgba16()
    }

    /// Names of the files present in the output directory, sorted.
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root.path().join("out"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }
}
