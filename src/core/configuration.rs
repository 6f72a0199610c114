use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Execution strategy for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Pipeline,
    Bsp,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Strategy, String> {
        match s {
            "sequential" => Ok(Strategy::Sequential),
            "pipeline" => Ok(Strategy::Pipeline),
            "bsp" => Ok(Strategy::Bsp),
            other => Err(format!("invalid strategy: {}", other)),
        }
    }
}

/// Global configuration.
pub struct Configuration {
    strategy: Strategy,
    threads: usize,
    data_dir: String,
    data_root: PathBuf,
    pinning: bool,
    thread_mapping: Vec<usize>,
}

/// Parse the core mapping from the environment variable
/// PIXELPIPE_THREAD_MAPPING.
fn parse_core_mapping() -> Vec<usize> {
    match env::var("PIXELPIPE_THREAD_MAPPING") {
        Ok(val) => val
            .split(',')
            .map(|core| core.parse::<usize>().unwrap())
            .collect(),
        Err(_) => (0..num_cpus::get()).collect(),
    }
}

impl Configuration {
    /// Create a configuration with an explicit worker count.
    ///
    /// The data root, thread pinning and core mapping are taken from the
    /// PIXELPIPE_DATA_ROOT, PIXELPIPE_PINNING and PIXELPIPE_THREAD_MAPPING
    /// environment variables.
    pub fn new(strategy: Strategy, threads: usize, data_dir: &str) -> Configuration {
        if threads == 0 {
            panic!("Invalid thread count");
        }
        let data_root = match env::var("PIXELPIPE_DATA_ROOT") {
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from("data"),
        };
        let pinning = match env::var("PIXELPIPE_PINNING") {
            Ok(val) => val.parse::<bool>().unwrap(),
            Err(_) => false,
        };
        let thread_mapping = parse_core_mapping();

        Configuration {
            strategy,
            threads,
            data_dir: data_dir.to_string(),
            data_root,
            pinning,
            thread_mapping,
        }
    }

    /// Create a configuration with the worker count taken from
    /// PIXELPIPE_THREADS, defaulting to the number of logical cores.
    pub fn new_default(strategy: Strategy, data_dir: &str) -> Configuration {
        let threads = match env::var("PIXELPIPE_THREADS") {
            Ok(val) => val.parse::<usize>().unwrap(),
            Err(_) => num_cpus::get(),
        };
        Configuration::new(strategy, threads, data_dir)
    }

    /// Override the data root.
    pub fn with_data_root(mut self, data_root: impl Into<PathBuf>) -> Configuration {
        self.data_root = data_root.into();
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Worker count used by the parallel strategies.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Get the pinning flag.
    pub(crate) fn pinning(&self) -> bool {
        self.pinning
    }

    /// Get the thread mapping.
    pub(crate) fn thread_mapping(&self) -> &Vec<usize> {
        &self.thread_mapping
    }

    /// Path of the batch descriptor file.
    pub fn descriptor_path(&self) -> PathBuf {
        self.data_root.join("effects.txt")
    }

    /// Directory the input images are read from.
    pub fn input_dir(&self) -> PathBuf {
        self.data_root.join("in").join(&self.data_dir)
    }

    /// Directory the output images are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.data_root.join("out")
    }
}
