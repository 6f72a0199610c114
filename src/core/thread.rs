use std::thread;

use log::{error, trace};

use super::configuration::Configuration;

/// A worker thread, optionally pinned to a core.
pub struct Thread {
    thread: Option<thread::JoinHandle<()>>,
}

impl Thread {
    /// Spawn a thread running `f`.
    ///
    /// When pinning is enabled in the configuration, the thread is pinned to
    /// the core the configured mapping assigns to `id`.
    pub fn new<F>(id: usize, f: F, config: &Configuration) -> Thread
    where
        F: FnOnce() + Send + 'static,
    {
        let pinning = config.pinning();
        let pinning_position = config.thread_mapping().get(id).copied();

        Thread {
            thread: Some(thread::spawn(move || {
                if pinning {
                    pin_current(pinning_position);
                }
                trace!("{:?} started", thread::current().id());
                f();
                trace!("{:?} now will end.", thread::current().id());
            })),
        }
    }

    /// Join the thread.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            thread.join().unwrap();
        }
    }
}

/// Pin the current thread on the core found at `position` in the machine's
/// core list.
fn pin_current(position: Option<usize>) {
    let position = match position {
        Some(position) => position,
        None => {
            error!("No core mapped for this thread, pinning skipped.");
            return;
        }
    };
    let mut core_ids = core_affinity::get_core_ids().unwrap();
    if core_ids.get(position).is_none() {
        panic!("Cannot pin the thread in the choosen position.");
    }
    let core = core_ids.remove(position);
    if !core_affinity::set_for_current(core) {
        error!("Thread pinning on core {} failed!", core.id);
    } else {
        trace!("Thread pinned on core {}.", core.id);
    }
}
