//! Rendezvous barrier used between BSP supersteps.
//!
//! A [`Barrier`] releases all waiting callers at once, and only once the
//! fixed quorum of `capacity` callers has arrived. Each instance guards a
//! single superstep boundary: it is armed once and not recycled. The last
//! arriver can run a closure inside the barrier's critical section, before
//! any waiter is released; the BSP scheduler uses this to advance the shared
//! superstep label exactly once per boundary.

use std::sync::{Condvar, Mutex};

pub struct Barrier {
    capacity: usize,
    arrived: Mutex<usize>,
    cvar: Condvar,
}

impl Barrier {
    /// Create a barrier releasing after `capacity` arrivals.
    pub fn new(capacity: usize) -> Barrier {
        Barrier {
            capacity,
            arrived: Mutex::new(0),
            cvar: Condvar::new(),
        }
    }

    /// Block until `capacity` callers have arrived.
    pub fn arrive(&self) {
        self.arrive_with(|| {});
    }

    /// Block until `capacity` callers have arrived.
    ///
    /// The capacity-th arriver runs `on_full` while still holding the barrier
    /// lock, then wakes every waiter. Writes made inside `on_full` are
    /// therefore visible to all released callers.
    pub fn arrive_with<F: FnOnce()>(&self, on_full: F) {
        let mut arrived = self.arrived.lock().unwrap();
        *arrived += 1;
        if *arrived == self.capacity {
            on_full();
            self.cvar.notify_all();
        } else {
            while *arrived < self.capacity {
                arrived = self.cvar.wait(arrived).unwrap();
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, RecvTimeoutError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_full_barrier_releases_everyone() {
        let barrier = Arc::new(Barrier::new(4));
        let (tx, rx) = unbounded();
        for _ in 0..4 {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            thread::spawn(move || {
                barrier.arrive();
                tx.send(()).unwrap();
            });
        }
        for _ in 0..4 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
    }

    #[test]
    fn test_partial_barrier_blocks() {
        let barrier = Arc::new(Barrier::new(3));
        let (tx, rx) = unbounded();
        // Only two of three arrivers: nobody may get through.
        for _ in 0..2 {
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            thread::spawn(move || {
                barrier.arrive();
                tx.send(()).unwrap();
            });
        }
        assert_eq!(
            rx.recv_timeout(Duration::from_millis(200)),
            Err(RecvTimeoutError::Timeout)
        );
        // Let the blocked threads out so they don't outlive the test runner.
        barrier.arrive();
        for _ in 0..2 {
            rx.recv_timeout(Duration::from_secs(5)).unwrap();
        }
    }

    #[test]
    fn test_last_arriver_runs_closure_before_release() {
        let barrier = Arc::new(Barrier::new(3));
        let ran = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = unbounded();
        for _ in 0..3 {
            let barrier = Arc::clone(&barrier);
            let ran = Arc::clone(&ran);
            let tx = tx.clone();
            thread::spawn(move || {
                let ran_in_closure = Arc::clone(&ran);
                barrier.arrive_with(move || {
                    ran_in_closure.fetch_add(1, Ordering::Release);
                });
                // Every released caller must observe the closure's effect.
                tx.send(ran.load(Ordering::Acquire)).unwrap();
            });
        }
        for _ in 0..3 {
            assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
        }
    }

    #[test]
    fn test_capacity_one_never_blocks() {
        let barrier = Barrier::new(1);
        barrier.arrive();
        assert_eq!(barrier.capacity(), 1);
    }
}
