//! Channel-mediated worker pool.
//!
//! A generator decodes the batch and feeds a bounded task queue. Each of the
//! N workers polls the queue and, for every task it obtains, applies all of
//! the task's remaining effects in one pass before pushing it onto a bounded
//! results queue. An aggregator drains the results queue and persists each
//! finished task.
//!
//! Termination is detected without closing the queues: after the last task
//! the generator sends one completion signal to every worker over a dedicated
//! one-shot channel. A worker only honors its signal once the task queue
//! yields nothing more, so the queue is fully drained before any worker
//! leaves; it then reports finished to the aggregator. The aggregator
//! declares the run complete once all N workers have reported finished and
//! the results queue yields nothing more.

use std::thread;

use log::trace;

use crate::channel::{Channel, InputChannel, OutputChannel};
use crate::core::configuration::Configuration;
use crate::core::thread::Thread;
use crate::err::EditorError;
use crate::task::{Task, TaskReader};

/// Capacity of the task and results queues.
const QUEUE_CAPACITY: usize = 1000;

/// Process the configured batch with `config.threads()` workers.
pub fn run_pipeline(config: &Configuration) -> Result<(), EditorError> {
    let threads = config.threads();
    // Open the descriptor stream before anything is spawned: a failure here
    // must not leave workers polling a queue nobody will ever feed.
    let reader = TaskReader::open(config)?;

    let (task_rx, task_tx) = Channel::channel::<Task>(QUEUE_CAPACITY, false);
    let (result_rx, result_tx) = Channel::channel::<Task>(QUEUE_CAPACITY, false);
    let (finished_rx, finished_tx) = Channel::channel::<()>(threads, false);
    let (all_done_rx, all_done_tx) = Channel::channel::<()>(2, true);

    let mut handles = Vec::with_capacity(threads + 2);

    // Launch the workers, each with its own completion signal channel.
    let mut signals = Vec::with_capacity(threads);
    for id in 0..threads {
        let (signal_rx, signal_tx) = Channel::channel::<()>(1, false);
        signals.push(signal_tx);
        let task_rx = task_rx.clone();
        let result_tx = result_tx.clone();
        let finished_tx = finished_tx.clone();
        handles.push(Thread::new(
            id,
            move || worker(task_rx, signal_rx, result_tx, finished_tx),
            config,
        ));
    }

    // Launch the aggregator.
    handles.push(Thread::new(
        threads,
        move || aggregator(result_rx, finished_rx, all_done_tx, threads),
        config,
    ));

    // Launch the generator.
    handles.push(Thread::new(
        threads + 1,
        move || generator(reader, task_tx, signals),
        config,
    ));

    // Wait for the aggregator's overall-completion signal, then reap.
    let _ = all_done_rx.receive();
    for handle in &mut handles {
        handle.join();
    }
    Ok(())
}

/// Generator unit: push every task of the batch onto the task queue, blocking
/// while the queue is full, then signal completion to every worker.
fn generator(mut reader: TaskReader, tasks: OutputChannel<Task>, signals: Vec<OutputChannel<()>>) {
    loop {
        match reader.next_task() {
            Ok(Some(task)) => {
                let err = tasks.send(task);
                if err.is_err() {
                    panic!("Error: {}", err.unwrap_err());
                }
            }
            Ok(None) => break,
            Err(e) => e.abort(),
        }
    }
    for signal in &signals {
        let err = signal.send(());
        if err.is_err() {
            panic!("Error: {}", err.unwrap_err());
        }
    }
}

/// Worker unit.
///
/// Polls the task queue; every task obtained gets all of its remaining
/// effects applied in one pass and goes onto the results queue. The
/// completion signal is only checked when the task queue yields nothing, and
/// only sets a local flag: the worker keeps polling until the queue is
/// observed empty with the flag set, then reports finished and leaves.
fn worker(
    tasks: InputChannel<Task>,
    signal: InputChannel<()>,
    results: OutputChannel<Task>,
    finished: OutputChannel<()>,
) {
    let mut done = false;
    loop {
        match tasks.receive() {
            Ok(Some(mut task)) => {
                if let Err(e) = task.apply_all() {
                    e.abort();
                }
                let err = results.send(task);
                if err.is_err() {
                    panic!("Error: {}", err.unwrap_err());
                }
            }
            Ok(None) | Err(_) => match signal.receive() {
                Ok(Some(())) => done = true,
                _ => {
                    if done {
                        let err = finished.send(());
                        if err.is_err() {
                            panic!("Error: {}", err.unwrap_err());
                        }
                        return;
                    }
                    thread::yield_now();
                }
            },
        }
    }
}

/// Aggregator unit: persist every finished task; once all workers reported
/// finished and the results queue yields nothing more, declare the run
/// complete.
fn aggregator(
    results: InputChannel<Task>,
    finished: InputChannel<()>,
    all_done: OutputChannel<()>,
    threads: usize,
) {
    let mut workers_done = 0;
    let mut done = false;
    loop {
        match results.receive() {
            Ok(Some(task)) => {
                if let Err(e) = task.save() {
                    e.abort();
                }
                trace!("saved {:?}", task.dest());
            }
            Ok(None) | Err(_) => match finished.receive() {
                Ok(Some(())) => {
                    workers_done += 1;
                    if workers_done == threads {
                        done = true;
                    }
                }
                _ => {
                    if done {
                        let err = all_done.send(());
                        if err.is_err() {
                            panic!("Error: {}", err.unwrap_err());
                        }
                        return;
                    }
                    thread::yield_now();
                }
            },
        }
    }
}
