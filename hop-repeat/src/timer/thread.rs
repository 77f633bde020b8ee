//! Real-time timer service backed by a dedicated thread
//!
//! The worker sleeps on a condvar until the earliest deadline, then sends the
//! expiry into the owner's event channel. The worker never touches accumulator
//! state, so presses and expiries stay serialized on the owner's loop.

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use parking_lot::{Condvar, Mutex};

use super::{Expiry, Scheduled, TimerHandle, TimerService};
use crate::direction::Direction;

struct TimerQueue {
    entries: BTreeSet<Scheduled>,
    shutdown: bool,
}

struct Shared {
    queue: Mutex<TimerQueue>,
    wake: Condvar,
}

/// Wall-clock timer service delivering expiries over a channel
pub struct ThreadTimers {
    shared: Arc<Shared>,
    next_id: u64,
    worker: Option<JoinHandle<()>>,
}

impl ThreadTimers {
    /// Spawn the timer thread. Expiries are converted into `E` and sent on
    /// `sink`, so they can share a channel with other events.
    ///
    /// Expiries are sent with the queue lock held, so `sink` should be
    /// unbounded; a full bounded sink stalls `schedule` and `cancel`.
    pub fn spawn<E>(sink: Sender<E>) -> io::Result<Self>
    where
        E: From<Expiry> + Send + 'static,
    {
        let shared = Arc::new(Shared {
            queue: Mutex::new(TimerQueue {
                entries: BTreeSet::new(),
                shutdown: false,
            }),
            wake: Condvar::new(),
        });

        let worker_shared = shared.clone();
        let worker = thread::Builder::new()
            .name("hop-timers".into())
            .spawn(move || run_timer_thread(worker_shared, sink))?;

        Ok(Self {
            shared,
            next_id: 0,
            worker: Some(worker),
        })
    }

    /// Number of armed timers
    pub fn pending(&self) -> usize {
        self.shared.queue.lock().entries.len()
    }
}

impl TimerService for ThreadTimers {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn schedule(&mut self, after: Duration, direction: Direction) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id);
        self.next_id += 1;

        let mut queue = self.shared.queue.lock();
        queue.entries.insert(Scheduled {
            deadline: Instant::now() + after,
            handle,
            direction,
        });
        // Worker may be sleeping toward a later deadline
        self.shared.wake.notify_one();
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.shared
            .queue
            .lock()
            .entries
            .retain(|s| s.handle != handle);
    }
}

impl Drop for ThreadTimers {
    fn drop(&mut self) {
        self.shared.queue.lock().shutdown = true;
        self.shared.wake.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_timer_thread<E>(shared: Arc<Shared>, sink: Sender<E>)
where
    E: From<Expiry>,
{
    let mut queue = shared.queue.lock();

    loop {
        if queue.shutdown {
            break;
        }

        match queue.entries.first().copied() {
            Some(next) if next.deadline <= Instant::now() => {
                queue.entries.pop_first();
                // Send under the lock so a cancel can't slip in between
                if sink.send(E::from(next.expiry())).is_err() {
                    tracing::debug!("timer sink disconnected, stopping timer thread");
                    break;
                }
            }
            Some(next) => {
                shared.wake.wait_until(&mut queue, next.deadline);
            }
            None => {
                shared.wake.wait(&mut queue);
            }
        }
    }
}
