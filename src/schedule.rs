//! Single-threaded cooperative timer scheduler driven by a virtual clock.
//!
//! Callbacks run on the thread that advances the clock, in due-time order and,
//! for equal due times, in registration order. A [`TimerHandle`] cancels its
//! timer when dropped, so a component that owns its handle can never be called
//! back after teardown.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

type Callback = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct TimerId(u64);

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), Callback>,
}

#[derive(Clone, Default)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Scheduler")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Run `callback` once, `delay` after the current time.
    pub fn schedule_once(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.insert((due, id), Box::new(callback));
        tracing::trace!(?id, ?due, "timer scheduled");

        TimerHandle {
            id,
            due,
            state: Some(Rc::downgrade(&self.state)),
        }
    }

    pub fn advance_by(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    /// Move the clock forward to `target`, firing every timer due on the way.
    /// Moving backwards is a no-op. Returns the number of callbacks run.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            // The borrow must be released before the callback runs: callbacks
            // are allowed to schedule or cancel timers.
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state.pending.first_key_value().map(|(&(due, _), _)| due);
                match due {
                    Some(due) if due <= target => {
                        state.now = state.now.max(due);
                        state.pending.pop_first()
                    }
                    _ => None,
                }
            };
            let Some(((due, id), callback)) = next else {
                break;
            };
            tracing::trace!(?id, ?due, "timer fired");
            callback();
            fired += 1;
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
        fired
    }
}

/// Owner of a pending one-shot timer. Dropping the handle cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer"]
#[derive(Debug)]
pub struct TimerHandle {
    id: TimerId,
    due: Duration,
    state: Option<Weak<RefCell<SchedulerState>>>,
}

impl TimerHandle {
    pub fn is_pending(&self) -> bool {
        self.state
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|s| s.borrow().pending.contains_key(&(self.due, self.id)))
    }

    /// Cancel the timer. Returns `true` if it was still pending; cancelling a
    /// timer that already fired (or was already cancelled) does nothing.
    pub fn cancel(&self) -> bool {
        let Some(state) = self.state.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        let removed = state
            .borrow_mut()
            .pending
            .remove(&(self.due, self.id))
            .is_some();
        if removed {
            tracing::trace!(id = ?self.id, "timer cancelled");
        }
        removed
    }

    /// Detach the handle, letting the timer fire even after the handle is gone.
    pub fn forget(mut self) {
        self.state = None;
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
