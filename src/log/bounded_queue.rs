//! Fixed-capacity blocking FIFO shared by many producers and one consumer.
//!
//! The queue state (items and the `closed` flag) lives under a single mutex,
//! and both condition variables wait on that mutex, so the closed check is
//! atomic with respect to every wait.
//!
//! Closing is destructive: pending items are discarded. A consumer that must
//! see every item drains first (see [`BoundedQueue::flush`]) and closes after.

use std::{
    collections::VecDeque,
    fmt,
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
};

/// Returned by [`BoundedQueue::push`] when the queue has been closed.
///
/// The rejected item is handed back to the caller.
#[derive(PartialEq, Eq)]
pub enum PushError<T> {
    Closed(T),
}

impl<T> PushError<T> {
    /// Recovers the item that could not be queued.
    pub fn into_inner(self) -> T {
        match self {
            Self::Closed(item) => item,
        }
    }
}

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed(_) => f.write_str("Closed(..)"),
        }
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed(_) => write!(f, "push on a closed queue"),
        }
    }
}

impl<T> std::error::Error for PushError<T> {}

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    cap: usize,
    /// Consumers wait here for items.
    not_empty: Condvar,
    /// Producers wait here for free slots.
    not_full: Condvar,
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.lock();
        f.debug_struct("BoundedQueue")
            .field("len", &st.items.len())
            .field("capacity", &self.cap)
            .field("closed", &st.closed)
            .finish()
    }
}

impl<T> BoundedQueue<T> {
    /// Creates an open, empty queue. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(cap),
                closed: false,
            }),
            cap,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    // A panic while holding the lock cannot leave `QueueState` half-updated,
    // so a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `item`, blocking while the queue is full.
    ///
    /// Wakes one waiting consumer on success.
    ///
    /// # Errors
    /// Returns [`PushError::Closed`] with the item if the queue is closed,
    /// including when it gets closed while this call is blocked.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        let mut st = self
            .not_full
            .wait_while(self.lock(), |s| s.items.len() >= self.cap && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);

        if st.closed {
            return Err(PushError::Closed(item));
        }
        st.items.push_back(item);
        drop(st);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes the oldest item, blocking while the queue is empty.
    ///
    /// Returns `None` once the queue is closed and empty; that is the only
    /// way a consumer learns there is nothing more to read.
    pub fn pop(&self) -> Option<T> {
        let mut st = self
            .not_empty
            .wait_while(self.lock(), |s| s.items.is_empty() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);

        let item = st.items.pop_front()?;
        drop(st);

        self.not_full.notify_one();
        Some(item)
    }

    /// Discards every pending item, marks the queue closed and wakes all
    /// blocked producers and consumers. Calling it again is a no-op.
    pub fn close(&self) {
        {
            let mut st = self.lock();
            st.items.clear();
            st.closed = true;
        }
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Wakes one blocked consumer without touching the queue contents.
    ///
    /// Shutdown code calls this in a loop until [`is_empty`](Self::is_empty)
    /// holds, then calls [`close`](Self::close).
    pub fn flush(&self) {
        self.not_empty.notify_one();
    }

    /// Drops every pending item without closing the queue.
    ///
    /// Blocked producers are woken since space is now free; which of them
    /// gets a slot first is unspecified.
    pub fn clear(&self) {
        self.lock().items.clear();
        self.not_full.notify_all();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lock().items.len() >= self.cap
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cap
    }
}

impl<T: Clone> BoundedQueue<T> {
    /// Copy of the oldest item, if any.
    #[must_use]
    pub fn front(&self) -> Option<T> {
        self.lock().items.front().cloned()
    }

    /// Copy of the newest item, if any.
    #[must_use]
    pub fn back(&self) -> Option<T> {
        self.lock().items.back().cloned()
    }
}
