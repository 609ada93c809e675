// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal synchronous publish/subscribe channel.
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_view_transform::Signal;
//!
//! let seen = Rc::new(Cell::new(0));
//! let mut signal = Signal::<u32>::new();
//! let id = {
//!     let seen = seen.clone();
//!     signal.subscribe(move |v| seen.set(seen.get() + *v))
//! };
//! signal.emit(&3);
//! assert!(signal.unsubscribe(id));
//! signal.emit(&3);
//! assert_eq!(seen.get(), 3);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Identifies one subscription on a [`Signal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// Ordered list of subscribers notified synchronously on [`Signal::emit`].
///
/// Subscribers run in subscription order. There is no ordering guarantee
/// between different signals.
pub struct Signal<T> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T> Signal<T> {
    /// Creates a signal with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Appends a subscriber and returns its id.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber; returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(idx) = self.subscribers.iter().position(|(sid, _)| *sid == id) else {
            return false;
        };
        self.subscribers.remove(idx);
        true
    }

    /// Calls every subscriber with `value`, in order.
    pub fn emit(&mut self, value: &T) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(value);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Drops all subscribers.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
