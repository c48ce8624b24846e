//! The shared `loading` flag and its subscriptions.
//!
//! The current value lives in a `watch` channel so late readers can see it
//! and wait on it. Every transition is also queued to each subscriber on its
//! own unbounded channel, so a subscriber registered before a change receives
//! that change however far behind it is.

use futures::stream::{self, Stream};
use std::sync::{Mutex, PoisonError};
use tokio::sync::{mpsc, watch};

#[derive(Debug)]
pub struct LoadingFlag {
    state: watch::Sender<bool>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<bool>>>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn is_loading(&self) -> bool {
        *self.state.borrow()
    }

    /// Set the flag; subscribers are notified only on an actual change.
    pub(crate) fn set(&self, loading: bool) {
        // Held across the update so `subscribe` lands wholly before or after it.
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = self.state.send_replace(loading);
        if previous != loading {
            subscribers.retain(|tx| tx.send(loading).is_ok());
        }
    }

    /// Raise the flag until the returned guard is dropped.
    pub(crate) fn raise(&self) -> LoadingGuard<'_> {
        self.set(true);
        LoadingGuard { flag: self }
    }

    pub fn subscribe(&self) -> LoadingWatch {
        let (tx, transitions) = mpsc::unbounded_channel();
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.push(tx);
        LoadingWatch {
            state: self.state.subscribe(),
            transitions,
        }
    }

    /// Resolve once the flag is clear (immediately if it already is).
    pub async fn wait_idle(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot report closed.
        let _ = rx.wait_for(|loading| !*loading).await;
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears the flag on drop, including when a load future is cancelled.
#[derive(Debug)]
pub(crate) struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// One consumer's view of the flag.
#[derive(Debug)]
pub struct LoadingWatch {
    state: watch::Receiver<bool>,
    transitions: mpsc::UnboundedReceiver<bool>,
}

impl LoadingWatch {
    pub fn current(&self) -> bool {
        *self.state.borrow()
    }

    /// Next transition after subscription, in order. `None` once the store
    /// is gone.
    pub async fn next(&mut self) -> Option<bool> {
        self.transitions.recv().await
    }

    pub fn into_stream(self) -> impl Stream<Item = bool> {
        stream::unfold(self, |mut watch| async move {
            let next = watch.next().await?;
            Some((next, watch))
        })
    }
}
