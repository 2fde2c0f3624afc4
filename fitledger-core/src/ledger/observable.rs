//! Whole-snapshot observable value holders.
//!
//! A holder keeps the latest `Arc<T>` snapshot. Writers stage a new value and
//! publish it later, which lets the ledger stage every derived view before any
//! observer hears about the change.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Callback<T> = Box<dyn FnMut(&T) + Send>;

pub struct Observable<T> {
    current: Arc<T>,
    sender: watch::Sender<Arc<T>>,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    next_id: u64,
    version: u64,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let current = Arc::new(initial);
        let (sender, _) = watch::channel(Arc::clone(&current));
        Self {
            current,
            sender,
            subscribers: Vec::new(),
            next_id: 0,
            version: 0,
        }
    }

    /// Latest staged snapshot.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.current)
    }

    /// Number of snapshots published so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Registers a callback invoked with every published snapshot.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns a watch receiver for async consumers. Dropping it unsubscribes.
    pub fn watch(&self) -> watch::Receiver<Arc<T>> {
        self.sender.subscribe()
    }

    pub(crate) fn stage(&mut self, value: T) {
        self.current = Arc::new(value);
    }

    pub(crate) fn stage_shared(&mut self, value: Arc<T>) {
        self.current = value;
    }

    pub(crate) fn publish(&mut self) {
        self.version += 1;
        self.sender.send_replace(Arc::clone(&self.current));
        let snapshot = Arc::clone(&self.current);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&snapshot);
        }
    }
}

/// Subscription access to a holder owned by someone else.
///
/// Allows registering and removing observers but never replacing the held
/// value, which stays under the owner's control.
pub struct ObserverHandle<'a, T> {
    inner: &'a mut Observable<T>,
}

impl<'a, T> ObserverHandle<'a, T> {
    pub(crate) fn new(inner: &'a mut Observable<T>) -> Self {
        Self { inner }
    }

    pub fn get(&self) -> Arc<T> {
        self.inner.get()
    }

    pub fn version(&self) -> u64 {
        self.inner.version()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.inner.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscriber_count()
    }

    pub fn watch(&self) -> watch::Receiver<Arc<T>> {
        self.inner.watch()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .field("version", &self.version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_stage_is_not_visible_to_subscribers_until_publish() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut obs = Observable::new(0);
        let sink = Arc::clone(&seen);
        obs.subscribe(move |v: &i32| sink.lock().unwrap().push(*v));

        obs.stage(1);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(*obs.get(), 1);

        obs.publish();
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut obs = Observable::new("a".to_string());
        let c = Arc::clone(&count);
        let id = obs.subscribe(move |_| *c.lock().unwrap() += 1);

        obs.publish();
        assert!(obs.unsubscribe(id));
        assert!(!obs.unsubscribe(id));
        obs.publish();

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn test_watch_receives_published_snapshot() {
        let mut obs = Observable::new(vec![1, 2]);
        let mut rx = obs.watch();
        assert!(!rx.has_changed().unwrap());

        obs.stage(vec![3]);
        assert!(!rx.has_changed().unwrap());
        obs.publish();

        assert!(rx.has_changed().unwrap());
        assert_eq!(**rx.borrow_and_update(), vec![3]);
    }
}
