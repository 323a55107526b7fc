//! Live queries
//!
//! A [`LiveQuery`] is a subscription to the full contents of a table. The
//! first [`next`](LiveQuery::next) resolves immediately with the current
//! snapshot; every later call resolves once per committed write. A
//! subscriber that falls behind skips straight to the newest snapshot, so it
//! always converges on the latest committed state.

use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable view of a table at one commit
pub type Snapshot<T> = Arc<Vec<T>>;

/// Subscription to every committed snapshot of a table
pub struct LiveQuery<T> {
    rx: watch::Receiver<Snapshot<T>>,
    delivered_initial: bool,
}

impl<T> LiveQuery<T> {
    pub(crate) fn new(rx: watch::Receiver<Snapshot<T>>) -> Self {
        Self {
            rx,
            delivered_initial: false,
        }
    }

    /// Latest committed snapshot, without waiting
    pub fn current(&self) -> Snapshot<T> {
        Arc::clone(&self.rx.borrow())
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the owning store has been dropped and the last
    /// snapshot was already delivered.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(Arc::clone(&self.rx.borrow_and_update()));
        }

        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }

    /// Project every element of every snapshot through `f`
    pub fn map<U, F>(self, f: F) -> MappedQuery<T, U>
    where
        F: Fn(&T) -> U + Send + Sync + 'static,
    {
        MappedQuery {
            inner: self,
            project: Arc::new(f),
        }
    }
}

impl<T> LiveQuery<T>
where
    T: Send + Sync + 'static,
{
    /// Adapt into a `Stream` of snapshots
    pub fn into_stream(self) -> BoxStream<'static, Snapshot<T>> {
        stream::unfold(self, |mut query| async move {
            query.next().await.map(|snapshot| (snapshot, query))
        })
        .boxed()
    }
}

/// A [`LiveQuery`] whose snapshots are projected element-wise.
///
/// The projection runs for every emission; nothing is cached between them.
pub struct MappedQuery<T, U> {
    inner: LiveQuery<T>,
    project: Arc<dyn Fn(&T) -> U + Send + Sync>,
}

impl<T, U> MappedQuery<T, U> {
    fn apply(&self, snapshot: &[T]) -> Vec<U> {
        snapshot.iter().map(|item| (self.project)(item)).collect()
    }

    /// Projection of the latest committed snapshot
    pub fn current(&self) -> Vec<U> {
        self.apply(&self.inner.current())
    }

    /// Wait for the next snapshot and project it
    pub async fn next(&mut self) -> Option<Vec<U>> {
        let snapshot = self.inner.next().await?;
        Some(self.apply(&snapshot))
    }
}

impl<T, U> MappedQuery<T, U>
where
    T: Send + Sync + 'static,
    U: Send + 'static,
{
    /// Adapt into a `Stream` of projected snapshots
    pub fn into_stream(self) -> BoxStream<'static, Vec<U>> {
        stream::unfold(self, |mut query| async move {
            query.next().await.map(|items| (items, query))
        })
        .boxed()
    }
}
