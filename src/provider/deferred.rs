use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use logging::trace_provider;
use tokio::sync::Semaphore;
use walk::Entry;

use super::{CancelOnDrop, Glob};
use crate::GlobError;

impl Glob {
    /// Resolves every task on Tokio's blocking pool.
    ///
    /// Tasks run concurrently, bounded by the `concurrency` option. The
    /// result is ordered by task, then by discovery order, exactly like
    /// [`collect`](Self::collect). The first fatal error cancels the
    /// remaining readers and is returned alone. Dropping the future also
    /// cancels outstanding readers.
    pub async fn run(&self) -> Result<Vec<Entry>, GlobError> {
        let pipeline = Arc::new(self.pipeline());
        let _guard = CancelOnDrop::new(pipeline.cancel_flag().clone());
        let tasks = self.tasks();
        let limit = self
            .settings
            .concurrency()
            .map_or(Semaphore::MAX_PERMITS, |limit| limit.min(Semaphore::MAX_PERMITS));
        let semaphore = Arc::new(Semaphore::new(limit));
        trace_provider!(tasks = tasks.len(), limit, "resolving on the blocking pool");

        let mut slots: Vec<Option<Vec<Entry>>> = Vec::with_capacity(tasks.len());
        slots.resize_with(tasks.len(), || None);

        let mut pending = FuturesUnordered::new();
        for (index, task) in tasks.into_iter().enumerate() {
            let pipeline = Arc::clone(&pipeline);
            let semaphore = Arc::clone(&semaphore);
            pending.push(async move {
                // The semaphore is never closed.
                let _permit = semaphore.acquire_owned().await.ok();
                let entries =
                    tokio::task::spawn_blocking(move || pipeline.collect_task(&task)).await??;
                Ok::<_, GlobError>((index, entries))
            });
        }

        while let Some(result) = pending.next().await {
            match result {
                Ok((index, entries)) => slots[index] = Some(entries),
                Err(error) => {
                    pipeline.cancel_flag().cancel();
                    return Err(error);
                }
            }
        }

        Ok(slots.into_iter().flatten().flatten().collect())
    }

    /// Like [`run`](Self::run), then maps each entry through `transform` in
    /// output order.
    pub async fn run_with<T, F>(&self, transform: F) -> Result<Vec<T>, GlobError>
    where
        F: FnMut(Entry) -> T,
    {
        Ok(self.run().await?.into_iter().map(transform).collect())
    }
}
