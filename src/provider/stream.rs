use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use logging::trace_provider;
use tasks::Task;
use tokio::sync::{Semaphore, mpsc};
use walk::Entry;

use super::{CancelOnDrop, Glob, Pipeline};
use crate::GlobError;

/// Entries buffered between the readers and the consumer.
const STREAM_BUFFER: usize = 256;

type Sender = mpsc::Sender<Result<Entry, GlobError>>;

/// Incremental resolution as a [`Stream`].
///
/// Entries arrive as soon as a task reader accepts them. Entries of one task
/// keep their discovery order; entries of different tasks interleave. The
/// first error ends the stream. Dropping the stream cancels the readers.
#[derive(Debug)]
pub struct GlobStream<F> {
    receiver: mpsc::Receiver<Result<Entry, GlobError>>,
    transform: F,
    finished: bool,
    _cancel: CancelOnDrop,
}

impl<T, F> Stream for GlobStream<F>
where
    F: FnMut(Entry) -> T + Unpin,
{
    type Item = Result<T, GlobError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }
        match this.receiver.poll_recv(cx) {
            Poll::Ready(Some(Ok(entry))) => Poll::Ready(Some(Ok((this.transform)(entry)))),
            Poll::Ready(Some(Err(error))) => {
                this.finished = true;
                this.receiver.close();
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Pipeline {
    /// Sends the accepted entries of `task` until it ends or the consumer
    /// goes away.
    fn send_task(&self, task: &Task, sender: &Sender) {
        let entries = match self.task_entries(task) {
            Ok(entries) => entries,
            Err(error) => {
                self.cancel_flag().cancel();
                let _ = sender.blocking_send(Err(error));
                return;
            }
        };
        for item in entries {
            let fatal = item.is_err();
            if fatal {
                self.cancel_flag().cancel();
            }
            if sender.blocking_send(item).is_err() {
                trace_provider!(base = task.base(), "stream consumer went away");
                self.cancel_flag().cancel();
                return;
            }
            if fatal {
                return;
            }
        }
    }
}

impl Glob {
    /// Streams accepted entries.
    ///
    /// Readers start immediately on Tokio's blocking pool, bounded by the
    /// `concurrency` option.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn stream(&self) -> GlobStream<fn(Entry) -> Entry> {
        self.stream_with(std::convert::identity as fn(Entry) -> Entry)
    }

    /// Like [`stream`](Self::stream), mapping each entry through `transform`
    /// as the consumer receives it.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn stream_with<T, F>(&self, transform: F) -> GlobStream<F>
    where
        F: FnMut(Entry) -> T,
    {
        let pipeline = Arc::new(self.pipeline());
        let cancel = CancelOnDrop::new(pipeline.cancel_flag().clone());
        let tasks = self.tasks();
        let semaphore = self
            .settings
            .concurrency()
            .map(|limit| Arc::new(Semaphore::new(limit.min(Semaphore::MAX_PERMITS))));
        trace_provider!(tasks = tasks.len(), "streaming");

        let (sender, receiver) = mpsc::channel(STREAM_BUFFER);
        for task in tasks {
            let pipeline = Arc::clone(&pipeline);
            let semaphore = semaphore.clone();
            let sender = sender.clone();
            tokio::spawn(async move {
                // The semaphore is never closed.
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                if pipeline.cancel_flag().is_cancelled() {
                    return;
                }
                let worker_sender = sender.clone();
                let worker =
                    tokio::task::spawn_blocking(move || pipeline.send_task(&task, &worker_sender));
                if let Err(error) = worker.await {
                    let _ = sender.send(Err(error.into())).await;
                }
            });
        }

        GlobStream {
            receiver,
            transform,
            finished: false,
            _cancel: cancel,
        }
    }
}
