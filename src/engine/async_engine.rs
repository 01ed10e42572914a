use crate::engine::batch::{BatchEvent, BatchFile, BatchIterator};
use crate::engine::ImportOptions;
use crate::models::BatchParsedTransaction;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error};

const DEFAULT_BACKPRESSURE: usize = 64;

/// Runs batch imports on a blocking producer task feeding a bounded channel.
pub struct BatchEngine {
    options: ImportOptions,
    backpressure: usize
}

impl BatchEngine {
    /// Creates a new engine with the provided import options.
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            backpressure: DEFAULT_BACKPRESSURE
        }
    }

    /// Caps how many events the producer may run ahead of the consumer.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Starts importing `files` in order and returns the event stream.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn stream(&self, files: Vec<BatchFile>) -> BatchStream {
        let (sender, receiver) = mpsc::channel::<BatchEvent>(self.backpressure);
        let producer = self.spawn_producer(BatchIterator::new(files, self.options), sender);

        BatchStream {
            receiver,
            producer: Some(producer)
        }
    }

    /// Imports `files` and returns every transaction in emission order.
    pub async fn collect_transactions(&self, files: Vec<BatchFile>) -> Vec<BatchParsedTransaction> {
        self.collect_transactions_with_progress(files, |_| {}).await
    }

    /// Like [`collect_transactions`](Self::collect_transactions), handing every event to
    /// `progress` as it arrives.
    pub async fn collect_transactions_with_progress<F>(&self, files: Vec<BatchFile>, mut progress: F) -> Vec<BatchParsedTransaction>
    where
        F: FnMut(&BatchEvent)
    {
        let mut stream = self.stream(files);
        let mut transactions = Vec::new();

        while let Some(event) = stream.next().await {
            progress(&event);

            if let BatchEvent::Transaction { transaction, .. } = event {
                transactions.push(transaction);
            }
        }

        transactions
    }

    fn spawn_producer(&self, events: BatchIterator, sender: mpsc::Sender<BatchEvent>) -> JoinHandle<()> {
        spawn_blocking(move || {
            for event in events {
                if sender.blocking_send(event).is_err() {
                    debug!("Batch consumer went away, stopping the import");
                    break;
                }
            }
        })
    }
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

/// Ordered stream of [`BatchEvent`]s. Dropping it stops the import.
pub struct BatchStream {
    receiver: mpsc::Receiver<BatchEvent>,
    producer: Option<JoinHandle<()>>
}

impl BatchStream {
    /// The next event, or `None` once `BatchComplete` has been delivered.
    pub async fn next(&mut self) -> Option<BatchEvent> {
        let event = self.receiver.recv().await;

        if event.is_none() {
            if let Some(producer) = self.producer.take() {
                if let Err(error) = producer.await {
                    error!("Batch producer failed: {error}");
                }
            }
        }

        event
    }
}

/// Streams a batch with default options.
pub fn stream_batch(files: Vec<BatchFile>) -> BatchStream {
    BatchEngine::default().stream(files)
}

/// Collects every transaction of a batch with default options.
pub async fn collect_transactions(files: Vec<BatchFile>) -> Vec<BatchParsedTransaction> {
    BatchEngine::default().collect_transactions(files).await
}

/// Collects every transaction of a batch with default options, reporting progress.
pub async fn collect_transactions_with_progress<F>(files: Vec<BatchFile>, progress: F) -> Vec<BatchParsedTransaction>
where
    F: FnMut(&BatchEvent)
{
    BatchEngine::default().collect_transactions_with_progress(files, progress).await
}
