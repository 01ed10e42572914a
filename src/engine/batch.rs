use serde::Serialize;
use std::collections::VecDeque;
use std::path::Path;
use std::vec;
use tracing::{debug, warn};

use crate::engine::pipeline::import_document;
use crate::engine::ImportOptions;
use crate::mapper::BatchPolicy;
use crate::models::BatchParsedTransaction;
use crate::sgml::decode_bytes;
use crate::types::FileIndex;

/// One input of a batch: a display name and the full file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFile {
    pub filename: String,
    pub buffer: Vec<u8>
}

impl BatchFile {
    pub fn new(filename: impl Into<String>, buffer: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            buffer: buffer.into()
        }
    }

    /// Loads a file from disk, naming it after the last path component.
    pub async fn read(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let buffer = tokio::fs::read(path).await?;
        let filename = path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self { filename, buffer })
    }
}

/// Progress of a batch import. Events of file N always precede those of file N + 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    FileStart {
        file_index: FileIndex,
        filename: String
    },
    Transaction {
        file_index: FileIndex,
        transaction: BatchParsedTransaction
    },
    FileComplete {
        file_index: FileIndex,
        filename: String,
        transaction_count: usize
    },
    FileError {
        file_index: FileIndex,
        filename: String,
        error: String
    },
    BatchComplete {
        total_files: usize,
        total_transactions: usize,
        error_count: usize
    }
}

/// Pull-based batch import.
///
/// A file is only decoded and parsed when the event after its `FileStart` is requested,
/// so a consumer that stops pulling stops the work at that file boundary. A file that
/// fails yields a single `FileError` and the batch moves on to the next one.
pub struct BatchIterator {
    files: vec::IntoIter<BatchFile>,
    options: ImportOptions,
    total_files: usize,
    next_index: FileIndex,
    started: Option<(FileIndex, BatchFile)>,
    pending: VecDeque<BatchEvent>,
    total_transactions: usize,
    error_count: usize,
    finished: bool
}

impl BatchIterator {
    pub fn new(files: Vec<BatchFile>, options: ImportOptions) -> Self {
        Self {
            total_files: files.len(),
            files: files.into_iter(),
            options,
            next_index: 0,
            started: None,
            pending: VecDeque::new(),
            total_transactions: 0,
            error_count: 0,
            finished: false
        }
    }

    fn process(&mut self, file_index: FileIndex, file: BatchFile) {
        let content = decode_bytes(&file.buffer);

        match import_document(&content, &BatchPolicy, &self.options) {
            Ok(transactions) => {
                let transaction_count = transactions.len();
                self.total_transactions += transaction_count;

                debug!("File [{file_index}] {} yielded {transaction_count} transactions", file.filename);

                self.pending.extend(transactions.into_iter().map(|transaction| BatchEvent::Transaction {
                    file_index,
                    transaction: BatchParsedTransaction::new(transaction, file_index, &file.filename)
                }));

                self.pending.push_back(BatchEvent::FileComplete {
                    file_index,
                    filename: file.filename,
                    transaction_count
                });
            }
            Err(error) => {
                self.error_count += 1;
                let error = error.describe();

                warn!("File [{file_index}] {} could not be imported: {error}", file.filename);

                self.pending.push_back(BatchEvent::FileError {
                    file_index,
                    filename: file.filename,
                    error
                });
            }
        }
    }
}

impl Iterator for BatchIterator {
    type Item = BatchEvent;

    fn next(&mut self) -> Option<BatchEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            if let Some((file_index, file)) = self.started.take() {
                self.process(file_index, file);
                continue;
            }

            if self.finished {
                return None;
            }

            let Some(file) = self.files.next() else {
                self.finished = true;

                return Some(BatchEvent::BatchComplete {
                    total_files: self.total_files,
                    total_transactions: self.total_transactions,
                    error_count: self.error_count
                });
            };

            let file_index = self.next_index;
            self.next_index += 1;

            let event = BatchEvent::FileStart {
                file_index,
                filename: file.filename.clone()
            };

            self.started = Some((file_index, file));

            return Some(event);
        }
    }
}
