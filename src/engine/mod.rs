mod async_engine;
mod batch;
mod pipeline;
mod single_file;

pub use async_engine::{collect_transactions, collect_transactions_with_progress, stream_batch, BatchEngine, BatchStream};
pub use batch::{BatchEvent, BatchFile, BatchIterator};
pub use single_file::{parse, parse_bytes, parse_statements, parse_with_options};

use crate::mapper::MissingFieldPolicy;

/// Options shared by the single-file and batch imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub missing_field_policy: MissingFieldPolicy
}

impl ImportOptions {
    pub fn with_missing_field_policy(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_field_policy = policy;
        self
    }
}
