//! Job finder engine: storage, listing source and currency conversion adapters.
mod currency;
mod fetch;
mod persist;
mod source;
mod store;
mod types;

pub use currency::{BlockingConverter, ConverterSettings, FixerClient};
pub use fetch::HttpSettings;
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use source::{HhSource, ListingSource, SourceSettings, NO_CONTACT};
pub use store::{
    AppendSummary, DeleteFailure, DeleteOutcome, Degraded, JsonFileStore, LoadOutcome,
    RecordStore, StoreError,
};
pub use types::{FailureKind, FetchError};
