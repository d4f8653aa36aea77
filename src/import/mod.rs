//! Bulk import of dummies from uploaded files.
//!
//! 1. **Decoding** (`decode`) - Turns CSV or JSON bytes into [`RawRecord`]s
//! 2. **Validation** ([`crate::schema`]) - Checks each record against the dummy schema
//! 3. **Orchestration** (`pipeline`) - Validates and persists records one by one
//! 4. **Reporting** (`outcome`) - Classifies the run and renders the response body
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use dummy_api::import::{ImportFormat, ImportPipeline, UploadedFile};
//!
//! let upload = UploadedFile::new("people.csv", "name,description\nAlice,Engineer\n");
//! let outcome = ImportPipeline::new(store.as_ref())
//!     .run(ImportFormat::Csv, Some(&upload))
//!     .await?;
//!
//! println!("{}", outcome.message());
//! ```

pub mod decode;
pub mod outcome;
pub mod pipeline;
pub mod record;

pub use decode::{DecodeError, ImportFormat};
pub use outcome::{ImportOutcome, ImportReport, ImportStatus, RecordError};
pub use pipeline::{ImportError, ImportPipeline, UploadedFile};
pub use record::{RawRecord, RawValue};
