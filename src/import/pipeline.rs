//! Import orchestration: request checks, decoding, per-record validation and
//! persistence.
//!
//! # Failure handling
//!
//! * A missing, unnamed, empty, oversized or malformed upload rejects the
//!   request before decoding.
//! * A [`DecodeError`] rejects the whole upload; nothing is persisted.
//! * Validation failures and [`StoreError::Rejected`] are recorded against the
//!   record's index and the run continues with the next record.
//! * Any other [`StoreError`] aborts the remaining records. Records persisted
//!   before the abort are kept, each having been written as its own statement.

use super::decode::{self, DecodeError, ImportFormat};
use super::outcome::ImportOutcome;
use crate::schema;
use crate::store::{DummyStore, StoreError};
use thiserror::Error;

/// A file received by an import endpoint.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    /// Client-supplied filename, unsanitized.
    pub filename: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: Some(filename.into()),
            content: content.into(),
        }
    }
}

/// Reasons an import produced no [`ImportOutcome`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No file part in the request.")]
    MissingFile,
    #[error("No selected file.")]
    EmptyFilename,
    #[error("Uploaded file is empty.")]
    EmptyFile,
    #[error("Uploaded file exceeds the {limit} byte limit.")]
    FileTooLarge { limit: u64 },
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
    #[error("failed to read upload: {0}")]
    Upload(#[source] std::io::Error),
    #[error("Import failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("import aborted after {imported} records: {source}")]
    Storage {
        imported: usize,
        #[source]
        source: StoreError,
    },
}

impl ImportError {
    /// True for errors caused by the client's request rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImportError::Storage { .. } | ImportError::Upload(_))
    }
}

/// Runs imports against an injected [`DummyStore`].
pub struct ImportPipeline<'a> {
    store: &'a dyn DummyStore,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(store: &'a dyn DummyStore) -> Self {
        Self { store }
    }

    /// Import `upload` as `format`.
    ///
    /// Records are validated and written strictly in upload order, so the
    /// returned errors are sorted by index.
    pub async fn run(
        &self,
        format: ImportFormat,
        upload: Option<&UploadedFile>,
    ) -> Result<ImportOutcome, ImportError> {
        let upload = check_upload(upload)?;

        let records = decode::decode(format, &upload.content).inspect_err(|err| {
            log::info!("rejecting {format} import: {err}");
        })?;

        log::debug!("decoded {} {format} records", records.len());

        let mut outcome = ImportOutcome::default();

        for (index, record) in records.iter().enumerate() {
            let dummy = match schema::load(record) {
                Ok(dummy) => dummy,
                Err(err) => {
                    outcome.record_error(index, err.to_string());
                    continue;
                }
            };

            match self.store.create(&dummy).await {
                Ok(_) => outcome.record_success(),
                Err(err) if err.is_record_specific() => {
                    outcome.record_error(index, err.to_string());
                }
                Err(err) => {
                    log::error!(
                        "{format} import aborted at record {index} after {} records: {err}",
                        outcome.succeeded
                    );
                    return Err(ImportError::Storage {
                        imported: outcome.succeeded,
                        source: err,
                    });
                }
            }
        }

        log::info!(
            "{format} import finished: {} of {} records imported, {} errors",
            outcome.succeeded,
            outcome.total(),
            outcome.errors.len()
        );

        Ok(outcome)
    }
}

fn check_upload(upload: Option<&UploadedFile>) -> Result<&UploadedFile, ImportError> {
    let upload = upload.ok_or(ImportError::MissingFile)?;

    match upload.filename.as_deref() {
        None | Some("") => return Err(ImportError::EmptyFilename),
        Some(_) => {}
    }

    if upload.content.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::outcome::{ImportStatus, RecordError};
    use crate::store::MemoryDummyStore;

    async fn run(
        store: &MemoryDummyStore,
        format: ImportFormat,
        content: &str,
    ) -> Result<ImportOutcome, ImportError> {
        let upload = UploadedFile::new("upload", content);
        ImportPipeline::new(store).run(format, Some(&upload)).await
    }

    #[tokio::test]
    async fn csv_mixed_batch_reports_failed_indices() {
        let store = MemoryDummyStore::new();
        let outcome = run(
            &store,
            ImportFormat::Csv,
            "name,description\nAlice,Engineer\n,Manager\nBob,\n",
        )
        .await
        .expect("import runs");

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(
            outcome.errors,
            vec![RecordError {
                index: 1,
                error: "name required".into()
            }]
        );
        assert_eq!(outcome.status(), ImportStatus::Partial);

        let stored = store.all();
        assert_eq!(stored[0].name, "Alice");
        assert_eq!(stored[0].description.as_deref(), Some("Engineer"));
        assert_eq!(stored[1].name, "Bob");
        assert_eq!(stored[1].description, None);
    }

    #[tokio::test]
    async fn json_non_objects_fail_at_their_index() {
        let store = MemoryDummyStore::new();
        let outcome = run(&store, ImportFormat::Json, r#"[{"name":"a"}, 3, {"name":""}]"#)
            .await
            .expect("import runs");

        let indices: Vec<_> = outcome.errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2]);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.total(), 3);
    }

    #[tokio::test]
    async fn decode_failure_persists_nothing() {
        let store = MemoryDummyStore::new();
        let err = run(&store, ImportFormat::Json, r#"{"foo":"bar"}"#)
            .await
            .expect_err("not a list");

        assert!(matches!(err, ImportError::Decode(DecodeError::NotAList)));
        assert!(err.to_string().contains("must be a list"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn request_checks_run_before_decoding() {
        let store = MemoryDummyStore::new();
        let pipeline = ImportPipeline::new(&store);

        let err = pipeline.run(ImportFormat::Csv, None).await.expect_err("no file");
        assert!(matches!(err, ImportError::MissingFile));

        let unnamed = UploadedFile::new("", "name\nA\n");
        let err = pipeline
            .run(ImportFormat::Csv, Some(&unnamed))
            .await
            .expect_err("empty filename");
        assert!(matches!(err, ImportError::EmptyFilename));

        let empty = UploadedFile::new("data.csv", "");
        let err = pipeline
            .run(ImportFormat::Csv, Some(&empty))
            .await
            .expect_err("empty content");
        assert!(matches!(err, ImportError::EmptyFile));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn rejected_records_do_not_stop_the_batch() {
        let store = MemoryDummyStore::new();
        store.reject_name("Mallory");

        let outcome = run(&store, ImportFormat::Csv, "name\nAlice\nMallory\nBob\n")
            .await
            .expect("import runs");

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].index, 1);
        assert!(outcome.errors[0].error.starts_with("rejected by store"));
    }

    #[tokio::test]
    async fn unavailable_store_aborts_the_batch() {
        let store = MemoryDummyStore::new();
        store.set_unavailable(true);

        let err = run(&store, ImportFormat::Csv, "name\nAlice\nBob\n")
            .await
            .expect_err("store down");

        assert!(matches!(err, ImportError::Storage { imported: 0, .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn outage_mid_batch_keeps_earlier_records() {
        let store = MemoryDummyStore::new();
        store.fail_after_writes(1);

        let err = run(&store, ImportFormat::Csv, "name\nAlice\nBob\nCarol\n")
            .await
            .expect_err("store down after first write");

        assert!(matches!(
            err,
            ImportError::Storage {
                imported: 1,
                source: StoreError::Unavailable(_)
            }
        ));
        let names: Vec<_> = store.all().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["Alice"]);
    }

    #[tokio::test]
    async fn repeated_imports_create_separate_entities() {
        let store = MemoryDummyStore::new();
        for _ in 0..2 {
            let outcome = run(&store, ImportFormat::Json, r#"[{"name":"Alice"}]"#)
                .await
                .expect("import runs");
            assert_eq!(outcome.status(), ImportStatus::Complete);
        }

        let ids: Vec<_> = store.all().iter().map(|d| d.id).collect();
        assert_eq!(ids, [1, 2]);
    }
}
