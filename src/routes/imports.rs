//! Bulk import endpoints accepting multipart uploads under the `file` field.
//!
//! Every response, failures included, carries an [`ImportReport`] body.

use crate::import::{
    ImportError, ImportFormat, ImportOutcome, ImportPipeline, ImportReport, ImportStatus,
    UploadedFile,
};
use crate::store::SharedStore;
use rocket::form::{self, error::ErrorKind, Form, FromForm};
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{State, post};
use tokio::io::AsyncReadExt;

/// Multipart form carrying the uploaded file.
#[derive(FromForm)]
pub struct ImportForm<'r> {
    pub file: TempFile<'r>,
}

/// `None` when the request is not a form at all.
type ImportData<'r> = Option<form::Result<'r, Form<ImportForm<'r>>>>;

type ImportResponse = Custom<Json<ImportReport>>;

/// Import dummies from a CSV file whose header row names the columns.
#[post("/dummies/import/csv", data = "<form>")]
pub async fn import_csv(form: ImportData<'_>, store: &State<SharedStore>) -> ImportResponse {
    respond(run_import(ImportFormat::Csv, form, store).await)
}

/// Import dummies from a JSON file containing a list of objects.
#[post("/dummies/import/json", data = "<form>")]
pub async fn import_json(form: ImportData<'_>, store: &State<SharedStore>) -> ImportResponse {
    respond(run_import(ImportFormat::Json, form, store).await)
}

async fn run_import(
    format: ImportFormat,
    form: ImportData<'_>,
    store: &State<SharedStore>,
) -> Result<ImportOutcome, ImportError> {
    let upload = match form {
        None => None,
        Some(Ok(form)) => Some(read_upload(&form.file).await?),
        Some(Err(errors)) => return Err(form_error(&errors)),
    };

    ImportPipeline::new(store.inner().as_ref())
        .run(format, upload.as_ref())
        .await
}

fn respond(result: Result<ImportOutcome, ImportError>) -> ImportResponse {
    match result {
        Ok(outcome) => {
            let status = match outcome.status() {
                ImportStatus::Complete => Status::Ok,
                ImportStatus::Partial => Status::MultiStatus,
                ImportStatus::Failed => Status::BadRequest,
            };
            Custom(status, Json(ImportReport::from(outcome)))
        }
        // Server-side failures are logged where they occur.
        Err(err) if !err.is_client_error() => Custom(
            Status::InternalServerError,
            Json(ImportReport::message("Internal server error")),
        ),
        Err(err) => {
            log::debug!("import rejected: {err}");
            let status = match err {
                ImportError::FileTooLarge { .. } => Status::PayloadTooLarge,
                _ => Status::BadRequest,
            };
            Custom(status, Json(ImportReport::message(err.to_string())))
        }
    }
}

/// Classify a failed form parse. Only a form lacking the `file` field counts
/// as a missing file.
fn form_error(errors: &form::Errors<'_>) -> ImportError {
    let limit = errors.iter().find_map(|error| match error.kind {
        ErrorKind::InvalidLength { max: Some(max), .. } => Some(max),
        _ => None,
    });

    if let Some(limit) = limit {
        ImportError::FileTooLarge { limit }
    } else if errors
        .iter()
        .all(|error| matches!(error.kind, ErrorKind::Missing))
    {
        ImportError::MissingFile
    } else {
        ImportError::MalformedUpload(errors.to_string())
    }
}

async fn read_upload(file: &TempFile<'_>) -> Result<UploadedFile, ImportError> {
    let filename = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string());

    let reader = file.open().await.map_err(upload_error)?;
    tokio::pin!(reader);

    let mut content = Vec::with_capacity(usize::try_from(file.len()).unwrap_or_default());
    reader
        .read_to_end(&mut content)
        .await
        .map_err(upload_error)?;

    Ok(UploadedFile { filename, content })
}

fn upload_error(err: std::io::Error) -> ImportError {
    log::error!("failed to read upload: {err}");
    ImportError::Upload(err)
}
