//! MIDI upload controller
//!
//! Posts the selected audio file and, on success, reveals the result section
//! with the original audio (played from a local object URL) and the
//! transcribed MIDI file (served by the backend).

use crate::api::{ApiError, ApiResult, TutorApi, UploadFile};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const NO_FILE_MESSAGE: &str = "Please select a file";
pub const UPLOAD_FAILURE_MESSAGE: &str = "An error occurred during upload";

/// DOM nodes touched by the upload controller
#[async_trait(?Send)]
pub trait UploadSurface {
    /// Browser-side handle of a chosen file
    type File;

    /// First file chosen in the file input, if any
    fn selected_file(&self) -> Option<Self::File>;

    /// Read the file into an upload payload
    async fn read_file(&self, file: &Self::File) -> ApiResult<UploadFile>;

    /// Show a blocking alert
    fn alert(&self, message: &str);

    /// Unhide the result section
    fn reveal_results(&self);

    /// Point the audio element at a local URL for `file`
    fn bind_original_audio(&self, file: &Self::File);

    /// Point the MIDI player at a server path
    fn bind_midi(&self, midi_path: &str);
}

/// How an upload submission settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    NoFile,
    Uploaded { midi_path: String },
    ServerError(String),
    Failed(String),
}

/// Upload controller
pub struct UploadController<S, A> {
    surface: S,
    api: A,
}

impl<S: UploadSurface, A: TutorApi> UploadController<S, A> {
    pub fn new(surface: S, api: A) -> Self {
        Self { surface, api }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Handle one form submission
    pub async fn submit(&self) -> UploadOutcome {
        let Some(file) = self.surface.selected_file() else {
            debug!("No file selected, not uploading");
            self.surface.alert(NO_FILE_MESSAGE);
            return UploadOutcome::NoFile;
        };

        let result = match self.surface.read_file(&file).await {
            Ok(payload) => self.api.upload(payload).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(midi_path) => {
                self.surface.reveal_results();
                self.surface.bind_original_audio(&file);
                self.surface.bind_midi(&midi_path);
                UploadOutcome::Uploaded { midi_path }
            }
            Err(ApiError::Server(error)) => {
                self.surface.alert(&format!("Error: {error}"));
                UploadOutcome::ServerError(error)
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                self.surface.alert(UPLOAD_FAILURE_MESSAGE);
                UploadOutcome::Failed(e.to_string())
            }
        }
    }
}
