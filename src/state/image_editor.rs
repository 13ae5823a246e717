//! AI image editor state: picked image, instruction, and the edit request

use crate::gemini::{edit_image, GenerativeImageApi};
use crate::image::{
    load_image_file, save_edited_image, DataUrl, ImageEditError, LoadedImage, GENERIC_FAILURE,
};
use crate::state::forms::FormField;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Focusable elements of the image editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageEditorFocus {
    #[default]
    FilePath,
    Prompt,
    Generate,
    Download,
}

impl ImageEditorFocus {
    const ORDER: [Self; 4] = [Self::FilePath, Self::Prompt, Self::Generate, Self::Download];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Lifecycle of one edit request
#[derive(Debug, Default)]
pub enum EditRequest {
    #[default]
    Idle,
    Requesting {
        receiver: oneshot::Receiver<Result<String, ImageEditError>>,
        started: Instant,
    },
    Succeeded(DataUrl),
    Failed(String),
}

#[derive(Debug)]
pub struct ImageEditorState {
    pub file_path: FormField,
    pub prompt: FormField,
    pub focus: ImageEditorFocus,
    image: Option<LoadedImage>,
    load_error: Option<String>,
    request: EditRequest,
}

impl Default for ImageEditorState {
    fn default() -> Self {
        Self {
            file_path: FormField::text("Image file", false),
            prompt: FormField::text("Edit instruction", true),
            focus: ImageEditorFocus::default(),
            image: None,
            load_error: None,
            request: EditRequest::Idle,
        }
    }
}

impl ImageEditorState {
    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn request(&self) -> &EditRequest {
        &self.request
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self.request, EditRequest::Requesting { .. })
    }

    pub fn result(&self) -> Option<&DataUrl> {
        match &self.request {
            EditRequest::Succeeded(image) => Some(image),
            _ => None,
        }
    }

    /// The single error region: picker errors first, then request failures
    pub fn error_message(&self) -> Option<&str> {
        self.load_error.as_deref().or(match &self.request {
            EditRequest::Failed(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// Load the file named in the path field.
    ///
    /// A rejected file leaves any previously loaded image in place. A new
    /// image discards the previous result and error; a request still in
    /// flight stays `Requesting` until [`poll`](Self::poll) settles it.
    pub fn load_from_path(&mut self, max_bytes: u64) -> bool {
        let raw = self.file_path.as_text().trim().to_string();
        if raw.is_empty() {
            return false;
        }
        match load_image_file(Path::new(&raw), max_bytes) {
            Ok(image) => {
                tracing::info!("Loaded image {} ({} bytes)", image.file_name, image.size);
                self.image = Some(image);
                self.file_path.set_text(raw);
                self.load_error = None;
                if !self.is_requesting() {
                    self.request = EditRequest::Idle;
                }
                true
            }
            Err(err) => {
                tracing::warn!("Rejected image {raw}: {err}");
                self.load_error = Some(err.user_message());
                false
            }
        }
    }

    /// Generate is enabled with an image, a non-blank prompt, and nothing in flight
    pub fn can_generate(&self) -> bool {
        self.image.is_some() && !self.prompt.is_blank() && !self.is_requesting()
    }

    /// Start an edit request on the runtime. Does nothing unless
    /// [`can_generate`](Self::can_generate) holds.
    pub fn start_request(&mut self, api: Arc<dyn GenerativeImageApi>) {
        if !self.can_generate() {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            return;
        };
        self.load_error = None;

        let source = match DataUrl::parse(&image.data_url) {
            Ok(source) => source,
            Err(err) => {
                tracing::error!("Stored image is not a data URL: {err}");
                self.request = EditRequest::Failed(err.user_message());
                return;
            }
        };

        let instruction = self.prompt.as_text().to_string();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = edit_image(api.as_ref(), &source.data, &source.mime_type, &instruction).await;
            let _ = tx.send(result);
        });

        tracing::info!("Image edit request started");
        self.request = EditRequest::Requesting {
            receiver: rx,
            started: Instant::now(),
        };
    }

    /// Check on the in-flight request. Returns true once it settles.
    pub fn poll(&mut self) -> bool {
        let EditRequest::Requesting { receiver, .. } = &mut self.request else {
            return false;
        };
        self.request = match receiver.try_recv() {
            Ok(Ok(url)) => match DataUrl::parse(&url) {
                Ok(image) => EditRequest::Succeeded(image),
                Err(err) => EditRequest::Failed(err.user_message()),
            },
            Ok(Err(err)) => {
                tracing::warn!("Image edit request failed: {err}");
                EditRequest::Failed(err.user_message())
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => EditRequest::Failed(GENERIC_FAILURE.to_string()),
        };
        true
    }

    /// Write the edited image into `dir`
    pub fn save_result(&self, dir: &Path) -> Result<Option<PathBuf>, ImageEditError> {
        match self.result() {
            Some(image) => save_edited_image(dir, image, Utc::now()).map(Some),
            None => Ok(None),
        }
    }
}
