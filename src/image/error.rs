//! Errors of the image edit request cycle

/// Fallback message when a failure carries no text of its own
pub const GENERIC_FAILURE: &str = "Failed to edit image. Please try again.";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Compact size for messages: whole MB when exact, else one decimal, KB below 1 MB
fn size_label(bytes: &u64) -> String {
    let bytes = *bytes;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ImageEditError {
    #[error("File size too large. Please select an image under {}.", size_label(.limit))]
    FileTooLarge { size: u64, limit: u64 },
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Invalid image format")]
    InvalidImageFormat,
    #[error("No image data found in response.")]
    NoImageData,
    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to the config file.")]
    MissingApiKey,
    #[error("image service error: {status} {message}")]
    Service { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid base64 data: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ImageEditError {
    /// Text shown in the image editor's error region.
    ///
    /// Service and transport failures show their own message as is; the
    /// status code only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } if message.trim().is_empty() => {
                GENERIC_FAILURE.to_string()
            }
            Self::Service { message, .. } => message.clone(),
            Self::Transport(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}
