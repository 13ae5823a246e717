//! Image handling for the AI image editor
//!
//! - `data_url`: base64 data URL codec
//! - `file`: loading picked files and saving edited results
//! - `error`: error taxonomy of the edit request cycle

mod data_url;
mod error;
mod file;

pub use data_url::{DataUrl, DEFAULT_MIME_TYPE};
pub use error::{ImageEditError, GENERIC_FAILURE};
pub use file::{load_image_file, save_edited_image, LoadedImage, MAX_UPLOAD_BYTES};
