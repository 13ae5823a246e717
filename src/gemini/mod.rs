//! Client module for the remote generative image service

mod client;
mod service;
mod traits;
pub mod types;

pub use client::GeminiClient;
pub use service::edit_image;
pub use traits::GenerativeImageApi;

#[cfg(test)]
pub use traits::MockGenerativeImageApi;
