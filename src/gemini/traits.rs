//! Trait abstraction for the generative image service to enable mocking in tests

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::image::ImageEditError;
use async_trait::async_trait;

/// One request/response exchange with the remote image service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeImageApi: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ImageEditError>;
}
