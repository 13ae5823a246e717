//! The image edit request: one call, first inline image wins

use super::traits::GenerativeImageApi;
use super::types::{GenerateContentRequest, GenerateContentResponse, Part};
use crate::image::{DataUrl, ImageEditError, DEFAULT_MIME_TYPE};

/// Ask the service to edit `base64_image` following `instruction`.
///
/// Returns the edited image as a data URL. Errors from the transport are
/// passed through unchanged; a response without image data fails with
/// [`ImageEditError::NoImageData`].
pub async fn edit_image(
    api: &dyn GenerativeImageApi,
    base64_image: &str,
    mime_type: &str,
    instruction: &str,
) -> Result<String, ImageEditError> {
    let request = GenerateContentRequest::single(vec![
        Part::inline_data(mime_type, base64_image),
        Part::text(instruction),
    ]);

    match api.generate_content(request).await {
        Ok(response) => first_image(&response).map(|image| image.to_string()),
        Err(err) => {
            tracing::error!("Error editing image: {err}");
            Err(err)
        }
    }
}

/// First inline image part of the first candidate
pub fn first_image(response: &GenerateContentResponse) -> Result<DataUrl, ImageEditError> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .into_iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| {
            let mime_type = inline
                .mime_type
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MIME_TYPE);
            DataUrl::new(mime_type, inline.data.clone())
        })
        .ok_or(ImageEditError::NoImageData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{Candidate, Content, InlineData};
    use crate::gemini::MockGenerativeImageApi;
    use pretty_assertions::assert_eq;

    fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { role: None, parts }),
                finish_reason: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_returns_data_url_of_inline_image() {
        let mut api = MockGenerativeImageApi::new();
        api.expect_generate_content()
            .withf(|request| {
                let parts = &request.contents[0].parts;
                parts.len() == 2
                    && parts[0].inline_data
                        == Some(InlineData {
                            mime_type: Some("image/png".to_string()),
                            data: "iVBO".to_string(),
                        })
                    && parts[1].text.as_deref() == Some("add a hat")
            })
            .times(1)
            .returning(|_| {
                Ok(response_with_parts(vec![Part::inline_data(
                    "image/png",
                    "RURJVEVE",
                )]))
            });

        let result = edit_image(&api, "iVBO", "image/png", "add a hat").await;
        assert_eq!(result.unwrap(), "data:image/png;base64,RURJVEVE");
    }

    #[tokio::test]
    async fn test_no_image_part_fails() {
        let mut api = MockGenerativeImageApi::new();
        api.expect_generate_content()
            .times(1)
            .returning(|_| Ok(response_with_parts(vec![Part::text("I can't do that")])));

        let result = edit_image(&api, "iVBO", "image/png", "add a hat").await;
        assert!(matches!(result, Err(ImageEditError::NoImageData)));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let mut api = MockGenerativeImageApi::new();
        api.expect_generate_content().times(1).returning(|_| {
            Err(ImageEditError::Service {
                status: 429,
                message: "Resource exhausted".to_string(),
            })
        });

        let err = edit_image(&api, "iVBO", "image/png", "add a hat")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Resource exhausted");
    }

    #[test]
    fn test_first_image_skips_text_and_empty_parts() {
        let response = response_with_parts(vec![
            Part::text("Here you go"),
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: Some("image/png".to_string()),
                    data: String::new(),
                }),
            },
            Part::inline_data("image/jpeg", "Zmlyc3Q="),
            Part::inline_data("image/png", "c2Vjb25k"),
        ]);
        assert_eq!(
            first_image(&response).unwrap(),
            DataUrl::new("image/jpeg", "Zmlyc3Q=")
        );
    }

    #[test]
    fn test_first_image_defaults_mime_type() {
        let response = response_with_parts(vec![Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: None,
                data: "Zm9v".to_string(),
            }),
        }]);
        assert_eq!(first_image(&response).unwrap().to_string(), "data:image/png;base64,Zm9v");
    }

    #[test]
    fn test_first_image_without_candidates() {
        let response = GenerateContentResponse::default();
        assert!(matches!(first_image(&response), Err(ImageEditError::NoImageData)));
    }

    #[test]
    fn test_first_image_without_content() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate::default()],
        };
        assert!(matches!(first_image(&response), Err(ImageEditError::NoImageData)));
    }
}
