use axum::extract::{Multipart, multipart::MultipartRejection};
use medigate_core::domain::analysis::{AnalysisRequest, Attachment};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const IMAGE_FIELD: &str = "image";
pub const AFFECTED_AREA_FIELD: &str = "affectedArea";

/// Multipart form accepted by the image analysis endpoints.
///
/// Describes the form in the OpenAPI document only. The handlers read the
/// parts themselves through [`read_image_form`], keyed by [`IMAGE_FIELD`] and
/// [`AFFECTED_AREA_FIELD`].
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisForm {
    /// Photo to analyze, at most 5 MiB.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Free-text body area, used as context only.
    pub affected_area: Option<String>,
}

/// Reads the image form into an analysis request.
///
/// A request that is not multipart at all is treated like a form without an
/// image, so it is rejected later as missing its attachment.
pub async fn read_image_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisRequest, ApiError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            debug!("Request is not a multipart form: {}", rejection.body_text());
            return Ok(AnalysisRequest::image(None, None));
        }
    };

    let mut affected_area: Option<String> = None;
    let mut attachment: Option<Attachment> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            IMAGE_FIELD => {
                let media_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?;

                attachment = Some(Attachment::new(data, media_type)?);
            }
            AFFECTED_AREA_FIELD => {
                affected_area = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(AnalysisRequest::image(affected_area, attachment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    #[test]
    fn test_documented_form_fields_match_parsed_fields() {
        let schema = serde_json::to_value(ImageAnalysisForm::schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();

        assert!(properties.contains_key(IMAGE_FIELD));
        assert!(properties.contains_key(AFFECTED_AREA_FIELD));
        assert_eq!(properties.len(), 2);
    }
}
