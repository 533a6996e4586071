use bytes::Bytes;

use crate::domain::{analysis::variant::Variant, common::entities::app_errors::CoreError};

/// Upper bound for an uploaded image, enforced before any other processing.
pub const MAX_ATTACHMENT_SIZE: usize = 5 * 1024 * 1024;

pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

pub const UNSPECIFIED_SUBJECT_AREA: &str = "unspecified";

#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Bytes,
    pub declared_media_type: String,
}

impl Attachment {
    pub fn new(bytes: Bytes, declared_media_type: Option<String>) -> Result<Self, CoreError> {
        if bytes.len() > MAX_ATTACHMENT_SIZE {
            return Err(CoreError::AttachmentTooLarge {
                max: MAX_ATTACHMENT_SIZE,
            });
        }

        let declared_media_type = declared_media_type
            .filter(|media_type| !media_type.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());

        Ok(Self {
            bytes,
            declared_media_type,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub subject_area: String,
    pub attachment: Option<Attachment>,
    pub raw_history_payload: Option<serde_json::Value>,
}

impl AnalysisRequest {
    pub fn image(subject_area: Option<String>, attachment: Option<Attachment>) -> Self {
        Self {
            subject_area: normalize_subject_area(subject_area),
            attachment,
            raw_history_payload: None,
        }
    }

    pub fn history(payload: serde_json::Value) -> Self {
        Self {
            subject_area: UNSPECIFIED_SUBJECT_AREA.to_string(),
            attachment: None,
            raw_history_payload: Some(payload),
        }
    }

    /// Rejects requests whose inputs do not match the variant, before any
    /// model call is made.
    pub fn validate_for(&self, variant: Variant) -> Result<(), CoreError> {
        if variant.descriptor().requires_attachment() {
            match &self.attachment {
                Some(attachment) if attachment.bytes.len() > MAX_ATTACHMENT_SIZE => {
                    Err(CoreError::AttachmentTooLarge {
                        max: MAX_ATTACHMENT_SIZE,
                    })
                }
                Some(attachment) if !attachment.bytes.is_empty() => Ok(()),
                _ => Err(CoreError::MissingAttachment),
            }
        } else if self.raw_history_payload.is_none() {
            Err(CoreError::InternalServerError(
                "history analysis requires a payload".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

fn normalize_subject_area(subject_area: Option<String>) -> String {
    subject_area
        .map(|area| area.trim().to_string())
        .filter(|area| !area.is_empty())
        .unwrap_or_else(|| UNSPECIFIED_SUBJECT_AREA.to_string())
}
