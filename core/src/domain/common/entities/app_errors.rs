use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(
        "Missing API key. Send an x-api-key header or configure GEMINI_API_KEY on the server"
    )]
    MissingCredential,

    #[error("Missing image file")]
    MissingAttachment,

    #[error("Image too large. Max size is {max} bytes")]
    AttachmentTooLarge { max: usize },

    #[error("Upstream status {status}: {body}")]
    UpstreamRejected { status: u16, body: String },

    #[error("LLM transport failure: {0}")]
    TransportFailure(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Model output that could not be turned into a structured document.
///
/// Never leaves the core: the analysis pipeline answers it with a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("model returned no text")]
    Empty,

    #[error("no JSON document found in model output")]
    NoDocument,

    #[error("model output is not a JSON object")]
    NotAnObject,
}
