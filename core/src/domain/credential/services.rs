use crate::domain::{common::entities::app_errors::CoreError, credential::Credential};

/// Picks the key for one request: a non-blank header override wins over the
/// configured default.
pub fn resolve_credential(
    header_value: Option<&str>,
    configured_default: Option<&str>,
) -> Result<Credential, CoreError> {
    if let Some(value) = header_value
        && !value.trim().is_empty()
    {
        return Ok(Credential::new(value));
    }

    configured_default
        .filter(|value| !value.trim().is_empty())
        .map(Credential::new)
        .ok_or(CoreError::MissingCredential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_takes_precedence() {
        let credential = resolve_credential(Some("from-header"), Some("from-config")).unwrap();
        assert_eq!(credential.expose(), "from-header");
    }

    #[test]
    fn test_header_used_verbatim() {
        let credential = resolve_credential(Some(" padded "), None).unwrap();
        assert_eq!(credential.expose(), " padded ");
    }

    #[test]
    fn test_blank_header_falls_back_to_default() {
        let credential = resolve_credential(Some("   "), Some("from-config")).unwrap();
        assert_eq!(credential.expose(), "from-config");
    }

    #[test]
    fn test_missing_everywhere() {
        assert_eq!(
            resolve_credential(None, None),
            Err(CoreError::MissingCredential)
        );
        assert_eq!(
            resolve_credential(Some(""), Some("  ")),
            Err(CoreError::MissingCredential)
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("super-secret");
        assert!(!format!("{:?}", credential).contains("super-secret"));
    }
}
