//! Wire types for the GitHub contents API.

use crate::domain::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Subset of `GET /repos/{owner}/{repo}/contents/{path}` used to capture the
/// current blob hash.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsMetadata {
    /// Blob SHA of the current file version.
    pub sha: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// `sha` is omitted to create a file and required to update one.
#[derive(Debug, Clone, Serialize)]
pub struct PutContentsRequest<'a> {
    pub message: &'a str,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub branch: &'a str,
}

/// Subset of the PUT response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutContentsResponse {
    #[serde(default)]
    pub content: Option<ShaRef>,
    #[serde(default)]
    pub commit: Option<ShaRef>,
}

/// Any API object identified by a SHA.
#[derive(Debug, Clone, Deserialize)]
pub struct ShaRef {
    pub sha: String,
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    /// Repository path written.
    pub path: String,
    /// Whether the write created the file rather than updating it.
    pub created: bool,
    /// Blob SHA of the new file version, when reported.
    pub content_sha: Option<String>,
    /// SHA of the commit that wrote it, when reported.
    pub commit_sha: Option<String>,
}

/// Encodes a value as base64 of its pretty-printed JSON (2-space indent).
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
///
/// # Examples
///
/// ```
/// use portfolio_sync::sync::encode_content;
///
/// let encoded = encode_content(&vec![1, 2])?;
/// assert_eq!(encoded, "WwogIDEsCiAgMgpd");
/// # Ok::<(), portfolio_sync::PortfolioError>(())
/// ```
pub fn encode_content<T: Serialize + ?Sized>(content: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(content)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pretty_json_with_two_space_indent() {
        let encoded = encode_content(&serde_json::json!({"title": "Ünïcode"})).unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, "{\n  \"title\": \"Ünïcode\"\n}");
    }

    #[test]
    fn create_request_omits_sha() {
        let body = PutContentsRequest {
            message: "msg",
            content: "e30=".to_string(),
            sha: None,
            branch: "main",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
        assert_eq!(json["branch"], "main");
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }
}
