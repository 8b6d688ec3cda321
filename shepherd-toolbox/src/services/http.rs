//! JSON queries and webhook delivery over HTTP.

use std::sync::LazyLock;
use std::time::Duration;

use serde_json::Value;

use crate::error::{ToolboxError, ToolboxResult};

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("shepherd/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_default()
});

/// Longest response body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn validate_url(url: &str) -> ToolboxResult<url::Url> {
    let parsed = url::Url::parse(url.trim())
        .map_err(|e| ToolboxError::ValidationError(format!("Invalid URL '{url}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ToolboxError::ValidationError(format!(
            "Unsupported URL scheme: {other}"
        ))),
    }
}

pub(crate) async fn get_json(
    url: &str,
    query: &[(&str, &str)],
    timeout: Duration,
) -> ToolboxResult<Value> {
    let url = validate_url(url)?;
    let response = HTTP_CLIENT
        .get(url)
        .query(query)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| request_error(&e, timeout))?;

    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("Failed to parse response: {e}")))
}

pub(crate) async fn post_json(url: &str, body: &Value, timeout: Duration) -> ToolboxResult<()> {
    let url = validate_url(url)?;
    let response = HTTP_CLIENT
        .post(url)
        .json(body)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| request_error(&e, timeout))?;

    check_status(response).await.map(|_| ())
}

fn request_error(error: &reqwest::Error, timeout: Duration) -> ToolboxError {
    if error.is_timeout() {
        ToolboxError::Timeout(timeout.as_secs())
    } else {
        ToolboxError::NetworkError(format!("Request failed: {error}"))
    }
}

async fn check_status(response: reqwest::Response) -> ToolboxResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(ToolboxError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_https() {
        let url = validate_url(" https://hooks.example.com/services/T000/B000 ").unwrap();
        assert_eq!(url.host_str(), Some("hooks.example.com"));
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        assert!(matches!(
            validate_url("ftp://example.com/file"),
            Err(ToolboxError::ValidationError(_))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(ToolboxError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_json_rejects_invalid_url_before_sending() {
        let result = get_json("mailto:ops@example.com", &[], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ToolboxError::ValidationError(_))));
    }
}
