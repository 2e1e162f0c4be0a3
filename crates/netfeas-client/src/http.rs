use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};

use crate::error::ClientError;

pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parse `base_url`, forcing exactly one trailing slash so that `Url::join`
/// appends to the path instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path).map_err(|e| ClientError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

/// Send `request`, reject non-2xx statuses and parse the body as JSON.
pub(crate) async fn send_json(
    request: RequestBuilder,
    context: &str,
) -> Result<serde_json::Value, ClientError> {
    let (body, status, url) = send_text(request).await?;
    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        });
    }
    parse_body(&body, context)
}

/// Like [`send_json`] but also hands back the status, for endpoints that
/// carry a JSON error envelope on 4xx/5xx responses.
pub(crate) async fn send_json_any_status(
    request: RequestBuilder,
    context: &str,
) -> Result<(reqwest::StatusCode, serde_json::Value), ClientError> {
    let (body, status, url) = send_text(request).await?;
    match parse_body(&body, context) {
        Ok(value) => Ok((status, value)),
        Err(_) if !status.is_success() => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        }),
        Err(e) => Err(e),
    }
}

async fn send_text(
    request: RequestBuilder,
) -> Result<(String, reqwest::StatusCode, String), ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;
    Ok((body, status, url))
}

fn parse_body(body: &str, context: &str) -> Result<serde_json::Value, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_url_adds_single_trailing_slash() {
        let url = parse_base_url("https://inventory.example.com/api//").expect("url");
        assert_eq!(url.as_str(), "https://inventory.example.com/api/");
        let joined = join(&url, "rest/v1/pco").expect("join");
        assert_eq!(
            joined.as_str(),
            "https://inventory.example.com/api/rest/v1/pco"
        );
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }
}
