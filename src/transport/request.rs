//! Request resolution and execution.

use log::debug;
use url::Url;

use super::strategy::{ends_with_separator, Transport};
use crate::config::TARGET_PLACEHOLDER;
use crate::error_handling::TransportError;

/// The concrete request a transport produces for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// URL actually requested.
    pub url: Url,
    /// Extra headers required by the relay.
    pub headers: Vec<(&'static str, String)>,
}

/// Computes the effective request for `target` under `transport`.
///
/// Pure and deterministic: the same inputs always resolve to the same request.
///
/// # Errors
///
/// `TransportError::EmptyTemplate` for a blank custom template and
/// `TransportError::InvalidUrl` if the result is not a valid URL.
pub fn resolve_request(target: &str, transport: &Transport) -> Result<ResolvedRequest, TransportError> {
    let (raw, headers) = match transport {
        Transport::Direct => (target.to_string(), Vec::new()),
        Transport::CorsAnywhere { relay, origin } => (
            format!("{}{}", relay, target),
            vec![
                ("Origin", origin.clone()),
                ("X-Requested-With", "XMLHttpRequest".to_string()),
            ],
        ),
        Transport::AllOrigins { relay } => (
            format!("{}?url={}", relay, urlencoding::encode(target)),
            Vec::new(),
        ),
        Transport::Custom { template } => (apply_template(template, target)?, Vec::new()),
    };

    let url = Url::parse(&raw).map_err(|source| TransportError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    Ok(ResolvedRequest { url, headers })
}

fn apply_template(template: &str, target: &str) -> Result<String, TransportError> {
    let template = template.trim();
    if template.is_empty() {
        return Err(TransportError::EmptyTemplate);
    }

    let encoded = urlencoding::encode(target);
    if template.contains(TARGET_PLACEHOLDER) {
        Ok(template.replacen(TARGET_PLACEHOLDER, &encoded, 1))
    } else if ends_with_separator(template) {
        Ok(format!("{}{}", template, encoded))
    } else {
        Ok(format!("{}/{}", template, encoded))
    }
}

/// Fetches `target` through `transport` and returns the response body as text.
///
/// No retry happens here.
///
/// # Errors
///
/// - `TransportError::HttpStatus` when the final response is not a success
/// - `TransportError::Request` when the request fails before a status arrives
/// - resolution errors from [`resolve_request`]
pub async fn fetch_text(
    client: &reqwest::Client,
    target: &str,
    transport: &Transport,
) -> Result<String, TransportError> {
    let request = resolve_request(target, transport)?;
    debug!("GET {} via {} transport", request.url, transport);

    let mut builder = client.get(request.url);
    for (name, value) in &request.headers {
        builder = builder.header(*name, value);
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::HttpStatus {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}
