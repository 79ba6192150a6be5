use serde::de::IgnoredAny;
use url::{ParseError, Url};

use crate::error::ValidationError;

/// Checks that `input` is an absolute http(s) URL with a host.
pub fn validate_url(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let parsed = match Url::parse(input) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => return Err(ValidationError::MissingScheme),
        Err(ParseError::EmptyHost) => return Err(ValidationError::MissingHost),
        Err(e) => return Err(ValidationError::MalformedUrl(e.to_string())),
    };

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }

    // WHATWG parsing supplies a host for `http:example.com` and friends, so the
    // authority is also checked on the raw text.
    match (parsed.host_str(), raw_authority_host(input)) {
        (Some(host), Some(raw)) if !host.is_empty() && !raw.is_empty() => Ok(()),
        _ => Err(ValidationError::MissingHost),
    }
}

/// Host part of the `//authority` that must follow `scheme:`, without userinfo or port.
fn raw_authority_host(input: &str) -> Option<&str> {
    let (_, rest) = input.trim().split_once(':')?;
    let rest = rest.strip_prefix("//")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    if host_port.starts_with('[') {
        return host_port.split_inclusive(']').next();
    }
    host_port.split(':').next()
}

/// Syntactic JSON check: any single value is accepted, surrounding whitespace ignored.
pub fn validate_json_body(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBody);
    }

    serde_json::from_str::<IgnoredAny>(trimmed)
        .map(|_| ())
        .map_err(|e| ValidationError::MalformedJson(e.to_string()))
}

pub fn is_json_content_type(header_value: &str) -> bool {
    let content_type = header_value.trim().to_ascii_lowercase();
    content_type.contains("application/json") || content_type.contains("text/json")
}
