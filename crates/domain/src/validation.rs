//! Field rules shared by the payload types.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{DomainError, DomainResult};

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2517\d{8}$").expect("valid regex"));

/// Parses an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] if the value does not parse, uses
/// another scheme, or has no host.
pub fn parse_http_url(value: &str) -> DomainResult<Url> {
    let url = Url::parse(value.trim()).map_err(|e| DomainError::InvalidUrl(format!("{e}: {value}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::InvalidUrl(format!(
            "URL must start with http:// or https://: {value}"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(DomainError::InvalidUrl(format!("URL has no host: {value}")));
    }
    Ok(url)
}

pub(crate) fn http_url(field: &'static str, value: &str) -> DomainResult<()> {
    parse_http_url(value)
        .map(|_| ())
        .map_err(|e| DomainError::invalid_field(field, e.to_string()))
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_field(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn max_chars(field: &'static str, value: &str, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::invalid_field(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Checks that `value` is all ASCII digits with a length in `min..=max`.
pub(crate) fn digits(field: &'static str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    let all_digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if !all_digits || value.len() < min || value.len() > max {
        let expected = if min == max {
            format!("exactly {min} digits")
        } else if max == usize::MAX {
            format!("at least {min} digits")
        } else {
            format!("{min} to {max} digits")
        };
        return Err(DomainError::invalid_field(field, format!("must be {expected}")));
    }
    Ok(())
}

pub(crate) fn phone_number(field: &'static str, value: &str) -> DomainResult<()> {
    if !PHONE_NUMBER.is_match(value) {
        return Err(DomainError::invalid_field(
            field,
            "must be in the format 2517XXXXXXXX",
        ));
    }
    Ok(())
}

pub(crate) fn shortcode_number(field: &'static str, value: u32) -> DomainResult<()> {
    if !(10_000..=999_999).contains(&value) {
        return Err(DomainError::invalid_field(field, "must be a 5-6 digit integer"));
    }
    Ok(())
}
