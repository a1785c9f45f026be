//! Request DTOs for the gist proxy
//!
//! Raw pagination query parameters and their validated form.

use serde::Deserialize;

use crate::error::{ProxyError, Result};

/// Page requested when `page` is omitted
pub const DEFAULT_PAGE: u32 = 1;
/// Page size requested when neither `per_page` nor `pageSize` is given
pub const DEFAULT_PER_PAGE: u32 = 30;
/// Largest page size the upstream accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Query string of `GET /{username}`.
///
/// Values are kept as raw strings so that malformed numbers are reported as
/// validation failures naming the offending parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Page number, 1-based
    #[serde(default)]
    pub page: Option<String>,
    /// Page size, upstream spelling
    #[serde(default)]
    pub per_page: Option<String>,
    /// Page size, camel-case spelling; `per_page` wins when both are set
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<String>,
}

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ListQuery {
    /// Validates the query, applying defaults for absent parameters.
    ///
    /// Errors name the parameter as the caller spelled it.
    pub fn validate(&self) -> Result<PageParams> {
        let page = match &self.page {
            Some(raw) => parse_bounded("page", raw, 1, None)?,
            None => DEFAULT_PAGE,
        };

        let per_page = match (&self.per_page, &self.page_size) {
            (Some(raw), _) => parse_bounded("per_page", raw, 1, Some(MAX_PER_PAGE))?,
            (None, Some(raw)) => parse_bounded("pageSize", raw, 1, Some(MAX_PER_PAGE))?,
            (None, None) => DEFAULT_PER_PAGE,
        };

        Ok(PageParams { page, per_page })
    }
}

impl PageParams {
    /// Cache fingerprint of a listing request: `<username>-<page>-<per_page>`.
    pub fn cache_key(&self, username: &str) -> String {
        format!("{}-{}-{}", username, self.page, self.per_page)
    }
}

fn parse_bounded(field: &str, raw: &str, min: u32, max: Option<u32>) -> Result<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        ProxyError::validation(field, format!("{field} must be a valid integer, got '{raw}'"))
    })?;

    if value < i64::from(min) {
        return Err(ProxyError::validation(
            field,
            format!("{field} must be greater than or equal to {min}"),
        ));
    }
    if let Some(max) = max {
        if value > i64::from(max) {
            return Err(ProxyError::validation(
                field,
                format!("{field} must be less than or equal to {max}"),
            ));
        }
    }

    u32::try_from(value)
        .map_err(|_| ProxyError::validation(field, format!("{field} is out of range")))
}
