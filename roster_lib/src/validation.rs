//! Validation of user-supplied list parameters.

use crate::error::RosterError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_FILTER_KEY_LENGTH: usize = 40;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_RECORD_ID_LENGTH: usize = 64;

/// Parameter names the list endpoints reserve for paging, search and sort.
pub const RESERVED_KEYS: &[&str] = &["page", "pageSize", "search", "sortBy", "sortOrder"];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, RosterError> {
    if input.len() > max_len {
        return Err(RosterError::InvalidArgument(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    Ok(sanitized)
}

/// Validate a search string: enforce length, strip control chars, trim.
/// An empty result clears the search.
pub fn validate_search(input: &str) -> Result<String, RosterError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, RosterError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(RosterError::InvalidArgument(format!(
            "page size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate a field name used for sorting or filtering: ASCII letters,
/// digits, `_` and `-`, not one of the [`RESERVED_KEYS`].
pub fn validate_field(input: &str) -> Result<String, RosterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_FILTER_KEY_LENGTH {
        return Err(RosterError::InvalidArgument(format!(
            "field name must be 1 to {} characters",
            MAX_FILTER_KEY_LENGTH
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RosterError::InvalidArgument(format!(
            "field name '{}' may only contain letters, digits, '_' and '-'",
            trimmed
        )));
    }
    if RESERVED_KEYS.contains(&trimmed) {
        return Err(RosterError::InvalidArgument(format!(
            "'{}' is reserved for paging and sorting",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a record identifier that becomes a path segment: ASCII letters,
/// digits, `_` and `-` only.
pub fn validate_record_id(input: &str) -> Result<String, RosterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_RECORD_ID_LENGTH {
        return Err(RosterError::InvalidArgument(format!(
            "record id must be 1 to {} characters",
            MAX_RECORD_ID_LENGTH
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RosterError::InvalidArgument(format!(
            "record id '{}' may only contain letters, digits, '_' and '-'",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse a `key=value` filter. An empty value is allowed and means "no constraint".
pub fn parse_filter(input: &str) -> Result<(String, String), RosterError> {
    let Some((key, value)) = input.split_once('=') else {
        return Err(RosterError::InvalidArgument(format!(
            "filter '{}' must look like key=value",
            input
        )));
    };
    let key = validate_field(key)?;
    let value = sanitize_text(value, MAX_SEARCH_LENGTH)?;
    Ok((key, value))
}
