//! Id normalization.
//!
//! Every id that enters or queries a registry passes through
//! [`normalize_id`], so `"impute_mean"`, `"IMPUTE_MEAN"` and `" Impute_Mean "`
//! all address the same slot.

use crate::error::{EngineError, Result};

/// Normalize an id for storage and lookup: trim, then uppercase.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize an id, rejecting ids that are empty after trimming.
pub fn validate_id(raw: &str) -> Result<String> {
    let id = normalize_id(raw);
    if id.is_empty() {
        return Err(EngineError::validation("id must not be empty"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uppercases_and_trims() {
        assert_eq!(normalize_id("abc"), "ABC");
        assert_eq!(normalize_id("  Impute_Mean\n"), "IMPUTE_MEAN");
        assert_eq!(normalize_id("abc"), normalize_id("ABC"));
    }

    #[test]
    fn validate_rejects_blank() {
        assert!(validate_id("").is_err());
        assert!(validate_id("   ").is_err());
        assert_eq!(validate_id("csv").unwrap(), "CSV");
    }
}
