//! Rejection taxonomy for candidate extraction.
//!
//! Rejections are the expected, frequent outcome of probing untrusted markup.
//! They are inspectable values rather than logged strings so callers and
//! tests can assert on the reason; none of them ever aborts a listing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("no usable name found in candidate")]
    NoName,

    #[error("name '{name}' shorter than {min_length} after cleanup")]
    NameTooShortAfterCleanup { name: String, min_length: usize },

    #[error("no price token found in candidate text")]
    NoPrice,

    #[error("name '{name}' does not contain required keyword '{keyword}'")]
    CategoryMismatch { name: String, keyword: String },

    #[error("malformed candidate fragment: {reason}")]
    MalformedFragment { reason: String },
}

impl Rejection {
    pub fn name_too_short(name: &str, min_length: usize) -> Self {
        Self::NameTooShortAfterCleanup {
            name: name.to_string(),
            min_length,
        }
    }

    pub fn category_mismatch(name: &str, keyword: &str) -> Self {
        Self::CategoryMismatch {
            name: name.to_string(),
            keyword: keyword.to_string(),
        }
    }

    pub fn malformed(reason: &str) -> Self {
        Self::MalformedFragment {
            reason: reason.to_string(),
        }
    }
}

pub type ExtractResult<T> = Result<T, Rejection>;
