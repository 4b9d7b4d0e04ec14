//! ISO 17442 LEI format check

use regex::Regex;
use std::sync::LazyLock;

/// 18 upper-case alphanumerics followed by two check digits
static LEI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{18}[0-9]{2}$").unwrap());

/// Syntactic check only; the check digits are not verified.
pub fn is_valid_lei(lei: &str) -> bool {
    LEI_RE.is_match(lei)
}
