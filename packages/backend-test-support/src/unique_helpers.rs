//! Helpers for generating unique test data.

use ulid::Ulid;

/// Generate a unique player name with the given prefix.
///
/// Names stay within the backend's 32-character limit: the prefix is cut to
/// 5 characters and followed by the 26-character ULID.
///
/// ```
/// use colorpass_test_support::unique_helpers::unique_name;
///
/// let a = unique_name("alice");
/// let b = unique_name("alice");
/// assert_ne!(a, b);
/// assert!(a.len() <= 32);
/// ```
pub fn unique_name(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(5).collect();
    format!("{prefix}-{}", Ulid::new())
}
