//! Unique test data, so suites sharing a database never collide.

use ulid::Ulid;

/// A unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A unique card name, for ban lists that must not clash across tests.
///
/// ```
/// use backend_test_support::unique_helpers::unique_card_name;
///
/// assert!(unique_card_name("Opt").starts_with("Opt "));
/// ```
pub fn unique_card_name(base: &str) -> String {
    format!("{} {}", base, Ulid::new())
}
