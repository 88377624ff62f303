//! Embedded PostgreSQL for integration tests.
//!
//! Each suite shares one unprivileged cluster per test binary and gets a
//! fresh database per test, so no suite needs to truncate tables. When the
//! cluster cannot start, `SKIP_TEST_CLUSTER=1` turns the failure into a
//! `SKIP-TEST-CLUSTER` marker; otherwise the test fails loudly.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true", or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Print a skip marker and return `None` when skipping is allowed, otherwise
/// panic with `reason`.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create an empty database on the shared embedded cluster.
///
/// Must be called outside a Tokio runtime; the cluster bootstrap blocks.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    let cluster =
        shared_cluster_handle().map_err(|err| format!("start embedded cluster: {err:?}"))?;
    cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create temporary database: {err:?}"))
}
