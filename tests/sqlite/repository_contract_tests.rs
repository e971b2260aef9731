//! Repository contract checks against [`SqliteTaskRepository`].
//!
//! [`SqliteTaskRepository`]: taskflow::task::adapters::sqlite::SqliteTaskRepository

use super::helpers::{BoxError, SqliteHarness, harness};
use crate::test_helpers;
use eyre::eyre;
use rstest::rstest;

fn unwrap_harness(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<SqliteHarness> {
    harness.map_err(|err| eyre!("sqlite harness setup failed: {err}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_assigns_identity(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_add_assigns_identity(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_newest_first(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_list_is_newest_first(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_fields(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_update_replaces_fields(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_preserves_created_at(
    harness: Result<SqliteHarness, BoxError>,
) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_update_preserves_created_at(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_records_are_not_errors(
    harness: Result<SqliteHarness, BoxError>,
) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_missing_records_are_not_errors(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_is_hard(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_delete_is_hard(&harness.repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn field_limits_are_enforced(harness: Result<SqliteHarness, BoxError>) -> eyre::Result<()> {
    let harness = unwrap_harness(harness)?;
    test_helpers::check_field_limits(&harness.repo).await
}
