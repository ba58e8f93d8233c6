//! Storage backends for profile, stat and habit-log entities.
//!
//! Two implementations share one contract:
//! - [`LocalMirror`]: a single serialized JSON record on disk, used by
//!   guest sessions
//! - [`RemoteStore`]: a relational HTTP backend, used by signed-in users
//!
//! Every contract call persists durably before returning Ok. Nothing
//! wraps multi-step workflows in a transaction: a failure mid-workflow
//! leaves earlier effects applied, and recovery is the reconciliation
//! step on next load, not rollback.

pub mod config;
pub mod local;
pub mod remote;

pub use config::Config;
pub use local::{GuestRecord, LocalMirror};
pub use remote::RemoteStore;

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::identity::Identity;
use crate::model::{HabitLog, ProfileUpdate, Snapshot};

/// Uniform contract over both backends.
///
/// All XP/tier/level math lives outside the backends, so both exercise
/// identical business rules.
#[async_trait]
pub trait HabitStore: Send + Sync {
    /// Fetch everything stored for `identity`.
    ///
    /// Returns `NotFound` when no profile exists yet.
    async fn load_snapshot(&self, identity: &Identity) -> Result<Snapshot, StoreError>;

    /// Append one habit-log row. The row is immutable once written.
    async fn append_log(&self, identity: &Identity, log: &HabitLog) -> Result<(), StoreError>;

    /// Add `delta` to a stat's point total. Unknown stat ids are a no-op.
    async fn increment_stat_points(
        &self,
        identity: &Identity,
        stat_id: Uuid,
        delta: u32,
    ) -> Result<(), StoreError>;

    /// Patch profile fields. Only fields present in the update change.
    async fn update_profile(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<(), StoreError>;
}

/// Returns `~/.config/habitquest[-dev]/` based on HABITQUEST_ENV.
///
/// Set HABITQUEST_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITQUEST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitquest-dev")
    } else {
        base_dir.join("habitquest")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
