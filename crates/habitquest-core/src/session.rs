//! Session state container.
//!
//! One UI context drives one `Session`. The session owns the active
//! storage backend and the last loaded snapshot; the progression engine
//! is the only mutation path and updates the snapshot atomically per
//! operation, so readers never observe a half-applied completion.
//!
//! Callers are expected to await each mutation before issuing the next;
//! the session provides no internal locking across them.

use chrono::{Local, NaiveDate};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{CoreError, StoreError};
use crate::identity::Identity;
use crate::model::{HabitLog, Profile, Snapshot, Stat};
use crate::progression::{
    complete_stat, level, progress_within_level, reconcile_title, xp_to_next_level, Completion,
    Reconciliation,
};
use crate::storage::{Config, HabitStore, LocalMirror, RemoteStore};

/// The current local calendar date. Per-day completion state rolls over
/// at this boundary, not on a 24h window.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Per-identity session over one storage backend.
pub struct Session {
    identity: Identity,
    store: Box<dyn HabitStore>,
    snapshot: Option<Snapshot>,
    loading: bool,
    data_lost: bool,
}

impl Session {
    /// Session over an explicit backend. State is empty until
    /// [`Session::load`] runs.
    pub fn new(identity: Identity, store: Box<dyn HabitStore>) -> Self {
        Self {
            identity,
            store,
            snapshot: None,
            loading: true,
            data_lost: false,
        }
    }

    /// Wire up the backend the configuration selects: remote store for a
    /// configured user id, local mirror otherwise.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let identity = config.identity();
        let store: Box<dyn HabitStore> = match identity {
            Identity::User(_) => Box::new(RemoteStore::from_config(&config.remote)?),
            _ => Box::new(LocalMirror::open()?),
        };
        Ok(Self::new(identity, store))
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch state from the backend and reconcile title drift before
    /// exposing it.
    ///
    /// Never fails the session: backend errors degrade to empty state
    /// with the loading flag cleared. A corrupt mirror record flags
    /// `data_lost` so the caller can tell the user.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.store.load_snapshot(&self.identity).await {
            Ok(mut snapshot) => {
                reconcile_title(
                    self.store.as_ref(),
                    &self.identity,
                    &mut snapshot.profile,
                )
                .await;
                snapshot.stats.sort_by_key(|s| s.order_index);
                self.snapshot = Some(snapshot);
            }
            Err(StoreError::NotFound) => {
                self.snapshot = None;
            }
            Err(e @ StoreError::Parse { .. }) => {
                warn!(error = %e, "mirror record unreadable; continuing with empty state");
                self.data_lost = true;
                self.snapshot = None;
            }
            Err(e) => {
                error!(error = %e, "failed to load session state");
                self.snapshot = None;
            }
        }
        self.loading = false;
    }

    /// Reload from the backend (alias mirroring the UI surface).
    pub async fn refetch(&mut self) {
        self.load().await;
    }

    /// Explicit reconciliation pass against the loaded profile.
    pub async fn reconcile(&mut self) -> Reconciliation {
        let Self {
            identity,
            store,
            snapshot,
            ..
        } = self;
        match snapshot.as_mut() {
            Some(snapshot) => {
                reconcile_title(store.as_ref(), identity, &mut snapshot.profile).await
            }
            None => Reconciliation::AlreadyConsistent,
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Complete `stat_id` for today. See [`crate::progression::engine`].
    pub async fn complete_stat(&mut self, stat_id: Uuid) -> Completion {
        let date = today();
        let Self {
            identity,
            store,
            snapshot,
            ..
        } = self;
        let Some(snapshot) = snapshot.as_mut() else {
            return Completion::Rejected {
                message: "No data found".to_string(),
            };
        };
        complete_stat(store.as_ref(), identity, snapshot, stat_id, date).await
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.snapshot.as_ref().map(|s| &s.profile)
    }

    pub fn stats(&self) -> &[Stat] {
        self.snapshot.as_ref().map(|s| s.stats.as_slice()).unwrap_or(&[])
    }

    pub fn all_logs(&self) -> &[HabitLog] {
        self.snapshot.as_ref().map(|s| s.logs.as_slice()).unwrap_or(&[])
    }

    /// Logs whose completion date is the current local calendar date.
    pub fn today_logs(&self) -> Vec<&HabitLog> {
        let date = today();
        match &self.snapshot {
            Some(snapshot) => snapshot.logs_on(date).collect(),
            None => Vec::new(),
        }
    }

    /// Whether `stat_id` can still be completed today.
    pub fn can_complete(&self, stat_id: Uuid) -> bool {
        match &self.snapshot {
            Some(snapshot) => !snapshot.has_log(stat_id, today()),
            None => false,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// True when a stored record existed but could not be read.
    pub fn data_lost(&self) -> bool {
        self.data_lost
    }

    fn total_xp(&self) -> u32 {
        self.profile().map(|p| p.total_xp).unwrap_or(0)
    }

    pub fn level(&self) -> u32 {
        level(self.total_xp())
    }

    /// Progress within the current level, 0-100.
    pub fn xp_progress(&self) -> f64 {
        progress_within_level(self.total_xp())
    }

    pub fn xp_to_next_level(&self) -> u32 {
        xp_to_next_level(self.total_xp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::{GuestRecord, LocalMirror, GUEST_RECORD_FILE};

    fn guest_session(dir: &tempfile::TempDir, record: Option<&GuestRecord>) -> Session {
        let mirror = LocalMirror::at_path(dir.path().join(GUEST_RECORD_FILE));
        if let Some(record) = record {
            mirror.initialize(record).unwrap();
        }
        Session::new(Identity::Guest, Box::new(mirror))
    }

    #[tokio::test]
    async fn empty_backend_degrades_to_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = guest_session(&dir, None);
        assert!(session.loading());

        session.load().await;
        assert!(!session.loading());
        assert!(!session.data_lost());
        assert!(session.profile().is_none());
        assert!(session.stats().is_empty());
        assert_eq!(session.level(), 1);
        assert_eq!(session.xp_to_next_level(), 10);
    }

    #[tokio::test]
    async fn corrupt_backend_flags_data_lost_but_clears_loading() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GUEST_RECORD_FILE), "not json").unwrap();
        let mut session = guest_session(&dir, None);
        session.load().await;
        assert!(!session.loading());
        assert!(session.data_lost());
        assert!(session.profile().is_none());
    }

    #[tokio::test]
    async fn load_reconciles_title_before_exposing_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = GuestRecord::starter("Hero", "🧑‍🚀");
        record.total_xp = 150;
        record.current_title = Some("New Traveler".to_string());
        let mut session = guest_session(&dir, Some(&record));

        session.load().await;
        assert_eq!(
            session.profile().unwrap().current_title.as_deref(),
            Some("Iron Will")
        );
    }

    #[tokio::test]
    async fn mutation_without_loaded_data_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = guest_session(&dir, None);
        session.load().await;
        let outcome = session.complete_stat(Uuid::new_v4()).await;
        assert_eq!(
            outcome,
            Completion::Rejected {
                message: "No data found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn can_complete_flips_after_completion() {
        let dir = tempfile::tempdir().unwrap();
        let record = GuestRecord::starter("Hero", "🧑‍🚀");
        let stat_id = record.stats[0].id;
        let mut session = guest_session(&dir, Some(&record));
        session.load().await;

        assert!(session.can_complete(stat_id));
        assert!(session.today_logs().is_empty());

        let outcome = session.complete_stat(stat_id).await;
        assert!(outcome.is_success());
        assert!(!session.can_complete(stat_id));
        assert_eq!(session.today_logs().len(), 1);
        assert_eq!(session.all_logs().len(), 1);
    }

    #[tokio::test]
    async fn derived_values_follow_profile_xp() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = GuestRecord::starter("Hero", "🧑‍🚀");
        record.total_xp = 25;
        let mut session = guest_session(&dir, Some(&record));
        session.load().await;

        assert_eq!(session.level(), 3);
        assert_eq!(session.xp_progress(), 50.0);
        assert_eq!(session.xp_to_next_level(), 5);
    }

    #[tokio::test]
    async fn stats_are_exposed_in_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = GuestRecord::starter("Hero", "🧑‍🚀");
        record.stats.reverse(); // stored out of order
        let mut session = guest_session(&dir, Some(&record));
        session.load().await;

        let indexes: Vec<i32> = session.stats().iter().map(|s| s.order_index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }
}
