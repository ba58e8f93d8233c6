//! Title reconciliation.
//!
//! Stored titles can go stale: a crashed completion, a partial failure
//! after the log insert, or data written by a build that predates title
//! tracking. On load the title is recomputed from XP and the correction
//! is written back before the snapshot reaches callers. The correction is
//! silent; a failed correction write is logged and the computed value is
//! exposed anyway, to be retried on the next load.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};

use super::titles::resolve_tier;
use crate::identity::Identity;
use crate::model::{Profile, ProfileUpdate};
use crate::storage::HabitStore;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Stored title already matched the XP-derived tier.
    AlreadyConsistent,
    /// Stored title was absent or stale and has been rewritten.
    Corrected {
        previous: Option<String>,
        current: String,
    },
}

/// Align `profile.current_title` with the tier resolved from its XP.
///
/// Mutates the profile in place to the corrected values; persistence
/// failures do not block exposure, only delay durability.
pub async fn reconcile_title(
    store: &dyn HabitStore,
    identity: &Identity,
    profile: &mut Profile,
) -> Reconciliation {
    let computed = resolve_tier(profile.total_xp).name;
    if profile.current_title.as_deref() == Some(computed) {
        debug!(title = computed, "stored title already consistent");
        return Reconciliation::AlreadyConsistent;
    }

    let previous = profile.current_title.clone();
    let unlocked_at = Utc::now();
    let update = ProfileUpdate {
        current_title: Some(computed.to_string()),
        current_title_unlocked_at: Some(unlocked_at),
        ..ProfileUpdate::default()
    };
    if let Err(e) = store.update_profile(identity, &update).await {
        warn!(error = %e, "title correction not persisted; exposing computed value");
    }

    profile.current_title = Some(computed.to_string());
    profile.current_title_unlocked_at = Some(unlocked_at);
    debug!(?previous, current = computed, "title reconciled");
    Reconciliation::Corrected {
        previous,
        current: computed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::local::{GuestRecord, LocalMirror};
    use crate::storage::HabitStore;

    async fn drifted_setup(
        total_xp: u32,
        stored_title: Option<&str>,
    ) -> (tempfile::TempDir, LocalMirror, Profile) {
        let dir = tempfile::tempdir().unwrap();
        let mirror = LocalMirror::at_path(dir.path().join("guest.json"));
        let mut record = GuestRecord::starter("Hero", "🧑‍🚀");
        record.total_xp = total_xp;
        record.current_title = stored_title.map(str::to_string);
        record.current_title_unlocked_at = stored_title
            .map(|_| "2026-08-01T10:00:00Z".parse::<chrono::DateTime<Utc>>().unwrap());
        mirror.initialize(&record).unwrap();
        let profile = mirror
            .load_snapshot(&Identity::Guest)
            .await
            .unwrap()
            .profile;
        (dir, mirror, profile)
    }

    #[tokio::test]
    async fn stale_title_is_corrected_and_persisted() {
        let (_dir, mirror, mut profile) = drifted_setup(150, Some("New Traveler")).await;
        let outcome = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;

        assert_eq!(
            outcome,
            Reconciliation::Corrected {
                previous: Some("New Traveler".to_string()),
                current: "Iron Will".to_string(),
            }
        );
        assert_eq!(profile.current_title.as_deref(), Some("Iron Will"));

        let stored = mirror.load_snapshot(&Identity::Guest).await.unwrap();
        assert_eq!(stored.profile.current_title.as_deref(), Some("Iron Will"));
        assert!(stored.profile.current_title_unlocked_at.is_some());
    }

    #[tokio::test]
    async fn absent_title_is_backfilled() {
        let (_dir, mirror, mut profile) = drifted_setup(0, None).await;
        let outcome = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;
        assert_eq!(
            outcome,
            Reconciliation::Corrected {
                previous: None,
                current: "New Traveler".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn reconciliation_is_idempotent() {
        let (_dir, mirror, mut profile) = drifted_setup(600, Some("Iron Will")).await;
        let first = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;
        assert!(matches!(first, Reconciliation::Corrected { .. }));
        let profile_after_first = profile.clone();

        let second = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;
        assert_eq!(second, Reconciliation::AlreadyConsistent);
        assert_eq!(profile, profile_after_first);
    }

    #[tokio::test]
    async fn consistent_title_keeps_its_unlock_timestamp() {
        let (_dir, mirror, mut profile) = drifted_setup(50, Some("Rising Flame")).await;
        let before = profile.current_title_unlocked_at;
        let outcome = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;
        assert_eq!(outcome, Reconciliation::AlreadyConsistent);
        assert_eq!(profile.current_title_unlocked_at, before);
    }

    #[tokio::test]
    async fn failed_correction_write_still_exposes_computed_title() {
        let (_dir, mirror, mut profile) = drifted_setup(150, Some("New Traveler")).await;
        // Corrupt the record so update_profile fails to read it back.
        std::fs::write(mirror.path(), "{ broken").unwrap();

        let outcome = reconcile_title(&mirror, &Identity::Guest, &mut profile).await;
        assert!(matches!(outcome, Reconciliation::Corrected { .. }));
        assert_eq!(profile.current_title.as_deref(), Some("Iron Will"));
    }
}
