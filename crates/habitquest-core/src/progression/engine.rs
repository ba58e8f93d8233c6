//! Habit-completion workflow.
//!
//! Per (stat, calendar day) the state machine is
//!
//! ```text
//! NotCompleted -> Completed
//! ```
//!
//! Completed is terminal until the local date rolls over. The dedup guard
//! runs against the caller's loaded snapshot of today's logs, not a
//! storage-side uniqueness constraint: two sessions racing the same day
//! can both pass it. That matches the shipped behavior; the storage-side
//! alternative is written up in DESIGN.md.
//!
//! Write ordering inside one completion: log append happens-before the
//! points increment happens-before the profile XP/title patch. A failure
//! aborts the remaining steps without compensating for the applied ones;
//! reconciliation on next load is the repair path.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::level::{level, leveled_up};
use super::titles::resolve_tier;
use crate::identity::Identity;
use crate::model::{HabitLog, ProfileUpdate, Snapshot};
use crate::storage::HabitStore;

/// Outcome of a completion attempt.
///
/// Guard violations and storage failures are data, not errors -- the
/// caller always gets a `Completion` back and decides what to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Completion {
    Completed {
        leveled_up: bool,
        new_level: u32,
        /// Present only when the completion crossed a tier threshold.
        new_title_unlocked: Option<String>,
    },
    Rejected {
        message: String,
    },
}

impl Completion {
    pub fn is_success(&self) -> bool {
        matches!(self, Completion::Completed { .. })
    }

    fn rejected(message: impl Into<String>) -> Self {
        Completion::Rejected {
            message: message.into(),
        }
    }
}

/// Record one completion of `stat_id` for `today`.
///
/// On success the cached snapshot is updated in place, in one step, after
/// every write has landed; on any failure the snapshot is left untouched,
/// so user-visible counters never move for a failed completion even when
/// some rows were already written.
pub async fn complete_stat(
    store: &dyn HabitStore,
    identity: &Identity,
    snapshot: &mut Snapshot,
    stat_id: Uuid,
    today: NaiveDate,
) -> Completion {
    if identity.is_anonymous() {
        return Completion::rejected("Not logged in");
    }

    // Sole concurrency guard: the caller's view of today's logs.
    if snapshot.has_log(stat_id, today) {
        return Completion::rejected("Already completed today!");
    }

    // Unknown stat ids are not fatal; the log just carries no snapshot.
    let stat = snapshot.stats.iter().find(|s| s.id == stat_id);
    let log = HabitLog {
        stat_id,
        completed_date: today,
        stat_name_snapshot: stat.map(|s| s.stat_name.clone()),
        habit_description_snapshot: stat.and_then(|s| s.habit_description.clone()),
    };

    if let Err(e) = store.append_log(identity, &log).await {
        return Completion::rejected(e.to_string());
    }
    if let Err(e) = store.increment_stat_points(identity, stat_id, 1).await {
        warn!(%stat_id, error = %e, "log appended but points increment failed");
        return Completion::rejected(e.to_string());
    }

    let old_xp = snapshot.profile.total_xp;
    let new_xp = old_xp + 1;
    let old_tier = resolve_tier(old_xp);
    let new_tier = resolve_tier(new_xp);
    let title_changed = new_tier.name != old_tier.name;

    let mut update = ProfileUpdate {
        total_xp: Some(new_xp),
        ..ProfileUpdate::default()
    };
    if title_changed || snapshot.profile.current_title.is_none() {
        // Either a real unlock, or backfilling a never-initialized title.
        update.current_title = Some(new_tier.name.to_string());
        update.current_title_unlocked_at = Some(Utc::now());
    }
    if let Err(e) = store.update_profile(identity, &update).await {
        warn!(error = %e, "log and points written but profile update failed");
        return Completion::rejected(e.to_string());
    }

    // All writes landed: fold the mutation into the cached snapshot.
    snapshot.logs.push(log);
    if let Some(stat) = snapshot.stats.iter_mut().find(|s| s.id == stat_id) {
        stat.total_points += 1;
    }
    update.apply_to(&mut snapshot.profile);

    debug!(%stat_id, new_xp, title_changed, "stat completed");
    Completion::Completed {
        leveled_up: leveled_up(old_xp, new_xp),
        new_level: level(new_xp),
        new_title_unlocked: title_changed.then(|| new_tier.name.to_string()),
    }
}
