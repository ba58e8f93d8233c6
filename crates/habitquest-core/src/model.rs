//! Entities shared by both storage backends.
//!
//! Field names match the relational schema (snake_case) so the remote
//! store deserializes rows straight into these types; the guest mirror
//! wraps the same types in its own envelope, see [`crate::storage::local`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's character sheet.
///
/// `total_xp` is the count of all habit-log entries (one point per
/// completion). `current_title` lags the XP-derived tier only until the
/// next reconciliation write lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub character_name: String,
    pub avatar: String,
    pub total_xp: u32,
    pub onboarding_completed: bool,
    #[serde(default)]
    pub current_title: Option<String>,
    #[serde(default)]
    pub current_title_unlocked_at: Option<DateTime<Utc>>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            character_name: "Hero".to_string(),
            avatar: "🧑‍🚀".to_string(),
            total_xp: 0,
            onboarding_completed: false,
            current_title: None,
            current_title_unlocked_at: None,
        }
    }
}

/// A tracked habit category with its own point total.
///
/// `order_index` defines display order; `total_points` only ever grows
/// outside an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub id: Uuid,
    pub stat_name: String,
    pub emoji: String,
    pub color: String,
    #[serde(default)]
    pub habit_description: Option<String>,
    pub order_index: i32,
    pub total_points: u32,
}

/// One completion of one stat on one calendar day.
///
/// Immutable once written. Name/description are snapshotted from the stat
/// at completion time so later renames don't rewrite history. At most one
/// log may exist per (stat_id, completed_date) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub stat_id: Uuid,
    pub completed_date: NaiveDate,
    #[serde(default)]
    pub stat_name_snapshot: Option<String>,
    #[serde(default)]
    pub habit_description_snapshot: Option<String>,
}

/// Partial profile patch applied through the storage contract.
///
/// Absent fields are left untouched by the backend; on the wire only the
/// present fields are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_xp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title_unlocked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Apply the patch to an in-memory profile.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(xp) = self.total_xp {
            profile.total_xp = xp;
        }
        if let Some(ref title) = self.current_title {
            profile.current_title = Some(title.clone());
        }
        if let Some(at) = self.current_title_unlocked_at {
            profile.current_title_unlocked_at = Some(at);
        }
        if let Some(done) = self.onboarding_completed {
            profile.onboarding_completed = done;
        }
        if let Some(ref name) = self.character_name {
            profile.character_name = name.clone();
        }
        if let Some(ref avatar) = self.avatar {
            profile.avatar = avatar.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything a backend returns for one identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub profile: Profile,
    pub stats: Vec<Stat>,
    pub logs: Vec<HabitLog>,
}

impl Snapshot {
    /// Logs for one calendar day.
    pub fn logs_on<'a>(&'a self, date: NaiveDate) -> impl Iterator<Item = &'a HabitLog> {
        self.logs.iter().filter(move |l| l.completed_date == date)
    }

    /// Whether a log already exists for (stat, day).
    pub fn has_log(&self, stat_id: Uuid, date: NaiveDate) -> bool {
        self.logs
            .iter()
            .any(|l| l.stat_id == stat_id && l.completed_date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(stat_id: Uuid, date: &str) -> HabitLog {
        HabitLog {
            stat_id,
            completed_date: date.parse().unwrap(),
            stat_name_snapshot: None,
            habit_description_snapshot: None,
        }
    }

    #[test]
    fn profile_update_applies_only_present_fields() {
        let mut profile = Profile {
            total_xp: 4,
            current_title: Some("New Traveler".to_string()),
            ..Profile::default()
        };
        let update = ProfileUpdate {
            total_xp: Some(5),
            ..ProfileUpdate::default()
        };
        update.apply_to(&mut profile);
        assert_eq!(profile.total_xp, 5);
        assert_eq!(profile.current_title.as_deref(), Some("New Traveler"));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            avatar: Some("🦊".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn snapshot_filters_logs_by_day() {
        let stat = Uuid::new_v4();
        let other = Uuid::new_v4();
        let snapshot = Snapshot {
            logs: vec![
                log(stat, "2026-08-05"),
                log(stat, "2026-08-06"),
                log(other, "2026-08-06"),
            ],
            ..Snapshot::default()
        };
        let today: NaiveDate = "2026-08-06".parse().unwrap();
        assert_eq!(snapshot.logs_on(today).count(), 2);
        assert!(snapshot.has_log(stat, today));
        assert!(!snapshot.has_log(stat, "2026-08-07".parse().unwrap()));
    }

    #[test]
    fn habit_log_serializes_date_as_plain_calendar_day() {
        let entry = log(Uuid::nil(), "2026-08-06");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["completed_date"], "2026-08-06");
    }
}
