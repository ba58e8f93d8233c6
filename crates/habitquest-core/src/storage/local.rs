//! Guest-mode local mirror.
//!
//! Guest sessions have no remote identity; everything they own lives in a
//! single serialized JSON record under the app data dir -- the desktop
//! counterpart of the browser's `habit-quest-guest-data` localStorage key.
//! Every operation reads the whole record, mutates the relevant part and
//! rewrites the whole file. There are no incremental writes.
//!
//! A record that exists but fails to parse surfaces as
//! [`StoreError::Parse`]; callers treat that as "no data" and flag the
//! loss instead of crashing the session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{data_dir, HabitStore};
use crate::error::StoreError;
use crate::identity::Identity;
use crate::model::{HabitLog, Profile, ProfileUpdate, Snapshot, Stat};

/// Well-known record name inside the data dir.
pub const GUEST_RECORD_FILE: &str = "habit-quest-guest-data.json";

/// The serialized guest record.
///
/// Outer keys are camelCase; stat and log entries keep the snake_case
/// field names of the relational schema so both backends share the same
/// entity types. The title keys are optional so records written before
/// title tracking still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub character_name: String,
    pub avatar: String,
    pub total_xp: u32,
    pub onboarding_completed: bool,
    #[serde(default)]
    pub current_title: Option<String>,
    #[serde(default)]
    pub current_title_unlocked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub habit_logs: Vec<HabitLog>,
}

impl GuestRecord {
    /// A fresh record with the starter stat set, onboarding completed.
    pub fn starter(character_name: &str, avatar: &str) -> Self {
        let stat = |name: &str, emoji: &str, color: &str, desc: &str, index: i32| Stat {
            id: Uuid::new_v4(),
            stat_name: name.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
            habit_description: Some(desc.to_string()),
            order_index: index,
            total_points: 0,
        };
        Self {
            character_name: character_name.to_string(),
            avatar: avatar.to_string(),
            total_xp: 0,
            onboarding_completed: true,
            current_title: None,
            current_title_unlocked_at: None,
            stats: vec![
                stat("Strength", "💪", "#ef4444", "Daily workout", 0),
                stat("Intelligence", "📖", "#3b82f6", "Read ten pages", 1),
                stat("Discipline", "🧘", "#8b5cf6", "Meditate", 2),
                stat("Vitality", "💧", "#10b981", "Drink enough water", 3),
            ],
            habit_logs: Vec::new(),
        }
    }

    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            profile: Profile {
                character_name: self.character_name.clone(),
                avatar: self.avatar.clone(),
                total_xp: self.total_xp,
                onboarding_completed: self.onboarding_completed,
                current_title: self.current_title.clone(),
                current_title_unlocked_at: self.current_title_unlocked_at,
            },
            stats: self.stats.clone(),
            logs: self.habit_logs.clone(),
        }
    }
}

/// File-backed store for guest sessions.
pub struct LocalMirror {
    path: PathBuf,
}

impl LocalMirror {
    /// Mirror at the default data-dir location.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self {
            path: data_dir()?.join(GUEST_RECORD_FILE),
        })
    }

    /// Mirror backed by an explicit file.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed a fresh record, overwriting anything present. Used by
    /// onboarding, which is the only writer outside the store contract.
    pub fn initialize(&self, record: &GuestRecord) -> Result<(), StoreError> {
        self.write_record(record)
    }

    fn read_record(&self) -> Result<GuestRecord, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound)
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_record(&self, record: &GuestRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "guest record rewritten");
        Ok(())
    }

    fn check_identity(identity: &Identity) -> Result<(), StoreError> {
        if identity.is_anonymous() {
            return Err(StoreError::NotAuthenticated);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl HabitStore for LocalMirror {
    async fn load_snapshot(&self, identity: &Identity) -> Result<Snapshot, StoreError> {
        Self::check_identity(identity)?;
        Ok(self.read_record()?.to_snapshot())
    }

    async fn append_log(&self, identity: &Identity, log: &HabitLog) -> Result<(), StoreError> {
        Self::check_identity(identity)?;
        let mut record = self.read_record()?;
        record.habit_logs.push(log.clone());
        self.write_record(&record)
    }

    async fn increment_stat_points(
        &self,
        identity: &Identity,
        stat_id: Uuid,
        delta: u32,
    ) -> Result<(), StoreError> {
        Self::check_identity(identity)?;
        let mut record = self.read_record()?;
        if let Some(stat) = record.stats.iter_mut().find(|s| s.id == stat_id) {
            stat.total_points += delta;
        }
        self.write_record(&record)
    }

    async fn update_profile(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<(), StoreError> {
        Self::check_identity(identity)?;
        let mut record = self.read_record()?;
        if let Some(xp) = update.total_xp {
            record.total_xp = xp;
        }
        if let Some(ref title) = update.current_title {
            record.current_title = Some(title.clone());
        }
        if let Some(at) = update.current_title_unlocked_at {
            record.current_title_unlocked_at = Some(at);
        }
        if let Some(done) = update.onboarding_completed {
            record.onboarding_completed = done;
        }
        if let Some(ref name) = update.character_name {
            record.character_name = name.clone();
        }
        if let Some(ref avatar) = update.avatar {
            record.avatar = avatar.clone();
        }
        self.write_record(&record)
    }
}
