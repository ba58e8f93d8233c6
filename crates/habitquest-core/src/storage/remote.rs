//! Remote store: relational backend reached over HTTP.
//!
//! Speaks the PostgREST dialect against three tables (`profiles`,
//! `stats`, `habit_log`), every row filtered by the stable user id.
//! Each contract operation is a discrete round-trip; nothing spans calls
//! transactionally. When a workflow fails halfway (log inserted, profile
//! patch refused) the error is surfaced as-is and the already-applied
//! rows stay applied -- reconciliation on next load is the repair path.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::HabitStore;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::model::{HabitLog, Profile, ProfileUpdate, Snapshot, Stat};

/// HTTP client for the remote relational store.
#[derive(Debug)]
pub struct RemoteStore {
    base_url: String,
    api_key: String,
    http: Client,
}

impl RemoteStore {
    /// Create a store against a REST root, e.g. `https://x.example.co/rest/v1`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http: Client::new(),
        })
    }

    pub fn from_config(config: &super::config::RemoteConfig) -> Result<Self, StoreError> {
        Self::new(&config.base_url, &config.api_key)
    }

    fn table(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn require_user(identity: &Identity) -> Result<Uuid, StoreError> {
        identity.user_id().ok_or(StoreError::NotAuthenticated)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_rows<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .authed(self.http.get(self.table(table)))
            .query(query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait::async_trait]
impl HabitStore for RemoteStore {
    async fn load_snapshot(&self, identity: &Identity) -> Result<Snapshot, StoreError> {
        let user_id = Self::require_user(identity)?;

        let profiles: Vec<Profile> = self
            .fetch_rows(
                "profiles",
                &[("id", format!("eq.{user_id}")), ("select", "*".to_string())],
            )
            .await?;
        let profile = profiles.into_iter().next().ok_or(StoreError::NotFound)?;

        let stats: Vec<Stat> = self
            .fetch_rows(
                "stats",
                &[
                    ("user_id", format!("eq.{user_id}")),
                    ("order", "order_index.asc".to_string()),
                ],
            )
            .await?;

        let logs: Vec<HabitLog> = self
            .fetch_rows(
                "habit_log",
                &[
                    ("user_id", format!("eq.{user_id}")),
                    (
                        "select",
                        "stat_id,completed_date,stat_name_snapshot,habit_description_snapshot"
                            .to_string(),
                    ),
                ],
            )
            .await?;

        debug!(stats = stats.len(), logs = logs.len(), "remote snapshot loaded");
        Ok(Snapshot {
            profile,
            stats,
            logs,
        })
    }

    async fn append_log(&self, identity: &Identity, log: &HabitLog) -> Result<(), StoreError> {
        let user_id = Self::require_user(identity)?;
        let mut row = serde_json::to_value(log)?;
        row["user_id"] = json!(user_id);

        let response = self
            .authed(self.http.post(self.table("habit_log")))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn increment_stat_points(
        &self,
        identity: &Identity,
        stat_id: Uuid,
        delta: u32,
    ) -> Result<(), StoreError> {
        Self::require_user(identity)?;

        // The table has no atomic increment; read the current total and
        // patch the sum, mirroring the snapshot-valued update the rest of
        // the workflow uses.
        #[derive(Deserialize)]
        struct PointsRow {
            total_points: u32,
        }
        let rows: Vec<PointsRow> = self
            .fetch_rows(
                "stats",
                &[
                    ("id", format!("eq.{stat_id}")),
                    ("select", "total_points".to_string()),
                ],
            )
            .await?;
        let Some(current) = rows.into_iter().next() else {
            return Ok(()); // unknown stat: no-op per contract
        };

        let response = self
            .authed(self.http.patch(self.table("stats")))
            .query(&[("id", format!("eq.{stat_id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "total_points": current.total_points + delta }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update_profile(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<(), StoreError> {
        let user_id = Self::require_user(identity)?;
        if update.is_empty() {
            return Ok(());
        }

        let response = self
            .authed(self.http.patch(self.table("profiles")))
            .query(&[("id", format!("eq.{user_id}"))])
            .header("Prefer", "return=minimal")
            .json(update)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
