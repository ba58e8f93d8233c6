//! CLI subcommand implementations.

pub mod complete;
pub mod config;
pub mod init;
pub mod log;
pub mod reconcile;
pub mod stats;
pub mod status;
pub mod titles;

use habitquest_core::{Config, Session};
use uuid::Uuid;

/// Build a session for the configured backend and load its state.
pub(crate) async fn load_session() -> Result<Session, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut session = Session::from_config(&config)?;
    session.load().await;
    if session.data_lost() {
        eprintln!("warning: stored guest data was unreadable and has been ignored");
    }
    Ok(session)
}

/// Resolve a stat argument (name or id) against the loaded stats.
pub(crate) fn resolve_stat_id(session: &Session, needle: &str) -> Option<Uuid> {
    if let Ok(id) = needle.parse::<Uuid>() {
        return Some(id);
    }
    session
        .stats()
        .iter()
        .find(|s| s.stat_name.eq_ignore_ascii_case(needle))
        .map(|s| s.id)
}

/// "★★★☆☆"-style rating.
pub(crate) fn star_bar(stars: u8) -> String {
    let filled = "★".repeat(stars as usize);
    let hollow = "☆".repeat(5usize.saturating_sub(stars as usize));
    format!("{filled}{hollow}")
}
