//! Progression logic: tiers, levels, the completion workflow and title
//! reconciliation.
//!
//! Everything here is backend-independent; both storage implementations
//! exercise exactly these rules.

pub mod engine;
pub mod level;
pub mod reconcile;
pub mod titles;

pub use engine::{complete_stat, Completion};
pub use level::{level, leveled_up, progress_within_level, xp_to_next_level, XP_PER_LEVEL};
pub use reconcile::{reconcile_title, Reconciliation};
pub use titles::{
    next_tier, resolve_tier, star_count_for_title, xp_to_next_tier, TitleTier, TITLE_TIERS,
};
