//! # HabitQuest Core Library
//!
//! This library provides the core business logic for HabitQuest, a habit
//! tracker that gamifies daily routine completion through XP, levels and
//! unlockable titles. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Progression**: pure tier/level math plus the completion workflow
//!   and title reconciliation, independent of where data lives
//! - **Storage**: one async contract with two backends -- a whole-record
//!   JSON mirror for guest sessions and a relational HTTP store for
//!   signed-in users -- plus TOML-based configuration
//! - **Session**: the state container a UI subscribes to; the engine
//!   mutates it atomically per operation
//!
//! ## Key Components
//!
//! - [`Session`]: per-identity state container and mutation entry point
//! - [`HabitStore`]: storage contract shared by both backends
//! - [`Completion`]: structured outcome of a completion attempt
//! - [`Config`]: application configuration management

pub mod error;
pub mod identity;
pub mod model;
pub mod progression;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, StoreError};
pub use identity::Identity;
pub use model::{HabitLog, Profile, ProfileUpdate, Snapshot, Stat};
pub use progression::{Completion, Reconciliation, TitleTier, TITLE_TIERS};
pub use session::Session;
pub use storage::{Config, GuestRecord, HabitStore, LocalMirror, RemoteStore};
