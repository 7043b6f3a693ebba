//! # Core Application Logic
//!
//! This module contains liftlog's business logic.
//! It knows nothing about any specific UI technology or the network.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Session   │      │    CLI     │
//!     │  Adapter   │      │  Engine    │      │ subcommands│
//!     │ (ratatui)  │      │ (headless) │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`workout`]: The session cursor and its pure transitions
//! - [`timer`]: Wall-clock rest countdown
//! - [`menu`]: Menu types and the static fallback tables
//! - [`snapshot`]: Local crash-resume mirror
//! - [`stats`]: Volume and 1RM trends
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod menu;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod timer;
pub mod workout;
