//! # Core Application Logic
//!
//! This module contains Luma's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Reveal sessions      │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   tasks    │      │ typewriter │
//!     │  Adapter   │      │ (HTTP via  │      │  (tokio    │
//!     │ (ratatui)  │      │  client)   │      │   timer)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`selection`]: Which models the user picked
//! - [`reveal`]: Typewriter session state and timing schedule
//! - [`typewriter`]: The cancelable tokio task that drives a session
//! - [`tasks`]: Backend calls folded into actions
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod reveal;
pub mod selection;
pub mod state;
pub mod tasks;
pub mod typewriter;
