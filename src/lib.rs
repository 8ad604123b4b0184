// ABOUTME: Main library entry point for the Nutriplan meal planning client
// ABOUTME: Recipe collection, weekly meal calendar, and nutrition tracking over a remote table store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

#![deny(unsafe_code)]

//! # Nutriplan
//!
//! A headless client for personal recipe management, weekly meal planning,
//! and nutrition tracking. All persistent state lives in a remote table
//! store; this crate mirrors that state into memory, derives the views a
//! presentation layer renders, and pushes edits back.
//!
//! ## Features
//!
//! - **Recipe collection**: simple (name plus nutrition) and detailed
//!   (ingredients, steps, timing) recipe variants with text, tag, and
//!   variant filters
//! - **Weekly calendar**: Monday-anchored week grid with breakfast, lunch,
//!   and dinner slots holding recipe references or free-form text
//! - **Nutrition tracking**: per-day calorie and protein totals across
//!   scheduled meals and ad-hoc extras, plus stored nutrition targets
//! - **Remote-first writes**: every mutation round-trips through the store
//!   and reloads the owning collection, so nothing renders stale
//!
//! ## Architecture
//!
//! - **[`planner`]**: the state manager owning the in-memory collections
//! - **[`store`]**: the generic table-query boundary, with an HTTP
//!   implementation and an in-memory one for tests
//! - **[`models`]**: typed entities and write drafts
//! - **[`views`]**: pure derivations (week grid, totals, filters)
//! - **[`week`]**: Monday-anchored calendar math
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nutriplan::planner::Planner;
//! use nutriplan::store::PostgrestStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(PostgrestStore::from_env()?);
//!     let mut planner = Planner::new(store);
//!     planner.load_all().await?;
//!
//!     for day in planner.week_view().days {
//!         println!("{}: {} kcal", day.date_label, day.totals.calories);
//!     }
//!     Ok(())
//! }
//! ```

/// Remote store connection settings loaded from the environment
pub mod config;

/// Application constants: table names, environment variables, defaults
pub mod constants;

/// Unified error handling for planner operations
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Typed domain entities and write drafts
pub mod models;

/// The planner state manager and its operations
pub mod planner;

/// Generic table-query interface and its implementations
pub mod store;

/// Pure derived views: week grid, nutrition totals, recipe filters
pub mod views;

/// Monday-anchored week math
pub mod week;
