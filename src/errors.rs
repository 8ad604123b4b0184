// ABOUTME: Error types raised by the planner state manager
// ABOUTME: PlannerError enum plus the PlannerResult alias used across the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! Planner-level error handling.
//!
//! Store transport and decode failures are wrapped with the collection or
//! action they interrupted; local input rejections never reach the store and
//! carry no source. All errors are terminal for the operation that raised
//! them, there is no retry built in.

use crate::store::StoreError;

/// Errors surfaced by planner operations.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A collection fetch failed during startup or a post-write reload.
    #[error("failed to load {collection}: {source}")]
    Load {
        /// Name of the collection that failed to load.
        collection: &'static str,
        /// Underlying store failure.
        source: StoreError,
    },

    /// A remote mutation failed; in-memory state was left untouched.
    #[error("failed to {action}: {source}")]
    Write {
        /// Short description of the attempted mutation.
        action: &'static str,
        /// Underlying store failure.
        source: StoreError,
    },

    /// Input was rejected before any store call was made.
    #[error("invalid input: {0}")]
    Validation(String),
}

impl PlannerError {
    /// Wrap a store failure that interrupted a collection load.
    #[must_use]
    pub const fn load(collection: &'static str, source: StoreError) -> Self {
        Self::Load { collection, source }
    }

    /// Wrap a store failure that interrupted a mutation.
    #[must_use]
    pub const fn write(action: &'static str, source: StoreError) -> Self {
        Self::Write { action, source }
    }

    /// Reject input locally, without touching the store.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was raised by local validation (no store call made).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for all planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
