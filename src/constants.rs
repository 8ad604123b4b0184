// ABOUTME: Centralized table names, environment variable names, and default values
// ABOUTME: Single source of truth for remote store wiring shared across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! Constants organized by domain: remote table names, environment variable
//! names, and fallback defaults used when the environment is silent.

/// Remote table names as they exist in the hosted store.
pub mod tables {
    /// Recipe collection table.
    pub const RECIPES: &str = "recipes";
    /// Reusable quick-entry foods table.
    pub const QUICK_FOODS: &str = "quick_foods";
    /// Weekly meal calendar entries table.
    pub const MEAL_PLANS: &str = "meal_plans";
    /// Ad-hoc daily nutrition entries table.
    pub const DAILY_EXTRAS: &str = "daily_extras";
    /// Nutrition targets singleton table.
    pub const NUTRITION_GOALS: &str = "nutrition_goals";
}

/// Environment variable names read by configuration loading.
pub mod env_vars {
    /// Base URL of the remote table store (e.g. `https://xyz.supabase.co/rest/v1`).
    pub const STORE_URL: &str = "NUTRIPLAN_STORE_URL";
    /// API key sent as both `apikey` header and bearer token.
    pub const STORE_API_KEY: &str = "NUTRIPLAN_STORE_API_KEY";
    /// Overall HTTP request timeout in seconds.
    pub const HTTP_TIMEOUT_SECS: &str = "NUTRIPLAN_HTTP_TIMEOUT_SECS";
    /// TCP connect timeout in seconds.
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "NUTRIPLAN_HTTP_CONNECT_TIMEOUT_SECS";
    /// Log output format selector (`json`, `pretty`, or `compact`).
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Standard tracing filter expression.
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Fallback values applied when the environment or input is silent.
pub mod defaults {
    /// HTTP request timeout when `NUTRIPLAN_HTTP_TIMEOUT_SECS` is unset.
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// TCP connect timeout when `NUTRIPLAN_HTTP_CONNECT_TIMEOUT_SECS` is unset.
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Servings assigned to a detailed recipe draft that leaves servings blank.
    pub const DETAILED_SERVINGS: u32 = 4;
    /// Servings forced onto every simple recipe.
    pub const SIMPLE_SERVINGS: u32 = 1;
    /// Log level used when `RUST_LOG` is unset.
    pub const LOG_LEVEL: &str = "info";
}
