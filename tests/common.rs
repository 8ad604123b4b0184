// ABOUTME: Shared test utilities and builders for integration tests
// ABOUTME: Provides seeded stores, draft builders, and date helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]

//! Shared test utilities for `nutriplan`
//!
//! Common builders and setup helpers to reduce duplication across
//! integration tests.

use std::sync::{Arc, Once};

use chrono::NaiveDate;
use nutriplan::models::{NutritionFacts, QuickFoodDraft, RecipeDraft};
use nutriplan::planner::Planner;
use nutriplan::store::{MemoryStore, Row};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    });
}

/// Helper: build a calendar date that is known to be valid
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Helper: a fresh in-memory store plus a planner pinned to the week of
/// 2024-01-08 (a Monday), so week assertions are deterministic
pub fn planner_with_store() -> (Arc<MemoryStore>, Planner) {
    init_test_logging();
    let store = Arc::new(MemoryStore::new());
    let planner = Planner::with_week_of(store.clone(), date(2024, 1, 8));
    (store, planner)
}

/// Helper: a simple recipe draft carrying only name and nutrition
pub fn simple_recipe_draft(name: &str, calories: f64, protein: f64) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        is_simple: true,
        nutrition: NutritionFacts {
            calories,
            protein,
            ..NutritionFacts::default()
        },
        ..RecipeDraft::default()
    }
}

/// Helper: a fully populated detailed recipe draft
pub fn detailed_recipe_draft(name: &str) -> RecipeDraft {
    RecipeDraft {
        name: name.to_owned(),
        is_simple: false,
        servings: Some(2),
        prep_time: Some(15),
        cook_time: Some(30),
        source: Some("Grandma's notebook".to_owned()),
        image_url: Some("https://example.com/stew.jpg".to_owned()),
        collections: vec!["Weeknight".to_owned()],
        keywords: vec!["stew".to_owned(), "hearty".to_owned()],
        ingredients: vec!["2 carrots".to_owned(), "1 onion".to_owned()],
        steps: vec!["Chop".to_owned(), "Simmer".to_owned()],
        notes: Some("Freezes well".to_owned()),
        nutrition: NutritionFacts {
            calories: 420.0,
            protein: 28.0,
            carbs: 35.0,
            fat: 18.0,
            fiber: 6.0,
            sugar: 8.0,
        },
    }
}

/// Helper: a quick food draft
pub fn quick_food_draft(name: &str, calories: f64, protein: f64) -> QuickFoodDraft {
    QuickFoodDraft {
        name: name.to_owned(),
        calories,
        protein,
        carbs: 0.0,
        fat: 0.0,
    }
}

/// Helper: turn a JSON object literal into a store row
pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
