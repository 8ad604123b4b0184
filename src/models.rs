// ABOUTME: Core data models for recipes, quick foods, meal plans, extras, and goals
// ABOUTME: Defines the typed entities mirrored from the remote store plus write drafts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! # Data Models
//!
//! Typed representations of the five remote tables plus the draft types used
//! for writes.
//!
//! ## Design Principles
//!
//! - **Store Agnostic**: Entities decode from loosely-typed rows regardless of
//!   which store implementation produced them
//! - **Tolerant Decoding**: Optional and defaulted fields absorb the loose
//!   typing of hosted tables instead of failing whole collection loads
//! - **Drafts for Writes**: Store-assigned columns (`id`, `created_at`) never
//!   appear in insert payloads because drafts are separate types
//!
//! ## Core Models
//!
//! - [`Recipe`]: A simple or detailed recipe with embedded [`NutritionFacts`]
//! - [`QuickFood`]: A reusable named nutrition snippet for fast logging
//! - [`MealPlanEntry`]: One scheduled meal in the weekly calendar
//! - [`DailyExtra`]: An ad-hoc nutrition entry for a day
//! - [`NutritionGoals`]: The singleton set of nutrition targets

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::defaults;

/// The three scheduled meal slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
}

impl MealType {
    /// All meal types in render order.
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Column value as stored remotely.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Capitalized label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }
}

/// Discriminant for what a meal plan entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealEntryKind {
    /// Entry references a recipe by id.
    Recipe,
    /// Entry carries free-form text.
    Custom,
}

/// Typed view of a meal entry's payload, derived from the raw columns.
///
/// Serializes to the remote column shape (`data_type` discriminant plus the
/// matching payload column), which is exactly what meal entry inserts send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "data_type", rename_all = "snake_case")]
pub enum MealSource {
    /// A reference to a recipe in the recipe collection.
    Recipe {
        /// Id of the referenced recipe.
        recipe_id: Uuid,
    },
    /// A free-form meal description.
    Custom {
        /// The text entered by the user.
        custom_text: String,
    },
}

/// Per-serving nutrition facts embedded in recipes.
///
/// Missing fields decode as zero, matching the hosted store's loose typing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// Kilocalories.
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams.
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams.
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams.
    #[serde(default)]
    pub fat: f64,
    /// Fiber in grams.
    #[serde(default)]
    pub fiber: f64,
    /// Sugar in grams.
    #[serde(default)]
    pub sugar: f64,
}

/// A recipe in one of two shapes: simple (name plus nutrition only) or
/// detailed (full preparation data). `is_simple` is the discriminant; the
/// detailed fields of a simple recipe are always null/empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// True for the abbreviated name-plus-nutrition variant.
    pub is_simple: bool,
    /// Number of servings the nutrition facts describe.
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time: Option<u32>,
    /// Where the recipe came from (free text or URL).
    #[serde(default)]
    pub source: Option<String>,
    /// Picture URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Ordered collection tags the recipe belongs to.
    #[serde(default)]
    pub collections: Vec<String>,
    /// Search keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Ordered ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered preparation steps.
    #[serde(default)]
    pub steps: Vec<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Per-serving nutrition facts.
    #[serde(default)]
    pub nutrition: NutritionFacts,
}

const fn default_servings() -> u32 {
    defaults::SIMPLE_SERVINGS
}

/// A reusable named nutrition snippet for fast daily logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickFood {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Kilocalories.
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams.
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams.
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams.
    #[serde(default)]
    pub fat: f64,
}

/// One scheduled meal in the weekly calendar.
///
/// The row keeps the store's column shape: a `data_type` discriminant plus two
/// nullable payload columns. Exactly one payload column should be non-null,
/// but the store does not enforce that; [`MealPlanEntry::source`] derives the
/// typed view and yields `None` for rows violating the invariant, which render
/// as unresolved and contribute zero nutrition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Calendar date of the meal.
    pub date: NaiveDate,
    /// Which slot of the day this entry fills.
    pub meal_type: MealType,
    /// Whether the entry references a recipe or carries custom text.
    pub data_type: MealEntryKind,
    /// Referenced recipe, for `data_type == Recipe`.
    #[serde(default)]
    pub recipe_id: Option<Uuid>,
    /// Free-form description, for `data_type == Custom`.
    #[serde(default)]
    pub custom_text: Option<String>,
}

impl MealPlanEntry {
    /// Typed payload of this entry, or `None` when the row's discriminant and
    /// payload columns disagree.
    #[must_use]
    pub fn source(&self) -> Option<MealSource> {
        match self.data_type {
            MealEntryKind::Recipe => self
                .recipe_id
                .map(|recipe_id| MealSource::Recipe { recipe_id }),
            MealEntryKind::Custom => self
                .custom_text
                .clone()
                .map(|custom_text| MealSource::Custom { custom_text }),
        }
    }
}

/// An ad-hoc nutrition entry for a day, not attached to a meal slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExtra {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Calendar date the entry counts toward.
    pub date: NaiveDate,
    /// Display name, usually copied from a quick food.
    pub name: String,
    /// Kilocalories.
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams.
    #[serde(default)]
    pub protein: f64,
    /// Store-assigned creation timestamp, used only for ordering.
    pub created_at: DateTime<Utc>,
}

/// Nutrition targets. A logical singleton: the store holds at most one row,
/// enforced by deleting all rows before every insert.
///
/// Unset targets stay null rather than zero so "no target" and "target of 0"
/// remain distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionGoals {
    /// Daily kilocalorie target.
    pub calories: Option<f64>,
    /// Daily protein target in grams.
    pub protein: Option<f64>,
    /// Daily carbohydrate target in grams.
    pub carbs: Option<f64>,
    /// Daily fat target in grams.
    pub fat: Option<f64>,
    /// Daily fiber target in grams.
    pub fiber: Option<f64>,
    /// Daily sugar target in grams.
    pub sugar: Option<f64>,
}

/// Write payload for creating or updating a recipe.
///
/// Callers fill it straight from form state; [`RecipeDraft::normalized`]
/// applies the simple/detailed shaping rules before the draft is persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Display name.
    pub name: String,
    /// True for the abbreviated name-plus-nutrition variant.
    pub is_simple: bool,
    /// Number of servings; `None` falls back to the detailed default.
    pub servings: Option<u32>,
    /// Preparation time in minutes.
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    pub cook_time: Option<u32>,
    /// Where the recipe came from.
    pub source: Option<String>,
    /// Picture URL.
    pub image_url: Option<String>,
    /// Collection tags.
    pub collections: Vec<String>,
    /// Search keywords.
    pub keywords: Vec<String>,
    /// Ingredient lines.
    pub ingredients: Vec<String>,
    /// Preparation steps.
    pub steps: Vec<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Per-serving nutrition facts, kept verbatim for both variants.
    pub nutrition: NutritionFacts,
}

impl RecipeDraft {
    /// Apply the simple/detailed shaping rules.
    ///
    /// A simple draft is stripped to name plus nutrition: servings forced to
    /// 1, every detailed field nulled or emptied, whatever the form held. A
    /// detailed draft keeps its fields, with absent servings defaulting to 4.
    /// Nutrition passes through untouched in both cases.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.is_simple {
            self.servings = Some(defaults::SIMPLE_SERVINGS);
            self.prep_time = None;
            self.cook_time = None;
            self.source = None;
            self.image_url = None;
            self.collections = Vec::new();
            self.keywords = Vec::new();
            self.ingredients = Vec::new();
            self.steps = Vec::new();
            self.notes = None;
        } else {
            self.servings = Some(self.servings.unwrap_or(defaults::DETAILED_SERVINGS));
        }
        self
    }
}

/// Write payload for creating a quick food. Absent numeric inputs shape to 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuickFoodDraft {
    /// Display name.
    pub name: String,
    /// Kilocalories.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
    /// Carbohydrates in grams.
    pub carbs: f64,
    /// Fat in grams.
    pub fat: f64,
}

/// Write payload for scheduling a meal.
///
/// The source enum makes "neither recipe nor text" unrepresentable; empty
/// custom text is still rejected at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntryDraft {
    /// Calendar date of the meal.
    pub date: NaiveDate,
    /// Which slot of the day to fill.
    pub meal_type: MealType,
    /// What the slot holds.
    #[serde(flatten)]
    pub source: MealSource,
}

/// Write payload for logging an ad-hoc daily extra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraDraft {
    /// Calendar date the entry counts toward.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Kilocalories.
    pub calories: f64,
    /// Protein in grams.
    pub protein: f64,
}

/// Split comma-separated form input into trimmed, non-empty items.
#[must_use]
pub fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Split line-separated form input into trimmed, non-empty items.
#[must_use]
pub fn parse_lines(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
