// ABOUTME: Derived view models and pure aggregation over planner collections
// ABOUTME: Week grid and slot resolution, day nutrition totals, and recipe filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! # Derived Views
//!
//! Pure functions from the planner's collections to structured view models a
//! declarative view layer can bind to. Nothing here performs I/O or mutates
//! state; everything recomputes from whatever collections are passed in.
//!
//! Slot resolution is tolerant by design: a meal entry whose recipe reference
//! no longer resolves renders as [`MealSlotView::RecipeMissing`] and
//! contributes zero nutrition, because recipe deletion never cascades into
//! the meal calendar.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    DailyExtra, MealEntryKind, MealPlanEntry, MealType, NutritionFacts, Recipe,
};
use crate::week;

/// Rounded calories and protein for one day.
///
/// Only these two fields are aggregated; the other nutrition facts are
/// per-recipe detail, not daily running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DayNutrition {
    /// Total kilocalories, rounded to the nearest integer.
    pub calories: i32,
    /// Total protein in grams, rounded to the nearest integer.
    pub protein: i32,
}

/// What a meal slot renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealSlotView {
    /// No entry scheduled for this slot.
    Empty,
    /// A resolved recipe reference.
    Recipe {
        /// Id of the meal plan entry (for removal).
        entry_id: Uuid,
        /// Id of the referenced recipe.
        recipe_id: Uuid,
        /// Recipe display name.
        name: String,
        /// Recipe nutrition facts for the slot's inline summary.
        nutrition: NutritionFacts,
    },
    /// A recipe reference that no longer resolves; renders as
    /// "Recipe not found" with zero nutrition.
    RecipeMissing {
        /// Id of the meal plan entry (for removal).
        entry_id: Uuid,
    },
    /// A free-form meal description.
    Custom {
        /// Id of the meal plan entry (for removal).
        entry_id: Uuid,
        /// Description text; blank text falls back to "Custom meal".
        text: String,
    },
}

/// One slot of a day: the meal type plus what it renders as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSlot {
    /// Which slot of the day this is.
    pub meal_type: MealType,
    /// What the slot renders as.
    pub view: MealSlotView,
}

/// One day of the weekly planner grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    /// Calendar date.
    pub date: NaiveDate,
    /// Full weekday name, e.g. `Monday`.
    pub weekday: String,
    /// Short date label, e.g. `Jan 8`.
    pub date_label: String,
    /// Whether this day is the reference "today".
    pub is_today: bool,
    /// The three meal slots in render order.
    pub slots: Vec<MealSlot>,
    /// Ad-hoc entries logged for the day, in load order.
    pub extras: Vec<DailyExtra>,
    /// Rounded calorie and protein totals for the day.
    pub totals: DayNutrition,
}

/// The full weekly planner grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    /// Monday the week starts on.
    pub start: NaiveDate,
    /// Heading label, e.g. `Jan 8 - Jan 14, 2024`.
    pub label: String,
    /// Seven days starting at `start`.
    pub days: Vec<DayView>,
}

/// Which recipe variants a recipe-list filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeKindFilter {
    /// Keep both variants.
    #[default]
    All,
    /// Keep only simple recipes.
    Simple,
    /// Keep only detailed recipes.
    Detailed,
}

/// Sum calories and protein for `date` across scheduled meals and extras.
///
/// Every meal entry for the date whose recipe reference resolves contributes
/// that recipe's nutrition; unresolved references and custom entries
/// contribute nothing. Every extra for the date contributes its own values.
/// Both totals are rounded at the end, not per item.
#[must_use]
pub fn day_nutrition_total(
    date: NaiveDate,
    entries: &[MealPlanEntry],
    extras: &[DailyExtra],
    recipes: &[Recipe],
) -> DayNutrition {
    let mut calories = 0.0;
    let mut protein = 0.0;

    for entry in entries.iter().filter(|m| m.date == date) {
        if entry.data_type != MealEntryKind::Recipe {
            continue;
        }
        let resolved = entry
            .recipe_id
            .and_then(|id| recipes.iter().find(|r| r.id == id));
        if let Some(recipe) = resolved {
            calories += recipe.nutrition.calories;
            protein += recipe.nutrition.protein;
        }
    }

    for extra in extras.iter().filter(|e| e.date == date) {
        calories += extra.calories;
        protein += extra.protein;
    }

    DayNutrition {
        calories: calories.round() as i32,
        protein: protein.round() as i32,
    }
}

/// Resolve what the (`date`, `meal_type`) slot renders as.
///
/// When several entries occupy the same slot, the first in collection order
/// wins; the day totals still count all of them.
#[must_use]
pub fn meal_slot_view(
    date: NaiveDate,
    meal_type: MealType,
    entries: &[MealPlanEntry],
    recipes: &[Recipe],
) -> MealSlotView {
    let Some(entry) = entries
        .iter()
        .find(|m| m.date == date && m.meal_type == meal_type)
    else {
        return MealSlotView::Empty;
    };

    match entry.data_type {
        MealEntryKind::Recipe => {
            let resolved = entry
                .recipe_id
                .and_then(|id| recipes.iter().find(|r| r.id == id));
            resolved.map_or(
                MealSlotView::RecipeMissing { entry_id: entry.id },
                |recipe| MealSlotView::Recipe {
                    entry_id: entry.id,
                    recipe_id: recipe.id,
                    name: recipe.name.clone(),
                    nutrition: recipe.nutrition,
                },
            )
        }
        MealEntryKind::Custom => MealSlotView::Custom {
            entry_id: entry.id,
            text: entry
                .custom_text
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Custom meal".to_owned()),
        },
    }
}

/// Build the view model for one day of the planner grid.
#[must_use]
pub fn day_view(
    date: NaiveDate,
    today: NaiveDate,
    entries: &[MealPlanEntry],
    extras: &[DailyExtra],
    recipes: &[Recipe],
) -> DayView {
    let slots = MealType::ALL
        .iter()
        .map(|&meal_type| MealSlot {
            meal_type,
            view: meal_slot_view(date, meal_type, entries, recipes),
        })
        .collect();

    DayView {
        date,
        weekday: date.format("%A").to_string(),
        date_label: date.format("%b %-d").to_string(),
        is_today: date == today,
        slots,
        extras: extras.iter().filter(|e| e.date == date).cloned().collect(),
        totals: day_nutrition_total(date, entries, extras, recipes),
    }
}

/// Build the full weekly grid for the week starting at `start`.
#[must_use]
pub fn week_view(
    start: NaiveDate,
    today: NaiveDate,
    entries: &[MealPlanEntry],
    extras: &[DailyExtra],
    recipes: &[Recipe],
) -> WeekView {
    let days = week::week_days(start)
        .into_iter()
        .map(|date| day_view(date, today, entries, extras, recipes))
        .collect();

    WeekView {
        start,
        label: week::week_label(start),
        days,
    }
}

/// Case-insensitive filter against name, collection tags, and keywords.
///
/// An empty term matches everything.
#[must_use]
pub fn filter_by_text<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let term = term.to_lowercase();
    recipes
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&term)
                || r.keywords.iter().any(|k| k.to_lowercase().contains(&term))
                || r.collections
                    .iter()
                    .any(|c| c.to_lowercase().contains(&term))
        })
        .collect()
}

/// Name-only variant of the text filter, used by the meal slot picker.
#[must_use]
pub fn filter_by_name<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let term = term.to_lowercase();
    recipes
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&term))
        .collect()
}

/// Keep recipes carrying the exact collection tag; an empty tag keeps all.
#[must_use]
pub fn filter_by_collection<'a>(recipes: &'a [Recipe], collection: &str) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|r| collection.is_empty() || r.collections.iter().any(|c| c == collection))
        .collect()
}

/// Keep recipes of the requested variant.
#[must_use]
pub fn filter_by_kind(recipes: &[Recipe], kind: RecipeKindFilter) -> Vec<&Recipe> {
    recipes
        .iter()
        .filter(|r| match kind {
            RecipeKindFilter::All => true,
            RecipeKindFilter::Simple => r.is_simple,
            RecipeKindFilter::Detailed => !r.is_simple,
        })
        .collect()
}

/// Sorted, deduplicated collection tags across all recipes, for filter
/// selectors.
#[must_use]
pub fn distinct_collections(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .flat_map(|r| r.collections.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
