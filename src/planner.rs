// ABOUTME: Planner state manager owning the in-memory mirror of all remote collections
// ABOUTME: Load/write round-trips, sync status tracking, and week navigation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! # Planner State Manager
//!
//! [`Planner`] owns the canonical in-memory copies of the five remote
//! collections and routes every mutation through the backing
//! [`TableStore`]. There is no optimistic update: each write performs the
//! remote mutation first, then reloads the owning collection in full, so the
//! remote store stays the single source of truth and a failed write leaves
//! the prior in-memory state untouched.
//!
//! Startup hydration loads all five collections concurrently and applies
//! them only when every load succeeded; a presentation layer never observes
//! a partially hydrated planner.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::constants::tables;
use crate::errors::{PlannerError, PlannerResult};
use crate::models::{
    DailyExtra, ExtraDraft, MealEntryDraft, MealPlanEntry, MealSource, NutritionGoals, QuickFood,
    QuickFoodDraft, Recipe, RecipeDraft,
};
use crate::store::{decode_row, decode_rows, encode_row, SortKey, TableStore};
use crate::views::{self, DayNutrition, RecipeKindFilter, WeekView};
use crate::week;

const NAME_ORDERING: [SortKey; 1] = [SortKey::asc("name")];
const MEAL_PLAN_ORDERING: [SortKey; 2] = [SortKey::asc("date"), SortKey::asc("meal_type")];
const EXTRA_ORDERING: [SortKey; 2] = [SortKey::asc("date"), SortKey::asc("created_at")];

/// Coarse indicator of whether in-memory state matches the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// No load or write has run yet.
    #[default]
    Idle,
    /// A remote round-trip is in flight.
    Syncing,
    /// The last round-trip completed and local state was refreshed from it.
    Synced,
    /// The last round-trip failed; local state is the pre-write snapshot.
    Error,
}

impl SyncStatus {
    /// Stable lowercase name, for logs and status indicators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Syncing => "syncing",
            Self::Synced => "synced",
            Self::Error => "error",
        }
    }
}

/// The planner state manager.
///
/// Construct one per user session, load it with [`Planner::load_all`], and
/// route every user intent through its operations. All rendering happens
/// from the accessors and derived views; nothing here touches a UI.
pub struct Planner {
    store: Arc<dyn TableStore>,
    recipes: Vec<Recipe>,
    quick_foods: Vec<QuickFood>,
    meal_plans: Vec<MealPlanEntry>,
    daily_extras: Vec<DailyExtra>,
    goals: Option<NutritionGoals>,
    sync_status: SyncStatus,
    current_week_start: NaiveDate,
}

impl Planner {
    /// Create an empty planner showing the week containing today.
    #[must_use]
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self::with_week_of(store, today())
    }

    /// Create an empty planner showing the week containing `date`.
    #[must_use]
    pub fn with_week_of(store: Arc<dyn TableStore>, date: NaiveDate) -> Self {
        Self {
            store,
            recipes: Vec::new(),
            quick_foods: Vec::new(),
            meal_plans: Vec::new(),
            daily_extras: Vec::new(),
            goals: None,
            sync_status: SyncStatus::Idle,
            current_week_start: week::week_start(date),
        }
    }

    /// All recipes, ordered by name.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// All quick foods, ordered by name.
    #[must_use]
    pub fn quick_foods(&self) -> &[QuickFood] {
        &self.quick_foods
    }

    /// All scheduled meals, ordered by date then meal type.
    #[must_use]
    pub fn meal_plans(&self) -> &[MealPlanEntry] {
        &self.meal_plans
    }

    /// All daily extras, ordered by date then creation time.
    #[must_use]
    pub fn daily_extras(&self) -> &[DailyExtra] {
        &self.daily_extras
    }

    /// The stored nutrition targets, if any have been saved.
    #[must_use]
    pub const fn goals(&self) -> Option<NutritionGoals> {
        self.goals
    }

    /// Current sync status.
    #[must_use]
    pub const fn sync_status(&self) -> SyncStatus {
        self.sync_status
    }

    /// Monday of the week currently shown.
    #[must_use]
    pub const fn current_week_start(&self) -> NaiveDate {
        self.current_week_start
    }

    /// Look up a recipe by id.
    #[must_use]
    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Look up a quick food by id.
    #[must_use]
    pub fn quick_food(&self, id: Uuid) -> Option<&QuickFood> {
        self.quick_foods.iter().find(|f| f.id == id)
    }

    /// Load all five collections concurrently and apply them atomically.
    ///
    /// The fetched data is staged and only assigned once every load has
    /// succeeded, so a failure leaves the planner exactly as it was. Absence
    /// of a nutrition goals row is not a failure.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Load`] naming the first collection whose fetch
    /// or decode failed; the sync status is left in [`SyncStatus::Error`].
    pub async fn load_all(&mut self) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = tokio::try_join!(
            self.load_recipes(),
            self.load_quick_foods(),
            self.load_meal_plans(),
            self.load_daily_extras(),
            self.load_goals(),
        );
        match outcome {
            Ok((recipes, quick_foods, meal_plans, daily_extras, goals)) => {
                self.recipes = recipes;
                self.quick_foods = quick_foods;
                self.meal_plans = meal_plans;
                self.daily_extras = daily_extras;
                self.goals = goals;
                self.sync_status = SyncStatus::Synced;
                info!(
                    recipes = self.recipes.len(),
                    quick_foods = self.quick_foods.len(),
                    meal_plans = self.meal_plans.len(),
                    daily_extras = self.daily_extras.len(),
                    has_goals = self.goals.is_some(),
                    "planner collections loaded"
                );
                Ok(())
            }
            Err(err) => {
                self.sync_status = SyncStatus::Error;
                error!(error = %err, "initial load failed");
                Err(err)
            }
        }
    }

    /// Persist a new recipe and return the stored record.
    ///
    /// The draft is normalized first: a simple recipe is stripped to name
    /// plus nutrition with `servings = 1` no matter what the form held.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] for a blank name without touching
    /// the sync status, or [`PlannerError::Write`] when the store round-trip
    /// fails.
    pub async fn create_recipe(&mut self, draft: RecipeDraft) -> PlannerResult<Recipe> {
        let draft = draft.normalized();
        if draft.name.trim().is_empty() {
            return Err(PlannerError::validation("recipe name must not be empty"));
        }
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_create_recipe(&draft).await;
        let recipe = self.settle("create recipe", outcome)?;
        info!(recipe_id = %recipe.id, name = %recipe.name, "recipe created");
        Ok(recipe)
    }

    /// Overwrite the recipe with id `id` and return the stored record.
    ///
    /// Every column is written, nulls included, so switching a detailed
    /// recipe to simple clears its stale detail fields remotely.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] for a blank name without touching
    /// the sync status, or [`PlannerError::Write`] when the store round-trip
    /// fails or no row matches `id`.
    pub async fn update_recipe(&mut self, id: Uuid, draft: RecipeDraft) -> PlannerResult<Recipe> {
        let draft = draft.normalized();
        if draft.name.trim().is_empty() {
            return Err(PlannerError::validation("recipe name must not be empty"));
        }
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_update_recipe(id, &draft).await;
        let recipe = self.settle("update recipe", outcome)?;
        info!(recipe_id = %recipe.id, name = %recipe.name, "recipe updated");
        Ok(recipe)
    }

    /// Delete a recipe.
    ///
    /// Asking the user to confirm is the presentation layer's job and must
    /// happen before this call. Meal entries referencing the recipe are kept;
    /// they render as unresolved from now on.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Write`] when the store round-trip fails.
    pub async fn delete_recipe(&mut self, id: Uuid) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_delete_recipe(id).await;
        self.settle("delete recipe", outcome)?;
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    /// Persist a new quick food.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] for a blank name without touching
    /// the sync status, or [`PlannerError::Write`] when the store round-trip
    /// fails.
    pub async fn create_quick_food(&mut self, draft: QuickFoodDraft) -> PlannerResult<()> {
        if draft.name.trim().is_empty() {
            return Err(PlannerError::validation("quick food name must not be empty"));
        }
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_create_quick_food(&draft).await;
        self.settle("create quick food", outcome)?;
        info!(name = %draft.name, "quick food created");
        Ok(())
    }

    /// Delete a quick food. Daily extras created from it are untouched, as
    /// they carry their own copies of its values.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Write`] when the store round-trip fails.
    pub async fn delete_quick_food(&mut self, id: Uuid) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_delete_quick_food(id).await;
        self.settle("delete quick food", outcome)?;
        info!(quick_food_id = %id, "quick food deleted");
        Ok(())
    }

    /// Schedule a meal into a slot of the weekly calendar.
    ///
    /// A custom meal with blank text is rejected before any network call.
    /// Scheduling into an occupied slot is allowed; the grid renders the
    /// first entry and the day totals count all of them.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] for blank custom text without
    /// touching the sync status, or [`PlannerError::Write`] when the store
    /// round-trip fails.
    pub async fn create_meal_entry(&mut self, draft: MealEntryDraft) -> PlannerResult<()> {
        if let MealSource::Custom { custom_text } = &draft.source {
            if custom_text.trim().is_empty() {
                return Err(PlannerError::validation("custom meal text must not be empty"));
            }
        }
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_create_meal_entry(&draft).await;
        self.settle("schedule meal", outcome)?;
        info!(date = %draft.date, meal_type = draft.meal_type.as_str(), "meal scheduled");
        Ok(())
    }

    /// Remove a scheduled meal from the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Write`] when the store round-trip fails.
    pub async fn remove_meal_entry(&mut self, id: Uuid) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_remove_meal_entry(id).await;
        self.settle("remove meal", outcome)?;
        info!(entry_id = %id, "meal removed");
        Ok(())
    }

    /// Log an ad-hoc nutrition entry for a day.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] for a blank name without touching
    /// the sync status, or [`PlannerError::Write`] when the store round-trip
    /// fails.
    pub async fn create_daily_extra(&mut self, draft: ExtraDraft) -> PlannerResult<()> {
        if draft.name.trim().is_empty() {
            return Err(PlannerError::validation("extra name must not be empty"));
        }
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_create_daily_extra(&draft).await;
        self.settle("log daily extra", outcome)?;
        info!(date = %draft.date, name = %draft.name, "daily extra logged");
        Ok(())
    }

    /// Remove a logged daily extra.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Write`] when the store round-trip fails.
    pub async fn remove_daily_extra(&mut self, id: Uuid) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_remove_daily_extra(id).await;
        self.settle("remove daily extra", outcome)?;
        info!(extra_id = %id, "daily extra removed");
        Ok(())
    }

    /// Log a known quick food as a daily extra, copying its name, calories,
    /// and protein into the new entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Validation`] when no quick food has the given
    /// id, or [`PlannerError::Write`] when the store round-trip fails.
    pub async fn add_quick_food_to_day(
        &mut self,
        food_id: Uuid,
        date: NaiveDate,
    ) -> PlannerResult<()> {
        let Some(food) = self.quick_food(food_id) else {
            return Err(PlannerError::validation(format!(
                "unknown quick food {food_id}"
            )));
        };
        let draft = ExtraDraft {
            date,
            name: food.name.clone(),
            calories: food.calories,
            protein: food.protein,
        };
        self.create_daily_extra(draft).await
    }

    /// Replace the stored nutrition targets.
    ///
    /// The goals table has no natural key to upsert against, so the save
    /// deletes every existing row and inserts the new one. The two steps are
    /// not transactional: a failure between them leaves no stored goals, and
    /// recovery is resubmitting the form.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Write`] when either store round-trip fails.
    pub async fn save_goals(&mut self, goals: NutritionGoals) -> PlannerResult<()> {
        self.sync_status = SyncStatus::Syncing;
        let outcome = self.try_save_goals(&goals).await;
        self.settle("save nutrition goals", outcome)?;
        info!("nutrition goals saved");
        Ok(())
    }

    /// Move the shown week by `weeks` (negative for earlier weeks).
    pub fn shift_week(&mut self, weeks: i64) {
        self.current_week_start = week::shift_weeks(self.current_week_start, weeks);
    }

    /// Jump back to the week containing today.
    pub fn go_to_today(&mut self) {
        self.current_week_start = week::week_start(today());
    }

    /// Build the weekly grid view for the currently shown week.
    #[must_use]
    pub fn week_view(&self) -> WeekView {
        views::week_view(
            self.current_week_start,
            today(),
            &self.meal_plans,
            &self.daily_extras,
            &self.recipes,
        )
    }

    /// Rounded calorie and protein totals for `date`.
    #[must_use]
    pub fn day_nutrition_total(&self, date: NaiveDate) -> DayNutrition {
        views::day_nutrition_total(date, &self.meal_plans, &self.daily_extras, &self.recipes)
    }

    /// Recipes matching a free-text search over name, collection tags, and
    /// keywords. An empty term matches everything.
    #[must_use]
    pub fn search_recipes(&self, term: &str) -> Vec<&Recipe> {
        views::filter_by_text(&self.recipes, term)
    }

    /// Recipes matching a name-only search, for the meal slot picker.
    #[must_use]
    pub fn recipes_matching_name(&self, term: &str) -> Vec<&Recipe> {
        views::filter_by_name(&self.recipes, term)
    }

    /// Recipes carrying the exact collection tag; an empty tag matches all.
    #[must_use]
    pub fn recipes_in_collection(&self, tag: &str) -> Vec<&Recipe> {
        views::filter_by_collection(&self.recipes, tag)
    }

    /// Recipes of the requested variant.
    #[must_use]
    pub fn recipes_of_kind(&self, kind: RecipeKindFilter) -> Vec<&Recipe> {
        views::filter_by_kind(&self.recipes, kind)
    }

    /// Sorted, deduplicated collection tags across all recipes.
    #[must_use]
    pub fn collection_tags(&self) -> Vec<String> {
        views::distinct_collections(&self.recipes)
    }

    fn settle<T>(&mut self, action: &'static str, outcome: PlannerResult<T>) -> PlannerResult<T> {
        match outcome {
            Ok(value) => {
                self.sync_status = SyncStatus::Synced;
                Ok(value)
            }
            Err(err) => {
                self.sync_status = SyncStatus::Error;
                error!(error = %err, "{action} failed");
                Err(err)
            }
        }
    }

    async fn load_collection<T: DeserializeOwned>(
        &self,
        table: &'static str,
        ordering: &[SortKey],
    ) -> PlannerResult<Vec<T>> {
        let rows = self
            .store
            .select_all(table, ordering)
            .await
            .map_err(|err| PlannerError::load(table, err))?;
        decode_rows(rows).map_err(|err| PlannerError::load(table, err))
    }

    async fn load_recipes(&self) -> PlannerResult<Vec<Recipe>> {
        self.load_collection(tables::RECIPES, &NAME_ORDERING).await
    }

    async fn load_quick_foods(&self) -> PlannerResult<Vec<QuickFood>> {
        self.load_collection(tables::QUICK_FOODS, &NAME_ORDERING)
            .await
    }

    async fn load_meal_plans(&self) -> PlannerResult<Vec<MealPlanEntry>> {
        self.load_collection(tables::MEAL_PLANS, &MEAL_PLAN_ORDERING)
            .await
    }

    async fn load_daily_extras(&self) -> PlannerResult<Vec<DailyExtra>> {
        self.load_collection(tables::DAILY_EXTRAS, &EXTRA_ORDERING)
            .await
    }

    async fn load_goals(&self) -> PlannerResult<Option<NutritionGoals>> {
        let row = self
            .store
            .select_single(tables::NUTRITION_GOALS)
            .await
            .map_err(|err| PlannerError::load(tables::NUTRITION_GOALS, err))?;
        row.map(decode_row::<NutritionGoals>)
            .transpose()
            .map_err(|err| PlannerError::load(tables::NUTRITION_GOALS, err))
    }

    async fn try_create_recipe(&mut self, draft: &RecipeDraft) -> PlannerResult<Recipe> {
        let row = encode_row(draft).map_err(|err| PlannerError::write("create recipe", err))?;
        let stored = self
            .store
            .insert(tables::RECIPES, row)
            .await
            .map_err(|err| PlannerError::write("create recipe", err))?;
        let recipe =
            decode_row(stored).map_err(|err| PlannerError::write("create recipe", err))?;
        self.recipes = self.load_recipes().await?;
        Ok(recipe)
    }

    async fn try_update_recipe(&mut self, id: Uuid, draft: &RecipeDraft) -> PlannerResult<Recipe> {
        let row = encode_row(draft).map_err(|err| PlannerError::write("update recipe", err))?;
        let stored = self
            .store
            .update(tables::RECIPES, id, row)
            .await
            .map_err(|err| PlannerError::write("update recipe", err))?;
        let recipe =
            decode_row(stored).map_err(|err| PlannerError::write("update recipe", err))?;
        self.recipes = self.load_recipes().await?;
        Ok(recipe)
    }

    async fn try_delete_recipe(&mut self, id: Uuid) -> PlannerResult<()> {
        self.store
            .delete(tables::RECIPES, id)
            .await
            .map_err(|err| PlannerError::write("delete recipe", err))?;
        self.recipes = self.load_recipes().await?;
        Ok(())
    }

    async fn try_create_quick_food(&mut self, draft: &QuickFoodDraft) -> PlannerResult<()> {
        let row = encode_row(draft).map_err(|err| PlannerError::write("create quick food", err))?;
        self.store
            .insert(tables::QUICK_FOODS, row)
            .await
            .map_err(|err| PlannerError::write("create quick food", err))?;
        self.quick_foods = self.load_quick_foods().await?;
        Ok(())
    }

    async fn try_delete_quick_food(&mut self, id: Uuid) -> PlannerResult<()> {
        self.store
            .delete(tables::QUICK_FOODS, id)
            .await
            .map_err(|err| PlannerError::write("delete quick food", err))?;
        self.quick_foods = self.load_quick_foods().await?;
        Ok(())
    }

    async fn try_create_meal_entry(&mut self, draft: &MealEntryDraft) -> PlannerResult<()> {
        let row = encode_row(draft).map_err(|err| PlannerError::write("schedule meal", err))?;
        self.store
            .insert(tables::MEAL_PLANS, row)
            .await
            .map_err(|err| PlannerError::write("schedule meal", err))?;
        self.meal_plans = self.load_meal_plans().await?;
        Ok(())
    }

    async fn try_remove_meal_entry(&mut self, id: Uuid) -> PlannerResult<()> {
        self.store
            .delete(tables::MEAL_PLANS, id)
            .await
            .map_err(|err| PlannerError::write("remove meal", err))?;
        self.meal_plans = self.load_meal_plans().await?;
        Ok(())
    }

    async fn try_create_daily_extra(&mut self, draft: &ExtraDraft) -> PlannerResult<()> {
        let row = encode_row(draft).map_err(|err| PlannerError::write("log daily extra", err))?;
        self.store
            .insert(tables::DAILY_EXTRAS, row)
            .await
            .map_err(|err| PlannerError::write("log daily extra", err))?;
        self.daily_extras = self.load_daily_extras().await?;
        Ok(())
    }

    async fn try_remove_daily_extra(&mut self, id: Uuid) -> PlannerResult<()> {
        self.store
            .delete(tables::DAILY_EXTRAS, id)
            .await
            .map_err(|err| PlannerError::write("remove daily extra", err))?;
        self.daily_extras = self.load_daily_extras().await?;
        Ok(())
    }

    async fn try_save_goals(&mut self, goals: &NutritionGoals) -> PlannerResult<()> {
        let row =
            encode_row(goals).map_err(|err| PlannerError::write("save nutrition goals", err))?;
        self.store
            .delete_all(tables::NUTRITION_GOALS)
            .await
            .map_err(|err| PlannerError::write("save nutrition goals", err))?;
        self.store
            .insert(tables::NUTRITION_GOALS, row)
            .await
            .map_err(|err| PlannerError::write("save nutrition goals", err))?;
        self.goals = self.load_goals().await?;
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::MealType;
    use crate::store::MemoryStore;

    fn planner() -> Planner {
        let store = Arc::new(MemoryStore::new());
        Planner::with_week_of(store, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
    }

    #[test]
    fn construction_snaps_to_monday() {
        let p = planner();
        assert_eq!(
            p.current_week_start(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
        );
        assert_eq!(p.sync_status(), SyncStatus::Idle);
    }

    #[test]
    fn week_navigation_moves_in_whole_weeks() {
        let mut p = planner();
        p.shift_week(1);
        assert_eq!(
            p.current_week_start(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        p.shift_week(-2);
        assert_eq!(
            p.current_week_start(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn blank_custom_meal_is_rejected_without_status_change() {
        let mut p = planner();
        let draft = MealEntryDraft {
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            meal_type: MealType::Lunch,
            source: MealSource::Custom {
                custom_text: "   ".to_owned(),
            },
        };
        let err = p.create_meal_entry(draft).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(p.sync_status(), SyncStatus::Idle);
        assert!(p.meal_plans().is_empty());
    }

    #[tokio::test]
    async fn unknown_quick_food_is_rejected_without_status_change() {
        let mut p = planner();
        let err = p
            .add_quick_food_to_day(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(p.sync_status(), SyncStatus::Idle);
    }
}
