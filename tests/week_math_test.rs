// ABOUTME: Tests for Monday-anchored week math and the weekly grid view
// ABOUTME: Validates week start derivation, navigation, and slot rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::{Datelike, Days, Weekday};
use nutriplan::models::{MealEntryDraft, MealSource, MealType};
use nutriplan::views::MealSlotView;
use nutriplan::week::{shift_weeks, week_days, week_label, week_start};

mod common;
use common::{date, planner_with_store, simple_recipe_draft};

#[test]
fn test_week_start_is_always_a_monday_and_idempotent() {
    // Sweep a stretch covering month and year boundaries plus a leap day.
    let mut day = date(2023, 12, 1);
    let end = date(2024, 3, 15);
    while day <= end {
        let start = week_start(day);
        assert_eq!(start.weekday(), Weekday::Mon, "for {day}");
        assert_eq!(week_start(start), start, "for {day}");
        // The date always falls inside its own week window.
        assert!(start <= day, "for {day}");
        assert!(day < start.checked_add_days(Days::new(7)).unwrap(), "for {day}");
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_sunday_snaps_back_to_the_preceding_monday() {
    // 2024-01-07 is a Sunday; its week began on 2024-01-01.
    assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 1));
    // 2024-01-08 is a Monday and is its own week start.
    assert_eq!(week_start(date(2024, 1, 8)), date(2024, 1, 8));
    // Midweek days map forward to nothing, always backward.
    assert_eq!(week_start(date(2024, 1, 10)), date(2024, 1, 8));
    assert_eq!(week_start(date(2024, 1, 14)), date(2024, 1, 8));
}

#[test]
fn test_week_days_are_seven_and_consecutive() {
    let days = week_days(date(2024, 1, 8));
    assert_eq!(days.len(), 7);
    assert_eq!(days[0], date(2024, 1, 8));
    assert_eq!(days[6], date(2024, 1, 14));
    for pair in days.windows(2) {
        assert_eq!(pair[1], pair[0].succ_opt().unwrap());
    }
}

#[test]
fn test_shift_weeks_moves_by_whole_weeks() {
    let start = date(2024, 1, 8);
    assert_eq!(shift_weeks(start, 1), date(2024, 1, 15));
    assert_eq!(shift_weeks(start, -1), date(2024, 1, 1));
    assert_eq!(shift_weeks(start, 0), start);
    // Across a year boundary.
    assert_eq!(shift_weeks(date(2024, 1, 1), -1), date(2023, 12, 25));
}

#[test]
fn test_week_label_spells_out_the_span() {
    assert_eq!(week_label(date(2024, 1, 8)), "Jan 8 - Jan 14, 2024");
    assert_eq!(week_label(date(2023, 12, 25)), "Dec 25 - Dec 31, 2023");
}

#[tokio::test]
async fn test_planner_navigation_stays_on_mondays() -> Result<()> {
    let (_store, mut planner) = planner_with_store();
    assert_eq!(planner.current_week_start(), date(2024, 1, 8));

    planner.shift_week(1);
    assert_eq!(planner.current_week_start(), date(2024, 1, 15));
    planner.shift_week(-3);
    assert_eq!(planner.current_week_start(), date(2023, 12, 25));

    planner.go_to_today();
    let expected = week_start(chrono::Local::now().date_naive());
    assert_eq!(planner.current_week_start(), expected);
    assert_eq!(planner.current_week_start().weekday(), Weekday::Mon);
    Ok(())
}

#[tokio::test]
async fn test_week_view_renders_slots_and_marks_missing_recipes() -> Result<()> {
    let (_store, mut planner) = planner_with_store();
    planner.load_all().await?;
    let recipe = planner
        .create_recipe(simple_recipe_draft("Oat Bowl", 300.0, 10.0))
        .await?;
    planner
        .create_meal_entry(MealEntryDraft {
            date: date(2024, 1, 8),
            meal_type: MealType::Breakfast,
            source: MealSource::Recipe {
                recipe_id: recipe.id,
            },
        })
        .await?;
    planner
        .create_meal_entry(MealEntryDraft {
            date: date(2024, 1, 9),
            meal_type: MealType::Dinner,
            source: MealSource::Custom {
                custom_text: "Takeaway".to_owned(),
            },
        })
        .await?;

    let view = planner.week_view();
    assert_eq!(view.label, "Jan 8 - Jan 14, 2024");
    assert_eq!(view.days.len(), 7);

    let monday = &view.days[0];
    assert_eq!(monday.weekday, "Monday");
    assert!(matches!(
        &monday.slots[0].view,
        MealSlotView::Recipe { name, .. } if name == "Oat Bowl"
    ));
    assert_eq!(monday.slots[1].view, MealSlotView::Empty);
    assert_eq!(monday.totals.calories, 300);

    let tuesday = &view.days[1];
    assert!(matches!(
        &tuesday.slots[2].view,
        MealSlotView::Custom { text, .. } if text == "Takeaway"
    ));
    assert_eq!(tuesday.totals.calories, 0);

    // Deleting the recipe flips its slot to the not-found rendering without
    // touching the entry itself.
    planner.delete_recipe(recipe.id).await?;
    let view = planner.week_view();
    assert!(matches!(
        view.days[0].slots[0].view,
        MealSlotView::RecipeMissing { .. }
    ));
    assert_eq!(view.days[0].totals.calories, 0);
    Ok(())
}
