use menu::{models::MenuItem, nutrients::Macros};
use serde::Serialize;

use crate::Meal;

#[derive(Serialize, Clone, Debug)]
pub struct SelectedItem {
    pub item: MenuItem,
    pub meal: Meal,
    pub quantity: u32,
}

impl SelectedItem {
    fn is(&self, item_id: &str, meal: Meal) -> bool {
        self.item.id == item_id && self.meal == meal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct NutritionTotals {
    pub protein: f64,
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
}

#[derive(Clone, Debug, Default)]
pub struct MealPlan {
    items: Vec<SelectedItem>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds the item under `meal` with quantity one, or removes it if it is
    /// already there.
    pub fn toggle(&mut self, item: &MenuItem, meal: Meal) -> Toggle {
        match self.items.iter().position(|s| s.is(&item.id, meal)) {
            Some(index) => {
                self.items.remove(index);
                Toggle::Removed
            }
            None => {
                self.items.push(SelectedItem {
                    item: item.clone(),
                    meal,
                    quantity: 1,
                });
                Toggle::Added
            }
        }
    }

    /// Quantity never drops below one. Unknown selections are ignored.
    pub fn update_quantity(&mut self, item_id: &str, meal: Meal, delta: i64) {
        if let Some(selected) = self.items.iter_mut().find(|s| s.is(item_id, meal)) {
            let quantity = (i64::from(selected.quantity) + delta).max(1);
            selected.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn is_selected(&self, item_id: &str, meal: Meal) -> bool {
        self.items.iter().any(|s| s.is(item_id, meal))
    }

    pub fn quantity_of(&self, item_id: &str, meal: Meal) -> u32 {
        self.items
            .iter()
            .find(|s| s.is(item_id, meal))
            .map_or(0, |s| s.quantity)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn by_meal(&self, meal: Meal) -> impl Iterator<Item = &SelectedItem> {
        self.items.iter().filter(move |s| s.meal == meal)
    }

    pub fn totals(&self) -> NutritionTotals {
        self.items
            .iter()
            .fold(NutritionTotals::default(), |mut totals, selected| {
                let macros = Macros::of(&selected.item);
                let quantity = f64::from(selected.quantity);

                totals.protein += macros.protein * quantity;
                totals.calories += macros.calories * quantity;
                totals.carbs += macros.carbs * quantity;
                totals.fat += macros.fat * quantity;
                totals.sugar += macros.sugar * quantity;

                totals
            })
    }

    pub fn progress_percent(&self, goal: f64) -> f64 {
        if goal <= 0.0 {
            return 100.0;
        }

        (self.totals().protein / goal * 100.0).min(100.0)
    }

    pub fn remaining_protein(&self, goal: f64) -> f64 {
        (goal - self.totals().protein).max(0.0)
    }

    pub fn goal_met(&self, goal: f64) -> bool {
        self.totals().protein >= goal
    }
}

/// Edge detector for the protein goal: fires once when the goal goes from
/// unmet to met, and re-arms when it drops back below.
#[derive(Debug, Default)]
pub struct GoalWatcher {
    was_met: bool,
}

impl GoalWatcher {
    pub fn observe(&mut self, total_protein: f64, goal: f64) -> bool {
        let met = total_protein >= goal;
        let crossed = met && !self.was_met;

        self.was_met = met;
        crossed
    }
}
