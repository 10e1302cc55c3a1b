//! # Planner
//!
//! Day planning against a protein goal.
//!
//! ## Plan
//! - A selection is a menu item under a meal, with a quantity of at least one.
//! - The same item picked for lunch and for dinner counts as two selections.
//! - Totals are per-item macros multiplied by quantity.
//!
//! ## Recommendations
//! - Only offered while protein is still short of the goal.
//! - Candidates are every item on the loaded menus not already selected for
//!   that meal.
//! - Score: `protein * (protein / calories) * sugar_penalty`, where items with
//!   more than 15g of sugar are halved. Top three win.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub mod plan;
pub mod recommend;

pub use plan::{GoalWatcher, MealPlan, NutritionTotals, SelectedItem, Toggle};
pub use recommend::{DayMenus, Recommendation, recommend};

pub const DEFAULT_PROTEIN_GOAL: f64 = 145.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Meal::Breakfast),
            "lunch" => Ok(Meal::Lunch),
            "dinner" => Ok(Meal::Dinner),
            other => Err(format!("Unknown meal {other}")),
        }
    }
}
