use std::collections::BTreeMap;

use menu::{
    models::{MenuItem, MenuResponse},
    nutrients::{parse_calories, protein, sugar},
};
use serde::Serialize;

use crate::{Meal, MealPlan};

pub const MAX_RECOMMENDATIONS: usize = 3;
pub const SUGAR_LIMIT: f64 = 15.0;
pub const SUGAR_PENALTY: f64 = 0.5;

/// Loaded menus of a day, iterated breakfast first.
pub type DayMenus = BTreeMap<Meal, MenuResponse>;

#[derive(Serialize, Clone, Debug)]
pub struct Recommendation {
    pub item: MenuItem,
    pub meal: Meal,
    pub protein: f64,
    pub calories: f64,
    pub score: f64,
}

pub fn score(protein: f64, calories: f64, sugar: f64) -> f64 {
    let efficiency = if calories > 0.0 { protein / calories } else { 0.0 };
    let penalty = if sugar > SUGAR_LIMIT { SUGAR_PENALTY } else { 1.0 };

    protein * efficiency * penalty
}

pub fn recommend(plan: &MealPlan, menus: &DayMenus, goal: f64) -> Vec<Recommendation> {
    if plan.remaining_protein(goal) <= 0.0 {
        return Vec::new();
    }

    let mut scored: Vec<Recommendation> = menus
        .iter()
        .flat_map(|(&meal, menu)| {
            menu.period
                .categories
                .iter()
                .flat_map(|category| category.items.iter())
                .map(move |item| (meal, item))
        })
        .filter(|(meal, item)| !plan.is_selected(&item.id, *meal))
        .map(|(meal, item)| {
            let protein = protein(item);
            let calories = parse_calories(&item.calories);

            Recommendation {
                item: item.clone(),
                meal,
                protein,
                calories,
                score: score(protein, calories, sugar(item)),
            }
        })
        .collect();

    // stable, so ties keep menu order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);

    scored
}
