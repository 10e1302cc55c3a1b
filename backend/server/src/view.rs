//! Response shapes for the typed endpoints. The raw menu endpoint never goes
//! through here.
use std::collections::BTreeMap;

use menu::{
    filters::{MenuFilters, highest_protein, is_vegan, is_vegetarian},
    models::{Category, MenuItem, MenuResponse, Nutrient},
    nutrients::{CARBS, Macros, PROTEIN, SUGAR, find, find_fat, format_nutrient_value},
};
use planner::{Meal, MealPlan, NutritionTotals, Recommendation, SelectedItem};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct MenuSummary {
    pub period: String,
    pub active_filters: usize,
    pub categories: Vec<CategorySummary>,
}

#[derive(Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub highest_protein: Option<String>,
    pub items: Vec<ItemSummary>,
}

#[derive(Serialize)]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    pub vegan: bool,
    pub vegetarian: bool,
    pub macros: Macros,
    pub display: MacroDisplay,
}

/// Formatted macro strings, e.g. `"12g"`. `None` when the item does not list
/// that nutrient.
#[derive(Serialize)]
pub struct MacroDisplay {
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fat: Option<String>,
    pub sugar: Option<String>,
}

impl MenuSummary {
    pub fn new(menu: &MenuResponse, filters: &MenuFilters) -> Self {
        Self {
            period: menu.period.name.clone(),
            active_filters: filters.active_count(),
            categories: filters
                .apply(&menu.period.categories)
                .iter()
                .map(CategorySummary::new)
                .collect(),
        }
    }
}

impl CategorySummary {
    fn new(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            highest_protein: highest_protein(category).map(|(item, _)| item.id.clone()),
            items: category.items.iter().map(ItemSummary::new).collect(),
        }
    }
}

impl ItemSummary {
    fn new(item: &MenuItem) -> Self {
        let display = |nutrient: Option<&Nutrient>| {
            nutrient.map(|n| format_nutrient_value(&n.value, n.uom.as_deref()))
        };

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            vegan: is_vegan(item),
            vegetarian: is_vegetarian(item),
            macros: Macros::of(item),
            display: MacroDisplay {
                protein: display(find(item, PROTEIN)),
                carbs: display(find(item, CARBS)),
                fat: display(find_fat(item)),
                sugar: display(find(item, SUGAR)),
            },
        }
    }
}

#[derive(Deserialize)]
pub struct PlanRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub selected: Vec<Selection>,
    pub goal: Option<f64>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Selection {
    pub id: String,
    pub meal: Meal,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Serialize)]
pub struct PlanSummary {
    pub date: String,
    pub goal: f64,
    pub totals: NutritionTotals,
    pub progress_percent: f64,
    pub remaining_protein: f64,
    pub goal_met: bool,
    pub meal_counts: BTreeMap<Meal, usize>,
    pub selected: Vec<SelectedItem>,
    pub unresolved: Vec<Selection>,
    pub recommendations: Vec<Recommendation>,
}

impl PlanSummary {
    pub fn new(
        date: String,
        goal: f64,
        plan: &MealPlan,
        unresolved: Vec<Selection>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            date,
            goal,
            totals: plan.totals(),
            progress_percent: plan.progress_percent(goal),
            remaining_protein: plan.remaining_protein(goal),
            goal_met: plan.goal_met(goal),
            meal_counts: Meal::ALL
                .into_iter()
                .map(|meal| (meal, plan.by_meal(meal).count()))
                .collect(),
            selected: plan.items().to_vec(),
            unresolved,
            recommendations,
        }
    }
}
