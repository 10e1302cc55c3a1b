use serde::Deserialize;

use crate::{
    models::{Category, MenuItem},
    nutrients::{parse_calories, protein},
};

pub const VEGAN: &str = "Vegan";
pub const VEGETARIAN: &str = "Vegetarian";

pub const HIGH_PROTEIN_GRAMS: f64 = 20.0;
pub const LOW_CALORIE_LIMIT: f64 = 400.0;

#[derive(Deserialize, Clone, Copy, Debug, Default)]
#[serde(default)]
pub struct MenuFilters {
    pub vegan: bool,
    pub vegetarian: bool,
    pub high_protein: bool,
    pub low_calorie: bool,
}

impl MenuFilters {
    pub fn active_count(&self) -> usize {
        [self.vegan, self.vegetarian, self.high_protein, self.low_calorie]
            .into_iter()
            .filter(|&on| on)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.vegan && !is_vegan(item) {
            return false;
        }

        // vegan items count as vegetarian
        if self.vegetarian && !(is_vegan(item) || is_vegetarian(item)) {
            return false;
        }

        if self.high_protein && protein(item) < HIGH_PROTEIN_GRAMS {
            return false;
        }

        if self.low_calorie && parse_calories(&item.calories) >= LOW_CALORIE_LIMIT {
            return false;
        }

        true
    }

    /// With no filter on, categories pass through untouched. Otherwise
    /// categories left without items are dropped.
    pub fn apply(&self, categories: &[Category]) -> Vec<Category> {
        if self.is_empty() {
            return categories.to_vec();
        }

        categories
            .iter()
            .map(|category| Category {
                items: category
                    .items
                    .iter()
                    .filter(|item| self.matches(item))
                    .cloned()
                    .collect(),
                ..category.clone()
            })
            .filter(|category| !category.items.is_empty())
            .collect()
    }
}

fn has_filter(item: &MenuItem, name: &str) -> bool {
    item.filters.iter().any(|f| f.name == name && f.icon)
}

pub fn is_vegan(item: &MenuItem) -> bool {
    has_filter(item, VEGAN)
}

pub fn is_vegetarian(item: &MenuItem) -> bool {
    has_filter(item, VEGETARIAN)
}

/// First item holding the strictly greatest protein value. `None` when the
/// category is empty or nothing in it has any protein.
pub fn highest_protein(category: &Category) -> Option<(&MenuItem, f64)> {
    let first = category.items.first()?;

    let (item, value) = category
        .items
        .iter()
        .map(|item| (item, protein(item)))
        .fold((first, 0.0), |max, curr| if curr.1 > max.1 { curr } else { max });

    (value > 0.0).then_some((item, value))
}
