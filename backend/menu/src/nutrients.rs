//! # Nutrients
//!
//! Nutrition fields come back from the dining API as free text such as
//! `"12g"`, `"Less than 1g"` or `"-"`. Everything here reduces them to numbers
//! so the filters and the planner can do arithmetic on them.
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::{Calories, MenuItem, Nutrient, NutrientValue};

pub const PROTEIN: &str = "protein";
pub const CARBS: &str = "carb";
pub const FAT: &str = "fat";
pub const SATURATED: &str = "saturated";
pub const SUGAR: &str = "sugar";

pub const DEFAULT_UOM: &str = "g";

static LESS_THAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)less than\s*(\d+\.?\d*)").unwrap());
static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d.]").unwrap());
static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
}

impl Macros {
    pub fn of(item: &MenuItem) -> Self {
        Self {
            calories: parse_calories(&item.calories),
            protein: protein(item),
            carbs: carbs(item),
            fat: fat(item),
            sugar: sugar(item),
        }
    }
}

pub fn parse_nutrient_value(value: &NutrientValue) -> f64 {
    let text = value.as_text().to_lowercase();

    if text.contains("less than") {
        if let Some(number) = LESS_THAN
            .captures(&text)
            .and_then(|caps| caps[1].parse::<f64>().ok())
        {
            return number;
        }
    }

    let digits = NON_NUMERIC.replace_all(&text, "");
    if digits.is_empty() {
        return 0.0;
    }

    digits.parse().unwrap_or(0.0)
}

/// Renders a value with its unit, e.g. `"Less than 1g"` becomes `"1g"`.
/// Text with no number in it is returned as-is.
pub fn format_nutrient_value(value: &NutrientValue, uom: Option<&str>) -> String {
    let uom = uom.unwrap_or(DEFAULT_UOM);
    let text = value.as_text();

    if text.to_lowercase().contains("less than") {
        let number = LESS_THAN.captures(&text).map(|caps| caps[1].to_string());

        return match number {
            Some(number) => format!("{number}{uom}"),
            None => text,
        };
    }

    let digits = NON_NUMERIC.replace_all(&text, "").into_owned();
    if digits.is_empty() {
        text
    } else {
        format!("{digits}{uom}")
    }
}

pub fn parse_calories(calories: &Calories) -> f64 {
    match calories {
        Calories::Number(n) => *n,
        Calories::Text(s) => LEADING_INT
            .captures(s)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .unwrap_or(0.0),
        Calories::Missing => 0.0,
    }
}

/// First nutrient whose name contains `keyword`, ignoring case.
pub fn find<'a>(item: &'a MenuItem, keyword: &str) -> Option<&'a Nutrient> {
    item.nutrients
        .iter()
        .find(|n| n.name.to_lowercase().contains(keyword))
}

fn value_of(nutrient: Option<&Nutrient>) -> f64 {
    nutrient.map_or(0.0, |n| parse_nutrient_value(&n.value))
}

pub fn protein(item: &MenuItem) -> f64 {
    value_of(find(item, PROTEIN))
}

pub fn carbs(item: &MenuItem) -> f64 {
    value_of(find(item, CARBS))
}

pub fn fat(item: &MenuItem) -> f64 {
    value_of(find_fat(item))
}

pub fn sugar(item: &MenuItem) -> f64 {
    value_of(find(item, SUGAR))
}

// "Saturated Fat" usually precedes "Total Fat" in the list.
pub fn find_fat(item: &MenuItem) -> Option<&Nutrient> {
    item.nutrients.iter().find(|n| {
        let name = n.name.to_lowercase();
        name.contains(FAT) && !name.contains(SATURATED)
    })
}
