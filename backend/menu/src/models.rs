use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_API_BASE: &str = "https://apiv4.dineoncampus.com";

/// 459 Commons.
pub const DEFAULT_LOCATION_ID: &str = "66c79443351d5300dddee979";

#[derive(Deserialize, Debug, Default)]
pub struct PeriodsResponse {
    #[serde(default)]
    pub periods: Option<Vec<Period>>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Period {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct MenuResponse {
    pub period: MenuPeriod,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct MenuPeriod {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub calories: Calories,
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    #[serde(default)]
    pub filters: Vec<DietFilter>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Nutrient {
    pub name: String,
    #[serde(default)]
    pub value: NutrientValue,
    #[serde(default)]
    pub uom: Option<String>,
}

/// Free-text or numeric nutrition field, e.g. `"Less than 1g"` or `12`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(untagged)]
pub enum Calories {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct DietFilter {
    pub name: String,
    #[serde(default, deserialize_with = "truthy")]
    pub icon: bool,
}

// Icons arrive as booleans, URLs or nulls depending on the item.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl NutrientValue {
    pub fn as_text(&self) -> String {
        match self {
            NutrientValue::Number(n) => n.to_string(),
            NutrientValue::Text(s) => s.clone(),
            NutrientValue::Missing => String::new(),
        }
    }
}
