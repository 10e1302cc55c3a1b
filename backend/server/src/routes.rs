use std::sync::Arc;

use axum::{
    Json,
    extract::{
        OriginalUri, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use chrono::Utc;
use menu::{DiningError, filters::MenuFilters};
use planner::{DayMenus, Meal, MealPlan, recommend};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{
    error::AppError,
    state::State,
    view::{MenuSummary, PlanRequest, PlanSummary, Selection},
};

#[derive(Deserialize)]
pub struct MenuQuery {
    date: Option<String>,
    meal: Option<String>,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    date: Option<String>,
    meal: Option<String>,
    #[serde(default)]
    vegan: bool,
    #[serde(default)]
    vegetarian: bool,
    #[serde(default)]
    high_protein: bool,
    #[serde(default)]
    low_calorie: bool,
}

fn required(date: Option<String>) -> Result<String, AppError> {
    date.filter(|d| !d.is_empty()).ok_or(AppError::MissingDate)
}

pub async fn test_handler(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    Json(json!({
        "message": "API is working!",
        "timestamp": Utc::now().to_rfc3339(),
        "path": uri.path(),
    }))
}

pub async fn menu_handler(
    AxumState(state): AxumState<Arc<State>>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let date = required(query.date)?;
    info!("Menu requested for {date}, meal {:?}", query.meal);

    let menu = state
        .dining
        .fetch_menu_for(&date, query.meal.as_deref())
        .await?;

    Ok(Json(menu))
}

pub async fn summary_handler(
    AxumState(state): AxumState<Arc<State>>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<MenuSummary>, AppError> {
    let Query(query) = query?;
    let date = required(query.date)?;
    let filters = MenuFilters {
        vegan: query.vegan,
        vegetarian: query.vegetarian,
        high_protein: query.high_protein,
        low_calorie: query.low_calorie,
    };

    let menu = state
        .dining
        .fetch_typed_menu(&date, query.meal.as_deref())
        .await?;

    Ok(Json(MenuSummary::new(&menu, &filters)))
}

pub async fn plan_handler(
    AxumState(state): AxumState<Arc<State>>,
    request: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<PlanSummary>, AppError> {
    let Json(request) = request?;
    let date = required(request.date)?;
    let goal = request.goal.unwrap_or(state.config.protein_goal);

    let menus = load_day(&state, &date).await?;
    let (plan, unresolved) = build_plan(&menus, request.selected);
    let recommendations = recommend(&plan, &menus, goal);

    let (selected, missing, picks) = (plan.len(), unresolved.len(), recommendations.len());
    info!("Plan for {date}: {selected} selected, {missing} unresolved, {picks} recommendations");

    let summary = PlanSummary::new(date, goal, &plan, unresolved, recommendations);
    Ok(Json(summary))
}

pub async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    warn!("API route not found: {}", uri.path());

    AppError::NotFound {
        path: uri.path().to_string(),
    }
}

/// Fetches all three meals at once. A meal the hall does not serve that day
/// is left out rather than failing the whole day.
async fn load_day(state: &State, date: &str) -> Result<DayMenus, AppError> {
    let (breakfast, lunch, dinner) = tokio::join!(
        state.dining.fetch_typed_menu(date, Some(Meal::Breakfast.as_str())),
        state.dining.fetch_typed_menu(date, Some(Meal::Lunch.as_str())),
        state.dining.fetch_typed_menu(date, Some(Meal::Dinner.as_str())),
    );

    let mut menus = DayMenus::new();

    for (meal, result) in Meal::ALL.into_iter().zip([breakfast, lunch, dinner]) {
        match result {
            Ok(menu) => {
                menus.insert(meal, menu);
            }
            Err(e @ DiningError::PeriodNotFound { .. }) => warn!("Skipping {meal}: {e}"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(menus)
}

fn build_plan(menus: &DayMenus, selections: Vec<Selection>) -> (MealPlan, Vec<Selection>) {
    let mut plan = MealPlan::new();
    let mut unresolved = Vec::new();

    for selection in selections {
        let item = menus.get(&selection.meal).and_then(|menu| {
            menu.period
                .categories
                .iter()
                .flat_map(|category| category.items.iter())
                .find(|item| item.id == selection.id)
        });

        let Some(item) = item else {
            unresolved.push(selection);
            continue;
        };

        let quantity = i64::from(selection.quantity.max(1));

        // repeated selections add up instead of toggling off
        if plan.is_selected(&item.id, selection.meal) {
            plan.update_quantity(&item.id, selection.meal, quantity);
        } else {
            plan.toggle(item, selection.meal);
            plan.update_quantity(&item.id, selection.meal, quantity - 1);
        }
    }

    (plan, unresolved)
}
