use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use server::{app, config::Config, state::State};
use tokio::net::TcpListener;

const LOCATION: &str = "test-hall";

#[derive(Deserialize)]
struct UpstreamQuery {
    date: String,
    period: Option<String>,
}

async fn periods(
    Path(location): Path<String>,
    Query(query): Query<UpstreamQuery>,
) -> impl IntoResponse {
    if location != LOCATION {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }

    match query.date.as_str() {
        "2025-11-14" => Json(json!({
            "periods": [
                { "id": "p-breakfast", "name": "Breakfast" },
                { "id": "p-lunch", "name": "Lunch" },
                { "id": "p-dinner", "name": "Dinner" }
            ]
        }))
        .into_response(),
        "2025-11-15" => Json(json!({
            "periods": [
                { "id": "p-brunch", "name": "Brunch" },
                { "id": "p-dinner", "name": "Dinner" }
            ]
        }))
        .into_response(),
        "2025-11-16" => Json(json!({ "periods": [] })).into_response(),
        "2025-11-18" => Json(json!({
            "periods": [{ "id": "p-broken", "name": "Lunch" }]
        }))
        .into_response(),
        _ => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

fn food(id: &str, calories: u32, protein: &str, sugar: &str, vegan: bool) -> Value {
    json!({
        "id": id,
        "name": id,
        "calories": calories,
        "portion": "1 each",
        "nutrients": [
            { "name": "Protein (g)", "value": protein, "uom": "g" },
            { "name": "Total Carbohydrates (g)", "value": "10", "uom": "g" },
            { "name": "Saturated Fat (g)", "value": "1", "uom": "g" },
            { "name": "Total Fat (g)", "value": "5", "uom": "g" },
            { "name": "Sugar (g)", "value": sugar, "uom": "g" }
        ],
        "filters": [{ "name": "Vegan", "icon": vegan }]
    })
}

fn period_menu(period: &str) -> Value {
    let (name, items) = match period {
        "p-breakfast" => (
            "Breakfast",
            vec![
                food("eggs", 140, "12", "1", false),
                food("oatmeal", 150, "5", "Less than 1g", true),
            ],
        ),
        "p-lunch" => (
            "Lunch",
            vec![
                food("chicken", 250, "40", "1", false),
                food("tofu", 200, "20", "2", true),
            ],
        ),
        "p-dinner" => (
            "Dinner",
            vec![
                food("salmon", 400, "40", "0", false),
                food("cake", 450, "4", "30", true),
            ],
        ),
        _ => ("Brunch", vec![food("waffle", 500, "8", "20", false)]),
    };

    json!({
        "status": "success",
        "period": {
            "id": period,
            "name": name,
            "categories": [
                { "id": "entrees", "name": "Entrees", "items": items },
                { "id": "empty", "name": "Closed Station", "items": [] }
            ]
        }
    })
}

async fn menu(
    Path(location): Path<String>,
    Query(query): Query<UpstreamQuery>,
) -> impl IntoResponse {
    match query.period {
        Some(period) if period == "p-broken" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        Some(period) if location == LOCATION => Json(period_menu(&period)).into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

async fn start(static_dir: PathBuf) -> String {
    let upstream = Router::new()
        .route("/locations/{location}/periods/", get(periods))
        .route("/locations/{location}/menu", get(menu));
    let upstream = spawn(upstream).await;

    let config = Config {
        port: 0,
        api_base: format!("http://{upstream}"),
        location_id: LOCATION.to_string(),
        timeout: Duration::from_secs(5),
        protein_goal: 145.0,
        static_dir,
    };

    let address = spawn(app(State::new(config).unwrap())).await;
    format!("http://{address}")
}

async fn start_api_only() -> String {
    start(PathBuf::from("/nonexistent/dining-dist")).await
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();

    (status, response.json().await.unwrap())
}

async fn post_json(url: &str, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();

    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_endpoint() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/test")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is working!");
    assert_eq!(body["path"], "/api/test");
}

#[tokio::test]
async fn menu_passes_upstream_json_through() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-14&meal=LUNCH")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, period_menu("p-lunch"));
}

#[tokio::test]
async fn menu_defaults_to_first_period() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-14")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"]["id"], "p-breakfast");
}

#[tokio::test]
async fn menu_empty_meal_means_first_period() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-14&meal=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"]["name"], "Breakfast");
}

#[tokio::test]
async fn menu_requires_date() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?meal=lunch")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date parameter is required");

    let (status, _) = get_json(&format!("{base}/api/menu?date=11-14-2025")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn menu_unknown_meal_lists_periods() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-15&meal=lunch")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Meal period \"lunch\" not found for date 2025-11-15. Available periods: Brunch, Dinner"
    );

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-16&meal=lunch")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "Meal period \"lunch\" not found for date 2025-11-16. Available periods: none"
    );
}

#[tokio::test]
async fn menu_upstream_failure() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-17&meal=lunch")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch periods: 503");
}

#[tokio::test]
async fn menu_second_hop_failure() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/menu?date=2025-11-18&meal=lunch")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch menu: 503");
}

#[tokio::test]
async fn summary_filters_and_highlights() {
    let base = start_api_only().await;

    let url = format!("{base}/api/menu/summary?date=2025-11-14&meal=lunch");
    let (status, body) = get_json(&url).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "Lunch");
    assert_eq!(body["active_filters"], 0);
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);

    let entrees = &body["categories"][0];
    assert_eq!(entrees["highest_protein"], "chicken");
    assert_eq!(entrees["items"][0]["macros"]["protein"], 40.0);
    assert_eq!(entrees["items"][0]["macros"]["fat"], 5.0);
    assert_eq!(entrees["items"][0]["display"]["protein"], "40g");
    assert_eq!(body["categories"][1]["highest_protein"], Value::Null);

    let (status, body) = get_json(&format!("{url}&vegan=true")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_filters"], 1);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["items"][0]["id"], "tofu");
    assert_eq!(categories[0]["highest_protein"], "tofu");
}

#[tokio::test]
async fn plan_totals_and_recommendations() {
    let base = start_api_only().await;

    let (status, body) = post_json(
        &format!("{base}/api/plan"),
        json!({
            "date": "2025-11-14",
            "selected": [
                { "id": "eggs", "meal": "breakfast", "quantity": 2 },
                { "id": "chicken", "meal": "lunch" },
                { "id": "chicken", "meal": "dinner" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goal"], 145.0);
    assert_eq!(body["totals"]["protein"], 64.0);
    assert_eq!(body["totals"]["calories"], 530.0);
    assert_eq!(body["remaining_protein"], 81.0);
    assert_eq!(body["goal_met"], false);
    assert_eq!(body["meal_counts"]["breakfast"], 1);
    assert_eq!(body["meal_counts"]["lunch"], 1);
    assert_eq!(body["meal_counts"]["dinner"], 0);

    let unresolved = body["unresolved"].as_array().unwrap();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0]["id"], "chicken");

    // salmon 4.0, tofu 2.0, eggs is taken, oatmeal 0.17
    let picks: Vec<(&str, &str)> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["item"]["id"].as_str().unwrap(), r["meal"].as_str().unwrap()))
        .collect();
    assert_eq!(
        picks,
        vec![("salmon", "dinner"), ("tofu", "lunch"), ("oatmeal", "breakfast")]
    );
}

#[tokio::test]
async fn plan_skips_meals_not_served() {
    let base = start_api_only().await;

    let (status, body) = post_json(
        &format!("{base}/api/plan"),
        json!({ "date": "2025-11-15", "goal": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goal"], 10.0);

    let meals: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["meal"].as_str().unwrap())
        .collect();
    assert_eq!(meals, vec!["dinner", "dinner"]);
}

#[tokio::test]
async fn summary_rejects_malformed_flag() {
    let base = start_api_only().await;

    let url = format!("{base}/api/menu/summary?date=2025-11-14&meal=lunch&vegan=1");
    let (status, body) = get_json(&url).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Failed to deserialize query string"), "{error}");
    assert!(error.contains("vegan"), "{error}");
}

#[tokio::test]
async fn plan_repeated_selection_adds_quantity() {
    let base = start_api_only().await;

    let (status, body) = post_json(
        &format!("{base}/api/plan"),
        json!({
            "date": "2025-11-14",
            "selected": [
                { "id": "eggs", "meal": "breakfast", "quantity": 1 },
                { "id": "eggs", "meal": "breakfast", "quantity": 2 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let selected = body["selected"].as_array().unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["quantity"], 3);
    assert_eq!(body["totals"]["protein"], 36.0);
    assert_eq!(body["totals"]["calories"], 420.0);
}

#[tokio::test]
async fn plan_rejects_unknown_meal() {
    let base = start_api_only().await;

    let (status, body) = post_json(
        &format!("{base}/api/plan"),
        json!({
            "date": "2025-11-14",
            "selected": [{ "id": "waffle", "meal": "brunch" }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let error = body["error"].as_str().unwrap();
    assert!(error.contains("brunch"), "{error}");
}

#[tokio::test]
async fn plan_requires_date() {
    let base = start_api_only().await;

    let (status, body) = post_json(&format!("{base}/api/plan"), json!({ "selected": [] })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Date parameter is required");
}

#[tokio::test]
async fn unknown_api_route_is_json_404() {
    let base = start_api_only().await;

    let (status, body) = get_json(&format!("{base}/api/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "API endpoint not found");
    assert_eq!(body["path"], "/api/nope");
}

#[tokio::test]
async fn serves_front_end_with_index_fallback() {
    let dist = std::env::temp_dir().join(format!("dining-dist-{}", std::process::id()));
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("index.html"), "<html>planner</html>").unwrap();
    std::fs::write(dist.join("app.js"), "console.log(1)").unwrap();

    let base = start(dist.clone()).await;

    let asset = reqwest::get(format!("{base}/app.js")).await.unwrap();
    assert_eq!(asset.status().as_u16(), 200);
    assert_eq!(asset.text().await.unwrap(), "console.log(1)");

    let route = reqwest::get(format!("{base}/planner")).await.unwrap();
    assert_eq!(route.text().await.unwrap(), "<html>planner</html>");

    let (status, _) = get_json(&format!("{base}/api/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(dist).ok();
}
