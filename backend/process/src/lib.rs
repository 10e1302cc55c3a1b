//! # Menu Scan
//!
//! Walks a window of days around today and reports, for each day, which meal
//! periods the hall serves and the best protein picks for an empty plan.
//!
//! ## Flow
//! 1. For each date, fetch every requested meal (periods, then menu).
//! 2. Meals the hall does not serve that day are listed as skipped.
//! 3. Run the recommender against the loaded menus and print the top picks.
//! 4. Add the picks to a plan one by one and note the pick that meets the goal.
//!
//! Any other upstream failure stops the scan.
use anyhow::Result;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use menu::{DiningClient, DiningError};
use planner::{DayMenus, GoalWatcher, Meal, MealPlan, Recommendation, recommend};

pub mod utils;

use utils::{date_range, format, today};

pub struct DayReport {
    pub date: NaiveDate,
    pub served: Vec<Meal>,
    pub skipped: Vec<Meal>,
    pub recommendations: Vec<Recommendation>,
    /// 1-based rank of the pick that brings the plan to the goal.
    pub goal_reached_at: Option<usize>,
}

pub async fn scan_menus(
    client: &DiningClient,
    days_before: u32,
    days_after: u32,
    meals: &[Meal],
    goal: f64,
) -> Result<()> {
    println!("Location: {}", client.location_id());
    println!("Protein goal: {goal}g\n");

    let reports = fetch_range(client, days_before, days_after, meals, goal).await?;

    for report in &reports {
        print_report(report);
    }

    let empty = reports.iter().filter(|r| r.served.is_empty()).count();
    if empty > 0 {
        println!("Days with nothing served: {empty}");
    }

    Ok(())
}

async fn fetch_day(
    client: &DiningClient,
    date: NaiveDate,
    meals: &[Meal],
    goal: f64,
) -> Result<DayReport> {
    let formatted = format(date);
    let mut menus = DayMenus::new();
    let mut skipped = Vec::new();

    for &meal in meals {
        match client.fetch_typed_menu(&formatted, Some(meal.as_str())).await {
            Ok(menu) => {
                menus.insert(meal, menu);
            }
            Err(DiningError::PeriodNotFound { .. }) => skipped.push(meal),
            Err(e) => return Err(e.into()),
        }
    }

    let recommendations = recommend(&MealPlan::new(), &menus, goal);
    let goal_reached_at = goal_reached_at(&recommendations, goal);

    Ok(DayReport {
        date,
        served: menus.keys().copied().collect(),
        skipped,
        recommendations,
        goal_reached_at,
    })
}

pub fn goal_reached_at(picks: &[Recommendation], goal: f64) -> Option<usize> {
    let mut plan = MealPlan::new();
    let mut watcher = GoalWatcher::default();

    picks
        .iter()
        .position(|pick| {
            plan.toggle(&pick.item, pick.meal);
            watcher.observe(plan.totals().protein, goal)
        })
        .map(|index| index + 1)
}

async fn fetch_range(
    client: &DiningClient,
    days_before: u32,
    days_after: u32,
    meals: &[Meal],
    goal: f64,
) -> Result<Vec<DayReport>> {
    let dates = date_range(today(), days_before, days_after);

    let pb = ProgressBar::new(dates.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );

    let mut reports = Vec::with_capacity(dates.len());

    for date in dates {
        pb.set_message(format!("Fetching {date}"));

        reports.push(fetch_day(client, date, meals, goal).await?);

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(reports)
}

fn print_report(report: &DayReport) {
    println!("\n{}", report.date.format("%A, %B %-d, %Y"));

    if !report.skipped.is_empty() {
        let skipped: Vec<&str> = report.skipped.iter().map(Meal::as_str).collect();
        println!("  Not served: {}", skipped.join(", "));
    }

    if report.recommendations.is_empty() {
        println!("  No recommendations");
        return;
    }

    for (rank, pick) in report.recommendations.iter().enumerate() {
        println!(
            "  {}. {} ({}) {:.1}g protein, {} cal, score {:.3}",
            rank + 1,
            pick.item.name,
            pick.meal,
            pick.protein,
            pick.calories,
            pick.score
        );
    }

    match report.goal_reached_at {
        Some(rank) => println!("  Goal reached with pick {rank}"),
        None => println!("  Top picks fall short of the goal"),
    }
}
