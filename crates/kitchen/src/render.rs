//! Text rendering of recipes for the terminal.
//!
//! Three shapes: a card per recipe for the grid view, one row per recipe
//! for the list view, and a print-friendly detail page.

use std::fmt::Write as _;

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::recipe::Recipe;

/// Card time when a recipe has neither cook nor prep time.
const DEFAULT_CARD_TIME: &str = "30m";

/// Card yield when a recipe does not say.
const DEFAULT_CARD_YIELDS: &str = "4";

/// Detail page placeholder for missing metadata.
const MISSING: &str = "--";

/// Footer printed under every detail page.
pub const PRINT_FOOTER: &str = "From Shirley's Kitchen - Established 1974";

fn star(recipe: &Recipe) -> &'static str {
    if recipe.is_favorite {
        "*"
    } else {
        " "
    }
}

fn card_time(recipe: &Recipe) -> &str {
    recipe.display_time().unwrap_or(DEFAULT_CARD_TIME)
}

fn card_yields(recipe: &Recipe) -> &str {
    recipe.yields.as_deref().unwrap_or(DEFAULT_CARD_YIELDS)
}

/// Initial shown in the contributor badge.
#[must_use]
pub fn initial(name: &str) -> char {
    name.chars().next().unwrap_or('?')
}

/// The creation date of a recipe, `YYYY-MM-DD` in UTC.
#[must_use]
pub fn added_on(recipe: &Recipe) -> String {
    Utc.timestamp_millis_opt(recipe.timestamp)
        .single()
        .map_or_else(|| MISSING.to_string(), |t| t.format("%Y-%m-%d").to_string())
}

/// A recipe card for the grid view.
#[must_use]
pub fn card(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  [{}]",
        star(recipe),
        recipe.category.label().to_uppercase(),
        recipe.id.as_deref().unwrap_or(MISSING)
    );
    let _ = writeln!(out, "  {}", recipe.title);
    if let Some(description) = &recipe.description {
        let _ = writeln!(out, "  {description}");
    }
    let _ = writeln!(
        out,
        "  Time {}  Yields {}  ({}) {} {}",
        card_time(recipe),
        card_yields(recipe),
        initial(&recipe.added_by),
        recipe.added_by,
        recipe.color()
    );
    out
}

/// Column headers of the list view.
const LIST_HEADERS: [&str; 6] = ["", "ID", "TITLE", "CATEGORY", "TIME", "ADDED BY"];

fn list_cells(recipe: &Recipe) -> [String; 6] {
    [
        star(recipe).to_string(),
        recipe.id.clone().unwrap_or_else(|| MISSING.to_string()),
        recipe.title.clone(),
        recipe.category.label().to_string(),
        card_time(recipe).to_string(),
        recipe.added_by.clone(),
    ]
}

/// The list view: one aligned row per recipe under a header row.
#[must_use]
pub fn list(recipes: &[Recipe]) -> String {
    let rows: Vec<[String; 6]> = recipes.iter().map(list_cells).collect();

    let mut widths = LIST_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = LIST_HEADERS.map(str::to_string);
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// A single plain line: id, title and contributor.
#[must_use]
pub fn line(recipe: &Recipe) -> String {
    format!(
        "{}{}  {} ({}, by {})",
        star(recipe),
        recipe.id.as_deref().unwrap_or(MISSING),
        recipe.title,
        recipe.category,
        recipe.added_by
    )
}

/// JSON view of a recipe: the stored fields plus the local favorite flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeJson<'a> {
    #[serde(flatten)]
    recipe: &'a Recipe,
    is_favorite: bool,
}

impl<'a> From<&'a Recipe> for RecipeJson<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            recipe,
            is_favorite: recipe.is_favorite,
        }
    }
}

/// The print-friendly detail page.
#[must_use]
pub fn detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.category.label().to_uppercase());
    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(
        out,
        "Submitted by {} ({})",
        recipe.added_by,
        recipe.color()
    );
    let _ = writeln!(out, "Added {}", added_on(recipe));
    if let Some(url) = &recipe.image_url {
        let _ = writeln!(out, "Photo: {url}");
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "Time: {}  |  Temp: {}  |  Yields: {}",
        recipe.display_time().unwrap_or(MISSING),
        recipe.temp.as_deref().unwrap_or(MISSING),
        recipe.yields.as_deref().unwrap_or(MISSING)
    );

    if let Some(description) = &recipe.description {
        let _ = writeln!(out, "\n\"{description}\"");
    }

    out.push_str("\nIngredients\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {ingredient}");
    }

    out.push_str("\nPreparation\n");
    for (index, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "Step {}", index + 1);
        let _ = writeln!(out, "  {step}");
    }

    let _ = writeln!(out, "\n{PRINT_FOOTER}");
    out
}
