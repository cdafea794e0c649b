//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and how their
//! arguments map onto recipe drafts and catalog filters.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::avatar::GUEST;
use crate::catalog::{CatalogFilter, Shelf};
use crate::recipe::{Category, Recipe, RecipeDraft};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show recipes in this category
    #[arg(long, value_enum, conflicts_with = "favorites")]
    pub category: Option<CategoryArg>,

    /// Only show starred recipes
    #[arg(long)]
    pub favorites: bool,

    /// Search titles and ingredients
    #[arg(short, long)]
    pub search: Option<String>,

    /// Cards or one row per recipe
    #[arg(long, value_enum, default_value = "grid")]
    pub view: ViewMode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl ListCommand {
    /// The catalog filter these arguments describe.
    #[must_use]
    pub fn filter(&self) -> CatalogFilter {
        let shelf = match (self.favorites, self.category) {
            (true, _) => Shelf::Favorites,
            (false, Some(category)) => Shelf::Category(category.into()),
            (false, None) => Shelf::All,
        };
        CatalogFilter {
            shelf,
            query: self.search.clone(),
        }
    }
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Recipe id
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Optional recipe details shared by `add` and `edit`.
#[derive(Debug, Default, Args)]
pub struct RecipeDetails {
    /// How much the recipe makes (e.g. "3 cups")
    #[arg(long)]
    pub yields: Option<String>,

    /// Preparation time (e.g. "10m")
    #[arg(long)]
    pub prep_time: Option<String>,

    /// Cooking time (e.g. "4h")
    #[arg(long)]
    pub cook_time: Option<String>,

    /// Oven temperature (e.g. "325°F")
    #[arg(long)]
    pub temp: Option<String>,

    /// Link to a photo of the dish
    #[arg(long)]
    pub image_url: Option<String>,

    /// A short story about the dish
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Recipe title
    #[arg(short, long)]
    pub title: String,

    /// Cookbook section
    #[arg(long, value_enum, default_value = "main-dishes")]
    pub category: CategoryArg,

    /// Ingredient line (repeat for each ingredient)
    #[arg(short, long = "ingredient", value_name = "LINE", required = true)]
    pub ingredients: Vec<String>,

    /// Preparation step (repeat for each step)
    #[arg(short, long = "step", value_name = "STEP", required = true)]
    pub steps: Vec<String>,

    /// Who contributed the recipe
    #[arg(short, long, default_value = "Nan")]
    pub added_by: String,

    /// Optional details
    #[command(flatten)]
    pub details: RecipeDetails,

    /// Print the saved recipe as JSON
    #[arg(long)]
    pub json: bool,
}

impl AddCommand {
    /// The draft these arguments describe.
    #[must_use]
    pub fn to_draft(&self) -> RecipeDraft {
        let added_by = if self.added_by.trim().is_empty() {
            GUEST.to_string()
        } else {
            self.added_by.clone()
        };
        let mut draft = RecipeDraft::new(
            self.title.clone(),
            self.category.into(),
            self.ingredients.clone(),
            self.steps.clone(),
            added_by,
        );
        draft.yields.clone_from(&self.details.yields);
        draft.prep_time.clone_from(&self.details.prep_time);
        draft.cook_time.clone_from(&self.details.cook_time);
        draft.temp.clone_from(&self.details.temp);
        draft.image_url.clone_from(&self.details.image_url);
        draft.description.clone_from(&self.details.description);
        draft
    }
}

/// Edit command arguments. Only the given fields change; ingredients and
/// steps are replaced as a whole when given.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Recipe id
    pub id: String,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New cookbook section
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Replacement ingredient list (repeat for each ingredient)
    #[arg(short, long = "ingredient", value_name = "LINE")]
    pub ingredients: Vec<String>,

    /// Replacement step list (repeat for each step)
    #[arg(short, long = "step", value_name = "STEP")]
    pub steps: Vec<String>,

    /// New contributor
    #[arg(short, long)]
    pub added_by: Option<String>,

    /// Optional details
    #[command(flatten)]
    pub details: RecipeDetails,

    /// Print the saved recipe as JSON
    #[arg(long)]
    pub json: bool,
}

impl EditCommand {
    /// Apply the given fields to `recipe`.
    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title.clone_from(title);
        }
        if let Some(category) = self.category {
            recipe.category = category.into();
        }
        if !self.ingredients.is_empty() {
            recipe.ingredients.clone_from(&self.ingredients);
        }
        if !self.steps.is_empty() {
            recipe.instructions.clone_from(&self.steps);
        }
        if let Some(added_by) = &self.added_by {
            recipe.added_by.clone_from(added_by);
        }

        let details = &self.details;
        for (field, value) in [
            (&mut recipe.yields, &details.yields),
            (&mut recipe.prep_time, &details.prep_time),
            (&mut recipe.cook_time, &details.cook_time),
            (&mut recipe.temp, &details.temp),
            (&mut recipe.image_url, &details.image_url),
            (&mut recipe.description, &details.description),
        ] {
            if value.is_some() {
                field.clone_from(value);
            }
        }
    }
}

/// Favorite command arguments.
#[derive(Debug, Args)]
pub struct FavoriteCommand {
    /// Recipe id to star or unstar
    pub id: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration (API key masked)
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Category argument for filtering and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Appetizers
    Appetizers,
    /// Soups & Salads
    SoupsSalads,
    /// Breads
    Breads,
    /// Main Dishes
    MainDishes,
    /// Side Dishes
    SideDishes,
    /// Desserts
    Desserts,
    /// Sauces
    Sauces,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Appetizers => Self::Appetizers,
            CategoryArg::SoupsSalads => Self::SoupsSalads,
            CategoryArg::Breads => Self::Breads,
            CategoryArg::MainDishes => Self::MainDishes,
            CategoryArg::SideDishes => Self::SideDishes,
            CategoryArg::Desserts => Self::Desserts,
            CategoryArg::Sauces => Self::Sauces,
        }
    }
}

/// How `list` lays out recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// One card per recipe
    #[default]
    Grid,
    /// One aligned row per recipe
    List,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
