//! Core recipe types for kitchen.
//!
//! This module defines the recipe record shared by every backend, the
//! caller-facing draft used to create new recipes, and the fixed category
//! enumeration.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::avatar::avatar_color;
use crate::error::{Error, Result};

/// The section of the cookbook a recipe belongs to.
///
/// Serialized as its display label, which is also how the remote store
/// keeps it (`"Soups & Salads"`, not `"soups_salads"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Starters and dips.
    #[serde(rename = "Appetizers")]
    Appetizers,
    /// Soups and salads.
    #[serde(rename = "Soups & Salads")]
    SoupsSalads,
    /// Breads and rolls.
    #[serde(rename = "Breads")]
    Breads,
    /// Main courses.
    #[serde(rename = "Main Dishes")]
    MainDishes,
    /// Side dishes.
    #[serde(rename = "Side Dishes")]
    SideDishes,
    /// Desserts.
    #[serde(rename = "Desserts")]
    Desserts,
    /// Sauces and gravies.
    #[serde(rename = "Sauces")]
    Sauces,
}

impl Category {
    /// Every category, in cookbook order.
    pub const ALL: [Self; 7] = [
        Self::Appetizers,
        Self::SoupsSalads,
        Self::Breads,
        Self::MainDishes,
        Self::SideDishes,
        Self::Desserts,
        Self::Sauces,
    ];

    /// The display label of this category.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Appetizers => "Appetizers",
            Self::SoupsSalads => "Soups & Salads",
            Self::Breads => "Breads",
            Self::MainDishes => "Main Dishes",
            Self::SideDishes => "Side Dishes",
            Self::Desserts => "Desserts",
            Self::Sauces => "Sauces",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A recipe as supplied by a caller before it has ever been saved.
///
/// Carries no id, timestamp or color: those belong to the write path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    /// Recipe title.
    pub title: String,
    /// Cookbook section.
    pub category: Category,
    /// Ingredient lines, in order.
    pub ingredients: Vec<String>,
    /// Preparation steps, in order.
    pub instructions: Vec<String>,
    /// Name of the family member who contributed the recipe.
    pub added_by: String,
    /// How much the recipe makes (e.g. "3 cups").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yields: Option<String>,
    /// Preparation time (e.g. "10m").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    /// Cooking time (e.g. "4h").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    /// Oven temperature (e.g. "325°F").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    /// Link to a photo of the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// A short story about the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecipeDraft {
    /// Create a draft with the required fields and no optional metadata.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: Category,
        ingredients: Vec<String>,
        instructions: Vec<String>,
        added_by: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            ingredients,
            instructions,
            added_by: added_by.into(),
            yields: None,
            prep_time: None,
            cook_time: None,
            temp: None,
            image_url: None,
            description: None,
        }
    }
}

/// A saved (or about to be saved) recipe.
///
/// The serialized form is exactly the stored document: `isFavorite` is a
/// client-side flag and never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Identifier assigned by the backend on first write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Recipe title.
    pub title: String,
    /// Cookbook section.
    pub category: Category,
    /// Ingredient lines, in order.
    pub ingredients: Vec<String>,
    /// Preparation steps, in order.
    pub instructions: Vec<String>,
    /// Name of the family member who contributed the recipe.
    pub added_by: String,
    /// Avatar color derived from `added_by` at write time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_color: Option<String>,
    /// How much the recipe makes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yields: Option<String>,
    /// Preparation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    /// Cooking time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    /// Oven temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<String>,
    /// Link to a photo of the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// A short story about the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// Whether the local user has starred this recipe.
    #[serde(skip)]
    pub is_favorite: bool,
}

impl Recipe {
    /// Build an unsaved recipe from a draft, stamping the creation time and
    /// deriving the avatar color.
    #[must_use]
    pub fn from_draft(draft: RecipeDraft, timestamp: i64) -> Self {
        let user_color = Some(avatar_color(&draft.added_by));
        Self {
            id: None,
            title: draft.title,
            category: draft.category,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            added_by: draft.added_by,
            user_color,
            yields: draft.yields,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            temp: draft.temp,
            image_url: draft.image_url,
            description: draft.description,
            timestamp,
            is_favorite: false,
        }
    }

    /// Return a copy of this recipe carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Strip blank list entries, check the required fields and re-derive the
    /// avatar color. Applied on every write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecipe`] if the title is blank or no
    /// ingredient or instruction survives cleaning.
    pub fn normalize(&mut self) -> Result<()> {
        self.ingredients = clean_lines(std::mem::take(&mut self.ingredients));
        self.instructions = clean_lines(std::mem::take(&mut self.instructions));

        if self.title.trim().is_empty() {
            return Err(Error::invalid_recipe("title must not be blank"));
        }
        if self.ingredients.is_empty() {
            return Err(Error::invalid_recipe(
                "at least one ingredient is required",
            ));
        }
        if self.instructions.is_empty() {
            return Err(Error::invalid_recipe(
                "at least one instruction step is required",
            ));
        }

        self.user_color = Some(avatar_color(&self.added_by));
        Ok(())
    }

    /// The time shown on a recipe card: cook time, then prep time.
    #[must_use]
    pub fn display_time(&self) -> Option<&str> {
        self.cook_time.as_deref().or(self.prep_time.as_deref())
    }

    /// The avatar color, falling back to the resolver for records written
    /// before colors were stored.
    #[must_use]
    pub fn color(&self) -> String {
        self.user_color
            .clone()
            .unwrap_or_else(|| avatar_color(&self.added_by))
    }
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Drop empty and whitespace-only entries, keeping order.
#[must_use]
pub fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}
