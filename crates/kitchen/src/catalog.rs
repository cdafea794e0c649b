//! Client-side catalog filtering.
//!
//! The recipe store has no query support, so every view is the full
//! collection narrowed here: first by shelf (everything, favorites or one
//! category), then by a case-insensitive substring search over titles and
//! ingredients.

use crate::recipe::{Category, Recipe};

/// Which part of the cookbook is being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shelf {
    /// Every recipe.
    #[default]
    All,
    /// Recipes this client has starred.
    Favorites,
    /// Recipes in one category.
    Category(Category),
}

/// A shelf plus an optional search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// The shelf to browse.
    pub shelf: Shelf,
    /// Search text; blank matches everything.
    pub query: Option<String>,
}

impl CatalogFilter {
    /// A filter showing every recipe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Browse the given shelf.
    #[must_use]
    pub fn shelf(mut self, shelf: Shelf) -> Self {
        self.shelf = shelf;
        self
    }

    /// Narrow by search text.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether `recipe` belongs in this view.
    ///
    /// Favorites are read from [`Recipe::is_favorite`], so the recipes must
    /// have been marked first.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let on_shelf = match self.shelf {
            Shelf::All => true,
            Shelf::Favorites => recipe.is_favorite,
            Shelf::Category(category) => recipe.category == category,
        };
        on_shelf && self.matches_query(recipe)
    }

    /// Keep the recipes in this view, preserving order.
    #[must_use]
    pub fn apply(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_query(&self, recipe: &Recipe) -> bool {
        let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) else {
            return true;
        };
        let needle = query.to_lowercase();
        recipe.title.to_lowercase().contains(&needle)
            || recipe
                .ingredients
                .iter()
                .any(|line| line.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_default_shows_everything() {
        let recipes = seed::demo_records(0);
        assert_eq!(CatalogFilter::new().apply(recipes.clone()), recipes);
    }

    #[test]
    fn test_category_shelf() {
        let filtered = CatalogFilter::new()
            .shelf(Shelf::Category(Category::Desserts))
            .apply(seed::demo_records(0));
        assert_eq!(titles(&filtered), vec!["Grandma's Apple Crisp"]);
    }

    #[test]
    fn test_empty_category() {
        let filtered = CatalogFilter::new()
            .shelf(Shelf::Category(Category::Breads))
            .apply(seed::demo_records(0));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_favorites_shelf() {
        let mut recipes = seed::demo_records(0);
        recipes[3].is_favorite = true;

        let filtered = CatalogFilter::new().shelf(Shelf::Favorites).apply(recipes);
        assert_eq!(titles(&filtered), vec!["Zesty Pasta Salad"]);
    }

    #[test]
    fn test_search_title_case_insensitive() {
        let filtered = CatalogFilter::new()
            .query("ROAST")
            .apply(seed::demo_records(0));
        assert_eq!(titles(&filtered), vec!["Sunday Roast Beef"]);
    }

    #[test]
    fn test_search_ingredients() {
        let filtered = CatalogFilter::new()
            .query("sour cream")
            .apply(seed::demo_records(0));
        assert_eq!(titles(&filtered), vec!["Famous Cactus Dip"]);
    }

    #[test]
    fn test_blank_query_matches_all() {
        let filtered = CatalogFilter::new().query("").apply(seed::demo_records(0));
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_shelf_and_query_combine() {
        let filtered = CatalogFilter::new()
            .shelf(Shelf::Category(Category::Appetizers))
            .query("beef")
            .apply(seed::demo_records(0));
        assert!(filtered.is_empty());
    }
}
