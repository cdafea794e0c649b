//! Example recipes used to bootstrap an empty catalog.
//!
//! Order matters: it decides the `demo-N` ids in demo mode and the write
//! order when seeding the remote store.

use crate::recipe::{Category, Recipe, RecipeDraft};

/// How far in the past each seed recipe is dated when seeded in demo mode.
const SEED_AGES_MS: [i64; 4] = [0, 10_000, 20_000, 50_000];

/// Prefix of the sequential ids given to seeded demo records.
pub const DEMO_ID_PREFIX: &str = "demo-";

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The fixed seed set, in seed order.
#[must_use]
pub fn seed_recipes() -> Vec<RecipeDraft> {
    let mut cactus_dip = RecipeDraft::new(
        "Famous Cactus Dip",
        Category::Appetizers,
        lines(&[
            "1 cup sour cream",
            "1 cup mayonnaise",
            "1 can chopped green chilies",
            "1 cup shredded cheddar cheese",
            "1/2 cup chopped green onions",
            "Dash of garlic powder",
        ]),
        lines(&[
            "Mix all ingredients in a medium bowl.",
            "Chill for at least 1 hour before serving.",
            "Serve with tortilla chips.",
        ]),
        "Nan",
    );
    cactus_dip.prep_time = Some("10m".to_string());
    cactus_dip.yields = Some("3 cups".to_string());
    cactus_dip.description =
        Some("The legendary family dip that disappears first at every gathering.".to_string());

    let mut roast_beef = RecipeDraft::new(
        "Sunday Roast Beef",
        Category::MainDishes,
        lines(&[
            "4lb beef roast",
            "2 onions, quartered",
            "4 carrots, chopped",
            "4 potatoes, quartered",
            "Salt and pepper",
            "1 cup beef broth",
        ]),
        lines(&[
            "Preheat oven to 325°F.",
            "Season roast generously with salt and pepper.",
            "Place in roasting pan with vegetables around it.",
            "Pour broth over everything.",
            "Roast for 3-4 hours until tender.",
        ]),
        "Shirley",
    );
    roast_beef.cook_time = Some("4h".to_string());
    roast_beef.temp = Some("325°F".to_string());
    roast_beef.description = Some("A staple for Sunday afternoons after church.".to_string());

    let mut apple_crisp = RecipeDraft::new(
        "Grandma's Apple Crisp",
        Category::Desserts,
        lines(&[
            "6 apples, sliced",
            "1 cup flour",
            "1 cup sugar",
            "1 tsp cinnamon",
            "1/2 cup butter, softened",
        ]),
        lines(&[
            "Place apples in a greased baking dish.",
            "Mix dry ingredients and cut in butter until crumbly.",
            "Sprinkle over apples.",
            "Bake at 350°F for 45 minutes.",
        ]),
        "Grandma",
    );
    apple_crisp.cook_time = Some("45m".to_string());
    apple_crisp.temp = Some("350°F".to_string());
    apple_crisp.description =
        Some("Best served warm with a scoop of vanilla bean ice cream.".to_string());

    let mut pasta_salad = RecipeDraft::new(
        "Zesty Pasta Salad",
        Category::SoupsSalads,
        lines(&[
            "1 lb rotini pasta",
            "1 bottle Italian dressing",
            "1 cucumber, diced",
            "1 pint cherry tomatoes",
            "1 can black olives",
        ]),
        lines(&[
            "Boil pasta until al dente. Rinse with cold water.",
            "Toss with dressing and vegetables.",
            "Refrigerate overnight for best flavor.",
        ]),
        "Wade",
    );
    pasta_salad.prep_time = Some("20m".to_string());

    vec![cactus_dip, roast_beef, apple_crisp, pasta_salad]
}

/// The seed set as demo records with ids `demo-0`, `demo-1`, ... in seed
/// order, dated relative to `now_ms`.
#[must_use]
pub fn demo_records(now_ms: i64) -> Vec<Recipe> {
    seed_recipes()
        .into_iter()
        .enumerate()
        .map(|(index, draft)| {
            let age = SEED_AGES_MS.get(index).copied().unwrap_or_default();
            Recipe::from_draft(draft, now_ms - age).with_id(format!("{DEMO_ID_PREFIX}{index}"))
        })
        .collect()
}
