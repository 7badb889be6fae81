use log::warn;

use crate::recipe_types::{NutritionInfo, Recipe, RecipeList};

/// Listed in place of ingredients when the caller had none to offer.
pub const NO_INGREDIENTS_PLACEHOLDER: &str = "Add some food items to your inventory first";

/// Why the caller is falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// A completion arrived but held no usable recipe data.
    ParseFailed,
    /// The generation request itself failed; there is no completion.
    GenerationFailed,
}

struct Template {
    title: &'static str,
    steps: &'static [&'static str],
    cook_time: &'static str,
    servings: &'static str,
    nutrition: [f64; 4], // calories, protein, carbs, fat
}

const STIR_FRY: Template = Template {
    title: "Quick Stir-fry",
    steps: &[
        "Heat oil in a large pan or wok",
        "Add ingredients in order of cooking time needed",
        "Stir-fry for 5-10 minutes until cooked through",
        "Season with salt, pepper, and your favorite spices",
        "Serve hot",
    ],
    cook_time: "15 minutes",
    servings: "Makes 3 servings",
    nutrition: [300.0, 20.0, 25.0, 12.0],
};

const MIXED_DISH: Template = Template {
    title: "Simple Mixed Dish",
    steps: &[
        "Prepare all ingredients by washing and chopping as needed",
        "Cook ingredients according to their type (sauté vegetables, boil grains, etc.)",
        "Combine ingredients in a serving dish",
        "Season to taste with salt, pepper, and herbs",
        "Enjoy your meal!",
    ],
    cook_time: "20 minutes",
    servings: "Makes 3 servings",
    nutrition: [250.0, 15.0, 30.0, 10.0],
};

impl FallbackKind {
    fn template(self) -> &'static Template {
        match self {
            FallbackKind::ParseFailed => &STIR_FRY,
            FallbackKind::GenerationFailed => &MIXED_DISH,
        }
    }
}

/// Synthesize the single stand-in recipe for `kind`.
///
/// Uses the first `limit` caller ingredients verbatim, or
/// [`NO_INGREDIENTS_PLACEHOLDER`] when there are none.
pub fn fallback_recipes<S: AsRef<str>>(kind: FallbackKind, ingredients: &[S], limit: usize) -> RecipeList {
    let t = kind.template();
    warn!("[fallback] synthesizing '{}' ({:?})", t.title, kind);

    let mut picked: Vec<String> = ingredients
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect();
    if picked.is_empty() {
        picked.push(NO_INGREDIENTS_PLACEHOLDER.to_string());
    }

    let [calories, protein, carbs, fat] = t.nutrition;
    vec![Recipe {
        title: t.title.to_string(),
        ingredients: picked,
        instructions: t.steps.iter().map(|s| s.to_string()).collect(),
        cook_time: Some(t.cook_time.to_string()),
        servings: Some(t.servings.to_string()),
        nutrition: Some(NutritionInfo {
            calories: Some(calories),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
            ..Default::default()
        }),
    }]
}
