//! Recovers recipe lists from text-generation completions.
//!
//! [`normalize`] digs a JSON value out of a completion that may be fenced,
//! wrapped in prose or followed by commentary. [`build_recipes`] turns that
//! value into [`Recipe`]s, defaulting whatever is missing and falling back to
//! a synthesized recipe from the caller's own ingredients when nothing is
//! usable. The pair never panics and the second half never fails.
//!
//! ```
//! let ingredients = ["Milk (1 L)", "Eggs (6 pcs)"];
//! let recipes = larder::recipes_from_completion("Sorry, I can't help.", &ingredients);
//! assert_eq!(recipes.len(), 1);
//! assert!(recipes[0].ingredients.contains(&"Milk (1 L)".to_string()));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fallback;
mod fence;
pub mod fields;
pub mod ingredient;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;
pub mod recipe_types;
pub mod store;

#[cfg(feature = "python-bindings")]
mod python;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::{EnvelopeError, IngredientError, ParseFailure};
pub use fallback::{FallbackKind, NO_INGREDIENTS_PLACEHOLDER};
pub use ingredient::IngredientDescriptor;
pub use normalizer::NormalizedJson;
pub use pipeline::{build_recipes, normalize, recipes_from_completion, RecipePipeline};
pub use recipe_types::{NutritionInfo, Recipe, RecipeList, RecipePayload};
pub use store::{MemoryRecipeStore, RecipeStore, SavedRecipe};
