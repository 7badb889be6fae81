//! Turns a recovered JSON value into a list of [`Recipe`]s.
//!
//! Total by construction: missing or malformed pieces are defaulted, and
//! when nothing usable survives the caller gets a fallback recipe built
//! from its own ingredients.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::config::PipelineConfig;
use crate::error::ParseFailure;
use crate::fallback::{fallback_recipes, FallbackKind};
use crate::fields::{self, as_finite_number, as_text, lookup, FieldSpec};
use crate::ingredient::IngredientDescriptor;
use crate::normalizer::NormalizedJson;
use crate::recipe_types::{NutritionInfo, Recipe, RecipeList};

pub const UNTITLED: &str = "Untitled Recipe";

/// Build recipes from `parsed`, falling back to `fallback_ingredients`.
pub fn build_recipes_with<S: AsRef<str>>(
    parsed: Result<NormalizedJson, ParseFailure>,
    fallback_ingredients: &[S],
    config: &PipelineConfig,
) -> RecipeList {
    let fallback = || {
        fallback_recipes(
            FallbackKind::ParseFailed,
            fallback_ingredients,
            config.fallback_ingredient_limit,
        )
    };

    let value = match parsed {
        Ok(value) => value,
        Err(failure) => {
            warn!("Failed to parse recipe JSON: {}", failure);
            return fallback();
        }
    };

    let Some(entries) = recipe_entries(&value) else {
        warn!("[builder] completion has no `recipes` array");
        return fallback();
    };

    let recipes: RecipeList = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| match entry {
            Value::Object(map) => Some(recipe_from_map(map, config.fuzzy_key_distance)),
            other => {
                warn!("[builder] dropping recipe #{}: not an object ({:.40})", i, other.to_string());
                None
            }
        })
        .collect();

    if recipes.is_empty() {
        warn!("[builder] no usable recipes in completion");
        return fallback();
    }
    debug!("[builder] built {} recipe(s)", recipes.len());
    recipes
}

/// The `recipes` sequence, if the value carries one.
fn recipe_entries(value: &Value) -> Option<&Vec<Value>> {
    value.as_object()?.get("recipes")?.as_array()
}

fn recipe_from_map(map: &Map<String, Value>, dist: usize) -> Recipe {
    let field = |spec: FieldSpec| lookup(map, spec, dist);

    let title = field(fields::TITLE).and_then(as_text).unwrap_or_else(|| {
        debug!("[builder] recipe without usable title");
        UNTITLED.to_string()
    });

    let ingredients = field(fields::INGREDIENTS)
        .map(|v| text_list(v, |m| ingredient_from_map(m, dist)))
        .unwrap_or_default();
    let instructions = field(fields::INSTRUCTIONS)
        .map(|v| text_list(v, |m| lookup(m, fields::STEP_TEXT, dist).and_then(as_text)))
        .unwrap_or_default();

    if ingredients.is_empty() || instructions.is_empty() {
        debug!(
            "[builder] '{}' kept with {} ingredient(s), {} step(s)",
            title,
            ingredients.len(),
            instructions.len()
        );
    }

    Recipe {
        title,
        ingredients,
        instructions,
        cook_time: field(fields::COOK_TIME).and_then(as_text),
        servings: field(fields::SERVINGS).and_then(as_text),
        nutrition: field(fields::NUTRITION)
            .and_then(Value::as_object)
            .and_then(|m| nutrition_from_map(m, dist)),
    }
}

/// Array of text-ish entries; anything that is not an array is an empty list.
fn text_list<F>(value: &Value, from_object: F) -> Vec<String>
where
    F: Fn(&Map<String, Value>) -> Option<String>,
{
    let Some(items) = value.as_array() else {
        debug!("[builder] expected a list, got {:.40}", value.to_string());
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => from_object(map),
            other => as_text(other),
        })
        .collect()
}

/// `{ "name": "Carrot", "quantity": 2, "unit": "pcs" }` → `"Carrot (2 pcs)"`
fn ingredient_from_map(map: &Map<String, Value>, dist: usize) -> Option<String> {
    let name = lookup(map, fields::ITEM_NAME, dist).and_then(as_text)?;
    let mut item = IngredientDescriptor::new(name);
    item.quantity = lookup(map, fields::ITEM_QUANTITY, dist).and_then(as_text);
    item.unit = lookup(map, fields::ITEM_UNIT, dist).and_then(as_text);
    Some(item.to_string())
}

fn nutrition_from_map(map: &Map<String, Value>, dist: usize) -> Option<NutritionInfo> {
    let num = |spec: FieldSpec| lookup(map, spec, dist).and_then(as_finite_number);
    let info = NutritionInfo {
        calories: num(fields::CALORIES),
        protein: num(fields::PROTEIN),
        carbs: num(fields::CARBS),
        fat: num(fields::FAT),
        fiber: num(fields::FIBER),
        sugar: num(fields::SUGAR),
        sodium: num(fields::SODIUM),
    };
    (!info.is_empty()).then_some(info)
}
