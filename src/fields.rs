//! Tolerant access to loosely-shaped model JSON.
//!
//! Keys resolve exact-first, then through a normalised alias list, then
//! fuzzily (Damerau-Levenshtein) for long-enough canonical names.

use nom::number::complete::double;
use serde_json::{Map, Value};
use strsim::damerau_levenshtein; // handles transpositions (fibre/fiber)

/// Canonical keys shorter than this are never matched fuzzily.
const MIN_FUZZY_LEN: usize = 5;

/// A field the model is asked to produce, plus spellings it tends to use instead.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(key: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { key, aliases }
    }
}

pub const TITLE: FieldSpec = FieldSpec::new("title", &["name", "recipe", "recipename", "recipetitle", "dish"]);
pub const INGREDIENTS: FieldSpec = FieldSpec::new("ingredients", &["ingredientlist", "items"]);
pub const INSTRUCTIONS: FieldSpec = FieldSpec::new("instructions", &["steps", "directions", "method", "preparation"]);
pub const COOK_TIME: FieldSpec = FieldSpec::new("cookTime", &["cookingtime", "totaltime", "time", "duration"]);
pub const SERVINGS: FieldSpec = FieldSpec::new("servings", &["serves", "yield", "servingsize", "portions"]);
pub const NUTRITION: FieldSpec = FieldSpec::new("nutrition", &["nutritioninfo", "nutritionalinfo", "nutritionfacts", "nutritional"]);

pub const CALORIES: FieldSpec = FieldSpec::new("calories", &["kcal", "energy", "cal"]);
pub const PROTEIN: FieldSpec = FieldSpec::new("protein", &["proteins"]);
pub const CARBS: FieldSpec = FieldSpec::new("carbs", &["carbohydrates", "carbohydrate", "carb"]);
pub const FAT: FieldSpec = FieldSpec::new("fat", &["fats", "totalfat"]);
pub const FIBER: FieldSpec = FieldSpec::new("fiber", &["fibre", "dietaryfiber"]);
pub const SUGAR: FieldSpec = FieldSpec::new("sugar", &["sugars"]);
pub const SODIUM: FieldSpec = FieldSpec::new("sodium", &["natrium"]);

// object-shaped list entries
pub const ITEM_NAME: FieldSpec = FieldSpec::new("name", &["item", "ingredient", "food"]);
pub const ITEM_QUANTITY: FieldSpec = FieldSpec::new("quantity", &["amount", "qty"]);
pub const ITEM_UNIT: FieldSpec = FieldSpec::new("unit", &["units", "measure"]);
pub const STEP_TEXT: FieldSpec = FieldSpec::new("step", &["text", "instruction", "description", "action"]);

#[inline]
fn squash_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look `spec` up in `map`. `max_dist` of 0 turns fuzzy matching off.
pub fn lookup<'a>(map: &'a Map<String, Value>, spec: FieldSpec, max_dist: usize) -> Option<&'a Value> {
    if let Some(v) = map.get(spec.key) {
        return Some(v);
    }

    let canonical = squash_key(spec.key);
    let squashed: Vec<(String, &Value)> = map.iter().map(|(k, v)| (squash_key(k), v)).collect();

    if let Some((_, v)) = squashed
        .iter()
        .find(|(k, _)| *k == canonical || spec.aliases.contains(&k.as_str()))
    {
        return Some(*v);
    }

    if max_dist == 0 || canonical.len() < MIN_FUZZY_LEN {
        return None;
    }
    squashed
        .iter()
        .map(|(k, v)| (damerau_levenshtein(k, &canonical), v))
        .filter(|(d, _)| *d <= max_dist)
        .min_by_key(|(d, _)| *d)
        .map(|(_, v)| *v)
}

/// Strings as-is (trimmed); numbers and booleans as their JSON text.
/// Blank strings and structured values give `None`.
pub fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Finite number from a JSON number or a string with a leading number
/// ("25g", "1,200 kcal").
pub fn as_finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => leading_number(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// `None` when the number runs on past what `double` consumed ("1,20", "1.2.3"),
/// since the prefix alone would be the wrong value.
fn leading_number(s: &str) -> Option<f64> {
    let ungrouped = drop_digit_grouping(s.trim());
    let (rest, n) = double::<&str, nom::error::Error<&str>>(&ungrouped).ok()?;
    let mut after = rest.chars();
    let runs_on = matches!(after.next(), Some(',' | '.')) && after.next().map_or(false, |c| c.is_ascii_digit());
    (!runs_on).then_some(n)
}

/// Remove thousands separators: a comma after a digit and before exactly three digits.
fn drop_digit_grouping(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let is_group = |rest: &[char]| {
        rest.len() >= 3
            && rest[..3].iter().all(char::is_ascii_digit)
            && rest.get(3).map_or(true, |c| !c.is_ascii_digit())
    };
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| !(c == ',' && i > 0 && chars[i - 1].is_ascii_digit() && is_group(&chars[i + 1..])))
        .map(|(_, &c)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn exact_key_wins() {
        let m = obj(json!({ "title": "A", "name": "B" }));
        assert_eq!(lookup(&m, TITLE, 1), Some(&json!("A")));
    }

    #[test]
    fn normalised_and_alias_keys() {
        let m = obj(json!({ "cook_time": "10 min" }));
        assert_eq!(lookup(&m, COOK_TIME, 1), Some(&json!("10 min")));
        let m = obj(json!({ "Steps": ["a"] }));
        assert_eq!(lookup(&m, INSTRUCTIONS, 0), Some(&json!(["a"])));
        let m = obj(json!({ "carbohydrates": 30 }));
        assert_eq!(lookup(&m, CARBS, 0), Some(&json!(30)));
    }

    #[test]
    fn fuzzy_only_for_long_keys() {
        let m = obj(json!({ "ingredents": ["x"] }));
        assert_eq!(lookup(&m, INGREDIENTS, 1), Some(&json!(["x"])));
        assert_eq!(lookup(&m, INGREDIENTS, 0), None);

        // "fat" is too short to guess at
        let m = obj(json!({ "oat": 3 }));
        assert_eq!(lookup(&m, FAT, 1), None);
    }

    #[test]
    fn text_coercion() {
        assert_eq!(as_text(&json!("  Soup ")), Some("Soup".into()));
        assert_eq!(as_text(&json!(4)), Some("4".into()));
        assert_eq!(as_text(&json!("   ")), None);
        assert_eq!(as_text(&json!(["x"])), None);
        assert_eq!(as_text(&Value::Null), None);
    }

    #[test]
    fn number_coercion() {
        assert_eq!(as_finite_number(&json!(200)), Some(200.0));
        assert_eq!(as_finite_number(&json!("25g")), Some(25.0));
        assert_eq!(as_finite_number(&json!(" 12.5 mg")), Some(12.5));
        assert_eq!(as_finite_number(&json!("lots")), None);
        assert_eq!(as_finite_number(&json!("NaN")), None);
        assert_eq!(as_finite_number(&json!(null)), None);
        assert_eq!(as_finite_number(&json!(true)), None);
    }

    #[test]
    fn grouped_thousands_are_one_number() {
        assert_eq!(as_finite_number(&json!("1,200 kcal")), Some(1200.0));
        assert_eq!(as_finite_number(&json!("2,300mg")), Some(2300.0));
        assert_eq!(as_finite_number(&json!("1,234,567.5")), Some(1234567.5));
        assert_eq!(as_finite_number(&json!("12, 5 servings")), Some(12.0));
    }

    #[test]
    fn ambiguous_separators_are_unknown() {
        assert_eq!(as_finite_number(&json!("1,20 g")), None);
        assert_eq!(as_finite_number(&json!("1,2000")), None);
        assert_eq!(as_finite_number(&json!("1.2.3")), None);
    }
}
