use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Per-serving nutrition. Absent fields are unknown, not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

impl NutritionInfo {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }

    /// (label, value) pairs in display order.
    pub fn fields(&self) -> [(&'static str, Option<f64>); 7] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
            ("sugar", self.sugar),
            ("sodium", self.sodium),
        ]
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, value) in self.fields() {
            let Some(value) = value else { continue };
            if !first {
                f.write_str(", ")?;
            }
            match label {
                "calories" => write!(f, "{} cal", value)?,
                "sodium" => write!(f, "{}mg sodium", value)?,
                _ => write!(f, "{}g {}", value, label)?,
            }
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,
}

/// What the pipeline hands back: never empty when ingredients were supplied.
pub type RecipeList = Vec<Recipe>;

/// Shape the persistence layer stores; identical to [`Recipe`] field-for-field.
pub type RecipePayload = Recipe;

// <n>[.<d>][-<m>] [unit] [<k> minutes]
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:-\s*\d+(?:\.\d+)?\s*)?(hours?|hrs?|h|minutes?|mins?|m)?\b(?:\s*(?:and\s+)?(\d+)\s*(?:minutes?|mins?|m)\b)?",
    )
    .expect("duration pattern is valid")
});

impl Recipe {
    /// Minutes implied by the leading number of `cook_time`.
    ///
    /// `None` means unknown: absent, or text that doesn't start with a number.
    pub fn cook_minutes(&self) -> Option<u32> {
        parse_minutes(self.cook_time.as_deref()?)
    }
}

/// Whole minutes in a duration like "25 minutes" or "1.5 hours", rounded.
pub fn parse_minutes(text: &str) -> Option<u32> {
    let caps = DURATION.captures(text)?;
    let lead: f64 = caps.get(1)?.as_str().parse().ok()?;
    let is_hours = caps
        .get(2)
        .map(|u| u.as_str().to_ascii_lowercase().starts_with('h'))
        .unwrap_or(false);
    let total = if is_hours {
        let extra = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0);
        lead * 60.0 + extra
    } else {
        lead
    };
    let total = total.round();
    (total.is_finite() && total <= u32::MAX as f64).then(|| total as u32)
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let meta: Vec<String> = [
            self.cook_time.clone(),
            self.servings.clone(),
            self.nutrition
                .as_ref()
                .and_then(|n| n.calories)
                .map(|c| format!("{} cal", c)),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !meta.is_empty() {
            writeln!(f, "{}", meta.join(" · "))?;
        }
        if let Some(n) = self.nutrition.as_ref().filter(|n| !n.is_empty()) {
            writeln!(f, "Nutrition: {}", n)?;
        }
        writeln!(f, "Ingredients:")?;
        for item in &self.ingredients {
            writeln!(f, "  - {}", item)?;
        }
        writeln!(f, "Instructions:")?;
        for (i, step) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn soup() -> Recipe {
        Recipe {
            title: "Soup".into(),
            ingredients: vec!["Carrot".into()],
            instructions: vec!["Boil".into()],
            cook_time: Some("20 minutes".into()),
            servings: None,
            nutrition: Some(NutritionInfo {
                calories: Some(200.0),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn serializes_camel_case_and_skips_unknowns() {
        let v = serde_json::to_value(soup()).unwrap();
        assert_eq!(
            v,
            json!({
                "title": "Soup",
                "ingredients": ["Carrot"],
                "instructions": ["Boil"],
                "cookTime": "20 minutes",
                "nutrition": { "calories": 200.0 }
            })
        );
    }

    #[test]
    fn cook_minutes_reads_leading_number() {
        assert_eq!(soup().cook_minutes(), Some(20));
        assert_eq!(parse_minutes("15"), Some(15));
        assert_eq!(parse_minutes("20-25 minutes"), Some(20));
        assert_eq!(parse_minutes("30 mins"), Some(30));
    }

    #[test]
    fn cook_minutes_understands_hours() {
        assert_eq!(parse_minutes("1 hour 30 minutes"), Some(90));
        assert_eq!(parse_minutes("2 hrs"), Some(120));
        assert_eq!(parse_minutes("1h and 15 min"), Some(75));
    }

    #[test]
    fn cook_minutes_accepts_fractional_amounts() {
        assert_eq!(parse_minutes("1.5 hours"), Some(90));
        assert_eq!(parse_minutes("0.5 h"), Some(30));
        assert_eq!(parse_minutes("1.25 hrs"), Some(75));
        assert_eq!(parse_minutes("1.5-2 hours"), Some(90));
        assert_eq!(parse_minutes("12.5 minutes"), Some(13));
    }

    #[test]
    fn cook_minutes_unknown_is_none_not_zero() {
        assert_eq!(parse_minutes("N/A"), None);
        assert_eq!(parse_minutes("About 20 minutes"), None);
        let mut r = soup();
        r.cook_time = None;
        assert_eq!(r.cook_minutes(), None);
    }

    #[test]
    fn nutrition_display_omits_missing_fields() {
        let n = NutritionInfo {
            calories: Some(350.0),
            protein: Some(25.0),
            sodium: Some(120.0),
            ..Default::default()
        };
        assert_eq!(n.to_string(), "350 cal, 25g protein, 120mg sodium");
        assert!(NutritionInfo::default().is_empty());
    }

    #[test]
    fn recipe_display_lists_steps_in_order() {
        let text = soup().to_string();
        assert!(text.starts_with("Soup\n20 minutes · 200 cal\n"));
        assert!(text.contains("  - Carrot\n"));
        assert!(text.contains("  1. Boil\n"));
    }
}
