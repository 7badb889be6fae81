use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::{take_till1, take_until},
    character::complete::char,
    combinator::opt,
    sequence::delimited,
    IResult,
};

use crate::error::IngredientError;

/// One available ingredient as the caller describes it: `"<name> (<quantity> <unit>)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDescriptor {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl IngredientDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
        }
    }

    pub fn with_amount(mut self, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        let unit = unit.into();
        self.unit = (!unit.trim().is_empty()).then_some(unit);
        self
    }
}

impl fmt::Display for IngredientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match (&self.quantity, &self.unit) {
            (Some(q), Some(u)) => write!(f, " ({} {})", q, u),
            (Some(q), None) => write!(f, " ({})", q),
            (None, Some(u)) => write!(f, " ({})", u),
            (None, None) => Ok(()),
        }
    }
}

/// name, then an optional "(…)" amount
fn descriptor(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (input, name) = take_till1(|c: char| c == '(')(input)?;
    let (input, amount) = opt(delimited(char('('), take_until(")"), char(')')))(input)?;
    Ok((input, (name, amount)))
}

impl FromStr for IngredientDescriptor {
    type Err = IngredientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IngredientError::Empty);
        }

        let (rest, (name, amount)) =
            descriptor(s).map_err(|_| IngredientError::MissingName(s.to_string()))?;
        let name = name.trim();

        // anything after the amount means the parens were part of the name
        if !rest.trim().is_empty() || amount.is_none() {
            return Ok(Self::new(s));
        }

        let mut out = Self::new(name);
        if let Some(amount) = amount.map(str::trim).filter(|a| !a.is_empty()) {
            match amount.split_once(char::is_whitespace) {
                Some((q, u)) => out = out.with_amount(q, u.trim()),
                None => out.quantity = Some(amount.to_string()),
            }
        }
        Ok(out)
    }
}

/// Comma-joined descriptor list as it appears in the user prompt.
pub fn describe_all(items: &[IngredientDescriptor]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_quantity_unit() {
        let d: IngredientDescriptor = "Milk (1 L)".parse().unwrap();
        assert_eq!(d.name, "Milk");
        assert_eq!(d.quantity.as_deref(), Some("1"));
        assert_eq!(d.unit.as_deref(), Some("L"));
    }

    #[test]
    fn multi_word_units_stay_together() {
        let d: IngredientDescriptor = "Tomatoes (2 large cans)".parse().unwrap();
        assert_eq!(d.quantity.as_deref(), Some("2"));
        assert_eq!(d.unit.as_deref(), Some("large cans"));
    }

    #[test]
    fn bare_name_and_quantity_only() {
        assert_eq!("Basil".parse::<IngredientDescriptor>(), Ok(IngredientDescriptor::new("Basil")));
        let d: IngredientDescriptor = "Eggs (6)".parse().unwrap();
        assert_eq!(d.quantity.as_deref(), Some("6"));
        assert_eq!(d.unit, None);
    }

    #[test]
    fn rejects_empty_and_nameless() {
        assert_eq!("   ".parse::<IngredientDescriptor>(), Err(IngredientError::Empty));
        assert!(matches!(
            "(1 L)".parse::<IngredientDescriptor>(),
            Err(IngredientError::MissingName(_))
        ));
    }

    #[test]
    fn display_matches_caller_format() {
        let d = IngredientDescriptor::new("Eggs").with_amount("6", "pcs");
        assert_eq!(d.to_string(), "Eggs (6 pcs)");
        let items = vec![d, IngredientDescriptor::new("Salt")];
        assert_eq!(describe_all(&items), "Eggs (6 pcs), Salt");
    }

    #[test]
    fn trailing_text_keeps_whole_string_as_name() {
        let d: IngredientDescriptor = "Cheese (aged) wedge".parse().unwrap();
        assert_eq!(d.name, "Cheese (aged) wedge");
        assert_eq!(d.quantity, None);
    }
}
