//! The request the generation service expects and the envelope it answers with.
//!
//! Neither is parsed defensively: the request is ours, and a broken envelope
//! is a transport failure the caller answers with
//! [`RecipePipeline::generation_failed`](crate::pipeline::RecipePipeline::generation_failed).

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;
use crate::ingredient::{describe_all, IngredientDescriptor};

const SCHEMA_EXAMPLE: &str = r#"{"recipes": [{"title": "Recipe Name", "ingredients": ["ingredient 1", "ingredient 2"], "instructions": ["step 1", "step 2"], "cookTime": "15 minutes", "servings": "4 servings", "nutrition": {"calories": 350, "protein": 25, "carbs": 30, "fat": 15, "fiber": 5}}]}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeStyle {
    /// A few meals ready in 30 minutes or less.
    Quick,
    /// More recipes spread across cuisines and cooking styles.
    Diverse,
}

impl RecipeStyle {
    pub fn default_count(self) -> usize {
        match self {
            RecipeStyle::Quick => 3,
            RecipeStyle::Diverse => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub style: RecipeStyle,
    pub count: usize,
    /// Worded as "need to be used soon" when the items are close to expiry.
    pub expiring: bool,
}

impl RecipeRequest {
    pub fn new(style: RecipeStyle) -> Self {
        Self {
            style,
            count: style.default_count(),
            expiring: false,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    pub fn expiring(mut self) -> Self {
        self.expiring = true;
        self
    }

    pub fn system_prompt(&self) -> String {
        let n = self.count;
        let focus = match self.style {
            RecipeStyle::Quick => format!(
                "Generate {n} simple, practical recipes using the available ingredients. \
                 Focus on quick meals that can be prepared in 30 minutes or less. \
                 Include nutritional information (calories, protein, carbs, fat) per serving \
                 and specify how many servings the recipe makes."
            ),
            RecipeStyle::Diverse => format!(
                "Generate {n} diverse, practical recipes using the available ingredients. \
                 Focus on different cooking styles and cuisines. \
                 IMPORTANT: Always specify exact serving sizes (e.g., '4 servings', '2 servings') \
                 and ensure nutrition values are per serving."
            ),
        };
        format!(
            "You are a helpful cooking assistant. {focus} \
             Format your response as JSON with this structure: {schema}",
            schema = SCHEMA_EXAMPLE,
        )
    }

    pub fn user_prompt(&self, ingredients: &[IngredientDescriptor]) -> String {
        let have = if self.expiring {
            "I have these ingredients that need to be used soon"
        } else {
            "I have these ingredients"
        };
        let ask = match self.style {
            RecipeStyle::Quick => "quick and easy recipes",
            RecipeStyle::Diverse => "diverse recipes",
        };
        format!(
            "{have}: {list}. Please suggest {n} {ask} I can make with some or all of these \
             ingredients. Include common pantry staples like salt, pepper, oil, etc. as needed.",
            list = describe_all(ingredients),
            n = self.count,
        )
    }

    pub fn build(&self, ingredients: &[IngredientDescriptor]) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: self.system_prompt(),
                },
                ChatMessage {
                    role: Role::User,
                    content: self.user_prompt(ingredients),
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    completion: Option<String>,
}

/// Pull the `completion` text out of the service's JSON response body.
pub fn completion_from_envelope(body: &str) -> Result<String, EnvelopeError> {
    let envelope: CompletionEnvelope = serde_json::from_str(body)?;
    envelope.completion.ok_or(EnvelopeError::MissingCompletion)
}
