use crate::builder::build_recipes_with;
use crate::config::PipelineConfig;
use crate::error::ParseFailure;
use crate::fallback::{fallback_recipes, FallbackKind};
use crate::normalizer::{normalize_with_limit, NormalizedJson};
use crate::recipe_types::RecipeList;

/// Completion text in, recipes out.
///
/// Holds no state besides its configuration, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RecipePipeline {
    config: PipelineConfig,
}

impl RecipePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &str) -> Result<NormalizedJson, ParseFailure> {
        normalize_with_limit(raw, self.config.preview_chars)
    }

    pub fn build<S: AsRef<str>>(
        &self,
        parsed: Result<NormalizedJson, ParseFailure>,
        fallback_ingredients: &[S],
    ) -> RecipeList {
        build_recipes_with(parsed, fallback_ingredients, &self.config)
    }

    /// Normalize then build. Never fails.
    pub fn run<S: AsRef<str>>(&self, raw: &str, fallback_ingredients: &[S]) -> RecipeList {
        self.build(self.normalize(raw), fallback_ingredients)
    }

    /// For callers whose generation request failed before any completion arrived.
    pub fn generation_failed<S: AsRef<str>>(&self, fallback_ingredients: &[S]) -> RecipeList {
        fallback_recipes(
            FallbackKind::GenerationFailed,
            fallback_ingredients,
            self.config.fallback_ingredient_limit,
        )
    }
}

/// [`RecipePipeline::normalize`] with default settings.
pub fn normalize(raw: &str) -> Result<NormalizedJson, ParseFailure> {
    RecipePipeline::default().normalize(raw)
}

/// [`RecipePipeline::build`] with default settings.
pub fn build_recipes<S: AsRef<str>>(
    parsed: Result<NormalizedJson, ParseFailure>,
    fallback_ingredients: &[S],
) -> RecipeList {
    RecipePipeline::default().build(parsed, fallback_ingredients)
}

/// [`RecipePipeline::run`] with default settings.
pub fn recipes_from_completion<S: AsRef<str>>(raw: &str, fallback_ingredients: &[S]) -> RecipeList {
    RecipePipeline::default().run(raw, fallback_ingredients)
}
