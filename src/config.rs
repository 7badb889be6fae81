/// Tunables for one [`RecipePipeline`](crate::pipeline::RecipePipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Characters of raw/cleaned text kept in `ParseFailure` and log lines.
    pub preview_chars: usize,
    /// How many caller ingredients the fallback recipe lists.
    pub fallback_ingredient_limit: usize,
    /// Max Damerau-Levenshtein distance for tolerant key lookup. 0 disables it.
    pub fuzzy_key_distance: usize,
}

pub const DEFAULT_PREVIEW_CHARS: usize = 500;
pub const DEFAULT_FALLBACK_INGREDIENTS: usize = 3;
pub const DEFAULT_FUZZY_DISTANCE: usize = 1;

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
            fallback_ingredient_limit: DEFAULT_FALLBACK_INGREDIENTS,
            fuzzy_key_distance: DEFAULT_FUZZY_DISTANCE,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn with_fallback_ingredient_limit(mut self, limit: usize) -> Self {
        self.fallback_ingredient_limit = limit;
        self
    }

    pub fn with_fuzzy_key_distance(mut self, distance: usize) -> Self {
        self.fuzzy_key_distance = distance;
        self
    }
}
