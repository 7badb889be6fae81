use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use crate::recipe_types::RecipePayload;

/// A recipe as the store holds it: the payload plus the identity the store
/// gave it when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub recipe: RecipePayload,
}

impl SavedRecipe {
    /// Stamp `recipe` with a fresh time-ordered id.
    pub fn new(recipe: RecipePayload) -> Self {
        let (saved_at, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            saved_at,
            recipe,
        }
    }
}

fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

/// Where the app keeps recipes the user chose to save.
///
/// The pipeline never calls this; its output is just shaped to fit.
pub trait RecipeStore {
    /// Store `recipe` and return the id it was given.
    fn save_recipe(&mut self, recipe: RecipePayload) -> Uuid;
    fn remove_recipe(&mut self, id: Uuid) -> Option<SavedRecipe>;
    fn is_recipe_saved(&self, title: &str) -> bool;
}

/// Newest-first, in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecipeStore {
    saved: Vec<SavedRecipe>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[SavedRecipe] {
        &self.saved
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedRecipe> {
        self.saved.iter().find(|s| s.id == id)
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn save_recipe(&mut self, recipe: RecipePayload) -> Uuid {
        let saved = SavedRecipe::new(recipe);
        let id = saved.id;
        self.saved.insert(0, saved);
        id
    }

    fn remove_recipe(&mut self, id: Uuid) -> Option<SavedRecipe> {
        let pos = self.saved.iter().position(|s| s.id == id)?;
        Some(self.saved.remove(pos))
    }

    fn is_recipe_saved(&self, title: &str) -> bool {
        self.saved.iter().any(|s| s.recipe.title == title)
    }
}
