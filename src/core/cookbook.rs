use crate::core::admission::admit;
use crate::core::resolver::{RecipeResolver, ResolverSettings};
use crate::core::store::CookbookStore;
use crate::domain::model::{Entry, EntryDefinition, RecipeSummary};
use crate::utils::error::{CookbookError, Result};
use crate::utils::normalize::normalize_name;
use std::sync::Arc;

/// Entry point shared by the CLI and the HTTP server.
#[derive(Debug, Clone, Default)]
pub struct Cookbook {
    store: Arc<CookbookStore>,
    resolver: RecipeResolver,
}

impl Cookbook {
    pub fn new(settings: ResolverSettings) -> Self {
        Self::with_store(Arc::new(CookbookStore::new()), settings)
    }

    pub fn with_store(store: Arc<CookbookStore>, settings: ResolverSettings) -> Self {
        Self {
            store,
            resolver: RecipeResolver::new(settings),
        }
    }

    pub fn store(&self) -> &Arc<CookbookStore> {
        &self.store
    }

    pub fn parse_name(&self, input: &str) -> Result<String> {
        normalize_name(input).ok_or_else(|| CookbookError::InvalidName {
            input: input.to_string(),
        })
    }

    pub fn add_entry(&self, definition: &EntryDefinition) -> Result<()> {
        let entry = admit(definition)?;
        let name = entry.name().to_string();
        let kind = entry.kind();

        self.store.insert(entry)?;
        tracing::info!("➕ Added {} '{}'", kind, name);
        Ok(())
    }

    /// 依序加入多筆定義，遇到第一個錯誤即停止
    pub fn add_entries(&self, definitions: &[EntryDefinition]) -> Result<usize> {
        for definition in definitions {
            self.add_entry(definition)?;
        }
        Ok(definitions.len())
    }

    pub fn summary(&self, name: &str) -> Result<RecipeSummary> {
        let snapshot = self.store.snapshot();

        let entry = snapshot.get(name).ok_or_else(|| CookbookError::EntryNotFound {
            name: name.to_string(),
        })?;

        let recipe = match entry.as_ref() {
            Entry::Recipe(recipe) => recipe,
            Entry::Ingredient(_) => {
                return Err(CookbookError::NotARecipe {
                    name: name.to_string(),
                })
            }
        };

        let summary = self.resolver.resolve(recipe, &snapshot)?;
        tracing::info!(
            "📋 Summary for '{}': cook time {}, {} ingredients",
            summary.name,
            summary.cook_time,
            summary.ingredients.len()
        );
        Ok(summary)
    }

    /// Resolves every recipe in the current snapshot, in name order.
    pub fn check_all(&self) -> Vec<(String, Result<RecipeSummary>)> {
        let snapshot = self.store.snapshot();
        let mut recipes: Vec<_> = snapshot
            .entries()
            .filter_map(|entry| entry.as_recipe().cloned())
            .collect();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));

        recipes
            .into_iter()
            .map(|recipe| {
                let outcome = self
                    .resolver
                    .resolve(&recipe, &snapshot)
                    .map_err(CookbookError::from);
                (recipe.name, outcome)
            })
            .collect()
    }
}
