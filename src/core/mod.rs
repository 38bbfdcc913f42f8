pub mod admission;
pub mod cookbook;
pub mod resolver;
pub mod store;

pub use crate::domain::model::{Entry, EntryDefinition, Ingredient, Recipe, RecipeSummary, RequiredItem};
pub use crate::domain::ports::EntryLookup;
pub use crate::utils::error::Result;
