pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "server")]
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::CookbookConfig;
pub use core::{
    cookbook::Cookbook,
    resolver::{RecipeResolver, ResolverSettings},
    store::{CookbookStore, StoreSnapshot},
};
pub use domain::model::{Entry, EntryDefinition, IngredientQuantity, RecipeSummary};
pub use utils::error::{CookbookError, ResolutionError, Result};
