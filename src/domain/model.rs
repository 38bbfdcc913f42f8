use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(rename = "cookTime")]
    pub cook_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(rename = "requiredItems", default)]
    pub required_items: Vec<RequiredItem>,
}

/// A named cookbook entry, tagged on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Ingredient(ingredient) => &ingredient.name,
            Entry::Recipe(recipe) => &recipe.name,
        }
    }

    pub fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            Entry::Recipe(recipe) => Some(recipe),
            Entry::Ingredient(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Ingredient(_) => "ingredient",
            Entry::Recipe(_) => "recipe",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub name: String,
    pub quantity: i64,
}

/// Flattened view of a recipe: leaf ingredients with their total
/// quantities, sorted by name, plus the aggregate cook time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub name: String,
    #[serde(rename = "cookTime")]
    pub cook_time: i64,
    pub ingredients: Vec<IngredientQuantity>,
}

impl RecipeSummary {
    pub fn quantity_of(&self, ingredient: &str) -> Option<i64> {
        self.ingredients
            .iter()
            .find(|item| item.name == ingredient)
            .map(|item| item.quantity)
    }
}

/// 未經驗證的條目定義，來自 HTTP 請求或 TOML 檔案
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDefinition {
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "cookTime")]
    pub cook_time: Option<i64>,
    #[serde(rename = "requiredItems")]
    pub required_items: Option<Vec<RequiredItemDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItemDefinition {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

impl EntryDefinition {
    pub fn ingredient(name: &str, cook_time: i64) -> Self {
        Self {
            r#type: Some("ingredient".to_string()),
            name: Some(name.to_string()),
            cook_time: Some(cook_time),
            required_items: None,
        }
    }

    pub fn recipe(name: &str, items: &[(&str, i64)]) -> Self {
        Self {
            r#type: Some("recipe".to_string()),
            name: Some(name.to_string()),
            cook_time: None,
            required_items: Some(
                items
                    .iter()
                    .map(|(item, quantity)| RequiredItemDefinition {
                        name: Some(item.to_string()),
                        quantity: Some(*quantity),
                    })
                    .collect(),
            ),
        }
    }
}
