use crate::domain::model::{Entry, EntryDefinition, Ingredient, Recipe, RequiredItem};
use crate::utils::error::{CookbookError, Result};
use crate::utils::validation::validate_required_field;
use std::collections::HashSet;

/// 將未驗證的定義轉成可存入的條目；名稱唯一性由 store 檢查
pub fn admit(definition: &EntryDefinition) -> Result<Entry> {
    let kind = validate_required_field("type", &definition.r#type)?;
    let name = validate_required_field("name", &definition.name)?;

    if name.trim().is_empty() {
        return Err(CookbookError::InvalidName {
            input: name.clone(),
        });
    }

    match kind.as_str() {
        "ingredient" => admit_ingredient(name, definition),
        "recipe" => admit_recipe(name, definition),
        other => Err(CookbookError::InvalidEntryType {
            value: other.to_string(),
        }),
    }
}

fn admit_ingredient(name: &str, definition: &EntryDefinition) -> Result<Entry> {
    let cook_time = *validate_required_field("cookTime", &definition.cook_time)?;

    if cook_time < 0 {
        return Err(CookbookError::InvalidCookTime {
            name: name.to_string(),
            cook_time,
        });
    }

    Ok(Entry::Ingredient(Ingredient {
        name: name.to_string(),
        cook_time,
    }))
}

fn admit_recipe(name: &str, definition: &EntryDefinition) -> Result<Entry> {
    let items = definition.required_items.as_deref().unwrap_or_default();
    let mut seen = HashSet::with_capacity(items.len());
    let mut required_items = Vec::with_capacity(items.len());

    for item in items {
        let item_name = validate_required_field("requiredItems.name", &item.name)?;
        let quantity = *validate_required_field("requiredItems.quantity", &item.quantity)?;

        if item_name.trim().is_empty() {
            return Err(CookbookError::InvalidName {
                input: item_name.clone(),
            });
        }

        if !seen.insert(item_name.as_str()) {
            return Err(CookbookError::DuplicateRequiredItem {
                recipe: name.to_string(),
                item: item_name.clone(),
            });
        }

        if quantity < 1 {
            return Err(CookbookError::InvalidQuantity {
                recipe: name.to_string(),
                item: item_name.clone(),
                quantity,
            });
        }

        required_items.push(RequiredItem {
            name: item_name.clone(),
            quantity,
        });
    }

    Ok(Entry::Recipe(Recipe {
        name: name.to_string(),
        required_items,
    }))
}
