use crate::domain::model::{Entry, Ingredient, IngredientQuantity, Recipe, RecipeSummary, RequiredItem};
use crate::domain::ports::EntryLookup;
use crate::utils::error::ResolutionError;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// 同一條路徑上最多可以疊幾層食譜（含根）
    pub max_depth: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Leaf totals for one recipe, expressed per single unit of that recipe.
#[derive(Debug, Clone, Default)]
struct Flattened {
    cook_time: i64,
    ingredients: BTreeMap<String, i64>,
}

impl Flattened {
    fn add_ingredient(
        &mut self,
        ingredient: &Ingredient,
        quantity: i64,
    ) -> Result<(), ResolutionError> {
        let overflow = || ResolutionError::QuantityOverflow {
            item: ingredient.name.clone(),
        };

        let time = ingredient.cook_time.checked_mul(quantity).ok_or_else(overflow)?;
        self.cook_time = self.cook_time.checked_add(time).ok_or_else(overflow)?;

        let total = self.ingredients.entry(ingredient.name.clone()).or_insert(0);
        *total = total.checked_add(quantity).ok_or_else(overflow)?;
        Ok(())
    }

    /// Merges `factor` units of an already flattened sub-recipe.
    fn absorb(&mut self, other: &Flattened, factor: i64, via: &str) -> Result<(), ResolutionError> {
        let overflow = || ResolutionError::QuantityOverflow {
            item: via.to_string(),
        };

        let time = other.cook_time.checked_mul(factor).ok_or_else(overflow)?;
        self.cook_time = self.cook_time.checked_add(time).ok_or_else(overflow)?;

        for (name, quantity) in &other.ingredients {
            let scaled = quantity.checked_mul(factor).ok_or_else(overflow)?;
            let total = self.ingredients.entry(name.clone()).or_insert(0);
            *total = total.checked_add(scaled).ok_or_else(overflow)?;
        }
        Ok(())
    }

    fn into_summary(self, name: String) -> RecipeSummary {
        RecipeSummary {
            name,
            cook_time: self.cook_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|(name, quantity)| IngredientQuantity { name, quantity })
                .collect(),
        }
    }
}

enum Node<'a> {
    Root(&'a Recipe),
    Nested(Arc<Entry>),
}

struct Frame<'a> {
    node: Node<'a>,
    /// quantity on the edge from the parent frame
    quantity: i64,
    next: usize,
    /// position on the stack, the root is 1
    depth: usize,
    /// recipe levels below this frame seen so far
    height: usize,
    acc: Flattened,
}

impl<'a> Frame<'a> {
    fn new(node: Node<'a>, quantity: i64, depth: usize) -> Self {
        Self {
            node,
            quantity,
            depth,
            next: 0,
            height: 0,
            acc: Flattened::default(),
        }
    }

    fn name(&self) -> &str {
        match &self.node {
            Node::Root(recipe) => &recipe.name,
            Node::Nested(entry) => entry.name(),
        }
    }

    fn items(&self) -> &[RequiredItem] {
        match &self.node {
            Node::Root(recipe) => &recipe.required_items,
            Node::Nested(entry) => entry
                .as_recipe()
                .map(|recipe| recipe.required_items.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn next_item(&mut self) -> Option<RequiredItem> {
        let item = self.items().get(self.next).cloned();
        if item.is_some() {
            self.next += 1;
        }
        item
    }
}

/// Flattens a recipe's reference graph into leaf quantities and total cook time.
///
/// The walk is depth-first over an explicit frame stack. Recipes currently on
/// the stack form the active path used for cycle detection, and the stack
/// height is capped by `max_depth`. Every finished sub-recipe is cached per
/// call and re-used (scaled) when referenced again, so shared sub-recipes are
/// expanded once. The cache also keeps each sub-recipe's height, so a re-used
/// sub-recipe is charged against `max_depth` as if it had been expanded again.
#[derive(Debug, Clone, Default)]
pub struct RecipeResolver {
    settings: ResolverSettings,
}

impl RecipeResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    pub fn resolve<L: EntryLookup + ?Sized>(
        &self,
        root: &Recipe,
        lookup: &L,
    ) -> Result<RecipeSummary, ResolutionError> {
        tracing::debug!(
            "Resolving recipe '{}' ({} required items)",
            root.name,
            root.required_items.len()
        );

        // 已展開過的子食譜：每單位的總量與其下的食譜層數
        let mut finished: HashMap<String, (Flattened, usize)> = HashMap::new();
        let mut on_path: HashSet<String> = HashSet::from([root.name.clone()]);
        let mut stack = vec![Frame::new(Node::Root(root), 1, 1)];
        let mut result = None;

        while let Some(frame) = stack.last_mut() {
            let Some(item) = frame.next_item() else {
                // 這一層的所有子項都處理完了，往上合併
                let Some(done) = stack.pop() else { break };
                on_path.remove(done.name());

                match stack.last_mut() {
                    Some(parent) => {
                        parent.acc.absorb(&done.acc, done.quantity, done.name())?;
                        parent.height = parent.height.max(done.height + 1);
                        finished.insert(done.name().to_string(), (done.acc, done.height));
                    }
                    None => result = Some(done.acc),
                }
                continue;
            };

            let entry = lookup
                .lookup(&item.name)
                .ok_or_else(|| ResolutionError::MissingItem {
                    recipe: frame.name().to_string(),
                    item: item.name.clone(),
                })?;

            match entry.as_ref() {
                Entry::Ingredient(ingredient) => {
                    frame.acc.add_ingredient(ingredient, item.quantity)?;
                }
                Entry::Recipe(recipe) => {
                    if let Some((cached, height)) = finished.get(&recipe.name) {
                        // same boundary as a fresh push, plus the levels below it
                        if frame.depth + height >= self.settings.max_depth {
                            return Err(ResolutionError::DepthExceeded {
                                limit: self.settings.max_depth,
                            });
                        }
                        frame.acc.absorb(cached, item.quantity, &recipe.name)?;
                        frame.height = frame.height.max(height + 1);
                        continue;
                    }

                    if on_path.contains(&recipe.name) {
                        let mut path: Vec<String> =
                            stack.iter().map(|f| f.name().to_string()).collect();
                        path.push(recipe.name.clone());
                        tracing::debug!("Cycle while resolving '{}': {:?}", root.name, path);
                        return Err(ResolutionError::Cycle { path });
                    }

                    if stack.len() >= self.settings.max_depth {
                        return Err(ResolutionError::DepthExceeded {
                            limit: self.settings.max_depth,
                        });
                    }

                    on_path.insert(recipe.name.clone());
                    let depth = stack.len() + 1;
                    stack.push(Frame::new(
                        Node::Nested(Arc::clone(&entry)),
                        item.quantity,
                        depth,
                    ));
                }
            }
        }

        let summary = result.unwrap_or_default().into_summary(root.name.clone());
        tracing::debug!(
            "Resolved '{}': cook time {}, {} distinct ingredients",
            summary.name,
            summary.cook_time,
            summary.ingredients.len()
        );
        Ok(summary)
    }
}
