use crate::domain::model::Entry;
use crate::domain::ports::EntryLookup;
use crate::utils::error::{CookbookError, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type EntryMap = HashMap<String, Arc<Entry>>;

/// Immutable view of the store at one instant.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    entries: Arc<EntryMap>,
}

impl StoreSnapshot {
    pub fn get(&self, name: &str) -> Option<Arc<Entry>> {
        self.entries.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<Entry>> {
        self.entries.values()
    }
}

impl EntryLookup for StoreSnapshot {
    fn lookup(&self, name: &str) -> Option<Arc<Entry>> {
        self.get(name)
    }
}

/// In-memory registry of cookbook entries keyed by name.
///
/// Writers clone the map and swap it in, so every snapshot handed to a
/// reader stays consistent for as long as the reader holds it.
#[derive(Debug, Default)]
pub struct CookbookStore {
    current: RwLock<Arc<EntryMap>>,
}

impl CookbookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        // 鎖中毒時資料仍然完整（寫入是整體替換），直接沿用
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        StoreSnapshot {
            entries: Arc::clone(&*guard),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Entry>> {
        self.snapshot().get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().entries.contains_key(name)
    }

    /// Inserts `entry` unless its name is taken. The uniqueness check and
    /// the insert happen under one write lock.
    pub fn insert(&self, entry: Entry) -> Result<()> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if guard.contains_key(entry.name()) {
            return Err(CookbookError::DuplicateEntry {
                name: entry.name().to_string(),
            });
        }

        let name = entry.name().to_string();
        let mut next: EntryMap = (**guard).clone();
        next.insert(name.clone(), Arc::new(entry));
        *guard = Arc::new(next);

        tracing::debug!("Stored entry '{}' ({} total)", name, guard.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.snapshot().entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl EntryLookup for CookbookStore {
    fn lookup(&self, name: &str) -> Option<Arc<Entry>> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Ingredient, Recipe, RequiredItem};

    fn ingredient(name: &str, cook_time: i64) -> Entry {
        Entry::Ingredient(Ingredient {
            name: name.to_string(),
            cook_time,
        })
    }

    #[test]
    fn test_insert_and_get() {
        let store = CookbookStore::new();
        assert!(store.is_empty());
        assert!(store.get("Egg").is_none());

        store.insert(ingredient("Egg", 5)).unwrap();
        let egg = store.get("Egg").unwrap();
        assert_eq!(egg.name(), "Egg");
        assert_eq!(store.len(), 1);
        assert!(store.contains("Egg"));
    }

    #[test]
    fn test_insert_rejects_duplicate_names_across_variants() {
        let store = CookbookStore::new();
        store.insert(ingredient("Egg", 5)).unwrap();

        let err = store
            .insert(Entry::Recipe(Recipe {
                name: "Egg".to_string(),
                required_items: vec![],
            }))
            .unwrap_err();
        assert!(matches!(err, CookbookError::DuplicateEntry { name } if name == "Egg"));

        // 原本的條目不受影響
        assert_eq!(store.get("Egg").unwrap().kind(), "ingredient");
    }

    #[test]
    fn test_snapshot_ignores_later_inserts() {
        let store = CookbookStore::new();
        store
            .insert(Entry::Recipe(Recipe {
                name: "Toast".to_string(),
                required_items: vec![RequiredItem {
                    name: "Bread".to_string(),
                    quantity: 1,
                }],
            }))
            .unwrap();

        let snapshot = store.snapshot();
        store.insert(ingredient("Bread", 2)).unwrap();

        assert!(snapshot.get("Bread").is_none());
        assert_eq!(snapshot.len(), 1);
        assert!(store.snapshot().get("Bread").is_some());
    }

    #[test]
    fn test_concurrent_inserts_keep_names_unique() {
        let store = Arc::new(CookbookStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.insert(ingredient("Salt", 1)).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.names(), vec!["Salt".to_string()]);
    }
}
