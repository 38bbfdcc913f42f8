use crate::domain::model::Entry;
use std::sync::Arc;

/// Read-only name lookup used by the resolver to dereference required items.
pub trait EntryLookup {
    fn lookup(&self, name: &str) -> Option<Arc<Entry>>;
}

impl<L: EntryLookup + ?Sized> EntryLookup for &L {
    fn lookup(&self, name: &str) -> Option<Arc<Entry>> {
        (**self).lookup(name)
    }
}
