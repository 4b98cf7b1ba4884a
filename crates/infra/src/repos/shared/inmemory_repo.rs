use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

// A poisoned lock only means another test thread panicked while holding it,
// the data itself is still usable.
pub fn lock<T>(collection: &Mutex<T>) -> MutexGuard<'_, T> {
    collection
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = lock(collection);
    collection.push(val.clone());
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = lock(collection);
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}
