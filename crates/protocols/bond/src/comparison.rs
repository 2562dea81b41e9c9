//! Saved bond comparisons
//!
//! Users line up candidate bonds side by side and save the set for later.
//! Comparisons are small JSON blobs on the key-value store: one list under
//! a single key, rewritten whole on every change.

use chrono::{DateTime, Utc};
use chronofi_core::{Error, KvStore};
use serde::{Deserialize, Serialize};

use crate::state::BondParameters;

/// Store key holding the saved comparison list
pub const COMPARISONS_KEY: &str = "chronofi.bond.comparisons";

/// A named set of bond terms saved for side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedComparison {
    pub name: String,
    pub bonds: Vec<BondParameters>,
    pub saved_at: DateTime<Utc>,
}

/// Load all saved comparisons; an absent key is an empty list
pub fn list_comparisons(store: &dyn KvStore) -> Result<Vec<SavedComparison>, Error> {
    match store.get(COMPARISONS_KEY) {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string())),
    }
}

/// Save a comparison, replacing any existing one with the same name
pub fn save_comparison(store: &dyn KvStore, comparison: SavedComparison) -> Result<(), Error> {
    let mut all = list_comparisons(store)?;
    all.retain(|c| c.name != comparison.name);
    all.push(comparison);
    write_all(store, &all)
}

/// Remove a comparison by name; removing the last one clears the key
pub fn remove_comparison(store: &dyn KvStore, name: &str) -> Result<(), Error> {
    let mut all = list_comparisons(store)?;
    let before = all.len();
    all.retain(|c| c.name != name);
    if all.len() == before {
        return Ok(());
    }
    if all.is_empty() {
        store.remove(COMPARISONS_KEY);
        return Ok(());
    }
    write_all(store, &all)
}

fn write_all(store: &dyn KvStore, comparisons: &[SavedComparison]) -> Result<(), Error> {
    let raw =
        serde_json::to_string(comparisons).map_err(|e| Error::Serialization(e.to_string()))?;
    store.set(COMPARISONS_KEY, &raw);
    Ok(())
}
