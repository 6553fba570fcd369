use std::collections::BTreeMap;

use crate::models::Diet;

/// Slot totals and replacements for one menu category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub total: usize,
    pub changed: usize,
}

/// Per-category count of slots whose menu differs between two plans.
///
/// Slots are paired by position and keyed by the first plan's menu
/// category; menus compare by name.
pub fn count_menu_changes(initial: &Diet, optimized: &Diet) -> BTreeMap<String, CategoryChanges> {
    let mut changes: BTreeMap<String, CategoryChanges> = BTreeMap::new();

    for (before, after) in initial.meals.iter().zip(&optimized.meals) {
        for (old, new) in before.menus.iter().zip(&after.menus) {
            let entry = changes.entry(old.category.clone()).or_default();
            entry.total += 1;
            if old.name != new.name {
                entry.changed += 1;
            }
        }
    }

    changes
}

/// Number of changed slots across all categories.
pub fn total_changed(initial: &Diet, optimized: &Diet) -> usize {
    count_menu_changes(initial, optimized)
        .values()
        .map(|c| c.changed)
        .sum()
}
