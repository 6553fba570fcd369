use std::collections::HashMap;
use std::sync::Arc;

use strsim::jaro_winkler;

use crate::models::Menu;

/// Minimum Jaro-Winkler similarity for a name suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Every known menu, shared by name.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalogue {
    menus: Vec<Arc<Menu>>,
    by_name: HashMap<String, usize>,
}

impl MenuCatalogue {
    /// Build a catalogue; a later menu replaces an earlier one of the same name.
    pub fn new(menus: Vec<Menu>) -> Self {
        let mut catalogue = Self::default();
        for menu in menus {
            match catalogue.by_name.get(&menu.name) {
                Some(&i) => catalogue.menus[i] = Arc::new(menu),
                None => {
                    catalogue.by_name.insert(menu.name.clone(), catalogue.menus.len());
                    catalogue.menus.push(Arc::new(menu));
                }
            }
        }
        catalogue
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Menu>> {
        self.by_name.get(name).map(|&i| &self.menus[i])
    }

    /// Menus in load order.
    pub fn menus(&self) -> &[Arc<Menu>] {
        &self.menus
    }

    /// Closest known name, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.to_lowercase();
        self.menus
            .iter()
            .map(|m| (m.name.as_str(), jaro_winkler(&needle, &m.name.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
