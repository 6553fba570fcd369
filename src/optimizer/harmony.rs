use std::collections::{BTreeSet, HashMap};

use crate::models::Diet;

/// Menu-pair co-occurrence counts over a historical plan.
///
/// Cell (i, j) counts historical meals serving both menus i and j; the
/// diagonal holds each menu's total number of appearances. Built once and
/// shared by every harmony evaluation.
#[derive(Debug, Clone, Default)]
pub struct HarmonyMatrix {
    menus: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<u32>,
    min: u32,
    max: u32,
}

impl HarmonyMatrix {
    /// Build the matrix from a historical plan. Menus are indexed in
    /// lexicographic name order.
    pub fn from_history(history: &Diet) -> Self {
        let menus: Vec<String> = history
            .all_menus()
            .map(|m| m.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<String, usize> = menus
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let n = menus.len();
        let mut counts = vec![0u32; n * n];
        let mut occurrences = vec![0u32; n];

        for meal in &history.meals {
            let ids: Vec<usize> = meal.menu_names().map(|name| index[name]).collect();
            for (pos, &a) in ids.iter().enumerate() {
                occurrences[a] += 1;
                for &b in &ids[pos + 1..] {
                    counts[a * n + b] += 1;
                    counts[b * n + a] += 1;
                }
            }
        }

        // The diagonal is overwritten with plain occurrence counts.
        for (i, &count) in occurrences.iter().enumerate() {
            counts[i * n + i] = count;
        }

        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);

        Self {
            menus,
            index,
            counts,
            min,
            max,
        }
    }

    /// Number of distinct historical menus.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Historical menu names in index order.
    pub fn menus(&self) -> &[String] {
        &self.menus
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Co-occurrence count of two menus, `None` if either never appeared.
    pub fn get(&self, a: &str, b: &str) -> Option<u32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.cell(i, j))
    }

    /// Cell value by matrix index.
    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> u32 {
        self.counts[i * self.menus.len() + j]
    }

    /// Total historical appearances of a menu.
    pub fn occurrences(&self, name: &str) -> u32 {
        self.get(name, name).unwrap_or(0)
    }

    /// Smallest cell value, diagonal included.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest cell value, diagonal included.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Most frequent historical menus, best first. Ties keep name order.
    pub fn top_menus(&self, n: usize) -> Vec<(&str, u32)> {
        let mut menus: Vec<(&str, u32)> = self
            .menus
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), self.cell(i, i)))
            .collect();
        menus.sort_by(|a, b| b.1.cmp(&a.1));
        menus.truncate(n);
        menus
    }

    /// Strongest off-diagonal pairs with a positive count, best first.
    pub fn top_pairs(&self, n: usize) -> Vec<(&str, &str, u32)> {
        let size = self.menus.len();
        let mut pairs: Vec<(&str, &str, u32)> = Vec::new();
        for i in 0..size {
            for j in (i + 1)..size {
                let count = self.counts[i * size + j];
                if count > 0 {
                    pairs.push((&self.menus[i], &self.menus[j], count));
                }
            }
        }
        // Stable sort keeps index order among equal counts.
        pairs.sort_by(|a, b| b.2.cmp(&a.2));
        pairs.truncate(n);
        pairs
    }
}
