//! Element histogram for a group of members

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::Element;
use crate::members::Member;

/// Member count per element. Always carries all four elements as keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHistogram {
    counts: BTreeMap<Element, usize>,
}

impl ElementHistogram {
    /// All four elements at zero
    pub fn new() -> Self {
        Self {
            counts: Element::ALL.iter().map(|&e| (e, 0)).collect(),
        }
    }

    pub fn from_members(members: &[Member]) -> Self {
        let mut histogram = Self::new();
        for member in members {
            histogram.add(member.element);
        }
        histogram
    }

    pub fn add(&mut self, element: Element) {
        *self.counts.entry(element).or_insert(0) += 1;
    }

    pub fn count(&self, element: Element) -> usize {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of keys; four for any histogram built through this type
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every element has at least one member
    pub fn is_balanced(&self) -> bool {
        Element::ALL.iter().all(|&e| self.count(e) > 0)
    }

    /// Elements with no members, in canonical order
    pub fn missing(&self) -> Vec<Element> {
        Element::ALL
            .iter()
            .copied()
            .filter(|&e| self.count(e) == 0)
            .collect()
    }

    /// Element with the most members; ties go to the earlier element
    pub fn dominant(&self) -> Option<Element> {
        let mut best: Option<(Element, usize)> = None;
        for element in Element::ALL {
            let count = self.count(element);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((element, count));
            }
        }
        best.map(|(element, _)| element)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, usize)> + '_ {
        self.counts.iter().map(|(&e, &n)| (e, n))
    }
}

impl Default for ElementHistogram {
    fn default() -> Self {
        Self::new()
    }
}
