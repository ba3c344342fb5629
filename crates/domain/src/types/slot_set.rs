//! Slot set operations
//!
//! Every operation here is pure: it borrows its inputs and returns a new set.
//! Toggling is deliberately forgiving (adding a present slot or removing an
//! absent one returns the set unchanged), which is what keeps repeated drag
//! events over the same cell idempotent.

use std::collections::btree_set;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::impl_domain_code_conversions;
use crate::types::slot::{Granularity, Slot};

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleMode {
    Add,
    Remove,
}

impl_domain_code_conversions!(ToggleMode {
    Add => "add",
    Remove => "remove",
});

/// Collection of unique slots.
///
/// Backed by an ordered set so iteration is deterministic; the order itself
/// carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotSet {
    slots: BTreeSet<Slot>,
}

impl SlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn contains(&self, slot: &Slot) -> bool {
        self.slots.contains(slot)
    }

    /// Granularity of the members, `None` when empty.
    pub fn granularity(&self) -> Option<Granularity> {
        self.slots.first().map(Slot::granularity)
    }

    /// Insert in place; returns whether the slot was new.
    pub fn insert(&mut self, slot: Slot) -> bool {
        self.slots.insert(slot)
    }

    /// Remove in place; returns whether the slot was present.
    pub fn remove(&mut self, slot: &Slot) -> bool {
        self.slots.remove(slot)
    }

    /// Set with `slot` added (`Add`) or removed (`Remove`). Adding a present
    /// slot or removing an absent one yields an equal set.
    #[must_use]
    pub fn toggle(&self, slot: &Slot, mode: ToggleMode) -> Self {
        let mut next = self.clone();
        match mode {
            ToggleMode::Add => {
                next.slots.insert(*slot);
            }
            ToggleMode::Remove => {
                next.slots.remove(slot);
            }
        }
        next
    }

    /// Slots for which `within` is false.
    #[must_use]
    pub fn difference<F>(&self, within: F) -> Self
    where
        F: Fn(&Slot) -> bool,
    {
        self.slots.iter().filter(|&slot| !within(slot)).copied().collect()
    }

    /// Slots for which `within` is true.
    #[must_use]
    pub fn retain_matching<F>(&self, within: F) -> Self
    where
        F: Fn(&Slot) -> bool,
    {
        self.slots.iter().filter(|&slot| within(slot)).copied().collect()
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        self.slots.union(&other.slots).copied().collect()
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.slots.intersection(&other.slots).copied().collect()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.slots.is_subset(&other.slots)
    }
}

/// Slots present in every input set. No inputs means no slots.
pub fn intersect_availability<'a, I>(sets: I) -> SlotSet
where
    I: IntoIterator<Item = &'a SlotSet>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return SlotSet::new();
    };

    sets.fold(first.clone(), |acc, set| {
        if acc.is_empty() {
            acc
        } else {
            acc.intersection(set)
        }
    })
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        Self { slots: iter.into_iter().collect() }
    }
}

impl Extend<Slot> for SlotSet {
    fn extend<T: IntoIterator<Item = Slot>>(&mut self, iter: T) {
        self.slots.extend(iter);
    }
}

impl IntoIterator for SlotSet {
    type Item = Slot;
    type IntoIter = btree_set::IntoIter<Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a Slot;
    type IntoIter = btree_set::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
