//! Per-actor threat table.
//!
//! Entries are `(aggressor, aggression)` pairs kept sorted descending by
//! aggression after every mutation. The sort is stable, so entries with equal
//! aggression keep the order in which they reached that value. Each aggressor
//! appears at most once.

use crate::state::EntityId;

/// Aggression used when none is given: the level difference.
pub fn default_aggro(owner_level: u32, who_level: u32) -> u32 {
    owner_level.abs_diff(who_level)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opponent {
    pub aggressor: EntityId,
    pub aggression: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpponentList {
    entries: Vec<Opponent>,
}

impl OpponentList {
    /// Adds `who` with the given aggression. Returns false if already present.
    pub fn add_opponent(&mut self, who: EntityId, aggression: u32) -> bool {
        if self.has_opponent(who) {
            return false;
        }
        self.entries.push(Opponent {
            aggressor: who,
            aggression,
        });
        self.sort();
        true
    }

    /// Removes exactly the entry for `who`.
    pub fn remove_opponent(&mut self, who: EntityId) -> bool {
        match self.position(who) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_opponent(&self, who: EntityId) -> bool {
        self.position(who).is_some()
    }

    pub fn has_opponents(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn aggro_of(&self, who: EntityId) -> Option<u32> {
        self.position(who).map(|index| self.entries[index].aggression)
    }

    /// Updates `who`'s aggression. No-op if absent.
    pub fn set_aggro(&mut self, who: EntityId, value: u32) -> bool {
        let Some(index) = self.position(who) else {
            return false;
        };
        self.entries[index].aggression = value;
        self.sort();
        true
    }

    /// Raises `who`'s aggression by `delta`, saturating. No-op if absent.
    pub fn add_aggro(&mut self, who: EntityId, delta: u32) -> bool {
        match self.aggro_of(who) {
            Some(current) => self.set_aggro(who, current.saturating_add(delta)),
            None => false,
        }
    }

    pub fn top_aggro(&self) -> Option<Opponent> {
        self.entries.first().copied()
    }

    /// Makes `who` the top aggressor, adding it with `default_aggro` first if
    /// it is not in the list.
    pub fn move_to_top(&mut self, who: EntityId, default_aggro: u32) {
        self.add_opponent(who, default_aggro);
        if self.top_aggro().is_some_and(|top| top.aggressor == who) {
            return;
        }
        let highest = self
            .entries
            .iter()
            .map(|entry| entry.aggression)
            .max()
            .unwrap_or(0);
        self.set_aggro(who, highest.saturating_add(1));
    }

    /// Highest-aggression opponent accepted by `in_range`.
    pub fn first_within_range(&self, mut in_range: impl FnMut(EntityId) -> bool) -> Option<EntityId> {
        self.entries
            .iter()
            .map(|entry| entry.aggressor)
            .find(|aggressor| in_range(*aggressor))
    }

    /// Drops every aggressor `is_valid` rejects. Returns how many were removed.
    pub fn check_list(&mut self, mut is_valid: impl FnMut(EntityId) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| is_valid(entry.aggressor));
        before - self.entries.len()
    }

    /// Empties the list, returning the former aggressors.
    pub fn reset_list(&mut self) -> Vec<EntityId> {
        self.entries.drain(..).map(|entry| entry.aggressor).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opponent> {
        self.entries.iter()
    }

    fn position(&self, who: EntityId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.aggressor == who)
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.aggression.cmp(&a.aggression));
    }
}
