//! Participation record
//!
//! The set of round tags one student has cleared for one company. Rounds
//! are independent booleans, not a monotonic progress counter: toggling
//! round `k` never touches round `k + 1`, and `Selected` neither requires
//! nor implies any round membership.

use std::collections::HashSet;

use super::round::RoundTag;

/// Per student-company set of cleared round tags.
///
/// Created empty when a student is first associated with a company and
/// mutated only through the toggle operations. Membership order carries no
/// meaning; [`ParticipationRecord::tags_sorted`] provides a deterministic
/// view for wire output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationRecord {
    tags: HashSet<RoundTag>,
}

impl ParticipationRecord {
    /// Create an empty record (student applied, nothing cleared yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a tag collection, deduplicating repeats
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = RoundTag>,
    {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    /// True iff the tag is a member of the record
    pub fn has(&self, tag: RoundTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Flip membership of `Round {round_index + 1}`.
    ///
    /// Pure set-membership flip; no other tag is affected. The index is
    /// not validated against the company's `total_rounds` here; that is
    /// the store's responsibility. Returns the new membership state.
    pub fn toggle_round(&mut self, round_index: u32) -> bool {
        self.toggle(RoundTag::from_index(round_index))
    }

    /// Flip the `Selected` sentinel, leaving all round tags unchanged.
    /// Returns the new membership state.
    pub fn toggle_selected(&mut self) -> bool {
        self.toggle(RoundTag::Selected)
    }

    fn toggle(&mut self, tag: RoundTag) -> bool {
        if self.tags.remove(&tag) {
            false
        } else {
            self.tags.insert(tag);
            true
        }
    }

    /// Number of cleared numbered rounds, excluding `Selected`.
    ///
    /// Feeds aggregation and the "N Rounds [and Selected]" display label.
    pub fn cleared_round_count(&self) -> usize {
        self.tags.iter().filter(|tag| tag.is_round()).count()
    }

    /// True when the student has no recorded tags for the company
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Total tag count, `Selected` included
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterate the member tags in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &RoundTag> {
        self.tags.iter()
    }

    /// Member tags in deterministic series order, for wire output
    pub fn tags_sorted(&self) -> Vec<RoundTag> {
        let mut tags: Vec<RoundTag> = self.tags.iter().copied().collect();
        tags.sort_by(|a, b| RoundTag::series_cmp(&a.label(), &b.label()));
        tags
    }
}
