//! Animated gap reconciliation for merged material runs.
//!
//! A mergeable list is a sequence of keyed slices separated by gaps. When
//! the caller supplies a new list, the reconciler diffs it against the
//! previous one by key and produces animated transitions instead of hard
//! swaps: inserted gaps grow open, removed gaps shrink closed, and runs of
//! removed children collapse into a single closing gap sized to the sum of
//! the gaps they contained. The internal list keeps the structural
//! invariant that gaps never touch each other or the list ends, checked at
//! every quiescent point.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use murrine_components::mergeable::{MergeableItem, MergeableList};
//!
//! let mut list = MergeableList::new(vec![
//!     MergeableItem::slice(1),
//!     MergeableItem::gap(10, 16.0),
//!     MergeableItem::slice(2),
//! ]);
//! list.update(vec![MergeableItem::slice(1), MergeableItem::slice(2)]);
//! // The gap is still present, animating closed.
//! assert_eq!(list.children().len(), 3);
//! list.advance(Duration::from_millis(200));
//! list.remove_empty_gaps();
//! assert_eq!(list.children().len(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use murrine_ui::{AnimationController, AnimationStatus, Curve};
use tracing::debug;

/// Duration of every gap open/close animation.
const GAP_ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Default size of a gap between merged runs, in pixels.
pub const DEFAULT_GAP_SIZE: f32 = 16.0;

/// Identity of one list item across reconciliations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// Caller-assigned identity.
    External(u64),
    /// Reconciler-minted identity for a coalesced closing gap.
    Synthetic(u64),
}

/// One entry of a mergeable list.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeableItem {
    /// A content run boundary's worth of material.
    Slice {
        /// The slice's identity.
        key: ItemKey,
    },
    /// Empty space separating two slices.
    Gap {
        /// The gap's identity.
        key: ItemKey,
        /// Fully-open size, in pixels, along the main axis.
        size: f32,
    },
}

impl MergeableItem {
    /// A slice with an external key.
    pub fn slice(key: u64) -> Self {
        MergeableItem::Slice {
            key: ItemKey::External(key),
        }
    }

    /// A gap with an external key and the given open size.
    pub fn gap(key: u64, size: f32) -> Self {
        MergeableItem::Gap {
            key: ItemKey::External(key),
            size,
        }
    }

    /// The item's identity.
    pub fn key(&self) -> ItemKey {
        match self {
            MergeableItem::Slice { key } | MergeableItem::Gap { key, .. } => *key,
        }
    }

    fn is_gap(&self) -> bool {
        matches!(self, MergeableItem::Gap { .. })
    }

    fn gap_size(&self) -> f32 {
        match self {
            MergeableItem::Gap { size, .. } => *size,
            MergeableItem::Slice { .. } => 0.0,
        }
    }
}

/// Checks the structural invariant: no two adjacent gaps, and neither the
/// first nor the last item is a gap.
pub fn gaps_are_valid(items: &[MergeableItem]) -> bool {
    if items.windows(2).any(|w| w[0].is_gap() && w[1].is_gap()) {
        return false;
    }
    match (items.first(), items.last()) {
        (Some(first), Some(last)) => !first.is_gap() && !last.is_gap(),
        _ => true,
    }
}

#[derive(Debug)]
struct GapAnimation {
    controller: AnimationController,
    gap_start: f32,
}

impl GapAnimation {
    fn new() -> Self {
        Self {
            controller: AnimationController::new(GAP_ANIMATION_DURATION),
            gap_start: 0.0,
        }
    }

    fn eased(&self) -> f32 {
        Curve::FastOutSlowIn.transform(self.controller.value())
    }
}

/// The reconciling list state machine.
pub struct MergeableList {
    children: Vec<MergeableItem>,
    previous: Vec<MergeableItem>,
    animations: HashMap<ItemKey, GapAnimation>,
    next_synthetic: u64,
}

impl MergeableList {
    /// Creates the list with its initial children; gaps start fully open.
    pub fn new(children: Vec<MergeableItem>) -> Self {
        debug_assert!(gaps_are_valid(&children));
        let mut list = Self {
            children: Vec::new(),
            previous: children.clone(),
            animations: HashMap::new(),
            next_synthetic: 0,
        };
        for child in children {
            let key = child.key();
            let is_gap = child.is_gap();
            list.children.push(child);
            if is_gap {
                let mut animation = GapAnimation::new();
                animation.controller.set_value(1.0);
                list.animations.insert(key, animation);
            }
        }
        list
    }

    /// The current internal children, closing gaps included.
    pub fn children(&self) -> &[MergeableItem] {
        &self.children
    }

    fn insert_child(&mut self, index: usize, child: MergeableItem) {
        if child.is_gap() {
            self.animations.insert(child.key(), GapAnimation::new());
        }
        self.children.insert(index, child);
    }

    fn remove_child(&mut self, index: usize) {
        let child = self.children.remove(index);
        if child.is_gap() {
            self.animations.remove(&child.key());
        }
    }

    fn is_closing_gap(&self, index: usize) -> bool {
        index + 1 < self.children.len()
            && self.children[index].is_gap()
            && self
                .animations
                .get(&self.children[index].key())
                .is_some_and(|a| a.controller.status() == AnimationStatus::Reverse)
    }

    /// Drops every gap whose closing animation has finished.
    pub fn remove_empty_gaps(&mut self) {
        let mut j = 0;
        while j < self.children.len() {
            let dismissed = self.children[j].is_gap()
                && self
                    .animations
                    .get(&self.children[j].key())
                    .is_some_and(|a| a.controller.status() == AnimationStatus::Dismissed);
            if dismissed {
                self.remove_child(j);
            } else {
                j += 1;
            }
        }
    }

    /// The current painted size of the gap at `index`, interpolated from
    /// its animation's starting size toward its declared size.
    pub fn gap_size(&self, index: usize) -> f32 {
        let declared = self.children[index].gap_size();
        match self.animations.get(&self.children[index].key()) {
            Some(animation) => {
                animation.gap_start + (declared - animation.gap_start) * animation.eased()
            }
            None => declared,
        }
    }

    fn with_gap_animation(&mut self, key: ItemKey, f: impl FnOnce(&mut GapAnimation)) {
        if let Some(animation) = self.animations.get_mut(&key) {
            f(animation);
        }
    }

    /// Reconciles the list against a newly supplied set of children.
    ///
    /// Children present in both lists are kept (and their gap animations
    /// with them); inserted gaps animate open; removed children collapse,
    /// with consecutive removed gaps coalesced into one synthetic closing
    /// gap sized to their sum. A gap that is mid-close and reappears in the
    /// new list resumes opening from its current size.
    pub fn update(&mut self, new_children: Vec<MergeableItem>) {
        debug_assert!(gaps_are_valid(&new_children));

        let old_keys: HashSet<ItemKey> = self.previous.iter().map(MergeableItem::key).collect();
        let new_keys: HashSet<ItemKey> = new_children.iter().map(MergeableItem::key).collect();
        let new_only: HashSet<ItemKey> = new_keys.difference(&old_keys).copied().collect();
        let old_only: HashSet<ItemKey> = old_keys.difference(&new_keys).copied().collect();

        self.remove_empty_gaps();

        let mut i = 0;
        let mut j = 0;
        while i < new_children.len() && j < self.children.len() {
            if new_only.contains(&new_children[i].key())
                || old_only.contains(&self.children[j].key())
            {
                let start_new = i;
                let start_old = j;

                while i < new_children.len() && new_only.contains(&new_children[i].key()) {
                    i += 1;
                }
                while j < self.children.len()
                    && (old_only.contains(&self.children[j].key()) || self.is_closing_gap(j))
                {
                    j += 1;
                }

                let new_len = i - start_new;
                let old_len = j - start_old;

                if new_len > 0 {
                    let old_starts_with_slice =
                        old_len == 1 && !self.children[start_old].is_gap();
                    if old_len > 1 || old_starts_with_slice {
                        if new_len == 1 && new_children[start_new].is_gap() {
                            // A whole changed run becomes one gap: open it
                            // from the summed size of the gaps it replaces.
                            let mut gap_size_sum = 0.0;
                            while start_old < j {
                                gap_size_sum += self.children[start_old].gap_size();
                                self.remove_child(start_old);
                                j -= 1;
                            }
                            let gap = new_children[start_new].clone();
                            let key = gap.key();
                            self.insert_child(start_old, gap);
                            self.with_gap_animation(key, |a| {
                                a.gap_start = gap_size_sum;
                                a.controller.forward();
                            });
                            j += 1;
                        } else {
                            for _ in 0..old_len {
                                self.remove_child(start_old);
                            }
                            for k in 0..new_len {
                                self.insert_child(
                                    start_old + k,
                                    new_children[start_new + k].clone(),
                                );
                            }
                            j = j - old_len + new_len;
                        }
                    } else if old_len == 1 {
                        // The single old child is a gap.
                        if new_len == 1
                            && new_children[start_new].is_gap()
                            && self.children[start_old].key() == new_children[start_new].key()
                        {
                            // A closing gap came back: resume opening.
                            self.with_gap_animation(new_children[start_new].key(), |a| {
                                a.controller.forward();
                            });
                        } else {
                            let gap_size = self.gap_size(start_old);
                            self.remove_child(start_old);
                            for k in 0..new_len {
                                self.insert_child(
                                    start_old + k,
                                    new_children[start_new + k].clone(),
                                );
                            }
                            j += new_len - 1;

                            // Distribute the old gap's current size over the
                            // inserted gaps, proportional to their declared
                            // sizes.
                            let gap_size_sum: f32 = new_children[start_new..i]
                                .iter()
                                .map(MergeableItem::gap_size)
                                .sum();
                            for child in &new_children[start_new..i] {
                                if child.is_gap() {
                                    let share = gap_size * child.gap_size() / gap_size_sum;
                                    self.with_gap_animation(child.key(), |a| {
                                        a.gap_start = share;
                                        a.controller.set_value(0.0);
                                        a.controller.forward();
                                    });
                                }
                            }
                        }
                    } else {
                        for k in 0..new_len {
                            let child = new_children[start_new + k].clone();
                            let key = child.key();
                            let is_gap = child.is_gap();
                            self.insert_child(start_old + k, child);
                            if is_gap {
                                self.with_gap_animation(key, |a| a.controller.forward());
                            }
                        }
                        j += new_len;
                    }
                } else if old_len > 1 || (old_len == 1 && !self.children[start_old].is_gap()) {
                    // Removed run: collapse it into one closing gap sized to
                    // the sum of the gaps it contained.
                    let mut gap_size_sum = 0.0;
                    while start_old < j {
                        gap_size_sum += self.children[start_old].gap_size();
                        self.remove_child(start_old);
                        j -= 1;
                    }
                    if gap_size_sum != 0.0 {
                        let key = ItemKey::Synthetic(self.next_synthetic);
                        self.next_synthetic += 1;
                        self.insert_child(
                            start_old,
                            MergeableItem::Gap {
                                key,
                                size: gap_size_sum,
                            },
                        );
                        self.with_gap_animation(key, |a| {
                            a.gap_start = 0.0;
                            a.controller.set_value(1.0);
                            a.controller.reverse();
                        });
                        j += 1;
                    }
                } else if old_len == 1 {
                    let key = self.children[start_old].key();
                    self.with_gap_animation(key, |a| {
                        a.gap_start = 0.0;
                        a.controller.reverse();
                    });
                }
            } else if self.children[j].is_gap() == new_children[i].is_gap() {
                self.children[j] = new_children[i].clone();
                i += 1;
                j += 1;
            } else {
                debug_assert!(self.children[j].is_gap());
                j += 1;
            }
        }

        while j < self.children.len() {
            self.remove_child(j);
        }
        while i < new_children.len() {
            self.insert_child(j, new_children[i].clone());
            i += 1;
            j += 1;
        }

        debug!(children = self.children.len(), "mergeable list reconciled");
        self.previous = new_children;
    }

    /// Advances every gap animation, in list order. Returns `true` if any
    /// gap changed size.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        for index in 0..self.children.len() {
            if self.children[index].is_gap()
                && let Some(animation) = self.animations.get_mut(&self.children[index].key())
            {
                changed |= animation.controller.advance(dt);
            }
        }
        changed
    }

    /// Whether a divider belongs on the side of a slice facing `index`:
    /// yes when that neighbor is a slice or a still-closing gap.
    pub fn needs_divider(&self, index: usize) -> bool {
        match self.children.get(index) {
            Some(child) => !child.is_gap() || self.is_closing_gap(index),
            None => false,
        }
    }

    /// Corner radii `(start, end)` for the run containing the slice at
    /// `index`. Outer list corners always carry `card_radius`; corners
    /// facing a gap grow in with the gap's animation.
    pub fn corner_radii(&self, index: usize, start: bool, end: bool, card_radius: f32) -> (f32, f32) {
        let animated = |neighbor: usize| {
            self.animations
                .get(&self.children[neighbor].key())
                .map(|a| card_radius * a.eased())
                .unwrap_or(0.0)
        };
        let start_radius = if start {
            card_radius
        } else if index > 0 && self.children[index - 1].is_gap() {
            animated(index - 1)
        } else {
            0.0
        };
        let end_radius = if end {
            card_radius
        } else if index + 2 < self.children.len() && self.children[index + 1].is_gap() {
            animated(index + 1)
        } else {
            0.0
        };
        (start_radius, end_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(list: &mut MergeableList) {
        list.advance(Duration::from_millis(300));
        list.remove_empty_gaps();
    }

    #[test]
    fn test_initial_gaps_start_open() {
        let list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        assert_eq!(list.gap_size(1), 16.0);
    }

    #[test]
    fn test_inserted_gap_animates_open() {
        let mut list = MergeableList::new(vec![MergeableItem::slice(1), MergeableItem::slice(2)]);
        list.update(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        assert_eq!(list.children().len(), 3);
        assert_eq!(list.gap_size(1), 0.0);
        assert!(list.advance(Duration::from_millis(100)));
        assert!(list.gap_size(1) > 0.0);
        assert!(list.gap_size(1) < 16.0);
        list.advance(Duration::from_millis(100));
        assert_eq!(list.gap_size(1), 16.0);
    }

    #[test]
    fn test_removed_gap_closes_then_prunes() {
        let mut list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        list.update(vec![MergeableItem::slice(1), MergeableItem::slice(2)]);
        // The gap stays while it closes.
        assert_eq!(list.children().len(), 3);
        assert!(list.is_closing_gap(1));
        list.advance(Duration::from_millis(100));
        assert!(list.gap_size(1) < 16.0);
        list.advance(Duration::from_millis(100));
        list.remove_empty_gaps();
        assert_eq!(list.children().len(), 2);
    }

    #[test]
    fn test_removed_run_coalesces_gaps() {
        let mut list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
            MergeableItem::gap(11, 16.0),
            MergeableItem::slice(3),
        ]);
        list.update(vec![MergeableItem::slice(1), MergeableItem::slice(3)]);
        // One synthetic gap sized to the sum of the removed gaps.
        assert_eq!(list.children().len(), 3);
        assert!(matches!(
            list.children()[1],
            MergeableItem::Gap {
                key: ItemKey::Synthetic(_),
                ..
            }
        ));
        assert_eq!(list.gap_size(1), 32.0);
        settle(&mut list);
        assert_eq!(list.children().len(), 2);
    }

    #[test]
    fn test_gap_replaced_by_slice() {
        let mut list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        list.update(vec![
            MergeableItem::slice(1),
            MergeableItem::slice(3),
            MergeableItem::slice(2),
        ]);
        assert_eq!(list.children().len(), 3);
        assert!(!list.children()[1].is_gap());
    }

    #[test]
    fn test_reopening_closing_gap_resumes() {
        let open = vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ];
        let mut list = MergeableList::new(open.clone());
        list.update(vec![MergeableItem::slice(1), MergeableItem::slice(2)]);
        list.advance(Duration::from_millis(100));
        let mid_close = list.gap_size(1);
        assert!(mid_close > 0.0 && mid_close < 16.0);

        // The same gap key reappears before the close finishes.
        list.update(open);
        assert_eq!(list.children().len(), 3);
        assert_eq!(list.gap_size(1), mid_close);
        list.advance(Duration::from_millis(300));
        assert_eq!(list.gap_size(1), 16.0);
    }

    #[test]
    fn test_split_gap_distributes_size_proportionally() {
        let mut list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        list.update(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(11, 8.0),
            MergeableItem::slice(3),
            MergeableItem::gap(12, 24.0),
            MergeableItem::slice(2),
        ]);
        // The old 16px gap splits 8:24 across the inserted gaps.
        assert_eq!(list.gap_size(1), 4.0);
        assert_eq!(list.gap_size(3), 12.0);
        list.advance(Duration::from_millis(300));
        assert_eq!(list.gap_size(1), 8.0);
        assert_eq!(list.gap_size(3), 24.0);
    }

    #[test]
    fn test_invariant_holds_across_update_sequences() {
        let updates: Vec<Vec<MergeableItem>> = vec![
            vec![
                MergeableItem::slice(1),
                MergeableItem::gap(10, 16.0),
                MergeableItem::slice(2),
            ],
            vec![MergeableItem::slice(1), MergeableItem::slice(2)],
            vec![
                MergeableItem::slice(1),
                MergeableItem::gap(11, 16.0),
                MergeableItem::slice(3),
                MergeableItem::gap(12, 8.0),
                MergeableItem::slice(2),
            ],
            vec![MergeableItem::slice(3)],
            vec![
                MergeableItem::slice(4),
                MergeableItem::gap(13, 24.0),
                MergeableItem::slice(3),
            ],
            vec![],
            vec![
                MergeableItem::slice(1),
                MergeableItem::gap(10, 16.0),
                MergeableItem::slice(2),
            ],
        ];

        let mut list = MergeableList::new(vec![MergeableItem::slice(1)]);
        for update in updates {
            list.update(update);
            settle(&mut list);
            assert!(
                gaps_are_valid(list.children()),
                "invariant broken: {:?}",
                list.children()
            );
        }
    }

    #[test]
    fn test_corner_radii_follow_adjacent_gap() {
        let mut list = MergeableList::new(vec![MergeableItem::slice(1), MergeableItem::slice(2)]);
        list.update(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        // Gap just inserted: the facing corner is still square.
        assert_eq!(list.corner_radii(0, true, false, 2.0), (2.0, 0.0));
        list.advance(Duration::from_millis(200));
        assert_eq!(list.corner_radii(0, true, false, 2.0), (2.0, 2.0));
        assert_eq!(list.corner_radii(2, false, true, 2.0), (2.0, 2.0));
    }

    #[test]
    fn test_dividers_skip_open_gaps() {
        let list = MergeableList::new(vec![
            MergeableItem::slice(1),
            MergeableItem::gap(10, 16.0),
            MergeableItem::slice(2),
        ]);
        // A fully open gap separates runs, so no divider faces it.
        assert!(!list.needs_divider(1));
        assert!(list.needs_divider(0));
        assert!(list.needs_divider(2));
        assert!(!list.needs_divider(5));
    }
}
