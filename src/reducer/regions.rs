//! The three storage regions of a reduction.
//!
//! - **Finalized**: committed output, appended at the end. Its tail can be
//!   re-opened when a merge changes what follows it.
//! - **Working**: the anchor and, once found, its candidate (0 to 2 elements).
//! - **Unprocessed**: elements not yet examined, in input order. Elements an
//!   `ignore` scan stepped over stay here, in front of the candidate's slot.
//!
//! # Invariants
//!
//! - `working.len() <= 2`
//! - `skipped` is zero unless a candidate is present
//! - `finalized ++ working[0] ++ unprocessed[..skipped] ++ working[1] ++
//!   unprocessed[skipped..]` is the current output order

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::trace::Snapshot;

/// Maximum number of elements held in the working set.
pub(crate) const WORKING_CAPACITY: usize = 2;

pub(crate) struct Regions<T> {
    finalized: Vec<T>,
    working: SmallVec<[T; WORKING_CAPACITY]>,
    skipped: usize,
    unprocessed: VecDeque<T>,
}

impl<T> Regions<T> {
    pub(crate) fn new(input: impl IntoIterator<Item = T>) -> Self {
        let unprocessed: VecDeque<T> = input.into_iter().collect();
        Self {
            finalized: Vec::with_capacity(unprocessed.len()),
            working: SmallVec::new(),
            skipped: 0,
            unprocessed,
        }
    }

    /// Total number of elements across all regions.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.finalized.len() + self.working.len() + self.unprocessed.len()
    }

    #[inline]
    pub(crate) fn working_len(&self) -> usize {
        self.working.len()
    }

    #[inline]
    pub(crate) fn anchor(&self) -> Option<&T> {
        self.working.first()
    }

    #[inline]
    pub(crate) fn unprocessed_len(&self) -> usize {
        self.unprocessed.len()
    }

    #[inline]
    pub(crate) fn peek_unprocessed(&self, index: usize) -> Option<&T> {
        self.unprocessed.get(index)
    }

    /// Moves the head of Unprocessed into an empty working set.
    pub(crate) fn shift_anchor(&mut self) -> bool {
        debug_assert!(self.working.is_empty());
        match self.unprocessed.pop_front() {
            Some(anchor) => {
                self.working.push(anchor);
                true
            }
            None => false,
        }
    }

    /// Moves the Finalized tail back into an empty working set.
    pub(crate) fn reopen_anchor(&mut self) -> bool {
        debug_assert!(self.working.is_empty());
        match self.finalized.pop() {
            Some(anchor) => {
                self.working.push(anchor);
                true
            }
            None => false,
        }
    }

    /// The last two committed elements, in order.
    pub(crate) fn finalized_tail_pair(&self) -> Option<(&T, &T)> {
        match self.finalized.as_slice() {
            [.., previous, tail] => Some((previous, tail)),
            _ => None,
        }
    }

    /// Moves the Finalized tail back to the head of Unprocessed.
    pub(crate) fn unfinalize_tail(&mut self) -> bool {
        debug_assert_eq!(self.skipped, 0);
        match self.finalized.pop() {
            Some(element) => {
                self.unprocessed.push_front(element);
                true
            }
            None => false,
        }
    }

    /// Splices the element at `index` out of Unprocessed and makes it the
    /// candidate. The `index` elements in front of it were stepped over.
    pub(crate) fn take_candidate(&mut self, index: usize) {
        debug_assert_eq!(self.working.len(), 1);
        if let Some(candidate) = self.unprocessed.remove(index) {
            self.working.push(candidate);
            self.skipped = index;
        }
    }

    /// Empties the working set, returning the anchor and the candidate.
    ///
    /// The candidate's former slot is returned as well so that it can be
    /// put back by [`Regions::restore_candidate`].
    pub(crate) fn take_pair(&mut self) -> Option<(T, T, usize)> {
        if self.working.len() != WORKING_CAPACITY {
            return None;
        }
        let candidate = self.working.pop()?;
        let anchor = self.working.pop()?;
        let slot = std::mem::take(&mut self.skipped);
        Some((anchor, candidate, slot))
    }

    /// Empties a working set holding only an anchor.
    pub(crate) fn take_lone_anchor(&mut self) -> Option<T> {
        if self.working.len() == 1 {
            self.working.pop()
        } else {
            None
        }
    }

    /// Puts a candidate that did not merge back into its slot.
    pub(crate) fn restore_candidate(&mut self, candidate: T, slot: usize) {
        let slot = slot.min(self.unprocessed.len());
        self.unprocessed.insert(slot, candidate);
    }

    /// Places a merged value at the head of Unprocessed, where its anchor stood.
    pub(crate) fn requeue(&mut self, value: T) {
        self.unprocessed.push_front(value);
    }

    pub(crate) fn finalize(&mut self, element: T) {
        self.finalized.push(element);
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            finalized: &self.finalized,
            working: self.working.as_slice(),
            unprocessed: &self.unprocessed,
            skipped: self.skipped,
        }
    }

    /// Consumes the regions, committing everything left in input order.
    pub(crate) fn into_output(mut self) -> Vec<T> {
        if self.working.len() == WORKING_CAPACITY {
            if let Some(candidate) = self.working.pop() {
                let slot = std::mem::take(&mut self.skipped);
                self.restore_candidate(candidate, slot);
            }
        }
        self.finalized.extend(self.working.drain(..));
        self.finalized.extend(self.unprocessed);
        self.finalized
    }
}
