//! Structured trace hook for observing a reduction cycle by cycle.
//!
//! The reducer reports a [`Snapshot`] of its three regions before and after
//! every cycle, together with the [`Action`] the cycle took, and the final
//! output once it is done. Observers only see borrowed views; nothing they
//! do can change the result.
//!
//! Two observers are provided:
//!
//! - [`TraceRecorder`]: clones every snapshot into a [`CycleRecord`], for
//!   tests and tooling that inspect the run afterwards.
//! - [`LogObserver`]: emits the snapshots as `tracing` events at DEBUG level.
//!
//! # Examples
//!
//! ```rust
//! use element_combiner::reducer::{Action, ReducerBuilder, TraceRecorder};
//!
//! let reducer = ReducerBuilder::<i32>::new()
//!     .input(vec![1, 1])
//!     .compare(|left, right| left == right)
//!     .combine(|left, right| left + right)
//!     .build()
//!     .unwrap();
//!
//! let mut recorder = TraceRecorder::new();
//! let output = reducer.run_observed(&mut recorder).unwrap();
//!
//! assert_eq!(output, vec![2]);
//! assert_eq!(recorder.cycles()[0].action, Action::Combined);
//! assert_eq!(recorder.output(), Some(&[2][..]));
//! ```

use std::collections::VecDeque;
use std::fmt;

/// What a single cycle of the reducer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Action {
    /// A lone anchor had no partner left and was committed.
    Finalized,
    /// `compare` rejected the pair; the anchor was committed.
    Separated,
    /// The pair was merged and the merged value kept.
    Combined,
    /// The pair was merged and `cancel` discarded the value.
    Cancelled,
}

impl Action {
    /// Returns `true` if the cycle merged a pair, whether kept or cancelled.
    #[inline]
    pub const fn is_merge(self) -> bool {
        matches!(self, Self::Combined | Self::Cancelled)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Finalized => "finalized",
            Self::Separated => "separated",
            Self::Combined => "combined",
            Self::Cancelled => "cancelled",
        };
        formatter.write_str(label)
    }
}

/// A borrowed view of the reducer's regions.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<'r, T> {
    /// Committed output, in order.
    pub finalized: &'r [T],
    /// The anchor and, if one was found, its candidate.
    pub working: &'r [T],
    /// Elements not yet examined, in order.
    pub unprocessed: &'r VecDeque<T>,
    /// How many elements at the head of `unprocessed` were stepped over by
    /// `ignore` before the candidate was found.
    pub skipped: usize,
}

impl<T> Clone for Snapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snapshot<'_, T> {}

impl<T: Clone> Snapshot<'_, T> {
    /// Clones the view into an owned record.
    pub fn to_record(&self) -> SnapshotRecord<T> {
        SnapshotRecord {
            finalized: self.finalized.to_vec(),
            working: self.working.to_vec(),
            unprocessed: self.unprocessed.iter().cloned().collect(),
            skipped: self.skipped,
        }
    }
}

/// An owned copy of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SnapshotRecord<T> {
    /// Committed output, in order.
    pub finalized: Vec<T>,
    /// The anchor and, if one was found, its candidate.
    pub working: Vec<T>,
    /// Elements not yet examined, in order.
    pub unprocessed: Vec<T>,
    /// Ignored elements stepped over in front of the candidate.
    pub skipped: usize,
}

/// One recorded cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleRecord<T> {
    /// Zero-based cycle number.
    pub cycle: usize,
    /// What the cycle did.
    pub action: Action,
    /// The regions when the cycle started.
    pub before: SnapshotRecord<T>,
    /// The regions when the cycle finished.
    pub after: SnapshotRecord<T>,
}

/// Receives the reducer's progress.
///
/// All methods default to doing nothing; `()` is the null observer.
pub trait Observer<T> {
    /// Called before a cycle resolves the working set.
    fn cycle_started(&mut self, cycle: usize, snapshot: &Snapshot<'_, T>) {
        let _ = (cycle, snapshot);
    }

    /// Called after a cycle, once the working set has been refilled.
    fn cycle_finished(&mut self, cycle: usize, action: Action, snapshot: &Snapshot<'_, T>) {
        let _ = (cycle, action, snapshot);
    }

    /// Called once with the final output.
    fn completed(&mut self, output: &[T]) {
        let _ = output;
    }
}

impl<T> Observer<T> for () {}

impl<T, O> Observer<T> for &mut O
where
    O: Observer<T> + ?Sized,
{
    fn cycle_started(&mut self, cycle: usize, snapshot: &Snapshot<'_, T>) {
        (**self).cycle_started(cycle, snapshot);
    }

    fn cycle_finished(&mut self, cycle: usize, action: Action, snapshot: &Snapshot<'_, T>) {
        (**self).cycle_finished(cycle, action, snapshot);
    }

    fn completed(&mut self, output: &[T]) {
        (**self).completed(output);
    }
}

impl<T, O> Observer<T> for Box<O>
where
    O: Observer<T> + ?Sized,
{
    fn cycle_started(&mut self, cycle: usize, snapshot: &Snapshot<'_, T>) {
        (**self).cycle_started(cycle, snapshot);
    }

    fn cycle_finished(&mut self, cycle: usize, action: Action, snapshot: &Snapshot<'_, T>) {
        (**self).cycle_finished(cycle, action, snapshot);
    }

    fn completed(&mut self, output: &[T]) {
        (**self).completed(output);
    }
}

/// Records every cycle of a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceRecorder<T> {
    cycles: Vec<CycleRecord<T>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pending: Option<SnapshotRecord<T>>,
    output: Option<Vec<T>>,
}

impl<T> TraceRecorder<T> {
    /// Creates an empty recorder.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cycles: Vec::new(),
            pending: None,
            output: None,
        }
    }

    /// Returns the recorded cycles in order.
    #[inline]
    pub fn cycles(&self) -> &[CycleRecord<T>] {
        &self.cycles
    }

    /// Returns the final output, once the reduction has completed.
    #[inline]
    pub fn output(&self) -> Option<&[T]> {
        self.output.as_deref()
    }

    /// Returns the actions taken, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.cycles.iter().map(|record| record.action).collect()
    }

    /// Consumes the recorder, returning the recorded cycles.
    pub fn into_cycles(self) -> Vec<CycleRecord<T>> {
        self.cycles
    }
}

impl<T> Default for TraceRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Observer<T> for TraceRecorder<T> {
    fn cycle_started(&mut self, _cycle: usize, snapshot: &Snapshot<'_, T>) {
        self.pending = Some(snapshot.to_record());
    }

    fn cycle_finished(&mut self, cycle: usize, action: Action, snapshot: &Snapshot<'_, T>) {
        let after = snapshot.to_record();
        let before = self.pending.take().unwrap_or_else(|| after.clone());
        self.cycles.push(CycleRecord {
            cycle,
            action,
            before,
            after,
        });
    }

    fn completed(&mut self, output: &[T]) {
        self.output = Some(output.to_vec());
    }
}

/// Emits every snapshot as a `tracing` event.
///
/// Events are logged at DEBUG level under the `element_combiner::trace`
/// target, so a subscriber filter such as
/// `element_combiner::trace=debug` shows the full step-through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogObserver;

impl<T: fmt::Debug> Observer<T> for LogObserver {
    fn cycle_started(&mut self, cycle: usize, snapshot: &Snapshot<'_, T>) {
        tracing::debug!(
            target: "element_combiner::trace",
            cycle,
            finalized = ?snapshot.finalized,
            working = ?snapshot.working,
            unprocessed = ?snapshot.unprocessed,
            "START"
        );
    }

    fn cycle_finished(&mut self, cycle: usize, action: Action, snapshot: &Snapshot<'_, T>) {
        tracing::debug!(
            target: "element_combiner::trace",
            cycle,
            %action,
            finalized = ?snapshot.finalized,
            working = ?snapshot.working,
            unprocessed = ?snapshot.unprocessed,
            "END"
        );
    }

    fn completed(&mut self, output: &[T]) {
        tracing::debug!(target: "element_combiner::trace", ?output, "FINAL");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_snapshot(unprocessed: &VecDeque<i32>) -> Snapshot<'_, i32> {
        Snapshot {
            finalized: &[1],
            working: &[2, 3],
            unprocessed,
            skipped: 0,
        }
    }

    #[rstest]
    #[case(Action::Finalized, "finalized", false)]
    #[case(Action::Separated, "separated", false)]
    #[case(Action::Combined, "combined", true)]
    #[case(Action::Cancelled, "cancelled", true)]
    fn action_display_and_merge_flag(
        #[case] action: Action,
        #[case] label: &str,
        #[case] is_merge: bool,
    ) {
        assert_eq!(action.to_string(), label);
        assert_eq!(action.is_merge(), is_merge);
    }

    #[rstest]
    fn snapshot_to_record_clones_all_regions() {
        let unprocessed = VecDeque::from(vec![4, 5]);
        let record = sample_snapshot(&unprocessed).to_record();
        assert_eq!(
            record,
            SnapshotRecord {
                finalized: vec![1],
                working: vec![2, 3],
                unprocessed: vec![4, 5],
                skipped: 0,
            }
        );
    }

    #[rstest]
    fn recorder_pairs_before_and_after_snapshots() {
        let before_queue = VecDeque::from(vec![4, 5]);
        let after_queue = VecDeque::from(vec![5]);
        let mut recorder = TraceRecorder::new();

        recorder.cycle_started(0, &sample_snapshot(&before_queue));
        recorder.cycle_finished(0, Action::Separated, &sample_snapshot(&after_queue));
        recorder.completed(&[1, 2]);

        let cycles = recorder.cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].before.unprocessed, vec![4, 5]);
        assert_eq!(cycles[0].after.unprocessed, vec![5]);
        assert_eq!(recorder.actions(), vec![Action::Separated]);
        assert_eq!(recorder.output(), Some(&[1, 2][..]));
    }

    #[rstest]
    fn recorder_output_is_none_until_completed() {
        let recorder: TraceRecorder<i32> = TraceRecorder::default();
        assert!(recorder.output().is_none());
        assert!(recorder.into_cycles().is_empty());
    }

    #[rstest]
    fn unit_observer_accepts_events() {
        let queue = VecDeque::new();
        Observer::<i32>::cycle_started(&mut (), 0, &sample_snapshot(&queue));
        Observer::<i32>::completed(&mut (), &[]);
    }

    #[rstest]
    fn log_observer_runs_without_subscriber() {
        let queue = VecDeque::from(vec![9]);
        let mut observer = LogObserver;
        observer.cycle_started(3, &sample_snapshot(&queue));
        observer.cycle_finished(3, Action::Combined, &sample_snapshot(&queue));
        Observer::<i32>::completed(&mut observer, &[1]);
    }
}
