//! The reduction state machine.
//!
//! A reduction alternates between two phases until the working set and
//! Unprocessed are both empty:
//!
//! 1. **Acquire**: refill the working set. An empty working set takes the
//!    head of Unprocessed as its anchor. A lone anchor scans Unprocessed for
//!    the first element `ignore` does not step over and splices it out as
//!    the candidate; stepped-over elements stay where they are.
//! 2. **Resolve**:
//!    - A lone anchor has no partner left and is committed to Finalized.
//!    - A rejected pair commits the anchor. The candidate goes back to its
//!      slot and the head of Unprocessed (the first stepped-over element, or
//!      the candidate itself) becomes the next anchor.
//!    - A merged pair re-opens Finalized. Trailing committed elements that
//!      `ignore` steps over, judged against the element before them, go
//!      back to the head of Unprocessed, and the element in front of them
//!      becomes the next anchor. A kept value is placed at the head of
//!      Unprocessed so that it is compared against both the re-opened
//!      element before it and everything after it; a cancelled value is
//!      dropped, which makes the re-opened element adjacent to whatever
//!      followed the pair.
//!
//! # Termination
//!
//! Every merge removes at least one element. Between merges every cycle
//! commits one element, and re-opening returns at most the committed
//! elements to Unprocessed, so the run ends after finitely many cycles.

use std::fmt;

use super::regions::{Regions, WORKING_CAPACITY};
use super::rules::CombineRules;
use super::trace::{Action, Observer};

/// A single-pass adjacent-element reducer.
///
/// Owns its copy of the input and the rules; [`run`](Reducer::run) consumes
/// it, so a reducer runs exactly once.
///
/// # Type Parameters
///
/// * `'a` - The lifetime of an attached observer
/// * `T` - The element type
/// * `R` - The rules deciding how elements merge
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::{CombineRules, Reducer};
/// use std::convert::Infallible;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Token {
///     tag: char,
///     value: i32,
/// }
///
/// struct ByTag;
///
/// impl CombineRules<Token> for ByTag {
///     type Error = Infallible;
///
///     fn compare(&mut self, anchor: &Token, candidate: &Token) -> Result<bool, Infallible> {
///         Ok(anchor.tag == candidate.tag)
///     }
///
///     fn combine(&mut self, anchor: Token, candidate: Token) -> Result<Token, Infallible> {
///         Ok(Token { tag: anchor.tag, value: anchor.value + candidate.value })
///     }
///
///     fn cancel(&mut self, value: &Token) -> Result<bool, Infallible> {
///         Ok(value.value == 0)
///     }
/// }
///
/// let input = vec![
///     Token { tag: 'a', value: 10 },
///     Token { tag: 'b', value: 1 },
///     Token { tag: 'b', value: -1 },
///     Token { tag: 'a', value: 10 },
/// ];
///
/// let output = Reducer::new(input, ByTag).run();
/// assert_eq!(output, Ok(vec![Token { tag: 'a', value: 20 }]));
/// ```
pub struct Reducer<'a, T, R> {
    input: Vec<T>,
    rules: R,
    observer: Option<Box<dyn Observer<T> + 'a>>,
}

impl<'a, T, R> Reducer<'a, T, R>
where
    R: CombineRules<T>,
{
    /// Creates a reducer over a copy of `input`.
    pub fn new(input: impl IntoIterator<Item = T>, rules: R) -> Self {
        Self {
            input: input.into_iter().collect(),
            rules,
            observer: None,
        }
    }

    /// Attaches an observer that receives a snapshot of every cycle.
    ///
    /// Replaces any observer attached before.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Observer<T> + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the number of input elements.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Runs the reduction, reporting to the attached observer if any.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a callback. The reduction stops at
    /// that point and the partial state is dropped.
    pub fn run(mut self) -> Result<Vec<T>, R::Error> {
        match self.observer.take() {
            Some(mut observer) => self.run_observed(&mut observer),
            None => self.run_observed(&mut ()),
        }
    }

    /// Runs the reduction, reporting to `observer`.
    ///
    /// The caller keeps ownership of the observer, so a recorder can be
    /// inspected afterwards. An observer attached with
    /// [`with_observer`](Reducer::with_observer) is not notified.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a callback.
    pub fn run_observed<O>(self, observer: &mut O) -> Result<Vec<T>, R::Error>
    where
        O: Observer<T> + ?Sized,
    {
        let Self { input, rules, .. } = self;
        let input_len = input.len();
        tracing::debug!(input_len, "reducing sequence");

        if input_len <= 1 {
            observer.completed(&input);
            return Ok(input);
        }

        let mut machine = Machine {
            regions: Regions::new(input),
            rules,
        };
        let mut cycle = 0;

        machine.acquire()?;
        while machine.regions.working_len() > 0 {
            observer.cycle_started(cycle, &machine.regions.snapshot());
            let action = machine.resolve()?;
            let snapshot = machine.regions.snapshot();
            tracing::trace!(
                cycle,
                %action,
                finalized = snapshot.finalized.len(),
                working = snapshot.working.len(),
                unprocessed = snapshot.unprocessed.len(),
                "cycle resolved"
            );
            observer.cycle_finished(cycle, action, &snapshot);
            cycle += 1;
        }

        let output = machine.regions.into_output();
        tracing::debug!(input_len, output_len = output.len(), cycles = cycle, "sequence reduced");
        observer.completed(&output);
        Ok(output)
    }
}

impl<T, R> fmt::Debug for Reducer<'_, T, R>
where
    T: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Reducer")
            .field("input", &self.input)
            .field("rules", &self.rules)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

struct Machine<T, R> {
    regions: Regions<T>,
    rules: R,
}

impl<T, R> Machine<T, R>
where
    R: CombineRules<T>,
{
    fn acquire(&mut self) -> Result<(), R::Error> {
        if self.regions.working_len() == 0 && !self.regions.shift_anchor() {
            return Ok(());
        }
        if self.regions.working_len() >= WORKING_CAPACITY {
            return Ok(());
        }
        if let Some(index) = self.scan_for_candidate()? {
            self.regions.take_candidate(index);
        }
        Ok(())
    }

    /// Index of the first element in Unprocessed that `ignore` does not
    /// step over, relative to the current anchor.
    fn scan_for_candidate(&mut self) -> Result<Option<usize>, R::Error> {
        let Some(anchor) = self.regions.anchor() else {
            return Ok(None);
        };
        for index in 0..self.regions.unprocessed_len() {
            let Some(candidate) = self.regions.peek_unprocessed(index) else {
                break;
            };
            if !self.rules.ignore(anchor, candidate)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn resolve(&mut self) -> Result<Action, R::Error> {
        let Some((anchor, candidate, slot)) = self.regions.take_pair() else {
            if let Some(anchor) = self.regions.take_lone_anchor() {
                self.regions.finalize(anchor);
            }
            self.acquire()?;
            return Ok(Action::Finalized);
        };

        if !self.rules.compare(&anchor, &candidate)? {
            self.regions.finalize(anchor);
            self.regions.restore_candidate(candidate, slot);
            self.acquire()?;
            return Ok(Action::Separated);
        }

        let value = self.rules.combine(anchor, candidate)?;
        let action = if self.rules.cancel(&value)? {
            Action::Cancelled
        } else {
            self.regions.requeue(value);
            Action::Combined
        };
        self.reopen()?;
        self.acquire()?;
        Ok(action)
    }

    /// Re-opens the last committed element that is not stepped over.
    fn reopen(&mut self) -> Result<(), R::Error> {
        while let Some((previous, tail)) = self.regions.finalized_tail_pair() {
            if !self.rules.ignore(previous, tail)? {
                break;
            }
            self.regions.unfinalize_tail();
        }
        self.regions.reopen_anchor();
        Ok(())
    }
}
