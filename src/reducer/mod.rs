//! Adjacent-element reduction.
//!
//! A [`Reducer`] walks an ordered sequence once and folds runs of
//! neighbouring elements that `compare` accepts into single values produced
//! by `combine`. A merged value that `cancel` rejects removes both operands,
//! which can make a previously committed element adjacent to what followed
//! the pair; that element is re-opened and compared again. Elements that
//! `ignore` steps over never take part in a merge but keep their position
//! relative to their neighbours.
//!
//! - [`CombineRules`]: the rule set as a trait (two required methods, two
//!   defaulted predicates)
//! - [`ReducerBuilder`]: the rule set assembled from closures, with
//!   presence checks for the required callbacks
//! - [`Observer`], [`TraceRecorder`], [`LogObserver`]: per-cycle snapshots
//!   of the reducer's regions
//!
//! # Examples
//!
//! ## Chain reaction
//!
//! ```rust
//! use element_combiner::reducer::ReducerBuilder;
//!
//! // (tag, value) pairs: equal tags merge, zero sums cancel.
//! let output = ReducerBuilder::<(char, i32)>::new()
//!     .input(vec![('a', 10), ('b', 1), ('b', -1), ('a', 10)])
//!     .compare(|left, right| left.0 == right.0)
//!     .combine(|left, right| (left.0, left.1 + right.1))
//!     .cancel(|value| value.1 == 0)
//!     .run();
//!
//! // Cancelling the b's re-opens the first a, which then merges.
//! assert_eq!(output, Ok(vec![('a', 20)]));
//! ```
//!
//! ## Ignored elements
//!
//! ```rust
//! use element_combiner::reducer::ReducerBuilder;
//!
//! // Upper-case tags are stepped over.
//! let output = ReducerBuilder::<(char, i32)>::new()
//!     .input(vec![('x', 1), ('I', -1), ('x', 10)])
//!     .compare(|left, right| left.0 == right.0)
//!     .combine(|left, right| (left.0, left.1 + right.1))
//!     .ignore(|anchor, candidate| anchor.0.is_uppercase() || candidate.0.is_uppercase())
//!     .run();
//!
//! assert_eq!(output, Ok(vec![('x', 11), ('I', -1)]));
//! ```

mod builder;
mod error;
mod machine;
mod regions;
mod rules;
mod trace;

pub use builder::ReducerBuilder;
pub use error::{ConfigurationError, ReduceError};
pub use machine::Reducer;
pub use rules::{Callbacks, CombineRules};
pub use trace::{Action, CycleRecord, LogObserver, Observer, Snapshot, SnapshotRecord, TraceRecorder};

/// Reduces a copy of `input` with `rules`.
///
/// The slice itself is never modified.
///
/// # Errors
///
/// Returns the first error raised by one of the rules.
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::{CombineRules, combine_adjacent};
/// use std::convert::Infallible;
///
/// struct Runs;
///
/// impl CombineRules<String> for Runs {
///     type Error = Infallible;
///
///     fn compare(&mut self, anchor: &String, candidate: &String) -> Result<bool, Infallible> {
///         Ok(anchor.chars().next() == candidate.chars().next())
///     }
///
///     fn combine(&mut self, anchor: String, candidate: String) -> Result<String, Infallible> {
///         Ok(anchor + &candidate)
///     }
/// }
///
/// let words = vec!["ab".to_string(), "ac".to_string(), "bd".to_string()];
/// let output = combine_adjacent(&words, Runs);
///
/// assert_eq!(output, Ok(vec!["abac".to_string(), "bd".to_string()]));
/// assert_eq!(words.len(), 3);
/// ```
pub fn combine_adjacent<T, R>(input: &[T], rules: R) -> Result<Vec<T>, R::Error>
where
    T: Clone,
    R: CombineRules<T>,
{
    Reducer::new(input.iter().cloned(), rules).run()
}
