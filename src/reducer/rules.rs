//! The capability set a reducer is parameterized over.
//!
//! [`CombineRules`] has one required pair (`compare` / `combine`) and two
//! defaulted predicates (`cancel` / `ignore`). Implement it directly on a
//! type when the rules carry state or need a dedicated error type, or use
//! [`Callbacks`] (usually through [`ReducerBuilder`](super::ReducerBuilder))
//! to assemble the rules from closures.

use std::convert::Infallible;
use std::fmt;

/// Rules deciding how adjacent elements are merged.
///
/// Every method returns a `Result` so that a failing callback aborts the
/// reduction and surfaces to the caller of `run`. Infallible rules use
/// [`Infallible`] as their error type.
///
/// Methods take `&mut self`; rules are allowed to keep state, although the
/// result then depends on the order in which the reducer consults them.
///
/// # Type Parameters
///
/// * `T` - The element type. Merged values have the same type, so they can
///   be merged again with their neighbours.
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::{CombineRules, Reducer};
/// use std::convert::Infallible;
///
/// /// Sums runs of equal-signed integers and drops runs that sum to zero.
/// struct SignRuns;
///
/// impl CombineRules<i64> for SignRuns {
///     type Error = Infallible;
///
///     fn compare(&mut self, anchor: &i64, candidate: &i64) -> Result<bool, Infallible> {
///         Ok(anchor.signum() == candidate.signum())
///     }
///
///     fn combine(&mut self, anchor: i64, candidate: i64) -> Result<i64, Infallible> {
///         Ok(anchor + candidate)
///     }
///
///     fn cancel(&mut self, value: &i64) -> Result<bool, Infallible> {
///         Ok(*value == 0)
///     }
/// }
///
/// let output = Reducer::new(vec![1, 2, -3, 0, 0, 4], SignRuns).run();
/// assert_eq!(output, Ok(vec![3, -3, 4]));
/// ```
pub trait CombineRules<T> {
    /// The error a failing callback produces.
    type Error;

    /// Returns `true` if `anchor` and the following `candidate` may be merged.
    ///
    /// # Errors
    ///
    /// Returns the callback's own error, which aborts the reduction.
    fn compare(&mut self, anchor: &T, candidate: &T) -> Result<bool, Self::Error>;

    /// Produces the merged value of a pair for which `compare` returned `true`.
    ///
    /// # Errors
    ///
    /// Returns the callback's own error, which aborts the reduction.
    fn combine(&mut self, anchor: T, candidate: T) -> Result<T, Self::Error>;

    /// Returns `true` if a merged value annihilates both operands.
    ///
    /// Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns the callback's own error, which aborts the reduction.
    fn cancel(&mut self, value: &T) -> Result<bool, Self::Error> {
        let _ = value;
        Ok(false)
    }

    /// Returns `true` if `candidate` must be stepped over while looking for
    /// a merge partner of `anchor`.
    ///
    /// An ignored element is never an operand of `compare`, `combine`, or
    /// `cancel`; it stays in the output at its original position relative
    /// to its neighbours. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns the callback's own error, which aborts the reduction.
    fn ignore(&mut self, anchor: &T, candidate: &T) -> Result<bool, Self::Error> {
        let _ = (anchor, candidate);
        Ok(false)
    }
}

impl<T, R> CombineRules<T> for &mut R
where
    R: CombineRules<T> + ?Sized,
{
    type Error = R::Error;

    #[inline]
    fn compare(&mut self, anchor: &T, candidate: &T) -> Result<bool, Self::Error> {
        (**self).compare(anchor, candidate)
    }

    #[inline]
    fn combine(&mut self, anchor: T, candidate: T) -> Result<T, Self::Error> {
        (**self).combine(anchor, candidate)
    }

    #[inline]
    fn cancel(&mut self, value: &T) -> Result<bool, Self::Error> {
        (**self).cancel(value)
    }

    #[inline]
    fn ignore(&mut self, anchor: &T, candidate: &T) -> Result<bool, Self::Error> {
        (**self).ignore(anchor, candidate)
    }
}

pub(crate) type PairPredicate<'a, T, E> = Box<dyn FnMut(&T, &T) -> Result<bool, E> + 'a>;
pub(crate) type ValuePredicate<'a, T, E> = Box<dyn FnMut(&T) -> Result<bool, E> + 'a>;
pub(crate) type Merge<'a, T, E> = Box<dyn FnMut(T, T) -> Result<T, E> + 'a>;

/// A rule set assembled from closures.
///
/// Built by [`ReducerBuilder`](super::ReducerBuilder) once both required
/// callbacks are present. A missing `cancel` or `ignore` behaves as a
/// constant `false`.
///
/// # Type Parameters
///
/// * `'a` - The lifetime of the captured closures
/// * `T` - The element type
/// * `E` - The error type of the fallible callbacks
pub struct Callbacks<'a, T, E = Infallible> {
    compare: PairPredicate<'a, T, E>,
    combine: Merge<'a, T, E>,
    cancel: Option<ValuePredicate<'a, T, E>>,
    ignore: Option<PairPredicate<'a, T, E>>,
}

impl<'a, T, E> Callbacks<'a, T, E> {
    pub(crate) fn new(
        compare: PairPredicate<'a, T, E>,
        combine: Merge<'a, T, E>,
        cancel: Option<ValuePredicate<'a, T, E>>,
        ignore: Option<PairPredicate<'a, T, E>>,
    ) -> Self {
        Self {
            compare,
            combine,
            cancel,
            ignore,
        }
    }

    /// Returns `true` if a `cancel` callback was supplied.
    #[inline]
    pub const fn has_cancel(&self) -> bool {
        self.cancel.is_some()
    }

    /// Returns `true` if an `ignore` callback was supplied.
    #[inline]
    pub const fn has_ignore(&self) -> bool {
        self.ignore.is_some()
    }
}

impl<T, E> CombineRules<T> for Callbacks<'_, T, E> {
    type Error = E;

    fn compare(&mut self, anchor: &T, candidate: &T) -> Result<bool, E> {
        (self.compare)(anchor, candidate)
    }

    fn combine(&mut self, anchor: T, candidate: T) -> Result<T, E> {
        (self.combine)(anchor, candidate)
    }

    fn cancel(&mut self, value: &T) -> Result<bool, E> {
        self.cancel.as_mut().map_or(Ok(false), |cancel| cancel(value))
    }

    fn ignore(&mut self, anchor: &T, candidate: &T) -> Result<bool, E> {
        self.ignore
            .as_mut()
            .map_or(Ok(false), |ignore| ignore(anchor, candidate))
    }
}

impl<T, E> fmt::Debug for Callbacks<'_, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Callbacks")
            .field("cancel", &self.has_cancel())
            .field("ignore", &self.has_ignore())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Sum;

    impl CombineRules<i32> for Sum {
        type Error = Infallible;

        fn compare(&mut self, _anchor: &i32, _candidate: &i32) -> Result<bool, Infallible> {
            Ok(true)
        }

        fn combine(&mut self, anchor: i32, candidate: i32) -> Result<i32, Infallible> {
            Ok(anchor + candidate)
        }
    }

    fn summing_callbacks<'a>() -> Callbacks<'a, i32> {
        Callbacks::new(
            Box::new(|_: &i32, _: &i32| Ok(true)),
            Box::new(|left: i32, right: i32| Ok(left + right)),
            None,
            None,
        )
    }

    #[rstest]
    fn default_cancel_is_false() {
        assert_eq!(Sum.cancel(&0), Ok(false));
    }

    #[rstest]
    fn default_ignore_is_false() {
        assert_eq!(Sum.ignore(&1, &2), Ok(false));
    }

    #[rstest]
    fn mutable_reference_forwards_to_rules() {
        let mut rules = Sum;
        let mut borrowed = &mut rules;
        assert_eq!(CombineRules::<i32>::combine(&mut borrowed, 2, 3), Ok(5));
        assert_eq!(CombineRules::<i32>::compare(&mut borrowed, &2, &3), Ok(true));
    }

    #[rstest]
    fn callbacks_without_optional_predicates_default_to_false() {
        let mut callbacks = summing_callbacks();
        assert!(!callbacks.has_cancel());
        assert!(!callbacks.has_ignore());
        assert_eq!(callbacks.cancel(&0), Ok(false));
        assert_eq!(callbacks.ignore(&0, &0), Ok(false));
        assert_eq!(callbacks.combine(4, 5), Ok(9));
    }

    #[rstest]
    fn callbacks_use_supplied_optional_predicates() {
        let mut callbacks: Callbacks<'_, i32> = Callbacks::new(
            Box::new(|_: &i32, _: &i32| Ok(true)),
            Box::new(|left: i32, right: i32| Ok(left + right)),
            Some(Box::new(|value: &i32| Ok(*value == 0))),
            Some(Box::new(|_: &i32, candidate: &i32| Ok(*candidate < 0))),
        );
        assert!(callbacks.has_cancel());
        assert!(callbacks.has_ignore());
        assert_eq!(callbacks.cancel(&0), Ok(true));
        assert_eq!(callbacks.ignore(&1, &-1), Ok(true));
        assert_eq!(callbacks.ignore(&1, &1), Ok(false));
    }

    #[rstest]
    fn callbacks_debug_reports_presence() {
        let debug = format!("{:?}", summing_callbacks());
        assert!(debug.contains("Callbacks"));
        assert!(debug.contains("cancel: false"));
    }
}
