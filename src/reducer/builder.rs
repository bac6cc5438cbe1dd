//! Options for assembling a reducer from closures.
//!
//! [`ReducerBuilder`] records which callbacks were supplied. `compare` and
//! `combine` are required; [`build`](ReducerBuilder::build) checks their
//! presence, and the presence of the input, before any element is touched.

use std::convert::Infallible;
use std::fmt;

use super::error::{ConfigurationError, ReduceError};
use super::machine::Reducer;
use super::rules::{Callbacks, Merge, PairPredicate, ValuePredicate};
use super::trace::{LogObserver, Observer};

/// Builder for a closure-based [`Reducer`].
///
/// The plain setters (`compare`, `combine`, `cancel`, `ignore`) take
/// infallible closures. The `try_` variants take closures returning
/// `Result<_, E>`; their error aborts the run and is returned as
/// [`ReduceError::Callback`].
///
/// # Type Parameters
///
/// * `'a` - The lifetime of the captured closures
/// * `T` - The element type
/// * `E` - The error type of the fallible callbacks
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::ReducerBuilder;
///
/// let output = ReducerBuilder::<i32>::new()
///     .input(vec![1, 1, -2, 5])
///     .compare(|_, _| true)
///     .combine(|left, right| left + right)
///     .cancel(|value| *value == 0)
///     .run();
///
/// assert_eq!(output, Ok(vec![5]));
/// ```
pub struct ReducerBuilder<'a, T, E = Infallible> {
    input: Option<Vec<T>>,
    compare: Option<PairPredicate<'a, T, E>>,
    combine: Option<Merge<'a, T, E>>,
    cancel: Option<ValuePredicate<'a, T, E>>,
    ignore: Option<PairPredicate<'a, T, E>>,
    observer: Option<Box<dyn Observer<T> + 'a>>,
    logger: Option<Box<dyn Observer<T> + 'a>>,
}

impl<'a, T: 'a, E: 'a> ReducerBuilder<'a, T, E> {
    /// Creates a builder with nothing supplied.
    pub const fn new() -> Self {
        Self {
            input: None,
            compare: None,
            combine: None,
            cancel: None,
            ignore: None,
            observer: None,
            logger: None,
        }
    }

    /// Supplies the input sequence. The reducer works on its own copy.
    #[must_use]
    pub fn input(mut self, input: impl IntoIterator<Item = T>) -> Self {
        self.input = Some(input.into_iter().collect());
        self
    }

    /// Supplies the required `compare` callback.
    #[must_use]
    pub fn compare<F>(self, mut compare: F) -> Self
    where
        F: FnMut(&T, &T) -> bool + 'a,
    {
        self.try_compare(move |anchor, candidate| Ok(compare(anchor, candidate)))
    }

    /// Supplies a fallible `compare` callback.
    #[must_use]
    pub fn try_compare<F>(mut self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Result<bool, E> + 'a,
    {
        self.compare = Some(Box::new(compare));
        self
    }

    /// Supplies the required `combine` callback.
    #[must_use]
    pub fn combine<F>(self, mut combine: F) -> Self
    where
        F: FnMut(T, T) -> T + 'a,
    {
        self.try_combine(move |anchor, candidate| Ok(combine(anchor, candidate)))
    }

    /// Supplies a fallible `combine` callback.
    #[must_use]
    pub fn try_combine<F>(mut self, combine: F) -> Self
    where
        F: FnMut(T, T) -> Result<T, E> + 'a,
    {
        self.combine = Some(Box::new(combine));
        self
    }

    /// Supplies the optional `cancel` callback.
    #[must_use]
    pub fn cancel<F>(self, mut cancel: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        self.try_cancel(move |value| Ok(cancel(value)))
    }

    /// Supplies a fallible `cancel` callback.
    #[must_use]
    pub fn try_cancel<F>(mut self, cancel: F) -> Self
    where
        F: FnMut(&T) -> Result<bool, E> + 'a,
    {
        self.cancel = Some(Box::new(cancel));
        self
    }

    /// Supplies the optional `ignore` callback.
    #[must_use]
    pub fn ignore<F>(self, mut ignore: F) -> Self
    where
        F: FnMut(&T, &T) -> bool + 'a,
    {
        self.try_ignore(move |anchor, candidate| Ok(ignore(anchor, candidate)))
    }

    /// Supplies a fallible `ignore` callback.
    #[must_use]
    pub fn try_ignore<F>(mut self, ignore: F) -> Self
    where
        F: FnMut(&T, &T) -> Result<bool, E> + 'a,
    {
        self.ignore = Some(Box::new(ignore));
        self
    }

    /// Attaches an observer that receives a snapshot of every cycle.
    ///
    /// Takes precedence over [`debug`](ReducerBuilder::debug).
    #[must_use]
    pub fn observer(mut self, observer: impl Observer<T> + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Logs every cycle through [`LogObserver`] when `enabled`.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self
    where
        T: fmt::Debug,
    {
        self.logger = if enabled {
            Some(Box::new(LogObserver))
        } else {
            None
        };
        self
    }

    /// Returns `true` if debug logging was requested.
    #[inline]
    pub const fn is_debug(&self) -> bool {
        self.logger.is_some()
    }

    /// Assembles the reducer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingInput`],
    /// [`ConfigurationError::MissingCompare`], or
    /// [`ConfigurationError::MissingCombine`], checked in that order.
    pub fn build(self) -> Result<Reducer<'a, T, Callbacks<'a, T, E>>, ConfigurationError> {
        let input = self.input.ok_or(ConfigurationError::MissingInput)?;
        let compare = self.compare.ok_or(ConfigurationError::MissingCompare)?;
        let combine = self.combine.ok_or(ConfigurationError::MissingCombine)?;

        let callbacks = Callbacks::new(compare, combine, self.cancel, self.ignore);
        let reducer = Reducer::new(input, callbacks);
        Ok(match self.observer.or(self.logger) {
            Some(observer) => reducer.with_observer(observer),
            None => reducer,
        })
    }

    /// Builds and runs the reducer.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Configuration`] if the builder is incomplete
    /// and [`ReduceError::Callback`] if a callback fails.
    pub fn run(self) -> Result<Vec<T>, ReduceError<E>> {
        self.build()?.run().map_err(ReduceError::Callback)
    }
}

impl<'a, T: 'a, E: 'a> Default for ReducerBuilder<'a, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for ReducerBuilder<'_, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ReducerBuilder")
            .field("input", &self.input.as_ref().map(Vec::len))
            .field("compare", &self.compare.is_some())
            .field("combine", &self.combine.is_some())
            .field("cancel", &self.cancel.is_some())
            .field("ignore", &self.ignore.is_some())
            .field("observer", &self.observer.is_some())
            .field("debug", &self.logger.is_some())
            .finish()
    }
}
