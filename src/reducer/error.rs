//! Error types for the reducer.
//!
//! Two kinds of failure exist:
//!
//! - [`ConfigurationError`]: the reducer was assembled without an input
//!   sequence or without one of the required callbacks. Raised by
//!   [`ReducerBuilder::build`](super::ReducerBuilder::build) before any
//!   element is examined.
//! - A callback error: a fallible `compare`, `combine`, `cancel`, or `ignore`
//!   callback failed. The failure is returned from `run` unchanged and the
//!   partially reduced state is dropped.
//!
//! [`ReduceError`] unifies both for the builder's one-shot
//! [`run`](super::ReducerBuilder::run).

/// Represents a reducer that cannot be built because a required part is missing.
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::{ConfigurationError, ReducerBuilder};
///
/// let result = ReducerBuilder::<i32>::new()
///     .input(vec![1, 2])
///     .combine(|left, right| left + right)
///     .build();
///
/// assert_eq!(result.err(), Some(ConfigurationError::MissingCompare));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationError {
    /// No input sequence was supplied.
    MissingInput,
    /// The required `compare` callback was not supplied.
    MissingCompare,
    /// The required `combine` callback was not supplied.
    MissingCombine,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput => write!(formatter, "an input sequence must be present"),
            Self::MissingCompare => write!(formatter, "the compare callback must be present"),
            Self::MissingCombine => write!(formatter, "the combine callback must be present"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Represents any failure of a builder-driven reduction.
///
/// # Type Parameters
///
/// * `E` - The error type returned by the fallible callbacks
///
/// # Examples
///
/// ```rust
/// use element_combiner::reducer::{ReduceError, ReducerBuilder};
///
/// let result = ReducerBuilder::<i32, String>::new()
///     .input(vec![1, 2])
///     .compare(|_, _| true)
///     .try_combine(|_, _| Err("overflow".to_string()))
///     .run();
///
/// assert_eq!(result, Err(ReduceError::Callback("overflow".to_string())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError<E> {
    /// The reducer could not be built.
    Configuration(ConfigurationError),
    /// A user-supplied callback failed.
    Callback(E),
}

impl<E> ReduceError<E> {
    /// Returns `true` if this is a configuration error.
    #[inline]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns the callback error, if this is one.
    #[inline]
    pub fn into_callback(self) -> Option<E> {
        match self {
            Self::Configuration(_) => None,
            Self::Callback(error) => Some(error),
        }
    }
}

impl<E> From<ConfigurationError> for ReduceError<E> {
    fn from(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for ReduceError<E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(error) => write!(formatter, "invalid configuration: {error}"),
            Self::Callback(error) => write!(formatter, "callback failed: {error}"),
        }
    }
}

impl<E> std::error::Error for ReduceError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(error) => Some(error),
            Self::Callback(error) => Some(error),
        }
    }
}
