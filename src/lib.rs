//! # element-combiner
//!
//! A single-pass reducer that folds runs of adjacent, mutually combinable
//! elements of a sequence into single values.
//!
//! ## Overview
//!
//! The caller supplies four rules:
//!
//! - **compare** (required): may two neighbours be merged?
//! - **combine** (required): the merged value of such a pair
//! - **cancel** (optional): does a merged value annihilate both operands?
//! - **ignore** (optional): should a candidate be stepped over, keeping its
//!   position in the output without taking part in any merge?
//!
//! Merged values are compared again with both neighbours, and a cancelled
//! pair re-opens the element committed before it, so merges chain through
//! the whole sequence in one pass.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` for the trace types
//!
//! ## Example
//!
//! ```rust
//! use element_combiner::prelude::*;
//!
//! let output = ReducerBuilder::<i32>::new()
//!     .input(vec![1, 1, 3])
//!     .compare(|left, right| left == right)
//!     .combine(|left, right| left + right)
//!     .run();
//!
//! assert_eq!(output, Ok(vec![2, 3]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use element_combiner::prelude::*;
/// ```
pub mod prelude {
    pub use crate::reducer::{
        Action, CombineRules, ConfigurationError, Observer, ReduceError, Reducer, ReducerBuilder,
        TraceRecorder, combine_adjacent,
    };
}

pub mod reducer;
