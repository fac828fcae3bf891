//! Per-slot candidate evaluation and selection.
//!
//! Two stages run for every slot and role:
//!
//! 1. [`ConstraintEvaluator`] narrows the role pool to the persons who may
//!    fill the slot right now.
//! 2. [`CandidateSelector`] picks one of them, preferring those who asked
//!    for the slot.
//!
//! # Usage
//!
//! ```
//! use u_rota::dispatching::{CandidateSelector, FallbackPolicy};
//!
//! let selector = CandidateSelector::new().with_fallback(FallbackPolicy::Random);
//! assert_eq!(selector.fallback(), FallbackPolicy::Random);
//! ```

mod constraints;
mod selector;

pub use constraints::{seed_static_exclusions, ConstraintEvaluator};
pub use selector::{CandidateSelector, FallbackPolicy};
