//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod gather_responses;
pub mod run_fusion;
pub(crate) mod shared;
pub mod synthesize_verdict;

#[cfg(test)]
pub(crate) mod test_support;
