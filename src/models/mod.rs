//! Trainer boundary.
//!
//! The sequence model itself (e.g. a diagonal-covariance Gaussian HMM fit by
//! Baum-Welch) lives outside this crate. Strategies only see the two traits
//! defined here, so any trainer can be plugged in.

pub mod trainer;

pub use trainer::*;
