//! Utility functions shared across the codebase

pub mod math;
pub mod text;

// Re-export commonly used utilities
pub use math::{coefficient_of_variation, mean, round_clamp};
pub use text::{count_char, excerpt};
