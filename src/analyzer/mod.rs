//! Analysis engine for deriving the next version from commits

pub mod incrementer;

pub use incrementer::{IncrementOutcome, VersionIncrementer};
