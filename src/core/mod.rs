#![warn(missing_docs)]

//! Matcher, fault primitives and the types they share.

pub mod faults;
pub mod matcher;
pub mod types;
