//! Utility module

pub mod wait;
