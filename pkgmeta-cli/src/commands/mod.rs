//! Command handlers, one per binary

pub mod debcheck;
pub mod report;
