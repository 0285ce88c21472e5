//! Command handlers

pub mod analyze;
