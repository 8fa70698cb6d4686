/// State management module
///
/// This module handles all navigation state:
/// - Calendar dates and day arithmetic (date.rs)
/// - Shared data structures (data.rs)
/// - The date navigation state machine (navigator.rs)

pub mod data;
pub mod date;
pub mod navigator;
