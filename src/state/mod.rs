/// State management module
///
/// This module handles all application state, including:
/// - Database connection and catalog queries (catalog.rs)
/// - Shared data structures (data.rs)
/// - The canonical seed dataset (seed.rs)
/// - Display-order policy (ordering.rs)

pub mod catalog;
pub mod data;
pub mod ordering;
pub mod seed;
