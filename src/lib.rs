//! Cloud resource inventory snapshot service.
//!
//! One request fans out to per-region compute and database inventories plus
//! an account-scoped storage inventory, all queried concurrently, and fans
//! the partial results back into a single [`models::Report`].

pub mod api;
pub mod cli;
pub mod collector;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod stats;
