//! Local-search keyword research.
//!
//! Expands an industry's base keywords across a set of cities, looks up
//! search volume, CPC and competition for every phrase from a keyword-data
//! provider, scores each phrase as a High/Medium/Low opportunity and stores
//! the run. See [`research::ResearchPipeline`] for the core flow.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod provider;
pub mod research;
pub mod services;
