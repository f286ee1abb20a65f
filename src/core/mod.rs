//! Core recipe logic (types, catalog, scaling, selection engine, view models).

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod scaling;
pub mod types;
pub mod view;
