//! Domain layer containing the table model and pure services.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, validation errors)
//! - `tos` - Table of Specifications model, prompt, schema and normalization
//! - `export` - JSON and spreadsheet layouts of a finished table

pub mod export;
pub mod foundation;
pub mod tos;
