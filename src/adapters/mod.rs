//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Generative model providers (Gemini, mock)
//! - `export` - Spreadsheet writer and report storage

pub mod ai;
pub mod export;
