//! TOS Builder - Table of Specifications generation
//!
//! This crate analyzes a course syllabus and an exam with a generative model,
//! producing a Table of Specifications: exam items grouped by topic, weighted
//! by instructional hours and distributed across Bloom's Taxonomy levels. The
//! table can be exported as JSON or as a spreadsheet.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
