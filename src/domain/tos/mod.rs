//! Table of Specifications - data model and pure analysis services.
//!
//! # Components
//!
//! - `result` / `blooms` - The typed table (`TOSResult`, `TOSRow`, `TOSTotals`)
//! - `schema` - Structured output contract handed to the generation service
//! - `prompt` - Instruction prompt embedding the syllabus and exam
//! - `normalizer` - Raw response text → `TOSResult`, or a typed error
//! - `consistency` - Non-fatal cross-check of rows against totals
//! - `sample` - Built-in BIO-101 inputs and their analysis
//!
//! Nothing in here performs I/O; the generation service sits behind the
//! `GenerativeModel` port.

mod blooms;
mod consistency;
mod errors;
mod item_placement;
mod normalizer;
mod prompt;
mod result;
pub mod sample;
mod schema;

pub use blooms::{BloomLevel, BloomsDistribution};
pub use consistency::{
    ConsistencyChecker, ConsistencyFinding, ConsistencyReport, TotalsColumn,
    DEFAULT_PERCENTAGE_TOLERANCE, MISSING_QUESTIONS_SHOWN,
};
pub use errors::AnalysisError;
pub use item_placement::{format_item_placement, parse_item_placement};
pub use normalizer::normalize_response;
pub use prompt::{build_analysis_prompt, ANALYSIS_STEPS, DOCUMENT_DELIMITER};
pub use result::{DerivedTotals, TOSResult, TOSRow, TOSTotals};
pub use schema::{response_schema, SchemaNode, SchemaType};
