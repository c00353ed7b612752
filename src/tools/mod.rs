//! Tools module
//!
//! MCP tool implementations for the TDEE calculator.

pub mod calculate;
pub mod chart;
pub mod status;
