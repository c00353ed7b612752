//! TDEE Calorie Calculator Library
//!
//! BMR/TDEE calculation (Mifflin-St Jeor), calorie targets, and
//! macronutrient splits, served over MCP.

pub mod build_info;
pub mod engine;
pub mod mcp;
pub mod models;
pub mod tools;
