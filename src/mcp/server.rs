//! TDEE MCP Server Implementation
//!
//! Implements the MCP server with the calculator tools. The service holds
//! the current derived result set behind a mutex; each recomputation
//! replaces the whole record atomically.

use std::sync::{Arc, Mutex};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::engine;
use crate::models::{CalorieResults, MacroPreset, ValidationError};
use crate::tools::calculate::{
    self, FormDefaults, FormSubmission, PresetResponse, ResetResponse, ResultsView,
};
use crate::tools::chart;
use crate::tools::status::StatusTracker;

/// Per-service session state: the selected preset and the current results
///
/// Derived state is recomputed from scratch on every submission; nothing
/// else persists.
#[derive(Default)]
struct Session {
    preset: MacroPreset,
    results: Option<CalorieResults>,
}

/// TDEE MCP Service
#[derive(Clone)]
pub struct TdeeService {
    session: Arc<Mutex<Session>>,
    status_tracker: Arc<Mutex<StatusTracker>>,
    tool_router: ToolRouter<TdeeService>,
}

impl TdeeService {
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            tool_router: Self::tool_router(),
        }
    }

    /// Validate a submission, run the engine, and replace the session results
    fn run_calculation(&self, p: &CalculateParams) -> Result<ResultsView, ValidationError> {
        let mut session = self.session.lock().unwrap();

        // An explicit preset on the submission overrides the current tab,
        // but only commits once the whole submission is accepted
        let preset = match &p.macro_preset {
            Some(preset) => MacroPreset::parse(preset)?,
            None => session.preset,
        };

        let form = FormSubmission {
            unit_system: &p.unit_system,
            age: p.age,
            gender: &p.gender,
            weight: p.weight,
            height: p.height,
            activity_level: &p.activity_level,
        };
        let results = calculate::submit(&form, preset)?;
        tracing::info!(bmr = results.bmr, tdee = results.tdee, "calculation complete");

        let view = calculate::build_results_view(&results);
        session.preset = preset;
        session.results = Some(results);

        self.status_tracker.lock().unwrap().record_calculation();
        Ok(view)
    }

    /// Switch the macro preset, recomputing macros from the existing TDEE
    ///
    /// bmr, tdee, and targets are left untouched. Without results yet, the
    /// preset is stored and applied on the next calculation.
    fn apply_preset(&self, preset: MacroPreset) -> PresetResponse {
        let mut session = self.session.lock().unwrap();
        session.preset = preset;

        match session.results.as_mut() {
            Some(results) => {
                results.macro_preset = preset;
                results.macros = engine::macro_split(results.tdee, preset);
                PresetResponse {
                    success: true,
                    macro_preset: preset,
                    macro_preset_label: preset.label(),
                    macros: Some(results.macros),
                    message: format!("Macros recomputed for the {} preset", preset.label()),
                }
            }
            None => PresetResponse {
                success: true,
                macro_preset: preset,
                macro_preset_label: preset.label(),
                macros: None,
                message: format!(
                    "Preset set to {}; it will apply on the next calculation",
                    preset.label()
                ),
            },
        }
    }

    /// Restore form defaults and clear all derived state
    fn reset_session(&self) -> ResetResponse {
        let mut session = self.session.lock().unwrap();
        *session = Session::default();

        ResetResponse {
            success: true,
            message: "Form restored to defaults and results cleared".to_string(),
            defaults: FormDefaults::default(),
        }
    }

    /// The current results view, if a calculation has been performed
    fn current_results(&self) -> Option<ResultsView> {
        let session = self.session.lock().unwrap();
        session.results.as_ref().map(calculate::build_results_view)
    }
}

impl Default for TdeeService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateParams {
    /// Unit system: metric or imperial (default metric)
    #[serde(default = "default_unit_system")]
    pub unit_system: String,
    /// Age in years (15-80)
    pub age: f64,
    /// Gender: male or female (default male)
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Body weight (kg if metric, lb if imperial)
    pub weight: f64,
    /// Height (cm if metric, inches if imperial)
    pub height: f64,
    /// Activity level: 1.2, 1.375, 1.55, 1.725, or 1.9 (default 1.2)
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
    /// Macro ratio preset: moderate, low, or high (optional; keeps the current selection)
    pub macro_preset: Option<String>,
}

fn default_unit_system() -> String {
    "metric".to_string()
}

fn default_gender() -> String {
    "male".to_string()
}

fn default_activity_level() -> String {
    "1.2".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetMacroPresetParams {
    /// Macro ratio preset: moderate, low, or high
    pub preset: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateChartParams {
    /// Path for the output PNG file
    pub file_path: String,
    /// Chart width in pixels (default 900)
    pub width: Option<u32>,
    /// Chart height in pixels (default 500)
    pub height: Option<u32>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl TdeeService {
    #[tool(description = "Calculate BMR, TDEE, calorie targets, and macros from body metrics. Uses the Mifflin-St Jeor equation. Age must be 15-80; weight and height must be positive, in kg/cm (metric) or lb/inches (imperial).")]
    fn calculate(&self, Parameters(p): Parameters<CalculateParams>) -> Result<CallToolResult, McpError> {
        let view = self.run_calculation(&p)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = serde_json::to_string_pretty(&view).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the current calculation results (BMR, TDEE, targets, activity breakdown, macros), or null if nothing has been calculated yet")]
    fn get_results(&self) -> Result<CallToolResult, McpError> {
        let json = match self.current_results() {
            Some(view) => serde_json::to_string_pretty(&view),
            None => Ok(r#"{"results": null, "message": "No calculation performed yet"}"#.to_string()),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Switch the macronutrient ratio preset (moderate, low, or high carb). Recomputes macros from the existing TDEE without recalculating BMR, TDEE, or targets.")]
    fn set_macro_preset(&self, Parameters(p): Parameters<SetMacroPresetParams>) -> Result<CallToolResult, McpError> {
        let preset = MacroPreset::parse(&p.preset)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let response = self.apply_preset(preset);
        let json = serde_json::to_string_pretty(&response).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Reset the calculator: restore form defaults (metric, male, activity 1.2, moderate preset) and clear all results")]
    fn reset(&self) -> Result<CallToolResult, McpError> {
        let response = self.reset_session();
        let json = serde_json::to_string_pretty(&response).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Render the five calorie targets as a PNG bar chart and write it to a file. Requires a prior calculate call.")]
    fn generate_chart(&self, Parameters(p): Parameters<GenerateChartParams>) -> Result<CallToolResult, McpError> {
        let targets = {
            let session = self.session.lock().unwrap();
            session.results.as_ref().map(|r| r.targets)
        };
        let targets = targets.ok_or_else(|| {
            McpError::invalid_params("No calculation to chart - call calculate first", None)
        })?;

        let width = p.width.unwrap_or(chart::DEFAULT_WIDTH);
        let height = p.height.unwrap_or(chart::DEFAULT_HEIGHT);
        let response = chart::write_targets_chart(&targets, &p.file_path, width, height)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&response).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the current status of the TDEE service including build info, uptime, and process information")]
    fn tdee_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().unwrap();
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TdeeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tdee".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("TDEE Calorie Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "TDEE Calorie Calculator - BMR, daily calorie targets, and macronutrient splits \
                 from body metrics (Mifflin-St Jeor). \
                 calculate: submit age/gender/weight/height/activity (metric or imperial). \
                 get_results: re-read the current results. \
                 set_macro_preset: switch moderate/low/high carb ratios without resubmitting. \
                 reset: restore defaults and clear results. \
                 generate_chart: write the calorie target bar chart as a PNG. \
                 tdee_status: service build and process info."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculate_params() -> CalculateParams {
        CalculateParams {
            unit_system: "metric".to_string(),
            age: 25.0,
            gender: "male".to_string(),
            weight: 70.0,
            height: 175.0,
            activity_level: "1.2".to_string(),
            macro_preset: None,
        }
    }

    #[test]
    fn test_calculate_stores_results() {
        let service = TdeeService::new();
        assert!(service.current_results().is_none());

        let view = service.run_calculation(&calculate_params()).unwrap();
        assert_eq!(view.bmr, 1674);
        assert_eq!(view.tdee, 2009);

        let stored = service.current_results().unwrap();
        assert_eq!(stored.tdee, 2009);
    }

    #[test]
    fn test_invalid_submission_leaves_state_untouched() {
        let service = TdeeService::new();
        service.run_calculation(&calculate_params()).unwrap();

        let mut bad = calculate_params();
        bad.weight = -1.0;
        bad.macro_preset = Some("high".to_string());
        assert!(service.run_calculation(&bad).is_err());

        // Previous results survive a blocked submission
        assert_eq!(service.current_results().unwrap().tdee, 2009);

        // The blocked submission's preset override must not stick either
        let view = service.run_calculation(&calculate_params()).unwrap();
        assert_eq!(view.macro_preset, MacroPreset::Moderate);
    }

    #[test]
    fn test_preset_switch_recomputes_macros_only() {
        let service = TdeeService::new();
        let before = service.run_calculation(&calculate_params()).unwrap();

        let response = service.apply_preset(MacroPreset::Low);
        assert!(response.success);
        let macros = response.macros.unwrap();
        assert_eq!(macros.protein, 201); // round(2009 * 0.40 / 4)

        let after = service.current_results().unwrap();
        assert_eq!(after.bmr, before.bmr);
        assert_eq!(after.tdee, before.tdee);
        assert_eq!(after.targets, before.targets);
        assert_eq!(after.macro_preset, MacroPreset::Low);
        assert_ne!(after.macros, before.macros);
    }

    #[test]
    fn test_preset_without_results_applies_later() {
        let service = TdeeService::new();
        let response = service.apply_preset(MacroPreset::High);
        assert!(response.macros.is_none());

        let view = service.run_calculation(&calculate_params()).unwrap();
        assert_eq!(view.macro_preset, MacroPreset::High);
    }

    #[test]
    fn test_reset_clears_results_and_defaults() {
        let service = TdeeService::new();
        service.run_calculation(&calculate_params()).unwrap();
        service.apply_preset(MacroPreset::High);

        let response = service.reset_session();
        assert!(response.success);
        assert_eq!(response.defaults.activity_level, "1.2");
        assert_eq!(response.defaults.macro_preset, MacroPreset::Moderate);
        assert!(service.current_results().is_none());

        // Preset is back to moderate for the next calculation
        let view = service.run_calculation(&calculate_params()).unwrap();
        assert_eq!(view.macro_preset, MacroPreset::Moderate);
    }
}
