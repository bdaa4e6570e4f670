//! Component attribute parsing and validation
//!
//! Raw JSON attributes carry exactly one of three schedule modes. All
//! strings are parsed into a [`WindowSchedule`] here, once, so the
//! components never touch raw time strings.

use std::collections::BTreeMap;

use contracts::ContractError;
use schedule::WindowSchedule;
use serde::{Deserialize, Serialize};

/// Raw attributes as the host runtime delivers them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateAttributes {
    /// Inner camera dependency name (camera component only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,

    /// Daily mode: window start, HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hours: Option<String>,

    /// Daily mode: window end, HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_hours: Option<String>,

    /// Weekly mode: 3-letter lowercase weekday -> HH:MM:SS span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<BTreeMap<String, DaySpan>>,

    /// Explicit-range mode: RFC3339 start/end pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<TimestampRange>>,
}

/// One weekly-mode entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySpan {
    pub start: String,
    pub end: String,
}

/// One explicit-range entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampRange {
    pub start: String,
    pub end: String,
}

impl GateAttributes {
    /// Deserialize from the opaque attribute value in a component config.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ContractError> {
        serde_json::from_value(value.clone()).map_err(|e| ContractError::ConfigParse {
            message: format!("attributes parse error: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Build the validated schedule from whichever mode is populated.
    ///
    /// # Errors
    /// - No mode configured, or more than one
    /// - `start_hours` without `end_hours` (or vice versa)
    /// - Any parse/validation failure inside the chosen mode
    pub fn build_schedule(&self) -> Result<WindowSchedule, ContractError> {
        let daily = self.start_hours.is_some() || self.end_hours.is_some();

        match (daily, &self.weekly_schedule, &self.schedule) {
            (true, None, None) => {
                let (Some(start), Some(end)) = (&self.start_hours, &self.end_hours) else {
                    return Err(ContractError::config_validation(
                        "start_hours/end_hours",
                        "start_hours and end_hours are required together",
                    ));
                };
                WindowSchedule::daily(start, end)
            }
            (false, Some(entries), None) => WindowSchedule::weekly(
                entries
                    .iter()
                    .map(|(day, span)| (day.as_str(), span.start.as_str(), span.end.as_str())),
            ),
            (false, None, Some(pairs)) => WindowSchedule::ranges(
                pairs
                    .iter()
                    .map(|range| (range.start.as_str(), range.end.as_str())),
            ),
            (false, None, None) => Err(ContractError::config_validation(
                "attributes",
                "one of start_hours/end_hours, weekly_schedule, or schedule must be configured",
            )),
            _ => Err(ContractError::config_validation(
                "attributes",
                "start_hours/end_hours, weekly_schedule, and schedule are mutually exclusive",
            )),
        }
    }
}

/// Validated configuration for the gated camera component.
#[derive(Debug, Clone)]
pub struct CameraGateConfig {
    /// Inner camera dependency name
    pub camera: String,

    /// Validated capture window
    pub schedule: WindowSchedule,
}

impl CameraGateConfig {
    /// Parse and validate camera attributes.
    pub fn parse(value: &serde_json::Value) -> Result<Self, ContractError> {
        let raw = GateAttributes::from_value(value)?;
        let camera = raw
            .camera
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ContractError::config_validation("camera", "field is required"))?
            .to_string();
        let schedule = raw.build_schedule()?;
        Ok(Self { camera, schedule })
    }
}

/// Validated configuration for the sync-window sensor component.
#[derive(Debug, Clone)]
pub struct SensorGateConfig {
    /// Validated sync window
    pub schedule: WindowSchedule,
}

impl SensorGateConfig {
    /// Parse and validate sensor attributes.
    pub fn parse(value: &serde_json::Value) -> Result<Self, ContractError> {
        let raw = GateAttributes::from_value(value)?;
        if raw.camera.is_some() {
            return Err(ContractError::config_validation(
                "camera",
                "not supported by the sensor component",
            ));
        }
        let schedule = raw.build_schedule()?;
        Ok(Self { schedule })
    }
}
