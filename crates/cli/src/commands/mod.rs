//! CLI command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_module;
pub use validate::run_validate;

use anyhow::{Context, Result};
use components::{camera_model, sensor_model};
use config_loader::{CameraGateConfig, ModuleConfig, SensorGateConfig};
use schedule::WindowSchedule;
use serde::Serialize;

/// Per-component summary shared by `validate` and `info`.
#[derive(Serialize)]
pub(crate) struct ComponentSummary {
    pub name: String,
    pub model: String,
    pub schedule_mode: String,
    pub window: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_camera: Option<String>,
}

/// Validate every component's attributes against its model and summarize.
pub(crate) fn summarize_components(module: &ModuleConfig) -> Result<Vec<ComponentSummary>> {
    let mut summaries = Vec::with_capacity(module.components.len());

    for component in &module.components {
        let context = || format!("component '{}'", component.name);

        let summary = if component.model == camera_model() {
            let config = CameraGateConfig::parse(&component.attributes).with_context(context)?;
            ComponentSummary {
                name: component.name.clone(),
                model: component.model.to_string(),
                schedule_mode: config.schedule.mode().to_string(),
                window: describe_schedule(&config.schedule),
                inner_camera: Some(config.camera),
            }
        } else if component.model == sensor_model() {
            let config = SensorGateConfig::parse(&component.attributes).with_context(context)?;
            ComponentSummary {
                name: component.name.clone(),
                model: component.model.to_string(),
                schedule_mode: config.schedule.mode().to_string(),
                window: describe_schedule(&config.schedule),
                inner_camera: None,
            }
        } else {
            anyhow::bail!(
                "component '{}': unknown model '{}'",
                component.name,
                component.model
            );
        };

        summaries.push(summary);
    }

    Ok(summaries)
}

/// Human-readable window description.
fn describe_schedule(schedule: &WindowSchedule) -> String {
    match schedule {
        WindowSchedule::Daily(window) => format!(
            "{}-{} every day{}",
            window.start.format("%H:%M"),
            window.end.format("%H:%M"),
            if window.spans_midnight() {
                " (spans midnight)"
            } else {
                ""
            }
        ),
        WindowSchedule::Weekly(_) => "per-weekday windows".to_string(),
        WindowSchedule::Ranges(ranges) => format!("{} absolute range(s)", ranges.len()),
    }
}
