//! TimeSyncSensor - window-state sensor
//!
//! Reports whether the current instant is inside the configured window.
//! The data-capture service reads the `should_sync` key to decide whether
//! to upload this cycle; the remaining keys are diagnostics.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{Datelike, Local};
use config_loader::SensorGateConfig;
use contracts::{CallContext, ContractError, Dependencies, Model, Readings, ResourceName, Sensor};
use schedule::WindowSchedule;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};

/// Model identifier for the sync-window sensor.
pub fn sensor_model() -> Model {
    Model::new("timegate", "sensor", "time-select-sync")
}

/// Window-state sensor component.
pub struct TimeSyncSensor {
    name: ResourceName,
    schedule: RwLock<Arc<WindowSchedule>>,
    shutdown: watch::Sender<bool>,
}

impl TimeSyncSensor {
    /// Construct from raw attributes.
    pub fn new(name: ResourceName, attributes: &Value) -> Result<Self, ContractError> {
        let config = SensorGateConfig::parse(attributes)?;
        let (shutdown, _) = watch::channel(false);

        info!(
            name = %name,
            mode = config.schedule.mode(),
            "time-sync sensor created"
        );

        Ok(Self {
            name,
            schedule: RwLock::new(Arc::new(config.schedule)),
            shutdown,
        })
    }

    /// Observe the shutdown signal (flips to true on close).
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    fn snapshot(&self) -> Arc<WindowSchedule> {
        self.schedule.read().unwrap().clone()
    }
}

#[async_trait]
impl Sensor for TimeSyncSensor {
    fn name(&self) -> &ResourceName {
        &self.name
    }

    async fn readings(&self, _ctx: &CallContext) -> Result<Readings, ContractError> {
        let schedule = self.snapshot();
        let now = Local::now();
        let should_sync = schedule.in_window(now);

        debug!(name = %self.name, should_sync, "sync window evaluated");

        let mut readings = Readings::new();
        readings.insert("should_sync".to_string(), Value::Bool(should_sync));
        readings.insert(
            "schedule_mode".to_string(),
            Value::String(schedule.mode().to_string()),
        );
        readings.insert(
            "current_time".to_string(),
            Value::String(now.to_rfc3339()),
        );

        if let Some(window) = schedule.day_window_on(now.weekday()) {
            readings.insert(
                "window_start".to_string(),
                Value::String(window.start.format("%H:%M:%S").to_string()),
            );
            readings.insert(
                "window_end".to_string(),
                Value::String(window.end.format("%H:%M:%S").to_string()),
            );
            readings.insert(
                "overnight_time_range".to_string(),
                Value::Bool(window.spans_midnight()),
            );
        } else if let WindowSchedule::Ranges(ranges) = schedule.as_ref() {
            readings.insert("range_count".to_string(), Value::from(ranges.len()));
        }

        Ok(readings)
    }

    async fn do_command(&self, _command: Readings) -> Result<Readings, ContractError> {
        Err(ContractError::unimplemented("do_command"))
    }

    /// Apply a new configuration.
    ///
    /// Invalid attributes leave the component untouched. The sensor takes
    /// no dependencies.
    async fn reconfigure(
        &self,
        attributes: &Value,
        _deps: &Dependencies,
    ) -> Result<(), ContractError> {
        let config = SensorGateConfig::parse(attributes)?;
        info!(
            name = %self.name,
            mode = config.schedule.mode(),
            "time-sync sensor reconfigured"
        );
        *self.schedule.write().unwrap() = Arc::new(config.schedule);
        Ok(())
    }

    async fn close(&self) -> Result<(), ContractError> {
        info!(name = %self.name, "closing time-sync sensor");
        let _ = self.shutdown.send(true);
        Ok(())
    }
}
