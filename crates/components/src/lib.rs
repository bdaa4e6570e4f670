//! # Components
//!
//! The two gating components this module registers with the host runtime:
//!
//! - [`TimeSelectCamera`] (`timegate:camera:time-select-capture`): wraps an
//!   inner camera and answers scheduled-capture calls with the
//!   nothing-to-capture sentinel outside the configured window
//! - [`TimeSyncSensor`] (`timegate:sensor:time-select-sync`): reports
//!   whether the current instant is inside the configured window, for use
//!   as a sync-enable signal
//!
//! [`MockCamera`] is a synthetic inner camera for tests and standalone runs.

mod camera;
mod mock;
mod sensor;

pub use camera::{camera_model, TimeSelectCamera};
pub use mock::{MockCamera, MockCameraConfig};
pub use sensor::{sensor_model, TimeSyncSensor};

use contracts::{ComponentRegistry, ContractError, Resource};
use std::sync::Arc;

/// Register both component models with the registry.
///
/// Called once at module startup, before any construction.
pub fn register_models(registry: &mut ComponentRegistry) -> Result<(), ContractError> {
    registry.register(
        camera_model(),
        Box::new(|config, deps| {
            let camera = TimeSelectCamera::new(
                config.name.as_str().into(),
                &config.attributes,
                deps,
            )?;
            Ok(Resource::Camera(Arc::new(camera)))
        }),
    )?;

    registry.register(
        sensor_model(),
        Box::new(|config, _deps| {
            let sensor = TimeSyncSensor::new(config.name.as_str().into(), &config.attributes)?;
            Ok(Resource::Sensor(Arc::new(sensor)))
        }),
    )?;

    Ok(())
}
