//! `run` command implementation.
//!
//! Builds the configured components against mock inner cameras (this binary
//! runs without the host runtime) and drives a scheduled-capture loop until
//! ctrl-c or the configured deadline.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};

use components::{camera_model, register_models, MockCamera};
use config_loader::{CameraGateConfig, ConfigLoader};
use contracts::{CallContext, Camera, ComponentRegistry, Dependencies, Resource, Sensor};

use crate::cli::RunArgs;

/// Execute the `run` command
pub async fn run_module(args: &RunArgs) -> Result<()> {
    let module = ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let mut registry = ComponentRegistry::new();
    register_models(&mut registry)?;

    // Mock an inner camera for every declared dependency; outside the host
    // runtime there is nothing else to resolve against.
    let mut deps = Dependencies::new();
    for component in &module.components {
        if component.model == camera_model() {
            let config = CameraGateConfig::parse(&component.attributes)
                .with_context(|| format!("component '{}'", component.name))?;
            if !deps.contains(&config.camera) {
                info!(name = %config.camera, "providing mock inner camera");
                deps.insert(
                    config.camera.as_str(),
                    Resource::Camera(Arc::new(MockCamera::with_defaults(
                        config.camera.as_str().into(),
                    ))),
                );
            }
        }
    }

    let mut cameras: Vec<Arc<dyn Camera>> = Vec::new();
    let mut sensors: Vec<Arc<dyn Sensor>> = Vec::new();

    for component in &module.components {
        match registry
            .construct(component, &deps)
            .with_context(|| format!("component '{}'", component.name))?
        {
            Resource::Camera(camera) => cameras.push(camera),
            Resource::Sensor(sensor) => sensors.push(sensor),
        }
    }

    info!(
        cameras = cameras.len(),
        sensors = sensors.len(),
        "components constructed"
    );

    if args.dry_run {
        info!("dry run requested, exiting");
        return Ok(());
    }

    // No exporter endpoint; the handle makes the gate counters visible in
    // the shutdown summary.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval.max(1)));

    let deadline = async {
        if args.max_duration > 0 {
            tokio::time::sleep(Duration::from_secs(args.max_duration)).await;
        } else {
            std::future::pending::<()>().await;
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                capture_cycle(&cameras, &sensors).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("ctrl-c received, shutting down");
                break;
            }
            _ = &mut deadline => {
                info!(max_duration = args.max_duration, "deadline reached, shutting down");
                break;
            }
        }
    }

    shutdown(&cameras, &sensors).await;

    let snapshot = metrics_handle.render();
    if !snapshot.is_empty() {
        info!("gate counters at shutdown:\n{}", snapshot.trim_end());
    }
    Ok(())
}

/// One scheduled-capture cycle across all components.
async fn capture_cycle(cameras: &[Arc<dyn Camera>], sensors: &[Arc<dyn Sensor>]) {
    let ctx = CallContext::scheduled_capture();

    for camera in cameras {
        match camera.capture(&ctx).await {
            Ok(frame) => info!(
                camera = %camera.name(),
                width = frame.width,
                height = frame.height,
                "frame captured"
            ),
            Err(e) if e.is_no_capture_to_store() => {
                info!(camera = %camera.name(), "outside window, cycle skipped");
            }
            Err(e) => warn!(camera = %camera.name(), error = %e, "capture failed"),
        }
    }

    for sensor in sensors {
        match sensor.readings(&ctx).await {
            Ok(readings) => info!(
                sensor = %sensor.name(),
                should_sync = ?readings.get("should_sync"),
                "sync window reading"
            ),
            Err(e) => warn!(sensor = %sensor.name(), error = %e, "readings failed"),
        }
    }
}

/// Close every component, logging failures instead of aborting.
async fn shutdown(cameras: &[Arc<dyn Camera>], sensors: &[Arc<dyn Sensor>]) {
    for camera in cameras {
        if let Err(e) = camera.close().await {
            warn!(camera = %camera.name(), error = %e, "failed to close camera");
        }
    }
    for sensor in sensors {
        if let Err(e) = sensor.close().await {
            warn!(sensor = %sensor.name(), error = %e, "failed to close sensor");
        }
    }
    info!("all components closed");
}
