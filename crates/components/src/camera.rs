//! TimeSelectCamera - window-gated camera wrapper
//!
//! Wraps an inner camera resolved from the dependency set. Scheduled-capture
//! calls (marked `fromDataManagement`) outside the configured window get the
//! `NoCaptureToStore` sentinel; direct calls always delegate.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Local;
use config_loader::CameraGateConfig;
use contracts::{
    CallContext, Camera, CameraProperties, ContractError, Dependencies, Frame, Model, PointCloud,
    Readings, ResourceName,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Model identifier for the gated camera.
pub fn camera_model() -> Model {
    Model::new("timegate", "camera", "time-select-capture")
}

/// Snapshot of the active configuration and the resolved inner camera.
///
/// Replaced wholesale on reconfiguration; in-flight calls keep the snapshot
/// they started with. `inner` is None after a failed dependency resolution,
/// making the wrapper inoperative until a reconfigure succeeds.
struct GateState {
    config: CameraGateConfig,
    inner: Option<Arc<dyn Camera>>,
}

/// Window-gated camera component.
pub struct TimeSelectCamera {
    name: ResourceName,
    state: RwLock<Arc<GateState>>,
    shutdown: watch::Sender<bool>,
}

impl TimeSelectCamera {
    /// Construct from raw attributes and the injected dependency set.
    ///
    /// # Errors
    /// Invalid attributes or an unresolvable inner camera are fatal; no
    /// instance is created.
    pub fn new(
        name: ResourceName,
        attributes: &serde_json::Value,
        deps: &Dependencies,
    ) -> Result<Self, ContractError> {
        let config = CameraGateConfig::parse(attributes)?;
        let inner = deps.camera(&config.camera)?;
        let (shutdown, _) = watch::channel(false);

        info!(
            name = %name,
            inner = %config.camera,
            mode = config.schedule.mode(),
            "time-select camera created"
        );

        Ok(Self {
            name,
            state: RwLock::new(Arc::new(GateState {
                config,
                inner: Some(inner),
            })),
            shutdown,
        })
    }

    /// Observe the shutdown signal (flips to true on close).
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    fn snapshot(&self) -> Arc<GateState> {
        self.state.read().unwrap().clone()
    }

    fn inner_or_inoperative(
        &self,
        state: &GateState,
    ) -> Result<Arc<dyn Camera>, ContractError> {
        state.inner.clone().ok_or_else(|| {
            ContractError::inoperative(
                self.name.as_str(),
                format!("inner camera '{}' is unresolved", state.config.camera),
            )
        })
    }
}

#[async_trait]
impl Camera for TimeSelectCamera {
    fn name(&self) -> &ResourceName {
        &self.name
    }

    async fn capture(&self, ctx: &CallContext) -> Result<Frame, ContractError> {
        let state = self.snapshot();
        let inner = self.inner_or_inoperative(&state)?;

        // Direct/manual calls bypass the gate entirely
        if !ctx.from_data_service() {
            debug!(name = %self.name, "direct capture, bypassing window gate");
            return inner.capture(ctx).await;
        }

        let now = Local::now();
        if !state.config.schedule.in_window(now) {
            info!(
                name = %self.name,
                mode = state.config.schedule.mode(),
                now = %now.to_rfc3339(),
                "outside capture window, skipping this cycle"
            );
            metrics::counter!("timegate_frames_gated_total").increment(1);
            return Err(ContractError::NoCaptureToStore);
        }

        debug!(name = %self.name, "inside capture window, delegating");
        metrics::counter!("timegate_frames_forwarded_total").increment(1);
        inner.capture(ctx).await
    }

    async fn next_point_cloud(&self, _ctx: &CallContext) -> Result<PointCloud, ContractError> {
        Err(ContractError::unimplemented("next_point_cloud"))
    }

    async fn properties(&self) -> Result<CameraProperties, ContractError> {
        let state = self.snapshot();
        let inner = self.inner_or_inoperative(&state)?;
        let mut properties = inner.properties().await?;
        // Point clouds are not forwarded through the gate
        properties.supports_point_cloud = false;
        Ok(properties)
    }

    async fn do_command(&self, _command: Readings) -> Result<Readings, ContractError> {
        Err(ContractError::unimplemented("do_command"))
    }

    /// Apply a new configuration and re-resolve the inner camera.
    ///
    /// Invalid attributes leave the component untouched. A valid config
    /// whose dependency cannot be resolved is still applied, but the
    /// component becomes inoperative and the error is returned.
    async fn reconfigure(
        &self,
        attributes: &serde_json::Value,
        deps: &Dependencies,
    ) -> Result<(), ContractError> {
        let config = CameraGateConfig::parse(attributes)?;

        match deps.camera(&config.camera) {
            Ok(inner) => {
                info!(
                    name = %self.name,
                    inner = %config.camera,
                    mode = config.schedule.mode(),
                    "time-select camera reconfigured"
                );
                *self.state.write().unwrap() = Arc::new(GateState {
                    config,
                    inner: Some(inner),
                });
                Ok(())
            }
            Err(e) => {
                warn!(
                    name = %self.name,
                    inner = %config.camera,
                    error = %e,
                    "failed to resolve inner camera, component is inoperative"
                );
                *self.state.write().unwrap() = Arc::new(GateState {
                    config,
                    inner: None,
                });
                Err(e)
            }
        }
    }

    async fn close(&self) -> Result<(), ContractError> {
        info!(name = %self.name, "closing time-select camera");
        let _ = self.shutdown.send(true);
        // The inner camera goes down with the wrapper
        let state = self.snapshot();
        if let Some(inner) = &state.inner {
            inner.close().await?;
        }
        Ok(())
    }
}
