//! Capability traits - the interface the host runtime calls through
//!
//! Object safe (stored as `Arc<dyn Camera>` / `Arc<dyn Sensor>` in the
//! dependency container), hence `async_trait` rather than RPITIT.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CallContext, ContractError, Dependencies, ResourceName};

/// Key/value payload used for sensor readings and arbitrary commands.
pub type Readings = serde_json::Map<String, serde_json::Value>;

/// A single captured image frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Pixel format
    pub format: FrameFormat,

    /// Raw pixel data (zero-copy)
    pub data: Bytes,

    /// Wall-clock capture instant
    pub captured_at: DateTime<Utc>,
}

/// Pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFormat {
    Rgb8,
    Rgba8,
    Bgra8,
    Depth,
}

/// Point cloud payload for cameras that support it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud {
    /// Point count
    pub num_points: u32,

    /// Bytes per point (typically 16: x,y,z,intensity)
    pub point_stride: u32,

    /// Point data
    pub data: Bytes,
}

/// Camera metadata exposed to callers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CameraProperties {
    /// Whether `next_point_cloud` is expected to succeed
    pub supports_point_cloud: bool,

    /// Nominal frame rate, if the implementation knows it
    pub frame_rate_hz: Option<f64>,
}

/// Camera capability.
///
/// Implemented both by inner cameras (the wrapped dependency) and by the
/// gating wrapper itself, so wrappers compose transparently.
#[async_trait]
pub trait Camera: Send + Sync {
    /// Name this instance is registered under
    fn name(&self) -> &ResourceName;

    /// Capture one frame.
    ///
    /// # Errors
    /// - [`ContractError::NoCaptureToStore`] when a gating implementation
    ///   decides the caller should skip this cycle
    /// - [`ContractError::Inoperative`] when a previous reconfiguration
    ///   left the component without an inner camera
    async fn capture(&self, ctx: &CallContext) -> Result<Frame, ContractError>;

    /// Fetch the next point cloud, if supported.
    async fn next_point_cloud(&self, ctx: &CallContext) -> Result<PointCloud, ContractError>;

    /// Camera metadata.
    async fn properties(&self) -> Result<CameraProperties, ContractError>;

    /// Arbitrary command passthrough.
    async fn do_command(&self, command: Readings) -> Result<Readings, ContractError>;

    /// Apply new attributes against a freshly resolved dependency set.
    ///
    /// # Errors
    /// Invalid attributes must leave the component untouched.
    async fn reconfigure(
        &self,
        attributes: &serde_json::Value,
        deps: &Dependencies,
    ) -> Result<(), ContractError>;

    /// Release resources; further calls may fail.
    async fn close(&self) -> Result<(), ContractError>;
}

/// Sensor capability.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Name this instance is registered under
    fn name(&self) -> &ResourceName;

    /// Current readings.
    async fn readings(&self, ctx: &CallContext) -> Result<Readings, ContractError>;

    /// Arbitrary command passthrough.
    async fn do_command(&self, command: Readings) -> Result<Readings, ContractError>;

    /// Apply new attributes against a freshly resolved dependency set.
    ///
    /// # Errors
    /// Invalid attributes must leave the component untouched.
    async fn reconfigure(
        &self,
        attributes: &serde_json::Value,
        deps: &Dependencies,
    ) -> Result<(), ContractError>;

    /// Release resources; further calls may fail.
    async fn close(&self) -> Result<(), ContractError>;
}
