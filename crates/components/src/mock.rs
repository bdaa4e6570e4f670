//! Mock camera implementation
//!
//! Implements the `Camera` trait with synthetic frames. Used as the inner
//! camera in tests and standalone runs, where no real camera hardware or
//! host runtime is available.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use contracts::{
    CallContext, Camera, CameraProperties, ContractError, Dependencies, Frame, FrameFormat,
    PointCloud, Readings, ResourceName,
};

/// Mock camera configuration
#[derive(Debug, Clone)]
pub struct MockCameraConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Every capture fails when set (for failure-path tests)
    pub fail_capture: bool,
}

impl Default for MockCameraConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fail_capture: false,
        }
    }
}

/// Synthetic camera producing flat RGB frames.
pub struct MockCamera {
    name: ResourceName,
    config: MockCameraConfig,
    frame_count: AtomicU64,
    closed: AtomicBool,
}

impl MockCamera {
    /// Create a new mock camera
    pub fn new(name: ResourceName, config: MockCameraConfig) -> Self {
        Self {
            name,
            config,
            frame_count: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a mock camera with default configuration
    pub fn with_defaults(name: ResourceName) -> Self {
        Self::new(name, MockCameraConfig::default())
    }

    /// Frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Camera for MockCamera {
    fn name(&self) -> &ResourceName {
        &self.name
    }

    async fn capture(&self, _ctx: &CallContext) -> Result<Frame, ContractError> {
        if self.closed.load(Ordering::Relaxed) {
            return Err(ContractError::Other(format!(
                "mock camera '{}' is closed",
                self.name
            )));
        }
        if self.config.fail_capture {
            return Err(ContractError::Other(format!(
                "mock camera '{}' configured to fail",
                self.name
            )));
        }

        let frame_id = self.frame_count.fetch_add(1, Ordering::Relaxed);
        let size = (self.config.width * self.config.height * 3) as usize;
        // Vary the fill byte so consecutive frames differ
        let fill = (frame_id % 256) as u8;

        Ok(Frame {
            width: self.config.width,
            height: self.config.height,
            format: FrameFormat::Rgb8,
            data: Bytes::from(vec![fill; size]),
            captured_at: Utc::now(),
        })
    }

    async fn next_point_cloud(&self, _ctx: &CallContext) -> Result<PointCloud, ContractError> {
        Ok(PointCloud {
            num_points: 4,
            point_stride: 16,
            data: Bytes::from(vec![0u8; 4 * 16]),
        })
    }

    async fn properties(&self) -> Result<CameraProperties, ContractError> {
        Ok(CameraProperties {
            supports_point_cloud: true,
            frame_rate_hz: Some(30.0),
        })
    }

    async fn do_command(&self, command: Readings) -> Result<Readings, ContractError> {
        // Echo back, so passthrough behavior is observable in tests
        Ok(command)
    }

    async fn reconfigure(
        &self,
        _attributes: &serde_json::Value,
        _deps: &Dependencies,
    ) -> Result<(), ContractError> {
        // Nothing to re-resolve
        Ok(())
    }

    async fn close(&self) -> Result<(), ContractError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
