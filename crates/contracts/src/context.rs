//! CallContext - per-call metadata from the host runtime
//!
//! Carries the "extra" map the runtime attaches to capability calls. The
//! data-capture service marks its scheduled calls with
//! `fromDataManagement: true`; direct/manual calls carry no marker and
//! bypass window gating entirely.

use serde_json::{Map, Value};

/// Extra-map key the data-capture service sets on scheduled calls.
pub const FROM_DATA_MANAGEMENT_KEY: &str = "fromDataManagement";

/// Per-call context.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    extra: Option<Map<String, Value>>,
}

impl CallContext {
    /// Context for a direct/manual call (no extra data).
    pub fn direct() -> Self {
        Self { extra: None }
    }

    /// Context for a call issued by the scheduled data-capture service.
    pub fn scheduled_capture() -> Self {
        let mut extra = Map::new();
        extra.insert(FROM_DATA_MANAGEMENT_KEY.to_string(), Value::Bool(true));
        Self { extra: Some(extra) }
    }

    /// Context carrying an arbitrary extra map (as received over the wire).
    pub fn with_extra(extra: Map<String, Value>) -> Self {
        Self { extra: Some(extra) }
    }

    /// The raw extra map, if any.
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        self.extra.as_ref()
    }

    /// True when the call originates from the scheduled data-capture
    /// service. Anything other than a literal `true` marker is treated as
    /// a direct call.
    pub fn from_data_service(&self) -> bool {
        self.extra
            .as_ref()
            .and_then(|extra| extra.get(FROM_DATA_MANAGEMENT_KEY))
            .map(|value| value == &Value::Bool(true))
            .unwrap_or(false)
    }
}
