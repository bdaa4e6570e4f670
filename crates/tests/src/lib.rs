//! # Integration Tests
//!
//! End-to-end tests across the workspace crates:
//! - module config JSON -> registry -> constructed components
//! - gating behavior through the `Camera`/`Sensor` trait objects
//! - reconfiguration lifecycle

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use components::{register_models, MockCamera, TimeSyncSensor};
    use config_loader::ConfigLoader;
    use contracts::{
        CallContext, Camera, ComponentRegistry, ContractError, Dependencies, Resource, Sensor,
    };
    use serde_json::{json, Value};

    const ALWAYS_OPEN: &str = r#"[
        { "start": "2000-01-01T00:00:00Z", "end": "2100-01-01T00:00:00Z" }
    ]"#;

    fn mock_deps(names: &[&str]) -> Dependencies {
        let mut deps = Dependencies::new();
        for name in names {
            deps.insert(
                *name,
                Resource::Camera(Arc::new(MockCamera::with_defaults((*name).into()))),
            );
        }
        deps
    }

    fn build_module(
        config_json: &str,
        deps: &Dependencies,
    ) -> (Vec<Arc<dyn Camera>>, Vec<Arc<dyn Sensor>>) {
        let module = ConfigLoader::load_from_str(config_json).unwrap();
        let mut registry = ComponentRegistry::new();
        register_models(&mut registry).unwrap();

        let mut cameras = Vec::new();
        let mut sensors = Vec::new();
        for component in &module.components {
            match registry.construct(component, deps).unwrap() {
                Resource::Camera(camera) => cameras.push(camera),
                Resource::Sensor(sensor) => sensors.push(sensor),
            }
        }
        (cameras, sensors)
    }

    /// Full flow: JSON module config -> constructed components -> gated
    /// capture and sync readings through the trait objects.
    #[tokio::test]
    async fn test_e2e_module_from_json() {
        let config = format!(
            r#"{{
                "components": [
                    {{
                        "name": "gated_cam",
                        "model": "timegate:camera:time-select-capture",
                        "attributes": {{ "camera": "front_cam", "schedule": {ALWAYS_OPEN} }}
                    }},
                    {{
                        "name": "sync_window",
                        "model": "timegate:sensor:time-select-sync",
                        "attributes": {{ "schedule": {ALWAYS_OPEN} }}
                    }}
                ]
            }}"#
        );

        let deps = mock_deps(&["front_cam"]);
        let (cameras, sensors) = build_module(&config, &deps);
        assert_eq!(cameras.len(), 1);
        assert_eq!(sensors.len(), 1);

        let frame = cameras[0]
            .capture(&CallContext::scheduled_capture())
            .await
            .unwrap();
        assert_eq!(frame.width, 320);

        let readings = sensors[0].readings(&CallContext::direct()).await.unwrap();
        assert_eq!(readings.get("should_sync"), Some(&Value::Bool(true)));
    }

    /// Outside the window, the scheduled-capture path yields the sentinel
    /// while a direct call still produces a frame.
    #[tokio::test]
    async fn test_e2e_gated_capture_vs_direct() {
        let config = r#"{
            "components": [{
                "name": "gated_cam",
                "model": "timegate:camera:time-select-capture",
                "attributes": {
                    "camera": "front_cam",
                    "schedule": [
                        { "start": "2000-01-01T00:00:00Z", "end": "2000-01-02T00:00:00Z" }
                    ]
                }
            }]
        }"#;

        let deps = mock_deps(&["front_cam"]);
        let (cameras, _) = build_module(config, &deps);

        let err = cameras[0]
            .capture(&CallContext::scheduled_capture())
            .await
            .unwrap_err();
        assert!(err.is_no_capture_to_store());

        assert!(cameras[0].capture(&CallContext::direct()).await.is_ok());
    }

    /// Reconfiguration lifecycle through the registry-erased trait object:
    /// swap to a closed window, break the dependency, then recover.
    #[tokio::test]
    async fn test_e2e_reconfigure_lifecycle() {
        let open = json!({
            "camera": "front_cam",
            "schedule": [
                { "start": "2000-01-01T00:00:00Z", "end": "2100-01-01T00:00:00Z" }
            ]
        });
        let config = format!(
            r#"{{
                "components": [{{
                    "name": "gated_cam",
                    "model": "timegate:camera:time-select-capture",
                    "attributes": {open}
                }}]
            }}"#
        );

        let deps = mock_deps(&["front_cam"]);
        let (cameras, _) = build_module(&config, &deps);
        let camera = &cameras[0];
        assert!(camera
            .capture(&CallContext::scheduled_capture())
            .await
            .is_ok());

        // Swap to a window in the past: gated
        let closed = json!({
            "camera": "front_cam",
            "schedule": [
                { "start": "2000-01-01T00:00:00Z", "end": "2000-01-02T00:00:00Z" }
            ]
        });
        camera.reconfigure(&closed, &deps).await.unwrap();
        let err = camera
            .capture(&CallContext::scheduled_capture())
            .await
            .unwrap_err();
        assert!(err.is_no_capture_to_store());

        // Point at a dependency that does not exist: inoperative
        let broken = json!({
            "camera": "missing_cam",
            "schedule": [
                { "start": "2000-01-01T00:00:00Z", "end": "2100-01-01T00:00:00Z" }
            ]
        });
        assert!(matches!(
            camera.reconfigure(&broken, &deps).await,
            Err(ContractError::DependencyNotFound { .. })
        ));
        assert!(matches!(
            camera.capture(&CallContext::direct()).await,
            Err(ContractError::Inoperative { .. })
        ));

        // Recover
        camera.reconfigure(&open, &deps).await.unwrap();
        assert!(camera.capture(&CallContext::direct()).await.is_ok());
    }

    /// Dependency lookups are keyed by name and capability: asking for the
    /// wrong capability is an error distinct from a missing name.
    #[tokio::test]
    async fn test_e2e_dependency_lookup_by_capability() {
        let sensor = TimeSyncSensor::new(
            "sync_window".into(),
            &json!({ "start_hours": "08:00", "end_hours": "18:00" }),
        )
        .unwrap();

        let mut deps = mock_deps(&["front_cam"]);
        deps.insert("sync_window", Resource::Sensor(Arc::new(sensor)));

        assert!(deps.sensor("sync_window").is_ok());
        assert!(deps.camera("front_cam").is_ok());
        assert!(matches!(
            deps.camera("sync_window"),
            Err(ContractError::DependencyType { expected: "camera", .. })
        ));
        assert!(matches!(
            deps.sensor("front_cam"),
            Err(ContractError::DependencyType { expected: "sensor", .. })
        ));
        assert!(matches!(
            deps.sensor("missing"),
            Err(ContractError::DependencyNotFound { .. })
        ));
    }

    /// Weekly validation failures surface when constructing from the
    /// module config, before any component exists.
    #[tokio::test]
    async fn test_e2e_weekly_validation_blocks_construction() {
        let config = r#"{
            "components": [{
                "name": "sync_window",
                "model": "timegate:sensor:time-select-sync",
                "attributes": {
                    "weekly_schedule": {
                        "mon": { "start": "08:00:00", "end": "18:00:00" },
                        "tue": { "start": "08:00:00", "end": "18:00:00" },
                        "wed": { "start": "08:00:00", "end": "18:00:00" },
                        "thu": { "start": "08:00:00", "end": "18:00:00" },
                        "fri": { "start": "08:00:00", "end": "18:00:00" },
                        "sat": { "start": "10:00:00", "end": "14:00:00" }
                    }
                }
            }]
        }"#;

        let module = ConfigLoader::load_from_str(config).unwrap();
        let mut registry = ComponentRegistry::new();
        register_models(&mut registry).unwrap();

        let result = registry.construct(&module.components[0], &Dependencies::new());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("sun"), "got: {err}");
    }

    /// Closing through the trait objects is idempotent and takes the inner
    /// camera down with the wrapper.
    #[tokio::test]
    async fn test_e2e_shutdown() {
        let config = format!(
            r#"{{
                "components": [
                    {{
                        "name": "gated_cam",
                        "model": "timegate:camera:time-select-capture",
                        "attributes": {{ "camera": "front_cam", "schedule": {ALWAYS_OPEN} }}
                    }},
                    {{
                        "name": "sync_window",
                        "model": "timegate:sensor:time-select-sync",
                        "attributes": {{ "schedule": {ALWAYS_OPEN} }}
                    }}
                ]
            }}"#
        );

        let inner = Arc::new(MockCamera::with_defaults("front_cam".into()));
        let mut deps = Dependencies::new();
        deps.insert("front_cam", Resource::Camera(inner.clone()));
        let (cameras, sensors) = build_module(&config, &deps);

        for camera in &cameras {
            camera.close().await.unwrap();
            camera.close().await.unwrap();
        }
        for sensor in &sensors {
            sensor.close().await.unwrap();
        }

        assert!(inner.capture(&CallContext::direct()).await.is_err());
    }
}
