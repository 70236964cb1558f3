//! End-to-end configuration of input sources from a TOML configuration file.

use elevmap::prelude::*;
use elevmap::inputs::sensor_processors::{LaserSensorProcessor, StereoSensorProcessor};
use elevmap::inputs::{RecordingLogger, Severity};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

const CONFIGURATION: &str = r#"
[node]
name = "elevation_mapping"
namespace = "/anymal"

[logging]
level = "debug"

[parameters]
robot_base_frame_id = "base"
map_frame_id = "odom"
length_in_x = [12.0, 12.0]
initial_variance = [0, 0.5]

[parameters.input_sources]
inputs = ["front_camera", "rear_lidar", "stereo_head"]

[parameters.input_sources.front_camera]
type = "rgbd"
topic = "/cam/points"
queue_size = 5
publish_on_update = true

[parameters.input_sources.front_camera.sensor_processor]
type = "structured_light"
cutoff_min_depth = 0.2
cutoff_max_depth = 3.25
normal_factor_a = 0.000611

[parameters.input_sources.rear_lidar]
type = "pointcloud"
topic = "lidar/points"
queue_size = 1
publish_on_update = false
sensor_processor = { type = "laser", min_radius = 0.018, beam_angle = 0.0006, beam_constant = 0.0015 }

[parameters.input_sources.stereo_head]
type = "pointcloud"
topic = "~/stereo/points"
queue_size = 2
publish_on_update = false
sensor_processor = { type = "stereo", p_1 = 1, depth_upper_limit = 8.0 }
"#;

fn load(content: &str) -> Result<(ElevmapConfig, Arc<TomlParameterStore>), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("elevmap_configuration.toml");
    fs::write(&path, content)?;

    let config = load_config(Some(path.as_path()), None)?;
    validate_config(&config)?;
    let store = Arc::new(config.parameter_store());
    Ok((config, store))
}

fn store_double_array(config: &ElevmapConfig, key: &str) -> Option<Vec<f64>> {
    config.parameter_store().get_double_array(key).ok().flatten()
}

#[test]
fn test_manager_configures_every_source() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load(CONFIGURATION)?;
    let logger = Arc::new(RecordingLogger::new());
    let context = NodeContext::new(config.node.clone(), store).with_logger(logger.clone());

    let mut manager = InputSourceManager::new(context);
    assert!(manager.configure_from_parameters("input_sources"));
    assert_eq!(manager.number_of_sources(), 3);
    assert_eq!(store_double_array(&config, "length_in_x"), Some(vec![12.0, 12.0]));
    assert!(logger.messages(Severity::Error).is_empty());

    let camera = manager.source("front_camera").expect("front_camera configured");
    assert_eq!(
        camera.parameters(),
        InputParameters {
            name: "front_camera".to_string(),
            input_type: "rgbd".to_string(),
            topic: "/cam/points".to_string(),
            queue_size: 5,
            publish_on_update: true,
        }
    );
    assert_eq!(camera.sensor_processor_type(), Some(SensorProcessorType::StructuredLight));
    assert_eq!(camera.subscribed_topic()?, "/cam/points");

    let lidar = manager.source("rear_lidar").expect("rear_lidar configured");
    assert_eq!(lidar.subscribed_topic()?, "/anymal/lidar/points");
    let min_radius = lidar.with_sensor_processor(|p| {
        p.as_any()
            .downcast_ref::<LaserSensorProcessor>()
            .map(|laser| laser.parameters().min_radius)
    });
    assert_eq!(min_radius, Some(Some(0.018)));

    let stereo = manager.source("stereo_head").expect("stereo_head configured");
    assert_eq!(stereo.subscribed_topic()?, "/anymal/elevation_mapping/stereo/points");
    let (p_1, upper) = stereo
        .with_sensor_processor(|p| {
            let stereo = p.as_any().downcast_ref::<StereoSensorProcessor>()?;
            let parameters = stereo.parameters();
            Some((parameters.p[0], parameters.depth_upper_limit))
        })
        .flatten()
        .expect("stereo processor live");
    assert_eq!(p_1, 1.0);
    assert_eq!(upper, 8.0);

    let map_frame = camera.with_sensor_processor(|p| p.base().general_parameters().map_frame_id.clone());
    assert_eq!(map_frame.as_deref(), Some("odom"));

    Ok(())
}

#[test]
fn test_single_input_reports_every_missing_field() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load(
        r#"
        [parameters.input_sources.sonar]
        topic = "/sonar"
        "#,
    )?;
    let logger = Arc::new(RecordingLogger::new());
    let input = Input::new(NodeContext::new(config.node.clone(), store).with_logger(logger.clone()));

    let failure = input
        .try_configure("sonar", "input_sources", &GeneralParameters::default())
        .unwrap_err();
    assert_eq!(
        failure.missing_fields(),
        vec!["type", "queue_size", "publish_on_update", "sensor_processor.type"]
    );
    assert_eq!(logger.messages(Severity::Error).len(), 4);
    assert_eq!(input.parameters().topic, "/sonar");
    assert_eq!(input.parameters().queue_size, 1);
    assert!(input.sensor_processor_type().is_none());
    assert!(failure.to_string().contains("sonar"));

    Ok(())
}

#[test]
fn test_unknown_processor_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load(
        r#"
        [parameters.input_sources.front_radar]
        type = "pointcloud"
        topic = "/radar/points"
        queue_size = 1
        publish_on_update = false
        sensor_processor = { type = "radar" }
        "#,
    )?;
    let input = Input::new(NodeContext::new(config.node.clone(), store));

    let failure = input
        .try_configure("front_radar", "input_sources", &GeneralParameters::default())
        .unwrap_err();
    assert_eq!(failure.errors, vec![InputError::UnknownStrategyType("radar".to_string())]);
    assert!(input.sensor_processor_type().is_none());
    assert_eq!(input.subscribed_topic()?, "/radar/points");

    Ok(())
}

#[test]
fn test_unrepresentable_array_only_affects_its_input() -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = load(
        r#"
        [parameters]
        flags = [true, false]

        [parameters.input_sources]
        inputs = ["lidar", "sonar"]

        [parameters.input_sources.lidar]
        type = "pointcloud"
        topic = "/lidar/points"
        queue_size = 1
        publish_on_update = false
        sensor_processor = { type = "laser" }

        [parameters.input_sources.sonar]
        type = ["a", 1]
        topic = "/sonar/points"
        queue_size = 1
        publish_on_update = false
        sensor_processor = { type = "perfect" }
        "#,
    )?;
    assert_eq!(
        store.unsupported_keys(),
        ["flags".to_string(), "input_sources.sonar.type".to_string()]
    );

    let mut manager = InputSourceManager::new(NodeContext::new(config.node.clone(), store));
    assert!(!manager.configure_from_parameters("input_sources"));
    assert_eq!(manager.number_of_sources(), 1);
    assert!(manager.source("lidar").is_some());

    Ok(())
}

#[test]
fn test_logging_level_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let (config, _) = load(
        r#"
        [logging]
        level = "DEBUG"
        "#,
    )?;
    assert_eq!(config.logging.level, "DEBUG");

    let flags = elevmap::observability::CrateDebugFlags::default();
    elevmap::observability::init_logging(&flags, &config.logging.level)?;
    Ok(())
}
