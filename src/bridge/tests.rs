use super::*;
use crate::platform::mock::{
    MockCameraDriver, MockDisplayInfo, MockPermissionGate, MockViewContainer,
};
use crate::platform::Facing;
use crate::session::SessionControllerBuilder;
use serde_json::json;

#[test]
fn test_start_options_defaults() {
    let options: StartOptions = serde_json::from_value(json!({})).unwrap();

    assert_eq!(options.position, None);
    assert_eq!(options.x, 0);
    assert_eq!(options.y, 0);
    assert_eq!(options.width, 0);
    assert_eq!(options.height, 0);
    assert_eq!(options.padding_bottom, 0);
    assert!(!options.to_back);
}

#[test]
fn test_start_options_wire_field_names() {
    let options: StartOptions = serde_json::from_value(json!({
        "position": "front",
        "x": 10,
        "y": 20,
        "width": 100,
        "height": 200,
        "paddingBottom": 30,
        "toBack": true
    }))
    .unwrap();

    assert_eq!(options.position.as_deref(), Some("front"));
    assert_eq!(options.padding_bottom, 30);
    assert!(options.to_back);
}

#[test]
fn test_position_parsing_follows_the_wire_rule() {
    // Absent, empty and "rear" select the back camera
    assert_eq!(Facing::from_position(None), Facing::Back);
    assert_eq!(Facing::from_position(Some("")), Facing::Back);
    assert_eq!(Facing::from_position(Some("rear")), Facing::Back);

    // Anything else selects the front camera
    assert_eq!(Facing::from_position(Some("front")), Facing::Front);
    assert_eq!(Facing::from_position(Some("selfie")), Facing::Front);
}

#[test]
fn test_into_request_clamps_negative_lengths() {
    let options = StartOptions {
        x: -10,
        y: -20,
        width: -100,
        height: 50,
        padding_bottom: -5,
        ..Default::default()
    };

    let request = options.into_request();

    assert_eq!(request.placement.x, 0);
    assert_eq!(request.placement.y, 0);
    assert_eq!(request.placement.width, 0);
    assert_eq!(request.placement.height, 50);
    assert_eq!(request.placement.padding_bottom, 0);
}

#[test]
fn test_capture_result_wire_shape() {
    let payload = CaptureResult {
        value: "encoded-picture".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "value": "encoded-picture" })
    );
}

#[test]
fn test_flash_modes_wire_shape() {
    let payload = FlashModesResult {
        result: vec!["off".to_string(), "torch".to_string()],
    };

    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "result": ["off", "torch"] })
    );

    // An empty enumeration is a valid payload
    let payload = FlashModesResult { result: vec![] };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "result": [] })
    );
}

#[tokio::test]
async fn test_builder_requires_every_collaborator() {
    let err = SessionControllerBuilder::new().build().unwrap_err();
    assert!(err.to_string().contains("Camera driver must be specified"));

    let err = SessionControllerBuilder::new()
        .with_driver(MockCameraDriver::new())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("Permission gate must be specified"));
}

#[tokio::test]
async fn test_bridge_full_command_sequence() {
    let driver = MockCameraDriver::new()
        .with_flash_modes(&["off", "on", "auto", "torch"])
        .with_picture("demo-picture");

    let (bridge, controller) = SessionControllerBuilder::new()
        .with_driver(driver)
        .with_permission_gate(MockPermissionGate::granted())
        .with_display_info(MockDisplayInfo::new(3.0, (1440, 3120)))
        .with_view_container(MockViewContainer::new())
        .build()
        .unwrap();

    bridge.start(StartOptions::default()).await.unwrap();

    let modes = bridge.get_supported_flash_modes().await.unwrap();
    assert_eq!(modes.result.len(), 4);

    bridge.set_flash_mode(Some("auto".to_string())).await.unwrap();

    let picture = bridge.capture(None).await.unwrap();
    assert_eq!(picture.value, "demo-picture");

    bridge.flip().await.unwrap();
    bridge.stop().await.unwrap();

    controller.shutdown().await;
}

#[tokio::test]
async fn test_bridge_clones_share_one_controller() {
    let (bridge, controller) = SessionControllerBuilder::new()
        .with_driver(MockCameraDriver::new())
        .with_permission_gate(MockPermissionGate::granted())
        .with_display_info(MockDisplayInfo::default())
        .with_view_container(MockViewContainer::new())
        .build()
        .unwrap();

    let clone = bridge.clone();
    bridge.start(StartOptions::default()).await.unwrap();

    // The clone sees the same session
    assert_eq!(
        clone.start(StartOptions::default()).await.unwrap_err(),
        crate::error::CommandError::AlreadyStarted
    );
    clone.stop().await.unwrap();

    controller.shutdown().await;
}
