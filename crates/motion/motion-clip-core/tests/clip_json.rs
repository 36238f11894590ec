use motion_clip_core::{ChannelLayout, ClipError, MotionClip};

const WAVE: &str = r#"{
  "name": "wave",
  "layout": "rotations",
  "joints": ["HumanoidRoot", "r_shoulder"],
  "frames": [
    { "time": 0.0, "channels": [0, 0, 0, 1, 0, 0, 0, 1] },
    { "time": 0.5, "channels": [0, 0, 0, 1, 0, 0, 0.5, 0.8660254] },
    { "time": 1.0, "channels": [0, 0, 0, 1, 0, 0, 0, 1] }
  ]
}"#;

#[test]
fn parses_clip_json() {
    let clip = MotionClip::from_json_str(WAVE).unwrap();
    assert_eq!(clip.layout(), ChannelLayout::Rotations);
    assert_eq!(clip.layout().as_str(), "rotations");
    assert_eq!(clip.frame_count(), 3);
    assert_eq!(clip.joint_index("r_shoulder"), Some(1));
    assert_eq!(clip.rotation(1, 1).unwrap()[2], 0.5);
    assert_eq!(clip.end_time(), 1.0);
}

#[test]
fn invalid_channel_count_surfaces_as_error() {
    let bad = WAVE.replace("[0, 0, 0, 1, 0, 0, 0.5, 0.8660254]", "[0, 0, 0, 1]");
    let err = MotionClip::from_json_str(&bad).unwrap_err();
    assert!(matches!(err, ClipError::Serialization { .. }));
    assert!(err.to_string().contains("expects 8"));
}

#[test]
fn unknown_layout_is_rejected() {
    let bad = WAVE.replace("\"rotations\"", "\"euler\"");
    assert!(MotionClip::from_json_str(&bad).is_err());
}
