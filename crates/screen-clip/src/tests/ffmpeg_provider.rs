use crate::ffmpeg::{FfmpegCapture, GrabPlatform, provider::classify_probe_failure};

use screen_clip_core::{CaptureProvider, CaptureRequest, ClipError};

use std::path::PathBuf;

/// WHAT: A missing ffmpeg makes capture unsupported
/// WHY: Start must alert instead of trying to grab
#[tokio::test]
async fn given_missing_binary_when_detecting_then_unsupported() {
    // Given/When: Detection against a binary that does not exist
    let capture =
        FfmpegCapture::detect(PathBuf::from("/nonexistent/bin/ffmpeg"), None, None).await;

    // Then: Not supported
    assert!(!capture.is_supported());
}

/// WHAT: Request maps onto configured devices
/// WHY: Audio is opened only when requested and the frame rate is carried through
#[tokio::test]
async fn given_configured_devices_when_mapping_request_then_source_uses_them() {
    // Given: Explicit display and audio device
    let capture = FfmpegCapture::detect(
        PathBuf::from("/nonexistent/bin/ffmpeg"),
        Some(":1.0+0,0".to_string()),
        Some("monitor".to_string()),
    )
    .await;

    // When: Mapping requests with and without audio
    let with_audio = capture.source_for(GrabPlatform::Linux, &CaptureRequest::new(15, true));
    let silent = capture.source_for(GrabPlatform::Linux, &CaptureRequest::new(30, false));

    // Then: Configured devices used, audio only when asked
    assert_eq!(with_audio.video.name, ":1.0+0,0");
    assert_eq!(with_audio.audio.unwrap().name, "monitor");
    assert_eq!(with_audio.frame_rate, 15);
    assert!(silent.audio.is_none());
}

/// WHAT: Access refusals become PermissionDenied
/// WHY: The alert must tell the operator access was refused
#[test]
fn given_permission_stderr_when_classifying_then_permission_denied() {
    let stderr = "[x11grab @ 0x55] Cannot open display :0.0\nOperation not permitted\n";

    let error = classify_probe_failure(stderr);

    assert!(matches!(
        error,
        ClipError::PermissionDenied { ref reason, .. } if reason == "Operation not permitted"
    ));
}

/// WHAT: Other probe failures become DeviceError with the last line
/// WHY: Missing devices are not a permission problem
#[test]
fn given_device_stderr_when_classifying_then_device_error() {
    let error = classify_probe_failure("default: No such file or directory\n\n");

    assert!(matches!(
        error,
        ClipError::DeviceError { ref reason, .. } if reason == "default: No such file or directory"
    ));
}
