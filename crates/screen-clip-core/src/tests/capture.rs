use crate::{CaptureRequest, CaptureStream, DEFAULT_FRAME_RATE, TrackKind, tests::fakes::source};

/// WHAT: Audio tracks exist only when audio was granted
/// WHY: Recording with the checkbox off must not capture sound
#[test]
fn given_sources_with_and_without_audio_when_building_stream_then_tracks_match() {
    // Given/When: Streams over both kinds of source
    let silent = CaptureStream::new(source(false));
    let loud = CaptureStream::new(source(true));

    // Then: Video always, audio only when granted
    assert!(!silent.has_audio());
    assert_eq!(silent.tracks().len(), 1);
    assert_eq!(silent.tracks()[0].kind, TrackKind::Video);
    assert!(loud.has_audio());
    assert_eq!(loud.tracks()[1].kind, TrackKind::Audio);
}

/// WHAT: Stopping tracks releases the stream without the ended signal
/// WHY: Only termination the widget did not ask for may trigger a stop
#[test]
fn given_live_stream_when_stopping_tracks_then_inactive_and_not_ended() {
    // Given: A live stream and an ended subscriber
    let mut stream = CaptureStream::new(source(true));
    let ended = stream.on_ended();
    assert!(stream.is_active());

    // When: Stopping all tracks
    stream.stop_all_tracks();

    // Then: Inactive, every track dead, no ended signal
    assert!(!stream.is_active());
    assert!(stream.tracks().iter().all(|t| !t.live));
    assert!(!*ended.borrow());
}

/// WHAT: External end is observable and deactivates the stream
/// WHY: Revoked sharing must reach the controller
#[test]
fn given_live_stream_when_platform_ends_it_then_subscribers_see_ended() {
    // Given: A live stream with a subscriber
    let stream = CaptureStream::new(source(false));
    let ended = stream.on_ended();

    // When: The platform reports the end
    stream.ended_handle().notify();

    // Then: Subscriber sees it and the stream is inactive
    assert!(*ended.borrow());
    assert!(!stream.is_active());
}

/// WHAT: Requests default to 30 fps without audio
/// WHY: The widget asks for an ideal 30 fps screen capture
#[test]
fn given_default_request_when_inspected_then_thirty_fps_no_audio() {
    let request = CaptureRequest::default();

    assert_eq!(request.video.ideal_frame_rate, DEFAULT_FRAME_RATE);
    assert_eq!(DEFAULT_FRAME_RATE, 30);
    assert!(!request.audio);
}
