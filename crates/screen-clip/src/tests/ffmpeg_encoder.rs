//! Encoder runs against a shell script standing in for ffmpeg.
//!
//! Every recording part writes its own file name into its output, so the
//! joined bytes show which parts were kept and in which order.

use crate::ffmpeg::FfmpegEncoders;

use screen_clip_core::{
    CaptureDevice, CaptureStream, EncoderFactory, EncoderOptions, MediaEncoder, StreamSource,
};

use std::{os::unix::fs::PermissionsExt, path::PathBuf, time::Duration};

use tempfile::TempDir;

/// How a fake recording part behaves once its file is written.
enum PartBehaviour {
    /// Exit when anything arrives on stdin, like ffmpeg's `q`.
    QuitOnRequest,
    /// Exit straight away, like a grab whose display went away.
    ExitOnItsOwn,
    /// Ignore stdin and keep running.
    IgnoreQuit,
}

fn fake_ffmpeg(dir: &TempDir, behaviour: PartBehaviour) -> PathBuf {
    let after_write = match behaviour {
        PartBehaviour::QuitOnRequest => "read -r _ || true\nexit 0",
        PartBehaviour::ExitOnItsOwn => "exit 1",
        PartBehaviour::IgnoreQuit => "exec sleep 30",
    };

    let script = format!(
        r#"#!/bin/sh
prev=""
list=""
out=""
for arg; do
  if [ "$prev" = "-i" ]; then list="$arg"; fi
  prev="$arg"
  out="$arg"
done
case " $* " in
  *" concat "*)
    sed -n "s/^file '\(.*\)'\$/\1/p" "$list" | while read -r part; do cat "$part"; done > "$out"
    exit 0 ;;
esac
printf '%s;' "$(basename "$out")" > "$out"
{after_write}
"#
    );

    let path = dir.path().join("ffmpeg");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn screen_stream() -> CaptureStream {
    CaptureStream::new(StreamSource {
        video: CaptureDevice {
            driver: "x11grab".to_string(),
            name: ":0.0".to_string(),
        },
        audio: None,
        frame_rate: 30,
    })
}

fn encoder_for(
    binary: PathBuf,
    stream: &CaptureStream,
    finish_timeout: Duration,
) -> Box<dyn MediaEncoder> {
    FfmpegEncoders::new(binary)
        .with_finish_timeout(finish_timeout)
        .create(stream, &EncoderOptions::default())
        .unwrap()
}

/// WHAT: Stop quits the single running part and returns its file
/// WHY: A recording without pauses needs no join step
#[tokio::test]
async fn given_running_part_when_stopped_then_part_bytes_returned() {
    // Given: One part that quits on request
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_ffmpeg(&dir, PartBehaviour::QuitOnRequest);
    let stream = screen_stream();
    let mut encoder = encoder_for(binary, &stream, Duration::from_secs(5));
    encoder.start().await.unwrap();

    // When: Stopped
    let blob = encoder.stop().await.unwrap();

    // Then: The part's bytes, and the requested quit did not end the stream
    assert_eq!(blob.bytes, b"part-000.webm;");
    assert!(stream.is_active());
}

/// WHAT: Pause then resume records two parts joined on stop
/// WHY: ffmpeg cannot suspend a grab, so each run is its own file
#[tokio::test]
async fn given_pause_and_resume_when_stopped_then_parts_concatenated() {
    // Given: A part, a pause and a second part
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_ffmpeg(&dir, PartBehaviour::QuitOnRequest);
    let stream = screen_stream();
    let mut encoder = encoder_for(binary, &stream, Duration::from_secs(5));
    encoder.start().await.unwrap();
    encoder.pause().await.unwrap();
    encoder.resume().await.unwrap();

    // When: Stopped
    let blob = encoder.stop().await.unwrap();

    // Then: Both parts in order through the concat join
    assert_eq!(blob.bytes, b"part-000.webm;part-001.webm;");
    assert!(stream.is_active());
}

/// WHAT: A part exiting unasked ends the stream but keeps its media
/// WHY: Losing the display is treated like Stop and still yields a segment
#[tokio::test]
async fn given_part_exits_on_its_own_when_watched_then_stream_ended() {
    // Given: A part that exits right after writing
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_ffmpeg(&dir, PartBehaviour::ExitOnItsOwn);
    let stream = screen_stream();
    let mut ended = stream.on_ended();
    let mut encoder = encoder_for(binary, &stream, Duration::from_secs(5));

    // When: Started and left alone
    encoder.start().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), ended.wait_for(|ended| *ended))
        .await
        .unwrap()
        .unwrap();

    // Then: Stream no longer active, stop still returns the part
    assert!(!stream.is_active());
    let blob = encoder.stop().await.unwrap();
    assert_eq!(blob.bytes, b"part-000.webm;");
}

/// WHAT: A part that ignores quit is killed and pause still succeeds
/// WHY: Recorder state must follow the encoder, never count time with no part running
#[tokio::test]
async fn given_part_ignoring_quit_when_paused_then_part_closed_and_resumable() {
    // Given: Parts that never honour the quit request, with a short timeout
    let dir = tempfile::tempdir().unwrap();
    let binary = fake_ffmpeg(&dir, PartBehaviour::IgnoreQuit);
    let stream = screen_stream();
    let mut encoder = encoder_for(binary, &stream, Duration::from_millis(200));
    encoder.start().await.unwrap();

    // When: Paused, resumed and stopped
    encoder.pause().await.unwrap();
    encoder.resume().await.unwrap();
    let blob = encoder.stop().await.unwrap();

    // Then: Both killed parts kept, and killing them did not end the stream
    assert_eq!(blob.bytes, b"part-000.webm;part-001.webm;");
    assert!(stream.is_active());
}
