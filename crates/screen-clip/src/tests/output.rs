use crate::output::{FileSaver, SystemPreview, TerminalPrompt};

use screen_clip_core::{
    FileNamePrompt, MediaBlob, OutputSegment, PreviewSurface, SegmentSaver, WEBM_VP8_OPUS,
};

use std::time::Duration;

use uuid::Uuid;

fn segment(answer: Option<&str>, bytes: &[u8]) -> OutputSegment {
    OutputSegment::new(
        Uuid::new_v4(),
        MediaBlob {
            bytes: bytes.to_vec(),
            mime_type: WEBM_VP8_OPUS.to_string(),
        },
        answer,
        Duration::from_secs(7),
    )
}

/// WHAT: Recordings are written under their file name
/// WHY: The operator finds <name>.webm in the output directory
#[tokio::test]
async fn given_segment_when_saving_then_file_written_in_output_dir() {
    // Given: A saver over a directory that does not exist yet
    let dir = tempfile::tempdir().unwrap();
    let saver = FileSaver::new(dir.path().join("clips"));

    // When: Saving a segment named "demo"
    let path = saver.save(&segment(Some("demo"), b"webm-bytes")).await.unwrap();

    // Then: clips/demo.webm holds the bytes
    assert_eq!(path, dir.path().join("clips").join("demo.webm"));
    assert_eq!(std::fs::read(&path).unwrap(), b"webm-bytes");
}

/// WHAT: A blank answer saves as capture.webm
/// WHY: Cancelling the prompt still keeps the recording
#[tokio::test]
async fn given_blank_answer_when_saving_then_capture_webm() {
    let dir = tempfile::tempdir().unwrap();
    let saver = FileSaver::new(dir.path().to_path_buf());

    let path = saver.save(&segment(Some(""), b"x")).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "capture.webm");
}

/// WHAT: Each preview replaces the previous one
/// WHY: Only the latest recording is previewed
#[tokio::test]
async fn given_two_segments_when_previewing_then_latest_replaces_prior() {
    // Given: A preview that does not launch a player
    let dir = tempfile::tempdir().unwrap();
    let preview = SystemPreview::new(dir.path().to_path_buf()).with_player(false);

    // When: Two recordings are previewed
    preview.show(&segment(None, b"first")).await.unwrap();
    preview.show(&segment(None, b"second")).await.unwrap();

    // Then: One preview file with the second recording
    assert_eq!(std::fs::read(preview.path()).unwrap(), b"second");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

/// WHAT: Without a terminal the configured default name is used
/// WHY: Desktop launches have nobody to answer a prompt
#[tokio::test]
async fn given_no_terminal_when_prompting_then_configured_default() {
    // Given: Test runs without an interactive stdin
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return;
    }
    let prompt = TerminalPrompt::new("standup".to_string());

    // When: Asked for a name
    let answer = prompt.file_name("capture").await;

    // Then: Configured default
    assert_eq!(answer.as_deref(), Some("standup"));
}

/// WHAT: An empty configured default defers to the caller's default
/// WHY: The name must never be empty
#[tokio::test]
async fn given_empty_configured_default_when_prompting_then_caller_default() {
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return;
    }
    let prompt = TerminalPrompt::new(String::new());

    let answer = prompt.file_name("capture").await;

    assert_eq!(answer.as_deref(), Some("capture"));
}

/// WHAT: An unanswered prompt gives up with the default name
/// WHY: Nobody at the terminal must not hold Stop or Exit hostage
#[tokio::test]
async fn given_unanswered_prompt_when_timeout_passes_then_default_name() {
    // Given: A reader that blocks until released and a short timeout
    let prompt =
        TerminalPrompt::new("standup".to_string()).with_timeout(Duration::from_millis(50));
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

    // When: Nobody answers
    let answer = prompt
        .read_answer("standup".to_string(), move || {
            let _ = release_rx.recv();
            None
        })
        .await;

    // Then: Default name, and the reader is let go
    assert_eq!(answer.as_deref(), Some("standup"));
    drop(release_tx);
}

/// WHAT: Typed names are trimmed, blank lines take the default
/// WHY: The answer line still carries its newline
#[tokio::test]
async fn given_typed_answer_when_reading_then_trimmed_name() {
    let prompt = TerminalPrompt::new(String::new());

    let typed = prompt
        .read_answer("capture".to_string(), || Some("  demo\n".to_string()))
        .await;
    let blank = prompt
        .read_answer("capture".to_string(), || Some("\n".to_string()))
        .await;

    assert_eq!(typed.as_deref(), Some("demo"));
    assert_eq!(blank.as_deref(), Some("capture"));
}
