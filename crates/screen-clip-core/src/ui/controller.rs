use crate::{
    CaptureProvider, CaptureRequest, ClipError, ControlSurface, ControlsState, DEFAULT_FILE_STEM,
    DEFAULT_FRAME_RATE, EncoderFactory, EncoderOptions, FileNamePrompt, OutputSegment,
    PreviewSurface, RecorderAdapter, RecorderEvent, RecorderState, SegmentSaver, UiCommand,
    WidgetOptions,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Collaborators that receive a finished segment.
#[derive(Clone)]
pub struct OutputSinks {
    /// Asks for the file name.
    pub prompt: Arc<dyn FileNamePrompt>,
    /// Writes the file.
    pub saver: Arc<dyn SegmentSaver>,
    /// Shows the preview.
    pub preview: Arc<dyn PreviewSurface>,
}

/// Binds operator controls to capture, recorder and tracker.
///
/// The enabled/disabled pattern it publishes is derived from the recorder
/// state alone, so the controls can never drift from what the recorder
/// will accept.
pub struct UiController {
    options: WidgetOptions,
    include_audio: bool,
    frame_rate: u32,
    encoder_options: EncoderOptions,
    capture: Arc<dyn CaptureProvider>,
    recorder: RecorderAdapter,
    events: mpsc::UnboundedReceiver<RecorderEvent>,
    display: watch::Receiver<String>,
    stream_ended: Option<watch::Receiver<bool>>,
    surface: Box<dyn ControlSurface>,
    outputs: OutputSinks,
}

impl UiController {
    /// Create a controller and paint the idle controls onto `surface`.
    pub fn new(
        capture: Arc<dyn CaptureProvider>,
        encoders: Arc<dyn EncoderFactory>,
        surface: Box<dyn ControlSurface>,
        outputs: OutputSinks,
        options: WidgetOptions,
    ) -> Self {
        let (recorder, events) = RecorderAdapter::new(encoders);
        let display = recorder.subscribe_display();

        let mut controller = Self {
            options,
            include_audio: false,
            frame_rate: DEFAULT_FRAME_RATE,
            encoder_options: EncoderOptions::default(),
            capture,
            recorder,
            events,
            display,
            stream_ended: None,
            surface,
            outputs,
        };

        controller.surface.set_include_audio(false);
        controller.refresh_view();
        controller
    }

    /// Initial state of the audio checkbox.
    pub fn with_include_audio(mut self, include_audio: bool) -> Self {
        self.set_include_audio(include_audio);
        self
    }

    /// Frame rate requested from the capture provider.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Container/codec requested from the encoder.
    pub fn with_encoder_options(mut self, encoder_options: EncoderOptions) -> Self {
        self.encoder_options = encoder_options;
        self
    }

    /// Recorder state.
    pub fn state(&self) -> RecorderState {
        self.recorder.state()
    }

    /// Recording or paused.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Whether the next recording will capture audio.
    pub fn include_audio(&self) -> bool {
        self.include_audio
    }

    /// Pause-aware elapsed time of the current recording.
    pub fn elapsed(&self) -> Duration {
        self.recorder.elapsed()
    }

    /// Controls as currently published.
    pub fn controls(&self) -> ControlsState {
        ControlsState::for_state(self.recorder.state(), &self.options)
    }

    /// Run until `Shutdown` arrives or every command sender is gone.
    ///
    /// An active recording is ended and pending segments are delivered
    /// before returning.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut commands: mpsc::Receiver<UiCommand>) {
        info!("Widget controller running");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(UiCommand::Shutdown) | None => {
                            info!("Widget controller shutting down");
                            break;
                        }
                        Some(command) => self.handle_command(command).await,
                    }
                }

                Some(event) = self.events.recv() => {
                    self.handle_event(event).await;
                }

                () = external_end(&mut self.stream_ended) => {
                    info!("Capture ended outside the widget, stopping");
                    self.stop().await;
                }

                Ok(()) = self.display.changed() => {
                    let text = self.display.borrow_and_update().clone();
                    self.surface.set_timer_text(&text);
                }
            }
        }

        self.stop().await;
        self.drain_events().await;
    }

    /// Dispatch one operator command.
    pub async fn handle_command(&mut self, command: UiCommand) {
        debug!(?command, "Handling command");

        match command {
            UiCommand::Start => self.start().await,
            UiCommand::Stop | UiCommand::Shutdown => self.stop().await,
            UiCommand::PauseResume => self.toggle_pause().await,
            UiCommand::ToggleRecording => self.toggle_recording().await,
            UiCommand::SetIncludeAudio(include_audio) => self.set_include_audio(include_audio),
        }
    }

    /// Acquire a stream and start recording.
    ///
    /// Ignored while a recording is active. Acquisition or encoder
    /// failures raise one alert and leave the controls as they were.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        if !self.recorder.state().can_begin() {
            debug!(state = %self.recorder.state(), "Start ignored");
            return;
        }

        if !self.capture.is_supported() {
            let e = ClipError::UnsupportedCapture {
                location: ErrorLocation::from(Location::caller()),
            };
            error!(error = ?e, "Screen capture unavailable");
            self.surface.alert(&e.user_message());
            return;
        }

        let request = CaptureRequest::new(self.frame_rate, self.include_audio);

        let stream = match self.capture.acquire(&request).await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = ?e, "Error accessing media devices");
                self.surface.alert(&format!(
                    "An error occurred while accessing your screen or audio: {}",
                    e.user_message()
                ));
                return;
            }
        };

        let ended = stream.on_ended();

        match self
            .recorder
            .begin(stream, self.encoder_options.clone())
            .await
        {
            Ok(()) => self.stream_ended = Some(ended),
            Err(e) => {
                error!(error = ?e, "Failed to start recording");
                self.surface.alert(&e.user_message());
            }
        }

        self.refresh_view();
    }

    /// Stop recording. Calling it again, or with nothing recording, is a no-op.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) {
        self.stream_ended = None;

        if !self.recorder.is_recording() {
            debug!(state = %self.recorder.state(), "Stop ignored");
            return;
        }

        if let Err(e) = self.recorder.end().await {
            error!(error = ?e, "Recording did not finish cleanly");
            self.surface.alert(&e.user_message());
        }

        self.refresh_view();
    }

    /// Pause when recording, resume when paused.
    #[instrument(skip(self))]
    pub async fn toggle_pause(&mut self) {
        if let Err(e) = self.recorder.pause_or_resume().await {
            error!(error = ?e, "Failed to pause or resume");
            self.surface.alert(&e.user_message());
        }

        self.refresh_view();
    }

    /// Shortcut handler: start when idle, stop when recording or paused.
    #[instrument(skip(self))]
    pub async fn toggle_recording(&mut self) {
        if !self.options.shortcut_enabled {
            debug!("Shortcut disabled for this widget");
            return;
        }

        if self.recorder.is_recording() {
            self.stop().await;
        } else {
            self.start().await;
        }
    }

    /// Audio checkbox; applies to the next recording.
    pub fn set_include_audio(&mut self, include_audio: bool) {
        self.include_audio = include_audio;
        self.surface.set_include_audio(include_audio);
        debug!(include_audio, "Audio capture toggled");
    }

    /// Name, save and preview a finished segment.
    #[instrument(skip_all)]
    pub async fn handle_event(&mut self, event: RecorderEvent) {
        match event {
            RecorderEvent::SegmentReady {
                session_id,
                blob,
                elapsed,
            } => {
                let answer = self.outputs.prompt.file_name(DEFAULT_FILE_STEM).await;
                let segment = OutputSegment::new(session_id, blob, answer.as_deref(), elapsed);

                match self.outputs.saver.save(&segment).await {
                    Ok(path) => info!(
                        session_id = %session_id,
                        path = ?path,
                        elapsed_ms = elapsed.as_millis(),
                        "Segment saved"
                    ),
                    Err(e) => {
                        error!(session_id = %session_id, error = ?e, "Failed to save segment");
                        self.surface.alert(&e.user_message());
                    }
                }

                if let Err(e) = self.outputs.preview.show(&segment).await {
                    warn!(session_id = %session_id, error = ?e, "Failed to show preview");
                }
            }
        }
    }

    /// Deliver every segment already waiting on the event channel.
    pub async fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event).await;
        }
    }

    fn refresh_view(&mut self) {
        let controls = self.controls();
        self.surface.apply_controls(&controls);

        let text = self.display.borrow_and_update().clone();
        self.surface.set_timer_text(&text);
    }
}

async fn external_end(stream_ended: &mut Option<watch::Receiver<bool>>) {
    if let Some(ended) = stream_ended {
        let fired = ended.wait_for(|ended| *ended).await.is_ok();
        if fired {
            return;
        }
    }

    std::future::pending::<()>().await
}
