//! ffmpeg command lines for grabbing, encoding and joining recordings.
//!
//! Everything here is pure so the exact arguments handed to ffmpeg can be
//! checked without spawning it.

use screen_clip_core::{CaptureDevice, StreamSource};

use std::path::{Path, PathBuf};

/// Container every segment is written in.
pub(crate) const WEBM_CONTAINER: &str = "video/webm";

/// Codecs the encoder can produce inside [`WEBM_CONTAINER`].
pub(crate) const SUPPORTED_CODECS: [&str; 2] = ["vp8", "opus"];

/// Video bitrate for screen content.
pub(crate) const VIDEO_BITRATE: &str = "2M";

const QUIET: [&str; 4] = ["-hide_banner", "-loglevel", "error", "-y"];

/// Which platform grab facility this build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabPlatform {
    /// X11 screen + PulseAudio.
    Linux,
    /// AVFoundation screen + audio in a single input.
    MacOs,
    /// GDI screen + DirectShow audio.
    Windows,
}

impl GrabPlatform {
    /// The platform this binary was built for, if it can grab the screen.
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "linux") {
            Some(GrabPlatform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(GrabPlatform::MacOs)
        } else if cfg!(target_os = "windows") {
            Some(GrabPlatform::Windows)
        } else {
            None
        }
    }

    /// Screen input, `display` overriding the platform default.
    pub fn video_device(self, display: Option<&str>) -> CaptureDevice {
        let (driver, default_name) = match self {
            GrabPlatform::Linux => ("x11grab", ":0.0"),
            GrabPlatform::MacOs => ("avfoundation", "Capture screen 0"),
            GrabPlatform::Windows => ("gdigrab", "desktop"),
        };

        CaptureDevice {
            driver: driver.to_string(),
            name: display.unwrap_or(default_name).to_string(),
        }
    }

    /// Audio input, `device` overriding the platform default.
    pub fn audio_device(self, device: Option<&str>) -> CaptureDevice {
        let (driver, name) = match (self, device) {
            (GrabPlatform::Linux, device) => ("pulse", device.unwrap_or("default").to_string()),
            (GrabPlatform::MacOs, device) => {
                ("avfoundation", device.unwrap_or("default").to_string())
            }
            (GrabPlatform::Windows, Some(device)) => ("dshow", format!("audio={}", device)),
            (GrabPlatform::Windows, None) => ("dshow", "audio=virtual-audio-capturer".to_string()),
        };

        CaptureDevice {
            driver: driver.to_string(),
            name,
        }
    }
}

/// Whether `mime_type` names webm with only codecs we can encode.
///
/// Accepts `video/webm` and `video/webm;codecs=vp8,opus` style values.
pub fn is_supported_mime(mime_type: &str) -> bool {
    let mut parts = mime_type.split(';').map(str::trim);

    if !parts
        .next()
        .is_some_and(|container| container.eq_ignore_ascii_case(WEBM_CONTAINER))
    {
        return false;
    }

    parts.all(|param| match param.split_once('=') {
        Some((key, codecs)) if key.trim().eq_ignore_ascii_case("codecs") => codecs
            .trim_matches('"')
            .split(',')
            .map(str::trim)
            .all(|codec| SUPPORTED_CODECS.contains(&codec)),
        _ => false,
    })
}

/// Input arguments for the devices in `source`.
///
/// AVFoundation takes screen and audio as one `video:audio` input; the other
/// platforms get one `-f` input per device.
pub fn input_args(source: &StreamSource) -> Vec<String> {
    let video = &source.video;
    let frame_rate = source.frame_rate.to_string();

    match &source.audio {
        Some(audio) if video.driver == "avfoundation" && audio.driver == "avfoundation" => {
            vec![
                "-f".to_string(),
                video.driver.clone(),
                "-framerate".to_string(),
                frame_rate,
                "-i".to_string(),
                format!("{}:{}", video.name, audio.name),
            ]
        }
        audio => {
            let mut args = vec![
                "-f".to_string(),
                video.driver.clone(),
                "-framerate".to_string(),
                frame_rate,
                "-i".to_string(),
                video.name.clone(),
            ];
            if let Some(audio) = audio {
                args.extend([
                    "-f".to_string(),
                    audio.driver.clone(),
                    "-i".to_string(),
                    audio.name.clone(),
                ]);
            }
            args
        }
    }
}

/// Grab one frame and discard it, to find out whether the devices open.
pub fn probe_args(source: &StreamSource) -> Vec<String> {
    let mut args: Vec<String> = QUIET.iter().map(ToString::to_string).collect();
    args.extend(input_args(source));
    args.extend(["-frames:v", "1", "-f", "null", "-"].map(String::from));
    args
}

/// Record one run of the session into `output` as VP8 (+ Opus) webm.
pub fn segment_args(source: &StreamSource, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = QUIET.iter().map(ToString::to_string).collect();
    args.extend(input_args(source));
    args.extend(
        [
            "-c:v",
            "libvpx",
            "-deadline",
            "realtime",
            "-cpu-used",
            "8",
            "-b:v",
            VIDEO_BITRATE,
        ]
        .map(String::from),
    );
    if source.audio.is_some() {
        args.extend(["-c:a", "libopus"].map(String::from));
    } else {
        args.push("-an".to_string());
    }
    args.extend(["-f", "webm"].map(String::from));
    args.push(output.to_string_lossy().into_owned());
    args
}

/// Concat demuxer list naming every part in order.
pub fn concat_list(parts: &[PathBuf]) -> String {
    parts
        .iter()
        .map(|part| {
            let path = part.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", path)
        })
        .collect()
}

/// Join the parts listed in `list` into `output` without re-encoding.
pub fn concat_args(list: &Path, output: &Path) -> Vec<String> {
    let mut args: Vec<String> = QUIET.iter().map(ToString::to_string).collect();
    args.extend(["-f", "concat", "-safe", "0", "-i"].map(String::from));
    args.push(list.to_string_lossy().into_owned());
    args.extend(["-c", "copy"].map(String::from));
    args.push(output.to_string_lossy().into_owned());
    args
}
