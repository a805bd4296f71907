mod provider;
mod stream;

pub use provider::{CaptureProvider, CaptureRequest, DEFAULT_FRAME_RATE, VideoConstraints};
pub use stream::{
    CaptureDevice, CaptureStream, MediaTrack, StreamSource, TrackEndedHandle, TrackKind,
};
