mod segment;
mod sinks;

pub use {
    segment::{DEFAULT_FILE_STEM, FILE_EXTENSION, OutputSegment, resolve_file_stem},
    sinks::{FileNamePrompt, PreviewSurface, SegmentSaver},
};
