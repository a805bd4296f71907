use screen_clip_core::ControlsState;

/// Edge length of the generated tray icon, in pixels.
pub(crate) const ICON_SIZE: u32 = 32;

/// Tray icon states, one per recording lamp colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready to record, lamp off.
    Idle,
    /// Recording, lamp lit.
    Recording,
    /// Paused, lamp dimmed.
    Paused,
}

impl TrayIconState {
    /// Lamp state for a set of controls. Widgets without a lamp stay idle.
    pub fn from_controls(controls: &ControlsState) -> Self {
        match (controls.indicator_visible, controls.paused) {
            (false, _) => TrayIconState::Idle,
            (true, false) => TrayIconState::Recording,
            (true, true) => TrayIconState::Paused,
        }
    }

    /// Tooltip prefix shown before the timer.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::Idle => "Screen Clip - Ready",
            TrayIconState::Recording => "Screen Clip - Recording",
            TrayIconState::Paused => "Screen Clip - Paused",
        }
    }

    /// Lamp colour as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            TrayIconState::Idle => [0x80, 0x80, 0x80],
            TrayIconState::Recording => [0xe0, 0x1b, 0x24],
            TrayIconState::Paused => [0xf5, 0xa6, 0x23],
        }
    }

    /// A filled circle in the lamp colour on a transparent square, as RGBA.
    pub fn rgba(self) -> Vec<u8> {
        let [r, g, b] = self.color();
        let center = (ICON_SIZE as f32 - 1.0) / 2.0;
        let radius = ICON_SIZE as f32 / 2.0 - 2.0;

        let mut pixels = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let alpha = if dx * dx + dy * dy <= radius * radius {
                    0xff
                } else {
                    0x00
                };
                pixels.extend_from_slice(&[r, g, b, alpha]);
            }
        }
        pixels
    }
}
