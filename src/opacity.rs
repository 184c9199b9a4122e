use ratatui::style::Color;

pub const MIN_OPACITY: u8 = 10;
pub const MAX_OPACITY: u8 = 100;
pub const OPACITY_STEP: u8 = 10;

/// Overlay fill before opacity is applied
const FILL_RGB: (u8, u8, u8) = (30, 30, 30);

/// Overlay opacity as a percentage in [10, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opacity(u8);

impl Default for Opacity {
    fn default() -> Self {
        Self(80)
    }
}

impl Opacity {
    pub fn new(percent: u8) -> Self {
        Self(percent.clamp(MIN_OPACITY, MAX_OPACITY))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn set(&mut self, percent: u8) {
        *self = Self::new(percent);
    }

    pub fn step_up(&mut self) {
        self.set(self.0.saturating_add(OPACITY_STEP));
    }

    pub fn step_down(&mut self) {
        self.set(self.0.saturating_sub(OPACITY_STEP));
    }

    /// Fill alpha, truncated: 80% -> 204
    pub fn alpha(&self) -> u8 {
        (255 * u32::from(self.0) / 100) as u8
    }

    /// The fill colour composited over a black terminal at this opacity.
    pub fn background(&self) -> Color {
        let alpha = u32::from(self.alpha());
        let blend = |c: u8| (u32::from(c) * alpha / 255) as u8;
        Color::Rgb(blend(FILL_RGB.0), blend(FILL_RGB.1), blend(FILL_RGB.2))
    }

    /// Text gets dimmed once the overlay is mostly see-through.
    pub fn dims_text(&self) -> bool {
        self.0 < 50
    }

    pub fn ratio(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}
