// Viewport gate - nothing gets drawn until the terminal can hold the menu

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub height: u16,
    pub width: u16,
}

impl ViewportSize {
    pub fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Ok,
    TooSmall,
}

#[derive(Debug, Clone, Copy)]
pub struct ScreenGate {
    minimum: ViewportSize,
}

impl ScreenGate {
    /// 20x20 is roughly the smallest terminal the static menu chrome fits in.
    pub const MINIMUM: ViewportSize = ViewportSize {
        height: 20,
        width: 20,
    };

    pub fn new(minimum: ViewportSize) -> Self {
        Self { minimum }
    }

    pub fn check_size(&self, size: ViewportSize) -> GateStatus {
        if size.height < self.minimum.height || size.width < self.minimum.width {
            GateStatus::TooSmall
        } else {
            GateStatus::Ok
        }
    }
}

impl Default for ScreenGate {
    fn default() -> Self {
        Self::new(Self::MINIMUM)
    }
}
