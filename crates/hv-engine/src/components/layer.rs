/// Render layer: controls draw order for entities.
///
/// Layers are drawn back-to-front: Background first, UI last.
/// Within a layer, entities are grouped by atlas for batched rendering.
/// `UI` is special: its entities are positioned in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    Terrain = 1,
    #[default]
    Objects = 2,
    Foreground = 3,
    UI = 4,
}

impl RenderLayer {
    pub const COUNT: usize = 5;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Terrain),
            2 => Some(Self::Objects),
            3 => Some(Self::Foreground),
            4 => Some(Self::UI),
            _ => None,
        }
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether entities on this layer ignore the camera.
    pub fn is_screen_space(self) -> bool {
        self == Self::UI
    }
}
