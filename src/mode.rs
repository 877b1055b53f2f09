use serde::Deserialize;

use crate::error::ModeError;

/// Width/height of the box in fixed mode, both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize {
    width: u32,
    height: u32,
}

impl FixedSize {
    pub const DEFAULT: FixedSize = FixedSize { width: 50, height: 40 };

    pub fn new(width: u32, height: u32) -> Result<Self, ModeError> {
        if width == 0 || height == 0 {
            return Err(ModeError::EmptyFixedSize { width, height });
        }
        Ok(FixedSize { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Integer half extents, as used for centering and bounds.
    pub(crate) fn halves(&self) -> (f64, f64) {
        (f64::from(self.width / 2), f64::from(self.height / 2))
    }

    /// What is left of the box past the anchor: the halves rounded up.
    pub(crate) fn far_halves(&self) -> (f64, f64) {
        (
            f64::from(self.width - self.width / 2),
            f64::from(self.height - self.height / 2),
        )
    }
}

impl Default for FixedSize {
    fn default() -> Self {
        FixedSize::DEFAULT
    }
}

/// How a drag turns into a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Corner to corner.
    #[default]
    Normal,
    /// The drag only moves a box of a given size around.
    Fixed(FixedSize),
}

impl SelectionMode {
    pub fn fixed(width: u32, height: u32) -> Result<Self, ModeError> {
        FixedSize::new(width, height).map(SelectionMode::Fixed)
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            SelectionMode::Normal => ModeKind::Normal,
            SelectionMode::Fixed(_) => ModeKind::Fixed,
        }
    }
}

/// Mode tag without dimensions, as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Normal,
    Fixed,
}
