use crate::core::geometry::PixelRect;

/// Fixed-grid sprite sheet: frame `n` sits at column `n % columns`,
/// row `n / columns`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    columns: u32,
    cell_size: u32,
}

impl SpriteSheet {
    /// Zero columns or cell size are bumped to 1.
    pub fn new(columns: u32, cell_size: u32) -> Self {
        Self {
            columns: columns.max(1),
            cell_size: cell_size.max(1),
        }
    }

    pub fn columns(&self) -> u32 { self.columns }

    pub fn cell_size(&self) -> u32 { self.cell_size }

    /// `(column, row)` of a frame.
    pub fn cell(&self, frame: u32) -> (u32, u32) {
        (frame % self.columns, frame / self.columns)
    }

    /// Source rectangle of a frame on the sheet, in pixels.
    pub fn source_rect(&self, frame: u32) -> PixelRect {
        let (col, row) = self.cell(frame);
        PixelRect {
            x: (col * self.cell_size) as i32,
            y: (row * self.cell_size) as i32,
            w: self.cell_size,
            h: self.cell_size,
        }
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new(16, 8)
    }
}
