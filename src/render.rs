use crate::grid::GridSnapshot;
use eframe::egui::{Color32, Painter, Pos2, Rect, Rounding, Stroke, Vec2};

/// Presentation parameters for one activity grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub cell_size: f32,
    pub block_color: Color32,
    pub active_color: Color32,
    pub border_color: Color32,
    pub border_width: f32,
    pub background: Color32,
    pub highlight_background: Color32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            cell_size: 5.0,
            block_color: Color32::GRAY,
            active_color: Color32::from_rgb(0x00, 0x80, 0x00),
            border_color: Color32::BLACK,
            border_width: 1.0,
            background: Color32::from_rgb(0xA9, 0xA9, 0xA9),
            highlight_background: Color32::from_rgb(0xFC, 0x89, 0x74),
        }
    }
}

impl GridStyle {
    /// Scales every color's alpha, for the host's overall opacity setting.
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            cell_size: self.cell_size,
            block_color: fade(self.block_color, opacity),
            active_color: fade(self.active_color, opacity),
            border_color: fade(self.border_color, opacity),
            border_width: self.border_width,
            background: fade(self.background, opacity),
            highlight_background: fade(self.highlight_background, opacity),
        }
    }
}

fn fade(color: Color32, opacity: f32) -> Color32 {
    let alpha = (color.a() as f32 * opacity).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Pixel footprint of a grid: the cells plus the panel border and a one-pixel
/// rim on each axis.
pub fn panel_size(style: &GridStyle, columns: usize, rows: usize) -> Vec2 {
    Vec2::new(
        columns as f32 * style.cell_size + 2.0 * style.border_width + 2.0,
        rows as f32 * style.cell_size + 2.0 * style.border_width + 2.0,
    )
}

/// Paints a grid snapshot at `origin`. Pure function of snapshot and style;
/// nothing is retained between frames.
///
/// Each cell is a filled square of `cell_size - 1` pixels, leaving a one-pixel
/// gutter, with a one-pixel border stroke on top. The panel background shows
/// through the gutters and switches to the highlight color while the
/// snapshot's pulse flag is set.
pub fn paint_grid(painter: &Painter, origin: Pos2, snapshot: &GridSnapshot, style: &GridStyle) {
    let background = if snapshot.highlighted {
        style.highlight_background
    } else {
        style.background
    };
    let footprint = Rect::from_min_size(origin, panel_size(style, snapshot.columns, snapshot.rows));
    painter.rect_filled(footprint, Rounding::ZERO, background);

    let start = origin + Vec2::splat(style.border_width);
    let block = Vec2::splat(style.cell_size - 1.0);
    for row in 0..snapshot.rows {
        for col in 0..snapshot.columns {
            let index = row * snapshot.columns + col;
            let active = snapshot.cells.get(index).copied().unwrap_or(false);
            let min = Pos2::new(
                start.x + col as f32 * style.cell_size,
                start.y + row as f32 * style.cell_size,
            );
            let cell = Rect::from_min_size(min, block);
            let fill = if active {
                style.active_color
            } else {
                style.block_color
            };
            painter.rect_filled(cell, Rounding::ZERO, fill);
            painter.rect_stroke(cell, Rounding::ZERO, Stroke::new(1.0, style.border_color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_accounts_for_border_and_rim() {
        let style = GridStyle {
            cell_size: 12.0,
            ..GridStyle::default()
        };
        let size = panel_size(&style, 21, 6);
        assert_eq!(size.x, 21.0 * 12.0 + 2.0 + 2.0);
        assert_eq!(size.y, 6.0 * 12.0 + 2.0 + 2.0);
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let style = GridStyle::default().with_opacity(0.5);
        assert_eq!(style.active_color.r(), 0x00);
        assert_eq!(style.active_color.g(), 0x80);
        assert_eq!(style.active_color.a(), 128);
        assert_eq!(style.cell_size, GridStyle::default().cell_size);
    }
}
