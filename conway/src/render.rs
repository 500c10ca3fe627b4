// render.rs - Turns the grid and camera into draw calls

use egui::{Color32, Rect, Vec2, pos2};
use program::DrawOp;

use crate::grid::Grid;

pub const GRID_SCALE: f32 = 10.0;                 // Pixel width of a cell

/// Pan offset in pixels. Positive values move the view right/down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Camera {
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.pan_x += dx;
        self.pan_y += dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub scale: f32,
    pub background: Option<Color32>,
    pub line_color: Color32,
    pub cell_color: Color32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            scale: GRID_SCALE,
            background: None,
            line_color: Color32::from_gray(200),
            cell_color: Color32::from_rgb(40, 40, 40),
        }
    }
}

/// Inclusive cell range covering `[pan, pan + extent]`, clipped to the grid.
fn visible_cells(pan: f32, extent: f32, scale: f32, size: usize) -> std::ops::RangeInclusive<i64> {
    let first = (pan / scale).floor() as i64;
    let last = ((pan + extent) / scale).floor() as i64;
    first.max(0)..=last.min(size as i64 - 1)
}

/// Line positions along one axis: every `scale` pixels, shifted by the pan.
fn line_offsets(pan: f32, extent: f32, scale: f32) -> impl Iterator<Item = f32> {
    let shift = pan.rem_euclid(scale);
    let first = if shift == 0.0 { 0.0 } else { scale - shift };
    (0..)
        .map(move |k| first + k as f32 * scale)
        .take_while(move |&offset| offset <= extent)
}

pub fn plan(grid: &Grid, camera: Camera, viewport: Vec2, style: &RenderStyle) -> Vec<DrawOp> {
    let scale = style.scale;
    let mut ops = Vec::new();

    if let Some(color) = style.background {
        ops.push(DrawOp::Fill(color));
    }

    for x in line_offsets(camera.pan_x, viewport.x, scale) {
        ops.push(DrawOp::Line { from: pos2(x, 0.0), to: pos2(x, viewport.y), color: style.line_color });
    }
    for y in line_offsets(camera.pan_y, viewport.y, scale) {
        ops.push(DrawOp::Line { from: pos2(0.0, y), to: pos2(viewport.x, y), color: style.line_color });
    }

    let columns = visible_cells(camera.pan_x, viewport.x, scale, grid.size());
    let rows = visible_cells(camera.pan_y, viewport.y, scale, grid.size());
    for cx in columns {
        for cy in rows.clone() {
            if !grid.is_alive(cx, cy) {
                continue;
            }
            let min = pos2(cx as f32 * scale - camera.pan_x, cy as f32 * scale - camera.pan_y);
            ops.push(DrawOp::FillRect {
                rect: Rect::from_min_size(min, Vec2::splat(scale)),
                color: style.cell_color,
            });
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, cells: &[(i64, i64)]) -> Grid {
        let mut grid = Grid::new(size);
        for &(x, y) in cells {
            grid.set_cell(x, y, true).unwrap();
        }
        grid
    }

    fn lines(ops: &[DrawOp]) -> (Vec<f32>, Vec<f32>) {
        let mut vertical = Vec::new();
        let mut horizontal = Vec::new();
        for op in ops {
            if let DrawOp::Line { from, to, .. } = op {
                if from.x == to.x {
                    vertical.push(from.x);
                } else {
                    horizontal.push(from.y);
                }
            }
        }
        (vertical, horizontal)
    }

    fn rects(ops: &[DrawOp]) -> Vec<Rect> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn gridlines_every_scale_pixels() {
        let grid = Grid::new(10);
        let ops = plan(&grid, Camera::default(), Vec2::new(50.0, 30.0), &RenderStyle::default());
        let (vertical, horizontal) = lines(&ops);
        assert_eq!(vertical, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(horizontal, vec![0.0, 10.0, 20.0, 30.0]);
        assert!(rects(&ops).is_empty());
    }

    #[test]
    fn pan_shifts_lines_and_cells() {
        let grid = grid_with(10, &[(0, 0), (4, 2)]);
        let camera = Camera { pan_x: 15.0, pan_y: 0.0 };
        let ops = plan(&grid, camera, Vec2::new(50.0, 30.0), &RenderStyle::default());

        let (vertical, _) = lines(&ops);
        assert_eq!(vertical, vec![5.0, 15.0, 25.0, 35.0, 45.0]);

        let rects = rects(&ops);
        assert_eq!(rects, vec![Rect::from_min_size(pos2(25.0, 20.0), Vec2::splat(10.0))]);
    }

    #[test]
    fn negative_pan_clips_to_grid() {
        let grid = grid_with(3, &[(0, 0), (2, 2)]);
        let camera = Camera { pan_x: -20.0, pan_y: -20.0 };
        let ops = plan(&grid, camera, Vec2::new(100.0, 100.0), &RenderStyle::default());
        let rects = rects(&ops);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].min, pos2(20.0, 20.0));
        assert_eq!(rects[1].min, pos2(40.0, 40.0));
    }

    #[test]
    fn background_first_when_configured() {
        let grid = Grid::new(2);
        let style = RenderStyle { background: Some(Color32::WHITE), ..RenderStyle::default() };
        let ops = plan(&grid, Camera::default(), Vec2::new(10.0, 10.0), &style);
        assert_eq!(ops[0], DrawOp::Fill(Color32::WHITE));
    }

    #[test]
    fn cells_sized_by_scale() {
        let grid = grid_with(4, &[(1, 1)]);
        let style = RenderStyle { scale: 25.0, ..RenderStyle::default() };
        let ops = plan(&grid, Camera::default(), Vec2::new(100.0, 100.0), &style);
        assert_eq!(rects(&ops), vec![Rect::from_min_size(pos2(25.0, 25.0), Vec2::splat(25.0))]);
    }
}
