// surface.rs - Drawing primitives handed to a program's draw hook

use egui::{Color32, Pos2, Rect, Vec2};

/// One primitive draw call. Coordinates are relative to the surface's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Fill(Color32),
    Line { from: Pos2, to: Pos2, color: Color32 },
    FillRect { rect: Rect, color: Color32 },
}

/// A drawing target. The window backend implements this over its painter.
pub trait Surface {
    fn size(&self) -> Vec2;

    fn fill(&mut self, color: Color32);

    fn line(&mut self, from: Pos2, to: Pos2, color: Color32);

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    fn apply(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Fill(color)               => self.fill(color),
            DrawOp::Line { from, to, color }  => self.line(from, to, color),
            DrawOp::FillRect { rect, color }  => self.fill_rect(rect, color),
        }
    }

    fn apply_all(&mut self, ops: &[DrawOp]) {
        for op in ops {
            self.apply(op);
        }
    }
}

/// Keeps every draw call in order. Used headless and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Vec2,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width, height), ops: Vec::new() }
    }

    pub fn filled_rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect { rect, .. } => Some(rect),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill(&mut self, color: Color32) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }
}
