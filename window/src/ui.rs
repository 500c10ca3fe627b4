// ui.rs - eframe app that drives the harness once per repaint

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use eframe::egui;
use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use program::{Harness, HarnessError, Surface};

use crate::exit_codes;

/// `Surface` over an egui painter. Program coordinates start at `rect.min`.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.rect.min.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn fill(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, color: Color32) {
        self.painter.line_segment([self.to_screen(from), self.to_screen(to)], Stroke::new(1.0, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect.translate(self.rect.min.to_vec2()), 0.0, color);
    }
}

/// Exit status shared by the window loop and the Ctrl-C handler.
#[derive(Debug, Clone)]
pub struct ExitState {
    code: Arc<AtomicI32>,
    interrupted: Arc<AtomicBool>,
}

impl ExitState {
    pub fn new() -> Self {
        Self {
            code: Arc::new(AtomicI32::new(exit_codes::OK)),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail(&self) {
        self.code.store(exit_codes::FAILURE, Ordering::SeqCst);
    }

    /// Called from the signal handler thread; the window closes on its next frame.
    pub fn interrupt(&self) {
        self.fail();
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn code(&self) -> i32 {
        self.code.load(Ordering::SeqCst)
    }
}

impl Default for ExitState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HarnessApp {
    harness: Harness,
    program: String,
    exit: ExitState,
    closing: bool,
}

impl HarnessApp {
    pub fn new(harness: Harness, program: String, exit: ExitState) -> Self {
        Self { harness, program, exit, closing: false }
    }

    fn close(&mut self, ctx: &egui::Context) {
        self.harness.stop();
        self.closing = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn fail(&mut self, ctx: &egui::Context, hook: &str, err: HarnessError) {
        tracing::error!(program = %self.program, "{hook} failed, exiting: {err}");
        self.exit.fail();
        self.close(ctx);
    }
}

impl eframe::App for HarnessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closing {
            return;
        }
        if self.exit.is_interrupted() {
            tracing::warn!(program = %self.program, "Interrupted, exiting.");
            self.close(ctx);
            return;
        }

        let keys: Vec<egui::Key> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, repeat: false, .. } => Some(*key),
                    _ => None,
                })
                .collect()
        });
        for key in keys {
            self.harness.key_pressed(key);
        }

        if let Err(err) = self.harness.update() {
            self.fail(ctx, "Update", err);
            return;
        }

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.harness.status_line());
                ui.separator();
                ui.label("Arrows: pan  Space: start  S: save");
            });
        });

        let drawn = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let painter = painter.with_clip_rect(response.rect);
                let mut surface = PainterSurface::new(&painter, response.rect);
                self.harness.draw(&mut surface)
            })
            .inner;
        if let Err(err) = drawn {
            self.fail(ctx, "Draw", err);
            return;
        }

        // Keep the loop running; the harness does its own pacing.
        ctx.request_repaint();
    }
}
