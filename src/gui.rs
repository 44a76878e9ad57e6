use crate::panel::ActivityPanel;
use crate::render::{self, GridStyle};
use crate::settings::Settings;
use eframe::egui::{self, Color32, Frame, Rounding, Sense, Stroke, Vec2, ViewportCommand};
use std::time::{Duration, Instant};

/// Repaint cadence. Rendering is time-driven; grid mutations never push a
/// repaint, so this bounds worst-case visual latency to one frame interval.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Gap between the window edge and the panels, also used between panels.
const WINDOW_MARGIN: f32 = 5.0;

/// Accent border drawn around the whole overlay window.
const WINDOW_BORDER_COLOR: Color32 = Color32::from_rgb(0x74, 0xFC, 0xF8);
const WINDOW_BORDER_WIDTH: f32 = 5.0;

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

fn style_from(settings: &Settings, cell_size: f32) -> GridStyle {
    GridStyle {
        cell_size,
        block_color: rgb(settings.block_color),
        active_color: rgb(settings.active_color),
        border_color: rgb(settings.border_color),
        background: rgb(settings.background),
        highlight_background: rgb(settings.highlight_background),
        ..GridStyle::default()
    }
    .with_opacity(settings.opacity)
}

/// Frameless always-on-top window composing the CPU strip, the keyboard grid
/// and the mouse grid.
pub struct OverlayApp {
    settings: Settings,
    cpu: ActivityPanel,
    keyboard: ActivityPanel,
    mouse: ActivityPanel,
    paused: bool,
}

impl OverlayApp {
    pub fn new(settings: Settings) -> Self {
        let keyboard = ActivityPanel::keyboard(style_from(&settings, settings.keyboard_cell_size));
        let mouse = ActivityPanel::mouse(style_from(&settings, settings.mouse_cell_size));
        // The CPU strip draws without cell borders.
        let cpu_style = GridStyle {
            border_color: Color32::TRANSPARENT,
            ..style_from(&settings, settings.cpu_cell_size)
        };
        let cpu = ActivityPanel::cpu(cpu_style, settings.cpu_columns);

        Self {
            settings,
            cpu,
            keyboard,
            mouse,
            paused: false,
        }
    }

    /// CPU strip across the top, keyboard below it, mouse grid to the
    /// keyboard's right.
    fn panel_origins(&self) -> (Vec2, Vec2, Vec2) {
        let cpu_size = self.cpu.pixel_size();
        let keyboard_size = self.keyboard.pixel_size();

        let cpu = Vec2::new(WINDOW_MARGIN, WINDOW_MARGIN);
        let keyboard = Vec2::new(WINDOW_MARGIN, WINDOW_MARGIN + cpu_size.y + 1.0);
        let mouse = Vec2::new(
            WINDOW_MARGIN + keyboard_size.x + 2.0 * WINDOW_MARGIN,
            keyboard.y,
        );
        (cpu, keyboard, mouse)
    }

    pub fn window_size(&self) -> Vec2 {
        let (_, keyboard, mouse) = self.panel_origins();
        let keyboard_size = self.keyboard.pixel_size();
        let mouse_size = self.mouse.pixel_size();
        Vec2::new(
            mouse.x + mouse_size.x + WINDOW_MARGIN,
            keyboard.y + keyboard_size.y.max(mouse_size.y) + WINDOW_MARGIN,
        )
    }

    fn sync_pause_with_visibility(&mut self, ctx: &egui::Context) {
        if !self.settings.pause_when_hidden {
            return;
        }
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));
        if minimized == self.paused {
            return;
        }
        if minimized {
            self.cpu.pause();
            self.keyboard.pause();
            self.mouse.pause();
        } else {
            self.cpu.resume();
            self.keyboard.resume();
            self.mouse.resume();
        }
        self.paused = minimized;
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sync_pause_with_visibility(ctx);
        self.cpu.tick(now);
        self.keyboard.tick(now);
        self.mouse.tick(now);

        egui::CentralPanel::default()
            .frame(Frame::none())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(rect, egui::Id::new("overlay-drag"), Sense::drag());
                if response.drag_started() {
                    ctx.send_viewport_cmd(ViewportCommand::StartDrag);
                }

                let painter = ui.painter();
                let (cpu, keyboard, mouse) = self.panel_origins();
                render::paint_grid(painter, rect.min + cpu, &self.cpu.snapshot(), self.cpu.style());
                render::paint_grid(
                    painter,
                    rect.min + keyboard,
                    &self.keyboard.snapshot(),
                    self.keyboard.style(),
                );
                render::paint_grid(
                    painter,
                    rect.min + mouse,
                    &self.mouse.snapshot(),
                    self.mouse.style(),
                );
                painter.rect_stroke(
                    rect,
                    Rounding::ZERO,
                    Stroke::new(WINDOW_BORDER_WIDTH, WINDOW_BORDER_COLOR),
                );
            });

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_all_three_panels() {
        let app = OverlayApp::new(Settings::default());
        let size = app.window_size();
        let (cpu, keyboard, mouse) = app.panel_origins();

        assert!(cpu.y < keyboard.y);
        assert!(mouse.x > keyboard.x + app.keyboard.pixel_size().x);
        assert!(size.x >= mouse.x + app.mouse.pixel_size().x);
        assert!(size.y >= keyboard.y + app.keyboard.pixel_size().y);
    }
}
