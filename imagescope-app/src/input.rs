use eframe::egui;
use tracing::debug;

use imagescope_core::{GestureState, Point, WheelInput};

use crate::app::ImageScopeApp;

/// Keyboard shortcuts, collected first and applied after the input lock
/// is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Prev,
    Next,
    Select(usize),
    ZoomIn,
    ZoomOut,
    ToggleMinimap,
    ToggleHud,
    ToggleThumbnails,
    CloseWindows,
}

const NUMBER_KEYS: [egui::Key; 9] = [
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
    egui::Key::Num6,
    egui::Key::Num7,
    egui::Key::Num8,
    egui::Key::Num9,
];

/// Screen position relative to the canvas' top-left corner.
fn canvas_point(rect: egui::Rect, pos: egui::Pos2) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}

pub(crate) fn screen_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}

impl ImageScopeApp {
    /// Wheel zoom and grab-and-pull panning on the canvas.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        let rect = response.rect;

        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                // egui reports wheel-up as positive; the viewer zooms in on
                // negative deltas.
                viewer.wheel(
                    &mut self.surface,
                    WheelInput {
                        anchor: canvas_point(rect, pos),
                        delta_y: -(scroll_y as f64),
                    },
                );
            }
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            let press = ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press {
                viewer.pointer_down(&self.surface, canvas_point(rect, pos));
            }
        }

        if matches!(viewer.gesture(), GestureState::MainDrag(_)) {
            let latest = ctx.input(|i| i.pointer.latest_pos());
            match latest {
                Some(pos) if rect.contains(pos) => {
                    if response.dragged_by(egui::PointerButton::Primary) {
                        viewer.pointer_move(&mut self.surface, canvas_point(rect, pos));
                    }
                }
                _ => {
                    debug!("Pointer left the canvas during a drag");
                    viewer.pointer_leave(&self.surface);
                }
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            viewer.pointer_up(&self.surface);
        }
    }

    /// Window-scope pointer tracking for a live minimap drag: moves follow
    /// the pointer anywhere in the window, and a release or the pointer
    /// leaving the window ends the drag.
    pub(crate) fn handle_outer_pointer(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if !matches!(viewer.gesture(), GestureState::MinimapDrag(_)) {
            return;
        }

        let (latest, released) =
            ctx.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        match latest {
            Some(pos) => {
                viewer.outer_pointer_move(&mut self.surface, screen_point(pos));
                if released {
                    viewer.outer_pointer_up(&self.surface);
                }
            }
            None => {
                viewer.outer_pointer_leave(&self.surface);
            }
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        let actions: Vec<KeyAction> = ctx.input(|input| {
            let mut actions = Vec::new();
            if input.key_pressed(egui::Key::ArrowLeft) {
                actions.push(KeyAction::Prev);
            }
            if input.key_pressed(egui::Key::ArrowRight) {
                actions.push(KeyAction::Next);
            }
            if input.key_pressed(egui::Key::Plus) || input.key_pressed(egui::Key::Equals) {
                actions.push(KeyAction::ZoomIn);
            }
            if input.key_pressed(egui::Key::Minus) {
                actions.push(KeyAction::ZoomOut);
            }
            if input.key_pressed(egui::Key::M) {
                actions.push(KeyAction::ToggleMinimap);
            }
            if input.key_pressed(egui::Key::H) {
                actions.push(KeyAction::ToggleHud);
            }
            if input.key_pressed(egui::Key::T) {
                actions.push(KeyAction::ToggleThumbnails);
            }
            if input.key_pressed(egui::Key::Escape) {
                actions.push(KeyAction::CloseWindows);
            }
            for (i, key) in NUMBER_KEYS.iter().enumerate() {
                if input.key_pressed(*key) {
                    actions.push(KeyAction::Select(i));
                }
            }
            actions
        });

        for action in actions {
            match action {
                KeyAction::Prev => self.go_prev(),
                KeyAction::Next => self.go_next(),
                KeyAction::Select(index) => self.go_to(index),
                KeyAction::ZoomIn => self.zoom_in(),
                KeyAction::ZoomOut => self.zoom_out(),
                KeyAction::ToggleMinimap => self.toggle_minimap(),
                KeyAction::ToggleHud => self.show_hud = !self.show_hud,
                KeyAction::ToggleThumbnails => self.show_thumbnails = !self.show_thumbnails,
                KeyAction::CloseWindows => {
                    self.show_help = false;
                    self.show_about = false;
                }
            }
        }
    }
}
