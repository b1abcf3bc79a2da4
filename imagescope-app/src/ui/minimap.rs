use eframe::egui;

use imagescope_core::{GestureState, ViewSurface};

use crate::app::{ImageScopeApp, HUD_MARGIN};
use crate::input::screen_point;

impl ImageScopeApp {
    /// Bottom-right preview of the whole image with the draggable viewport
    /// indicator. Drag moves are tracked at window scope by
    /// `handle_outer_pointer`; this only starts the drag.
    pub(crate) fn show_minimap_panel(&mut self, ctx: &egui::Context, hud_alpha: u8) {
        let Some(img) = self.current_image() else {
            return;
        };
        let texture_id = img.texture.id();
        let Some(image_size) = self.surface.minimap_image_size() else {
            return;
        };
        let side = self.preferences.minimap_size.side_points();
        let opacity = self.preferences.minimap_opacity.clamp(0.0, 1.0);
        let panel_alpha = (hud_alpha as f32 * opacity).round() as u8;
        let image_alpha = (255.0 * opacity).round() as u8;
        let dragging = self
            .viewer
            .as_ref()
            .is_some_and(|v| matches!(v.gesture(), GestureState::MinimapDrag(_)));

        let bottom = HUD_MARGIN + self.thumbnail_strip_height;
        egui::Area::new(egui::Id::new("hud_minimap"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-HUD_MARGIN, -bottom])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(panel_alpha))
                    .inner_margin(egui::Margin::ZERO)
                    .corner_radius(0.0)
                    .show(ui, |ui| {
                        // Claims the whole box so presses here never reach the canvas.
                        let (rect, _response) =
                            ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click_and_drag());
                        let image_rect = egui::Rect::from_center_size(
                            rect.center(),
                            egui::vec2(image_size.width as f32, image_size.height as f32),
                        );
                        let painter = ui.painter().with_clip_rect(rect);

                        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        painter.image(
                            texture_id,
                            image_rect,
                            uv,
                            egui::Color32::from_white_alpha(image_alpha),
                        );

                        let Some(viewer) = self.viewer.as_mut() else {
                            return;
                        };
                        if let Some(geom) = viewer.preview_viewport_geometry(&self.surface) {
                            let indicator = egui::Rect::from_min_size(
                                image_rect.min + egui::vec2(geom.left as f32, geom.top as f32),
                                egui::vec2(geom.width as f32, geom.height as f32),
                            );
                            let handle = ui.interact(
                                indicator.intersect(rect),
                                egui::Id::new("minimap_indicator"),
                                egui::Sense::drag(),
                            );
                            if handle.drag_started_by(egui::PointerButton::Primary) {
                                let press = ctx
                                    .input(|i| i.pointer.press_origin())
                                    .or_else(|| handle.interact_pointer_pos());
                                if let Some(pos) = press {
                                    viewer.minimap_pointer_down(&self.surface, screen_point(pos));
                                }
                            }
                            if dragging {
                                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                            } else if handle.hovered() {
                                ctx.set_cursor_icon(egui::CursorIcon::Grab);
                            }

                            let fill_alpha = if dragging { 60 } else { 24 };
                            painter.rect_filled(
                                indicator,
                                0.0,
                                egui::Color32::from_rgba_unmultiplied(0, 255, 255, fill_alpha),
                            );
                            painter.rect_stroke(
                                indicator,
                                0.0,
                                egui::Stroke::new(1.5, egui::Color32::from_rgb(0, 255, 255)),
                                egui::StrokeKind::Inside,
                            );
                        }

                        ui.painter().rect_stroke(
                            rect,
                            0.0,
                            egui::Stroke::new(1.0, egui::Color32::from_white_alpha(191)),
                            egui::StrokeKind::Outside,
                        );
                    });
            });
    }
}
