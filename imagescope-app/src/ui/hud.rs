use eframe::egui;

use imagescope_core::{GestureState, ViewSurface};

use crate::app::{ImageScopeApp, ImageSlot, HUD_CORNER_RADIUS, HUD_MARGIN};

impl ImageScopeApp {
    pub(crate) fn show_hud(&mut self, ctx: &egui::Context) {
        let hud_alpha =
            (self.preferences.hud_panel_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;

        // -- Top-left: image and view info --
        if let Some(viewer) = self.viewer.as_ref() {
            let top_y = HUD_MARGIN + self.menu_bar_height;
            let source = viewer.current_source();
            let position = format!("{} / {}", viewer.current_index() + 1, viewer.images().len());
            let view = *viewer.view_state();
            let live = self.surface.scroll_offset();
            let gesture = viewer.gesture();
            let pending = viewer.is_view_pending();
            let dims = match self.current_slot() {
                Some(ImageSlot::Ready(img)) => {
                    format!("{} \u{00d7} {} px", img.intrinsic.width, img.intrinsic.height)
                }
                Some(ImageSlot::Loading) => "loading\u{2026}".to_string(),
                Some(ImageSlot::Failed(_)) => "unavailable".to_string(),
                None => "-".to_string(),
            };

            egui::Area::new(egui::Id::new("hud_info"))
                .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, top_y])
                .show(ctx, |ui| {
                    egui::Frame::NONE
                        .fill(egui::Color32::from_black_alpha(hud_alpha))
                        .inner_margin(egui::Margin::same(8))
                        .corner_radius(HUD_CORNER_RADIUS)
                        .show(ui, |ui| {
                            ui.style_mut().visuals.override_text_color =
                                Some(egui::Color32::from_rgb(220, 220, 220));

                            ui.label(
                                egui::RichText::new(&source.label)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            );
                            ui.label(format!("Image {position}  ({dims})"));
                            ui.label(format!("Zoom: {:.0}%", view.scale * 100.0));
                            ui.label(format!("Scroll: {:.0}, {:.0}", live.x, live.y));
                            if pending {
                                ui.colored_label(egui::Color32::YELLOW, "Waiting for layout");
                            } else if gesture != GestureState::Idle {
                                ui.colored_label(
                                    egui::Color32::from_rgb(100, 255, 100),
                                    format!("Dragging ({})", gesture.label()),
                                );
                            }
                        });
                });
        }

        // -- Minimap --
        if self.preferences.show_minimap {
            self.show_minimap_panel(ctx, hud_alpha);
        }

        // -- Top-right toolbar --
        self.show_top_right_toolbar(ctx);
    }
}
