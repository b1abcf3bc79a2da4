use eframe::egui;

use crate::app::ImageScopeApp;

const TOOLBAR_MARGIN: f32 = 8.0;

impl ImageScopeApp {
    pub(crate) fn show_top_right_toolbar(&mut self, ctx: &egui::Context) {
        use egui_material_icons::icons::*;

        let icon_on = egui::Color32::from_rgb(200, 200, 200);
        let icon_off = egui::Color32::from_rgb(90, 90, 90);
        let mi = |icon: &str| egui::RichText::new(icon).size(18.0).color(icon_on);
        let mi_state = |icon: &str, active: bool| {
            egui::RichText::new(icon)
                .size(18.0)
                .color(if active { icon_on } else { icon_off })
        };

        let cell = egui::vec2(26.0, 22.0);

        let add_icon_btn =
            |ui: &mut egui::Ui, label: egui::RichText, enabled: bool| -> egui::Response {
                ui.allocate_ui_with_layout(
                    cell,
                    egui::Layout::centered_and_justified(egui::Direction::TopDown),
                    |ui| ui.add_enabled(enabled, egui::Button::new(label).frame(false)),
                )
                .inner
            };

        let has_images = self.viewer.is_some();
        let multiple = self
            .viewer
            .as_ref()
            .is_some_and(|v| v.images().len() > 1);
        let (can_zoom_in, can_zoom_out) = self.viewer.as_ref().map_or((false, false), |v| {
            let scale = v.view_state().scale;
            (scale < v.limits().max_scale, scale > v.limits().min_scale)
        });

        let top_y = TOOLBAR_MARGIN + self.menu_bar_height;
        egui::Area::new(egui::Id::new("hud_toolbar"))
            .anchor(egui::Align2::RIGHT_TOP, [-TOOLBAR_MARGIN, top_y])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(4))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = 0.0;

                            if add_icon_btn(ui, mi(ICON_FOLDER_OPEN), true)
                                .on_hover_text("Open images")
                                .clicked()
                            {
                                self.open_images_dialog();
                            }
                            if add_icon_btn(ui, mi(ICON_ARROW_BACK), multiple)
                                .on_hover_text("Previous image (Left)")
                                .clicked()
                            {
                                self.go_prev();
                            }
                            if add_icon_btn(ui, mi(ICON_ARROW_FORWARD), multiple)
                                .on_hover_text("Next image (Right)")
                                .clicked()
                            {
                                self.go_next();
                            }
                            if add_icon_btn(ui, mi(ICON_ZOOM_OUT), has_images && can_zoom_out)
                                .on_hover_text("Zoom out (-)")
                                .clicked()
                            {
                                self.zoom_out();
                            }
                            if add_icon_btn(ui, mi(ICON_ZOOM_IN), has_images && can_zoom_in)
                                .on_hover_text("Zoom in (+)")
                                .clicked()
                            {
                                self.zoom_in();
                            }
                            if add_icon_btn(
                                ui,
                                mi_state(ICON_MAP, self.preferences.show_minimap),
                                true,
                            )
                            .on_hover_text("Minimap (M)")
                            .clicked()
                            {
                                self.toggle_minimap();
                            }
                            if add_icon_btn(ui, mi(ICON_HELP_OUTLINE), true)
                                .on_hover_text("Controls & shortcuts")
                                .clicked()
                            {
                                self.show_help = !self.show_help;
                            }
                        });
                    });
            });
    }
}
