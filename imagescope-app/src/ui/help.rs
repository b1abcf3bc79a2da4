use eframe::egui;

use crate::app::ImageScopeApp;

impl ImageScopeApp {
    pub(crate) fn show_help_window(&mut self, ctx: &egui::Context) {
        if !self.show_help {
            return;
        }

        let mut open = true;
        egui::Window::new("Controls & Shortcuts")
            .open(&mut open)
            .resizable(false)
            .default_width(320.0)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 210)),
            )
            .show(ctx, |ui| {
                ui.style_mut().visuals.override_text_color =
                    Some(egui::Color32::from_rgb(220, 220, 220));

                help_grid(
                    ui,
                    "Keyboard",
                    "help_kb",
                    &[
                        ("Left / Right", "Previous / next image"),
                        ("1 \u{2026} 9", "Jump to image"),
                        ("+ / -", "Zoom in / out"),
                        ("M", "Toggle minimap"),
                        ("H", "Toggle HUD"),
                        ("T", "Toggle thumbnail strip"),
                        ("Esc", "Close dialogs"),
                    ],
                );

                ui.add_space(8.0);
                help_grid(
                    ui,
                    "Mouse",
                    "help_mouse",
                    &[
                        ("Left drag", "Pan the image"),
                        ("Scroll wheel", "Zoom at cursor"),
                        ("Drag minimap frame", "Move the visible area"),
                    ],
                );

                ui.add_space(8.0);
                ui.heading("Toolbar icons");
                ui.add_space(2.0);
                {
                    use egui_material_icons::icons::*;
                    let icons: &[(&str, &str)] = &[
                        (ICON_FOLDER_OPEN, "Open images"),
                        (ICON_ARROW_BACK, "Previous image"),
                        (ICON_ARROW_FORWARD, "Next image"),
                        (ICON_ZOOM_OUT, "Zoom out"),
                        (ICON_ZOOM_IN, "Zoom in"),
                        (ICON_MAP, "Minimap (M)"),
                        (ICON_HELP_OUTLINE, "This help window"),
                    ];
                    egui::Grid::new("help_toolbar")
                        .num_columns(2)
                        .spacing([12.0, 2.0])
                        .show(ui, |ui| {
                            for &(k, d) in icons {
                                ui.label(
                                    egui::RichText::new(k)
                                        .size(18.0)
                                        .color(egui::Color32::WHITE),
                                );
                                ui.label(d);
                                ui.end_row();
                            }
                        });
                }
            });

        if !open {
            self.show_help = false;
        }
    }
}

fn help_grid(ui: &mut egui::Ui, heading: &str, id: &str, rows: &[(&str, &str)]) {
    ui.heading(heading);
    ui.add_space(2.0);
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for &(k, d) in rows {
                ui.label(egui::RichText::new(k).strong().color(egui::Color32::WHITE));
                ui.label(d);
                ui.end_row();
            }
        });
}
