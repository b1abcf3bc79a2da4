use eframe::egui;

use crate::app::ImageScopeApp;
use crate::preferences::MinimapSize;

impl ImageScopeApp {
    /// Draw the top menu bar. Must be called **before** `CentralPanel` so that
    /// `egui` reserves vertical space for it.
    pub(crate) fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        let resp = egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                self.menu_file(ui, ctx);
                self.menu_view(ui);
                self.menu_help(ui);
            });
        });
        self.menu_bar_height = resp.response.rect.height();
    }

    fn menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open Images\u{2026}").clicked() {
                ui.close();
                self.open_images_dialog();
            }
            if ui.button("Open Sample Images").clicked() {
                ui.close();
                self.open_bundled_samples();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.close();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn menu_view(&mut self, ui: &mut egui::Ui) {
        let has_images = self.viewer.is_some();
        ui.menu_button("View", |ui| {
            if ui
                .add_enabled(has_images, shortcut_item("Previous Image", "Left"))
                .clicked()
            {
                ui.close();
                self.go_prev();
            }
            if ui
                .add_enabled(has_images, shortcut_item("Next Image", "Right"))
                .clicked()
            {
                ui.close();
                self.go_next();
            }
            ui.separator();
            if ui
                .add_enabled(has_images, shortcut_item("Zoom In", "+"))
                .clicked()
            {
                ui.close();
                self.zoom_in();
            }
            if ui
                .add_enabled(has_images, shortcut_item("Zoom Out", "-"))
                .clicked()
            {
                ui.close();
                self.zoom_out();
            }
            ui.separator();
            if ui
                .add(shortcut_item(
                    if self.show_hud { "Hide HUD" } else { "Show HUD" },
                    "H",
                ))
                .clicked()
            {
                ui.close();
                self.show_hud = !self.show_hud;
            }
            if ui
                .add(shortcut_item(
                    if self.preferences.show_minimap {
                        "Hide Minimap"
                    } else {
                        "Show Minimap"
                    },
                    "M",
                ))
                .clicked()
            {
                ui.close();
                self.toggle_minimap();
            }
            if ui
                .add(shortcut_item(
                    if self.show_thumbnails {
                        "Hide Thumbnails"
                    } else {
                        "Show Thumbnails"
                    },
                    "T",
                ))
                .clicked()
            {
                ui.close();
                self.show_thumbnails = !self.show_thumbnails;
            }
            ui.menu_button("Minimap Size", |ui| {
                for (size, label) in [
                    (MinimapSize::Small, "Small"),
                    (MinimapSize::Medium, "Medium"),
                    (MinimapSize::Large, "Large"),
                ] {
                    if ui
                        .radio(self.preferences.minimap_size == size, label)
                        .clicked()
                    {
                        ui.close();
                        self.preferences.minimap_size = size;
                        self.preferences.save();
                    }
                }
            });
        });
    }

    fn menu_help(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Help", |ui| {
            if ui.button("Keyboard Shortcuts").clicked() {
                ui.close();
                self.show_help = true;
            }
            ui.separator();
            if ui.button("About ImageScope").clicked() {
                ui.close();
                self.show_about = true;
            }
        });
    }

    pub(crate) fn draw_about_window(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut open = true;
        egui::Window::new("About ImageScope")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(4.0);
                    ui.heading(
                        egui::RichText::new("ImageScope")
                            .strong()
                            .color(egui::Color32::from_rgb(80, 200, 255)),
                    );
                    ui.add_space(4.0);
                    ui.label("Pan and zoom large images with a live minimap.");
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .color(egui::Color32::from_rgb(160, 160, 160)),
                    );
                    ui.add_space(4.0);
                });
            });
        if !open {
            self.show_about = false;
        }
    }
}

/// Build a `Button` with a right-aligned keyboard shortcut hint.
fn shortcut_item(label: &str, shortcut: &str) -> egui::Button<'static> {
    let text = format!("{label}    {shortcut}");
    egui::Button::new(egui::RichText::new(text).size(13.0)).wrap_mode(egui::TextWrapMode::Extend)
}
