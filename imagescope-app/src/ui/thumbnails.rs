use eframe::egui;

use crate::app::{ImageScopeApp, ImageSlot};

const THUMB_HEIGHT: f32 = 56.0;

impl ImageScopeApp {
    /// Bottom strip listing every image of the set. Decoded neighbours show
    /// their texture; the rest show their label.
    pub(crate) fn draw_thumbnail_strip(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.as_ref() else {
            self.thumbnail_strip_height = 0.0;
            return;
        };
        if !self.show_thumbnails || viewer.images().len() < 2 {
            self.thumbnail_strip_height = 0.0;
            return;
        }

        let current = viewer.current_index();
        let entries: Vec<(usize, String)> = viewer
            .images()
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.label.clone()))
            .collect();

        let mut clicked = None;
        let resp = egui::TopBottomPanel::bottom("thumbnail_strip").show(ctx, |ui| {
            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for (index, label) in &entries {
                        let selected = *index == current;
                        let response = match self.slots.get(index) {
                            Some(ImageSlot::Ready(img)) => {
                                let aspect =
                                    (img.intrinsic.width / img.intrinsic.height) as f32;
                                let size = egui::vec2(THUMB_HEIGHT * aspect, THUMB_HEIGHT);
                                ui.add(
                                    egui::Button::image(
                                        egui::Image::new((img.texture.id(), size)),
                                    )
                                    .selected(selected),
                                )
                            }
                            _ => ui.add_sized(
                                [THUMB_HEIGHT * 1.5, THUMB_HEIGHT],
                                egui::Button::new(label.as_str()).selected(selected),
                            ),
                        };
                        if response.on_hover_text(label.as_str()).clicked() {
                            clicked = Some(*index);
                        }
                    }
                });
            });
        });
        self.thumbnail_strip_height = resp.response.rect.height();

        if let Some(index) = clicked {
            self.go_to(index);
        }
    }
}
