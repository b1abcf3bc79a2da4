use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui;
use tracing::{error, info, warn};

use imagescope_core::{GestureState, Size, ViewSurface, Viewer};

use crate::io_worker::{IoRequest, IoResponse};
use crate::preferences::AppPreferences;
use crate::surface::CanvasSurface;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;
/// Images kept decoded on each side of the current one.
pub(crate) const PREFETCH_RADIUS: usize = 1;

// ---------------------------------------------------------------------------
// Image slots
// ---------------------------------------------------------------------------

/// A decoded image uploaded to the GPU.
pub(crate) struct LoadedImage {
    pub(crate) texture: egui::TextureHandle,
    pub(crate) intrinsic: Size,
}

/// Load state of one entry of the image set.
pub(crate) enum ImageSlot {
    Loading,
    Ready(LoadedImage),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Application struct
// ---------------------------------------------------------------------------

pub(crate) struct ImageScopeApp {
    // Viewer state; `None` until images are opened
    pub(crate) viewer: Option<Viewer>,
    pub(crate) surface: CanvasSurface,

    // Decoded images of the current set, by index
    pub(crate) slots: HashMap<usize, ImageSlot>,
    /// Bumped whenever a new set is opened, so in-flight decodes for the
    /// previous set are recognised and dropped.
    pub(crate) generation: u64,

    // IO worker (decoding off the UI thread)
    pub(crate) io_tx: mpsc::Sender<IoRequest>,
    pub(crate) io_resp_rx: mpsc::Receiver<IoResponse>,

    // UI state
    pub(crate) show_hud: bool,
    pub(crate) show_help: bool,
    pub(crate) show_thumbnails: bool,
    pub(crate) show_about: bool,
    pub(crate) menu_bar_height: f32,
    pub(crate) thumbnail_strip_height: f32,
    /// Last viewer revision the minimap was painted for.
    pub(crate) seen_minimap_revision: u64,

    pub(crate) preferences: AppPreferences,
}

// ---------------------------------------------------------------------------
// Constructor
// ---------------------------------------------------------------------------

impl ImageScopeApp {
    pub(crate) fn new(
        egui_ctx: &egui::Context,
        prefs: AppPreferences,
        paths: Vec<String>,
    ) -> std::io::Result<Self> {
        let (io_tx, io_resp_rx) = crate::io_worker::spawn_io_worker(egui_ctx.clone())?;

        let mut app = Self {
            viewer: None,
            surface: CanvasSurface::new(),
            slots: HashMap::new(),
            generation: 0,
            io_tx,
            io_resp_rx,
            show_hud: true,
            show_help: false,
            show_thumbnails: true,
            show_about: false,
            menu_bar_height: 0.0,
            thumbnail_strip_height: 0.0,
            seen_minimap_revision: 0,
            preferences: prefs,
        };
        app.open_images(paths);
        Ok(app)
    }

    /// Replace the image set. An empty list leaves the viewer closed.
    pub(crate) fn open_images(&mut self, paths: Vec<String>) {
        if paths.is_empty() {
            info!("No images to open");
            return;
        }
        match Viewer::new(paths.iter().cloned(), self.preferences.zoom_limits()) {
            Ok(viewer) => {
                self.generation = self.generation.wrapping_add(1);
                self.slots.clear();
                self.surface = CanvasSurface::new();
                self.viewer = Some(viewer);
                self.preferences.image_paths = paths;
                self.request_neighbourhood();
            }
            Err(e) => error!("Cannot open images: {e}"),
        }
    }

    pub(crate) fn current_slot(&self) -> Option<&ImageSlot> {
        let viewer = self.viewer.as_ref()?;
        self.slots.get(&viewer.current_index())
    }

    pub(crate) fn current_image(&self) -> Option<&LoadedImage> {
        match self.current_slot()? {
            ImageSlot::Ready(img) => Some(img),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

impl ImageScopeApp {
    /// Make sure the current image and its neighbours are decoded or on
    /// their way, and drop textures that fell out of the window.
    pub(crate) fn request_neighbourhood(&mut self) {
        let Some(viewer) = self.viewer.as_ref() else {
            return;
        };
        let len = viewer.images().len();
        let current = viewer.current_index();

        let mut wanted = vec![current];
        for d in 1..=PREFETCH_RADIUS.min(len / 2) {
            wanted.push((current + d) % len);
            wanted.push((current + len - d) % len);
        }

        self.slots
            .retain(|idx, slot| wanted.contains(idx) || matches!(slot, ImageSlot::Failed(_)));

        for index in wanted {
            if self.slots.contains_key(&index) {
                continue;
            }
            let Some(source) = viewer.images().get(index) else {
                continue;
            };
            let request = IoRequest::DecodeImage {
                generation: self.generation,
                index,
                path: PathBuf::from(&source.location),
            };
            if self.io_tx.send(request).is_err() {
                error!("IO worker is gone; cannot decode {}", source.location);
                self.slots
                    .insert(index, ImageSlot::Failed("decoder unavailable".into()));
                continue;
            }
            self.slots.insert(index, ImageSlot::Loading);
        }
    }

    /// Drain decoded images and upload them as textures.
    fn poll_io_responses(&mut self, ctx: &egui::Context) {
        while let Ok(resp) = self.io_resp_rx.try_recv() {
            match resp {
                IoResponse::ImageDecoded {
                    generation,
                    index,
                    result,
                } => {
                    if generation != self.generation {
                        continue;
                    }
                    // Evicted while decoding.
                    if !matches!(self.slots.get(&index), Some(ImageSlot::Loading)) {
                        continue;
                    }
                    let slot = match result {
                        Ok(decoded) => {
                            let texture = ctx.load_texture(
                                format!("image-{index}"),
                                decoded.pixels,
                                egui::TextureOptions::LINEAR,
                            );
                            ImageSlot::Ready(LoadedImage {
                                texture,
                                intrinsic: Size::new(
                                    decoded.intrinsic[0] as f64,
                                    decoded.intrinsic[1] as f64,
                                ),
                            })
                        }
                        Err(e) => {
                            warn!("Showing placeholder for image {index}: {e}");
                            ImageSlot::Failed(e.to_string())
                        }
                    };
                    self.slots.insert(index, slot);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Image view update
// ---------------------------------------------------------------------------

impl ImageScopeApp {
    /// Feed this frame's layout into the surface, then finish a pending
    /// switch once the current image is laid out.
    fn sync_surface(&mut self, rect: egui::Rect) {
        self.surface
            .set_viewport(Size::new(rect.width() as f64, rect.height() as f64));
        let minimap_visible = self.show_hud && self.preferences.show_minimap;
        self.surface.set_minimap_box(
            minimap_visible.then(|| self.preferences.minimap_size.side_points() as f64),
        );
        let intrinsic = self.current_image().map(|img| img.intrinsic);
        self.surface.set_image(intrinsic);

        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if viewer.is_view_pending() && self.surface.has_image() {
            viewer.apply_stored_view(&mut self.surface);
        }
    }

    fn update_image_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::from_gray(24)))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) =
                    ui.allocate_painter(available, egui::Sense::click_and_drag());
                let rect = response.rect;
                self.sync_surface(rect);

                let painter = painter.with_clip_rect(rect);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

                match self.current_slot() {
                    Some(ImageSlot::Ready(img)) => {
                        let scale = self.surface.scale() as f32;
                        let scroll = self.surface.scroll_offset();
                        let min = rect.min - egui::vec2(scroll.x as f32, scroll.y as f32);
                        let size = egui::vec2(
                            img.intrinsic.width as f32 * scale,
                            img.intrinsic.height as f32 * scale,
                        );
                        painter.image(
                            img.texture.id(),
                            egui::Rect::from_min_size(min, size),
                            uv,
                            egui::Color32::WHITE,
                        );
                    }
                    Some(ImageSlot::Loading) => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "Loading\u{2026}",
                            egui::FontId::proportional(16.0),
                            egui::Color32::GRAY,
                        );
                    }
                    Some(ImageSlot::Failed(msg)) => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("Cannot display image\n{msg}"),
                            egui::FontId::proportional(14.0),
                            egui::Color32::from_rgb(255, 140, 100),
                        );
                    }
                    None => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "File \u{2192} Open Images\u{2026} to start",
                            egui::FontId::proportional(16.0),
                            egui::Color32::GRAY,
                        );
                    }
                }

                self.handle_canvas_input(ctx, &response);
            });
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for ImageScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.poll_io_responses(ctx);
        self.draw_menu_bar(ctx);
        self.draw_thumbnail_strip(ctx);

        self.update_image_view(ctx);

        if self.show_hud {
            self.show_hud(ctx);
        }
        self.handle_outer_pointer(ctx);
        self.handle_keyboard(ctx);

        self.show_help_window(ctx);
        self.draw_about_window(ctx);

        let (dragging, revision) = self.viewer.as_ref().map_or((false, 0), |v| {
            (v.gesture() != GestureState::Idle, v.minimap_revision())
        });
        // The minimap reads the scroll written after it was painted.
        let minimap_stale = revision != self.seen_minimap_revision;
        self.seen_minimap_revision = revision;
        let loading = self
            .slots
            .values()
            .any(|slot| matches!(slot, ImageSlot::Loading));
        if dragging || loading || minimap_stale {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting ImageScope");

    let prefs = AppPreferences::load();
    let cli_paths: Vec<String> = std::env::args().skip(1).collect();
    let paths = if cli_paths.is_empty() {
        prefs.image_paths.clone()
    } else {
        cli_paths
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title("ImageScope")
        .with_inner_size([prefs.window_width, prefs.window_height]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "ImageScope",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(ImageScopeApp::new(&cc.egui_ctx, prefs, paths)?))
        }),
    )
}
