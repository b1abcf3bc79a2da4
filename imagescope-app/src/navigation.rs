use tracing::{info, warn};

use crate::app::ImageScopeApp;

/// Extensions offered by the open dialog; matches the decoders compiled in.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

impl ImageScopeApp {
    pub(crate) fn go_next(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.next(&self.surface);
            self.request_neighbourhood();
        }
    }

    pub(crate) fn go_prev(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.prev(&self.surface);
            self.request_neighbourhood();
        }
    }

    /// Jump to `index`. Out-of-range requests (e.g. key 9 with three
    /// images) are logged and ignored.
    pub(crate) fn go_to(&mut self, index: usize) {
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if viewer.current_index() == index {
            return;
        }
        match viewer.select_image(&self.surface, index) {
            Ok(_) => self.request_neighbourhood(),
            Err(e) => warn!("Ignoring image selection: {e}"),
        }
    }

    pub(crate) fn zoom_in(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.zoom_in(&mut self.surface);
        }
    }

    pub(crate) fn zoom_out(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.zoom_out(&mut self.surface);
        }
    }

    pub(crate) fn toggle_minimap(&mut self) {
        self.preferences.show_minimap = !self.preferences.show_minimap;
        self.preferences.save();
    }

    /// Let the user pick a new set of images and open it.
    pub(crate) fn open_images_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = self
            .preferences
            .image_paths
            .first()
            .and_then(|p| std::path::Path::new(p).parent())
            .filter(|d| d.is_dir())
        {
            dialog = dialog.set_directory(dir);
        }
        let Some(files) = dialog.pick_files() else {
            return;
        };
        let paths: Vec<String> = files
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        info!("Opening {} image(s)", paths.len());
        self.open_images(paths);
        self.preferences.save();
    }

    /// Open the sample images shipped next to the executable, if any.
    pub(crate) fn open_bundled_samples(&mut self) {
        let dir = crate::app_dir::assets_directory();
        let entries = match std::fs::read_dir(&dir) {
            Ok(e) => e,
            Err(e) => {
                warn!("No sample images in {}: {e}", dir.display());
                return;
            }
        };
        let mut paths: Vec<String> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        paths.sort();
        self.open_images(paths);
    }
}
