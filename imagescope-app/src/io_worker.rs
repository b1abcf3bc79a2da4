use std::path::{Path, PathBuf};
use std::sync::mpsc;

use eframe::egui;
use tracing::{debug, error, warn};

use crate::error::LoadError;

/// Largest texture side uploaded to the GPU. Bigger images are downscaled
/// for display but keep their intrinsic size for layout.
pub(crate) const MAX_TEXTURE_SIDE: u32 = 8192;

/// Request sent from the UI thread to the I/O worker.
pub(crate) enum IoRequest {
    /// Decode the image at `path` for slot `index` of the current set.
    DecodeImage {
        generation: u64,
        index: usize,
        path: PathBuf,
    },
}

/// Response sent from the I/O worker back to the UI thread.
pub(crate) enum IoResponse {
    /// Result of a `DecodeImage` request. `generation` identifies the image
    /// set the request was made for; stale results are dropped by the UI.
    ImageDecoded {
        generation: u64,
        index: usize,
        result: Result<DecodedImage, LoadError>,
    },
}

/// RGBA pixels ready for upload, plus the image's intrinsic size.
pub(crate) struct DecodedImage {
    pub(crate) intrinsic: [u32; 2],
    pub(crate) pixels: egui::ColorImage,
}

/// Spawn a dedicated I/O worker thread.
///
/// Returns the send-side for requests and the receive-side for responses.
/// The thread runs until the request sender is dropped. `ctx` is used to
/// wake the UI when a response is ready.
pub(crate) fn spawn_io_worker(
    ctx: egui::Context,
) -> std::io::Result<(mpsc::Sender<IoRequest>, mpsc::Receiver<IoResponse>)> {
    let (req_tx, req_rx) = mpsc::channel::<IoRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<IoResponse>();

    std::thread::Builder::new()
        .name("io-worker".into())
        .spawn(move || {
            debug!("IO worker thread started");
            while let Ok(request) = req_rx.recv() {
                match request {
                    IoRequest::DecodeImage {
                        generation,
                        index,
                        path,
                    } => {
                        let result = decode_image(&path);
                        match &result {
                            Ok(img) => debug!(
                                "IO worker: decoded {} ({}x{})",
                                path.display(),
                                img.intrinsic[0],
                                img.intrinsic[1]
                            ),
                            Err(e) => error!("IO worker: {e}"),
                        }
                        if resp_tx
                            .send(IoResponse::ImageDecoded {
                                generation,
                                index,
                                result,
                            })
                            .is_err()
                        {
                            break;
                        }
                        ctx.request_repaint();
                    }
                }
            }
            debug!("IO worker thread exiting");
        })?;

    Ok((req_tx, resp_rx))
}

fn decode_image(path: &Path) -> Result<DecodedImage, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let decode_err = |source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = image::ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(decode_err)?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let img = if width.max(height) > MAX_TEXTURE_SIDE {
        warn!(
            "IO worker: {} is {width}x{height}, downscaling for display",
            path.display()
        );
        img.resize(
            MAX_TEXTURE_SIDE,
            MAX_TEXTURE_SIDE,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let pixels = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    );
    Ok(DecodedImage {
        intrinsic: [width, height],
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = decode_image(Path::new("definitely/not/here.png")).err();
        assert!(matches!(err, Some(LoadError::Io { .. })));
    }

    #[test]
    fn decodes_png_and_keeps_intrinsic_size() {
        let dir = std::env::temp_dir().join(format!("imagescope-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tiny.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.intrinsic, [3, 2]);
        assert_eq!(decoded.pixels.size, [3, 2]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let dir = std::env::temp_dir().join(format!("imagescope-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = decode_image(&path).err();
        assert!(matches!(err, Some(LoadError::Decode { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
