//! Drawing surfaces that results are rendered onto.

use std::sync::{Arc, PoisonError, RwLock};

use arena_core::ImagePayload;
use image::{imageops, RgbaImage};

use crate::codec::{decode_payload, encode_base64, encode_png};
use crate::error::{RenderError, RenderResult};

/// An RGBA drawing surface.
///
/// Behaves like a 2D canvas: resizing clears it, drawing composites the
/// source over the current contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Create a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Create a surface filled with a single color.
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            pixels: crate::codec::create_solid_color(width, height, rgba),
        }
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Current pixel contents.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Mutable access for brushes.
    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Resize the surface. Contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
        tracing::trace!("Surface resized to {}x{}", width, height);
    }

    /// Fill the whole surface with one color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for pixel in self.pixels.pixels_mut() {
            pixel.0 = rgba;
        }
    }

    /// Composite `source` with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, source: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, source, x, y);
    }

    /// Resize to the image's dimensions and draw it at the origin.
    pub fn show_image(&mut self, source: &RgbaImage) {
        let (width, height) = source.dimensions();
        self.resize(width, height);
        self.draw_image(source, 0, 0);
    }

    /// Encode the contents as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.pixels)
    }

    /// Encode the contents as a base64 PNG payload.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_payload(&self) -> RenderResult<ImagePayload> {
        Ok(encode_base64(&self.to_png()?))
    }
}

/// A surface shared between a controller and whoever displays it.
#[derive(Debug, Clone)]
pub struct SharedSurface {
    inner: Arc<RwLock<Surface>>,
}

impl SharedSurface {
    /// Share an existing surface.
    #[must_use]
    pub fn new(surface: Surface) -> Self {
        Self {
            inner: Arc::new(RwLock::new(surface)),
        }
    }

    /// Current `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .dimensions()
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Surface {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` with exclusive access to the surface.
    pub fn update<R>(&self, f: impl FnOnce(&mut Surface) -> R) -> R {
        let mut surface = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut surface)
    }
}

impl Default for SharedSurface {
    fn default() -> Self {
        Self::new(Surface::new(300, 150))
    }
}

/// Decode `payload` and show it on `surface`, sized to the image.
///
/// Decoding runs on the blocking pool. Two concurrent calls on the same
/// surface complete in whichever order their decodes finish; callers that
/// need ordering must await one before starting the next.
///
/// Returns the new surface dimensions.
///
/// # Errors
///
/// Returns an error if the payload cannot be decoded.
pub async fn draw_payload(
    surface: &SharedSurface,
    payload: &ImagePayload,
) -> RenderResult<(u32, u32)> {
    let payload = payload.clone();
    let decoded = tokio::task::spawn_blocking(move || decode_payload(&payload))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;

    let dimensions = decoded.dimensions();
    surface.update(|s| s.show_image(&decoded));
    tracing::debug!("Drew {}x{} image on surface", dimensions.0, dimensions.1);
    Ok(dimensions)
}
