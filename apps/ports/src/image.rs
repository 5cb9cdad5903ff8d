use std::cell::{Cell, RefCell};

use tracing::{debug, warn};

use crate::browser::{Browser, ObjectUrl};
use crate::config::PortsConfig;
use crate::error::PortError;
use crate::messages::LoadedImage;

/// Turns user-selected files into displayable images.
///
/// Owns the object URL of the image currently on display and revokes it when
/// that image is replaced or released, so at most one URL is live.
///
/// Overlapping loads resolve in request order: a decode that finishes after a
/// newer load or a release was requested is discarded.
#[derive(Debug, Default)]
pub struct ImageLoader {
    current: RefCell<Option<ObjectUrl>>,
    generation: Cell<u64>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the image currently on display, if any.
    pub fn current(&self) -> Option<ObjectUrl> {
        self.current.borrow().clone()
    }

    /// Decodes `file` if its declared type is an image.
    ///
    /// Returns `Ok(None)` for any other file type, and for a load overtaken by
    /// a newer request. A decode failure leaves the current image in place.
    pub async fn load<B: Browser>(
        &self,
        browser: &B,
        config: &PortsConfig,
        file: &B::File,
    ) -> Result<Option<LoadedImage>, PortError> {
        let mime = browser.file_type(file);
        if !mime.starts_with(&config.image_mime_prefix) {
            debug!(mime = %mime, "ignoring non-image file");
            return Ok(None);
        }

        let ticket = self.bump_generation();
        let url = browser.create_object_url(file)?;
        let (width, height) = match browser.decode_image(&url).await {
            Ok(size) => size,
            Err(e) => {
                warn!(url = %url, "image decode failed: {e}");
                browser.revoke_object_url(&url);
                return Err(e);
            }
        };

        if self.generation.get() != ticket {
            debug!(url = %url, "discarding stale image load");
            browser.revoke_object_url(&url);
            return Ok(None);
        }

        let previous = self.current.replace(Some(url.clone()));
        if let Some(previous) = previous {
            browser.revoke_object_url(&previous);
        }

        debug!(url = %url, width, height, "image loaded");
        Ok(Some(LoadedImage {
            uri: url.as_str().to_string(),
            width,
            height,
        }))
    }

    /// Revokes the current image URL. No-op when nothing is displayed.
    pub fn release<B: Browser>(&self, browser: &B) {
        self.bump_generation();
        if let Some(url) = self.current.take() {
            debug!(url = %url, "releasing image");
            browser.revoke_object_url(&url);
        }
    }

    fn bump_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }
}
