use tracing::debug;

use crate::browser::Browser;
use crate::config::PortsConfig;
use crate::error::PortError;
use crate::export::export_annotations;
use crate::image::ImageLoader;
use crate::messages::{Request, Response};
use crate::viewport::viewer_size;

/// Single entry point for host requests.
pub struct Ports<B: Browser> {
    browser: B,
    config: PortsConfig,
    images: ImageLoader,
}

impl<B: Browser> Ports<B> {
    pub fn new(browser: B, config: PortsConfig) -> Self {
        Self {
            browser,
            config,
            images: ImageLoader::new(),
        }
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Runs one request. `Ok(None)` means the request has no reply.
    pub async fn handle(&self, request: Request<B::File>) -> Result<Option<Response>, PortError> {
        match request {
            Request::AskViewerSize => {
                debug!("askViewerSize");
                let size = viewer_size(&self.browser, &self.config).await?;
                Ok(Some(Response::ViewerSize(size)))
            }
            Request::LoadImageFile(file) => {
                debug!("loadImageFile");
                let loaded = self.images.load(&self.browser, &self.config, &file).await?;
                Ok(loaded.map(Response::ImageLoaded))
            }
            Request::ExportAnnotations(content) => {
                debug!("exportAnnotations");
                self.export(content)?;
                Ok(None)
            }
            Request::ReleaseImage => {
                self.release_image();
                Ok(None)
            }
        }
    }

    /// Synchronous shortcut for `Request::ExportAnnotations`.
    pub fn export(&self, content: String) -> Result<(), PortError> {
        export_annotations(&self.browser, &self.config, content)
    }

    /// Synchronous shortcut for `Request::ReleaseImage`.
    pub fn release_image(&self) {
        self.images.release(&self.browser);
    }
}

impl<B: Browser> Drop for Ports<B> {
    fn drop(&mut self) {
        self.images.release(&self.browser);
    }
}
