use async_trait::async_trait;

use crate::error::PortError;
use crate::messages::ExportPayload;

/// A browser-allocated reference to an in-memory blob, valid until revoked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The browser primitives the ports are built on.
///
/// Futures are not `Send`: browser objects live on the main thread.
#[async_trait(?Send)]
pub trait Browser {
    /// Handle to a user-selected file.
    type File;

    /// Resolves once the next animation frame has been painted.
    async fn next_frame(&self) -> Result<(), PortError>;

    /// Rendered client size of the element with the given id.
    fn element_size(&self, id: &str) -> Result<(u32, u32), PortError>;

    /// Declared MIME type of the file, possibly empty.
    fn file_type(&self, file: &Self::File) -> String;

    fn create_object_url(&self, file: &Self::File) -> Result<ObjectUrl, PortError>;

    fn revoke_object_url(&self, url: &ObjectUrl);

    /// Loads the URL into an offscreen image and returns its natural size.
    async fn decode_image(&self, url: &ObjectUrl) -> Result<(u32, u32), PortError>;

    /// Starts the native save flow for the payload. Success of the save
    /// itself is not observable.
    fn save_as(&self, payload: &ExportPayload) -> Result<(), PortError>;
}
