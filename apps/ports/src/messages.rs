use serde::{Deserialize, Serialize};

/// Rendered size of the viewer element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// An image ready for display: its object URL plus natural pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// Content handed to the browser's save flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

/// Inbound messages from the host application.
///
/// `F` is the browser's file handle type; requests are never serialized since
/// a file handle is a live browser object.
#[derive(Debug, Clone)]
pub enum Request<F> {
    AskViewerSize,
    LoadImageFile(F),
    ExportAnnotations(String),
    /// The host stopped displaying the current image.
    ReleaseImage,
}

/// Outbound messages to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload", rename_all = "camelCase")]
pub enum Response {
    ViewerSize(ViewportSize),
    ImageLoaded(LoadedImage),
}
