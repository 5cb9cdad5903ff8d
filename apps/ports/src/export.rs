use tracing::info;

use crate::browser::Browser;
use crate::config::PortsConfig;
use crate::error::PortError;
use crate::messages::ExportPayload;

/// Hands `content` to the browser's save flow under the configured filename
/// and MIME type. Only failures to start the download are reported.
pub fn export_annotations<B: Browser>(
    browser: &B,
    config: &PortsConfig,
    content: String,
) -> Result<(), PortError> {
    let payload = ExportPayload {
        content,
        filename: config.export_filename.clone(),
        mime_type: config.export_mime_type.clone(),
    };
    browser.save_as(&payload)?;
    info!(
        filename = %payload.filename,
        bytes = payload.content.len(),
        "export download started"
    );
    Ok(())
}
