use tracing::debug;

use crate::browser::Browser;
use crate::config::PortsConfig;
use crate::error::PortError;
use crate::messages::ViewportSize;

/// Measures the viewer element after the next paint.
pub async fn viewer_size<B: Browser>(
    browser: &B,
    config: &PortsConfig,
) -> Result<ViewportSize, PortError> {
    browser.next_frame().await?;
    let (width, height) = browser.element_size(&config.viewer_element_id)?;
    debug!(width, height, element = %config.viewer_element_id, "measured viewer");
    Ok(ViewportSize { width, height })
}
