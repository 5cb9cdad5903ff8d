use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Fixed names the ports use when talking to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortsConfig {
    /// Id of the element whose rendered size is reported as the viewer size.
    pub viewer_element_id: String,
    pub export_filename: String,
    pub export_mime_type: String,
    /// Files whose declared type does not start with this are ignored.
    pub image_mime_prefix: String,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            viewer_element_id: "viewer".to_string(),
            export_filename: "annotations.json".to_string(),
            export_mime_type: "text/plain".to_string(),
            image_mime_prefix: "image".to_string(),
        }
    }
}

impl PortsConfig {
    /// Parses a host-supplied JSON object; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, PortError> {
        Ok(serde_json::from_str(raw)?)
    }
}
