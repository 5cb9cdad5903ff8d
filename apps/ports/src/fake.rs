//! In-memory browser used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::browser::{Browser, ObjectUrl};
use crate::error::PortError;
use crate::messages::ExportPayload;

#[derive(Debug, Clone)]
pub(crate) struct FakeFile {
    pub mime: String,
    /// Natural size once decoded; `None` for bytes that fail to decode.
    pub pixels: Option<(u32, u32)>,
    /// When set, decoding waits until the gate is notified.
    pub gate: Option<Rc<Notify>>,
}

impl FakeFile {
    pub fn image(mime: &str, width: u32, height: u32) -> Self {
        Self {
            mime: mime.to_string(),
            pixels: Some((width, height)),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: &Rc<Notify>) -> Self {
        self.gate = Some(Rc::clone(gate));
        self
    }

    pub fn corrupt(mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
            pixels: None,
            gate: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Download {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
pub(crate) struct FakeBrowser {
    pub(crate) elements: HashMap<String, (u32, u32)>,
    pub frames: Cell<u32>,
    pub(crate) url_counter: Cell<u32>,
    pub(crate) blobs: RefCell<HashMap<ObjectUrl, FakeFile>>,
    pub live_urls: RefCell<HashSet<ObjectUrl>>,
    pub revoked: Rc<RefCell<Vec<ObjectUrl>>>,
    pub downloads: RefCell<Vec<Download>>,
    pub block_downloads: bool,
}

impl FakeBrowser {
    pub fn with_element(mut self, id: &str, width: u32, height: u32) -> Self {
        self.elements.insert(id.to_string(), (width, height));
        self
    }
}

#[async_trait(?Send)]
impl Browser for FakeBrowser {
    type File = FakeFile;

    async fn next_frame(&self) -> Result<(), PortError> {
        self.frames.set(self.frames.get() + 1);
        Ok(())
    }

    fn element_size(&self, id: &str) -> Result<(u32, u32), PortError> {
        self.elements
            .get(id)
            .copied()
            .ok_or_else(|| PortError::ElementNotFound(id.to_string()))
    }

    fn file_type(&self, file: &FakeFile) -> String {
        file.mime.clone()
    }

    fn create_object_url(&self, file: &FakeFile) -> Result<ObjectUrl, PortError> {
        let n = self.url_counter.get() + 1;
        self.url_counter.set(n);
        let url = ObjectUrl::new(format!("blob:http://localhost:8001/{n}"));
        self.blobs.borrow_mut().insert(url.clone(), file.clone());
        self.live_urls.borrow_mut().insert(url.clone());
        Ok(url)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        self.live_urls.borrow_mut().remove(url);
        self.revoked.borrow_mut().push(url.clone());
    }

    async fn decode_image(&self, url: &ObjectUrl) -> Result<(u32, u32), PortError> {
        if !self.live_urls.borrow().contains(url) {
            return Err(PortError::ImageDecode(format!("{url} is not a live url")));
        }
        let file = self.blobs.borrow().get(url).cloned();
        let file = file.ok_or_else(|| PortError::ImageDecode(format!("{url} has no blob")))?;
        if let Some(gate) = &file.gate {
            gate.notified().await;
        }
        file.pixels
            .ok_or_else(|| PortError::ImageDecode(format!("{url} is not an image")))
    }

    fn save_as(&self, payload: &ExportPayload) -> Result<(), PortError> {
        if self.block_downloads {
            return Err(PortError::Download("anchor: click blocked".to_string()));
        }
        self.downloads.borrow_mut().push(Download {
            filename: payload.filename.clone(),
            mime_type: payload.mime_type.clone(),
            bytes: payload.content.as_bytes().to_vec(),
        });
        Ok(())
    }
}
