//! `web-sys` bindings and the JS-facing handle.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::browser::{Browser, ObjectUrl};
use crate::config::PortsConfig;
use crate::dispatch::Ports;
use crate::error::PortError;
use crate::messages::{ExportPayload, Request, Response};

/// The page's real browser environment.
#[derive(Debug, Clone, Default)]
pub struct WebBrowser;

fn window() -> Result<web_sys::Window, PortError> {
    web_sys::window().ok_or_else(|| PortError::NoWindow("window missing".to_string()))
}

fn document() -> Result<web_sys::Document, PortError> {
    window()?
        .document()
        .ok_or_else(|| PortError::NoWindow("document missing".to_string()))
}

fn js_message(v: &JsValue) -> String {
    v.as_string()
        .or_else(|| v.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| "unknown error".to_string())
}

#[async_trait(?Send)]
impl Browser for WebBrowser {
    type File = web_sys::File;

    async fn next_frame(&self) -> Result<(), PortError> {
        let window = window()?;
        let mut scheduled = Ok(0);
        let frame = Promise::new(&mut |resolve, _reject| {
            scheduled = window.request_animation_frame(&resolve);
        });
        scheduled.map_err(|e| PortError::Frame(js_message(&e)))?;
        JsFuture::from(frame)
            .await
            .map_err(|e| PortError::Frame(js_message(&e)))?;
        Ok(())
    }

    fn element_size(&self, id: &str) -> Result<(u32, u32), PortError> {
        let el = document()?
            .get_element_by_id(id)
            .ok_or_else(|| PortError::ElementNotFound(id.to_string()))?;
        Ok((el.client_width().max(0) as u32, el.client_height().max(0) as u32))
    }

    fn file_type(&self, file: &web_sys::File) -> String {
        file.type_()
    }

    fn create_object_url(&self, file: &web_sys::File) -> Result<ObjectUrl, PortError> {
        web_sys::Url::create_object_url_with_blob(file)
            .map(ObjectUrl::new)
            .map_err(|e| PortError::ObjectUrl(js_message(&e)))
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Err(e) = web_sys::Url::revoke_object_url(url.as_str()) {
            tracing::warn!(url = %url, "revoke failed: {}", js_message(&e));
        }
    }

    async fn decode_image(&self, url: &ObjectUrl) -> Result<(u32, u32), PortError> {
        let img = web_sys::HtmlImageElement::new()
            .map_err(|e| PortError::ImageDecode(js_message(&e)))?;
        let loaded = Promise::new(&mut |resolve, reject| {
            img.set_onload(Some(&resolve));
            img.set_onerror(Some(&reject));
        });
        img.set_src(url.as_str());

        let outcome = JsFuture::from(loaded).await;
        img.set_onload(None);
        img.set_onerror(None);
        outcome.map_err(|_| PortError::ImageDecode(format!("{url} did not decode")))?;

        Ok((img.natural_width(), img.natural_height()))
    }

    fn save_as(&self, payload: &ExportPayload) -> Result<(), PortError> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| PortError::NoWindow("document missing".to_string()))?;

        let blob = payload_blob(payload)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| PortError::Download(format!("url: {}", js_message(&e))))?;

        let anchor = document
            .create_element("a")
            .map_err(|e| PortError::Download(format!("anchor: {}", js_message(&e))))
            .and_then(|el| {
                el.dyn_into::<web_sys::HtmlAnchorElement>()
                    .map_err(|_| PortError::Download("anchor: cast failed".to_string()))
            });
        let anchor = match anchor {
            Ok(a) => a,
            Err(e) => {
                let _ = web_sys::Url::revoke_object_url(&url);
                return Err(e);
            }
        };

        anchor.set_href(&url);
        anchor.set_download(&payload.filename);
        anchor.click();

        // The download reads the blob after this task ends.
        schedule_revoke(&window, url, EXPORT_URL_TTL_MS);
        Ok(())
    }
}

/// How long an export URL stays valid after its anchor was clicked.
const EXPORT_URL_TTL_MS: i32 = 40_000;

fn payload_blob(payload: &ExportPayload) -> Result<web_sys::Blob, PortError> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&payload.content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&payload.mime_type);
    web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| PortError::Download(format!("blob: {}", js_message(&e))))
}

fn schedule_revoke(window: &web_sys::Window, url: String, delay_ms: i32) {
    let revoke = {
        let url = url.clone();
        Closure::once_into_js(move || {
            let _ = web_sys::Url::revoke_object_url(&url);
        })
    };
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), delay_ms)
    {
        // Revoking now could cancel the download, so the URL is left to the page.
        tracing::warn!(url = %url, "could not schedule revoke: {}", js_message(&e));
    }
}

fn to_js_error(e: &PortError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn response_to_js(r: &Response) -> Result<JsValue, JsValue> {
    let raw = serde_json::to_string(r).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&raw)
}

/// Handle the host page holds on to. Each method maps to one port.
#[wasm_bindgen]
pub struct AnnotatorPorts {
    inner: Rc<Ports<WebBrowser>>,
}

#[wasm_bindgen]
impl AnnotatorPorts {
    /// `config` is an optional plain object overriding `PortsConfig` fields.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AnnotatorPorts, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            PortsConfig::default()
        } else {
            let raw: String = js_sys::JSON::stringify(&config)?.into();
            PortsConfig::from_json(&raw).map_err(|e| to_js_error(&e))?
        };
        Ok(Self {
            inner: Rc::new(Ports::new(WebBrowser, config)),
        })
    }

    /// Resolves to `{port: "viewerSize", payload: {width, height}}`.
    #[wasm_bindgen(js_name = askViewerSize)]
    pub fn ask_viewer_size(&self) -> Promise {
        self.dispatch(Request::AskViewerSize)
    }

    /// Resolves to `{port: "imageLoaded", payload: {uri, width, height}}`,
    /// or `null` when the file is not an image.
    #[wasm_bindgen(js_name = loadImageFile)]
    pub fn load_image_file(&self, file: web_sys::File) -> Promise {
        self.dispatch(Request::LoadImageFile(file))
    }

    #[wasm_bindgen(js_name = exportAnnotations)]
    pub fn export_annotations(&self, content: String) -> Result<(), JsValue> {
        self.inner.export(content).map_err(|e| to_js_error(&e))
    }

    #[wasm_bindgen(js_name = releaseImage)]
    pub fn release_image(&self) {
        self.inner.release_image();
    }

    fn dispatch(&self, request: Request<web_sys::File>) -> Promise {
        let ports = Rc::clone(&self.inner);
        future_to_promise(async move {
            match ports.handle(request).await {
                Ok(Some(response)) => response_to_js(&response),
                Ok(None) => Ok(JsValue::NULL),
                Err(e) => Err(to_js_error(&e)),
            }
        })
    }
}
