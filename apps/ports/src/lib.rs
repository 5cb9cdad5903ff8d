//! Browser-side ports for the image annotator front-end.
//!
//! The host UI raises [`Request`]s and receives [`Response`]s through a single
//! [`Ports`] dispatcher. Every browser primitive the ports need sits behind the
//! [`Browser`] trait, so the dispatch logic builds and tests natively.
//!
//! The real bindings live behind `--features web` on a wasm32 target.

pub mod browser;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod image;
pub mod messages;
pub mod viewport;

#[cfg(test)]
mod fake;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

pub use browser::{Browser, ObjectUrl};
pub use config::PortsConfig;
pub use dispatch::Ports;
pub use error::PortError;
pub use messages::{ExportPayload, LoadedImage, Request, Response, ViewportSize};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::{AnnotatorPorts, WebBrowser};
