//! Camera input and snapshot handling.
//!
//! This module provides abstractions for grabbing still images from a
//! camera (or a stand-in source) and turning them into self-describing
//! data-URI snapshots ready for the encoder.

mod camera;
mod config;
mod frame;
mod snapshot;

#[cfg(feature = "camera")]
pub use camera::DeviceCamera;
pub use camera::{CameraError, MediaCapture, MockCamera, StillImageSource};
pub use config::CaptureConfig;
pub use frame::{Frame, PixelLayout};
pub use snapshot::{CapturedImage, JPEG_MIME};
