//! Camera abstraction for snapshot capture.
//!
//! This module provides a trait-based abstraction over image sources,
//! allowing real camera input, still files and mock implementations
//! to feed the same submission flow.

use super::{CaptureConfig, CapturedImage, Frame, PixelLayout};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during camera operations.
#[derive(Debug, Error)]
pub enum CameraError {
    /// The source could not be opened.
    #[error("failed to open camera: {0}")]
    OpenFailed(String),
    /// The source rejected the configuration.
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    /// No usable frame could be grabbed.
    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),
    /// JPEG encoding of a grabbed frame failed.
    #[error("failed to encode snapshot: {0}")]
    EncodeFailed(String),
    /// A grab was attempted before `open`.
    #[error("camera not initialized")]
    NotInitialized,
}

/// Trait for snapshot sources.
///
/// Implementors provide [`snapshot`](MediaCapture::snapshot); callers in the
/// submission flow use [`acquire_snapshot`](MediaCapture::acquire_snapshot),
/// which never fails loudly.
pub trait MediaCapture {
    /// Opens and initializes the source with the given configuration.
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError>;

    /// Grabs and encodes a single still image.
    fn snapshot(&mut self) -> Result<CapturedImage, CameraError>;

    /// Checks if the stream is currently active.
    fn is_open(&self) -> bool;

    /// Closes the source and releases resources.
    fn close(&mut self);

    /// Takes a snapshot from the active stream.
    ///
    /// Returns `None` when no stream is active or the grab fails. There is
    /// no retry here: the caller re-invokes once the stream has settled.
    fn acquire_snapshot(&mut self) -> Option<CapturedImage> {
        if !self.is_open() {
            tracing::debug!("Snapshot requested without an active stream");
            return None;
        }

        match self.snapshot() {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::debug!(error = %e, "Snapshot unavailable");
                None
            }
        }
    }
}

/// Mock camera for testing that generates synthetic frames.
#[derive(Debug, Default)]
pub struct MockCamera {
    config: Option<CaptureConfig>,
    sequence: u64,
    /// Grabs that fail after `open` before the stream yields frames.
    warmup_frames: u32,
    warmup_remaining: u32,
}

impl MockCamera {
    /// A mock camera that yields frames immediately after `open`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a stream that needs `frames` failed grabs to settle.
    pub fn with_warmup(frames: u32) -> Self {
        Self {
            warmup_frames: frames,
            ..Self::default()
        }
    }

    /// Produces the next raw synthetic frame.
    pub fn grab_frame(&mut self) -> Result<Frame, CameraError> {
        let config = self.config.as_ref().ok_or(CameraError::NotInitialized)?;

        if self.warmup_remaining > 0 {
            self.warmup_remaining -= 1;
            return Err(CameraError::CaptureFailed("stream not ready".into()));
        }

        let (width, height) = (config.width, config.height);
        let pixels: Vec<u8> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| ((x as u64 + y as u64 + self.sequence) % 256) as u8)
            .collect();

        self.sequence += 1;
        Ok(Frame::new(pixels, width, height, PixelLayout::Gray, self.sequence))
    }
}

impl MediaCapture for MockCamera {
    fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
        config
            .validate()
            .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;
        self.config = Some(config.clone());
        self.sequence = 0;
        self.warmup_remaining = self.warmup_frames;
        tracing::info!("MockCamera opened with config: {:?}", config);
        Ok(())
    }

    fn snapshot(&mut self) -> Result<CapturedImage, CameraError> {
        let frame = self.grab_frame()?;
        let quality = self
            .config
            .as_ref()
            .map(|c| c.jpeg_quality)
            .ok_or(CameraError::NotInitialized)?;
        CapturedImage::encode_jpeg(&frame, quality)
    }

    fn is_open(&self) -> bool {
        self.config.is_some()
    }

    fn close(&mut self) {
        self.config = None;
        tracing::info!("MockCamera closed");
    }
}

/// Serves an image file from disk as the snapshot.
///
/// The file is read once on `open`; every snapshot returns the same image.
#[derive(Debug)]
pub struct StillImageSource {
    path: PathBuf,
    image: Option<CapturedImage>,
}

impl StillImageSource {
    /// A source serving the image file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: None,
        }
    }
}

impl MediaCapture for StillImageSource {
    fn open(&mut self, _config: &CaptureConfig) -> Result<(), CameraError> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| CameraError::OpenFailed(format!("{}: {}", self.path.display(), e)))?;
        let format = image::guess_format(&bytes)
            .map_err(|e| CameraError::OpenFailed(format!("{}: {}", self.path.display(), e)))?;

        self.image = Some(CapturedImage::from_bytes(format.to_mime_type(), &bytes));
        tracing::info!(
            path = %self.path.display(),
            mime = format.to_mime_type(),
            bytes = bytes.len(),
            "Still image source opened"
        );
        Ok(())
    }

    fn snapshot(&mut self) -> Result<CapturedImage, CameraError> {
        self.image.clone().ok_or(CameraError::NotInitialized)
    }

    fn is_open(&self) -> bool {
        self.image.is_some()
    }

    fn close(&mut self) {
        self.image = None;
    }
}

#[cfg(feature = "camera")]
pub use device::DeviceCamera;

#[cfg(feature = "camera")]
mod device {
    use super::*;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

    /// Webcam input through the platform's native backend.
    #[derive(Default)]
    pub struct DeviceCamera {
        inner: Option<nokhwa::Camera>,
        quality: u8,
        sequence: u64,
    }

    impl DeviceCamera {
        /// A webcam source; the device is chosen by `CaptureConfig::device_id`.
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl MediaCapture for DeviceCamera {
        fn open(&mut self, config: &CaptureConfig) -> Result<(), CameraError> {
            config
                .validate()
                .map_err(|e| CameraError::ConfigFailed(e.to_string()))?;

            let requested =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = nokhwa::Camera::new(CameraIndex::Index(config.device_id), requested)
                .map_err(|e| CameraError::OpenFailed(e.to_string()))?;
            camera
                .open_stream()
                .map_err(|e| CameraError::OpenFailed(e.to_string()))?;

            tracing::info!(
                device = config.device_id,
                resolution = ?camera.resolution(),
                "Camera stream opened"
            );

            self.inner = Some(camera);
            self.quality = config.jpeg_quality;
            self.sequence = 0;
            Ok(())
        }

        fn snapshot(&mut self) -> Result<CapturedImage, CameraError> {
            let camera = self.inner.as_mut().ok_or(CameraError::NotInitialized)?;
            let buffer = camera
                .frame()
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;
            let decoded = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

            self.sequence += 1;
            let (width, height) = (decoded.width(), decoded.height());
            let frame = Frame::new(decoded.into_raw(), width, height, PixelLayout::Rgb, self.sequence);
            CapturedImage::encode_jpeg(&frame, self.quality)
        }

        fn is_open(&self) -> bool {
            self.inner.as_ref().is_some_and(|c| c.is_stream_open())
        }

        fn close(&mut self) {
            if let Some(mut camera) = self.inner.take() {
                if let Err(e) = camera.stop_stream() {
                    tracing::warn!(error = %e, "Failed to stop camera stream");
                }
                tracing::info!("Camera stream closed");
            }
        }
    }
}
