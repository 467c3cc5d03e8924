//! Image buffer representation.

use crate::{CoreError, CoreResult};

/// Image stored in host memory for processing.
///
/// Pixels are stored as interleaved f32 values, row-major, `channels`
/// values per pixel. This is the currency every executor and runner in
/// the toolkit trades in; GPU backends upload/download it around their
/// own device-side storage.
#[derive(Clone, PartialEq)]
pub struct ImageBuffer {
    /// Raw pixel data (f32).
    data: Vec<f32>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of channels (1, 3 or 4 typical).
    pub channels: u32,
}

impl ImageBuffer {
    /// Creates a buffer from f32 data.
    ///
    /// Fails with [`CoreError::BufferSizeMismatch`] when `data` does not
    /// hold exactly `width * height * channels` values.
    pub fn from_f32(data: Vec<f32>, width: u32, height: u32, channels: u32) -> CoreResult<Self> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected {
            return Err(CoreError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height, channels })
    }

    /// Creates an empty buffer filled with zeros.
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        let size = (width as usize) * (height as usize) * (channels as usize);
        Self {
            data: vec![0.0; size],
            width,
            height,
            channels,
        }
    }

    /// Pixel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable pixel data.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Image dimensions as (width, height, channels).
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    /// Returns true when `other` has the same width, height and channels.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len() * 4
    }

    /// Clones the buffer.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }
}

impl std::fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
