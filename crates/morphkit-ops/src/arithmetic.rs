//! Two-operand elementwise image combination.
//!
//! Combines a foreground image into a background image with a selectable
//! operation, restricted by a channel mask, gated by pixel-skip
//! conditions, and positioned by an integer placement offset. The
//! foreground can additionally be run through a linear transform
//! (`value * scale + offset`) before combination.
//!
//! # Example
//!
//! ```
//! use morphkit_core::ImageBuffer;
//! use morphkit_ops::{arithmetic, ArithmeticOp, ArithmeticParams, ChannelMask};
//!
//! let mut bg = ImageBuffer::from_f32(vec![0.25; 4 * 4 * 4], 4, 4, 4).unwrap();
//! let fg = ImageBuffer::from_f32(vec![0.5; 4 * 4 * 4], 4, 4, 4).unwrap();
//!
//! let params = ArithmeticParams {
//!     mask: ChannelMask::RGB,
//!     ..Default::default()
//! };
//! arithmetic(&mut bg, &fg, ArithmeticOp::Add, &params).unwrap();
//! // Color channels were summed, alpha left alone.
//! ```

use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

use morphkit_core::ImageBuffer;

use crate::{OpsError, OpsResult};

/// Tolerance for the skip-condition pixel classifications.
const SKIP_EPS: f32 = 1e-6;

/// Bitset selecting which channels an operation writes.
///
/// Bit values mirror the toolkit's wire convention: A=1, B=2, G=4, R=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask(u8);

impl ChannelMask {
    /// No channels.
    pub const NONE: Self = Self(0);
    /// Alpha channel.
    pub const A: Self = Self(1);
    /// Blue channel.
    pub const B: Self = Self(1 << 1);
    /// Green channel.
    pub const G: Self = Self(1 << 2);
    /// Red channel.
    pub const R: Self = Self(1 << 3);
    /// Color channels.
    pub const RGB: Self = Self(Self::R.0 | Self::G.0 | Self::B.0);
    /// All channels.
    pub const RGBA: Self = Self(Self::RGB.0 | Self::A.0);

    /// Returns true when every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true when the interleaved channel at `index` is written.
    ///
    /// Indices 0..=3 map to R, G, B, A; higher indices are never written.
    pub fn writes_channel(self, index: usize) -> bool {
        match index {
            0 => self.contains(Self::R),
            1 => self.contains(Self::G),
            2 => self.contains(Self::B),
            3 => self.contains(Self::A),
            _ => false,
        }
    }
}

impl std::ops::BitOr for ChannelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::RGBA
    }
}

/// Bitset of foreground-pixel conditions that leave the background
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkipCondition(u8);

impl SkipCondition {
    /// Skip nothing.
    pub const NONE: Self = Self(0);
    /// Skip foreground pixels whose color channels are all zero.
    pub const BLACK_PIXEL: Self = Self(1);
    /// Skip foreground pixels whose alpha is zero.
    pub const TRANSPARENT_PIXEL: Self = Self(1 << 1);
    /// Skip foreground pixels whose color channels are all one.
    pub const WHITE_PIXEL: Self = Self(1 << 2);

    /// Returns true when every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SkipCondition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Elementwise combination applied per masked channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `background + foreground`
    Add,
    /// `background - foreground`
    Subtract,
    /// `background * foreground`
    Multiply,
    /// Channelwise minimum.
    Min,
    /// Channelwise maximum.
    Max,
    /// Lerp from background to foreground by foreground alpha.
    Blend,
}

/// Parameters shared by every arithmetic operation.
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticParams {
    /// Placement of the foreground over the background, in pixels.
    /// Background pixel (x, y) pairs with foreground pixel
    /// (x - offset.0, y - offset.1); pairs outside the foreground are
    /// left untouched.
    pub offset: (i32, i32),
    /// Channels of the background that may be written.
    pub mask: ChannelMask,
    /// Foreground-pixel conditions that suppress the combination.
    pub skip: SkipCondition,
    /// Linear transform `(scale, offset)` applied to foreground values
    /// before combination. Identity is `(1.0, 0.0)`.
    pub transform: (f32, f32),
}

impl Default for ArithmeticParams {
    fn default() -> Self {
        Self {
            offset: (0, 0),
            mask: ChannelMask::RGBA,
            skip: SkipCondition::NONE,
            transform: (1.0, 0.0),
        }
    }
}

/// Combines `foreground` into `background` with the given operation.
///
/// Channel counts must match; extents may differ, in which case only the
/// overlapped region is combined. Skip conditions are evaluated on the
/// raw foreground pixel, before the linear transform.
pub fn arithmetic(
    background: &mut ImageBuffer,
    foreground: &ImageBuffer,
    op: ArithmeticOp,
    params: &ArithmeticParams,
) -> OpsResult<()> {
    trace!(op = ?op, offset = ?params.offset, "arithmetic");

    if background.channels != foreground.channels {
        return Err(OpsError::SizeMismatch(format!(
            "background has {} channels, foreground has {}",
            background.channels, foreground.channels
        )));
    }

    let (bw, _bh, c) = background.dimensions();
    let (bw, c) = (bw as usize, c as usize);
    let (fw, fh, _) = foreground.dimensions();
    let (fw, fh) = (fw as usize, fh as usize);
    let (ox, oy) = params.offset;
    let (scale, shift) = params.transform;

    let fg_data = foreground.data();
    background
        .data_mut()
        .par_chunks_mut(bw * c)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = y as i64 - oy as i64;
            if fy < 0 || fy >= fh as i64 {
                return;
            }
            let fg_row = &fg_data[(fy as usize) * fw * c..(fy as usize + 1) * fw * c];

            for x in 0..bw {
                let fx = x as i64 - ox as i64;
                if fx < 0 || fx >= fw as i64 {
                    continue;
                }
                let fg_px = &fg_row[(fx as usize) * c..(fx as usize) * c + c];
                if skipped(fg_px, params.skip) {
                    continue;
                }
                let fg_alpha = fg_px.get(3).copied().unwrap_or(1.0);

                for ch in 0..c {
                    if !params.mask.writes_channel(ch) {
                        continue;
                    }
                    let fg_v = fg_px[ch] * scale + shift;
                    let bg_v = row[x * c + ch];
                    row[x * c + ch] = match op {
                        ArithmeticOp::Add => bg_v + fg_v,
                        ArithmeticOp::Subtract => bg_v - fg_v,
                        ArithmeticOp::Multiply => bg_v * fg_v,
                        ArithmeticOp::Min => bg_v.min(fg_v),
                        ArithmeticOp::Max => bg_v.max(fg_v),
                        ArithmeticOp::Blend => bg_v + (fg_v - bg_v) * fg_alpha,
                    };
                }
            }
        });

    Ok(())
}

/// Skip-condition classification of a raw foreground pixel.
fn skipped(px: &[f32], skip: SkipCondition) -> bool {
    if skip == SkipCondition::NONE {
        return false;
    }
    let color = &px[..px.len().min(3)];
    if skip.contains(SkipCondition::BLACK_PIXEL) && color.iter().all(|v| v.abs() <= SKIP_EPS) {
        return true;
    }
    if skip.contains(SkipCondition::WHITE_PIXEL) && color.iter().all(|v| *v >= 1.0 - SKIP_EPS) {
        return true;
    }
    let alpha = px.get(3).copied().unwrap_or(1.0);
    if skip.contains(SkipCondition::TRANSPARENT_PIXEL) && alpha <= SKIP_EPS {
        return true;
    }
    false
}
