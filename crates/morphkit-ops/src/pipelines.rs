//! Canned morphological pipelines.
//!
//! Opening removes small bright spots and thin protrusions; closing
//! removes small dark spots and fills thin gaps. Both are idempotent
//! once an image reaches their fixed point.

use morphkit_core::{Kernel, Operation, Pass};

use crate::kernels;

/// Morphological opening: erode then dilate with the same mask.
pub fn opening(kernel: Kernel) -> [Pass; 2] {
    [
        Pass::single(kernel.clone(), Operation::Erode),
        Pass::single(kernel, Operation::Dilate),
    ]
}

/// Morphological closing: dilate then erode with the same mask.
pub fn closing(kernel: Kernel) -> [Pass; 2] {
    [
        Pass::single(kernel.clone(), Operation::Dilate),
        Pass::single(kernel, Operation::Erode),
    ]
}

/// Opening with the 3x3 all-ones mask.
pub fn opening_3() -> [Pass; 2] {
    opening(kernels::ones_3())
}

/// Closing with the 3x3 all-ones mask.
pub fn closing_3() -> [Pass; 2] {
    closing(kernels::ones_3())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_order() {
        let passes = opening_3();
        assert_eq!(passes[0].operation(), Operation::Erode);
        assert_eq!(passes[1].operation(), Operation::Dilate);
        assert_eq!(passes[0].repeat(), 1);
    }

    #[test]
    fn test_closing_order() {
        let passes = closing_3();
        assert_eq!(passes[0].operation(), Operation::Dilate);
        assert_eq!(passes[1].operation(), Operation::Erode);
    }

    #[test]
    fn test_custom_mask_is_threaded_through() {
        let passes = opening(kernels::cross_3());
        assert_eq!(passes[0].kernel(), passes[1].kernel());
        assert_eq!(passes[0].kernel().width(), 3);
    }
}
