//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for screens that clear backgrounds then draw on top.
//! This simple framebuffer display allows overdraw for render smoke-tests
//! and snapshot dumps.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Simple framebuffer display for tests that allows overdraw.
#[derive(Debug, Clone)]
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a display matching the Xteink X4 dimensions (480x800).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel buffer
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    /// Color at `point`, `None` outside the panel
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    /// Number of inked pixels
    pub fn black_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| c == BinaryColor::On).count()
    }

    fn index(&self, coord: Point) -> Option<usize> {
        if coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
        {
            Some((coord.y as u32 * self.width + coord.x as u32) as usize)
        } else {
            None
        }
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index(coord) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
