/// RGBA framebuffer over an externally owned display surface
use serde::Deserialize;

use crate::error::{RenderError, RenderResult};

/// Bytes per pixel in a surface (R, G, B, A)
pub const CHANNELS: usize = 4;

/// Opaque pixel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// A pixel array some driver can show on screen.
///
/// Pixels are row-major RGBA bytes, `width * height * 4` long. The renderer
/// never creates or resizes a surface.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixels(&self) -> &[u8];
    fn pixels_mut(&mut self) -> &mut [u8];

    /// Push the current pixel contents to the display
    fn present(&mut self) -> RenderResult<()>;
}

/// Surface kept entirely in memory, for headless rendering and tests
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    presented: Vec<u8>,
    present_count: usize,
}

impl MemorySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * CHANNELS],
            presented: Vec::new(),
            present_count: 0,
        }
    }

    /// Pixel bytes as of the last `present`
    pub fn presented(&self) -> &[u8] {
        &self.presented
    }

    pub fn present_count(&self) -> usize {
        self.present_count
    }
}

impl Surface for MemorySurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presented.clone_from(&self.pixels);
        self.present_count += 1;
        Ok(())
    }
}

/// Bounds-checked pixel writes into a [`Surface`]
pub struct Framebuffer<S: Surface> {
    surface: S,
}

impl<S: Surface> Framebuffer<S> {
    pub fn new(surface: S) -> RenderResult<Self> {
        let expected = surface.width() * surface.height() * CHANNELS;
        let actual = surface.pixels().len();
        if actual != expected {
            return Err(RenderError::SurfaceMismatch { expected, actual });
        }
        Ok(Self { surface })
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    /// Byte offset of the pixel nearest to `(x, y)`, if it is inside the buffer
    fn index(&self, x: f32, y: f32) -> Option<usize> {
        // f32::round rounds half away from zero
        let (col, row) = (x.round(), y.round());
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width() || row >= self.height() {
            return None;
        }
        Some((row * self.width() + col) * CHANNELS)
    }

    /// Write an opaque pixel at the rounded location `(x, y)`
    pub fn set_pixel(&mut self, x: f32, y: f32, rgb: Rgb) -> RenderResult<()> {
        let idx = self.index(x, y).ok_or(RenderError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })?;
        self.surface.pixels_mut()[idx..idx + CHANNELS].copy_from_slice(&[rgb.r, rgb.g, rgb.b, 255]);
        Ok(())
    }

    /// RGBA sample at the rounded location, or None outside the buffer
    pub fn pixel(&self, x: f32, y: f32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let mut sample = [0; CHANNELS];
        sample.copy_from_slice(&self.surface.pixels()[idx..idx + CHANNELS]);
        Some(sample)
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.surface.pixels_mut().fill(0);
    }

    pub fn present(&mut self) -> RenderResult<()> {
        self.surface.present()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShortSurface(Vec<u8>);

    impl Surface for ShortSurface {
        fn width(&self) -> usize {
            2
        }
        fn height(&self) -> usize {
            2
        }
        fn pixels(&self) -> &[u8] {
            &self.0
        }
        fn pixels_mut(&mut self) -> &mut [u8] {
            &mut self.0
        }
        fn present(&mut self) -> RenderResult<()> {
            Ok(())
        }
    }

    fn framebuffer(width: usize, height: usize) -> Framebuffer<MemorySurface> {
        Framebuffer::new(MemorySurface::new(width, height)).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_surface() {
        let result = Framebuffer::new(ShortSurface(vec![0; 3]));
        assert!(matches!(
            result,
            Err(RenderError::SurfaceMismatch {
                expected: 16,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_last_pixel_round_trip() {
        let mut fb = framebuffer(8, 6);
        let red = Rgb::new(200, 10, 20);
        fb.set_pixel(7.0, 5.0, red).unwrap();
        assert_eq!(fb.pixel(7.0, 5.0), Some([200, 10, 20, 255]));
        assert_eq!(fb.pixel(6.0, 5.0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut fb = framebuffer(8, 6);
        for (x, y) in [(8.0, 0.0), (0.0, 6.0), (-1.0, 0.0), (7.6, 0.0), (f32::NAN, 0.0)] {
            let result = fb.set_pixel(x, y, Rgb::WHITE);
            assert!(matches!(result, Err(RenderError::OutOfBounds { .. })), "({x}, {y})");
        }
        assert!(fb.surface().pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let mut fb = framebuffer(4, 4);
        fb.set_pixel(1.5, 2.49, Rgb::WHITE).unwrap();
        assert_eq!(fb.pixel(2.0, 2.0), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(1.0, 2.0), Some([0, 0, 0, 0]));

        // Just below zero still rounds onto column 0
        fb.set_pixel(-0.4, 0.0, Rgb::WHITE).unwrap();
        assert_eq!(fb.pixel(0.0, 0.0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_clear_and_present() {
        let mut fb = framebuffer(3, 3);
        fb.set_pixel(1.0, 1.0, Rgb::WHITE).unwrap();
        fb.present().unwrap();
        fb.present().unwrap();
        assert_eq!(fb.surface().present_count(), 2);
        assert_eq!(fb.surface().presented(), fb.surface().pixels());

        fb.clear();
        assert_eq!(fb.pixel(1.0, 1.0), Some([0, 0, 0, 0]));
        // Presented copy is untouched until the next present
        assert!(fb.surface().presented().iter().any(|&b| b == 255));
    }
}
