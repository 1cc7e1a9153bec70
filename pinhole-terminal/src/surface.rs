/// Terminal display surface: one character cell per pixel
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use pinhole_core::framebuffer::CHANNELS;
use pinhole_core::{RenderResult, Surface};
use std::io::Write;

/// Glyph for a lit pixel
const POINT: char = '█';

/// RGBA pixels presented as coloured cells on any writer
pub struct TerminalSurface<W: Write> {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    writer: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * CHANNELS],
            writer,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
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
        if self.width == 0 {
            return Ok(());
        }
        for (row, line) in self.pixels.chunks_exact(self.width * CHANNELS).enumerate() {
            self.writer.queue(cursor::MoveTo(0, row as u16))?;
            for px in line.chunks_exact(CHANNELS) {
                // Transparent pixels stay blank
                if px[3] == 0 {
                    self.writer.queue(Print(' '))?;
                } else {
                    self.writer.queue(SetForegroundColor(Color::Rgb {
                        r: px[0],
                        g: px[1],
                        b: px[2],
                    }))?;
                    self.writer.queue(Print(POINT))?;
                }
            }
        }
        self.writer.queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }
}
