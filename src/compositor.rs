use log::debug;
use thiserror::Error;

use crate::message::{Inbound, Outbound, RowUpdate};
use crate::surface::Surface;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositorError {
    #[error("no frame configured, initial settings must arrive first")]
    NotConfigured,
    #[error("row {row} carries {got} colours but the frame is {expected} wide")]
    DimensionMismatch {
        row: u32,
        got: usize,
        expected: u32,
    },
    #[error("row {row} is out of bounds, the frame is {height} high")]
    OutOfBounds { row: u32, height: u32 },
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Receives computed rows and blits them into the display surface.
///
/// Rows are written into an owned RGBA frame; nothing reaches the screen
/// until a flush copies the whole frame out.
pub struct Compositor {
    frame: Option<Frame>,
}

impl Compositor {
    pub fn new() -> Self {
        Self { frame: None }
    }

    /// Dispatch one inbound message, returning the reply to send back, if any.
    pub fn handle(
        &mut self,
        message: Inbound,
        surface: &mut impl Surface,
    ) -> Result<Option<Outbound>, CompositorError> {
        match message {
            Inbound::InitialSettings { width, height } => {
                self.configure(width, height, surface)?;
                Ok(Some(Outbound::Ready))
            }
            Inbound::Row(update) => {
                self.write_row(&update)?;
                self.flush(surface)?;
                Ok(None)
            }
            Inbound::Rows { rows } => {
                self.write_rows(&rows)?;
                self.flush(surface)?;
                Ok(None)
            }
        }
    }

    /// Allocate a fresh zeroed frame and rebind the surface to its size.
    /// Any previously written rows are discarded.
    pub fn configure(
        &mut self,
        width: u32,
        height: u32,
        surface: &mut impl Surface,
    ) -> Result<(), CompositorError> {
        if width == 0 || height == 0 {
            return Err(CompositorError::InvalidDimensions { width, height });
        }
        let length = width as usize * height as usize * 4;
        self.frame = Some(Frame {
            width,
            height,
            data: vec![0; length],
        });
        surface.configure(width, height);
        debug!("configured {}x{} frame", width, height);
        Ok(())
    }

    /// Write one row of colours into the frame. Does not flush.
    ///
    /// A rejected update leaves the frame untouched.
    pub fn write_row(&mut self, update: &RowUpdate) -> Result<(), CompositorError> {
        let frame = self.frame.as_mut().ok_or(CompositorError::NotConfigured)?;
        if update.row >= frame.height {
            return Err(CompositorError::OutOfBounds {
                row: update.row,
                height: frame.height,
            });
        }
        if update.computed_colours.len() != frame.width as usize {
            return Err(CompositorError::DimensionMismatch {
                row: update.row,
                got: update.computed_colours.len(),
                expected: frame.width,
            });
        }

        let stride = frame.width as usize * 4;
        let offset = update.row as usize * stride;
        let row = &mut frame.data[offset..offset + stride];
        for (pixel, colour) in row.chunks_exact_mut(4).zip(&update.computed_colours) {
            pixel.copy_from_slice(&colour.to_rgba());
        }
        Ok(())
    }

    /// Write a batch of rows in order, stopping at the first invalid one.
    pub fn write_rows(&mut self, updates: &[RowUpdate]) -> Result<(), CompositorError> {
        for update in updates {
            self.write_row(update)?;
        }
        Ok(())
    }

    /// Copy the whole frame to the surface.
    pub fn flush(&self, surface: &mut impl Surface) -> Result<(), CompositorError> {
        let frame = self.frame.as_ref().ok_or(CompositorError::NotConfigured)?;
        surface.blit(&frame.data);
        Ok(())
    }
}
