/// The visible raster target the compositor flushes into.
pub trait Surface {
    /// Rebind the target to a new frame size.
    fn configure(&mut self, width: u32, height: u32);
    /// Copy a full frame of RGBA bytes to the target at origin (0, 0).
    fn blit(&mut self, frame: &[u8]);
}

#[cfg(test)]
pub struct RecordingSurface {
    pub configured: Vec<(u32, u32)>,
    pub blits: Vec<Vec<u8>>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            configured: Vec::new(),
            blits: Vec::new(),
        }
    }

    pub fn last_blit(&self) -> &[u8] {
        self.blits.last().expect("nothing was blitted")
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn configure(&mut self, width: u32, height: u32) {
        self.configured.push((width, height));
    }

    fn blit(&mut self, frame: &[u8]) {
        self.blits.push(frame.to_vec());
    }
}
