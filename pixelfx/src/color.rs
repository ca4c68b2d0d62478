use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Produces a color with given RGB values. The values range from 0 to 255.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Produces a gray of the given brightness, where 0 is black and 255 is white.
    pub fn gray(brightness: u8) -> Self {
        Self::rgb(brightness, brightness, brightness)
    }

    pub fn black() -> Self {
        Self::gray(0)
    }

    pub fn white() -> Self {
        Self::gray(255)
    }

    /// Produces a dimmer version of the color. The dimming factor is expected
    /// to be in the range [0.0, 1.0]. Values outside of this range will be
    /// truncated.
    pub fn dim(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let dim_component = |c| ((c as f64) * factor) as u8;
        Self {
            r: dim_component(self.r),
            g: dim_component(self.g),
            b: dim_component(self.b),
        }
    }
}
