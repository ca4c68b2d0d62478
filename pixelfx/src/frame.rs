use serde::{Deserialize, Serialize};

use crate::Color;

/// One complete set of pixel colors, index 0 corresponding to the first
/// physical LED on the addressed channel.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Frame {
    pixels: Vec<Color>,
}

impl Frame {
    pub fn new(number_of_lights: usize, color: Color) -> Self {
        Self {
            pixels: vec![color; number_of_lights],
        }
    }

    pub fn new_black(number_of_lights: usize) -> Self {
        Self::new(number_of_lights, Color::black())
    }

    pub fn set_pixel(&mut self, index: usize, color: Color) {
        self.pixels[index] = color;
    }

    pub fn with_pixel(mut self, index: usize, color: Color) -> Self {
        self.pixels[index] = color;
        self
    }

    pub fn pixels_iter(&self) -> impl Iterator<Item = &Color> {
        self.pixels.iter()
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl From<Vec<Color>> for Frame {
    fn from(pixels: Vec<Color>) -> Self {
        Self { pixels }
    }
}

impl FromIterator<Color> for Frame {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self {
            pixels: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_lit_pixel() {
        let frame = Frame::new_black(3).with_pixel(1, Color::white());
        assert_eq!(
            frame.pixels_iter().copied().collect::<Vec<_>>(),
            vec![Color::black(), Color::white(), Color::black()]
        );
    }

    #[test]
    fn set_pixel() {
        let mut frame = Frame::new(2, Color::gray(10));
        frame.set_pixel(0, Color::rgb(1, 2, 3));
        assert_eq!(
            frame.pixels_iter().copied().collect::<Vec<_>>(),
            vec![Color::rgb(1, 2, 3), Color::gray(10)]
        );
    }

    #[test]
    fn from_iterator_preserves_order() {
        let frame: Frame = (0..4).map(Color::gray).collect();
        assert_eq!(frame.len(), 4);
        assert_eq!(
            frame.pixels_iter().map(|c| c.r).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }
}
