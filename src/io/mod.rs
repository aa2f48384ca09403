//! Collaborators that sit outside the algorithmic core: loading a raw
//! image stack from disk, thresholding it into a `BinaryVolume`, and
//! writing a finished `Neuron` back out as SWC.

pub mod binarizer;
pub mod loader;
pub mod writer;

/// An ordered stack of Z grayscale planes, each `width * height` bytes,
/// row-major. Produced by a `loader::ImageStackLoader`, consumed by
/// `binarizer::binarize`.
#[derive(Debug, Clone)]
pub struct ImageStack {
    pub width: usize,
    pub height: usize,
    pub planes: Vec<Vec<u8>>,
}

impl ImageStack {
    pub fn depth(&self) -> usize {
        self.planes.len()
    }
}
