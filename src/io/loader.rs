//! Loads an ordered stack of grayscale planes from a directory.
//!
//! Translated from `examples/original_source/src/reader/file_reader.cpp`:
//! entries are enumerated, sorted by filename, and read in order; a file
//! that fails to parse is skipped with a warning rather than aborting the
//! whole load ("読めなかったファイル... 以外を読み込む" in the original).
//! No PNG/TIFF/JPEG codec is implemented; frames are a minimal raw
//! grayscale format this crate defines itself, since no image-decoding
//! crate appears anywhere in the retrieved reference corpus.

use std::fs;
use std::path::Path;

use crate::core::error::DendriteError;
use crate::io::ImageStack;

const MAGIC: &[u8; 3] = b"P5R";

/// A source of an ordered `ImageStack`. Kept as a trait so a future
/// loader (a different on-disk layout, a network source) can stand in
/// without touching the binarizer or anything downstream.
pub trait ImageStackLoader {
    fn load(&self, dir: &Path) -> Result<ImageStack, DendriteError>;
}

/// Reads `P5R`-framed grayscale planes from every regular file directly
/// inside `dir`, in ascending filename order.
#[derive(Debug, Default)]
pub struct DirectoryImageLoader;

impl ImageStackLoader for DirectoryImageLoader {
    fn load(&self, dir: &Path) -> Result<ImageStack, DendriteError> {
        let mut entries: Vec<_> = fs::read_dir(dir)
            .map_err(|source| DendriteError::ReadDirectory { path: dir.to_path_buf(), source })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        entries.sort();

        let mut width = None;
        let mut height = None;
        let mut planes = Vec::new();
        for path in entries {
            log::info!("loading {}", path.display());
            match parse_frame(&path) {
                Ok((w, h, samples)) => {
                    let (expected_w, expected_h) = (*width.get_or_insert(w), *height.get_or_insert(h));
                    if w != expected_w || h != expected_h {
                        log::warn!("skipping {}: frame is {}x{}, expected {}x{}", path.display(), w, h, expected_w, expected_h);
                        continue;
                    }
                    planes.push(samples);
                }
                Err(reason) => {
                    log::warn!("skipping {}: {reason}", path.display());
                }
            }
        }

        Ok(ImageStack {
            width: width.unwrap_or(0),
            height: height.unwrap_or(0),
            planes,
        })
    }
}

fn parse_frame(path: &Path) -> Result<(usize, usize, Vec<u8>), String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    if bytes.len() < 3 + 4 + 4 || &bytes[0..3] != MAGIC {
        return Err("not a P5R frame".to_string());
    }
    let width = u32::from_le_bytes(bytes[3..7].try_into().unwrap()) as usize;
    let height = u32::from_le_bytes(bytes[7..11].try_into().unwrap()) as usize;
    let samples = &bytes[11..];
    if samples.len() != width * height {
        return Err(format!("expected {} sample bytes, found {}", width * height, samples.len()));
    }
    Ok((width, height, samples.to_vec()))
}
