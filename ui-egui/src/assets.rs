// SPDX-License-Identifier: MIT OR Apache-2.0

//! Piece image loading
//!
//! Images are decoded once before the window opens and uploaded as textures
//! when the app is created. A missing or unreadable image aborts startup.

use chessview_core::{Color, Piece, PieceKind};
use egui::{ColorImage, TextureHandle, TextureOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading piece images
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Piece image {path} could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Piece image {path} could not be decoded: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Every piece a full set must provide
pub fn all_pieces() -> impl Iterator<Item = Piece> {
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| PieceKind::ALL.into_iter().map(move |kind| Piece::new(color, kind)))
}

/// File name for a piece image, e.g. `wK.png`
pub fn image_file_name(piece: Piece) -> String {
    format!("{}.png", piece.code())
}

/// Decoded piece images, one per colour and kind
#[derive(Clone)]
pub struct PieceImages {
    images: HashMap<Piece, ColorImage>,
}

impl PieceImages {
    /// Decode all twelve images from a directory
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let mut images = HashMap::new();
        for piece in all_pieces() {
            let path = dir.join(image_file_name(piece));
            let bytes = std::fs::read(&path).map_err(|source| AssetError::Read {
                path: path.clone(),
                source,
            })?;
            let image = egui_extras::image::load_image_bytes(&bytes).map_err(|e| {
                AssetError::Decode {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;
            debug!(path = %path.display(), size = ?image.size, "Decoded piece image");
            images.insert(piece, image);
        }
        info!(dir = %dir.display(), count = images.len(), "Piece images loaded");
        Ok(Self { images })
    }

    /// Upload every image as a texture
    pub fn upload(self, ctx: &egui::Context) -> PieceSet {
        let textures = self
            .images
            .into_iter()
            .map(|(piece, image)| {
                let handle = ctx.load_texture(
                    format!("piece-{}", piece.code()),
                    image,
                    TextureOptions::LINEAR,
                );
                (piece, handle)
            })
            .collect();
        PieceSet::Images(textures)
    }
}

/// How pieces are painted
pub enum PieceSet {
    /// Vector discs with the piece letter
    Tokens,
    /// Textures uploaded from image files
    Images(HashMap<Piece, TextureHandle>),
}

impl PieceSet {
    pub fn texture(&self, piece: Piece) -> Option<&TextureHandle> {
        match self {
            PieceSet::Tokens => None,
            PieceSet::Images(textures) => textures.get(&piece),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_distinct_file_names() {
        let mut names: Vec<String> = all_pieces().map(image_file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 12);
        assert!(names.contains(&"wK.png".to_string()));
        assert!(names.contains(&"bP.png".to_string()));
    }

    #[test]
    fn missing_directory_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = PieceImages::load_dir(&dir.path().join("nowhere"));
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }

    #[test]
    fn corrupt_image_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        for piece in all_pieces() {
            std::fs::write(dir.path().join(image_file_name(piece)), b"not a png")
                .expect("write fake image");
        }
        let result = PieceImages::load_dir(dir.path());
        assert!(matches!(result, Err(AssetError::Decode { .. })));
    }
}
