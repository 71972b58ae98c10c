// SPDX-License-Identifier: MIT OR Apache-2.0

//! Viewer configuration
//!
//! Everything tunable about the viewer lives here:
//! - Window title and board square size (the window is exactly the board)
//! - Square, highlight and banner colours
//! - Animation speed and the base frame rate
//! - Optional directory of piece images

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use chessview_core::BOARD_DIMENSION;

use crate::piece_animation::MAX_FRAMES_PER_SQUARE;

/// Errors raised while reading or writing a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub board: BoardConfig,
    pub animation: AnimationConfig,
    /// Frames per second while idle
    pub frame_rate: u32,
    pub banner: BannerConfig,
    pub pieces: PieceConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

/// Board visual configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Edge length of one square in pixels
    pub square_size: f32,
    pub light_square: SerializableColor,
    pub dark_square: SerializableColor,
    /// Overlay on a king in check
    pub check_color: SerializableColor,
    /// Overlay on the selected square
    pub selected_color: SerializableColor,
    /// Overlay on every reachable square
    pub target_color: SerializableColor,
    /// Opacity applied to all three overlays
    pub highlight_alpha: u8,
}

/// Move animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames spent per square of Manhattan distance
    pub frames_per_square: u32,
    /// Frames per second while a move is animating
    pub fps: u32,
}

/// Game-over banner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub font_size: f32,
    /// Space between the text and the panel border
    pub padding: f32,
    /// Offset of the shadow copy of the text
    pub shadow_offset: f32,
    /// Minimum distance between the panel and the window edges
    pub margin: f32,
    pub border_width: f32,
    pub dim_color: SerializableColor,
    pub panel_color: SerializableColor,
    pub border_color: SerializableColor,
    pub text_color: SerializableColor,
    pub shadow_color: SerializableColor,
}

/// Piece drawing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceConfig {
    /// Directory holding `wK.png` ... `bP.png`; vector tokens are drawn when unset
    pub image_dir: Option<PathBuf>,
    pub white_fill: SerializableColor,
    pub black_fill: SerializableColor,
    pub outline: SerializableColor,
    /// Token radius as fraction of the square size
    pub token_radius_ratio: f32,
}

/// Serializable color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the given opacity
    pub fn with_alpha(self, a: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, a)
    }
}

impl From<Color32> for SerializableColor {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self { r, g, b, a }
    }
}

impl From<SerializableColor> for Color32 {
    fn from(color: SerializableColor) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            board: BoardConfig::default(),
            animation: AnimationConfig::default(),
            frame_rate: 15,
            banner: BannerConfig::default(),
            pieces: PieceConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Chess".to_string(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            square_size: 64.0, // 512 px board
            light_square: SerializableColor::rgb(255, 255, 255),
            dark_square: SerializableColor::rgb(190, 190, 190),
            check_color: SerializableColor::rgb(255, 0, 0),
            selected_color: SerializableColor::rgb(0, 0, 255),
            target_color: SerializableColor::rgb(255, 255, 0),
            highlight_alpha: 100,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_square: 10,
            fps: 60,
        }
    }
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            padding: 15.0,
            shadow_offset: 2.0,
            margin: 10.0,
            border_width: 3.0,
            dim_color: SerializableColor::rgba(0, 0, 0, 150),
            panel_color: SerializableColor::rgb(0, 0, 139),
            border_color: SerializableColor::rgb(255, 215, 0),
            text_color: SerializableColor::rgb(255, 255, 255),
            shadow_color: SerializableColor::rgb(51, 51, 51),
        }
    }
}

impl Default for PieceConfig {
    fn default() -> Self {
        Self {
            image_dir: None,
            white_fill: SerializableColor::rgb(250, 250, 250),
            black_fill: SerializableColor::rgb(20, 20, 20),
            outline: SerializableColor::rgb(0, 0, 0),
            token_radius_ratio: 0.38,
        }
    }
}

impl AnimationConfig {
    /// Frames per square, capped so a move never animates for minutes
    pub fn frames_per_square(&self) -> u32 {
        self.frames_per_square.min(MAX_FRAMES_PER_SQUARE)
    }
}

impl ViewerConfig {
    /// Load config from file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Pixel size of the whole board, which is also the window size
    pub fn board_size(&self) -> Vec2 {
        Vec2::splat(self.board.square_size * f32::from(BOARD_DIMENSION))
    }

    /// Time between frames, faster while a move is animating
    pub fn tick_interval(&self, animating: bool) -> Duration {
        let fps = if animating {
            self.animation.fps
        } else {
            self.frame_rate
        };
        Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
    }
}
