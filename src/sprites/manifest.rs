//! Player sprite sheet manifest.
//!
//! Describes the sheet grid, the display scale, the fixed pose cells and the
//! looping clips, plus where on the body the web attaches.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::movement::{ActorBody, AnchorUv};

/// Error type for manifest load failures.
#[derive(Debug)]
pub struct ManifestLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ManifestLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// A single cell in the sheet, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SheetCell {
    pub row: u32,
    pub col: u32,
}

/// A looping run of columns on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClipDef {
    pub row: u32,
    pub first: u32,
    pub last: u32,
    pub frame_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnchorDef {
    pub u: f32,
    pub v: f32,
    #[serde(default = "default_mirror")]
    pub mirror: bool,
}

fn default_mirror() -> bool {
    true
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSheet {
    /// Path to the sheet image, relative to assets/.
    pub image: String,
    pub rows: u32,
    pub cols: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Display scale applied to one frame
    pub scale: f32,
    pub web_anchor: AnchorDef,
    /// Pose held while the web is out
    pub web_lock: SheetCell,
    pub throw_pose: SheetCell,
    pub walk: ClipDef,
    pub idle: ClipDef,
}

impl Default for PlayerSheet {
    fn default() -> Self {
        Self {
            image: "sprites/player.png".to_string(),
            rows: 3,
            cols: 8,
            frame_width: 160,
            frame_height: 128,
            scale: 3.0,
            web_anchor: AnchorDef {
                u: 0.78,
                v: 0.33,
                mirror: true,
            },
            web_lock: SheetCell { row: 2, col: 7 },
            throw_pose: SheetCell { row: 2, col: 5 },
            walk: ClipDef {
                row: 2,
                first: 0,
                last: 7,
                frame_ms: 100,
            },
            idle: ClipDef {
                row: 0,
                first: 0,
                last: 7,
                frame_ms: 120,
            },
        }
    }
}

impl PlayerSheet {
    pub fn parse(contents: &str, file: &str) -> Result<Self, ManifestLoadError> {
        serde_json::from_str(contents).map_err(|e| ManifestLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ManifestLoadError> {
        let file_name = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| ManifestLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        })?;
        Self::parse(&contents, &file_name)
    }

    /// Load the manifest, keeping the built-in layout if it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Sprite manifest not found at {:?}, using built-in layout",
                path
            );
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(sheet) => {
                info!(
                    "Loaded player sheet {} ({}x{} cells)",
                    sheet.image, sheet.cols, sheet.rows
                );
                sheet
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    pub fn frame_size(&self) -> UVec2 {
        UVec2::new(self.frame_width, self.frame_height)
    }

    pub fn render_size(&self) -> Vec2 {
        self.frame_size().as_vec2() * self.scale
    }

    pub fn body(&self) -> ActorBody {
        ActorBody {
            size: self.render_size(),
            web_anchor: AnchorUv {
                u: self.web_anchor.u,
                v: self.web_anchor.v,
                mirror: self.web_anchor.mirror,
            },
        }
    }

    /// Row-major index into the atlas layout.
    pub fn atlas_index(&self, cell: SheetCell) -> usize {
        (cell.row.min(self.rows.saturating_sub(1)) * self.cols + cell.col.min(self.cols.saturating_sub(1)))
            as usize
    }
}
