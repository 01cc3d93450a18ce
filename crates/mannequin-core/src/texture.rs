//! Best-effort texture resize-and-copy
//!
//! Source textures are authored large; exported copies are capped so the
//! smaller edge is at most `max_size` pixels. A texture that cannot be
//! read or written is logged and skipped, the export keeps going.

use crate::Result;
use image::GenericImageView as _;
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Options for texture copies
#[derive(Debug, Clone)]
pub struct TextureOptions {
    /// Cap on the smaller image edge, in pixels
    pub max_size: u32,
    /// Return paths relative to the texture dir rather than absolute
    pub relative_paths: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            max_size: 512,
            relative_paths: true,
        }
    }
}

impl TextureOptions {
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_relative_paths(mut self, relative: bool) -> Self {
        self.relative_paths = relative;
        self
    }
}

/// Copy a texture into `{tex_dir}/textures/`, downscaling on the way.
///
/// Always returns the destination path (relative to `tex_dir` when
/// `relative_paths` is on) so callers can reference it; a failed copy is
/// logged and swallowed.
pub fn copy_texture(src: &Path, tex_dir: &Path, opts: &TextureOptions) -> PathBuf {
    let file_name = src.file_name().map_or_else(
        || PathBuf::from("texture"),
        PathBuf::from,
    );
    let dest = tex_dir.join("textures").join(file_name);

    if let Err(e) = copy_and_compress(src, &dest, opts.max_size) {
        error!(
            "unable to copy \"{}\" -> \"{}\": {}",
            src.display(),
            dest.display(),
            e
        );
    }

    if opts.relative_paths {
        dest.strip_prefix(tex_dir)
            .map_or_else(|_| dest.clone(), Path::to_path_buf)
    } else {
        dest
    }
}

/// Load, downscale and re-save one image
fn copy_and_compress(src: &Path, dest: &Path, max_size: u32) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let img = image::open(src)?;
    let (width, height) = (img.width(), img.height());
    let min_edge = width.min(height);

    let img = if min_edge > max_size {
        let scale = max_size as f32 / min_edge as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;
        img.resize_exact(new_width, new_height, FilterType::Lanczos3)
    } else {
        img
    };

    img.save(dest)?;
    info!(
        "saved texture to {} ({}x{} from {}x{})",
        dest.display(),
        img.width(),
        img.height(),
        width,
        height
    );

    Ok(())
}
