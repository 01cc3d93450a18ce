//! Full model export
//!
//! Runs the whole pipeline for one character: flat-array JSON document,
//! one `.mtl` per material, resized texture copies.

use crate::model::CharacterModel;
use crate::skin::DEFAULT_INFLUENCES_PER_VERTEX;
use crate::texture::TextureOptions;
use crate::{Error, Result, json, mtl};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for model export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output directory
    pub out_dir: PathBuf,

    /// Directory for texture copies (if None, uses `out_dir`)
    pub tex_dir: Option<PathBuf>,

    /// Cap on the smaller texture edge, in pixels
    pub texture_size: u32,

    /// Bone influences per vertex in the skin arrays
    pub influences_per_vertex: usize,

    /// Reference textures by path relative to the texture dir
    pub relative_paths: bool,
}

impl ExportOptions {
    /// Create export options for a given output directory
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            tex_dir: None,
            texture_size: 512,
            influences_per_vertex: DEFAULT_INFLUENCES_PER_VERTEX,
            relative_paths: true,
        }
    }

    /// Set a separate directory for texture copies
    pub fn with_tex_dir(mut self, tex_dir: impl Into<PathBuf>) -> Self {
        self.tex_dir = Some(tex_dir.into());
        self
    }

    /// Set the texture size cap
    pub fn with_texture_size(mut self, size: u32) -> Self {
        self.texture_size = size;
        self
    }

    /// Set the influence count per vertex
    pub fn with_influences_per_vertex(mut self, influences: usize) -> Self {
        self.influences_per_vertex = influences;
        self
    }

    /// Reference textures by absolute path instead of relative
    pub fn with_absolute_paths(mut self) -> Self {
        self.relative_paths = false;
        self
    }

    fn texture_options(&self) -> TextureOptions {
        TextureOptions {
            max_size: self.texture_size,
            relative_paths: self.relative_paths,
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Path of the written model document
    pub json_path: PathBuf,

    /// Paths of the written material files
    pub mtl_paths: Vec<PathBuf>,

    /// Number of vertices in the mesh
    pub vertex_count: usize,

    /// Number of triangles in the mesh
    pub triangle_count: usize,

    /// Number of bones in the exported rig (after splitting)
    pub bone_count: usize,
}

impl std::fmt::Display for ExportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Exported {} ({} vertices, {} triangles, {} bones, {} materials)",
            self.json_path.display(),
            self.vertex_count,
            self.triangle_count,
            self.bone_count,
            self.mtl_paths.len()
        )
    }
}

/// Export a character model to disk
pub fn export_model(model: &CharacterModel, options: &ExportOptions) -> Result<ExportReport> {
    if let Some(skeleton) = &model.skeleton {
        if !skeleton.is_ordered() {
            return Err(Error::InvalidModel(
                "skeleton bones must be stored parent-before-child".to_string(),
            ));
        }
    }

    fs::create_dir_all(&options.out_dir)?;

    let document = json::model_document(model, options.influences_per_vertex)?;
    let json_path = options.out_dir.join(format!("{}.json", model.name));
    let file = File::create(&json_path)?;
    let mut writer = BufWriter::new(file);
    json::to_flat_writer(&mut writer, &document)?;
    writer.flush()?;

    let tex_dir: &Path = options.tex_dir.as_deref().unwrap_or(&options.out_dir);
    let tex_opts = options.texture_options();
    let mut mtl_paths = Vec::with_capacity(model.materials.len());
    for material in &model.materials {
        mtl_paths.push(mtl::write_mtl(
            material,
            &options.out_dir,
            Some(tex_dir),
            &tex_opts,
        )?);
    }

    let report = ExportReport {
        json_path,
        mtl_paths,
        vertex_count: model.mesh.vertex_count(),
        triangle_count: model.mesh.triangle_count(),
        bone_count: model
            .skeleton
            .as_ref()
            .map_or(0, |s| s.bone_count() * 2),
    };
    info!("{}", report);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mesh;
    use crate::skeleton::{Bone, Skeleton};
    use glam::Vec3;

    #[test]
    fn test_options_builder() {
        let opts = ExportOptions::new("out")
            .with_texture_size(256)
            .with_influences_per_vertex(2)
            .with_absolute_paths();

        assert_eq!(opts.out_dir, PathBuf::from("out"));
        assert_eq!(opts.texture_size, 256);
        assert_eq!(opts.influences_per_vertex, 2);
        assert!(!opts.relative_paths);
    }

    #[test]
    fn test_unordered_skeleton_rejected() {
        let mut skel = Skeleton::new();
        skel.add_bone(Bone::new("hand", Vec3::ZERO, Vec3::Y).with_parent(1));
        skel.add_bone(Bone::new("arm", Vec3::ZERO, Vec3::Y));

        let model = CharacterModel::new("broken", Mesh::new()).with_skeleton(skel);
        let out = std::env::temp_dir().join("mannequin_unordered");
        let result = export_model(&model, &ExportOptions::new(&out));

        assert!(matches!(result, Err(Error::InvalidModel(_))));
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_report_display() {
        let report = ExportReport {
            json_path: PathBuf::from("out/hero.json"),
            mtl_paths: vec![PathBuf::from("out/skin.mtl")],
            vertex_count: 10,
            triangle_count: 12,
            bone_count: 4,
        };
        let text = report.to_string();
        assert!(text.contains("hero.json"));
        assert!(text.contains("10 vertices"));
        assert!(text.contains("4 bones"));
    }
}
