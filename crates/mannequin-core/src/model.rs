//! Character model data types
//!
//! Owned counterparts of the objects a modeling application holds in memory:
//! triangle mesh, materials with texture references, and optional rig data.
//! All types are serde-derived so a model document can also be loaded from
//! disk by tooling.

use crate::skeleton::Skeleton;
use crate::skin::VertexWeights;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An RGB color with components in 0..1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A classic Phong material with optional texture map channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub ambient_color: Color,
    pub emissive_color: Color,
    /// Opacity in 0..1 (1 = opaque)
    pub opacity: f32,
    /// Specular exponent
    pub shininess: f32,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diffuse_texture: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_texture: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_texture: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ao_texture: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displacement_texture: Option<PathBuf>,
}

impl Material {
    /// Create a material with neutral Phong defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse_color: Color::new(0.8, 0.8, 0.8),
            specular_color: Color::new(0.1, 0.1, 0.1),
            ambient_color: Color::WHITE,
            emissive_color: Color::BLACK,
            opacity: 1.0,
            shininess: 25.0,
            wireframe: false,
            diffuse_texture: None,
            specular_texture: None,
            bump_texture: None,
            ao_texture: None,
            normal_texture: None,
            displacement_texture: None,
        }
    }

    /// Set the diffuse texture path
    pub fn with_diffuse_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.diffuse_texture = Some(path.into());
        self
    }

    /// Set the opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Effective alpha for export: a diffuse texture forces full opacity,
    /// the texture's own alpha channel carries transparency instead
    pub fn export_alpha(&self) -> f32 {
        if self.diffuse_texture.is_some() {
            1.0
        } else {
            self.opacity
        }
    }
}

/// A triangle mesh with per-vertex normals and UVs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    #[serde(default)]
    pub uvs: Vec<[f32; 2]>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

/// Asset license and attribution carried through to the exported document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub author: String,
    pub license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// A complete character model as produced by a modeling application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterModel {
    pub name: String,
    pub mesh: Mesh,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<Skeleton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<VertexWeights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseInfo>,
}

impl CharacterModel {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            materials: Vec::new(),
            skeleton: None,
            weights: None,
            license: None,
        }
    }

    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    pub fn with_weights(mut self, weights: VertexWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_license(mut self, license: LicenseInfo) -> Self {
        self.license = Some(license);
        self
    }
}
