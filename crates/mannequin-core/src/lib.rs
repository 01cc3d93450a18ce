//! # Mannequin Core
//!
//! Rigged character model export.
//!
//! Takes an in-memory character model (triangle mesh, Phong materials,
//! skeleton, vertex skin weights) and writes the on-disk assets a game
//! engine loads: a JSON model document with selectively flattened arrays,
//! one Wavefront `.mtl` file per material, and resized texture copies.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mannequin_core::prelude::*;
//!
//! let model = CharacterModel::new("hero", mesh)
//!     .with_materials(materials)
//!     .with_skeleton(skeleton)
//!     .with_weights(weights);
//!
//! let report = export_model(&model, &ExportOptions::new("assets/hero"))?;
//! println!("{report}");
//! ```
//!
//! ## Conventions
//!
//! - **Coordinate system**: right-handed, Y-up, positions in `f32`
//! - **Rig**: bones carry a head and a tail offset; the exported rig
//!   splits each into a head/tail bone pair (see [`skeleton`])
//! - **Rounding**: geometry to 5 decimal places, skin weights to 4

pub mod export;
pub mod json;
pub mod model;
pub mod mtl;
pub mod skeleton;
pub mod skin;
pub mod texture;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Model types
    pub use crate::model::{CharacterModel, Color, LicenseInfo, Material, Mesh};

    // Rig
    pub use crate::skeleton::{Bone, BoneDef, Skeleton, split_bones};
    pub use crate::skin::{DEFAULT_INFLUENCES_PER_VERTEX, Influence, VertexWeights};

    // Writers
    pub use crate::json::{model_document, to_flat_writer, write_flat};
    pub use crate::mtl::write_mtl;
    pub use crate::texture::{TextureOptions, copy_texture};

    // Export
    pub use crate::export::{ExportOptions, ExportReport, export_model};

    // Math (re-export glam)
    pub use glam::Vec3;

    // Error handling
    pub use crate::{Error, Result};
}
