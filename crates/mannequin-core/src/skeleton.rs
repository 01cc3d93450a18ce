//! Skeleton types and the head/tail bone-splitting transform
//!
//! The source rig stores each bone as a head position (offset from the
//! parent) plus a tail position (offset from the head). The target engine's
//! bone model only knows a single offset per bone, so every source bone is
//! split into a `{name}____head` bone carrying the head offset and a
//! `{name}` bone carrying the head-to-tail offset. Children attach to the
//! tail half of their parent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A bone in the source rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Head position in model space
    pub head: Vec3,
    /// Tail position in model space
    pub tail: Vec3,
    /// Index of the parent bone, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
}

impl Bone {
    pub fn new(name: impl Into<String>, head: Vec3, tail: Vec3) -> Self {
        Self {
            name: name.into(),
            head,
            tail,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A source rig: bones stored parent-before-child
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bone and return its index
    pub fn add_bone(&mut self, bone: Bone) -> usize {
        self.bones.push(bone);
        self.bones.len() - 1
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Check that every parent index refers to an earlier bone
    pub fn is_ordered(&self) -> bool {
        self.bones
            .iter()
            .enumerate()
            .all(|(i, b)| b.parent.is_none_or(|p| p < i))
    }
}

/// A bone in the target engine's format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDef {
    pub name: String,
    /// Offset from the parent bone
    pub pos: [f32; 3],
    /// Rotation quaternion (x, y, z, w)
    pub rotq: [f32; 4],
    /// Scale
    pub scl: [f32; 3],
    /// Index into the output bone list, -1 for roots
    pub parent: i32,
}

const IDENTITY_ROTQ: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const UNIT_SCL: [f32; 3] = [1.0, 1.0, 1.0];

/// Split every source bone into a head/tail pair.
///
/// Output index `2i` is the head bone of source bone `i`, index `2i + 1`
/// its tail bone. Skin indices referring to the source rig must be doubled
/// to address this list (see [`crate::skin::VertexWeights::compile`]).
///
/// The skeleton must satisfy [`Skeleton::is_ordered`]: a parent index
/// referring to a later bone would emit a child before its parent, and an
/// out-of-range one panics. [`crate::json::model_document`] checks this
/// before calling.
///
/// # Panics
///
/// Panics if a bone's parent index is out of range.
pub fn split_bones(skeleton: &Skeleton) -> Vec<BoneDef> {
    let mut bones = Vec::with_capacity(skeleton.bones.len() * 2);

    for bone in &skeleton.bones {
        // Head bone: offset from the parent's tail, attached to the
        // parent's tail half.
        let (parent, pos) = match bone.parent {
            Some(p) => (
                (p * 2 + 1) as i32,
                (bone.head - skeleton.bones[p].tail).to_array(),
            ),
            None => (-1, [0.0, 0.0, 0.0]),
        };
        bones.push(BoneDef {
            name: format!("{}____head", bone.name),
            pos,
            rotq: IDENTITY_ROTQ,
            scl: UNIT_SCL,
            parent,
        });

        // Tail bone: offset from the head bone just emitted.
        bones.push(BoneDef {
            name: bone.name.clone(),
            pos: (bone.tail - bone.head).to_array(),
            rotq: IDENTITY_ROTQ,
            scl: UNIT_SCL,
            parent: (bones.len() - 1) as i32,
        });
    }

    bones
}
