//! Vertex skin weights and compilation into flat skin arrays
//!
//! The target engine wants exactly N (bone index, weight) pairs per vertex
//! in two flat arrays. Vertices with more influences are truncated to the
//! strongest N, vertices with fewer are zero-padded.

use serde::{Deserialize, Serialize};
use tracing::error;

/// Default influence cap; the target engine supports at most 4
pub const DEFAULT_INFLUENCES_PER_VERTEX: usize = 4;

/// A single bone influence on a vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    /// Source rig bone index
    pub bone: u32,
    pub weight: f32,
}

/// Per-vertex bone influences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexWeights {
    influences: Vec<Vec<Influence>>,
    /// Influence count the source rig declared when compiling the weights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_influences: Option<usize>,
}

impl VertexWeights {
    /// Create weights for a mesh with the given vertex count
    pub fn new(vertex_count: usize) -> Self {
        Self {
            influences: vec![Vec::new(); vertex_count],
            source_influences: None,
        }
    }

    /// Declare the influence count the source rig was compiled with.
    ///
    /// A declared count of 4 means every vertex MAY carry 4 influences
    /// even when none happens to; without it, [`Self::source_influences`]
    /// falls back to the observed maximum.
    pub fn with_source_influences(mut self, count: usize) -> Self {
        self.source_influences = Some(count);
        self
    }

    /// The declared source influence count, or the observed maximum when
    /// the source did not declare one
    pub fn source_influences(&self) -> usize {
        self.source_influences
            .unwrap_or_else(|| self.max_influences())
    }

    /// Record a bone influence on a vertex
    pub fn add(&mut self, vertex: usize, bone: u32, weight: f32) {
        if vertex >= self.influences.len() {
            self.influences.resize(vertex + 1, Vec::new());
        }
        self.influences[vertex].push(Influence { bone, weight });
    }

    pub fn vertex_count(&self) -> usize {
        self.influences.len()
    }

    /// Largest number of influences any single vertex carries
    pub fn max_influences(&self) -> usize {
        self.influences.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Compile into flat `skinIndices` / `skinWeights` arrays.
    ///
    /// Every vertex contributes exactly `influences_per_vertex` entries:
    /// strongest influences first, zero-padded when a vertex has fewer.
    /// Weights are rounded to 4 decimal places. Indices are doubled so
    /// they address the split-bone list from
    /// [`crate::skeleton::split_bones`], landing on each bone's head half.
    pub fn compile(&self, influences_per_vertex: usize) -> (Vec<u32>, Vec<f32>) {
        if self.source_influences() < influences_per_vertex {
            error!(
                requested = influences_per_vertex,
                available = self.source_influences(),
                "influences_per_vertex exceeds what the source weights carry"
            );
        }

        let mut indices = Vec::with_capacity(self.influences.len() * influences_per_vertex);
        let mut weights = Vec::with_capacity(self.influences.len() * influences_per_vertex);

        for vertex in &self.influences {
            let mut sorted = vertex.clone();
            sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
            sorted.truncate(influences_per_vertex);

            for inf in &sorted {
                indices.push(inf.bone * 2);
                weights.push(round4(inf.weight));
            }
            for _ in sorted.len()..influences_per_vertex {
                indices.push(0);
                weights.push(0.0);
            }
        }

        (indices, weights)
    }
}

fn round4(v: f32) -> f32 {
    (v * 10_000.0).round() / 10_000.0
}
