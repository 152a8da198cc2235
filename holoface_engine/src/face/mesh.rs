//! Face mesh generation.
//!
//! The head is a point cloud distributed over a sphere by a spherical
//! Fibonacci lattice, stretched vertically into a head shape and
//! classified into regions (skin, eyes, mouth) from the unit-sphere
//! coordinates. The mesh is generated once and never changes; all
//! animation happens in the vertex program.

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;

use crate::engine_bail;
use crate::error::Result;
use crate::face::FaceConfig;

/// Golden angle in radians, the turn between consecutive lattice points
pub const GOLDEN_ANGLE: f32 = 2.39996;

// ============================================================================
// REGION
// ============================================================================

/// Face region a lattice point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Skin,
    Eye,
    Mouth,
}

impl Region {
    /// Numeric tag stored in the vertex stream (skin 0, eye 1, mouth 2)
    pub fn tag(&self) -> f32 {
        match self {
            Region::Skin => 0.0,
            Region::Eye => 1.0,
            Region::Mouth => 2.0,
        }
    }

    /// Classify a unit-sphere point, camera side is +z
    ///
    /// The eye band sits above the equator on both sides of the nose
    /// axis, the mouth band below it and centered. First match wins,
    /// everything else is skin.
    pub fn classify(x: f32, y: f32, z: f32) -> Region {
        if y > 0.15 && y < 0.35 && z > 0.4 && x.abs() > 0.15 && x.abs() < 0.5 {
            Region::Eye
        } else if y < -0.15 && y > -0.35 && z > 0.6 && x.abs() < 0.35 {
            Region::Mouth
        } else {
            Region::Skin
        }
    }

    /// Base reflectance color, tinted by the mood color in the vertex program
    ///
    /// Eyes render their color as-is, so they stay white in every mood.
    pub fn base_color(&self) -> [f32; 4] {
        match self {
            Region::Skin => [0.5, 0.5, 0.5, 0.5],
            Region::Eye => [1.0, 1.0, 1.0, 1.0],
            Region::Mouth => [1.0, 1.0, 0.8, 1.0],
        }
    }
}

// ============================================================================
// POINT VERTEX
// ============================================================================

/// One point of the face lattice as laid out in the vertex buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    /// Model-space position
    pub position: [f32; 3],
    /// Base reflectance color (RGBA)
    pub color: [f32; 4],
    /// Region tag (skin 0, eye 1, mouth 2)
    pub region: f32,
}

impl PointVertex {
    /// Byte stride of one vertex in the vertex buffer
    pub const STRIDE: u32 = std::mem::size_of::<PointVertex>() as u32;
}

// ============================================================================
// FACE MESH
// ============================================================================

/// An immutable point-cloud head
pub struct FaceMesh {
    vertices: Vec<PointVertex>,
    region_counts: FxHashMap<Region, usize>,
}

impl FaceMesh {
    /// Generate the lattice for a configuration
    ///
    /// Deterministic: the same configuration always produces the same
    /// vertices, bit for bit.
    pub fn generate(config: &FaceConfig) -> Result<FaceMesh> {
        if config.point_count < 2 {
            engine_bail!(
                "holoface::FaceMesh",
                "Point count must be at least 2, got {}",
                config.point_count
            );
        }

        let n = config.point_count;
        let mut vertices = Vec::with_capacity(n as usize);
        let mut region_counts = FxHashMap::default();

        for i in 0..n {
            // Unit-sphere coordinates: y walks from +1 to -1, the golden
            // angle spreads points evenly around each latitude ring.
            let y = 1.0 - (i as f32 / (n - 1) as f32) * 2.0;
            let ring_radius = (1.0 - y * y).sqrt();
            let theta = GOLDEN_ANGLE * i as f32;
            let x = theta.cos() * ring_radius;
            let z = theta.sin() * ring_radius;

            let region = Region::classify(x, y, z);
            *region_counts.entry(region).or_insert(0) += 1;

            vertices.push(PointVertex {
                position: [
                    x * config.head_radius,
                    y * config.head_radius * config.height_scale,
                    z * config.head_radius,
                ],
                color: region.base_color(),
                region: region.tag(),
            });
        }

        Ok(FaceMesh {
            vertices,
            region_counts,
        })
    }

    /// Get the vertices
    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Vertex data as raw bytes, ready for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Per-region point counts
    pub fn region_summary(&self) -> &FxHashMap<Region, usize> {
        &self.region_counts
    }

    /// Number of points in one region
    pub fn region_count(&self, region: Region) -> usize {
        self.region_counts.get(&region).copied().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
