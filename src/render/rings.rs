//! Ring ribbon meshes for orbit paths.
//!
//! Rings are flat ribbons in the XZ plane centered on the origin. Dashed
//! rings are built from separate arc pieces whose dash/gap lengths stay
//! constant in scene units, so large rings get more dashes.

use std::f32::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use super::layout::ring_point;

/// Vertex and index data for a ribbon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RibbonGeometry {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl RibbonGeometry {
    /// Append an arc from `start` to `end` (radians) with `steps` quads.
    fn push_arc(&mut self, radius: f32, width: f32, start: f32, end: f32, steps: u32) {
        let steps = steps.max(1);
        let inner = (radius - width / 2.0).max(0.0);
        let outer = radius + width / 2.0;
        let base = self.positions.len() as u32;

        for i in 0..=steps {
            let angle = start + (end - start) * i as f32 / steps as f32;
            self.positions.push(ring_point(inner, angle).to_array());
            self.positions.push(ring_point(outer, angle).to_array());
        }
        for i in 0..steps {
            let a = base + i * 2;
            self.indices
                .extend_from_slice(&[a, a + 1, a + 2, a + 1, a + 3, a + 2]);
        }
    }

    pub fn into_mesh(self) -> Mesh {
        let normals = vec![[0.0, 1.0, 0.0]; self.positions.len()];
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Continuous ring ribbon.
pub fn solid_ring(radius: f32, width: f32, segments: u32) -> RibbonGeometry {
    let mut geometry = RibbonGeometry::default();
    geometry.push_arc(radius, width, 0.0, TAU, segments.max(8));
    geometry
}

/// Number of dashes fitting around a ring.
pub fn dash_count(radius: f32, dash_length: f32, gap_length: f32) -> u32 {
    let period = dash_length + gap_length;
    if period <= 0.0 || radius <= 0.0 {
        return 1;
    }
    ((TAU * radius / period).floor() as u32).max(1)
}

/// Ring ribbon broken into evenly spaced dashes.
pub fn dashed_ring(
    radius: f32,
    width: f32,
    dash_length: f32,
    gap_length: f32,
    segments: u32,
) -> RibbonGeometry {
    let dashes = dash_count(radius, dash_length, gap_length);
    let period = TAU / dashes as f32;
    let dash_fraction = if dash_length + gap_length > 0.0 {
        dash_length / (dash_length + gap_length)
    } else {
        1.0
    };
    // Spread the full-ring segment budget over the dashes, at least one each.
    let steps = (segments as f32 * dash_fraction / dashes as f32).ceil() as u32;

    let mut geometry = RibbonGeometry::default();
    for k in 0..dashes {
        let start = period * k as f32;
        geometry.push_arc(radius, width, start, start + period * dash_fraction, steps);
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solid_ring_vertex_radii() {
        let ring = solid_ring(5.0, 0.2, 64);
        assert_eq!(ring.positions.len(), 65 * 2);
        assert_eq!(ring.indices.len(), 64 * 6);
        for (i, p) in ring.positions.iter().enumerate() {
            let r = Vec3::from_array(*p).length();
            let expected = if i % 2 == 0 { 4.9 } else { 5.1 };
            assert_relative_eq!(r, expected, epsilon = 1e-4);
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let ring = dashed_ring(3.0, 0.05, 0.4, 0.25, 256);
        let count = ring.positions.len() as u32;
        assert!(ring.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_dash_count_grows_with_radius() {
        assert_eq!(dash_count(1.0, 0.4, 0.25), 9);
        assert!(dash_count(10.0, 0.4, 0.25) > dash_count(1.0, 0.4, 0.25));
        assert_eq!(dash_count(0.01, 0.4, 0.25), 1);
        assert_eq!(dash_count(1.0, 0.0, 0.0), 1);
    }

    #[test]
    fn test_dashed_ring_has_one_piece_per_dash() {
        let dashes = dash_count(2.0, 0.4, 0.25) as usize;
        let ring = dashed_ring(2.0, 0.05, 0.4, 0.25, 256);
        let steps = ring.indices.len() / 6 / dashes;
        assert_eq!(ring.positions.len(), dashes * (steps + 1) * 2);
    }

    #[test]
    fn test_mesh_has_normals() {
        let mesh = solid_ring(1.0, 0.1, 16).into_mesh();
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert_eq!(mesh.count_vertices(), 34);
    }
}
