//! Planar terrain mesh and the per-vertex displacement pass.
use crate::noise::{NoiseField, NoiseOptions, fractal_noise3};
use serde::Serialize;

#[derive(Clone, Copy, Serialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A square grid mesh lying in the XZ plane, centered at the origin.
///
/// Vertices are stored row-major: index = `row * (segments + 1) + col`,
/// where `col` walks the X axis and `row` walks the Z axis. Y starts flat at
/// zero and is rewritten by [`TerrainMesh::displace_heights`].
#[derive(Serialize)]
pub struct TerrainMesh {
    /// World-unit side length of the plane.
    pub extent: f32,
    /// Number of quads along each side; the grid has `(segments+1)²` vertices.
    pub segments: u32,
    pub seed: u32,
    /// Noise parameters the heights were displaced with, for reproducibility.
    pub options: NoiseOptions,
    pub vertices: Vec<Vertex>,
}

impl TerrainMesh {
    /// Build a flat plane: `extent × extent` world units, `segments` quads
    /// per side.
    pub fn plane(extent: f32, segments: u32, seed: u32, options: NoiseOptions) -> Self {
        let side = segments + 1;
        let step = extent / segments as f32;
        let half = extent / 2.0;
        let mut vertices = Vec::with_capacity((side * side) as usize);
        for row in 0..side {
            for col in 0..side {
                vertices.push(Vertex {
                    x: col as f32 * step - half,
                    y: 0.0,
                    z: row as f32 * step - half,
                });
            }
        }
        Self {
            extent,
            segments,
            seed,
            options,
            vertices,
        }
    }

    /// Vertices per side of the grid.
    pub fn side(&self) -> u32 {
        self.segments + 1
    }

    /// Vertex at grid position (`col` along X, `row` along Z).
    pub fn at(&self, col: u32, row: u32) -> Vertex {
        self.vertices[(row * self.side() + col) as usize]
    }

    /// Displace every vertex's height through `field`.
    ///
    /// Each vertex is sampled at its current `(x, y, z)` and only `y` is
    /// rewritten; X and Z pass through untouched. One independent field
    /// evaluation per vertex, sequential, no shared state between vertices.
    pub fn displace_heights(&mut self, field: &impl NoiseField) {
        let options = self.options;
        for v in &mut self.vertices {
            v.y = fractal_noise3(v.x as f64, v.y as f64, v.z as f64, field, &options) as f32;
        }
    }

    /// Min and max displaced height, for colour ramps and the legend.
    pub fn height_range(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in &self.vertices {
            min = min.min(v.y);
            max = max.max(v.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{Ridge, SimplexSource};
    use approx::assert_relative_eq;

    fn small_mesh() -> TerrainMesh {
        let options = NoiseOptions {
            octaves: 3,
            frequency: 0.2,
            persistence: 0.1,
            ..Default::default()
        };
        TerrainMesh::plane(32.0, 16, 99, options)
    }

    #[test]
    fn plane_has_expected_grid() {
        let mesh = small_mesh();
        assert_eq!(mesh.vertices.len(), 17 * 17);
        // Corners sit at ±extent/2, the plane is centered.
        assert_relative_eq!(mesh.at(0, 0).x, -16.0);
        assert_relative_eq!(mesh.at(0, 0).z, -16.0);
        assert_relative_eq!(mesh.at(16, 16).x, 16.0);
        assert_relative_eq!(mesh.at(16, 16).z, 16.0);
        assert!(mesh.vertices.iter().all(|v| v.y == 0.0));
    }

    #[test]
    fn displacement_rewrites_only_the_height() {
        let mut mesh = small_mesh();
        let before: Vec<(u32, u32)> = mesh
            .vertices
            .iter()
            .map(|v| (v.x.to_bits(), v.z.to_bits()))
            .collect();
        mesh.displace_heights(&Ridge::new(SimplexSource::new(mesh.seed)));
        let after: Vec<(u32, u32)> = mesh
            .vertices
            .iter()
            .map(|v| (v.x.to_bits(), v.z.to_bits()))
            .collect();
        assert_eq!(before, after);
        // A ridged fractal field is not flat.
        let (min, max) = mesh.height_range();
        assert!(max > min);
    }

    #[test]
    fn displacement_matches_direct_evaluation() {
        let mut mesh = small_mesh();
        let field = Ridge::new(SimplexSource::new(mesh.seed));
        let probe = mesh.at(5, 9);
        let expected = fractal_noise3(
            probe.x as f64,
            probe.y as f64,
            probe.z as f64,
            &field,
            &mesh.options,
        ) as f32;
        mesh.displace_heights(&field);
        assert_eq!(mesh.at(5, 9).y.to_bits(), expected.to_bits());
    }

    #[test]
    fn displacement_is_reproducible_per_seed() {
        let mut a = small_mesh();
        let mut b = small_mesh();
        a.displace_heights(&Ridge::new(SimplexSource::new(a.seed)));
        b.displace_heights(&Ridge::new(SimplexSource::new(b.seed)));
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.y.to_bits(), vb.y.to_bits());
        }
    }
}
