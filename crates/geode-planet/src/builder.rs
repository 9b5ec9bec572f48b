//! Displaced planet surface construction.
//!
//! The surface is built on a unit cube-sphere, displaced radially by the
//! terrain field, scaled to the target radius, and finally given normals
//! reconstructed from the displaced triangles.

use geode_cubesphere::{CubeSphereMesher, MeshBuffers};
use geode_terrain::{NoiseSource2D, TerrainField};
use glam::Vec3;
use tracing::debug;

use crate::{ElevationRange, GenerationError};

/// A finished planet surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetMesh {
    /// Final, radius-scaled surface buffers.
    pub mesh: MeshBuffers,
    /// Elevation range measured on the unit-radius mesh, before scaling.
    pub unit_range: ElevationRange,
    /// `unit_range` multiplied by the target radius.
    pub range: ElevationRange,
}

/// Builds displaced planet surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetMeshBuilder {
    resolution: u32,
    radius: f32,
    workers: usize,
}

impl PlanetMeshBuilder {
    /// Create a single-threaded builder.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Mesh`] if the resolution or radius violates the
    /// mesher's bounds.
    pub fn new(resolution: u32, radius: f32) -> Result<Self, GenerationError> {
        CubeSphereMesher::new(resolution, radius)?;
        Ok(Self {
            resolution,
            radius,
            workers: 1,
        })
    }

    /// Split displacement across `workers` threads. `0` uses one thread per
    /// logical CPU. Output is bit-identical for every worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 {
            num_cpus::get()
        } else {
            workers
        };
        self
    }

    /// Grid resolution (cells per face edge).
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Target radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Build a fresh planet surface.
    ///
    /// # Errors
    ///
    /// See [`PlanetMeshBuilder::build_into`].
    pub fn build<S>(&self, field: &TerrainField<S>) -> Result<PlanetMesh, GenerationError>
    where
        S: NoiseSource2D + Sync,
    {
        let mut mesh = MeshBuffers::new();
        let unit_range = self.build_into(&mut mesh, field)?;
        Ok(PlanetMesh {
            mesh,
            unit_range,
            range: unit_range.scaled(self.radius),
        })
    }

    /// Clear `mesh` and refill it with the displaced surface, reusing its
    /// allocations. Returns the unit-space elevation range.
    ///
    /// # Errors
    ///
    /// Only the mesher's parameter checks can fail; they were already run by
    /// [`PlanetMeshBuilder::new`], so in practice this does not fail.
    pub fn build_into<S>(
        &self,
        mesh: &mut MeshBuffers,
        field: &TerrainField<S>,
    ) -> Result<ElevationRange, GenerationError>
    where
        S: NoiseSource2D + Sync,
    {
        CubeSphereMesher::new(self.resolution, 1.0)?.fill(mesh);

        let unit_range = self.displace(&mut mesh.positions, field);

        for p in &mut mesh.positions {
            let elevation = p.length();
            *p = p.normalize_or_zero() * (elevation * self.radius);
        }

        mesh.recompute_normals();

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            unit_min = unit_range.min,
            unit_max = unit_range.max,
            workers = self.workers,
            "Displaced planet surface"
        );
        Ok(unit_range)
    }

    /// Displace unit-sphere positions in place and reduce their magnitudes.
    fn displace<S>(&self, positions: &mut [Vec3], field: &TerrainField<S>) -> ElevationRange
    where
        S: NoiseSource2D + Sync,
    {
        let workers = self.workers.clamp(1, positions.len().max(1));
        if workers == 1 {
            return displace_chunk(positions, field);
        }

        let chunk_len = positions.len().div_ceil(workers);
        std::thread::scope(|scope| {
            let handles: Vec<_> = positions
                .chunks_mut(chunk_len)
                .map(|chunk| scope.spawn(move || displace_chunk(chunk, field)))
                .collect();

            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(range) => range,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .fold(ElevationRange::EMPTY, ElevationRange::merge)
        })
    }
}

fn displace_chunk<S: NoiseSource2D>(
    positions: &mut [Vec3],
    field: &TerrainField<S>,
) -> ElevationRange {
    let mut range = ElevationRange::EMPTY;
    for p in positions {
        let magnitude = p.length();
        let direction = *p / magnitude;
        let displacement = field.evaluate(direction);
        *p = direction * (magnitude + displacement);
        range.include(p.length());
    }
    range
}
