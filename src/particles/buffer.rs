use crate::foundation::{
    core::{Rgb, Vec3},
    error::{PixmorphError, PixmorphResult},
};

#[derive(Clone, Debug, Default, PartialEq)]
/// Fixed-length particle set stored as flat `xyz` / `rgb` arrays.
///
/// `positions().len() == colors().len() == 3 * len()` always holds. Buffers generated for
/// different images of one session share the same length so they can be interpolated by index.
pub struct ParticleBuffer {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleBuffer {
    /// `count` particles at the origin, colored black.
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
        }
    }

    /// Build from flat arrays, checking the length invariant.
    pub fn from_parts(positions: Vec<f32>, colors: Vec<f32>) -> PixmorphResult<Self> {
        if positions.len() % 3 != 0 || positions.len() != colors.len() {
            return Err(PixmorphError::evaluation(format!(
                "particle arrays must have equal length divisible by 3 (positions={}, colors={})",
                positions.len(),
                colors.len()
            )));
        }
        Ok(Self { positions, colors })
    }

    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3),
            colors: Vec::with_capacity(count * 3),
        }
    }

    pub(crate) fn push(&mut self, position: Vec3, color: Rgb) {
        self.positions
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.colors.extend_from_slice(&[color.r, color.g, color.b]);
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// `true` when the buffer holds no particles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x0, y0, z0, x1, ...]` array.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r0, g0, b0, r1, ...]` array.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Position of particle `i`. Panics if out of range.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Color of particle `i`. Panics if out of range.
    pub fn color(&self, i: usize) -> Rgb {
        let c = &self.colors[i * 3..i * 3 + 3];
        Rgb::new(c[0], c[1], c[2])
    }

    pub(crate) fn arrays_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.positions, &mut self.colors)
    }

    /// Resize to `count` particles, zero-filling new slots.
    pub(crate) fn resize(&mut self, count: usize) {
        self.positions.resize(count * 3, 0.0);
        self.colors.resize(count * 3, 0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/buffer.rs"]
mod tests;
