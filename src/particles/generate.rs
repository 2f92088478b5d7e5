use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    assets::decode::SourceImageSample,
    foundation::{
        core::{ObjectWindow, Rgb, Vec3},
        math::Fnv1a64,
    },
    particles::buffer::ParticleBuffer,
};

/// Total span of the uniform x/y jitter added to each sampled particle.
pub const POSITION_JITTER: f32 = 0.05;
/// Maximum magnitude of the random depth given to each particle.
pub const DEPTH_JITTER: f32 = 0.05;

/// Convert `sample` into exactly `count` particles.
///
/// Particle `i` takes the valid pixel at `floor(i / count * valid_len)`, so when `count` exceeds
/// the number of valid pixels several particles share a pixel. A sample with no valid pixels yields
/// a uniform random cloud over the same object-space window, colored [`Rgb::NEUTRAL_GRAY`].
pub fn generate_particles<R: Rng>(
    sample: &SourceImageSample,
    count: usize,
    rng: &mut R,
) -> ParticleBuffer {
    let window = ObjectWindow::for_image(sample.width, sample.height);
    let valid = sample.valid_pixels();
    let mut out = ParticleBuffer::with_capacity(count);

    if valid.is_empty() {
        tracing::debug!(count, "no valid pixels, using fallback cloud");
        for _ in 0..count {
            let (x, y) = window.map_unit(rng.random::<f32>(), rng.random::<f32>());
            let z = depth_jitter(rng);
            out.push(Vec3::new(x, y, z), Rgb::NEUTRAL_GRAY);
        }
        return out;
    }

    let n = valid.len();
    for i in 0..count {
        let pick = ((i as f64 / count as f64) * n as f64).floor() as usize;
        let px = valid[pick.min(n - 1)];
        let (x, y) = window.map_pixel(px.x, px.y, sample.width, sample.height);
        let jx = (rng.random::<f32>() - 0.5) * POSITION_JITTER;
        let jy = (rng.random::<f32>() - 0.5) * POSITION_JITTER;
        let z = depth_jitter(rng);
        out.push(Vec3::new(x + jx, y + jy, z), px.color);
    }
    out
}

/// [`generate_particles`] with a [`StdRng`] seeded from `seed`.
pub fn generate_particles_seeded(
    sample: &SourceImageSample,
    count: usize,
    seed: u64,
) -> ParticleBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_particles(sample, count, &mut rng)
}

/// Per-asset generator seed, stable across runs for the same session seed and asset id.
pub fn seed_for_asset(session_seed: u64, asset_id: &str) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(session_seed);
    h.write_bytes(asset_id.as_bytes());
    h.finish()
}

fn depth_jitter<R: Rng>(rng: &mut R) -> f32 {
    (rng.random::<f32>() * 2.0 - 1.0) * DEPTH_JITTER
}

#[cfg(test)]
#[path = "../../tests/unit/particles/generate.rs"]
mod tests;
