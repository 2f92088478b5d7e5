use rayon::prelude::*;

use crate::{
    animation::ease::Ease,
    effects::{
        color::ColorGrading,
        styles::{StyleCtx, depth_from_brightness, displace, idle_offset},
        transitions::{JitterMode, TransitionStyle},
    },
    foundation::{
        core::{Rgb, Vec3},
        error::{PixmorphError, PixmorphResult},
    },
    particles::buffer::ParticleBuffer,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-session parameters of the transition evaluator.
pub struct TransitionParams {
    /// Displacement algorithm.
    pub style: TransitionStyle,
    /// Curve applied to linear progress before evaluation.
    pub easing: Ease,
    /// Color grading applied to every displayed particle.
    pub grading: ColorGrading,
    /// Offset particle depth by color brightness.
    pub depth_enabled: bool,
    /// Keying of the random sub-terms of `explode`, `gravity` and `shatter`.
    pub jitter_mode: JitterMode,
    /// Seed for per-particle random terms.
    pub seed: u64,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            style: TransitionStyle::Morph,
            easing: Ease::InOutCubic,
            grading: ColorGrading::NEUTRAL,
            depth_enabled: false,
            jitter_mode: JitterMode::Stable,
            seed: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Frame-varying inputs of one evaluation.
pub struct FrameInputs {
    /// Linear transition progress in `[0, 1]` (before easing).
    pub progress: f64,
    /// Accumulated playback time in seconds.
    pub time: f64,
    /// Whether playback is running; enables idle motion at rest.
    pub playing: bool,
    /// Number of images on the timeline.
    pub image_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Controls how the per-particle loop is scheduled.
pub struct EvalThreading {
    /// Split particles across rayon workers when `true`.
    pub parallel: bool,
    /// Particles per parallel work item.
    pub chunk_particles: usize,
    /// Buffers smaller than this are always evaluated sequentially.
    pub min_parallel_particles: usize,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_particles: 4096,
            min_parallel_particles: 8192,
        }
    }
}

impl EvalThreading {
    /// Single-threaded evaluation.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

/// Everything a particle needs that is constant across one frame.
struct Kernel {
    style: TransitionStyle,
    eased: f32,
    colors_at_rest: bool,
    idle: bool,
    time: f64,
    depth_enabled: bool,
    grading: ColorGrading,
    ctx: StyleCtx,
}

impl Kernel {
    fn new(params: &TransitionParams, inputs: &FrameInputs) -> Self {
        let progress = inputs.progress.clamp(0.0, 1.0);
        let at_rest = progress <= 0.0;
        Self {
            style: params.style,
            eased: params.easing.apply(progress) as f32,
            colors_at_rest: at_rest || inputs.image_count <= 1,
            idle: at_rest && inputs.playing,
            time: inputs.time,
            depth_enabled: params.depth_enabled,
            grading: params.grading,
            ctx: StyleCtx::new(params.seed, params.jitter_mode, inputs.time),
        }
    }

    #[inline]
    fn particle(&self, i: usize, sp: Vec3, tp: Vec3, sc: Rgb, tc: Rgb) -> (Vec3, Rgb) {
        let mut pos = displace(self.style, sp, tp, self.eased, i, &self.ctx);
        if self.idle {
            pos += idle_offset(i, self.time);
        }

        let base = if self.colors_at_rest {
            sc
        } else {
            sc.lerp(tc, self.eased)
        };
        if self.depth_enabled {
            pos.z += depth_from_brightness(base.mean());
        }
        (pos, self.grading.apply(base))
    }

    fn run(
        &self,
        first: usize,
        source: &ParticleBuffer,
        target: &ParticleBuffer,
        pos_out: &mut [f32],
        col_out: &mut [f32],
    ) {
        for (j, (p, c)) in pos_out
            .chunks_exact_mut(3)
            .zip(col_out.chunks_exact_mut(3))
            .enumerate()
        {
            let i = first + j;
            let (pos, col) = self.particle(
                i,
                source.position(i),
                target.position(i),
                source.color(i),
                target.color(i),
            );
            p.copy_from_slice(&[pos.x, pos.y, pos.z]);
            c.copy_from_slice(&[col.r, col.g, col.b]);
        }
    }
}

/// Evaluate one displayed frame from an index-aligned `source`/`target` pair.
///
/// Pure: the same inputs always produce the same buffer, whether or not the loop runs in parallel.
pub fn evaluate_frame(
    source: &ParticleBuffer,
    target: &ParticleBuffer,
    params: &TransitionParams,
    inputs: &FrameInputs,
) -> PixmorphResult<ParticleBuffer> {
    let mut out = ParticleBuffer::zeroed(source.len());
    evaluate_frame_into(
        source,
        target,
        params,
        inputs,
        &EvalThreading::default(),
        &mut out,
    )?;
    Ok(out)
}

/// [`evaluate_frame`] writing into a caller-owned buffer, resized to `source.len()` if needed.
#[tracing::instrument(level = "trace", skip(source, target, out), fields(n = source.len()))]
pub fn evaluate_frame_into(
    source: &ParticleBuffer,
    target: &ParticleBuffer,
    params: &TransitionParams,
    inputs: &FrameInputs,
    threading: &EvalThreading,
    out: &mut ParticleBuffer,
) -> PixmorphResult<()> {
    if source.len() != target.len() {
        return Err(PixmorphError::evaluation(format!(
            "source and target buffers differ in length ({} vs {})",
            source.len(),
            target.len()
        )));
    }

    let n = source.len();
    if out.len() != n {
        out.resize(n);
    }
    let kernel = Kernel::new(params, inputs);
    let (pos_out, col_out) = out.arrays_mut();

    if threading.parallel && n >= threading.min_parallel_particles {
        let chunk = threading.chunk_particles.max(1) * 3;
        pos_out
            .par_chunks_mut(chunk)
            .zip(col_out.par_chunks_mut(chunk))
            .enumerate()
            .for_each(|(k, (p, c))| kernel.run(k * (chunk / 3), source, target, p, c));
    } else {
        kernel.run(0, source, target, pos_out, col_out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
