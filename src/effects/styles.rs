//! Closed-form particle displacement for each [`TransitionStyle`].
//!
//! Every function here is pure in `(source, target, eased progress, particle index, time)`; nothing
//! reads neighbouring particles, so callers may evaluate particles in any order or in parallel.

use std::f32::consts::{PI, TAU};

use crate::{
    effects::transitions::{JitterMode, TransitionStyle},
    foundation::{
        core::Vec3,
        math::{hash_unit_vec3, hash01, mix64, smoothstep01},
    },
};

const EXPLODE_REACH: f32 = 2.0;
const SWIRL_RADIUS: f32 = 1.0;
const WAVE_AMP: f32 = 0.5;
const WAVE_FREQ: f32 = 2.0;
const DEPTH_PUSH: f32 = 3.0;
const DISSOLVE_SPREAD: f32 = 0.5;
const DISSOLVE_DRIFT: f32 = 0.6;
const SPIRAL_GROW: f32 = 0.5;
const SPIRAL_LIFT: f32 = 0.5;
const GRAVITY_STAGGER: f32 = 0.3;
const GRAVITY_DROP: f32 = 3.0;
const GRAVITY_BOUNCE: f32 = 0.4;
const VORTEX_TURNS: f32 = 3.0;
const VORTEX_DEPTH: f32 = 2.0;
const PIXEL_MIN: f32 = 0.05;
const PIXEL_MAX: f32 = 0.35;
const SHATTER_DIST: f32 = 2.5;
const SHATTER_FALL: f32 = 1.0;
const MAGNET_RADIUS: f32 = 1.5;
const MAGNET_STRENGTH: f32 = 0.8;
const RIPPLE_FREQ: f32 = 6.0;
const RIPPLE_AMP: f32 = 0.4;
const SCATTER_EXTENT: Vec3 = Vec3::new(3.0, 2.0, 1.5);
const TORNADO_TURNS: f32 = 4.0;
const TORNADO_LIFT: f32 = 1.0;

/// Upper bound of the idle drift on each axis.
pub const IDLE_AMPLITUDE: f32 = 0.02;

// Distinct salts keep per-style random streams independent.
const SALT_EXPLODE: u64 = 0x01;
const SALT_SWIRL: u64 = 0x02;
const SALT_DISSOLVE: u64 = 0x03;
const SALT_DISSOLVE_DIR: u64 = 0x04;
const SALT_SPIRAL: u64 = 0x06;
const SALT_GRAVITY: u64 = 0x07;
const SALT_SHATTER_DIR: u64 = 0x08;
const SALT_SHATTER_DIST: u64 = 0x0A;
const SALT_SCATTER: u64 = 0x0B;
const SALT_TORNADO: u64 = 0x0E;

#[derive(Clone, Copy, Debug)]
/// Randomness context shared by every particle of one evaluated frame.
pub struct StyleCtx {
    seed: u64,
    frame_seed: u64,
}

impl StyleCtx {
    /// Build the context for a frame at `time` seconds.
    pub fn new(seed: u64, jitter: JitterMode, time: f64) -> Self {
        let frame_seed = match jitter {
            JitterMode::Stable => seed,
            JitterMode::PerFrame => seed ^ mix64(time.to_bits()),
        };
        Self { seed, frame_seed }
    }

    /// Per-particle value that never changes between frames.
    fn stable01(&self, index: u64, salt: u64) -> f32 {
        hash01(self.seed, index, salt)
    }

    /// Per-particle value that follows the configured [`JitterMode`].
    fn jitter01(&self, index: u64, salt: u64) -> f32 {
        hash01(self.frame_seed, index, salt)
    }

    fn jitter_dir(&self, index: u64, salt: u64) -> Vec3 {
        hash_unit_vec3(self.frame_seed, index, salt)
    }
}

/// Displayed position of particle `index` for `style`.
///
/// Returns `source` exactly when `eased <= 0` and `target` exactly when `eased >= 1`.
pub fn displace(
    style: TransitionStyle,
    source: Vec3,
    target: Vec3,
    eased: f32,
    index: usize,
    ctx: &StyleCtx,
) -> Vec3 {
    if eased <= 0.0 {
        return source;
    }
    if eased >= 1.0 {
        return target;
    }

    let i = index as u64;
    let e = eased;
    let base = source.lerp(target, e);
    let env = (e * PI).sin();

    match style {
        TransitionStyle::Morph => base,
        TransitionStyle::Explode => {
            let dir = radial_or_random(source, ctx, i);
            let reach = EXPLODE_REACH * (0.5 + ctx.jitter01(i, SALT_EXPLODE));
            let force = if e < 0.5 {
                ((e * 2.0) * PI).sin()
            } else {
                let b = (e - 0.5) * 2.0;
                (b * PI).sin() * (1.0 - b)
            };
            base + dir * reach * force
        }
        TransitionStyle::Swirl => {
            let angle = e * 2.0 * TAU + ctx.stable01(i, SALT_SWIRL) * TAU;
            let (sn, cs) = angle.sin_cos();
            base + Vec3::new(cs, sn, 0.0) * SWIRL_RADIUS * env
        }
        TransitionStyle::Wave => {
            let amp = WAVE_AMP * env;
            let k = e * 2.0 * TAU;
            base + Vec3::new(
                0.0,
                amp * (source.x * WAVE_FREQ + k).sin(),
                amp * (source.y * WAVE_FREQ + k).cos(),
            )
        }
        TransitionStyle::Depth => {
            let push = if e < 0.5 {
                -DEPTH_PUSH * ((e * 2.0) * PI).sin()
            } else {
                -0.5 * DEPTH_PUSH * (((e - 0.5) * 2.0) * PI).sin()
            };
            base + Vec3::new(0.0, 0.0, push)
        }
        TransitionStyle::Dissolve => {
            let delay = ctx.stable01(i, SALT_DISSOLVE) * DISSOLVE_SPREAD;
            let local = ((e - delay) / (1.0 - DISSOLVE_SPREAD)).clamp(0.0, 1.0);
            let drift = hash_unit_vec3(ctx.seed, i, SALT_DISSOLVE_DIR)
                * DISSOLVE_DRIFT
                * (local * PI).sin();
            source.lerp(target, smoothstep01(local)) + drift
        }
        TransitionStyle::Spiral => {
            let theta = env * TAU;
            let grow = 1.0 + env * SPIRAL_GROW;
            let (sn, cs) = theta.sin_cos();
            let lift = env * SPIRAL_LIFT * (theta + ctx.stable01(i, SALT_SPIRAL) * TAU).sin();
            Vec3::new(
                (base.x * cs - base.y * sn) * grow,
                (base.x * sn + base.y * cs) * grow,
                base.z + lift,
            )
        }
        TransitionStyle::Gravity => {
            let delay = ctx.jitter01(i, SALT_GRAVITY) * GRAVITY_STAGGER;
            let l = ((e - delay) / (1.0 - delay)).clamp(0.0, 1.0);
            let fall = GRAVITY_DROP * 4.0 * l * (1.0 - l);
            let bounce = GRAVITY_BOUNCE * (l * 3.0 * PI).sin().abs() * (1.0 - l);
            source.lerp(target, l) + Vec3::new(0.0, bounce - fall, 0.0)
        }
        TransitionStyle::Vortex => {
            let xy = source.truncate();
            let angle = xy.y.atan2(xy.x) + e * VORTEX_TURNS * TAU;
            let radius = xy.length() * (1.0 - e);
            let (sn, cs) = angle.sin_cos();
            Vec3::new(
                cs * radius + target.x * e,
                sn * radius + target.y * e,
                base.z - VORTEX_DEPTH * env,
            )
        }
        TransitionStyle::Pixelate => {
            let cell = PIXEL_MIN + PIXEL_MAX * env;
            let snapped = Vec3::new(
                (base.x / cell).round() * cell,
                (base.y / cell).round() * cell,
                base.z,
            );
            base.lerp(snapped, env)
        }
        TransitionStyle::Shatter => {
            let dir = ctx.jitter_dir(i, SALT_SHATTER_DIR);
            let dist = SHATTER_DIST * (0.3 + 0.7 * ctx.jitter01(i, SALT_SHATTER_DIST));
            base + dir * dist * env - Vec3::Y * SHATTER_FALL * env * env
        }
        TransitionStyle::Magnetic => {
            let xy = base.truncate();
            let d = xy.length();
            let radial = xy.normalize_or_zero();
            let shift = if d < MAGNET_RADIUS {
                -d.min(MAGNET_STRENGTH)
            } else {
                MAGNET_STRENGTH
            };
            base + (radial * shift * env).extend(0.0)
        }
        TransitionStyle::Ripple => {
            let xy = base.truncate();
            let d = xy.length();
            let wave = (d * RIPPLE_FREQ - e * 2.0 * TAU).sin() * RIPPLE_AMP * env;
            base + (xy.normalize_or_zero() * wave * 0.25).extend(wave)
        }
        TransitionStyle::Scatter => {
            let spot = scatter_point(ctx, i);
            if e < 0.5 {
                source.lerp(spot, smoothstep01(e * 2.0))
            } else {
                spot.lerp(target, smoothstep01(e * 2.0 - 1.0))
            }
        }
        TransitionStyle::Tornado => {
            let turn = e * TORNADO_TURNS * TAU + ctx.stable01(i, SALT_TORNADO) * TAU;
            let funnel = (0.3 + (base.y + 2.0) * 0.35).max(0.1) * env;
            let (sn, cs) = turn.sin_cos();
            base + Vec3::new(cs * funnel, TORNADO_LIFT * env, sn * funnel)
        }
    }
}

/// Cosmetic "breathing" offset applied to resting particles while playing.
pub fn idle_offset(index: usize, time: f64) -> Vec3 {
    let t = time as f32;
    let i = index as f32;
    let a = IDLE_AMPLITUDE * 0.5;
    Vec3::new(
        a * (t * 0.9 + i * 0.011).sin(),
        a * (t * 0.7 + i * 0.017).cos(),
        a * (t * 1.3 + i * 0.007).sin(),
    )
}

/// Z offset derived from color brightness (`brightness * 0.5 - 0.25`).
pub fn depth_from_brightness(brightness: f32) -> f32 {
    brightness * 0.5 - 0.25
}

fn radial_or_random(p: Vec3, ctx: &StyleCtx, i: u64) -> Vec3 {
    let dir = p.normalize_or_zero();
    if dir == Vec3::ZERO {
        ctx.jitter_dir(i, SALT_EXPLODE.wrapping_add(0x100))
    } else {
        dir
    }
}

fn scatter_point(ctx: &StyleCtx, i: u64) -> Vec3 {
    let u = Vec3::new(
        ctx.stable01(i, SALT_SCATTER),
        ctx.stable01(i, SALT_SCATTER + 0x10),
        ctx.stable01(i, SALT_SCATTER + 0x20),
    );
    (u * 2.0 - Vec3::ONE) * SCATTER_EXTENT
}

#[cfg(test)]
#[path = "../../tests/unit/effects/styles.rs"]
mod tests;
