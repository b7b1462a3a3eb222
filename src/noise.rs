// Coherent value noise for the poster's animated textures.
//
// The algorithm is fixed so frames reproduce bit-for-bit on any platform:
// - a 4096-entry lattice of values in [0,1), filled by xorshift32 from `seed`
// - lookup index `xi + (yi << 4) + (zi << 8)`, wrapped to the lattice size
// - smoothed-cosine interpolation between lattice neighbours
// - `octaves` layers; each doubles frequency and scales amplitude by `falloff`
// - the sum is divided by the total amplitude, so results stay in [0,1]

use std::f32::consts::PI;

const LATTICE_BITS: u32 = 12;
const LATTICE_SIZE: usize = 1 << LATTICE_BITS;
const LATTICE_MASK: usize = LATTICE_SIZE - 1;
const Y_STRIDE_BITS: u32 = 4;
const Z_STRIDE_BITS: u32 = 8;

pub const DEFAULT_SEED: u32 = 0x5EED_1234;
pub const DEFAULT_OCTAVES: u32 = 8;
pub const DEFAULT_FALLOFF: f32 = 0.6;

/// Deterministic xorshift32 RNG; only used to fill the lattice.
#[derive(Clone)]
struct Rng32 { state: u32 }

impl Rng32 {
    fn from_seed(seed: u32) -> Self { Self { state: seed | 1 } }
    #[inline] fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
    /// Uniform [0,1) with 24 bits of precision.
    #[inline] fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }
}

#[inline]
fn smooth(f: f32) -> f32 {
    0.5 * (1.0 - (f * PI).cos())
}

/// Splits |v| into a lattice cell (already wrapped) and the fraction inside it.
#[inline]
fn split(v: f32) -> (usize, f32) {
    let v = v.abs();
    let cell = v.floor();
    ((cell as u64 as usize) & LATTICE_MASK, v - cell)
}

pub struct NoiseField {
    lattice: Box<[f32]>,
    octaves: u32,
    falloff: f32,
    norm: f32,
}

impl NoiseField {
    /// Build the lattice for `seed`. `octaves` is at least 1; `falloff` is clamped to (0,1].
    pub fn new(seed: u32, octaves: u32, falloff: f32) -> Self {
        let mut rng = Rng32::from_seed(seed);
        let lattice: Box<[f32]> = (0..LATTICE_SIZE).map(|_| rng.next_f32()).collect();

        let octaves = octaves.max(1);
        let falloff = if falloff.is_finite() { falloff.clamp(f32::EPSILON, 1.0) } else { DEFAULT_FALLOFF };
        let mut norm = 0.0;
        let mut amp = 0.5;
        for _ in 0..octaves {
            norm += amp;
            amp *= falloff;
        }

        Self { lattice, octaves, falloff, norm }
    }

    #[inline]
    fn at(&self, idx: usize) -> f32 {
        self.lattice[idx & LATTICE_MASK]
    }

    /// 1D sample; same as `sample3(x, 0, 0)`.
    pub fn sample1(&self, x: f32) -> f32 {
        self.sample3(x, 0.0, 0.0)
    }

    /// 2D sample; same as `sample3(x, y, 0)`.
    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        self.sample3(x, y, 0.0)
    }

    /// Noise value in [0,1] at (x,y,z). Negative coordinates mirror their absolute value.
    pub fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        let (mut xi, mut xf) = split(x);
        let (mut yi, mut yf) = split(y);
        let (mut zi, mut zf) = split(z);

        let mut sum = 0.0;
        let mut amp = 0.5;
        for _ in 0..self.octaves {
            let sx = smooth(xf);
            let sy = smooth(yf);
            let sz = smooth(zf);

            let base = xi
                .wrapping_add(yi << Y_STRIDE_BITS)
                .wrapping_add(zi << Z_STRIDE_BITS);
            let row = |o: usize| {
                let a = self.at(o);
                a + sx * (self.at(o + 1) - a)
            };
            let plane = |o: usize| {
                let near = row(o);
                near + sy * (row(o + (1 << Y_STRIDE_BITS)) - near)
            };
            let front = plane(base);
            let back = plane(base.wrapping_add(1 << Z_STRIDE_BITS));
            sum += (front + sz * (back - front)) * amp;
            amp *= self.falloff;

            // next octave: double the frequency, carrying the fraction into the cell
            (xi, xf) = double(xi, xf);
            (yi, yf) = double(yi, yf);
            (zi, zf) = double(zi, zf);
        }

        (sum / self.norm).clamp(0.0, 1.0)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_OCTAVES, DEFAULT_FALLOFF)
    }
}

#[inline]
fn double(cell: usize, frac: f32) -> (usize, f32) {
    let cell = cell.wrapping_shl(1) & LATTICE_MASK;
    let frac = frac * 2.0;
    if frac >= 1.0 { (cell + 1, frac - 1.0) } else { (cell, frac) }
}
