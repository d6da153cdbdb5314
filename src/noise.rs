//! 2-D simplex noise over a shuffled permutation table.

use rand::seq::SliceRandom;
use rand::Rng;

const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

const GRAD2: [[f64; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Immutable once built; duplicated to 512 entries so corner lookups never wrap.
#[derive(Clone)]
pub struct Simplex2 {
    perm: [u8; 512],
}

impl Simplex2 {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        table.shuffle(rng);

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { perm }
    }

    /// Noise value in roughly `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let p = &self.perm;

        let g0 = p[ii + p[jj] as usize] as usize;
        let g1 = p[ii + i1 + p[jj + j1] as usize] as usize;
        let g2 = p[ii + 1 + p[jj + 1] as usize] as usize;

        70.0 * (corner(g0, x0, y0) + corner(g1, x1, y1) + corner(g2, x2, y2))
    }
}

fn corner(hash: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let [gx, gy] = GRAD2[hash % 8];
    let t2 = t * t;
    t2 * t2 * (gx * x + gy * y)
}

impl std::fmt::Debug for Simplex2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simplex2").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn skew_constants() {
        let s3 = 3.0f64.sqrt();
        assert!((F2 - 0.5 * (s3 - 1.0)).abs() < 1e-15);
        assert!((G2 - (3.0 - s3) / 6.0).abs() < 1e-15);
    }

    #[test]
    fn table_is_a_doubled_permutation() {
        let noise = Simplex2::new(&mut SmallRng::seed_from_u64(7));
        let mut seen = [false; 256];
        for &v in &noise.perm[..256] {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(noise.perm[..256], noise.perm[256..]);
    }

    #[test]
    fn bounded_and_deterministic() {
        let a = Simplex2::new(&mut SmallRng::seed_from_u64(42));
        let b = Simplex2::new(&mut SmallRng::seed_from_u64(42));
        for k in 0..2_000 {
            let x = k as f64 * 0.173 - 90.0;
            let y = k as f64 * 0.091 + 3.0;
            let v = a.sample(x, y);
            assert!(v.is_finite() && v.abs() <= 1.0, "noise({x}, {y}) = {v}");
            assert_eq!(v, b.sample(x, y));
        }
    }

    #[test]
    fn lattice_origin_is_zero() {
        let noise = Simplex2::new(&mut SmallRng::seed_from_u64(1));
        assert_eq!(noise.sample(0.0, 0.0), 0.0);
    }

    #[test]
    fn nearby_samples_are_close() {
        let noise = Simplex2::new(&mut SmallRng::seed_from_u64(3));
        let a = noise.sample(12.5, 4.25);
        let b = noise.sample(12.5 + 1e-4, 4.25);
        assert!((a - b).abs() < 1e-2);
    }
}
