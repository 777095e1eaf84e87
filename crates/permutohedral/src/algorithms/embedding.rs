//! Embedding of feature points onto the permutohedral lattice.
//!
//! ## Purpose
//!
//! This module finds, for a d-dimensional feature vector, the enclosing
//! simplex of the permutohedral lattice in the zero-sum hyperplane of
//! R^(d+1): its d + 1 corner keys and the point's barycentric weights with
//! respect to those corners (Adams, Baek & Davis 2010).
//!
//! ## Design notes
//!
//! * **Integer keys**: The nearest zero-coloured point is held as `i32`
//!   multiples of `d + 1`, and corner keys are formed by integer addition, so
//!   the zero-sum property is exact.
//! * **Reusable scratch**: An `Embedder` owns its scratch vectors and is
//!   reused across points (one per thread in parallel passes).
//!
//! ## Key concepts
//!
//! 1. **Elevate**: Scale the feature and map it onto the hyperplane.
//! 2. **Round**: Round each coordinate to the nearest multiple of `d + 1`.
//! 3. **Rank**: Order coordinates by rounding remainder; ties keep the lower
//!    index first, which makes the simplex choice deterministic.
//! 4. **Re-project**: Wrap ranks and remainders so the rounded point sums to zero.
//! 5. **Barycentric**: Differences of sorted remainders give the corner weights.
//!
//! ## Invariants
//!
//! * Every corner key sums to exactly zero.
//! * Corner weights lie in [0, 1] and sum to one (up to rounding).
//!
//! ## Non-goals
//!
//! * This module does not assign lattice slots (see the splat stage).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::canonical::CanonicalSimplex;
use crate::math::scaling::{constant, scale_factors};
use crate::primitives::buffer::EmbeddedPoints;
use crate::primitives::errors::LatticeError;

// ============================================================================
// Embedder
// ============================================================================

/// Reusable simplex finder for one lattice dimension.
#[derive(Debug, Clone)]
pub struct Embedder<T> {
    /// Feature dimension.
    d: usize,

    /// Per-coordinate scale factors.
    scale: Vec<T>,

    /// Corner offsets by remainder and rank.
    canonical: CanonicalSimplex,

    /// Elevated feature (d + 1).
    elevated: Vec<T>,

    /// Nearest zero-coloured lattice point (d + 1).
    rem0: Vec<i32>,

    /// Rank of each coordinate's remainder (d + 1).
    rank: Vec<i32>,

    /// Barycentric accumulator (d + 2).
    barycentric: Vec<T>,
}

impl<T: Float> Embedder<T> {
    /// Create an embedder for `d`-dimensional features.
    pub fn new(d: usize, with_blur: bool) -> Self {
        Self {
            d,
            scale: scale_factors(d, with_blur),
            canonical: CanonicalSimplex::new(d),
            elevated: vec![T::zero(); d + 1],
            rem0: vec![0; d + 1],
            rank: vec![0; d + 1],
            barycentric: vec![T::zero(); d + 2],
        }
    }

    /// Feature dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.d
    }

    /// Embed one feature vector.
    ///
    /// Writes `d + 1` corner keys of `d + 1` coordinates each into `keys`
    /// (corner-major) and the matching barycentric weights into `weights`.
    pub fn embed(
        &mut self,
        feature: &[T],
        keys: &mut [i32],
        weights: &mut [T],
    ) -> Result<(), LatticeError> {
        let d = self.d;
        let dp1 = d + 1;
        debug_assert_eq!(feature.len(), d);
        debug_assert_eq!(keys.len(), dp1 * dp1);
        debug_assert_eq!(weights.len(), dp1);

        self.elevate(feature);
        let sum = self.round()?;
        self.rank_remainders();
        self.reproject(sum);
        self.barycentric_weights();

        for remainder in 0..dp1 {
            let key = &mut keys[remainder * dp1..(remainder + 1) * dp1];
            for (i, k) in key.iter_mut().enumerate() {
                *k = self.rem0[i] + self.canonical.offset(remainder, self.rank[i] as usize);
            }
            weights[remainder] = self.barycentric[remainder];
        }

        Ok(())
    }

    /// Elevated coordinates of the last embedded point.
    #[inline]
    pub fn elevated(&self) -> &[T] {
        &self.elevated
    }

    /// y = E f: scale, then spread onto the zero-sum hyperplane.
    fn elevate(&mut self, feature: &[T]) {
        let d = self.d;
        let mut running = T::zero();
        for j in (1..=d).rev() {
            let cf = feature[j - 1] * self.scale[j - 1];
            self.elevated[j] = running - constant::<T>(j as f64) * cf;
            running = running + cf;
        }
        self.elevated[0] = running;
    }

    /// Round to the nearest multiple of d + 1; returns the coordinate sum in
    /// units of d + 1.
    ///
    /// Rounded coordinates must leave room for the corner offsets (up to d),
    /// the reprojection wrap (d + 1) and the blur neighbour step (d), so
    /// every key derived from them stays inside `i32`.
    fn round(&mut self) -> Result<i32, LatticeError> {
        let dp1 = self.d + 1;
        let up_factor = constant::<T>(dp1 as f64);
        let down_factor = T::one() / up_factor;
        let limit = coordinate_limit(self.d);
        let mut sum = 0i32;

        for i in 0..dp1 {
            let e = self.elevated[i];
            let v = down_factor * e;
            let up = v.ceil() * up_factor;
            let down = v.floor() * up_factor;
            let nearest = if up - e < e - down { up } else { down };

            let rounded = nearest
                .to_i32()
                .filter(|r| (-limit..=limit).contains(r))
                .ok_or_else(|| {
                    LatticeError::InvalidNumericValue(format!(
                        "lattice coordinate {} out of range",
                        e.to_f64().unwrap_or(f64::NAN)
                    ))
                })?;
            self.rem0[i] = rounded;
            sum += rounded / dp1 as i32;
        }

        Ok(sum)
    }

    /// rank[i] = number of coordinates whose remainder is larger than i's.
    fn rank_remainders(&mut self) {
        let d = self.d;
        self.rank.fill(0);
        for i in 0..d {
            let di = self.remainder(i);
            for j in (i + 1)..=d {
                if di < self.remainder(j) {
                    self.rank[i] += 1;
                } else {
                    self.rank[j] += 1;
                }
            }
        }
    }

    /// Shift ranks by the rounding excess and wrap the overflowing
    /// coordinates to the neighbouring zero-coloured point.
    fn reproject(&mut self, sum: i32) {
        let dp1 = (self.d + 1) as i32;
        for i in 0..=self.d {
            self.rank[i] += sum;
            if self.rank[i] < 0 {
                self.rank[i] += dp1;
                self.rem0[i] += dp1;
            } else if self.rank[i] >= dp1 {
                self.rank[i] -= dp1;
                self.rem0[i] -= dp1;
            }
        }
    }

    /// Barycentric coordinates from the sorted remainders (p. 10 of Adams et al.).
    fn barycentric_weights(&mut self) {
        let d = self.d;
        let down_factor = T::one() / constant::<T>((d + 1) as f64);
        self.barycentric.fill(T::zero());

        for i in 0..=d {
            let v = self.remainder(i) * down_factor;
            let p = d - self.rank[i] as usize;
            self.barycentric[p] = self.barycentric[p] + v;
            self.barycentric[p + 1] = self.barycentric[p + 1] - v;
        }
        self.barycentric[0] = self.barycentric[0] + T::one() + self.barycentric[d + 1];
    }

    #[inline]
    fn remainder(&self, i: usize) -> T {
        self.elevated[i] - constant::<T>(self.rem0[i] as f64)
    }
}

/// Largest magnitude a rounded coordinate may have in dimension `d`.
#[inline]
fn coordinate_limit(d: usize) -> i32 {
    let margin = i32::try_from(4 * (d + 1)).unwrap_or(i32::MAX);
    i32::MAX - margin
}

// ============================================================================
// Embedding Pass
// ============================================================================

/// Embed every row of a row-major `N x d` feature matrix.
pub fn embed_pass<T: Float>(
    features: &[T],
    d: usize,
    with_blur: bool,
    out: &mut EmbeddedPoints<T>,
) -> Result<(), LatticeError> {
    let key_block = out.key_size * out.key_size;
    let mut embedder = Embedder::new(d, with_blur);

    for ((feature, keys), weights) in features
        .chunks_exact(d)
        .zip(out.keys.chunks_exact_mut(key_block))
        .zip(out.weights.chunks_exact_mut(out.key_size))
    {
        embedder.embed(feature, keys, weights)?;
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_one(feature: &[f64], with_blur: bool) -> (Vec<i32>, Vec<f64>) {
        let d = feature.len();
        let mut embedder = Embedder::new(d, with_blur);
        let mut keys = vec![0; (d + 1) * (d + 1)];
        let mut weights = vec![0.0; d + 1];
        embedder.embed(feature, &mut keys, &mut weights).unwrap();
        (keys, weights)
    }

    #[test]
    fn origin_sits_on_a_vertex() {
        let (keys, weights) = embed_one(&[0.0, 0.0], true);
        assert_eq!(&keys[0..3], &[0, 0, 0]);
        assert!((weights[0] - 1.0).abs() < 1e-12);
        assert!(weights[1..].iter().all(|w| w.abs() < 1e-12));
    }

    #[test]
    fn corners_are_distinct() {
        let (keys, _) = embed_one(&[0.3, -1.7, 2.2], false);
        let corners: Vec<&[i32]> = keys.chunks(4).collect();
        for a in 0..corners.len() {
            for b in (a + 1)..corners.len() {
                assert_ne!(corners[a], corners[b]);
            }
        }
    }

    #[test]
    fn elevation_is_zero_sum() {
        let mut embedder = Embedder::<f64>::new(3, true);
        let mut keys = vec![0; 16];
        let mut weights = vec![0.0; 4];
        embedder
            .embed(&[1.5, -0.25, 4.0], &mut keys, &mut weights)
            .unwrap();
        let total: f64 = embedder.elevated().iter().sum();
        assert!(total.abs() < 1e-9);
    }

    #[test]
    fn huge_coordinates_are_rejected() {
        let mut embedder = Embedder::<f64>::new(1, true);
        let mut keys = vec![0; 4];
        let mut weights = vec![0.0; 2];
        let res = embedder.embed(&[1e300], &mut keys, &mut weights);
        assert!(matches!(res, Err(LatticeError::InvalidNumericValue(_))));
    }
}
