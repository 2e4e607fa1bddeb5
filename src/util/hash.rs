//! Bit-exact hashing of geometry for cache fingerprints.

use std::hash::{Hash, Hasher};

use glam::{Vec2, Vec3};
use rustc_hash::FxHasher;

/// Hash a single [`Vec3`] by converting each component to bits.
pub fn hash_vec3(v: Vec3, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

/// Hash a single [`Vec2`] by converting each component to bits.
pub fn hash_vec2(v: Vec2, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
}

/// Fresh hasher used for geometry fingerprints.
#[must_use]
pub fn fingerprint_hasher() -> FxHasher {
    FxHasher::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(points: &[Vec3]) -> u64 {
        let mut h = fingerprint_hasher();
        for p in points {
            hash_vec3(*p, &mut h);
        }
        h.finish()
    }

    #[test]
    fn any_component_change_alters_digest() {
        let a = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mut b = a;
        b[1].z = 1e-6;
        assert_eq!(digest(&a), digest(&a));
        assert_ne!(digest(&a), digest(&b));
    }

    #[test]
    fn signed_zero_is_distinct() {
        assert_ne!(digest(&[Vec3::ZERO]), digest(&[Vec3::new(-0.0, 0.0, 0.0)]));

        let mut a = fingerprint_hasher();
        hash_vec2(Vec2::new(1.0, 2.0), &mut a);
        let mut b = fingerprint_hasher();
        hash_vec2(Vec2::new(2.0, 1.0), &mut b);
        assert_ne!(a.finish(), b.finish());
    }
}
