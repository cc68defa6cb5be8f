//! Orientation from a forward and an up vector.
//!
//! The canonical frame maps +X to right, +Y to up and +Z to forward. Every
//! bone orientation and every rest orientation goes through [`orient_from_axes`],
//! so the choice of canonical frame cancels out in `world * rest⁻¹`.

use glam::{Mat3, Quat, Vec3};
use thiserror::Error;

/// Squared lengths below this are treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Reasons a basis cannot be built.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OrientError {
    #[error("forward vector has zero length")]
    ZeroForward,

    #[error("up vector is collinear with forward")]
    CollinearUp,
}

/// Rotation taking the canonical frame onto the right-handed orthonormal frame
/// built from `forward` and `up`.
///
/// Neither vector needs to be normalized, and `up` need not be orthogonal to
/// `forward`: it is re-orthogonalized against `forward` first.
pub fn orient_from_axes(forward: Vec3, up: Vec3) -> Result<Quat, OrientError> {
    if !(forward.length_squared() > DEGENERATE_EPSILON) {
        return Err(OrientError::ZeroForward);
    }
    let forward = forward.normalize();

    // Gram-Schmidt
    let residual = up - forward * up.dot(forward);
    if !(residual.length_squared() > DEGENERATE_EPSILON) {
        return Err(OrientError::CollinearUp);
    }
    let up = residual.normalize();
    let right = up.cross(forward).normalize();

    let basis = Mat3::from_cols(right, up, forward);
    Ok(Quat::from_mat3(&basis).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_quat_eq(a: Quat, b: Quat) {
        // q and -q are the same rotation
        assert!(
            a.dot(b).abs() > 1.0 - 1e-5,
            "quaternions differ: {:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_canonical_axes_give_identity() {
        let q = orient_from_axes(Vec3::Z, Vec3::Y).unwrap();
        assert_quat_eq(q, Quat::IDENTITY);
    }

    #[test]
    fn test_maps_canonical_axes() {
        let forward = Vec3::new(1.0, -1.0, 0.0);
        let up = Vec3::new(1.0, 1.0, 0.0);
        let q = orient_from_axes(forward, up).unwrap();
        assert!((q * Vec3::Z - forward.normalize()).length() < 1e-5);
        assert!((q * Vec3::Y - up.normalize()).length() < 1e-5);
        assert!((q * Vec3::X - up.cross(forward).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_up_is_orthogonalized() {
        let forward = Vec3::new(0.0, 2.0, 0.0);
        // Skewed, unnormalized up
        let skewed = orient_from_axes(forward, Vec3::new(0.0, 5.0, 3.0)).unwrap();
        let clean = orient_from_axes(forward, Vec3::Z).unwrap();
        assert_quat_eq(skewed, clean);
    }

    #[test]
    fn test_result_is_unit() {
        let q = orient_from_axes(Vec3::new(3.0, -7.0, 0.2), Vec3::new(0.1, 0.4, 9.0)).unwrap();
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_forward() {
        assert_eq!(
            orient_from_axes(Vec3::ZERO, Vec3::Y),
            Err(OrientError::ZeroForward)
        );
    }

    #[test]
    fn test_collinear_up() {
        assert_eq!(
            orient_from_axes(Vec3::Y, Vec3::new(0.0, -4.0, 0.0)),
            Err(OrientError::CollinearUp)
        );
        assert_eq!(
            orient_from_axes(Vec3::X, Vec3::ZERO),
            Err(OrientError::CollinearUp)
        );
    }

    #[test]
    fn test_nan_input_is_rejected() {
        assert!(orient_from_axes(Vec3::new(f32::NAN, 1.0, 0.0), Vec3::Y).is_err());
        assert!(orient_from_axes(Vec3::Y, Vec3::new(f32::NAN, 0.0, 1.0)).is_err());
    }
}
