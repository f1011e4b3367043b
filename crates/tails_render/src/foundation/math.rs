//! Math utilities and types
//!
//! Provides the math types used for part placement and transform stacks.

pub use nalgebra::{
    Vector3,
    Matrix4,
    Quaternion,
    Unit,
    UnitQuaternion,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Build a rotation from Euler angles given in degrees (applied X, then Y, then Z)
pub fn rotation_from_degrees(degrees: [f32; 3]) -> Quat {
    UnitQuaternion::from_euler_angles(
        degrees[0].to_radians(),
        degrees[1].to_radians(),
        degrees[2].to_radians(),
    )
}

/// Translation matrix
pub fn translation(offset: &Vec3) -> Mat4 {
    Mat4::new_translation(offset)
}

/// Non-uniform scale matrix
pub fn scaling(factors: &Vec3) -> Mat4 {
    Mat4::new_nonuniform_scaling(factors)
}

/// Whether every component of the vector is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_translation_then_scale() {
        let m = translation(&Vec3::new(1.0, 2.0, 3.0)) * scaling(&Vec3::new(2.0, 2.0, 2.0));
        let p = m.transform_point(&nalgebra::Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 4.0);
        assert_relative_eq!(p.z, 5.0);
    }

    #[test]
    fn test_rotation_from_degrees() {
        let q = rotation_from_degrees([0.0, 0.0, 90.0]);
        let v = q * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(&Vec3::new(0.0, -1.0, 5.5)));
        assert!(!is_finite(&Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Vec3::new(0.0, f32::INFINITY, 0.0)));
    }
}
