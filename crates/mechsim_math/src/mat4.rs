//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching the layout GPU
//! uniform buffers expect. The `translate`/`rotate`/`scale` helpers
//! post-multiply, so a model matrix is built by chaining them in the order
//! the operations should apply to the model from the outside in.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a homogeneous vector by a matrix: result = M * v
pub fn transform(m: Mat4, v: [f32; 4]) -> [f32; 4] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
        m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    ]
}

/// Transform a point (w = 1) and drop the homogeneous component
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let r = transform(m, [p.x, p.y, p.z, 1.0]);
    Vec3::new(r[0], r[1], r[2])
}

/// Translation matrix
pub fn translation(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = v.x;
    m[3][1] = v.y;
    m[3][2] = v.z;
    m
}

/// Non-uniform scale matrix
pub fn scaling(v: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = v.x;
    m[1][1] = v.y;
    m[2][2] = v.z;
    m
}

/// Right-handed rotation of `angle` radians about `axis`
///
/// The axis does not need to be normalized. A zero axis yields identity.
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    let a = axis.normalized();
    if a == Vec3::ZERO {
        return IDENTITY;
    }
    let c = angle.cos();
    let s = angle.sin();
    let t = a * (1.0 - c);

    [
        [c + t.x * a.x, t.x * a.y + s * a.z, t.x * a.z - s * a.y, 0.0],
        [t.y * a.x - s * a.z, c + t.y * a.y, t.y * a.z + s * a.x, 0.0],
        [t.z * a.x + s * a.y, t.z * a.y - s * a.x, c + t.z * a.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Post-multiply a translation: `m * T(v)`
pub fn translate(m: Mat4, v: Vec3) -> Mat4 {
    mul(m, translation(v))
}

/// Post-multiply a rotation: `m * R(angle, axis)`
pub fn rotate(m: Mat4, angle: f32, axis: Vec3) -> Mat4 {
    mul(m, rotation(angle, axis))
}

/// Post-multiply a scale: `m * S(v)`
pub fn scale(m: Mat4, v: Vec3) -> Mat4 {
    mul(m, scaling(v))
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Right-handed perspective projection with an OpenGL-style [-1, 1] depth range
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) * nf, -1.0],
        [0.0, 0.0, 2.0 * far * near * nf, 0.0],
    ]
}

/// Get a column from a matrix as a point (translation lives in column 3)
pub fn get_column(m: Mat4, col: usize) -> Vec3 {
    Vec3::new(m[col][0], m[col][1], m[col][2])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_translation() {
        let m = translation(Vec3::new(1.0, -2.0, 3.0));
        let result = transform_point(m, Vec3::ZERO);
        assert!(vec_approx_eq(result, Vec3::new(1.0, -2.0, 3.0)));
        assert!(vec_approx_eq(get_column(m, 3), Vec3::new(1.0, -2.0, 3.0)));
    }

    #[test]
    fn test_rotation_z() {
        // 90° about Z: X goes to Y
        let m = rotation(FRAC_PI_2, Vec3::Z);
        let result = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(result, Vec3::Y), "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_y() {
        // 90° about Y: Z goes to X
        let m = rotation(FRAC_PI_2, Vec3::Y);
        let result = transform_point(m, Vec3::Z);
        assert!(vec_approx_eq(result, Vec3::X), "Z should become X, got {:?}", result);
    }

    #[test]
    fn test_rotation_zero_axis_is_identity() {
        assert!(mat_approx_eq(rotation(1.0, Vec3::ZERO), IDENTITY));
    }

    #[test]
    fn test_chain_order() {
        // translate then scale: the scale applies to the model first
        let m = scale(translate(IDENTITY, Vec3::new(10.0, 0.0, 0.0)), Vec3::splat(2.0));
        let result = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(result, Vec3::new(12.0, 0.0, 0.0)));
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation(0.5, Vec3::new(1.0, 1.0, 0.0));
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_composition() {
        let r45 = rotation(FRAC_PI_2 / 2.0, Vec3::Z);
        let r90 = rotation(FRAC_PI_2, Vec3::Z);
        assert!(mat_approx_eq(mul(r45, r45), r90));
    }

    #[test]
    fn test_look_at_moves_target_in_front() {
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let result = transform_point(view, Vec3::ZERO);
        // Target ends up straight ahead, down the negative Z axis
        assert!(vec_approx_eq(result, Vec3::new(0.0, 0.0, -5.0)), "got {:?}", result);
    }

    #[test]
    fn test_look_at_eye_maps_to_origin() {
        let eye = Vec3::new(3.0, 5.0, 10.0);
        let view = look_at(eye, Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!(vec_approx_eq(transform_point(view, eye), Vec3::ZERO));
    }

    #[test]
    fn test_perspective_near_plane_depth() {
        let proj = perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let clip = transform(proj, [0.0, 0.0, -0.1, 1.0]);
        assert!(approx_eq(clip[2] / clip[3], -1.0));

        let clip = transform(proj, [0.0, 0.0, -100.0, 1.0]);
        assert!(approx_eq(clip[2] / clip[3], 1.0));
    }

    #[test]
    fn test_transpose_roundtrip() {
        let m = rotation(0.3, Vec3::new(0.2, 1.0, 0.5));
        assert!(mat_approx_eq(transpose(transpose(m)), m));
    }
}
