// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Mat4: inversion, transforms, projection and camera factories.

use detmath_core::math::{DFix128, Mat3, Mat4, Quat, Tolerance, Vec3, Vec4};
use detmath_core::MathError;

fn fx(value: f64) -> DFix128 {
    DFix128::try_from_f64(value).expect("finite authoring literal")
}

/// Affine matrix with a unimodular 3×3 block and integer translation.
fn integral_affine() -> Mat4 {
    Mat4::from_rows(
        Vec4::from_ints(1, 2, 3, 0),
        Vec4::from_ints(0, 1, 4, 0),
        Vec4::from_ints(5, 6, 0, 0),
        Vec4::from_ints(7, 8, 9, 1),
    )
}

fn rigid() -> Mat4 {
    let axis = Vec3::new(fx(1.0), fx(2.0), fx(-2.0))
        .normalize()
        .expect("non-zero axis");
    let rotation = Mat4::create_from_quaternion(&Quat::from_axis_angle(&axis, fx(0.8)));
    rotation.multiply(&Mat4::create_translation(&Vec3::new(
        fx(3.5),
        fx(-1.25),
        fx(10.0),
    )))
}

#[test]
fn translation_moves_points_not_directions() {
    let m = Mat4::create_translation(&Vec3::from_ints(5, -3, 2));
    let p = Vec3::from_ints(2, 4, -1);
    assert_eq!(m.transform_point(&p), Vec4::from_ints(7, 1, 1, 1));
    assert_eq!(m.transform_normal(&p), p);
    assert_eq!(m.transform(&p.extend(DFix128::ZERO)), p.extend(DFix128::ZERO));
    assert_eq!(p.extend(DFix128::ONE) * m, Vec4::from_ints(7, 1, 1, 1));
}

#[test]
fn multiply_applies_left_operand_first() {
    let scale = Mat4::create_scale(&Vec3::from_ints(2, 2, 2));
    let shift = Mat4::create_translation(&Vec3::from_ints(1, 0, 0));
    let p = Vec3::from_ints(1, 1, 1);
    assert_eq!((scale * shift).transform_point(&p), Vec4::from_ints(3, 2, 2, 1));
    assert_eq!((shift * scale).transform_point(&p), Vec4::from_ints(4, 2, 2, 1));
}

#[test]
fn determinant_values() {
    assert_eq!(Mat4::IDENTITY.determinant(), DFix128::ONE);
    assert_eq!(
        Mat4::create_scale(&Vec3::from_ints(2, 3, 4)).determinant(),
        DFix128::from_int(24)
    );
    assert_eq!(integral_affine().determinant(), DFix128::ONE);
    assert_eq!(integral_affine().transpose().determinant(), DFix128::ONE);
    assert_eq!(Mat4::ZERO.determinant(), DFix128::ZERO);
}

#[test]
fn exact_inverse_of_integral_affine() {
    let m = integral_affine();
    let inv = m.invert().expect("non-singular");
    assert_eq!(
        inv,
        Mat4::from_rows(
            Vec4::from_ints(-24, 18, 5, 0),
            Vec4::from_ints(20, -15, -4, 0),
            Vec4::from_ints(-5, 4, 1, 0),
            Vec4::from_ints(53, -42, -12, 1),
        )
    );
    assert_eq!(m.multiply(&inv), Mat4::IDENTITY);
}

#[test]
fn translation_inverse_is_exact() {
    let t = Vec3::new(fx(3.25), fx(-8.0), fx(0.5));
    assert_eq!(
        Mat4::create_translation(&t).invert(),
        Ok(Mat4::create_translation(&t.negate()))
    );
}

#[test]
fn general_inverse_round_trip() {
    let m = Mat4::from_rows(
        Vec4::new(fx(2.0), fx(0.5), fx(-1.0), fx(0.25)),
        Vec4::new(fx(0.0), fx(1.5), fx(3.0), fx(-0.5)),
        Vec4::new(fx(-1.0), fx(0.75), fx(1.0), fx(2.0)),
        Vec4::new(fx(4.0), fx(-2.0), fx(0.5), fx(1.0)),
    );
    let inv = m.invert().expect("non-singular");
    assert!(m.multiply(&inv).approx_eq(&Mat4::IDENTITY, Tolerance::default()));
    assert!(inv.multiply(&m).approx_eq(&Mat4::IDENTITY, Tolerance::default()));
}

#[test]
fn singular_matrix_is_rejected() {
    let m = Mat4::from_rows(
        Vec4::from_ints(1, 2, 3, 4),
        Vec4::from_ints(2, 4, 6, 8),
        Vec4::from_ints(0, 1, 0, 1),
        Vec4::from_ints(1, 0, 1, 0),
    );
    assert!(matches!(
        m.invert(),
        Err(MathError::InvalidOperation {
            op: "Mat4::invert",
            ..
        })
    ));
}

#[test]
fn tiny_determinant_still_inverts() {
    let tiny = DFix128::from_raw(1 << 32);
    let m = Mat4::create_scale(&Vec3::new(tiny, tiny, DFix128::ONE));
    assert_eq!(m.determinant(), DFix128::EPSILON);
    let big = DFix128::from_int(1 << 32);
    assert_eq!(
        m.invert(),
        Ok(Mat4::create_scale(&Vec3::new(big, big, DFix128::ONE)))
    );
}

#[test]
fn rigid_inverse_matches_general_inverse() {
    let m = rigid();
    let general = m.invert().expect("rotation is invertible");
    assert!(m.invert_rigid().approx_eq(&general, Tolerance::default()));
    assert!(m
        .multiply(&m.invert_rigid())
        .approx_eq(&Mat4::IDENTITY, Tolerance::default()));
}

#[test]
fn transpose_variants_agree() {
    let m = integral_affine();
    let t = m.transpose();
    let v = Vec4::from_ints(1, -1, 2, 3);
    let p = Vec3::from_ints(-2, 5, 1);
    assert_eq!(m.transform_transpose(&v), t.transform(&v));
    assert_eq!(m.transform_point_transpose(&p), t.transform_point(&p));
    assert_eq!(m.transform_normal_transpose(&p), t.transform_normal(&p));
    assert_eq!(t.transpose(), m);
    assert_eq!(m.at(3, 0), DFix128::from_int(7));
    assert_eq!(t.at(0, 3), DFix128::from_int(7));
}

#[test]
fn perspective_near_plane_maps_to_zero_depth() {
    let proj = Mat4::create_perspective_fov_rh(
        DFix128::HALF_PI,
        DFix128::ONE,
        DFix128::ONE,
        DFix128::from_int(100),
    )
    .expect("valid projection");
    let near = proj.transform_point(&Vec3::from_ints(0, 0, -1));
    assert_eq!(near.z(), DFix128::ZERO);
    assert_eq!(near.w(), DFix128::ONE);

    let far = proj.transform_point(&Vec3::from_ints(0, 0, -100));
    assert_eq!(far.w(), DFix128::from_int(100));
    assert!(far.z().approx_eq(DFix128::from_int(100), Tolerance::default()));

    // 90° vertical field of view: the frustum edge at depth 1 lands on y = w.
    let edge = proj.transform_point(&Vec3::from_ints(0, 1, -1));
    assert!(edge.y().approx_eq(edge.w(), Tolerance::default()));
}

#[test]
fn perspective_rejects_degenerate_input() {
    assert_eq!(
        Mat4::create_perspective_fov_rh(DFix128::PI, DFix128::ONE, DFix128::ONE, DFix128::TWO),
        Err(MathError::DivideByZero)
    );
    assert_eq!(
        Mat4::create_perspective_fov_rh(DFix128::ONE, DFix128::ZERO, DFix128::ONE, DFix128::TWO),
        Err(MathError::DivideByZero)
    );
    assert_eq!(
        Mat4::create_perspective_fov_rh(DFix128::ONE, DFix128::ONE, DFix128::TWO, DFix128::TWO),
        Err(MathError::DivideByZero)
    );
}

#[test]
fn orthographic_maps_volume_to_clip_box() {
    let ortho = Mat4::create_orthographic_rh(
        DFix128::from_int(-2),
        DFix128::from_int(2),
        DFix128::from_int(-1),
        DFix128::from_int(1),
        DFix128::ZERO,
        DFix128::from_int(10),
    )
    .expect("valid volume");
    assert_eq!(
        ortho.transform_point(&Vec3::from_ints(2, 1, 0)),
        Vec4::from_ints(1, 1, 0, 1)
    );
    let corner = ortho.transform_point(&Vec3::from_ints(-2, -1, -10));
    assert!(corner.approx_eq(&Vec4::from_ints(-1, -1, 1, 1), Tolerance::default()));

    let flat = Mat4::create_orthographic_rh(
        DFix128::ONE,
        DFix128::ONE,
        DFix128::ZERO,
        DFix128::ONE,
        DFix128::ZERO,
        DFix128::ONE,
    );
    assert_eq!(flat, Err(MathError::DivideByZero));
}

#[test]
fn look_at_moves_target_onto_negative_z() {
    let eye = Vec3::from_ints(0, 0, 5);
    let view = Mat4::create_look_at_rh(&eye, &Vec3::ZERO, &Vec3::UP).expect("valid camera");
    assert_eq!(view.transform_point(&Vec3::ZERO), Vec4::from_ints(0, 0, -5, 1));
    assert_eq!(view.transform_point(&eye), Vec4::UNIT_W);

    let view2 = Mat4::create_view_rh(&eye, &Vec3::from_ints(0, 0, -3), &Vec3::UP)
        .expect("valid camera");
    assert_eq!(view, view2);
}

#[test]
fn view_rejects_degenerate_basis() {
    let eye = Vec3::from_ints(1, 2, 3);
    assert!(Mat4::create_view_rh(&eye, &Vec3::ZERO, &Vec3::UP).is_err());
    assert!(matches!(
        Mat4::create_view_rh(&eye, &Vec3::from_ints(0, 5, 0), &Vec3::UP),
        Err(MathError::DomainError { .. })
    ));
    assert!(Mat4::create_look_at_rh(&eye, &eye, &Vec3::UP).is_err());
}

#[test]
fn world_matrix_is_inverse_of_view() {
    let position = Vec3::new(fx(1.5), fx(-2.0), fx(4.0));
    let forward = Vec3::new(fx(0.3), fx(-0.2), fx(-1.0));
    let world = Mat4::create_world_rh(&position, &forward, &Vec3::UP).expect("valid basis");
    let view = Mat4::create_view_rh(&position, &forward, &Vec3::UP).expect("valid basis");
    assert!(world
        .multiply(&view)
        .approx_eq(&Mat4::IDENTITY, Tolerance::default()));
    assert_eq!(world.translation(), position);
    let dir = forward.normalize().expect("non-zero");
    assert!(world.forward().approx_eq(&dir, Tolerance::default()));
}

#[test]
fn basis_accessors_and_setters() {
    let m = Mat4::IDENTITY;
    assert_eq!(m.right(), Vec3::RIGHT);
    assert_eq!(m.left(), Vec3::LEFT);
    assert_eq!(m.up(), Vec3::UP);
    assert_eq!(m.down(), Vec3::DOWN);
    assert_eq!(m.backward(), Vec3::BACKWARD);
    assert_eq!(m.forward(), Vec3::FORWARD);
    assert_eq!(m.translation(), Vec3::ZERO);

    let moved = m.with_translation(&Vec3::from_ints(4, 5, 6));
    assert_eq!(moved, Mat4::create_translation(&Vec3::from_ints(4, 5, 6)));
    assert_eq!(moved.row(3).w(), DFix128::ONE);

    let flipped = m.with_forward(&Vec3::UP);
    assert_eq!(flipped.backward(), Vec3::DOWN);
    assert_eq!(flipped.row(2).w(), DFix128::ZERO);
    assert_eq!(m.with_left(&Vec3::UNIT_Z).right(), Vec3::UNIT_Z.negate());
    assert_eq!(m.with_down(&Vec3::UNIT_X).up(), Vec3::UNIT_X.negate());
    assert_eq!(m.with_up(&Vec3::UNIT_Z).up(), Vec3::UNIT_Z);
    assert_eq!(m.with_right(&Vec3::UNIT_Y).right(), Vec3::UNIT_Y);
    assert_eq!(m.with_backward(&Vec3::UNIT_X).backward(), Vec3::UNIT_X);
}

#[test]
fn rotation_factories_agree() {
    let tol = Tolerance::default();
    let axis = Vec3::UNIT_Y;
    let angle = fx(0.7);
    let a = Mat4::create_from_axis_angle(&axis, angle);
    let q = Mat4::create_from_quaternion(&Quat::from_axis_angle(&axis, angle));
    assert!(a.approx_eq(&q, tol));
    let ypr = Mat4::create_from_yaw_pitch_roll(angle, DFix128::ZERO, DFix128::ZERO);
    assert!(ypr.approx_eq(&a, tol));
    assert_eq!(Mat3::from_mat4(&a), Mat3::from_axis_angle(&axis, angle));
}

#[test]
fn scalar_scaling() {
    let m = Mat4::IDENTITY * DFix128::TWO;
    assert_eq!(m.determinant(), DFix128::from_int(16));
    assert_eq!(m, Mat4::IDENTITY.scale(DFix128::TWO));
}
