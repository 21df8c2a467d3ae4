use super::Vec3;

/// Directions closer than this are treated as parallel when transporting.
const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Rotate a vector around an arbitrary axis using Rodrigues' rotation formula
pub fn rotate_around_axis(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let k = axis.normalize();

    // v_rot = v*cos(θ) + (k×v)*sin(θ) + k*(k·v)*(1-cos(θ))
    let k_cross_v = k.cross(&v);
    let k_dot_v = k.dot(&v);

    v.scale(cos_a) + k_cross_v.scale(sin_a) + k.scale(k_dot_v * (1.0 - cos_a))
}

/// Orthonormal cross-section frame of a tube segment.
///
/// `axis` is the segment direction; `u` and `v` span the ring plane. Ring
/// vertex i sits at `center + (u*cos + v*sin) * radius`, so carrying `u`
/// from one segment to the next keeps ring phases aligned.
#[derive(Debug, Clone, Copy)]
pub struct SectionFrame {
    pub axis: Vec3,
    pub u: Vec3,
    pub v: Vec3,
}

impl SectionFrame {
    /// Build a fresh frame for a direction, with an arbitrary ring phase.
    pub fn from_axis(axis: Vec3) -> Self {
        let axis = axis.normalize();
        let u = axis.perpendicular();
        let v = axis.cross(&u).normalize();
        Self { axis, u, v }
    }

    /// Carry this frame onto a new direction using the smallest rotation
    /// between the two axes, so the ring phase survives the transition
    /// without twisting.
    pub fn transported_to(&self, new_axis: Vec3) -> Self {
        let new_axis = new_axis.normalize();
        let dot = self.axis.dot(&new_axis).clamp(-1.0, 1.0);

        if dot > 1.0 - PARALLEL_EPSILON {
            return Self { axis: new_axis, u: self.u, v: self.v };
        }
        if dot < -1.0 + PARALLEL_EPSILON {
            // Opposite directions: a half turn about u flips axis and v.
            return Self { axis: new_axis, u: self.u, v: -self.v };
        }

        let pivot = self.axis.cross(&new_axis).normalize();
        let angle = dot.acos();
        let u = rotate_around_axis(self.u, pivot, angle).normalize();
        let v = new_axis.cross(&u).normalize();
        Self { axis: new_axis, u, v }
    }
}
