use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::branch::{Branch, BranchId, BranchTree};
use crate::error::{Error, Result};
use crate::math::{rotate_around_axis, Vec3};

/// Parameters controlling segment geometry per depth
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Trunk segment length
    pub base_length: f32,
    /// Length multiplier applied per depth
    pub length_decay: f32,
    /// Trunk radius
    pub base_radius: f32,
    /// Radius multiplier applied per depth
    pub radius_decay: f32,
    /// Mean divergence angle for lateral branches (radians)
    pub lateral_angle: f32,
    /// Random spread around the mean lateral angle (radians)
    pub angle_variance: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            base_length: 4.0,
            length_decay: 0.7,
            base_radius: 0.35,
            radius_decay: 0.7,
            lateral_angle: 0.7,
            angle_variance: 0.3,
        }
    }
}

impl GrowthParams {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("base_length", self.base_length),
            ("length_decay", self.length_decay),
            ("base_radius", self.base_radius),
            ("radius_decay", self.radius_decay),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::configuration(format!(
                    "growth parameter {} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        if !self.lateral_angle.is_finite() || !self.angle_variance.is_finite() || self.angle_variance < 0.0 {
            return Err(Error::configuration(
                "lateral_angle must be finite and angle_variance non-negative",
            ));
        }
        Ok(())
    }
}

/// Per-depth table lookup. Depths beyond the table yield zero, which forces
/// termination; this rule is deliberate API, not out-of-bounds fallout.
pub fn factor_at(table: &[f32], depth: usize) -> f32 {
    table.get(depth).copied().unwrap_or(0.0)
}

/// Draw an integer whose expected value equals `expected`: the whole part is
/// taken as-is, the fractional part becomes a Bernoulli draw. Integer table
/// entries therefore realize without touching the random stream.
fn realize_count(rng: &mut impl Rng, expected: f32) -> usize {
    let whole = expected.floor();
    let frac = expected - whole;
    let mut count = whole as usize;
    if frac > 0.0 && rng.gen::<f32>() < frac {
        count += 1;
    }
    count
}

/// Procedural branch-structure generator.
///
/// Grows a [`BranchTree`] from a root point, a random source, and two
/// per-depth branching-factor tables: the stem table drives clone counts
/// (apical growth, same direction as the parent) and the branch table drives
/// lateral counts (angled offshoots). Table entries are expected child
/// counts; `max_depth` bounds the tree even against nonzero entries.
pub struct BranchGenerator {
    params: GrowthParams,
}

impl BranchGenerator {
    pub fn new(params: GrowthParams) -> Self {
        Self { params }
    }

    /// Grow a tree. Fails fast on invalid configuration before any branch
    /// is produced; a returned tree is always complete.
    pub fn generate(
        &self,
        root: Vec3,
        rng: &mut impl Rng,
        stem_table: &[f32],
        branch_table: &[f32],
        max_depth: usize,
    ) -> Result<BranchTree> {
        self.validate(root, stem_table, branch_table)?;

        let trunk = self.segment(root, Vec3::UP, 0, false);
        let mut tree = BranchTree::with_root(trunk);

        // Work-list instead of recursion: depth is bounded by max_depth but
        // breadth is not, and the stack keeps replay order deterministic.
        let mut work: Vec<BranchId> = vec![0];
        while let Some(id) = work.pop() {
            let (end, direction, depth) = {
                let b = tree.get(id);
                (b.end, b.direction, b.depth)
            };
            if depth >= max_depth {
                continue;
            }

            let clones = realize_count(rng, factor_at(stem_table, depth));
            let laterals = realize_count(rng, factor_at(branch_table, depth));

            for _ in 0..clones {
                let child = self.segment(end, direction, depth + 1, true);
                work.push(tree.attach(id, child));
            }
            for _ in 0..laterals {
                let child_direction = self.lateral_direction(direction, rng);
                let child = self.segment(end, child_direction, depth + 1, false);
                work.push(tree.attach(id, child));
            }
        }

        Ok(tree)
    }

    fn validate(&self, root: Vec3, stem_table: &[f32], branch_table: &[f32]) -> Result<()> {
        if !root.is_finite() {
            return Err(Error::configuration("root point must be finite"));
        }
        self.params.validate()?;
        validate_table("stem", stem_table)?;
        validate_table("branch", branch_table)?;
        Ok(())
    }

    /// Build one tapered segment. Length and radius decay geometrically with
    /// depth, so a clone's start radius always equals its parent's end
    /// radius and the tube stays seamless.
    fn segment(&self, start: Vec3, direction: Vec3, depth: usize, is_clone: bool) -> Branch {
        let p = &self.params;
        let length = p.base_length * p.length_decay.powi(depth as i32);
        let start_radius = p.base_radius * p.radius_decay.powi(depth as i32);
        let end_radius = start_radius * p.radius_decay;

        Branch {
            start,
            end: start + direction.scale(length),
            direction,
            start_radius,
            end_radius,
            depth,
            is_clone,
            parent: None,
            children: vec![],
        }
    }

    /// Tilt away from the parent direction by the configured lateral angle
    /// (jittered), at a uniformly random position around the parent axis.
    fn lateral_direction(&self, parent: Vec3, rng: &mut impl Rng) -> Vec3 {
        let p = &self.params;
        let radial_angle = rng.gen_range(0.0..TAU);
        let tilt = p.lateral_angle + (rng.gen::<f32>() - 0.5) * p.angle_variance;

        let radial = rotate_around_axis(parent.perpendicular(), parent, radial_angle);
        (parent.scale(tilt.cos()) + radial.scale(tilt.sin())).normalize()
    }
}

pub(crate) fn validate_table(name: &str, table: &[f32]) -> Result<()> {
    for (depth, &value) in table.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::configuration(format!(
                "{} table entry at depth {} must be a non-negative finite number, got {}",
                name, depth, value
            )));
        }
    }
    Ok(())
}
