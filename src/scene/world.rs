//! Physics world ownership
//!
//! Thin wrapper over the rapier pipeline and body/collider sets. Everything
//! outside this module speaks glam `Vec2` and [`Pose`]; rapier types stay in
//! here and in the body builders.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::consts::{PIXELS_PER_METER, SIM_DT};
use crate::{from_physics, to_physics};

/// Position and rotation of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
}

impl Pose {
    pub const fn new(pos: Vec2, angle: f32) -> Self {
        Self { pos, angle }
    }
}

/// The physics world: pipeline state plus every body in the scene
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Zero-gravity world: glyphs stay put until something pushes them
    pub fn new() -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = SIM_DT;
        params.length_unit = PIXELS_PER_METER;

        Self {
            gravity: Vector::new(0.0, 0.0),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
        }
    }

    /// Advance every non-fixed body by one fixed timestep
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Number of steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Insert a body with a single collider attached
    pub fn insert(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a body and its colliders. Unknown handles are ignored.
    pub fn remove(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Remove every body
    pub fn clear(&mut self) {
        let handles: Vec<_> = self.bodies.iter().map(|(h, _)| h).collect();
        for handle in handles {
            self.remove(handle);
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Current pose, if the body exists
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        self.bodies
            .get(handle)
            .map(|rb| Pose::new(from_physics(rb.translation()), rb.rotation().angle()))
    }

    /// Linear and angular velocity, if the body exists
    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<(Vec2, f32)> {
        self.bodies
            .get(handle)
            .map(|rb| (from_physics(rb.linvel()), rb.angvel()))
    }

    /// Teleport a body to `pose` and stop it dead
    pub fn snap_to(&mut self, handle: RigidBodyHandle, pose: Pose) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_translation(to_physics(pose.pos), true);
            rb.set_rotation(Rotation::new(pose.angle), true);
            rb.set_linvel(Vector::new(0.0, 0.0), true);
            rb.set_angvel(0.0, true);
        }
    }

    /// Set a dynamic body's velocity (and wake it)
    pub fn set_velocity(&mut self, handle: RigidBodyHandle, linvel: Vec2, angvel: f32) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_linvel(to_physics(linvel), true);
            rb.set_angvel(angvel, true);
        }
    }

    /// Teleport a kinematic body without giving it velocity
    pub fn teleport(&mut self, handle: RigidBodyHandle, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_translation(to_physics(pos), true);
        }
    }

    /// Move a kinematic body; the solver derives its velocity from the delta
    pub fn move_kinematic(&mut self, handle: RigidBodyHandle, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.set_next_kinematic_translation(to_physics(pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(world: &mut PhysicsWorld, pos: Vec2) -> RigidBodyHandle {
        world.insert(
            RigidBodyBuilder::dynamic().translation(to_physics(pos)).build(),
            ColliderBuilder::ball(5.0).build(),
        )
    }

    #[test]
    fn test_zero_gravity_body_stays_put() {
        let mut world = PhysicsWorld::new();
        let h = ball(&mut world, Vec2::new(100.0, 100.0));
        for _ in 0..120 {
            world.step();
        }
        let pose = world.pose(h).unwrap();
        assert!((pose.pos - Vec2::new(100.0, 100.0)).length() < 1e-4);
        assert_eq!(world.steps(), 120);
    }

    #[test]
    fn test_velocity_moves_body() {
        let mut world = PhysicsWorld::new();
        let h = ball(&mut world, Vec2::ZERO);
        world.set_velocity(h, Vec2::new(60.0, 0.0), 0.0);
        for _ in 0..30 {
            world.step();
        }
        assert!(world.pose(h).unwrap().pos.x > 10.0);
    }

    #[test]
    fn test_snap_to_stops_body() {
        let mut world = PhysicsWorld::new();
        let h = ball(&mut world, Vec2::ZERO);
        world.set_velocity(h, Vec2::new(60.0, -20.0), 3.0);
        world.step();
        world.snap_to(h, Pose::new(Vec2::new(7.0, 8.0), 0.0));
        assert_eq!(world.pose(h).unwrap().pos, Vec2::new(7.0, 8.0));
        assert_eq!(world.velocity(h).unwrap(), (Vec2::ZERO, 0.0));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut world = PhysicsWorld::new();
        let a = ball(&mut world, Vec2::ZERO);
        let _b = ball(&mut world, Vec2::new(50.0, 0.0));
        world.remove(a);
        world.remove(a);
        assert_eq!(world.body_count(), 1);
        assert!(!world.contains(a));
        world.clear();
        assert_eq!(world.body_count(), 0);
        assert!(world.pose(a).is_none());
    }
}
