//! Containment walls
//!
//! Four fixed rectangles around the interaction area. They are always
//! rebuilt from scratch on resize; resizing colliders in place would leave
//! stale broad-phase entries behind.

use glam::Vec2;
use rapier2d::prelude::*;

use super::world::PhysicsWorld;
use crate::config::BoundaryMode;
use crate::consts::{EXTENDED_HEIGHT, WALL_CLEARANCE, WALL_THICKNESS};
use crate::to_physics;

/// Center and half extents of one wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallRect {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl WallRect {
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }
}

/// Wall geometry for a surface of `width` x `height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPlan {
    pub floor: WallRect,
    pub ceiling: WallRect,
    pub left: WallRect,
    pub right: WallRect,
}

impl BoundaryPlan {
    pub fn new(width: f32, height: f32, mode: BoundaryMode) -> Self {
        Self::enclosing(width, height, mode, None)
    }

    /// Walls for the surface, pushed outward where needed so that `content`
    /// (a min/max box) sits inside with [`WALL_CLEARANCE`] to spare
    pub fn enclosing(
        width: f32,
        height: f32,
        mode: BoundaryMode,
        content: Option<(Vec2, Vec2)>,
    ) -> Self {
        let floor_y = match mode {
            BoundaryMode::Contained => height.max(0.0),
            BoundaryMode::FullViewport => height.max(EXTENDED_HEIGHT),
        };
        let mut min = Vec2::ZERO;
        let mut max = Vec2::new(width.max(0.0), floor_y);

        if let Some((lo, hi)) = content {
            min = min.min(lo - Vec2::splat(WALL_CLEARANCE));
            max = max.max(hi + Vec2::splat(WALL_CLEARANCE));
        }

        Self::around(min, max)
    }

    fn around(min: Vec2, max: Vec2) -> Self {
        let t = WALL_THICKNESS;
        let mid = (min + max) / 2.0;
        let size = max - min;

        // Horizontal walls reach past both side walls; side walls reach past
        // both horizontal walls, so the corners are closed twice over
        let horizontal = Vec2::new(size.x / 2.0 + t, t / 2.0);
        let vertical = Vec2::new(t / 2.0, size.y / 2.0 + t);

        Self {
            floor: WallRect {
                center: Vec2::new(mid.x, max.y + t / 2.0),
                half_extents: horizontal,
            },
            ceiling: WallRect {
                center: Vec2::new(mid.x, min.y - t / 2.0),
                half_extents: horizontal,
            },
            left: WallRect {
                center: Vec2::new(min.x - t / 2.0, mid.y),
                half_extents: vertical,
            },
            right: WallRect {
                center: Vec2::new(max.x + t / 2.0, mid.y),
                half_extents: vertical,
            },
        }
    }

    pub fn walls(&self) -> [WallRect; 4] {
        [self.floor, self.ceiling, self.left, self.right]
    }

    /// Inner area enclosed by the walls: (min, max)
    pub fn interior(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left.max().x, self.ceiling.max().y),
            Vec2::new(self.right.min().x, self.floor.min().y),
        )
    }
}

/// Handles of the walls currently in the world
#[derive(Debug, Clone, Copy)]
pub struct Boundaries {
    pub plan: BoundaryPlan,
    pub handles: [RigidBodyHandle; 4],
}

/// Remove `previous` (if any) and insert fresh walls for the given size,
/// enclosing the `content` box when it spills past the surface
pub fn rebuild(
    world: &mut PhysicsWorld,
    previous: Option<Boundaries>,
    width: f32,
    height: f32,
    mode: BoundaryMode,
    content: Option<(Vec2, Vec2)>,
) -> Boundaries {
    if let Some(old) = previous {
        for handle in old.handles {
            world.remove(handle);
        }
    }

    let plan = BoundaryPlan::enclosing(width, height, mode, content);
    let handles = plan.walls().map(|wall| {
        world.insert(
            RigidBodyBuilder::fixed()
                .translation(to_physics(wall.center))
                .build(),
            ColliderBuilder::cuboid(wall.half_extents.x, wall.half_extents.y).build(),
        )
    });

    log::debug!(
        "Boundaries rebuilt for {}x{} ({}), interior {:?}",
        width,
        height,
        mode.as_str(),
        plan.interior()
    );

    Boundaries { plan, handles }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contained_interior_matches_surface() {
        let plan = BoundaryPlan::new(800.0, 600.0, BoundaryMode::Contained);
        let (min, max) = plan.interior();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_walls_overlap_corners() {
        let plan = BoundaryPlan::new(800.0, 600.0, BoundaryMode::Contained);
        // Floor spans past both side walls' outer edges
        assert!(plan.floor.min().x <= plan.left.min().x);
        assert!(plan.floor.max().x >= plan.right.max().x);
        // Side walls span past ceiling top and floor bottom
        assert!(plan.left.min().y <= plan.ceiling.min().y);
        assert!(plan.left.max().y >= plan.floor.max().y);
    }

    #[test]
    fn test_full_viewport_extends_floor_only() {
        let plan = BoundaryPlan::new(800.0, 600.0, BoundaryMode::FullViewport);
        let (min, max) = plan.interior();
        assert_eq!(min.y, 0.0);
        assert_eq!(max.y, EXTENDED_HEIGHT);

        // A viewport taller than the extended height keeps its own height
        let tall = BoundaryPlan::new(800.0, 5000.0, BoundaryMode::FullViewport);
        assert_eq!(tall.interior().1.y, 5000.0);
    }

    #[test]
    fn test_rebuild_replaces_previous() {
        let mut world = PhysicsWorld::new();
        let first = rebuild(&mut world, None, 800.0, 600.0, BoundaryMode::Contained, None);
        assert_eq!(world.body_count(), 4);

        let second = rebuild(
            &mut world,
            Some(first),
            400.0,
            300.0,
            BoundaryMode::Contained,
            None,
        );
        assert_eq!(world.body_count(), 4);
        for handle in first.handles {
            assert!(!world.contains(handle));
        }
        for handle in second.handles {
            assert!(world.contains(handle));
        }
        assert_eq!(second.plan.interior().1, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_content_inside_surface_leaves_walls_alone() {
        let content = Some((Vec2::new(10.0, 20.0), Vec2::new(700.0, 400.0)));
        let plan = BoundaryPlan::enclosing(800.0, 600.0, BoundaryMode::Contained, content);
        assert_eq!(plan, BoundaryPlan::new(800.0, 600.0, BoundaryMode::Contained));
    }

    #[test]
    fn test_overflowing_content_pushes_walls_out() {
        // Text wider and taller than a landscape phone
        let content = Some((Vec2::new(1.0, 30.0), Vec2::new(290.0, 310.0)));
        let plan = BoundaryPlan::enclosing(250.0, 262.0, BoundaryMode::Contained, content);
        let (min, max) = plan.interior();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(290.0 + WALL_CLEARANCE, 310.0 + WALL_CLEARANCE));

        // Corners stay closed on the grown box
        assert!(plan.floor.min().x <= plan.left.min().x);
        assert!(plan.floor.max().x >= plan.right.max().x);
        assert!(plan.left.max().y >= plan.floor.max().y);
    }

    #[test]
    fn test_content_left_of_origin_moves_left_wall() {
        let content = Some((Vec2::new(-40.0, 10.0), Vec2::new(100.0, 50.0)));
        let plan = BoundaryPlan::enclosing(800.0, 600.0, BoundaryMode::Contained, content);
        let (min, max) = plan.interior();
        assert_eq!(min, Vec2::new(-40.0 - WALL_CLEARANCE, 0.0));
        assert_eq!(max, Vec2::new(800.0, 600.0));
    }
}
