//! The scene: explicit owner of the physics world and every body in it
//!
//! Constructed on mount, consumed on teardown. All mutation goes through
//! here: physics stepping, pointer moves, resize, and reset.

use glam::Vec2;
use rapier2d::prelude::*;

use super::bounds::{self, Boundaries};
use super::glyphs::{self, GlyphBody, GlyphId};
use super::layout::Layout;
use super::tracker::{TrackReport, Tracker};
use super::world::{PhysicsWorld, Pose};
use crate::config::SceneConfig;
use crate::consts::{POINTER_PARKED, POINTER_RADIUS};
use crate::to_physics;

/// Surface and text-container geometry, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Top-left of the text container within the surface
    pub container_origin: Vec2,
    /// Width available to the text
    pub container_width: f32,
}

impl Viewport {
    /// Text container fills the whole surface
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            container_origin: Vec2::ZERO,
            container_width: width,
        }
    }

    pub fn with_container(mut self, origin: Vec2, width: f32) -> Self {
        self.container_origin = origin;
        self.container_width = width;
        self
    }
}

/// Pointer proxy body and whether it is currently over the surface
#[derive(Debug, Clone, Copy)]
struct PointerProxy {
    handle: RigidBodyHandle,
    active: bool,
}

pub struct Scene {
    config: SceneConfig,
    world: PhysicsWorld,
    viewport: Viewport,
    layout: Layout,
    glyphs: Vec<GlyphBody>,
    boundaries: Option<Boundaries>,
    pointer: PointerProxy,
    tracker: Tracker,
    next_glyph_id: u32,
}

impl Scene {
    /// Build the world for `viewport`: walls, pointer proxy, glyphs at rest
    pub fn mount(config: SceneConfig, viewport: Viewport) -> Self {
        let mut world = PhysicsWorld::new();

        let parked = Vec2::new(POINTER_PARKED.0, POINTER_PARKED.1);
        let pointer = PointerProxy {
            handle: world.insert(
                RigidBodyBuilder::kinematic_position_based()
                    .translation(to_physics(parked))
                    .build(),
                ColliderBuilder::ball(POINTER_RADIUS).build(),
            ),
            active: false,
        };

        let layout = Layout::plan(viewport.container_width, &config.description);
        let mut scene = Self {
            config,
            world,
            viewport,
            layout,
            glyphs: Vec::new(),
            boundaries: None,
            pointer,
            tracker: Tracker::default(),
            next_glyph_id: 1,
        };

        scene.rebuild_glyphs();
        scene.rebuild_boundaries();

        log::info!(
            "Scene mounted: {}x{}, {:?}, {} glyphs on {} description lines",
            viewport.width,
            viewport.height,
            scene.layout.size_class,
            scene.glyphs.len(),
            scene.layout.lines.len()
        );

        scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Glyphs in insertion order
    pub fn glyphs(&self) -> &[GlyphBody] {
        &self.glyphs
    }

    pub fn boundaries(&self) -> Option<&Boundaries> {
        self.boundaries.as_ref()
    }

    pub fn touched(&self) -> bool {
        self.tracker.touched()
    }

    /// Total bodies in the world (glyphs, walls, pointer proxy)
    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Current pose of a glyph
    pub fn pose(&self, glyph: &GlyphBody) -> Option<Pose> {
        self.world.pose(glyph.handle)
    }

    /// Current (linear, angular) velocity of a glyph
    pub fn velocity(&self, glyph: &GlyphBody) -> Option<(Vec2, f32)> {
        self.world.velocity(glyph.handle)
    }

    /// Current pointer proxy position
    pub fn pointer_position(&self) -> Option<Vec2> {
        self.world.pose(self.pointer.handle).map(|p| p.pos)
    }

    /// Advance physics by one fixed timestep
    pub fn step(&mut self) {
        self.world.step();
    }

    /// Move the pointer proxy to a surface-local point.
    ///
    /// The first sample teleports (a jump from the parking spot must not
    /// fling anything); later samples move kinematically so the proxy
    /// carries velocity into contacts.
    pub fn pointer_moved(&mut self, local: Vec2) {
        if !self.config.effective_pointer() {
            return;
        }
        if self.pointer.active {
            self.world.move_kinematic(self.pointer.handle, local);
        } else {
            self.world.teleport(self.pointer.handle, local);
            self.pointer.active = true;
        }
    }

    /// Pointer left the surface: park the proxy out of reach
    pub fn pointer_left(&mut self) {
        if self.pointer.active {
            let parked = Vec2::new(POINTER_PARKED.0, POINTER_PARKED.1);
            self.world.teleport(self.pointer.handle, parked);
            self.pointer.active = false;
        }
    }

    /// Give one glyph a shove
    pub fn nudge(&mut self, id: GlyphId, linvel: Vec2, angvel: f32) {
        if let Some(glyph) = self.glyphs.iter().find(|g| g.id == id) {
            self.world.set_velocity(glyph.handle, linvel, angvel);
        }
    }

    /// Compare every glyph with its rest pose and update the touched flag
    pub fn track(&mut self) -> TrackReport {
        let world = &self.world;
        let report = self.tracker.observe(
            self.glyphs
                .iter()
                .filter_map(|g| world.pose(g.handle).map(|pose| (g.initial, pose))),
        );
        if report.newly_touched {
            log::info!("Scene disturbed");
        }
        report
    }

    /// Snap every glyph back to rest and clear the touched flag
    pub fn reset(&mut self) {
        for glyph in &self.glyphs {
            self.world
                .snap_to(glyph.handle, Pose::new(glyph.initial, 0.0));
        }
        self.tracker.clear();
        log::info!("Scene reset ({} glyphs)", self.glyphs.len());
    }

    /// Viewport changed: walls always follow; glyphs are re-laid out only
    /// while nobody has touched them
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;

        if self.touched() {
            log::debug!("Resize while touched: keeping glyph poses");
        } else {
            self.layout = Layout::plan(viewport.container_width, &self.config.description);
            self.rebuild_glyphs();
            log::info!(
                "Layout rebuilt for width {}: {:?}, {} lines",
                viewport.container_width,
                self.layout.size_class,
                self.layout.lines.len()
            );
        }

        self.rebuild_boundaries();
    }

    /// Remove every body and drop the world
    pub fn teardown(mut self) {
        self.clear_world();
    }

    /// Empty the world; returns how many bodies were removed
    fn clear_world(&mut self) -> usize {
        let removed = self.world.body_count();
        self.glyphs.clear();
        self.boundaries = None;
        self.world.clear();
        log::info!("Scene torn down ({} bodies removed)", removed);
        removed
    }

    /// Walls around the surface, and around the glyphs' resting layout
    /// wherever it spills past the surface
    fn rebuild_boundaries(&mut self) {
        self.boundaries = Some(bounds::rebuild(
            &mut self.world,
            self.boundaries.take(),
            self.viewport.width,
            self.viewport.height,
            self.config.boundary_mode,
            glyphs::rest_bounds(&self.glyphs),
        ));
    }

    fn rebuild_glyphs(&mut self) {
        let specs = glyphs::plan_glyphs(
            &self.layout,
            &self.config.title_lines,
            self.viewport.container_origin,
        );
        glyphs::respawn(
            &mut self.world,
            &mut self.glyphs,
            &specs,
            &mut self.next_glyph_id,
        );
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }
}
