//! Glyph bodies
//!
//! One dynamic rectangle per non-space character. The rendering/tracking
//! metadata lives in [`GlyphBody`] next to the physics handle rather than in
//! the engine's user data.

use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use super::layout::{Layout, char_width};
use super::world::PhysicsWorld;
use crate::consts::*;
use crate::to_physics;

/// Stable glyph identifier, unique within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GlyphId(pub u32);

/// Which block of text a glyph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Title,
    Body,
}

impl Role {
    /// CSS font weight
    pub fn font_weight(&self) -> u16 {
        match self {
            Role::Title => 700,
            Role::Body => 400,
        }
    }
}

/// Where and how big one glyph should be, before it has a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSpec {
    pub glyph: char,
    pub font_size: f32,
    pub role: Role,
    pub initial: Vec2,
}

impl GlyphSpec {
    pub fn body_size(&self) -> Vec2 {
        body_size(self.font_size)
    }
}

/// Physics proxy size: a little narrower than the advance, a little
/// taller than the font
fn body_size(font_size: f32) -> Vec2 {
    Vec2::new(
        char_width(font_size) * GLYPH_WIDTH_FACTOR,
        font_size * GLYPH_HEIGHT_FACTOR,
    )
}

/// A glyph that has a body in the world
#[derive(Debug, Clone)]
pub struct GlyphBody {
    pub id: GlyphId,
    pub handle: RigidBodyHandle,
    pub glyph: char,
    pub font_size: f32,
    pub role: Role,
    /// Resting point from the layout; fixed until the layout is rebuilt
    pub initial: Vec2,
}

impl GlyphBody {
    pub fn body_size(&self) -> Vec2 {
        body_size(self.font_size)
    }
}

/// Bounding box (min, max) of every glyph body at its resting pose
pub fn rest_bounds(glyphs: &[GlyphBody]) -> Option<(Vec2, Vec2)> {
    glyphs
        .iter()
        .map(|g| {
            let half = g.body_size() / 2.0;
            (g.initial - half, g.initial + half)
        })
        .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)))
}

/// Lay out every non-space character of the title lines and the wrapped
/// description, relative to `origin`
pub fn plan_glyphs(layout: &Layout, title_lines: &[String; 2], origin: Vec2) -> Vec<GlyphSpec> {
    let mut specs = Vec::new();

    for (i, line) in title_lines.iter().enumerate() {
        let y = origin.y + TITLE_BASELINE_OFFSET + i as f32 * layout.title_line_height;
        plan_line(&mut specs, line, layout.title_font_size, Role::Title, origin.x, y);
    }

    let desc_top = origin.y
        + TITLE_BASELINE_OFFSET
        + title_lines.len() as f32 * layout.title_line_height
        + DESCRIPTION_GAP;
    for (j, line) in layout.lines.iter().enumerate() {
        let y = desc_top + j as f32 * layout.desc_line_height;
        plan_line(&mut specs, line, layout.desc_font_size, Role::Body, origin.x, y);
    }

    specs
}

fn plan_line(out: &mut Vec<GlyphSpec>, line: &str, font_size: f32, role: Role, x0: f32, y: f32) {
    let cw = char_width(font_size);
    let start_x = x0 + cw / 2.0;

    for (index, glyph) in line.chars().enumerate() {
        // Spaces get no body but still take up their slot
        if glyph.is_whitespace() {
            continue;
        }
        out.push(GlyphSpec {
            glyph,
            font_size,
            role,
            initial: Vec2::new(start_x + index as f32 * cw, y),
        });
    }
}

/// Number of bodies a layout will produce
pub fn glyph_count(layout: &Layout, title_lines: &[String; 2]) -> usize {
    title_lines
        .iter()
        .chain(layout.lines.iter())
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .count()
}

/// Rigid body + collider for one glyph
fn glyph_body(spec: &GlyphSpec) -> (RigidBody, Collider) {
    // Per-frame drag at 60 Hz expressed as a continuous damping rate
    let damping = GLYPH_AIR_DRAG / SIM_DT;
    let half = spec.body_size() / 2.0;

    let body = RigidBodyBuilder::dynamic()
        .translation(to_physics(spec.initial))
        .linear_damping(damping)
        .angular_damping(damping)
        .build();
    let collider = ColliderBuilder::cuboid(half.x, half.y)
        .restitution(GLYPH_RESTITUTION)
        .friction(GLYPH_FRICTION)
        .density(GLYPH_DENSITY)
        .build();

    (body, collider)
}

/// Remove every body in `existing`, then spawn one per spec.
///
/// `next_id` is advanced so ids stay unique across rebuilds.
pub fn respawn(
    world: &mut PhysicsWorld,
    existing: &mut Vec<GlyphBody>,
    specs: &[GlyphSpec],
    next_id: &mut u32,
) {
    for glyph in existing.drain(..) {
        world.remove(glyph.handle);
    }

    existing.reserve(specs.len());
    for spec in specs {
        let (body, collider) = glyph_body(spec);
        let handle = world.insert(body, collider);
        let id = GlyphId(*next_id);
        *next_id += 1;
        existing.push(GlyphBody {
            id,
            handle,
            glyph: spec.glyph,
            font_size: spec.font_size,
            role: spec.role,
            initial: spec.initial,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles() -> [String; 2] {
        ["Hi you".to_string(), "AB".to_string()]
    }

    fn layout() -> Layout {
        Layout::plan(900.0, "hello big world")
    }

    #[test]
    fn test_space_reserves_slot() {
        let specs = plan_glyphs(&layout(), &titles(), Vec2::ZERO);
        let cw = char_width(72.0);
        // "Hi you": H i _ y o u -> 'y' sits at index 3
        let y = specs.iter().find(|s| s.glyph == 'y').unwrap();
        assert!((y.initial.x - (cw / 2.0 + 3.0 * cw)).abs() < 1e-3);
        assert_eq!(y.role, Role::Title);
    }

    #[test]
    fn test_line_positions() {
        let layout = layout();
        let origin = Vec2::new(10.0, 20.0);
        let specs = plan_glyphs(&layout, &titles(), origin);

        let first_title = specs[0];
        assert_eq!(first_title.glyph, 'H');
        assert_eq!(first_title.initial.y, 20.0 + TITLE_BASELINE_OFFSET);
        assert!((first_title.initial.x - (10.0 + char_width(72.0) / 2.0)).abs() < 1e-3);

        let second_title = specs.iter().find(|s| s.glyph == 'A').unwrap();
        assert_eq!(second_title.initial.y, 20.0 + TITLE_BASELINE_OFFSET + 84.0);

        let first_body = specs.iter().find(|s| s.role == Role::Body).unwrap();
        assert_eq!(first_body.glyph, 'h');
        assert_eq!(first_body.font_size, 18.0);
        assert_eq!(
            first_body.initial.y,
            20.0 + TITLE_BASELINE_OFFSET + 2.0 * 84.0 + DESCRIPTION_GAP
        );
    }

    #[test]
    fn test_count_matches_non_space_chars() {
        let layout = layout();
        let specs = plan_glyphs(&layout, &titles(), Vec2::ZERO);
        // "Hiyou" + "AB" + "hellobigworld"
        assert_eq!(specs.len(), 5 + 2 + 13);
        assert_eq!(glyph_count(&layout, &titles()), specs.len());
    }

    #[test]
    fn test_body_size() {
        let spec = GlyphSpec {
            glyph: 'x',
            font_size: 20.0,
            role: Role::Body,
            initial: Vec2::ZERO,
        };
        let size = spec.body_size();
        assert!((size.x - 20.0 * 0.62 * 0.9).abs() < 1e-4);
        assert!((size.y - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_respawn_is_idempotent_in_count() {
        let mut world = PhysicsWorld::new();
        let mut glyphs = Vec::new();
        let mut next_id = 1;
        let specs = plan_glyphs(&layout(), &titles(), Vec2::ZERO);

        respawn(&mut world, &mut glyphs, &specs, &mut next_id);
        let first_handles: Vec<_> = glyphs.iter().map(|g| g.handle).collect();
        respawn(&mut world, &mut glyphs, &specs, &mut next_id);

        assert_eq!(glyphs.len(), specs.len());
        assert_eq!(world.body_count(), specs.len());
        assert!(first_handles.iter().all(|h| !world.contains(*h)));
        // Ids keep increasing across rebuilds
        assert_eq!(glyphs[0].id, GlyphId(specs.len() as u32 + 1));
    }

    #[test]
    fn test_rest_bounds_cover_every_body() {
        let mut world = PhysicsWorld::new();
        let mut glyphs = Vec::new();
        let mut next_id = 1;
        assert_eq!(rest_bounds(&glyphs), None);

        let specs = plan_glyphs(&layout(), &titles(), Vec2::new(10.0, 20.0));
        respawn(&mut world, &mut glyphs, &specs, &mut next_id);
        let (min, max) = rest_bounds(&glyphs).unwrap();

        for spec in &specs {
            let half = spec.body_size() / 2.0;
            assert!((spec.initial - half).cmpge(min).all());
            assert!((spec.initial + half).cmple(max).all());
        }
        // Leftmost title glyph touches the left edge of the box
        let cw = char_width(72.0);
        assert!((min.x - (10.0 + cw / 2.0 - cw * GLYPH_WIDTH_FACTOR / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_font_weight_by_role() {
        assert!(Role::Title.font_weight() > Role::Body.font_weight());
    }
}
