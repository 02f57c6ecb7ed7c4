//! Glyph Scene - portfolio hero with physics-driven lettering
//!
//! Core modules:
//! - `scene`: Layout planning, glyph bodies, physics world, disturbance tracking
//! - `renderer`: Per-frame glyph draw commands (Canvas2D backend on web)
//! - `config`: Scene configuration (title, description, ink, boundary mode)
//! - `content`: Static blog-post list
//! - `subscribe`: Email subscription form state and submission

pub mod config;
pub mod content;
pub mod renderer;
pub mod scene;
pub mod subscribe;

pub use config::{BoundaryMode, SceneConfig};
pub use scene::Scene;

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Size class breakpoints (container width, CSS pixels)
    pub const MOBILE_MAX_WIDTH: f32 = 500.0;
    pub const TABLET_MAX_WIDTH: f32 = 768.0;

    /// Average glyph advance as a fraction of font size (monospace approximation)
    pub const CHAR_WIDTH_FACTOR: f32 = 0.62;
    /// Characters of slack subtracted from the computed line capacity
    pub const LINE_SLACK_CHARS: i64 = 2;

    /// Offset from the origin to the first title line's center
    pub const TITLE_BASELINE_OFFSET: f32 = 60.0;
    /// Gap between the last title line and the first description line
    pub const DESCRIPTION_GAP: f32 = 24.0;

    /// Glyph body extents relative to char width / font size
    pub const GLYPH_WIDTH_FACTOR: f32 = 0.9;
    pub const GLYPH_HEIGHT_FACTOR: f32 = 1.1;
    /// Glyph body material - bouncy and light so a brush of the cursor moves it
    pub const GLYPH_RESTITUTION: f32 = 0.8;
    pub const GLYPH_FRICTION: f32 = 0.1;
    /// Fraction of velocity lost per 60 Hz frame
    pub const GLYPH_AIR_DRAG: f32 = 0.03;
    pub const GLYPH_DENSITY: f32 = 0.002;

    /// Boundary wall thickness (also how far walls overlap past the corners)
    pub const WALL_THICKNESS: f32 = 60.0;
    /// Floor depth used in full-viewport mode so glyphs can settle below the fold
    pub const EXTENDED_HEIGHT: f32 = 3000.0;
    /// Gap kept between resting glyph bodies and the walls
    pub const WALL_CLEARANCE: f32 = 2.0;

    /// Pointer proxy radius
    pub const POINTER_RADIUS: f32 = 24.0;
    /// Where the pointer proxy waits when no pointer is over the surface
    pub const POINTER_PARKED: (f32, f32) = (-10_000.0, -10_000.0);

    /// Disturbance thresholds (strictly greater than triggers)
    pub const MOVE_THRESHOLD: f32 = 5.0;
    pub const ANGLE_THRESHOLD: f32 = 0.1;

    /// Pixels per physics "meter" handed to the solver's length unit
    pub const PIXELS_PER_METER: f32 = 50.0;
}

/// Convert a glam vector to the physics engine's vector type
#[inline]
pub fn to_physics(v: Vec2) -> rapier2d::prelude::Vector<rapier2d::prelude::Real> {
    rapier2d::prelude::Vector::new(v.x, v.y)
}

/// Convert a physics engine vector to glam
#[inline]
pub fn from_physics(v: &rapier2d::prelude::Vector<rapier2d::prelude::Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Map a client-space point (e.g. `MouseEvent::client_x/y`) into the local
/// space of a surface whose bounding rect starts at `surface_origin`
#[inline]
pub fn client_to_local(client: Vec2, surface_origin: Vec2) -> Vec2 {
    client - surface_origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_vector_conversion() {
        let v = Vec2::new(12.5, -3.0);
        let p = to_physics(v);
        assert_eq!((p.x, p.y), (12.5, -3.0));
        assert_eq!(from_physics(&p), v);
    }

    #[test]
    fn test_client_to_local() {
        let local = client_to_local(Vec2::new(130.0, 90.0), Vec2::new(100.0, 40.0));
        assert_eq!(local, Vec2::new(30.0, 50.0));
    }
}
