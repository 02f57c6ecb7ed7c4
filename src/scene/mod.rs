//! Interactive lettering scene
//!
//! Everything physical lives here. No DOM or canvas access:
//! - Layout is pure (width in, font sizes and wrapped lines out)
//! - The scene owns the physics world; renderers and trackers only read it
//! - Fixed timestep only

pub mod bounds;
pub mod glyphs;
pub mod layout;
pub mod state;
pub mod sweep;
pub mod tick;
pub mod tracker;
pub mod world;

pub use bounds::{BoundaryPlan, Boundaries, WallRect};
pub use glyphs::{GlyphBody, GlyphId, GlyphSpec, Role, glyph_count, plan_glyphs};
pub use layout::{Layout, SizeClass, char_width, max_line_chars, wrap_words};
pub use state::{Scene, Viewport};
pub use sweep::PointerSweep;
pub use tick::{FrameClock, tick};
pub use tracker::{TrackReport, Tracker, is_disturbed};
pub use world::{PhysicsWorld, Pose};
