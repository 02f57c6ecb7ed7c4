//! Per-frame glyph draw list
//!
//! Read-only pass over the scene: one command per glyph body, in insertion
//! order, carrying the pose the physics step left behind.

use glam::Vec2;

use crate::scene::Scene;

/// Everything needed to paint one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDraw {
    pub glyph: char,
    pub position: Vec2,
    pub angle: f32,
    pub font_size: f32,
    pub weight: u16,
}

impl GlyphDraw {
    /// CSS font shorthand, e.g. `700 72px ui-monospace`
    pub fn font(&self, family: &str) -> String {
        format!("{} {}px {}", self.weight, self.font_size, family)
    }
}

/// Build the draw list for the current frame
pub fn glyph_draws(scene: &Scene) -> Vec<GlyphDraw> {
    scene
        .glyphs()
        .iter()
        .filter_map(|glyph| {
            let pose = scene.pose(glyph)?;
            Some(GlyphDraw {
                glyph: glyph.glyph,
                position: pose.pos,
                angle: pose.angle,
                font_size: glyph.font_size,
                weight: glyph.role.font_weight(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::scene::{Role, Viewport};

    #[test]
    fn test_one_draw_per_glyph_in_order() {
        let scene = Scene::mount(SceneConfig::default(), Viewport::new(900.0, 700.0));
        let draws = glyph_draws(&scene);
        assert_eq!(draws.len(), scene.glyphs().len());
        for (draw, glyph) in draws.iter().zip(scene.glyphs()) {
            assert_eq!(draw.glyph, glyph.glyph);
            assert_eq!(draw.position, glyph.initial);
            assert_eq!(draw.angle, 0.0);
        }
    }

    #[test]
    fn test_title_glyphs_are_heavier() {
        let scene = Scene::mount(SceneConfig::default(), Viewport::new(900.0, 700.0));
        let draws = glyph_draws(&scene);
        let title = &draws[0];
        let body = draws.last().unwrap();
        assert_eq!(title.weight, Role::Title.font_weight());
        assert_eq!(body.weight, Role::Body.font_weight());
        assert!(title.weight > body.weight);
        assert_eq!(title.font("serif"), "700 72px serif");
    }

    #[test]
    fn test_draw_pass_does_not_mutate() {
        let mut scene = Scene::mount(SceneConfig::default(), Viewport::new(900.0, 700.0));
        let id = scene.glyphs()[2].id;
        scene.nudge(id, Vec2::new(200.0, 0.0), 1.0);
        scene.step();
        let first = glyph_draws(&scene);
        let second = glyph_draws(&scene);
        assert_eq!(first, second);
    }
}
