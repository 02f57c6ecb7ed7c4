//! Static blog-post list
//!
//! Plain data rendered as text links under the hero. Shipped as JSON next to
//! the page; no interaction with the scene.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Posts bundled with the page
const BUNDLED_POSTS: &str = r#"[
    {"title": "Letters that fall over", "date": "2025-03-02", "link": "/posts/letters-that-fall-over"},
    {"title": "Fixed timesteps in the browser", "date": "2024-11-18", "link": "/posts/fixed-timesteps"},
    {"title": "Notes on greedy word wrap", "date": "2024-07-09", "link": "/posts/greedy-word-wrap"}
]"#;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid post list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("post {title:?} has malformed date {date:?} (want YYYY-MM-DD)")]
    BadDate { title: String, date: String },
}

/// A single post entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    /// `YYYY-MM-DD`, so string order is date order
    pub date: String,
    pub link: String,
}

/// Ordered post list, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<BlogPost>,
}

impl PostList {
    /// Parse and sort a JSON array of posts
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut posts: Vec<BlogPost> = serde_json::from_str(json)?;
        if let Some(bad) = posts.iter().find(|p| !is_iso_date(&p.date)) {
            return Err(ContentError::BadDate {
                title: bad.title.clone(),
                date: bad.date.clone(),
            });
        }
        // Stable: same-day posts keep their listed order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(Self { posts })
    }

    /// The list shipped with the page
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_POSTS).unwrap_or_else(|e| {
            log::error!("Bundled posts failed to load: {e}");
            Self::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Fill `container` with one `<li><a>title</a> date</li>` per post (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn render_into(&self, container: &web_sys::Element) -> Result<(), wasm_bindgen::JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("detached container"))?;
        container.set_text_content(None);

        for post in &self.posts {
            let item = document.create_element("li")?;
            let link = document.create_element("a")?;
            link.set_attribute("href", &post.link)?;
            link.set_text_content(Some(&post.title));
            item.append_child(&link)?;

            let date = document.create_element("time")?;
            date.set_attribute("datetime", &post.date)?;
            date.set_text_content(Some(&post.date));
            item.append_child(&date)?;

            container.append_child(&item)?;
        }
        Ok(())
    }
}

fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
