//! Site manifest: the hero playlist and the ordered section table.
//!
//! Parsed once from the JSON embedded at build time; the rest of the app
//! treats it as immutable input.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SectionLink {
    /// DOM id of the section element, also its name in the controller.
    pub id: String,
    /// Label shown in the navbar.
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Ordered hero video sources.
    pub videos: Vec<String>,
    /// Sections in scan priority order.
    pub sections: Vec<SectionLink>,
}

impl SiteConfig {
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }
}

static SITE: Lazy<SiteConfig> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/site.json"))
        .expect("embedded site manifest is malformed")
});

pub fn site() -> &'static SiteConfig {
    &SITE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_manifest_parses() {
        let config = site();
        assert!(!config.videos.is_empty());
        assert_eq!(config.sections.first().map(|s| s.id.as_str()), Some("home"));
    }
}
