//! Icon lookup owned by the view layer.
//!
//! Tabs only carry a symbolic [`TabIcon`] name; the view resolves it to
//! whatever it renders (a glyph, an SVG handle, a font codepoint).

use crate::tab::TabIcon;
use std::collections::HashMap;

/// Maps icon symbols to renderable values of type `G`
#[derive(Debug, Clone)]
pub struct IconRegistry<G> {
    glyphs: HashMap<String, G>,
    fallback: G,
}

impl<G> IconRegistry<G> {
    /// `fallback` is returned for unknown symbols
    pub fn new(fallback: G) -> Self {
        Self {
            glyphs: HashMap::new(),
            fallback,
        }
    }

    /// Register (or replace) the glyph for `name`
    pub fn register(&mut self, name: impl Into<String>, glyph: G) -> &mut Self {
        self.glyphs.insert(name.into(), glyph);
        self
    }

    pub fn resolve(&self, icon: &TabIcon) -> &G {
        self.glyphs.get(icon.name()).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, icon: &TabIcon) -> bool {
        self.glyphs.contains_key(icon.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_and_falls_back() {
        let mut icons = IconRegistry::new('?');
        icons.register("home", '⌂').register("user", '☺');

        assert_eq!(*icons.resolve(&TabIcon::from("home")), '⌂');
        assert_eq!(*icons.resolve(&TabIcon::from("chart")), '?');
        assert!(icons.contains(&TabIcon::from("user")));
        assert!(!icons.contains(&TabIcon::default()));
    }
}
