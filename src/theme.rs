use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SKILLTREE_PALETTE: [(&str, &str); 13] = [
    ("red", "#a82f1b"),
    ("dark-red", "#9a3929"),
    ("bronze", "#cd8032"),
    ("silver", "#d7ded9"),
    ("gold", "#cfa959"),
    ("normal-grey", "#5a5a5b"),
    ("special-grey", "#2b2028"),
    ("white", "#ffffff"),
    ("purple", "#ab274f"),
    ("blue", "#00b9ff"),
    ("dark-blue", "#19aee6"),
    ("green", "#638c4d"),
    ("dark-green", "#526747"),
];

/// Name under which the theme background is addressable from records.
pub const BACKGROUND_COLOR_NAME: &str = "background";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub fallback_color: String,
    pub colors: BTreeMap<String, String>,
}

impl Theme {
    pub fn skilltree_default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#32324e".to_string(),
            fallback_color: "pink".to_string(),
            colors: SKILLTREE_PALETTE
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> String {
        if name == BACKGROUND_COLOR_NAME {
            return self.background.clone();
        }
        match self.colors.get(name) {
            Some(value) => value.clone(),
            None => {
                tracing::debug!(color = name, fallback = %self.fallback_color, "unknown color name");
                self.fallback_color.clone()
            }
        }
    }

    /// First family of the CSS `font-family` list, for rasterizers that take a single name.
    pub fn primary_font_family(&self) -> &str {
        self.font_family
            .split(',')
            .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
            .find(|family| !family.is_empty())
            .unwrap_or("sans-serif")
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::skilltree_default()
    }
}
