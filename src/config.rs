use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub outer_text_size: f32,
    pub inner_text_size: f32,
    pub line_height: f32,
    pub text_ring_scale: f32,
    pub lower_text_nudge: f32,
    pub max_char_angle: f32,
    pub star_radius: f32,
    pub star_ring_scale: f32,
    pub star_separation: f32,
    pub max_level: i64,
    pub bronze_color: String,
    pub silver_color: String,
    pub gold_color: String,
}

impl NodeGeometry {
    /// Radius of the arc the curved annotations sit on.
    pub fn text_radius(&self) -> f32 {
        (self.outer_radius + self.inner_radius) / 2.0 * self.text_ring_scale
    }

    pub fn star_distance(&self) -> f32 {
        self.inner_radius * self.star_ring_scale
    }
}

impl Default for NodeGeometry {
    fn default() -> Self {
        Self {
            outer_radius: 30.0,
            inner_radius: 22.0,
            outer_text_size: 8.0,
            inner_text_size: 12.0,
            line_height: 1.2,
            text_ring_scale: 0.95,
            lower_text_nudge: 0.2,
            max_char_angle: 8.0,
            star_radius: 3.0,
            star_ring_scale: 0.8,
            star_separation: 25.0,
            max_level: 15,
            bronze_color: "#cd7f32".to_string(),
            silver_color: "#c0c0c0".to_string(),
            gold_color: "#ffd700".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub size: f32,
    pub edge_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: 1600.0,
            edge_width: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub grid_size: f32,
    pub multiplier: f32,
    pub move_distance: f32,
    pub hit_radius: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            multiplier: 2.0,
            move_distance: 20.0,
            hit_radius: 15.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1600.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub canvas: CanvasConfig,
    pub node: NodeGeometry,
    pub editor: EditorConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    background: Option<String>,
    fallback_color: Option<String>,
    colors: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasFile {
    size: Option<f32>,
    edge_width: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeFile {
    outer_radius: Option<f32>,
    inner_radius: Option<f32>,
    outer_text_size: Option<f32>,
    inner_text_size: Option<f32>,
    line_height: Option<f32>,
    text_ring_scale: Option<f32>,
    lower_text_nudge: Option<f32>,
    max_char_angle: Option<f32>,
    star_radius: Option<f32>,
    star_ring_scale: Option<f32>,
    star_separation: Option<f32>,
    max_level: Option<i64>,
    bronze_color: Option<String>,
    silver_color: Option<String>,
    gold_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditorFile {
    grid_size: Option<f32>,
    multiplier: Option<f32>,
    move_distance: Option<f32>,
    hit_radius: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeFile>,
    canvas: Option<CanvasFile>,
    node: Option<NodeFile>,
    editor: Option<EditorFile>,
    render: Option<RenderFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };
    apply_config_file(&mut config, parsed);
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.background {
            config.theme.background = v;
        }
        if let Some(v) = theme.fallback_color {
            config.theme.fallback_color = v;
        }
        if let Some(colors) = theme.colors {
            config.theme.colors.extend(colors);
        }
    }

    if let Some(canvas) = parsed.canvas {
        if let Some(v) = canvas.size {
            config.canvas.size = v;
        }
        if let Some(v) = canvas.edge_width {
            config.canvas.edge_width = v;
        }
    }

    if let Some(node) = parsed.node {
        let geometry = &mut config.node;
        if let Some(v) = node.outer_radius {
            geometry.outer_radius = v;
        }
        if let Some(v) = node.inner_radius {
            geometry.inner_radius = v;
        }
        if let Some(v) = node.outer_text_size {
            geometry.outer_text_size = v;
        }
        if let Some(v) = node.inner_text_size {
            geometry.inner_text_size = v;
        }
        if let Some(v) = node.line_height {
            geometry.line_height = v;
        }
        if let Some(v) = node.text_ring_scale {
            geometry.text_ring_scale = v;
        }
        if let Some(v) = node.lower_text_nudge {
            geometry.lower_text_nudge = v;
        }
        if let Some(v) = node.max_char_angle {
            geometry.max_char_angle = v;
        }
        if let Some(v) = node.star_radius {
            geometry.star_radius = v;
        }
        if let Some(v) = node.star_ring_scale {
            geometry.star_ring_scale = v;
        }
        if let Some(v) = node.star_separation {
            geometry.star_separation = v;
        }
        if let Some(v) = node.max_level {
            geometry.max_level = v.max(0);
        }
        if let Some(v) = node.bronze_color {
            geometry.bronze_color = v;
        }
        if let Some(v) = node.silver_color {
            geometry.silver_color = v;
        }
        if let Some(v) = node.gold_color {
            geometry.gold_color = v;
        }
    }

    if let Some(editor) = parsed.editor {
        if let Some(v) = editor.grid_size {
            config.editor.grid_size = v;
        }
        if let Some(v) = editor.multiplier {
            config.editor.multiplier = v;
        }
        if let Some(v) = editor.move_distance {
            config.editor.move_distance = v;
        }
        if let Some(v) = editor.hit_radius {
            config.editor.hit_radius = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }
}
