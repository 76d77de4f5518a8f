#[cfg(feature = "cli")]
pub mod cli;
pub mod compose;
pub mod config;
pub mod editor;
pub mod error;
pub mod ir;
pub mod loader;
pub mod node;
pub mod render;
pub mod scene;
pub mod scene_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use compose::{Composition, NodeRejection, TreeComposer, render_tree};
pub use config::{Config, NodeGeometry, load_config};
pub use error::{RenderError, ValidationError};
pub use ir::{Position, SkillRecord, Status, Tree};
pub use node::{NodeRenderer, draw_skill};
pub use render::render_svg;
pub use scene::{Canvas, Primitive, TextRun};
pub use theme::Theme;

/// Render skill CSV text straight to SVG.
pub fn render_csv(source: &str, config: &Config) -> anyhow::Result<String> {
    let rows = loader::read_rows(source.as_bytes())?;
    let tree = loader::build_tree(&rows, &config.theme);
    let composition = render_tree(&tree, config)?;
    Ok(render_svg(&composition.canvas, &config.theme))
}
