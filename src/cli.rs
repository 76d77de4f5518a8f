use crate::compose::render_tree;
use crate::config::{Config, load_config};
use crate::editor::GridEditor;
use crate::loader::{build_tree, load_rows};
use crate::render::{render_svg, write_output_svg};
use crate::scene_dump::write_scene_dump;
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "skilltree", version, about = "Skill tree renderer (CSV to SVG)")]
pub struct Args {
    /// Skill CSV file or '-' for stdin
    #[arg(short = 'i', long = "input", default_value = "skills.csv")]
    pub input: PathBuf,

    /// Output file (svg/png). Defaults to a timestamped file in --outDir.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme colors, canvas, node geometry, editor grid)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas size (square)
    #[arg(short = 's', long = "size")]
    pub size: Option<f32>,

    /// Directory for timestamped output files
    #[arg(long = "outDir", default_value = "diagrams")]
    pub out_dir: PathBuf,

    /// Write the composed primitives as JSON
    #[arg(long = "dumpScene")]
    pub dump_scene: Option<PathBuf>,

    /// Snap skill positions to the editor grid and save the CSV before rendering
    #[arg(long = "snap")]
    pub snap: bool,

    /// Print SVG to stdout instead of writing a file
    #[arg(long = "stdout")]
    pub stdout: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    if args.snap {
        snap_source(&args.input, &config)?;
    }

    let rows = load_rows(&args.input)?;
    let tree = build_tree(&rows, &config.theme);
    let composition = render_tree(&tree, &config)?;
    if !composition.rejected.is_empty() {
        tracing::warn!(
            count = composition.rejected.len(),
            "some skills were rejected and left out of the diagram"
        );
    }
    let svg = render_svg(&composition.canvas, &config.theme);

    if let Some(path) = args.dump_scene.as_deref() {
        write_scene_dump(path, &composition, &tree)?;
    }

    if args.stdout {
        if !matches!(args.output_format, OutputFormat::Svg) {
            return Err(anyhow::anyhow!("Only SVG output can be written to stdout"));
        }
        return write_output_svg(&svg, None);
    }

    let output = match args.output.clone() {
        Some(path) => path,
        None => default_output_path(
            &args.out_dir,
            args.output_format.extension(),
            chrono::Local::now().naive_local(),
        ),
    };
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, Some(output.as_path()))?,
        OutputFormat::Png => write_png(&svg, &output, &config)?,
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(size) = args.size {
        config.canvas.size = size;
    }
    config.render.width = config.canvas.size;
    config.render.height = config.canvas.size;
}

fn snap_source(input: &Path, config: &Config) -> Result<()> {
    if input == Path::new("-") {
        return Err(anyhow::anyhow!("--snap needs a file input, not stdin"));
    }
    let mut editor = GridEditor::open(input, config.editor.clone())?;
    if editor.skills().is_empty() {
        return Ok(());
    }
    editor.snap_all();
    editor.save(input)
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

pub fn default_output_path(dir: &Path, ext: &str, timestamp: NaiveDateTime) -> PathBuf {
    dir.join(format!("skills_{}.{}", timestamp.format("%Y-%m-%dT%H%M%S"), ext))
}
