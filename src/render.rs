use crate::scene::{Canvas, Primitive, TextRun};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(canvas: &Canvas, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = canvas.width;
    let height = canvas.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    for primitive in &canvas.primitives {
        match primitive {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                svg.push_str(&format!(
                    "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\"/>",
                    escape_xml(fill)
                ));
            }
            Primitive::Circle { cx, cy, r, fill } => {
                svg.push_str(&format!(
                    "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
                    escape_xml(fill)
                ));
            }
            Primitive::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                svg.push_str(&format!(
                    "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
                    escape_xml(stroke)
                ));
            }
            Primitive::Text(run) => svg.push_str(&text_run_svg(run, theme)),
        }
    }

    svg.push_str("</svg>");
    svg
}

fn text_run_svg(run: &TextRun, theme: &Theme) -> String {
    let x = run.x;
    let y = run.y;
    let step = run.font_size * run.line_height;
    let start_y = y - run.lines.len().saturating_sub(1) as f32 * step / 2.0;
    let mut text = String::new();

    text.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"",
        escape_xml(&theme.font_family),
        run.font_size,
        escape_xml(&run.fill)
    ));
    if let Some(rotation) = run.rotation {
        text.push_str(&format!(" transform=\"rotate({rotation:.2}, {x:.2}, {y:.2})\""));
    }
    text.push('>');

    if let [line] = run.lines.as_slice() {
        text.push_str(&escape_xml(line));
    } else {
        for (idx, line) in run.lines.iter().enumerate() {
            let dy = if idx == 0 { 0.0 } else { step };
            text.push_str(&format!(
                "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
                escape_xml(line)
            ));
        }
    }

    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, svg)?;
            tracing::info!(path = %path.display(), "SVG saved");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.primary_font_family().to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    pixmap.save_png(output)?;
    tracing::info!(path = %output.display(), "PNG saved");
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Position;

    fn run(lines: &[&str], rotation: Option<f32>) -> TextRun {
        TextRun {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            x: 50.0,
            y: 50.0,
            font_size: 12.0,
            line_height: 1.2,
            rotation,
            fill: "#ffffff".to_string(),
        }
    }

    #[test]
    fn render_svg_basic() {
        let mut canvas = Canvas::square(200.0, "#32324e");
        canvas.push(Primitive::line(
            Position::new(10.0, 10.0),
            Position::new(100.0, 100.0),
            "#ffffff",
            15.0,
        ));
        canvas.push(Primitive::circle(Position::new(100.0, 100.0), 30.0, "#a82f1b"));
        let svg = render_svg(&canvas, &Theme::skilltree_default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 200 200\""));
        assert!(svg.contains(
            "<rect x=\"0.00\" y=\"0.00\" width=\"200.00\" height=\"200.00\" fill=\"#32324e\"/>"
        ));
        assert!(svg.contains("stroke-width=\"15\""));
        assert!(svg.contains("<circle cx=\"100.00\" cy=\"100.00\" r=\"30.00\" fill=\"#a82f1b\"/>"));
        let line_at = svg.find("<line").unwrap();
        let circle_at = svg.find("<circle").unwrap();
        assert!(line_at < circle_at);
    }

    #[test]
    fn multi_line_labels_use_tspans() {
        let out = text_run_svg(&run(&["Fire", "Ball"], None), &Theme::skilltree_default());
        assert!(out.contains("y=\"42.80\""));
        assert!(out.contains("<tspan x=\"50.00\" dy=\"0.00\">Fire</tspan>"));
        assert!(out.contains("<tspan x=\"50.00\" dy=\"14.40\">Ball</tspan>"));
        assert!(!out.contains("transform"));
    }

    #[test]
    fn rotated_glyphs_carry_transform() {
        let out = text_run_svg(&run(&["&"], Some(356.0)), &Theme::skilltree_default());
        assert!(out.contains("transform=\"rotate(356.00, 50.00, 50.00)\""));
        assert!(out.contains(">&amp;</text>"));
    }
}
