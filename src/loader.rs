use crate::ir::{Position, SkillRecord, Tree};
use crate::theme::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::Path;

/// One CSV row as stored on disk, colors still by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRow {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub dependency: String,
    pub upper_text: String,
    pub lower_text: String,
    pub status: String,
    pub color: String,
    pub complete_inner_text_color: String,
    pub unlocked_outer_text_color: String,
    pub background_color: String,
    pub locked_color: String,
    pub incomplete_inner_text_color: String,
    pub locked_outer_text_color: String,
    pub level: i64,
    pub dependency_color: String,
}

impl SkillRow {
    pub fn resolve(&self, theme: &Theme) -> SkillRecord {
        SkillRecord {
            name: self.name.clone(),
            position: Position::new(self.x as f32, self.y as f32),
            dependency: self.dependency.clone(),
            upper_text: self.upper_text.clone(),
            lower_text: self.lower_text.clone(),
            status: self.status.clone(),
            level: self.level,
            color: theme.resolve(&self.color),
            background_color: theme.resolve(&self.background_color),
            locked_color: theme.resolve(&self.locked_color),
            dependency_color: theme.resolve(&self.dependency_color),
            complete_inner_text_color: theme.resolve(&self.complete_inner_text_color),
            incomplete_inner_text_color: theme.resolve(&self.incomplete_inner_text_color),
            unlocked_outer_text_color: theme.resolve(&self.unlocked_outer_text_color),
            locked_outer_text_color: theme.resolve(&self.locked_outer_text_color),
        }
    }
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<SkillRow>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut rows = Vec::new();
    for (idx, row) in csv_reader.deserialize::<SkillRow>().enumerate() {
        // Header is line 1.
        let row = row.with_context(|| format!("Invalid skill record on line {}", idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn write_rows<W: Write>(writer: W, rows: &[SkillRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads rows from `path`. A missing file is not an error: it yields no rows.
pub fn load_rows(path: &Path) -> Result<Vec<SkillRow>> {
    if path == Path::new("-") {
        return read_rows(io::stdin().lock());
    }
    match std::fs::File::open(path) {
        Ok(file) => read_rows(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no skill file found, starting with an empty tree");
            Ok(Vec::new())
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to open skill file {}", path.display()))
        }
    }
}

pub fn save_rows(path: &Path, rows: &[SkillRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create skill file {}", path.display()))?;
    write_rows(file, rows)
}

pub fn build_tree(rows: &[SkillRow], theme: &Theme) -> Tree {
    rows.iter().map(|row| row.resolve(theme)).collect()
}

pub fn load_tree(path: &Path, theme: &Theme) -> Result<Tree> {
    let rows = load_rows(path)?;
    Ok(build_tree(&rows, theme))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,x,y,dependency,upper_text,lower_text,status,color,complete_inner_text_color,unlocked_outer_text_color,background_color,locked_color,incomplete_inner_text_color,locked_outer_text_color,level,dependency_color
Basics,800,200,,FOUNDATION,TIER I,completed,red,white,white,background,normal-grey,silver,normal-grey,3,dark-red
\"Fire|Ball\",800,400,Basics,\"FIRE, HOT\",,unlocked,mystery,white,white,background,normal-grey,silver,normal-grey,0,dark-red
";

    #[test]
    fn reads_rows_with_quoting() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Fire|Ball");
        assert_eq!(rows[1].upper_text, "FIRE, HOT");
        assert_eq!(rows[1].lower_text, "");
        assert_eq!(rows[0].level, 3);
        assert_eq!(rows[0].dependency, "");
    }

    #[test]
    fn resolves_colors_through_theme() {
        let theme = Theme::skilltree_default();
        let tree = build_tree(&read_rows(SAMPLE.as_bytes()).unwrap(), &theme);
        let basics = tree.get("Basics").unwrap();
        assert_eq!(basics.color, "#a82f1b");
        assert_eq!(basics.background_color, "#32324e");
        assert_eq!(basics.dependency_color, "#9a3929");
        assert_eq!(basics.position, Position::new(800.0, 200.0));
        assert_eq!(tree.get("Fire|Ball").unwrap().color, "pink");
    }

    #[test]
    fn write_preserves_column_order() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_rows(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), SAMPLE.lines().next());
        assert_eq!(read_rows(text.as_bytes()).unwrap(), rows);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let bad = SAMPLE.replace("800,200", "eight,200");
        let err = read_rows(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn missing_file_is_an_empty_tree() {
        let tree = load_tree(
            Path::new("definitely/not/here/skills.csv"),
            &Theme::skilltree_default(),
        )
        .unwrap();
        assert!(tree.is_empty());
    }
}
