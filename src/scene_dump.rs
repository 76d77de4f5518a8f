use crate::compose::Composition;
use crate::ir::Tree;
use crate::scene::Primitive;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct SceneDump<'a> {
    pub width: f32,
    pub height: f32,
    pub background: &'a str,
    pub skills: Vec<SkillDump<'a>>,
    pub rejected: Vec<RejectionDump>,
    pub primitives: &'a [Primitive],
}

#[derive(Debug, Serialize)]
pub struct SkillDump<'a> {
    pub name: &'a str,
    pub x: f32,
    pub y: f32,
    pub dependency: Option<&'a str>,
    pub status: &'a str,
    pub level: i64,
}

#[derive(Debug, Serialize)]
pub struct RejectionDump {
    pub name: String,
    pub reason: String,
}

impl<'a> SceneDump<'a> {
    pub fn from_composition(composition: &'a Composition, tree: &'a Tree) -> Self {
        let skills = tree
            .nodes()
            .iter()
            .map(|node| SkillDump {
                name: &node.name,
                x: node.position.x,
                y: node.position.y,
                dependency: tree.dependency_of(&node.name),
                status: &node.status,
                level: node.level,
            })
            .collect();

        let rejected = composition
            .rejected
            .iter()
            .map(|rejection| RejectionDump {
                name: rejection.name.clone(),
                reason: rejection.error.to_string(),
            })
            .collect();

        SceneDump {
            width: composition.canvas.width,
            height: composition.canvas.height,
            background: &composition.canvas.background,
            skills,
            rejected,
            primitives: &composition.canvas.primitives,
        }
    }
}

pub fn write_scene_dump(path: &Path, composition: &Composition, tree: &Tree) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = SceneDump::from_composition(composition, tree);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::render_tree;
    use crate::config::Config;
    use crate::ir::SkillRecord;

    #[test]
    fn dump_lists_skills_and_primitives() {
        let mut root = SkillRecord::new("root", 100.0, 100.0);
        root.status = "completed".to_string();
        root.level = 1;
        let mut bad = SkillRecord::new("bad", 200.0, 100.0);
        bad.status = "lost".to_string();
        bad.dependency = "root".to_string();
        let tree = Tree::new(vec![root, bad]);
        let composition = render_tree(&tree, &Config::default()).unwrap();

        let value = serde_json::to_value(SceneDump::from_composition(&composition, &tree)).unwrap();
        assert_eq!(value["width"], 1600.0);
        assert_eq!(value["skills"][0]["dependency"], serde_json::Value::Null);
        assert_eq!(value["skills"][1]["dependency"], "root");
        assert_eq!(value["rejected"][0]["name"], "bad");
        assert_eq!(value["primitives"][0]["kind"], "rect");
        assert_eq!(value["primitives"][1]["kind"], "line");
        assert_eq!(
            value["primitives"].as_array().unwrap().len(),
            composition.canvas.primitives.len()
        );
    }
}
