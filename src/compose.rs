use crate::config::{CanvasConfig, Config, NodeGeometry};
use crate::error::{RenderError, ValidationError};
use crate::ir::Tree;
use crate::node::NodeRenderer;
use crate::scene::{Canvas, Primitive};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRejection {
    pub name: String,
    pub error: ValidationError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub canvas: Canvas,
    pub rejected: Vec<NodeRejection>,
}

/// Lays out a whole tree: dependency edges first, node artwork on top.
#[derive(Debug, Clone)]
pub struct TreeComposer<'c> {
    canvas: &'c CanvasConfig,
    geometry: &'c NodeGeometry,
    background: &'c str,
}

impl<'c> TreeComposer<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            canvas: &config.canvas,
            geometry: &config.node,
            background: &config.theme.background,
        }
    }

    pub fn render(&self, tree: &Tree) -> Result<Composition, RenderError> {
        let mut canvas = Canvas::square(self.canvas.size, self.background);
        self.draw_edges(tree, &mut canvas)?;
        let rejected = self.draw_nodes(tree, &mut canvas);
        tracing::debug!(
            nodes = tree.len(),
            rejected = rejected.len(),
            primitives = canvas.primitives.len(),
            "composed skill tree"
        );
        Ok(Composition { canvas, rejected })
    }

    fn draw_edges(&self, tree: &Tree, canvas: &mut Canvas) -> Result<(), RenderError> {
        for node in tree.nodes().iter().filter(|node| node.has_dependency()) {
            let target = tree.get(&node.dependency).ok_or_else(|| {
                RenderError::UnresolvedDependency {
                    node: node.name.clone(),
                    dependency: node.dependency.clone(),
                }
            })?;
            let stroke = if node.is_locked() {
                &node.locked_color
            } else {
                &node.dependency_color
            };
            canvas.push(Primitive::line(
                node.position,
                target.position,
                stroke,
                self.canvas.edge_width,
            ));
        }
        Ok(())
    }

    fn draw_nodes(&self, tree: &Tree, canvas: &mut Canvas) -> Vec<NodeRejection> {
        let mut rejected = Vec::new();
        for node in tree.nodes() {
            let mut renderer = NodeRenderer::new(&node.name, node.position, self.geometry);
            if let Err(error) = renderer.initialise(node) {
                tracing::warn!(skill = %node.name, %error, "skipping skill");
                rejected.push(NodeRejection {
                    name: node.name.clone(),
                    error,
                });
                continue;
            }
            match renderer.draw() {
                Ok(primitives) => canvas.extend(primitives),
                Err(error) => tracing::warn!(skill = %node.name, %error, "skill not drawn"),
            }
        }
        rejected
    }
}

pub fn render_tree(tree: &Tree, config: &Config) -> Result<Composition, RenderError> {
    TreeComposer::new(config).render(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Position, SkillRecord};

    fn skill(name: &str, x: f32, y: f32, status: &str, level: i64, dependency: &str) -> SkillRecord {
        let mut record = SkillRecord::new(name, x, y);
        record.status = status.to_string();
        record.level = level;
        record.dependency = dependency.to_string();
        record.locked_color = "#5a5a5b".to_string();
        record.dependency_color = "#ffffff".to_string();
        record
    }

    #[test]
    fn edges_are_drawn_beneath_nodes() {
        let tree = Tree::new(vec![
            skill("A", 100.0, 100.0, "completed", 0, ""),
            skill("B", 200.0, 100.0, "unlocked", 0, "A"),
        ]);
        let composition = render_tree(&tree, &Config::default()).unwrap();
        let prims = &composition.canvas.primitives;
        assert_eq!(prims[0].kind(), "rect");
        assert_eq!(
            prims[1],
            Primitive::line(
                Position::new(200.0, 100.0),
                Position::new(100.0, 100.0),
                "#ffffff",
                15.0
            )
        );
        assert!(prims[2..].iter().all(|p| p.kind() != "line"));
    }

    #[test]
    fn unresolved_dependency_aborts() {
        let tree = Tree::new(vec![
            skill("A", 100.0, 100.0, "completed", 0, ""),
            skill("B", 200.0, 100.0, "locked", 0, "Ghost"),
        ]);
        assert_eq!(
            render_tree(&tree, &Config::default()),
            Err(RenderError::UnresolvedDependency {
                node: "B".to_string(),
                dependency: "Ghost".to_string(),
            })
        );
    }

    #[test]
    fn rejected_nodes_are_reported_and_skipped() {
        let tree = Tree::new(vec![
            skill("bad", 100.0, 100.0, "locked", 2, ""),
            skill("good", 300.0, 300.0, "unlocked", 0, ""),
        ]);
        let composition = render_tree(&tree, &Config::default()).unwrap();
        assert_eq!(
            composition.rejected,
            vec![NodeRejection {
                name: "bad".to_string(),
                error: ValidationError::LevelRequiresCompletion {
                    status: "locked".to_string(),
                    level: 2,
                },
            }]
        );
        assert!(
            composition
                .canvas
                .texts()
                .all(|run| run.lines != vec!["bad".to_string()])
        );
        assert_eq!(composition.canvas.circles().count(), 2);
    }

    #[test]
    fn edges_of_rejected_nodes_are_still_drawn() {
        let tree = Tree::new(vec![
            skill("A", 100.0, 100.0, "completed", 0, ""),
            skill("B", 200.0, 100.0, "mystery", 0, "A"),
        ]);
        let composition = render_tree(&tree, &Config::default()).unwrap();
        assert_eq!(composition.canvas.lines().count(), 1);
        assert_eq!(composition.rejected.len(), 1);
    }

    #[test]
    fn canvas_size_comes_from_config() {
        let mut config = Config::default();
        config.canvas.size = 2400.0;
        let composition = render_tree(&Tree::default(), &config).unwrap();
        assert_eq!(composition.canvas.width, 2400.0);
        assert_eq!(composition.canvas.height, 2400.0);
        assert_eq!(composition.canvas.primitives.len(), 1);
    }
}
