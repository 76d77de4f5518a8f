use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Locked,
    Unlocked,
    Completed,
}

impl Status {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "locked" => Some(Self::Locked),
            "unlocked" => Some(Self::Unlocked),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One skill as delivered by the loader. Colors are already resolved;
/// `status` and `level` are still raw and get checked by the node renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub name: String,
    pub position: Position,
    pub dependency: String,
    pub upper_text: String,
    pub lower_text: String,
    pub status: String,
    pub level: i64,
    pub color: String,
    pub background_color: String,
    pub locked_color: String,
    pub dependency_color: String,
    pub complete_inner_text_color: String,
    pub incomplete_inner_text_color: String,
    pub unlocked_outer_text_color: String,
    pub locked_outer_text_color: String,
}

impl SkillRecord {
    pub fn new(name: &str, x: f32, y: f32) -> Self {
        Self {
            name: name.to_string(),
            position: Position::new(x, y),
            dependency: String::new(),
            upper_text: String::new(),
            lower_text: String::new(),
            status: Status::Locked.as_str().to_string(),
            level: 0,
            color: "#ffffff".to_string(),
            background_color: "#32324e".to_string(),
            locked_color: "#5a5a5b".to_string(),
            dependency_color: "#ffffff".to_string(),
            complete_inner_text_color: "#ffffff".to_string(),
            incomplete_inner_text_color: "#ffffff".to_string(),
            unlocked_outer_text_color: "#ffffff".to_string(),
            locked_outer_text_color: "#5a5a5b".to_string(),
        }
    }

    pub fn has_dependency(&self) -> bool {
        !self.dependency.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        Status::from_token(&self.status) == Some(Status::Locked)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<SkillRecord>,
    index: HashMap<String, usize>,
    dependency_map: HashMap<String, String>,
}

impl Tree {
    pub fn new(nodes: Vec<SkillRecord>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut dependency_map = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.contains_key(&node.name) {
                tracing::warn!(name = %node.name, "duplicate skill name, keeping the first occurrence");
                continue;
            }
            index.insert(node.name.clone(), idx);
            dependency_map.insert(node.name.clone(), node.dependency.clone());
        }
        Self {
            nodes,
            index,
            dependency_map,
        }
    }

    pub fn nodes(&self) -> &[SkillRecord] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        self.index.get(name).map(|&idx| &self.nodes[idx])
    }

    pub fn dependency_of(&self, name: &str) -> Option<&str> {
        self.dependency_map
            .get(name)
            .map(String::as_str)
            .filter(|dep| !dep.is_empty())
    }
}

impl FromIterator<SkillRecord> for Tree {
    fn from_iter<I: IntoIterator<Item = SkillRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
