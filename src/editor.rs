//! Headless model of the repositioning tool: coordinates are kept in
//! editor space (file coordinates divided by the multiplier), snapped to a
//! grid, and written back in file space on save.

use crate::config::EditorConfig;
use crate::ir::Position;
use crate::loader::{self, SkillRow};
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Left" => Some(Self::Left),
            "Right" => Some(Self::Right),
            "Up" => Some(Self::Up),
            "Down" => Some(Self::Down),
            _ => None,
        }
    }

    fn offset(self, distance: f32) -> (f32, f32) {
        match self {
            Self::Left => (-distance, 0.0),
            Self::Right => (distance, 0.0),
            Self::Up => (0.0, -distance),
            Self::Down => (0.0, distance),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSkill {
    pub row: SkillRow,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct GridEditor {
    config: EditorConfig,
    skills: Vec<EditorSkill>,
    selected: Vec<usize>,
}

impl GridEditor {
    pub fn new(rows: Vec<SkillRow>, config: EditorConfig) -> Self {
        let skills = rows
            .into_iter()
            .map(|row| EditorSkill {
                position: Position::new(
                    row.x as f32 / config.multiplier,
                    row.y as f32 / config.multiplier,
                ),
                row,
            })
            .collect();
        Self {
            config,
            skills,
            selected: Vec::new(),
        }
    }

    pub fn open(path: &Path, config: EditorConfig) -> Result<Self> {
        Ok(Self::new(loader::load_rows(path)?, config))
    }

    pub fn skills(&self) -> &[EditorSkill] {
        &self.skills
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.skills
            .iter()
            .find(|skill| skill.row.name == name)
            .map(|skill| skill.position)
    }

    pub fn selected_names(&self) -> Vec<&str> {
        self.selected
            .iter()
            .map(|&idx| self.skills[idx].row.name.as_str())
            .collect()
    }

    pub fn snap_to_grid(&self, value: f32) -> f32 {
        (value / self.config.grid_size).round_ties_even() * self.config.grid_size
    }

    fn snap(&self, position: Position) -> Position {
        Position::new(self.snap_to_grid(position.x), self.snap_to_grid(position.y))
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        let radius_sq = self.config.hit_radius * self.config.hit_radius;
        self.skills.iter().position(|skill| {
            let dx = x - skill.position.x;
            let dy = y - skill.position.y;
            dx * dx + dy * dy <= radius_sq
        })
    }

    /// Toggle adds or removes the hit node; a plain click selects only it.
    pub fn click(&mut self, x: f32, y: f32, toggle: bool) -> Option<usize> {
        let hit = self.hit_test(x, y)?;
        if toggle {
            if let Some(pos) = self.selected.iter().position(|&idx| idx == hit) {
                self.selected.remove(pos);
            } else {
                self.selected.push(hit);
            }
        } else {
            self.selected = vec![hit];
        }
        Some(hit)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Drags only when exactly one node is selected.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let [idx] = self.selected.as_slice() else {
            return false;
        };
        let idx = *idx;
        let snapped = self.snap(Position::new(x, y));
        self.skills[idx].position = snapped;
        true
    }

    pub fn nudge(&mut self, direction: Direction) {
        let (dx, dy) = direction.offset(self.config.move_distance);
        for &idx in &self.selected {
            let moved = Position::new(
                self.skills[idx].position.x + dx,
                self.skills[idx].position.y + dy,
            );
            let snapped = Position::new(self.snap_to_grid(moved.x), self.snap_to_grid(moved.y));
            self.skills[idx].position = snapped;
        }
    }

    pub fn snap_all(&mut self) {
        let snapped: Vec<Position> = self
            .skills
            .iter()
            .map(|skill| self.snap(skill.position))
            .collect();
        for (skill, position) in self.skills.iter_mut().zip(snapped) {
            skill.position = position;
        }
    }

    /// Rows in file space; coordinates are truncated like the saved integers.
    pub fn to_rows(&self) -> Vec<SkillRow> {
        self.skills
            .iter()
            .map(|skill| {
                let mut row = skill.row.clone();
                row.x = (skill.position.x * self.config.multiplier) as i64;
                row.y = (skill.position.y * self.config.multiplier) as i64;
                row
            })
            .collect()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        loader::save_rows(path, &self.to_rows())?;
        tracing::info!(path = %path.display(), skills = self.skills.len(), "skill positions saved");
        Ok(())
    }
}
