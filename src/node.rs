use crate::config::NodeGeometry;
use crate::error::{RenderError, ValidationError};
use crate::ir::{Position, SkillRecord, Status};
use crate::scene::{Primitive, TextRun};

const TOP_ANCHOR: f32 = 270.0;
const BOTTOM_ANCHOR: f32 = 90.0;
const HALF_CIRCLE: f32 = 180.0;
const STARS_PER_TIER: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillColors {
    pub color: String,
    pub background_color: String,
    pub locked_color: String,
    pub complete_inner_text_color: String,
    pub incomplete_inner_text_color: String,
    pub unlocked_outer_text_color: String,
    pub locked_outer_text_color: String,
}

/// Attributes of a skill that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub position: Position,
    pub status: Status,
    pub level: u32,
    pub upper_text: String,
    pub lower_text: String,
    pub colors: SkillColors,
}

impl Skill {
    pub fn validate(
        name: &str,
        position: Position,
        record: &SkillRecord,
    ) -> Result<Self, ValidationError> {
        let status: Status = record.status.parse()?;
        if record.level < 0 {
            return Err(ValidationError::NegativeLevel(record.level));
        }
        let level = match status {
            Status::Completed => record.level,
            Status::Locked | Status::Unlocked if record.level > 0 => {
                return Err(ValidationError::LevelRequiresCompletion {
                    status: status.to_string(),
                    level: record.level,
                });
            }
            Status::Locked | Status::Unlocked => 0,
        };
        Ok(Self {
            name: name.to_string(),
            position,
            status,
            level: u32::try_from(level).unwrap_or(u32::MAX),
            upper_text: record.upper_text.clone(),
            lower_text: record.lower_text.clone(),
            colors: SkillColors {
                color: record.color.clone(),
                background_color: record.background_color.clone(),
                locked_color: record.locked_color.clone(),
                complete_inner_text_color: record.complete_inner_text_color.clone(),
                incomplete_inner_text_color: record.incomplete_inner_text_color.clone(),
                unlocked_outer_text_color: record.unlocked_outer_text_color.clone(),
                locked_outer_text_color: record.locked_outer_text_color.clone(),
            },
        })
    }
}

/// Draws a single skill. `initialise` must succeed before `draw` emits anything.
#[derive(Debug)]
pub struct NodeRenderer<'g> {
    name: String,
    position: Position,
    geometry: &'g NodeGeometry,
    skill: Option<Skill>,
}

impl<'g> NodeRenderer<'g> {
    pub fn new(name: &str, position: Position, geometry: &'g NodeGeometry) -> Self {
        Self {
            name: name.to_string(),
            position,
            geometry,
            skill: None,
        }
    }

    pub fn initialise(&mut self, record: &SkillRecord) -> Result<(), ValidationError> {
        self.skill = None;
        self.skill = Some(Skill::validate(&self.name, self.position, record)?);
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.skill.is_some()
    }

    pub fn draw(&self) -> Result<Vec<Primitive>, RenderError> {
        match &self.skill {
            Some(skill) => Ok(draw_skill(skill, self.geometry)),
            None => Err(RenderError::NotInitialised {
                name: self.name.clone(),
            }),
        }
    }
}

pub fn draw_skill(skill: &Skill, geometry: &NodeGeometry) -> Vec<Primitive> {
    let mut out = Vec::new();
    draw_base_shape(skill, geometry, &mut out);
    out.push(center_label(skill, geometry));
    let outer_color = outer_text_color(skill);
    out.extend(
        layout_arc_text(&skill.upper_text, ArcSide::Top, skill.position, geometry)
            .into_iter()
            .map(|glyph| glyph.into_primitive(geometry.outer_text_size, outer_color)),
    );
    out.extend(
        layout_arc_text(&skill.lower_text, ArcSide::Bottom, skill.position, geometry)
            .into_iter()
            .map(|glyph| glyph.into_primitive(geometry.outer_text_size, outer_color)),
    );
    draw_stars(skill, geometry, &mut out);
    out
}

fn draw_base_shape(skill: &Skill, geometry: &NodeGeometry, out: &mut Vec<Primitive>) {
    let colors = &skill.colors;
    let fill = match skill.status {
        Status::Locked => &colors.locked_color,
        Status::Unlocked | Status::Completed => &colors.color,
    };
    out.push(Primitive::circle(skill.position, geometry.outer_radius, fill));
    match skill.status {
        Status::Locked | Status::Unlocked => out.push(Primitive::circle(
            skill.position,
            geometry.inner_radius,
            &colors.background_color,
        )),
        Status::Completed => {}
    }
}

fn center_label(skill: &Skill, geometry: &NodeGeometry) -> Primitive {
    let fill = match skill.status {
        Status::Completed => &skill.colors.complete_inner_text_color,
        Status::Locked | Status::Unlocked => &skill.colors.incomplete_inner_text_color,
    };
    Primitive::Text(TextRun {
        lines: skill.name.split('|').map(str::to_string).collect(),
        x: skill.position.x,
        y: skill.position.y,
        font_size: geometry.inner_text_size,
        line_height: geometry.line_height,
        rotation: None,
        fill: fill.clone(),
    })
}

fn outer_text_color(skill: &Skill) -> &str {
    match skill.status {
        Status::Locked => &skill.colors.locked_outer_text_color,
        Status::Unlocked | Status::Completed => &skill.colors.unlocked_outer_text_color,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSide {
    Top,
    Bottom,
}

impl ArcSide {
    fn anchor(self) -> f32 {
        match self {
            ArcSide::Top => TOP_ANCHOR,
            ArcSide::Bottom => BOTTOM_ANCHOR,
        }
    }
}

/// Angular budget for `count` characters: (total span, step per character), in degrees.
pub fn arc_spacing(count: usize, max_char_angle: f32) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let total = (max_char_angle * count as f32).min(HALF_CIRCLE);
    let step = if count > 1 { total / count as f32 } else { 0.0 };
    (total, step)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcGlyph {
    pub ch: char,
    pub angle: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl ArcGlyph {
    fn into_primitive(self, font_size: f32, fill: &str) -> Primitive {
        Primitive::Text(TextRun {
            lines: vec![self.ch.to_string()],
            x: self.x,
            y: self.y,
            font_size,
            line_height: 1.0,
            rotation: Some(self.rotation),
            fill: fill.to_string(),
        })
    }
}

/// Places one glyph per character around the ring, centered on the side's
/// anchor. Bottom text is laid out reversed so it reads left to right.
pub fn layout_arc_text(
    text: &str,
    side: ArcSide,
    center: Position,
    geometry: &NodeGeometry,
) -> Vec<ArcGlyph> {
    let chars: Vec<char> = match side {
        ArcSide::Top => text.chars().collect(),
        ArcSide::Bottom => text.chars().rev().collect(),
    };
    let (_, step) = arc_spacing(chars.len(), geometry.max_char_angle);
    let start = side.anchor() - step * chars.len().saturating_sub(1) as f32 / 2.0;
    let radius = geometry.text_radius();

    chars
        .into_iter()
        .enumerate()
        .map(|(idx, ch)| {
            let angle = start + idx as f32 * step;
            let rad = angle.to_radians();
            let x = center.x + radius * rad.cos();
            let mut y = center.y + radius * rad.sin();
            let rotation = match side {
                ArcSide::Top => angle + 90.0,
                ArcSide::Bottom => {
                    y += geometry.outer_text_size * geometry.lower_text_nudge;
                    angle - 90.0
                }
            };
            ArcGlyph {
                ch,
                angle,
                x,
                y,
                rotation,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTier {
    Bronze,
    Silver,
    Gold,
}

impl StarTier {
    pub fn color(self, geometry: &NodeGeometry) -> &str {
        match self {
            StarTier::Bronze => &geometry.bronze_color,
            StarTier::Silver => &geometry.silver_color,
            StarTier::Gold => &geometry.gold_color,
        }
    }
}

/// Tier and star count for a level; `None` when no stars are shown.
pub fn star_tier(level: i64, max_level: i64) -> Option<(StarTier, usize)> {
    let level = level.clamp(0, max_level.max(0));
    let (tier, count) = match level {
        0 => return None,
        1..=5 => (StarTier::Bronze, level),
        6..=10 => (StarTier::Silver, level - STARS_PER_TIER),
        _ => (
            StarTier::Gold,
            (level - 2 * STARS_PER_TIER).min(STARS_PER_TIER),
        ),
    };
    Some((tier, count as usize))
}

/// Angles (degrees) of `count` stars fanned symmetrically about the top.
pub fn star_angles(count: usize, separation: f32) -> Vec<f32> {
    let span = count.saturating_sub(1) as f32 * separation;
    let start = TOP_ANCHOR - span / 2.0;
    (0..count).map(|idx| start + idx as f32 * separation).collect()
}

fn draw_stars(skill: &Skill, geometry: &NodeGeometry, out: &mut Vec<Primitive>) {
    let Some((tier, count)) = star_tier(i64::from(skill.level), geometry.max_level) else {
        return;
    };
    let distance = geometry.star_distance();
    let color = tier.color(geometry);
    for angle in star_angles(count, geometry.star_separation) {
        let rad = angle.to_radians();
        let center = Position::new(
            skill.position.x + distance * rad.cos(),
            skill.position.y + distance * rad.sin(),
        );
        out.push(Primitive::circle(center, geometry.star_radius, color));
    }
}
