use std::fmt;

use serde::Serialize;

use crate::charset::{ CategorySet, CharacterCategory };

const MAX_LENGTH_POINTS: usize = 40;
const CATEGORY_BONUS: usize = 15;
const SHORT_PASSWORD: usize = 8;
const SHORT_PASSWORD_CAP: usize = 40;
const MIN_SCORE: usize = 5;
const MAX_SCORE: usize = 100;

const MEDIUM_THRESHOLD: u8 = 40;
const STRONG_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Medium => "Medium",
            StrengthLabel::Strong => "Strong",
        };
        write!(f, "{}", label)
    }
}

/// Display colour for a strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "&'static str")]
pub enum StrengthColor {
    Warning,
    Caution,
    Success,
}

impl StrengthColor {
    pub fn hex(self) -> &'static str {
        match self {
            StrengthColor::Warning => "#fc8181",
            StrengthColor::Caution => "#fbd38d",
            StrengthColor::Success => "#68d391",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            StrengthColor::Warning => (0xfc, 0x81, 0x81),
            StrengthColor::Caution => (0xfb, 0xd3, 0x8d),
            StrengthColor::Success => (0x68, 0xd3, 0x91),
        }
    }
}

impl From<StrengthColor> for &'static str {
    fn from(color: StrengthColor) -> Self {
        color.hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub label: StrengthLabel,
    pub color: StrengthColor,
}

impl StrengthReport {
    fn from_score(score: u8) -> Self {
        let (label, color) = if score < MEDIUM_THRESHOLD {
            (StrengthLabel::Weak, StrengthColor::Warning)
        } else if score < STRONG_THRESHOLD {
            (StrengthLabel::Medium, StrengthColor::Caution)
        } else {
            (StrengthLabel::Strong, StrengthColor::Success)
        };

        Self { score, label, color }
    }
}

/// Rates a password by length and by how many character categories it uses.
///
/// Passwords shorter than eight characters never score above 40, so they
/// top out at Medium no matter what they contain.
pub fn score(password: &str) -> StrengthReport {
    let length = password.chars().count();
    let present: CategorySet = password.chars().filter_map(CharacterCategory::of).collect();

    let mut score = length.saturating_mul(2).min(MAX_LENGTH_POINTS);
    score += present.len() * CATEGORY_BONUS;

    if length < SHORT_PASSWORD {
        score = score.min(SHORT_PASSWORD_CAP);
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE) as u8;
    StrengthReport::from_score(score)
}
