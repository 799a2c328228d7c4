//! Closed prompt vocabulary.
//!
//! Every accepted spelling maps to exactly one variant; anything else is
//! [`Error::InvalidPromptToken`]. Matching is case-insensitive after trimming.

use std::str::FromStr;

use crate::cutout::DISPLAY_EXTENT;
use crate::geom::Point2D;
use crate::{Error, Result};

/// Field-of-view step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomToken {
    In,
    Out,
    Classify,
}

/// Classification label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelToken {
    Jellyfish,
    Merger,
    NotJellyfish,
    Broken,
}

/// Answer to "save and go next?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
}

const ZOOM_TOKENS: &[(&str, ZoomToken)] = &[
    ("i", ZoomToken::In),
    ("in", ZoomToken::In),
    ("o", ZoomToken::Out),
    ("out", ZoomToken::Out),
    ("c", ZoomToken::Classify),
    ("classify", ZoomToken::Classify),
    ("continue", ZoomToken::Classify),
    ("cont", ZoomToken::Classify),
];

const LABEL_TOKENS: &[(&str, LabelToken)] = &[
    ("j", LabelToken::Jellyfish),
    ("jf", LabelToken::Jellyfish),
    ("jellyfish", LabelToken::Jellyfish),
    ("m", LabelToken::Merger),
    ("merger", LabelToken::Merger),
    ("merge", LabelToken::Merger),
    ("tidal", LabelToken::Merger),
    ("t", LabelToken::Merger),
    ("n", LabelToken::NotJellyfish),
    ("no", LabelToken::NotJellyfish),
    ("b", LabelToken::Broken),
    ("broken", LabelToken::Broken),
    ("skip", LabelToken::Broken),
    ("null", LabelToken::Broken),
];

const CONFIRM_TOKENS: &[(&str, Confirm)] = &[
    ("y", Confirm::Yes),
    ("yes", Confirm::Yes),
    ("s", Confirm::Yes),
    ("si", Confirm::Yes),
    ("n", Confirm::No),
    ("no", Confirm::No),
];

fn lookup<T: Copy>(table: &[(&str, T)], input: &str, step: &'static str) -> Result<T> {
    let key = input.trim().to_lowercase();
    table
        .iter()
        .find(|(token, _)| *token == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| invalid(step, input))
}

fn invalid(step: &'static str, input: &str) -> Error {
    Error::InvalidPromptToken {
        step,
        token: input.trim().to_string(),
    }
}

impl FromStr for ZoomToken {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        lookup(ZOOM_TOKENS, s, "adjusting zoom")
    }
}

impl FromStr for LabelToken {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        lookup(LABEL_TOKENS, s, "awaiting label")
    }
}

impl FromStr for Confirm {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        lookup(CONFIRM_TOKENS, s, "awaiting confirmation")
    }
}

/// Integer tail confidence; range clamping happens in `TailConfidence::clamped`.
pub fn parse_confidence(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid("awaiting confidence", input))
}

/// A typed click `x y` or `x, y` in display coordinates ([-128, 128] on both axes).
pub fn parse_point(input: &str) -> Result<Point2D> {
    let mut parts = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let coord = |s: Option<&str>| s.and_then(|s| s.parse::<f64>().ok());
    let (x, y) = match (coord(parts.next()), coord(parts.next()), parts.next()) {
        (Some(x), Some(y), None) => (x, y),
        _ => return Err(invalid("awaiting tail points", input)),
    };
    let inside = |v: f64| v.is_finite() && v.abs() <= DISPLAY_EXTENT;
    if !inside(x) || !inside(y) {
        return Err(invalid("awaiting tail points", input));
    }
    Ok(Point2D::new(x, y))
}
