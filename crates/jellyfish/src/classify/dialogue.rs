//! Per-galaxy classification dialogue as an explicit state machine.
//!
//! The driver feeds operator input as [`Event`]s and reacts to the returned
//! [`Step`]: re-fetch on `Zoomed`, show the preview on `Measured`, stop on
//! `Committed`. An invalid token leaves the state untouched.

use super::tokens::{parse_confidence, parse_point, Confirm, LabelToken, ZoomToken};
use super::types::{JellyfishFlag, TailConfidence, TailSegment, Verdict};
use crate::cutout::Zoom;
use crate::geom::{tail_angle, Point2D};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DialogueState {
    AdjustingZoom,
    AwaitingLabel,
    AwaitingConfidence,
    /// `centre` is set once the first click is in.
    AwaitingTailPoints { centre: Option<Point2D> },
    AwaitingConfirmation,
    Committed,
}

/// Operator input.
#[derive(Clone, Copy, Debug)]
pub enum Event<'a> {
    Token(&'a str),
    Click(Point2D),
}

/// Result of one accepted event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Pixel scale changed; the cutout must be fetched again.
    Zoomed(Zoom),
    Advanced,
    /// First tail click stored.
    PointRecorded,
    /// Second tail click stored; preview of the angle that will be recorded.
    Measured { angle: f64 },
    /// Operator declined; back to the label question, zoom kept.
    Restarted,
    Committed(Verdict),
}

#[derive(Clone, Debug)]
pub struct Dialogue {
    declination: f64,
    zoom: Zoom,
    state: DialogueState,
    pending: Verdict,
}

impl Dialogue {
    /// Fresh dialogue for a galaxy at declination `dec` (needed for the angle preview).
    pub fn new(dec: f64) -> Self {
        Self {
            declination: dec,
            zoom: Zoom::default(),
            state: DialogueState::AdjustingZoom,
            pending: Verdict::without_tail(JellyfishFlag::Unclassifiable),
        }
    }

    #[inline]
    pub fn state(&self) -> DialogueState {
        self.state
    }

    #[inline]
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Question to show for the current state.
    pub fn prompt(&self) -> &'static str {
        match self.state {
            DialogueState::AdjustingZoom => {
                "Type 'i' to zoom in, 'o' to zoom out, or 'c' to classify: "
            }
            DialogueState::AwaitingLabel => {
                "Type 'j' for jellyfish, 'm' for merger/tidal, 'n' for nothing, 'b' if blank/broken: "
            }
            DialogueState::AwaitingConfidence => {
                "Are you confident about the tail (0=no tail, 1=marginal, 2=clear tail): "
            }
            DialogueState::AwaitingTailPoints { centre: None } => {
                "Click (x y) the centre of the galaxy: "
            }
            DialogueState::AwaitingTailPoints { centre: Some(_) } => {
                "Click (x y) away from the galaxy along the tail: "
            }
            DialogueState::AwaitingConfirmation => "Save and go next? ",
            DialogueState::Committed => "",
        }
    }

    /// Human-readable description of the pending verdict.
    pub fn summary(&self) -> String {
        match (self.pending.flag, self.pending.tail) {
            (JellyfishFlag::Jellyfish, Some(seg)) if self.pending.confidence.has_tail() => {
                format!(
                    "This is a jellyfish with a tail at {}",
                    tail_angle(seg.centre, seg.tail_end, self.declination)
                )
            }
            (JellyfishFlag::Jellyfish, _) => {
                "This is a jellyfish, but the tail angle cannot be determined".to_string()
            }
            (JellyfishFlag::NotJellyfish, _) => "This is not a jellyfish".to_string(),
            (JellyfishFlag::Merger, _) => "This is a tidal interaction or merger".to_string(),
            (JellyfishFlag::Unclassifiable, _) => {
                "This image cannot be displayed, or the galaxy cannot be classified".to_string()
            }
        }
    }

    pub fn advance(&mut self, event: Event<'_>) -> Result<Step> {
        let step = match self.state {
            DialogueState::Committed => return Err(Error::DialogueClosed),
            DialogueState::AdjustingZoom => {
                match token(event, "adjusting zoom")?.parse::<ZoomToken>()? {
                    ZoomToken::In => {
                        self.zoom = self.zoom.zoom_in();
                        Step::Zoomed(self.zoom)
                    }
                    ZoomToken::Out => {
                        self.zoom = self.zoom.zoom_out();
                        Step::Zoomed(self.zoom)
                    }
                    ZoomToken::Classify => {
                        self.state = DialogueState::AwaitingLabel;
                        Step::Advanced
                    }
                }
            }
            DialogueState::AwaitingLabel => {
                let flag = match token(event, "awaiting label")?.parse::<LabelToken>()? {
                    LabelToken::Jellyfish => JellyfishFlag::Jellyfish,
                    LabelToken::Merger => JellyfishFlag::Merger,
                    LabelToken::NotJellyfish => JellyfishFlag::NotJellyfish,
                    LabelToken::Broken => JellyfishFlag::Unclassifiable,
                };
                self.pending = Verdict::without_tail(flag);
                self.state = if flag == JellyfishFlag::Jellyfish {
                    DialogueState::AwaitingConfidence
                } else {
                    DialogueState::AwaitingConfirmation
                };
                Step::Advanced
            }
            DialogueState::AwaitingConfidence => {
                let raw = parse_confidence(token(event, "awaiting confidence")?)?;
                let confidence = TailConfidence::clamped(raw);
                self.pending.confidence = confidence;
                self.state = if confidence.has_tail() {
                    DialogueState::AwaitingTailPoints { centre: None }
                } else {
                    DialogueState::AwaitingConfirmation
                };
                Step::Advanced
            }
            DialogueState::AwaitingTailPoints { centre } => {
                let point = match event {
                    Event::Click(p) => p,
                    Event::Token(text) => parse_point(text)?,
                };
                match centre {
                    None => {
                        self.state = DialogueState::AwaitingTailPoints {
                            centre: Some(point),
                        };
                        Step::PointRecorded
                    }
                    Some(centre) => {
                        self.pending.tail = Some(TailSegment {
                            centre,
                            tail_end: point,
                        });
                        self.state = DialogueState::AwaitingConfirmation;
                        Step::Measured {
                            angle: tail_angle(centre, point, self.declination),
                        }
                    }
                }
            }
            DialogueState::AwaitingConfirmation => {
                match token(event, "awaiting confirmation")?.parse::<Confirm>()? {
                    Confirm::Yes => {
                        self.state = DialogueState::Committed;
                        Step::Committed(self.pending)
                    }
                    Confirm::No => {
                        self.pending = Verdict::without_tail(JellyfishFlag::Unclassifiable);
                        self.state = DialogueState::AwaitingLabel;
                        Step::Restarted
                    }
                }
            }
        };
        tracing::debug!(state = ?self.state, step = ?step, "dialogue");
        Ok(step)
    }
}

fn token<'a>(event: Event<'a>, step: &'static str) -> Result<&'a str> {
    match event {
        Event::Token(text) => Ok(text),
        Event::Click(p) => Err(Error::InvalidPromptToken {
            step,
            token: format!("click at ({}, {})", p.x, p.y),
        }),
    }
}
