use super::*;
use crate::cutout::Zoom;
use crate::geom::{Point2D, SkyPosition};
use crate::Error;
use nalgebra::vector;

fn feed(d: &mut Dialogue, tokens: &[&str]) -> Vec<Step> {
    tokens
        .iter()
        .map(|t| d.advance(Event::Token(t)).expect("token accepted"))
        .collect()
}

fn committed(steps: &[Step]) -> Verdict {
    match steps.last() {
        Some(Step::Committed(v)) => *v,
        other => panic!("expected commit, got {other:?}"),
    }
}

#[test]
fn zoom_loop_then_jellyfish_with_tail() {
    let mut d = Dialogue::new(0.0);
    let steps = feed(&mut d, &["i", "i", "o", "c", "j", "2", "0 0", "10 10"]);
    assert_eq!(steps[0], Step::Zoomed(Zoom::default().zoom_in()));
    assert_eq!(d.zoom().pixscale(), 0.125);
    assert_eq!(steps.last(), Some(&Step::Measured { angle: 45.0 }));
    assert_eq!(d.state(), DialogueState::AwaitingConfirmation);
    assert!(d.summary().contains("tail at 45"));

    let v = committed(&feed(&mut d, &["yes"]));
    assert_eq!(v.flag, JellyfishFlag::Jellyfish);
    assert_eq!(v.confidence, TailConfidence::Clear);
    let seg = v.tail.expect("tail recorded");
    assert_eq!(seg.centre, vector![0.0, 0.0]);
    assert_eq!(seg.tail_end, vector![10.0, 10.0]);
    assert_eq!(d.state(), DialogueState::Committed);
}

#[test]
fn clicks_are_accepted_as_events() {
    let mut d = Dialogue::new(0.0);
    feed(&mut d, &["c", "jellyfish", "1"]);
    assert_eq!(
        d.advance(Event::Click(vector![0.0, 0.0])).unwrap(),
        Step::PointRecorded
    );
    assert_eq!(
        d.advance(Event::Click(vector![0.0, -5.0])).unwrap(),
        Step::Measured { angle: -90.0 }
    );
}

#[test]
fn no_at_confirmation_returns_to_label_not_zoom() {
    let mut d = Dialogue::new(10.0);
    feed(&mut d, &["o", "c", "m"]);
    assert_eq!(d.state(), DialogueState::AwaitingConfirmation);
    assert_eq!(feed(&mut d, &["no"]), vec![Step::Restarted]);
    assert_eq!(d.state(), DialogueState::AwaitingLabel);
    assert_eq!(d.zoom().pixscale(), 0.5);
    let v = committed(&feed(&mut d, &["n", "y"]));
    assert_eq!(v, Verdict::without_tail(JellyfishFlag::NotJellyfish));
}

#[test]
fn restart_clears_earlier_tail() {
    let mut d = Dialogue::new(0.0);
    feed(&mut d, &["c", "j", "2", "0 0", "5 0", "n", "j", "0"]);
    assert_eq!(d.state(), DialogueState::AwaitingConfirmation);
    let v = committed(&feed(&mut d, &["s"]));
    assert_eq!(v.confidence, TailConfidence::NoTail);
    assert!(v.tail.is_none());
}

#[test]
fn confidence_is_clamped() {
    let mut d = Dialogue::new(0.0);
    feed(&mut d, &["c", "j", "7"]);
    assert_eq!(
        d.state(),
        DialogueState::AwaitingTailPoints { centre: None }
    );
    let mut d = Dialogue::new(0.0);
    feed(&mut d, &["c", "j", "-4"]);
    assert_eq!(d.state(), DialogueState::AwaitingConfirmation);
    let v = committed(&feed(&mut d, &["y"]));
    assert_eq!(v.confidence, TailConfidence::NoTail);
}

#[test]
fn invalid_token_keeps_state() {
    let mut d = Dialogue::new(0.0);
    let err = d.advance(Event::Token("zoom please")).unwrap_err();
    assert!(matches!(err, Error::InvalidPromptToken { .. }));
    assert_eq!(d.state(), DialogueState::AdjustingZoom);

    feed(&mut d, &["c"]);
    assert!(d.advance(Event::Click(vector![1.0, 1.0])).is_err());
    assert_eq!(d.state(), DialogueState::AwaitingLabel);

    feed(&mut d, &["j"]);
    assert!(d.advance(Event::Token("lots")).is_err());
    assert_eq!(d.state(), DialogueState::AwaitingConfidence);

    feed(&mut d, &["2"]);
    assert!(d.advance(Event::Token("500 0")).is_err());
    assert_eq!(d.state(), DialogueState::AwaitingTailPoints { centre: None });

    feed(&mut d, &["1 1", "2 2"]);
    assert!(d.advance(Event::Token("perhaps")).is_err());
    assert_eq!(d.state(), DialogueState::AwaitingConfirmation);
}

#[test]
fn committed_dialogue_rejects_events() {
    let mut d = Dialogue::new(0.0);
    feed(&mut d, &["c", "b", "y"]);
    assert!(matches!(
        d.advance(Event::Token("c")),
        Err(Error::DialogueClosed)
    ));
}

#[test]
fn result_from_verdict_applies_cos_dec() {
    let v = Verdict {
        flag: JellyfishFlag::Jellyfish,
        confidence: TailConfidence::Marginal,
        tail: Some(TailSegment {
            centre: Point2D::new(0.0, 0.0),
            tail_end: Point2D::new(10.0, 5.0),
        }),
    };
    let r = ClassificationResult::from_verdict(&v, 60.0);
    assert_eq!(r.tail_angle(), 45.0);
    assert!(r.has_measured_tail());
}

#[test]
fn result_from_non_jellyfish_verdict_is_zeroed() {
    let v = Verdict {
        flag: JellyfishFlag::Merger,
        confidence: TailConfidence::Clear,
        tail: Some(TailSegment {
            centre: Point2D::new(0.0, 0.0),
            tail_end: Point2D::new(0.0, 5.0),
        }),
    };
    let r = ClassificationResult::from_verdict(&v, 0.0);
    assert_eq!(r.confidence(), TailConfidence::NoTail);
    assert_eq!(r.tail_angle(), 0.0);
    assert!(!r.has_measured_tail());
}

#[test]
fn flag_and_confidence_codes() {
    for flag in [
        JellyfishFlag::Jellyfish,
        JellyfishFlag::NotJellyfish,
        JellyfishFlag::Merger,
        JellyfishFlag::Unclassifiable,
    ] {
        assert_eq!(JellyfishFlag::from_code(flag.code() as i64), Some(flag));
    }
    assert_eq!(JellyfishFlag::from_code(3), None);
    assert_eq!(TailConfidence::clamped(i64::MAX), TailConfidence::Clear);
    assert_eq!(TailConfidence::clamped(i64::MIN), TailConfidence::NoTail);
    assert_eq!(TailConfidence::clamped(1).code(), 1);
}

#[test]
fn batch_preserves_order_and_length() {
    let positions: Vec<SkyPosition> = [(10.0, 0.0), (20.0, 60.0), (30.0, -10.0)]
        .iter()
        .map(|&(r, d)| SkyPosition::new(r, d).unwrap())
        .collect();
    let mut seen = Vec::new();
    let mut classifier = |i: usize, p: &SkyPosition| -> crate::Result<Verdict> {
        seen.push((i, p.ra()));
        Ok(match i {
            1 => Verdict {
                flag: JellyfishFlag::Jellyfish,
                confidence: TailConfidence::Clear,
                tail: Some(TailSegment {
                    centre: Point2D::new(0.0, 0.0),
                    tail_end: Point2D::new(10.0, 5.0),
                }),
            },
            2 => Verdict::without_tail(JellyfishFlag::Merger),
            _ => Verdict::without_tail(JellyfishFlag::NotJellyfish),
        })
    };
    let results = classify_batch(&positions, &mut classifier).unwrap();
    assert_eq!(seen, vec![(0, 10.0), (1, 20.0), (2, 30.0)]);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].flag(), JellyfishFlag::NotJellyfish);
    // dec = 60° halves Δx: (10, 5) → 45°.
    assert_eq!(results[1].tail_angle(), 45.0);
    assert_eq!(results[2].flag(), JellyfishFlag::Merger);
}

#[test]
fn column_length_mismatch_fails_before_any_work() {
    let ra = [1.0, 2.0, 3.0, 4.0, 5.0];
    let dec = [0.0, 0.0, 0.0, 0.0];
    let mut calls = 0usize;
    let mut classifier = |_: usize, _: &SkyPosition| -> crate::Result<Verdict> {
        calls += 1;
        Ok(Verdict::without_tail(JellyfishFlag::NotJellyfish))
    };
    let err = classify_columns(&ra, &dec, &mut classifier).unwrap_err();
    assert!(matches!(err, Error::LengthMismatch { ra: 5, dec: 4 }));
    assert_eq!(calls, 0);
}

#[test]
fn invalid_declination_fails_before_any_work() {
    let mut calls = 0usize;
    let mut classifier = |_: usize, _: &SkyPosition| -> crate::Result<Verdict> {
        calls += 1;
        Ok(Verdict::without_tail(JellyfishFlag::NotJellyfish))
    };
    let err = classify_columns(&[1.0, 2.0], &[0.0, 95.0], &mut classifier).unwrap_err();
    assert!(matches!(err, Error::InvalidPosition { .. }));
    assert_eq!(calls, 0);
}

#[test]
fn collaborator_error_aborts_batch() {
    let mut classifier = |i: usize, _: &SkyPosition| -> crate::Result<Verdict> {
        if i == 1 {
            Err(Error::Aborted("end of input".into()))
        } else {
            Ok(Verdict::without_tail(JellyfishFlag::NotJellyfish))
        }
    };
    let err = classify_columns(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], &mut classifier).unwrap_err();
    assert!(matches!(err, Error::Aborted(_)));
}

#[test]
fn accumulator_appends_in_order() {
    let mut acc = Accumulator::default();
    assert!(acc.is_empty());
    let p = SkyPosition::new(0.0, 0.0).unwrap();
    acc.push(&p, &Verdict::without_tail(JellyfishFlag::Merger));
    acc.push(&p, &Verdict::without_tail(JellyfishFlag::Unclassifiable));
    assert_eq!(acc.len(), 2);
    let out = acc.into_results();
    assert_eq!(out[1].flag(), JellyfishFlag::Unclassifiable);
}
