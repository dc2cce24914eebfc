use super::*;
use chat::timeline::{StepKey, initialize};

#[test]
fn glyphs_differ_per_status() {
    let glyphs = [StepStatus::Pending, StepStatus::Running, StepStatus::Done, StepStatus::Error].map(status_glyph);
    for (i, a) in glyphs.iter().enumerate() {
        for b in &glyphs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn status_class_carries_modifier() {
    assert!(status_class(StepStatus::Error).ends_with("thinking__step--error"));
}

#[test]
fn duration_is_blank_before_start() {
    let steps = initialize(1_000);
    assert_eq!(step_duration(&steps[1], 5_000), "");
}

#[test]
fn running_duration_follows_ticker() {
    let steps = initialize(1_000);
    assert_eq!(step_duration(&steps[0], 1_400), "400ms");
    assert_eq!(step_duration(&steps[0], 3_100), "2.1s");
}

#[test]
fn finished_duration_is_fixed() {
    let steps = timeline::advance(&initialize(0), StepKey::Exec, 250);
    assert_eq!(step_duration(&steps[0], 99_999), "250ms");
}
