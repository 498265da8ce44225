//! UI domain: tests for HUD text.

use bevy::prelude::Vec2;

use super::HudLine;
use crate::session::HudValues;

fn values() -> HudValues {
    HudValues {
        hp: 94.0,
        max_hp: 100.0,
        hp_percent: 0.94,
        rounds: 2,
        clip: 3,
        unlimited_ammo: false,
        recharge: Some(0.25),
        moon_gravity: false,
        web_state: "None",
        web_len: None,
        tension: None,
        score: 4,
        anchor_uv: Vec2::new(0.78, 0.33),
    }
}

#[test]
fn test_basic_lines() {
    let hud = values();
    assert_eq!(HudLine::Health.text(&hud).unwrap(), "HP: 94%");
    assert_eq!(HudLine::Knives.text(&hud).unwrap(), "Knives: 2 / 3");
    assert_eq!(HudLine::Web.text(&hud).unwrap(), "Web: None");
    assert_eq!(HudLine::Score.text(&hud).unwrap(), "Score: 4");
    assert_eq!(
        HudLine::Anchor.text(&hud).unwrap(),
        "WebAnchor u=0.78 v=0.33  (J/L, I/K)"
    );
}

#[test]
fn test_web_detail_only_while_latched() {
    let mut hud = values();
    assert!(HudLine::WebDetail.text(&hud).is_none());
    assert!(HudLine::WebHint.text(&hud).is_none());

    hud.web_state = "Latched";
    hud.web_len = Some(432.6);
    hud.tension = Some(1.26);
    assert_eq!(HudLine::WebDetail.text(&hud).unwrap(), "Len 433  Tension 1.3");
    assert!(HudLine::WebHint.text(&hud).is_some());
}

#[test]
fn test_unlimited_knives_and_moon_marker() {
    let mut hud = values();
    hud.unlimited_ammo = true;
    hud.moon_gravity = true;
    assert_eq!(HudLine::Knives.text(&hud).unwrap(), "Knives: \u{221e}");
    assert_eq!(HudLine::Web.text(&hud).unwrap(), "Web: None  (moon)");
}
