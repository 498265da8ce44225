//! UI domain: player HUD with health, knives, web status and anchor readout.

use bevy::prelude::*;

use crate::core::config::{GameConfig, asset_exists};
use crate::core::resources::SimMode;
use crate::session::{HudValues, Session};

pub(crate) const HEALTHBAR_WIDTH: f32 = 320.0;
pub(crate) const HEALTHBAR_HEIGHT: f32 = 18.0;
pub(crate) const RECHARGE_WIDTH: f32 = 180.0;
pub(crate) const HUD_PADDING: f32 = 20.0;

/// F1 toggles the whole HUD.
#[derive(Resource, Debug)]
pub struct HudState {
    pub visible: bool,
    /// False when the font file is missing; text lines stay hidden
    pub has_font: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            visible: true,
            has_font: true,
        }
    }
}

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HealthBarFill;

#[derive(Component)]
pub struct RechargeBar;

#[derive(Component)]
pub struct RechargeBarFill;

/// Which line of text a HUD entity shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudLine {
    Health,
    Knives,
    Web,
    WebDetail,
    WebHint,
    Anchor,
    Score,
}

impl HudLine {
    pub const ALL: [HudLine; 7] = [
        HudLine::Health,
        HudLine::Knives,
        HudLine::Web,
        HudLine::WebDetail,
        HudLine::WebHint,
        HudLine::Anchor,
        HudLine::Score,
    ];

    /// Text for this line, or `None` when the line is hidden.
    pub fn text(self, hud: &HudValues) -> Option<String> {
        match self {
            HudLine::Health => Some(format!("HP: {:.0}%", hud.hp_percent * 100.0)),
            HudLine::Knives => Some(if hud.unlimited_ammo {
                "Knives: \u{221e}".to_string()
            } else {
                format!("Knives: {} / {}", hud.rounds, hud.clip)
            }),
            HudLine::Web => {
                let gravity = if hud.moon_gravity { "  (moon)" } else { "" };
                Some(format!("Web: {}{}", hud.web_state, gravity))
            }
            HudLine::WebDetail => hud
                .tension
                .zip(hud.web_len)
                .map(|(tension, len)| format!("Len {:.0}  Tension {:.1}", len, tension)),
            HudLine::WebHint => hud
                .tension
                .map(|_| "[E/Q] reel  [Shift] pump  [Wheel] fine-reel".to_string()),
            HudLine::Anchor => Some(format!(
                "WebAnchor u={:.2} v={:.2}  (J/L, I/K)",
                hud.anchor_uv.x, hud.anchor_uv.y
            )),
            HudLine::Score => Some(format!("Score: {}", hud.score)),
        }
    }
}

pub(crate) fn health_color(percent: f32) -> Color {
    if percent > 0.5 {
        let t = (percent - 0.5) * 2.0;
        Color::srgb(0.9 - t * 0.7, 0.85, 0.3 * (1.0 - t) + 0.35 * t)
    } else {
        let t = percent * 2.0;
        Color::srgb(0.9, 0.2 + t * 0.65, 0.2)
    }
}

pub(crate) fn spawn_hud(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut state: ResMut<HudState>,
) {
    state.has_font = asset_exists(&config.assets.font);
    let font = if state.has_font {
        asset_server.load(config.assets.font.clone())
    } else {
        warn!("HUD font assets/{} not found; HUD text disabled", config.assets.font);
        Handle::default()
    };
    let text_font = TextFont {
        font,
        font_size: 18.0,
        ..default()
    };

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(HEALTHBAR_WIDTH),
                        height: Val::Px(HEALTHBAR_HEIGHT),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.24, 0.24, 0.24, 0.86)),
                    BorderColor::all(Color::WHITE),
                ))
                .with_child((
                    HealthBarFill,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(health_color(1.0)),
                ));

            for line in HudLine::ALL {
                parent.spawn((
                    line,
                    Text::new(""),
                    text_font.clone(),
                    TextColor(Color::WHITE),
                ));
                if line == HudLine::Knives {
                    parent
                        .spawn((
                            RechargeBar,
                            Node {
                                width: Val::Px(RECHARGE_WIDTH),
                                height: Val::Px(10.0),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgba(0.24, 0.24, 0.24, 0.8)),
                            BorderColor::all(Color::WHITE),
                            Visibility::Hidden,
                        ))
                        .with_child((
                            RechargeBarFill,
                            Node {
                                width: Val::Percent(0.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(1.0, 0.78, 0.31)),
                        ));
                }
            }
        });
}

pub(crate) fn toggle_hud(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<HudState>,
    mut roots: Query<&mut Visibility, With<HudRoot>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        state.visible = !state.visible;
    }
    for mut visibility in &mut roots {
        *visibility = if state.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn update_hud(
    session: Res<Session>,
    mode: Res<SimMode>,
    state: Res<HudState>,
    time: Res<Time<Real>>,
    mut health_fill: Query<
        (&mut Node, &mut BackgroundColor),
        (With<HealthBarFill>, Without<RechargeBarFill>),
    >,
    mut recharge_bar: Query<&mut Visibility, (With<RechargeBar>, Without<HudLine>)>,
    mut recharge_fill: Query<&mut Node, (With<RechargeBarFill>, Without<HealthBarFill>)>,
    mut lines: Query<(&HudLine, &mut Text, &mut Visibility), Without<RechargeBar>>,
) {
    let now = time.elapsed().as_millis() as u64;
    let hud = session.hud(*mode, now);

    for (mut node, mut color) in &mut health_fill {
        node.width = Val::Percent(hud.hp_percent * 100.0);
        color.0 = health_color(hud.hp_percent);
    }

    for mut visibility in &mut recharge_bar {
        *visibility = if hud.recharge.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut node in &mut recharge_fill {
        node.width = Val::Percent(hud.recharge.unwrap_or(0.0) * 100.0);
    }

    for (line, mut text, mut visibility) in &mut lines {
        match line.text(&hud).filter(|_| state.has_font) {
            Some(value) => {
                **text = value;
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
