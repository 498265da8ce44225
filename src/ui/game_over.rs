//! UI domain: knock-out overlay shown while the session is over.

use bevy::prelude::*;

use crate::session::Session;

/// Marker for the game-over overlay
#[derive(Component)]
pub struct GameOverUI;

pub(crate) fn sync_game_over_screen(
    mut commands: Commands,
    session: Res<Session>,
    screens: Query<Entity, With<GameOverUI>>,
) {
    match (session.game_over, screens.is_empty()) {
        (true, true) => spawn_game_over_screen(&mut commands),
        (false, false) => {
            for entity in &screens {
                commands.entity(entity).despawn();
            }
        }
        _ => {}
    }
}

fn spawn_game_over_screen(commands: &mut Commands) {
    commands
        .spawn((
            GameOverUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.63)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Knocked Out"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.31, 0.31)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press [R] to Restart   |   [Esc] to Exit"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}
