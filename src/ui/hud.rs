//! HUD components and systems (score, accuracy, power, clock)

use bevy::prelude::*;

use crate::constants::*;
use crate::countdown::GameClock;
use crate::input::PlayerInput;
use crate::scoring::Score;
use crate::simulation::GameSim;

/// Score and accuracy line
#[derive(Component)]
pub struct ScoreText;

/// Shot power line
#[derive(Component)]
pub struct PowerText;

/// Game clock
#[derive(Component)]
pub struct ClockText;

pub fn score_line(score: &Score) -> String {
    format!(
        "Points: {}  |  Made: {}/{}  |  Accuracy: {}",
        score.points,
        score.made,
        score.attempts,
        score.accuracy_label()
    )
}

pub fn power_line(power: f32) -> String {
    format!("Power: {:.0}%  (W/S)", power * 100.0)
}

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(score_line(&Score::default())),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                ScoreText,
            ));
            parent.spawn((
                Text::new(power_line(DEFAULT_SHOT_POWER)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_ACCENT),
                PowerText,
            ));
        });

    commands.spawn((
        Text::new(GameClock::default().label()),
        TextFont {
            font_size: 32.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(10.0),
            ..default()
        },
        ClockText,
    ));
}

/// Refresh HUD text when its sources change
pub fn update_hud(
    sim: Res<GameSim>,
    input: Res<PlayerInput>,
    clock: Res<GameClock>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<PowerText>, Without<ClockText>)>,
    mut power_text: Query<&mut Text, (With<PowerText>, Without<ScoreText>, Without<ClockText>)>,
    mut clock_text: Query<&mut Text, (With<ClockText>, Without<ScoreText>, Without<PowerText>)>,
) {
    if sim.is_changed()
        && let Ok(mut text) = score_text.single_mut()
    {
        text.0 = score_line(&sim.score);
    }
    if input.is_changed()
        && let Ok(mut text) = power_text.single_mut()
    {
        text.0 = power_line(input.shot_power);
    }
    if clock.is_changed()
        && let Ok(mut text) = clock_text.single_mut()
    {
        text.0 = clock.label();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_lines() {
        let mut score = Score::default();
        score.record_attempt();
        score.record_attempt();
        score.record_make();
        assert_eq!(score_line(&score), "Points: 2  |  Made: 1/2  |  Accuracy: 50.0%");
        assert_eq!(power_line(0.55), "Power: 55%  (W/S)");
    }
}
