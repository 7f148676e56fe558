//! Shot feedback banner ("SWISH!", "SHOT MADE!", "MISSED SHOT")

use bevy::prelude::*;

use crate::constants::*;
use crate::events::GameEvent;

/// Banner text entity
#[derive(Component)]
pub struct FeedbackText;

/// Currently displayed banner, cleared when its timer runs out
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct FeedbackBanner {
    pub message: Option<&'static str>,
    pub color: Color,
    pub timer: f32,
}

impl FeedbackBanner {
    /// Show the banner for a shot outcome event; other events are ignored
    pub fn show_for(&mut self, event: &GameEvent) -> bool {
        let (message, color) = match event {
            GameEvent::Scored { swish: true, .. } => ("SWISH!", TEXT_MADE),
            GameEvent::Scored { swish: false, .. } => ("SHOT MADE!", TEXT_MADE),
            GameEvent::Missed { .. } => ("MISSED SHOT", TEXT_MISSED),
            _ => return false,
        };
        self.message = Some(message);
        self.color = color;
        self.timer = FEEDBACK_DURATION;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.message.is_none() {
            return;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.message = None;
            self.timer = 0.0;
        }
    }
}

pub fn spawn_feedback_text(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 56.0,
            ..default()
        },
        TextColor(TEXT_MADE),
        TextLayout::new_with_justify(bevy::text::Justify::Center),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(18.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Visibility::Hidden,
        FeedbackText,
    ));
}

/// Count down the banner and mirror it onto the text entity
pub fn update_feedback_banner(
    time: Res<Time>,
    mut banner: ResMut<FeedbackBanner>,
    mut text_query: Query<(&mut Text, &mut TextColor, &mut Visibility), With<FeedbackText>>,
) {
    banner.tick(time.delta_secs());

    let Ok((mut text, mut color, mut visibility)) = text_query.single_mut() else {
        return;
    };
    match banner.message {
        Some(message) => {
            if text.0 != message {
                text.0 = message.to_string();
            }
            // Fade out over the last half second
            let alpha = (banner.timer / 0.5).clamp(0.0, 1.0);
            *color = TextColor(banner.color.with_alpha(alpha));
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    #[test]
    fn test_banner_messages() {
        let mut banner = FeedbackBanner::default();
        let swish = GameEvent::Scored {
            hoop: Basket::Right,
            swish: true,
            made: 1,
            attempts: 1,
            points: 2,
        };
        assert!(banner.show_for(&swish));
        assert_eq!(banner.message, Some("SWISH!"));

        assert!(banner.show_for(&GameEvent::Missed {
            hoop: Basket::Left,
            distance: 0.6
        }));
        assert_eq!(banner.message, Some("MISSED SHOT"));

        assert!(!banner.show_for(&GameEvent::Reset));
        assert_eq!(banner.message, Some("MISSED SHOT"));
    }

    #[test]
    fn test_banner_expires() {
        let mut banner = FeedbackBanner::default();
        banner.show_for(&GameEvent::Scored {
            hoop: Basket::Right,
            swish: false,
            made: 1,
            attempts: 2,
            points: 2,
        });
        assert_eq!(banner.message, Some("SHOT MADE!"));
        banner.tick(FEEDBACK_DURATION / 2.0);
        assert!(banner.message.is_some());
        banner.tick(FEEDBACK_DURATION);
        assert_eq!(banner.message, None);
    }
}
