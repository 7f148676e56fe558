//! Sound cues mapped from game events
//!
//! The `.ogg` files under `assets/sounds/` are supplied separately; missing
//! files only produce an asset load warning.

use bevy::prelude::*;

use crate::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Shot,
    Rim,
    Backboard,
    Bounce,
    Swish,
    Made,
    Miss,
}

impl SoundCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotRelease { .. } => Some(SoundCue::Shot),
            GameEvent::RimTouch { .. } => Some(SoundCue::Rim),
            GameEvent::BackboardTouch { .. } => Some(SoundCue::Backboard),
            GameEvent::Bounce { .. } => Some(SoundCue::Bounce),
            GameEvent::Scored { swish: true, .. } => Some(SoundCue::Swish),
            GameEvent::Scored { swish: false, .. } => Some(SoundCue::Made),
            GameEvent::Missed { .. } => Some(SoundCue::Miss),
            _ => None,
        }
    }

    pub fn asset_path(self) -> &'static str {
        match self {
            SoundCue::Shot => "sounds/shot.ogg",
            SoundCue::Rim => "sounds/rim.ogg",
            SoundCue::Backboard => "sounds/backboard.ogg",
            SoundCue::Bounce => "sounds/bounce.ogg",
            SoundCue::Swish => "sounds/swish.ogg",
            SoundCue::Made => "sounds/made.ogg",
            SoundCue::Miss => "sounds/miss.ogg",
        }
    }
}

#[derive(Resource)]
pub struct SoundAssets {
    pub shot: Handle<AudioSource>,
    pub rim: Handle<AudioSource>,
    pub backboard: Handle<AudioSource>,
    pub bounce: Handle<AudioSource>,
    pub swish: Handle<AudioSource>,
    pub made: Handle<AudioSource>,
    pub miss: Handle<AudioSource>,
}

impl SoundAssets {
    pub fn handle(&self, cue: SoundCue) -> &Handle<AudioSource> {
        match cue {
            SoundCue::Shot => &self.shot,
            SoundCue::Rim => &self.rim,
            SoundCue::Backboard => &self.backboard,
            SoundCue::Bounce => &self.bounce,
            SoundCue::Swish => &self.swish,
            SoundCue::Made => &self.made,
            SoundCue::Miss => &self.miss,
        }
    }
}

pub fn load_sound_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundAssets {
        shot: asset_server.load(SoundCue::Shot.asset_path()),
        rim: asset_server.load(SoundCue::Rim.asset_path()),
        backboard: asset_server.load(SoundCue::Backboard.asset_path()),
        bounce: asset_server.load(SoundCue::Bounce.asset_path()),
        swish: asset_server.load(SoundCue::Swish.asset_path()),
        made: asset_server.load(SoundCue::Made.asset_path()),
        miss: asset_server.load(SoundCue::Miss.asset_path()),
    });
}

pub fn play_cue(commands: &mut Commands, sounds: &SoundAssets, cue: SoundCue) {
    commands.spawn((AudioPlayer::new(sounds.handle(cue).clone()), PlaybackSettings::DESPAWN));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Basket;

    #[test]
    fn test_cue_mapping() {
        assert_eq!(SoundCue::for_event(&GameEvent::RimTouch { hoop: Basket::Left }), Some(SoundCue::Rim));
        assert_eq!(SoundCue::for_event(&GameEvent::Bounce { speed: 3.0 }), Some(SoundCue::Bounce));
        assert_eq!(SoundCue::for_event(&GameEvent::PowerChange { power: 0.4 }), None);
        assert_eq!(SoundCue::for_event(&GameEvent::Settled { scored: true }), None);
    }
}
