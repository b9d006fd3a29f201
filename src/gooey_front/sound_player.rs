use crate::gooey_back::{Playback, SoundId};
use std::rc::Rc;

/// plays a sound whenever the sound it's told to follow changes
#[derive(Debug)]
pub struct SoundPlayer {
    playback: Rc<dyn Playback>,
    last: Option<SoundId>,
}

impl SoundPlayer {
    pub fn new(playback: Rc<dyn Playback>) -> Self {
        Self {
            playback,
            last: None,
        }
    }

    /// the first call only records `sound`; later calls play it if it differs from the last one
    ///
    /// returns whether anything was played
    pub fn sync(&mut self, sound: SoundId) -> bool {
        let changed = self.last.is_some_and(|last| last != sound);
        self.last = Some(sound);

        if changed {
            self.playback.play(sound);
        }

        changed
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::gooey_back::SoundKind;
    use std::cell::RefCell;

    /// remembers every sound it was asked to play
    #[derive(Debug, Default)]
    pub struct Recorder(pub RefCell<Vec<SoundId>>);

    impl Playback for Recorder {
        fn play(&self, sound: SoundId) {
            self.0.borrow_mut().push(sound);
        }
    }

    const EXPAND: SoundId = SoundId::new(SoundKind::Expand);
    const COLLAPSE: SoundId = SoundId::new(SoundKind::Collapse);

    #[test]
    fn first_sync_is_silent() {
        let recorder = Rc::new(Recorder::default());
        let mut player = SoundPlayer::new(recorder.clone());

        assert!(!player.sync(COLLAPSE));
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn repeated_sounds_play_once() {
        let recorder = Rc::new(Recorder::default());
        let mut player = SoundPlayer::new(recorder.clone());

        player.sync(COLLAPSE);
        assert!(player.sync(EXPAND));
        assert!(!player.sync(EXPAND));
        assert!(!player.sync(EXPAND));
        assert!(player.sync(COLLAPSE));

        assert_eq!(*recorder.0.borrow(), [EXPAND, COLLAPSE]);
    }

    #[test]
    fn variants_count_as_different_sounds() {
        let recorder = Rc::new(Recorder::default());
        let mut player = SoundPlayer::new(recorder.clone());

        let variant = SoundId {
            index: Some(2),
            ..EXPAND
        };

        player.sync(EXPAND);
        assert!(player.sync(variant));

        assert_eq!(*recorder.0.borrow(), [variant]);
    }
}
