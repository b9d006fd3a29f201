mod audio_root;
pub use audio_root::{AudioRoot, Playback};

pub mod color;
pub use color::Rgb;

mod decode;
use decode::decode;

mod live_sound;
use live_sound::LiveSound;

mod palette_state;
pub use palette_state::{DotId, PaletteState, Phase, DEFAULT_LEFT, DEFAULT_RIGHT};

mod sound;
pub use sound::{SoundId, SoundKind, SoundSource};

pub mod spring;
pub use spring::{Spring, SpringConfig};
