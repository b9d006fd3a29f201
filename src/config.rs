use crate::gooey_back::{Rgb, SoundSource, DEFAULT_LEFT, DEFAULT_RIGHT};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs::{create_dir_all, read_to_string, write},
    io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

pub static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    dirs::config_dir()
        .or_else(|| {
            warn!("can't find the system's config dir!");
            None
        })
        .map(|path| path.join("gooey_palette.toml"))
});

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// starting fill of the left dot
    pub left: Rgb,
    /// starting fill of the right dot
    pub right: Rgb,
    /// never open an audio device
    pub muted: bool,
    /// gain applied to every sound effect
    pub volume: f32,
    pub sounds: SoundSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT,
            right: DEFAULT_RIGHT,
            muted: false,
            volume: 1.0,
            sounds: SoundSource::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn read() -> Self {
        let Some(config_path) = &*CONFIG_PATH else {
            return Self::default();
        };

        let config = read_to_string(config_path);
        let read = Self::parse(config.as_deref().unwrap_or_default());

        if config.is_err_and(|e| e.kind() == io::ErrorKind::NotFound) {
            read.write_to(config_path);
        }

        read
    }

    fn parse(config: &str) -> Self {
        toml::from_str::<Self>(config)
            .unwrap_or_else(|err| {
                warn!("ignoring invalid config: {err}");
                Self::default()
            })
            .with_valid_volume()
    }

    /// keeps `volume` within `0..=1`, falling back to the default when it isn't a number
    fn with_valid_volume(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.volume) {
            let volume = if self.volume.is_finite() {
                self.volume.clamp(0.0, 1.0)
            } else {
                Self::default().volume
            };

            warn!("volume {} is out of range, using {volume}", self.volume);
            self.volume = volume;
        }

        self
    }

    fn write_to(&self, path: &Path) {
        let written = toml::to_string(self)
            .map_err(io::Error::other)
            .and_then(|config| {
                if let Some(parent) = path.parent() {
                    create_dir_all(parent)?;
                }
                write(path, config)
            });

        match written {
            Ok(()) => info!("wrote default config to {}", path.display()),
            Err(err) => warn!("couldn't write {}: {err}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::parse(""), Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = Config::parse("left = \"#00ff00\"\nmuted = true");

        assert_eq!(config.left, Rgb::new(0, 255, 0));
        assert_eq!(config.right, DEFAULT_RIGHT);
        assert!(config.muted);
        assert!((config.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_config_falls_back_to_default() {
        assert_eq!(Config::parse("left = \"#nothex\""), Config::default());
        assert_eq!(Config::parse("volume = ["), Config::default());
    }

    #[test]
    fn volume_is_kept_in_range() {
        assert!(Config::parse("volume = -0.5").volume.abs() < f32::EPSILON);
        assert!((Config::parse("volume = 4.0").volume - 1.0).abs() < f32::EPSILON);
        assert!((Config::parse("volume = 0.25").volume - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_that_is_not_a_number_is_default() {
        assert!((Config::parse("volume = nan").volume - 1.0).abs() < f32::EPSILON);
        assert!((Config::parse("volume = -inf").volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn written_config_reads_back() {
        let path = std::env::temp_dir()
            .join(format!("gooey-palette-{}", std::process::id()))
            .join("gooey_palette.toml");

        let config = Config {
            sounds: SoundSource::Local {
                dir: PathBuf::from("/tmp/sounds"),
            },
            volume: 0.5,
            ..Config::default()
        };
        config.write_to(&path);

        let read = Config::parse(&read_to_string(&path).unwrap());
        assert_eq!(read, config);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
