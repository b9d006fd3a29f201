use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::PathBuf,
};

#[derive(Clone, Copy, Debug, strum::Display, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Expand,
    Collapse,
}

/// identifies one sound effect, e.g. `Expand` or `Collapse 2`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundId {
    pub kind: SoundKind,
    /// variant number; `None` and `Some(0)` both name the unnumbered sound
    pub index: Option<u32>,
}

impl SoundId {
    pub const fn new(kind: SoundKind) -> Self {
        Self { kind, index: None }
    }

    pub fn file_name(self) -> String {
        format!("{self}.mp3")
    }
}

impl Display for SoundId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index.filter(|&index| index != 0) {
            Some(index) => write!(f, "{} {index}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// where sound effects are loaded from
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundSource {
    /// `<host>/public/sounds/<name>.mp3`
    Remote { host: String },
    /// `<dir>/<name>.mp3`
    Local { dir: PathBuf },
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::Remote {
            host: "http://facebook.design".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundLocation {
    Url(String),
    Path(PathBuf),
}

impl Display for SoundLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl SoundSource {
    pub fn locate(&self, sound: SoundId) -> SoundLocation {
        match self {
            Self::Remote { host } => SoundLocation::Url(format!(
                "{}/public/sounds/{}",
                host.trim_end_matches('/'),
                sound.file_name().replace(' ', "%20")
            )),
            Self::Local { dir } => SoundLocation::Path(dir.join(sound.file_name())),
        }
    }

    /// reads the encoded bytes of `sound`, blocking until done
    pub fn fetch(&self, sound: SoundId) -> Result<Vec<u8>> {
        let location = self.locate(sound);

        let bytes = match &location {
            SoundLocation::Url(url) => reqwest::blocking::get(url)
                .and_then(reqwest::blocking::Response::error_for_status)
                .and_then(reqwest::blocking::Response::bytes)
                .map(|bytes| bytes.to_vec()),
            SoundLocation::Path(path) => return fs::read(path).with_context(|| location.clone()),
        };

        bytes.with_context(|| location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(kind: SoundKind, index: u32) -> SoundId {
        SoundId {
            kind,
            index: Some(index),
        }
    }

    #[test]
    fn unnumbered_sounds_have_no_suffix() {
        let expand = SoundId::new(SoundKind::Expand);

        assert_eq!(expand.file_name(), "Expand.mp3");
        assert_eq!(numbered(SoundKind::Expand, 0).file_name(), "Expand.mp3");
        assert_eq!(
            numbered(SoundKind::Collapse, 2).file_name(),
            "Collapse 2.mp3"
        );
    }

    #[test]
    fn remote_urls_escape_the_space() {
        let source = SoundSource::Remote {
            host: "http://localhost:8080/".to_owned(),
        };

        assert_eq!(
            source.locate(numbered(SoundKind::Collapse, 3)),
            SoundLocation::Url("http://localhost:8080/public/sounds/Collapse%203.mp3".to_owned())
        );
        assert_eq!(
            SoundSource::default()
                .locate(SoundId::new(SoundKind::Expand))
                .to_string(),
            "http://facebook.design/public/sounds/Expand.mp3"
        );
    }

    #[test]
    fn local_paths_join_the_file_name() {
        let source = SoundSource::Local {
            dir: PathBuf::from("sounds"),
        };

        assert_eq!(
            source.locate(numbered(SoundKind::Expand, 1)),
            SoundLocation::Path(PathBuf::from("sounds").join("Expand 1.mp3"))
        );
    }

    #[test]
    fn missing_local_files_are_errors() {
        let source = SoundSource::Local {
            dir: std::env::temp_dir().join("gooey-palette-no-such-dir"),
        };

        let err = source.fetch(SoundId::new(SoundKind::Expand)).unwrap_err();
        assert!(err.to_string().ends_with("Expand.mp3"));
    }

    #[test]
    fn sources_round_trip_through_toml() {
        #[derive(Debug, Deserialize, Serialize)]
        struct Wrapper {
            sounds: SoundSource,
        }

        let wrapper: Wrapper = toml::from_str("[sounds.local]\ndir = \"/tmp/sounds\"").unwrap();
        assert_eq!(
            wrapper.sounds,
            SoundSource::Local {
                dir: PathBuf::from("/tmp/sounds")
            }
        );
    }
}
