use crate::gooey_back::{decode, LiveSound, SoundId, SoundSource};
use anyhow::{anyhow, Result};
use async_channel::Sender;
use cpal::{
    traits::{DeviceTrait as _, HostTrait as _, StreamTrait as _},
    Stream, StreamConfig,
};
use log::{debug, info, warn};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    sync::{Arc, Mutex, PoisonError},
    thread,
};

/// something that can play sound effects
pub trait Playback: Debug {
    /// starts playing `sound` without waiting for it to finish; failures are not reported
    fn play(&self, sound: SoundId);
}

#[derive(Debug)]
enum Slot {
    /// the sound is being fetched and decoded; `play` is set when it was requested meanwhile
    Loading { play: bool },
    Ready(Arc<[f32]>),
}

type Cache = Arc<Mutex<HashMap<SoundId, Slot>>>;

struct Output {
    /// keeps the stream alive
    _stream: Stream,
    sender: Sender<LiveSound>,
    sample_rate: u32,
    channels: usize,
}

/// the single place sound effects are played from
///
/// without an output device every request is silently dropped
pub struct AudioRoot {
    output: Option<Output>,
    source: SoundSource,
    gain: f32,
    cache: Cache,
}

impl Debug for AudioRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioRoot")
            .field("source", &self.source)
            .field("gain", &self.gain)
            .field("playing", &self.output.is_some())
            .finish_non_exhaustive()
    }
}

impl AudioRoot {
    pub fn new(source: SoundSource, gain: f32) -> Self {
        let output = build_output_stream()
            .inspect_err(|err| warn!("sound effects disabled: {err:#}"))
            .ok();

        Self {
            output,
            source,
            gain,
            cache: Cache::default(),
        }
    }

    /// an audio root that never opens an output device
    pub fn muted(source: SoundSource) -> Self {
        Self {
            output: None,
            source,
            gain: 0.0,
            cache: Cache::default(),
        }
    }

    /// starts fetching and decoding `sound` so a later [`Playback::play`] starts immediately
    pub fn preload(&self, sound: SoundId) {
        self.request(sound, false);
    }

    fn request(&self, sound: SoundId, play: bool) {
        let Some(output) = &self.output else {
            return;
        };

        {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

            match cache.get_mut(&sound) {
                Some(Slot::Ready(audio)) => {
                    if play {
                        send(&output.sender, audio.clone(), self.gain);
                    }
                    return;
                }
                Some(Slot::Loading { play: pending }) => {
                    *pending |= play;
                    return;
                }
                None => {
                    cache.insert(sound, Slot::Loading { play });
                }
            }
        }

        let source = self.source.clone();
        let sender = output.sender.clone();
        let (sample_rate, channels, gain) = (output.sample_rate, output.channels, self.gain);
        let mut load = Load::new(self.cache.clone(), sound);

        thread::spawn(move || {
            let loaded = source
                .fetch(sound)
                .and_then(|bytes| decode(bytes, sample_rate, channels));

            load.finish(loaded, &sender, gain);
        });
    }
}

/// a sound being loaded on a worker thread
///
/// unless it finishes with a decoded sound, dropping it forgets the slot, so
/// neither a failed nor a panicked load blocks later requests for the sound
struct Load {
    cache: Cache,
    sound: SoundId,
    ready: bool,
}

impl Load {
    fn new(cache: Cache, sound: SoundId) -> Self {
        Self {
            cache,
            sound,
            ready: false,
        }
    }

    fn finish(&mut self, loaded: Result<Box<[f32]>>, sender: &Sender<LiveSound>, gain: f32) {
        let audio = match loaded {
            Ok(audio) => Arc::<[f32]>::from(audio),
            Err(err) => {
                warn!("couldn't load {}: {err:#}", self.sound);
                return;
            }
        };
        debug!("loaded {}", self.sound);

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        if matches!(cache.get(&self.sound), Some(Slot::Loading { play: true })) {
            send(sender, audio.clone(), gain);
        }

        cache.insert(self.sound, Slot::Ready(audio));
        self.ready = true;
    }
}

impl Drop for Load {
    fn drop(&mut self) {
        if !self.ready {
            self.cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.sound);
        }
    }
}

impl Playback for AudioRoot {
    fn play(&self, sound: SoundId) {
        self.request(sound, true);
    }
}

fn send(sender: &Sender<LiveSound>, audio: Arc<[f32]>, gain: f32) {
    if let Err(err) = sender.try_send(LiveSound::new(audio, gain)) {
        warn!("couldn't start a sound: {err}");
    }
}

fn build_output_stream() -> Result<Output> {
    let device = cpal::default_host()
        .default_output_device()
        .ok_or_else(|| anyhow!("no output device"))?;
    let config: StreamConfig = device.default_output_config()?.into();

    info!(
        "playing sound effects at {} Hz on {} channels",
        config.sample_rate.0, config.channels
    );

    let (sender, receiver) = async_channel::unbounded::<LiveSound>();
    let mut live = Vec::new();

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _| {
            data.fill(0.0);

            while let Ok(sound) = receiver.try_recv() {
                live.push(sound);
            }

            live.iter_mut().for_each(|sound| sound.fill_buf(data));
            live.retain(|sound| !sound.over());
        },
        |err| warn!("{err}"),
        None,
    )?;
    stream.play()?;

    Ok(Output {
        _stream: stream,
        sender,
        sample_rate: config.sample_rate.0,
        channels: usize::from(config.channels),
    })
}
