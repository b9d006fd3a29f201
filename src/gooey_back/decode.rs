use anyhow::{anyhow, bail, Result};
use itertools::iproduct;
use rubato::{
    Resampler as _, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};
use std::io::Cursor;
use symphonia::core::{
    audio::SampleBuffer,
    codecs::DecoderOptions,
    errors::Error,
    formats::FormatOptions,
    io::{MediaSourceStream, MediaSourceStreamOptions},
    meta::MetadataOptions,
    probe::Hint,
};

/// decodes an encoded sound into interleaved samples with the output's rate and channel count
pub fn decode(bytes: Vec<u8>, sample_rate: u32, channels: usize) -> Result<Box<[f32]>> {
    let mut hint = Hint::new();
    hint.with_extension("mp3");

    let mut format = symphonia::default::get_probe()
        .format(
            &hint,
            MediaSourceStream::new(Box::new(Cursor::new(bytes)), MediaSourceStreamOptions::default()),
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?
        .format;

    let track = format
        .default_track()
        .ok_or_else(|| anyhow!("no playable track"))?;
    let track_id = track.id;
    let source_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| anyhow!("unknown sample rate"))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    // one plane per source channel
    let mut planes = Vec::<Vec<f32>>::new();
    let mut sample_buffer = None;

    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(audio_buf) => {
                let spec = *audio_buf.spec();
                let source_channels = spec.channels.count();
                let capacity = audio_buf.capacity() as u64;

                let buf = sample_buffer.get_or_insert_with(|| SampleBuffer::<f32>::new(capacity, spec));
                buf.copy_interleaved_ref(audio_buf);

                if planes.len() != source_channels {
                    planes.resize_with(source_channels, Vec::new);
                }

                for frame in buf.samples().chunks_exact(source_channels) {
                    planes
                        .iter_mut()
                        .zip(frame)
                        .for_each(|(plane, sample)| plane.push(*sample));
                }
            }
            Err(Error::DecodeError(_)) => (),
            Err(_) => break,
        }
    }

    if planes.first().is_none_or(Vec::is_empty) {
        bail!("no samples decoded");
    }

    let planes = if source_rate == sample_rate {
        planes
    } else {
        resample(&planes, source_rate, sample_rate)?
    };

    Ok(interleave(&planes, channels))
}

fn resample(planes: &[Vec<f32>], from: u32, to: u32) -> Result<Vec<Vec<f32>>> {
    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(to) / f64::from(from),
        2.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 128,
            window: WindowFunction::Blackman,
        },
        planes[0].len(),
        planes.len(),
    )?;

    Ok(resampler.process(planes, None)?)
}

/// interleaves `planes` into `channels` output channels, repeating the last plane when the source
/// has fewer channels than the output and dropping extra planes when it has more
fn interleave(planes: &[Vec<f32>], channels: usize) -> Box<[f32]> {
    let last = planes.len() - 1;
    let frames = planes.iter().map(Vec::len).min().unwrap_or_default();

    iproduct!(0..frames, 0..channels)
        .map(|(frame, channel)| planes[channel.min(last)][frame])
        .collect()
}
