use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
    #[error("expected 3 or 6 hex digits, found {0}")]
    InvalidLength(usize),
}

/// an opaque 8-bit sRGB color, written as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// accepts `#rgb` and `#rrggbb`, with or without the leading `#`
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if digits.is_empty() {
            return Err(ParseColorError::Empty);
        }

        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }

        // every char is an ascii hex digit from here on, so byte slicing is fine
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ParseColorError::Empty);

        match digits.len() {
            3 => {
                let [r, g, b] = [0, 1, 2].map(|i| channel(&digits[i..=i]).map(|c| c * 17));
                Ok(Self::new(r?, g?, b?))
            }
            6 => {
                let [r, g, b] = [0, 2, 4].map(|i| channel(&digits[i..i + 2]));
                Ok(Self::new(r?, g?, b?))
            }
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }

    fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }

    fn from_channels([r, g, b]: [f32; 3]) -> Self {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// hue in degrees, in `0.0..360.0`
    pub h: f32,
    /// saturation, in `0.0..=1.0`
    pub s: f32,
    /// lightness, in `0.0..=1.0`
    pub l: f32,
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let [r, g, b] = rgb.channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let delta = max - min;

        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        Self { h: hue(r, g, b, max, delta), s, l }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let chroma = (1.0 - 2.0f32.mul_add(hsl.l, -1.0).abs()) * hsl.s;
        let m = hsl.l - chroma / 2.0;
        Self::from_channels(sector(hsl.h, chroma).map(|c| c + m))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// hue in degrees, in `0.0..360.0`
    pub h: f32,
    /// saturation, in `0.0..=1.0`
    pub s: f32,
    /// value, in `0.0..=1.0`
    pub v: f32,
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        let [r, g, b] = rgb.channels();
        let max = r.max(g).max(b);
        let delta = max - r.min(g).min(b);

        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, v: max };
        }

        Self {
            h: hue(r, g, b, max, delta),
            s: delta / max,
            v: max,
        }
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        let chroma = hsv.v * hsv.s;
        let m = hsv.v - chroma;
        Self::from_channels(sector(hsv.h, chroma).map(|c| c + m))
    }
}

fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h * 60.0).rem_euclid(360.0)
}

/// the hue-dependent part of the hsl/hsv to rgb conversion, before adding the lightness offset
fn sector(h: f32, chroma: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

    match h as u8 {
        0 => [chroma, x, 0.0],
        1 => [x, chroma, 0.0],
        2 => [0.0, chroma, x],
        3 => [0.0, x, chroma],
        4 => [x, 0.0, chroma],
        _ => [chroma, 0.0, x],
    }
}

/// blends `color` with `other`, `weight` being the share of `color`
///
/// channels are floored, so `mix(0.5, #00ff00, #4a90e2)` is `#25c771`
pub fn mix(weight: f32, color: Rgb, other: Rgb) -> Rgb {
    let weight = weight.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| {
        f32::from(a)
            .mul_add(weight, f32::from(b) * (1.0 - weight))
            .floor() as u8
    };

    Rgb::new(
        channel(color.r, other.r),
        channel(color.g, other.g),
        channel(color.b, other.b),
    )
}

pub fn lighten(amount: f32, color: Rgb) -> Rgb {
    let hsl = Hsl::from(color);
    Hsl {
        l: (hsl.l + amount).clamp(0.0, 1.0),
        ..hsl
    }
    .into()
}

pub fn darken(amount: f32, color: Rgb) -> Rgb {
    lighten(-amount, color)
}

pub fn grayscale(color: Rgb) -> Rgb {
    Hsl {
        s: 0.0,
        ..Hsl::from(color)
    }
    .into()
}
