//! Stroke and background colors.
//!
//! Colors arrive from the swatch selector and the background picker as CSS
//! strings. Accepted forms: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`,
//! `rgb(r, g, b)` and `rgba(r, g, b, a)` with `a` in `0.0..=1.0`.

use crate::error::SurfaceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use winnow::ascii::{digit1, float, multispace0};
use winnow::combinator::{alt, delimited};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| v * 17);
        let long = |i: usize| Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?);

        match bytes.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as lowercase hex, `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color
            .parse(s)
            .map_err(|_| SurfaceError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn parse_color(input: &mut &str) -> ModalResult<Color> {
    delimited(
        multispace0,
        alt((parse_hex_color, parse_rgb_function)),
        multispace0,
    )
    .parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
}

fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let has_alpha = alt(("rgba".value(true), "rgb".value(false))).parse_next(input)?;
    let _ = (multispace0, '(', multispace0).parse_next(input)?;
    let r = parse_channel.parse_next(input)?;
    parse_separator.parse_next(input)?;
    let g = parse_channel.parse_next(input)?;
    parse_separator.parse_next(input)?;
    let b = parse_channel.parse_next(input)?;
    let a = if has_alpha {
        parse_separator.parse_next(input)?;
        parse_alpha.parse_next(input)?
    } else {
        255
    };
    let _ = (multispace0, ')').parse_next(input)?;
    Ok(Color::rgba(r, g, b, a))
}

fn parse_channel(input: &mut &str) -> ModalResult<u8> {
    digit1.try_map(str::parse::<u8>).parse_next(input)
}

fn parse_alpha(input: &mut &str) -> ModalResult<u8> {
    let alpha: f32 = float.parse_next(input)?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok((alpha * 255.0).round() as u8)
}

fn parse_separator(input: &mut &str) -> ModalResult<()> {
    (multispace0, ',', multispace0).void().parse_next(input)
}
