//! # Barcode Renderer
//!
//! Code 93 barcodes for voucher codes, rendered as PNG.
//!
//! ## Symbol Layout
//! ```text
//! ┌────────┬───────┬──────────────────┬───┬───┬───────┬──────┬────────┐
//! │ quiet  │ start │ data symbols     │ C │ K │ stop  │ term │ quiet  │
//! │ 10 mod │   *   │ 9 modules each   │   │   │   *   │  1   │ 10 mod │
//! └────────┴───────┴──────────────────┴───┴───┴───────┴──────┴────────┘
//! ```
//!
//! Full-ASCII mode: characters outside the 43 native symbols are written as
//! a shift symbol (`($)`, `(%)`, `(/)` or `(+)`) followed by a letter, so
//! `a` becomes `(+)A`. Generated voucher codes only use `0-9A-V` and never
//! need a shift.
//!
//! The symbol is scaled to a fixed 360×60 image with an integer module
//! width and centered horizontally.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use thiserror::Error;

/// Output image width in pixels.
pub const WIDTH: u32 = 360;

/// Output image height in pixels.
pub const HEIGHT: u32 = 60;

/// Light modules on each side of the symbol.
const QUIET_ZONE: usize = 10;

/// Native symbol set, indexed by symbol value.
const NATIVE: &[u8; 43] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

const SHIFT_DOLLAR: u8 = 43;
const SHIFT_PERCENT: u8 = 44;
const SHIFT_SLASH: u8 = 45;
const SHIFT_PLUS: u8 = 46;

/// Bar patterns for symbol values 0..=46, nine modules each, MSB first.
const PATTERNS: [u16; 47] = [
    0b100010100, 0b101001000, 0b101000100, 0b101000010, 0b100101000, // 0-4
    0b100100100, 0b100100010, 0b101010000, 0b100010010, 0b100001010, // 5-9
    0b110101000, 0b110100100, 0b110100010, 0b110010100, 0b110010010, // A-E
    0b110001010, 0b101101000, 0b101100100, 0b101100010, 0b100110100, // F-J
    0b100011010, 0b101011000, 0b101001100, 0b101000110, 0b100101100, // K-O
    0b100010110, 0b110110100, 0b110110010, 0b110101100, 0b110100110, // P-T
    0b110010110, 0b110011010, 0b101101100, 0b101100110, 0b100110110, // U-Y
    0b100111010, 0b100101110, 0b111010100, 0b111010010, 0b111001010, // Z - . space $
    0b101101110, 0b101110110, 0b110101110, 0b100100110, 0b111011010, // / + % ($) (%)
    0b111010110, 0b100110010, // (/) (+)
];

/// Start and stop character `*`.
const START_STOP: u16 = 0b101011110;

const MODULES_PER_SYMBOL: usize = 9;

/// Barcode rendering failures. None of these is fatal to the server.
#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error("character {0:?} cannot be encoded in Code 93")]
    UnsupportedCharacter(char),

    #[error("barcode needs {modules} modules, which does not fit in {width} pixels")]
    TooWide { modules: usize, width: u32 },

    #[error("failed to encode barcode png: {0}")]
    Encode(#[from] image::ImageError),
}

/// Renders `content` as a 360×60 Code 93 PNG.
pub fn render_png(content: &str) -> Result<Vec<u8>, BarcodeError> {
    let image = rasterize(&encode(content)?)?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes `content` into dark (`true`) and light modules, without quiet zones.
pub fn encode(content: &str) -> Result<Vec<bool>, BarcodeError> {
    let mut values = Vec::with_capacity(content.len() + 2);
    for c in content.chars() {
        push_symbols(c, &mut values)?;
    }

    let c_check = checksum(&values, 20);
    values.push(c_check);
    let k_check = checksum(&values, 15);
    values.push(k_check);

    let mut modules = Vec::with_capacity((values.len() + 2) * MODULES_PER_SYMBOL + 1);
    push_pattern(START_STOP, &mut modules);
    for value in values {
        push_pattern(PATTERNS[usize::from(value)], &mut modules);
    }
    push_pattern(START_STOP, &mut modules);
    modules.push(true);

    Ok(modules)
}

fn rasterize(modules: &[bool]) -> Result<GrayImage, BarcodeError> {
    let total = modules.len() + 2 * QUIET_ZONE;
    let module_width = WIDTH as usize / total;
    if module_width == 0 {
        return Err(BarcodeError::TooWide {
            modules: total,
            width: WIDTH,
        });
    }
    let offset = (WIDTH as usize - total * module_width) / 2;

    Ok(GrayImage::from_fn(WIDTH, HEIGHT, |x, _| {
        let dark = (x as usize)
            .checked_sub(offset)
            .map(|px| px / module_width)
            .and_then(|m| m.checked_sub(QUIET_ZONE))
            .and_then(|i| modules.get(i).copied())
            .unwrap_or(false);
        Luma([if dark { 0 } else { 255 }])
    }))
}

fn push_pattern(pattern: u16, modules: &mut Vec<bool>) {
    for bit in (0..MODULES_PER_SYMBOL).rev() {
        modules.push(pattern & (1 << bit) != 0);
    }
}

/// Weighted modulo-47 check value; weights run 1..=max_weight from the right.
fn checksum(values: &[u8], max_weight: usize) -> u8 {
    let sum: usize = values
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &v)| (i % max_weight + 1) * usize::from(v))
        .sum();
    (sum % 47) as u8
}

fn native_value(byte: u8) -> Option<u8> {
    NATIVE.iter().position(|&n| n == byte).map(|i| i as u8)
}

/// Appends the symbol values for one character in full-ASCII mode.
fn push_symbols(c: char, values: &mut Vec<u8>) -> Result<(), BarcodeError> {
    if !c.is_ascii() {
        return Err(BarcodeError::UnsupportedCharacter(c));
    }
    let byte = c as u8;

    if let Some(value) = native_value(byte) {
        values.push(value);
        return Ok(());
    }

    let (shift, letter) = match byte {
        0 => (SHIFT_PERCENT, b'U'),
        1..=26 => (SHIFT_DOLLAR, b'A' + byte - 1),
        27..=31 => (SHIFT_PERCENT, b'A' + byte - 27),
        b'!'..=b',' => (SHIFT_SLASH, b'A' + byte - b'!'),
        b':' => (SHIFT_SLASH, b'Z'),
        b';'..=b'?' => (SHIFT_PERCENT, b'F' + byte - b';'),
        b'@' => (SHIFT_PERCENT, b'V'),
        b'['..=b'_' => (SHIFT_PERCENT, b'K' + byte - b'['),
        b'`' => (SHIFT_PERCENT, b'W'),
        b'a'..=b'z' => (SHIFT_PLUS, byte.to_ascii_uppercase()),
        b'{'..=b'~' => (SHIFT_PERCENT, b'P' + byte - b'{'),
        127 => (SHIFT_PERCENT, b'T'),
        _ => return Err(BarcodeError::UnsupportedCharacter(c)),
    };

    values.push(shift);
    values.push(native_value(letter).ok_or(BarcodeError::UnsupportedCharacter(c))?);
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
