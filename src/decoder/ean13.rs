//! EAN-13 symbol decoding over run lengths of one scan line.
//!
//! Layout: start guard (3 runs), six left digits (4 runs each, L or G
//! parity), centre guard (5), six right digits (R), end guard (3). The
//! leading digit is implied by the L/G parity of the left half.

use crate::models::{Symbology, SymbologySet};

/// Runs in one symbol, guards included
pub const SYMBOL_RUNS: usize = 59;
/// Modules in one symbol, guards included
pub const SYMBOL_MODULES: u32 = 95;

const QUIET_ZONE_MODULES: f32 = 3.0;
const MAX_DIGIT_ERROR: f32 = 1.6;

/// L-code run widths, space first, as read left to right
const L_PATTERNS: [[u8; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// G-code widths are the L-code widths mirrored
const G_PATTERNS: [[u8; 4]; 10] = [
    [1, 1, 2, 3],
    [1, 2, 2, 2],
    [2, 2, 1, 2],
    [1, 1, 4, 1],
    [2, 3, 1, 1],
    [1, 3, 2, 1],
    [4, 1, 1, 1],
    [2, 1, 3, 1],
    [3, 1, 2, 1],
    [2, 1, 1, 3],
];

/// R-code widths match the L-code widths with colours swapped (bar first)
const R_PATTERNS: [[u8; 4]; 10] = L_PATTERNS;

/// Per leading digit, bit `k` set when left digit `k` uses G parity
const PARITY_MASKS: [u8; 10] = [
    0b000000, 0b110100, 0b101100, 0b011100, 0b110010, 0b100110, 0b001110, 0b101010, 0b011010,
    0b010110,
];

/// Same-colour span of a binarized scan line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Below the line threshold
    pub dark: bool,
    /// First pixel along the line
    pub start: u32,
    /// Length in pixels
    pub len: u32,
}

/// One successful decode on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHit {
    /// Decoded digits, check digit last
    pub digits: [u8; 13],
    /// First pixel of the start guard along the line
    pub start: u32,
    /// Last pixel of the end guard along the line
    pub end: u32,
}

/// Decode every EAN-13 symbol readable left-to-right in `runs`.
///
/// The ends of the line count as quiet zones, so a symbol cropped tight to
/// its guards still decodes.
pub fn decode_runs(runs: &[Run]) -> Vec<LineHit> {
    let mut hits = Vec::new();
    let mut i = 0;
    while i + SYMBOL_RUNS <= runs.len() {
        if runs[i].dark {
            if let Some(hit) = decode_at(runs, i) {
                hits.push(hit);
                i += SYMBOL_RUNS;
                continue;
            }
        }
        i += 1;
    }
    hits
}

/// Try a symbol whose start guard begins at run `i`; runs `i - 1` and
/// `i + SYMBOL_RUNS` are the surrounding quiet zones when they exist
fn decode_at(runs: &[Run], i: usize) -> Option<LineHit> {
    let symbol = &runs[i..i + SYMBOL_RUNS];
    let total: u32 = symbol.iter().map(|r| r.len).sum();
    if total < SYMBOL_MODULES {
        return None;
    }
    let module = total as f32 / SYMBOL_MODULES as f32;

    let min_quiet = QUIET_ZONE_MODULES * module;
    let quiet = |run: Option<&Run>| run.is_none_or(|r| r.len as f32 >= min_quiet);
    let leading = i.checked_sub(1).and_then(|k| runs.get(k));
    if !quiet(leading) || !quiet(runs.get(i + SYMBOL_RUNS)) {
        return None;
    }

    if !is_guard(&symbol[0..3], module)
        || !is_guard(&symbol[27..32], module)
        || !is_guard(&symbol[56..59], module)
    {
        return None;
    }

    let mut digits = [0u8; 13];
    let mut parity = 0u8;
    for k in 0..6 {
        let chunk = &symbol[3 + 4 * k..7 + 4 * k];
        let (l_digit, l_err) = match_digit(chunk, &L_PATTERNS, module)?;
        let (g_digit, g_err) = match_digit(chunk, &G_PATTERNS, module)?;
        let (digit, err, is_g) = if l_err <= g_err {
            (l_digit, l_err, false)
        } else {
            (g_digit, g_err, true)
        };
        if err > MAX_DIGIT_ERROR {
            return None;
        }
        digits[1 + k] = digit;
        if is_g {
            parity |= 1 << k;
        }
    }

    for k in 0..6 {
        let chunk = &symbol[32 + 4 * k..36 + 4 * k];
        let (digit, err) = match_digit(chunk, &R_PATTERNS, module)?;
        if err > MAX_DIGIT_ERROR {
            return None;
        }
        digits[7 + k] = digit;
    }

    digits[0] = PARITY_MASKS.iter().position(|&m| m == parity)? as u8;
    if check_digit(&digits[..12]) != digits[12] {
        return None;
    }

    let first = symbol[0];
    let last = symbol[SYMBOL_RUNS - 1];
    let start = first.start.min(last.start);
    let end = (first.start + first.len).max(last.start + last.len) - 1;
    Some(LineHit { digits, start, end })
}

fn is_guard(runs: &[Run], module: f32) -> bool {
    runs.iter().all(|r| {
        let ratio = r.len as f32 / module;
        (0.4..=2.0).contains(&ratio)
    })
}

/// Best matching digit and its summed width error in module units
fn match_digit(chunk: &[Run], patterns: &[[u8; 4]; 10], module: f32) -> Option<(u8, f32)> {
    let sum: u32 = chunk.iter().map(|r| r.len).sum();
    let ratio = sum as f32 / (7.0 * module);
    if !(0.6..=1.5).contains(&ratio) {
        return None;
    }
    let unit = sum as f32 / 7.0;

    let mut best = (0u8, f32::INFINITY);
    for (digit, pattern) in patterns.iter().enumerate() {
        let err: f32 = chunk
            .iter()
            .zip(pattern)
            .map(|(r, &p)| (r.len as f32 / unit - p as f32).abs())
            .sum();
        if err < best.1 {
            best = (digit as u8, err);
        }
    }
    Some(best)
}

/// EAN check digit over the first twelve digits
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Parse a 13-digit string, or a 12-digit one with the check digit appended
pub fn parse_digits(text: &str) -> Option<[u8; 13]> {
    let bytes = text.as_bytes();
    if !(bytes.len() == 12 || bytes.len() == 13) || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut digits = [0u8; 13];
    for (slot, b) in digits.iter_mut().zip(bytes) {
        *slot = b - b'0';
    }
    let check = check_digit(&digits);
    if bytes.len() == 12 {
        digits[12] = check;
    } else if digits[12] != check {
        return None;
    }
    Some(digits)
}

/// Run widths in modules of the full symbol, starting with the first bar
pub fn encode_widths(digits: &[u8; 13]) -> Vec<u8> {
    let mut widths = Vec::with_capacity(SYMBOL_RUNS);
    widths.extend([1, 1, 1]);
    let mask = PARITY_MASKS[digits[0] as usize];
    for k in 0..6 {
        let d = digits[1 + k] as usize;
        let pattern = if mask & (1 << k) != 0 {
            G_PATTERNS[d]
        } else {
            L_PATTERNS[d]
        };
        widths.extend(pattern);
    }
    widths.extend([1, 1, 1, 1, 1]);
    for k in 0..6 {
        widths.extend(R_PATTERNS[digits[7 + k] as usize]);
    }
    widths.extend([1, 1, 1]);
    widths
}

/// Assign a decoded symbol to the highest-priority enabled family.
///
/// Bookland codes prefer ISBN-13, then ISBN-10 (978 only); anything else
/// is plain EAN-13. Returns `None` when the matching family is disabled.
pub fn classify(digits: &[u8; 13], enabled: SymbologySet) -> Option<(Symbology, String)> {
    let bookland = digits[0] == 9 && digits[1] == 7 && (digits[2] == 8 || digits[2] == 9);
    let text = |ds: &[u8]| ds.iter().map(|d| (b'0' + d) as char).collect::<String>();

    if bookland && enabled.contains(Symbology::Isbn13) {
        return Some((Symbology::Isbn13, text(&digits[..])));
    }
    if bookland && digits[2] == 8 && enabled.contains(Symbology::Isbn10) {
        let mut isbn = text(&digits[3..12]);
        isbn.push(isbn10_check(&digits[3..12]));
        return Some((Symbology::Isbn10, isbn));
    }
    if enabled.contains(Symbology::Ean13) {
        return Some((Symbology::Ean13, text(&digits[..])));
    }
    None
}

fn isbn10_check(body: &[u8]) -> char {
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, &d)| (10 - i as u32) * d as u32)
        .sum();
    match (11 - sum % 11) % 11 {
        10 => 'X',
        c => (b'0' + c as u8) as char,
    }
}
