//! Synthetic EAN-13 rendering for tests, benches and demos

use image::{GrayImage, Luma};

use crate::decoder::ean13::{SYMBOL_MODULES, encode_widths, parse_digits};
use crate::models::Region;

const BAR: u8 = 0;
const SPACE: u8 = 255;

/// One scan line: `quiet` white pixels, the symbol at `module` pixels per
/// module, then `quiet` white pixels. `None` for an invalid digit string.
pub fn ean13_line(digits: &str, module: u32, quiet: u32) -> Option<Vec<u8>> {
    let digits = parse_digits(digits)?;
    let mut line = vec![SPACE; quiet as usize];
    for (i, &w) in encode_widths(&digits).iter().enumerate() {
        let value = if i % 2 == 0 { BAR } else { SPACE };
        line.extend(std::iter::repeat_n(value, (w as u32 * module) as usize));
    }
    line.extend(std::iter::repeat_n(SPACE, quiet as usize));
    Some(line)
}

/// Paint a symbol with its top-left bar corner at `(x, y)`.
///
/// Only the 95-module span is painted; quiet zones come from whatever
/// surrounds it. Returns the painted area, or `None` when the digits are
/// invalid or the symbol does not fit.
pub fn draw_ean13(
    img: &mut GrayImage,
    digits: &str,
    x: u32,
    y: u32,
    module: u32,
    bar_height: u32,
) -> Option<Region> {
    let digits = parse_digits(digits)?;
    let area = Region::new(x, y, SYMBOL_MODULES * module, bar_height);
    if module == 0 || bar_height == 0 || !area.fits_within(img.width(), img.height()) {
        return None;
    }

    let mut cursor = x;
    for (i, &w) in encode_widths(&digits).iter().enumerate() {
        let width = w as u32 * module;
        let value = if i % 2 == 0 { BAR } else { SPACE };
        fill_rect(img, Region::new(cursor, y, width, bar_height), value);
        cursor += width;
    }
    Some(area)
}

/// Fill `region` (clamped to the image) with `value`
pub fn fill_rect(img: &mut GrayImage, region: Region, value: u8) {
    let right = region.right().min(img.width());
    let bottom = region.bottom().min(img.height());
    for py in region.y..bottom {
        for px in region.x..right {
            img.put_pixel(px, py, Luma([value]));
        }
    }
}
