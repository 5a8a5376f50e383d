use super::Region;
use crate::error::{Result, ScanError};

/// Borrowed single-channel 8-bit image.
///
/// A view may cover a sub-rectangle of a larger buffer; rows are then
/// `stride` bytes apart in the backing slice and pixel `(0, 0)` of the view
/// starts at `offset`.
#[derive(Debug, Clone, Copy)]
pub struct GrayView<'a> {
    data: &'a [u8],
    stride: usize,
    offset: usize,
    width: u32,
    height: u32,
}

impl<'a> GrayView<'a> {
    /// Wrap a tightly packed `width * height` grayscale buffer
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let needed = width as usize * height as usize;
        if data.len() < needed {
            return Err(ScanError::BufferSize {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            data,
            stride: width as usize,
            offset: 0,
            width,
            height,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at (x, y) in view coordinates
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.data[self.offset + y as usize * self.stride + x as usize]
    }

    /// Row `y` as a slice of the backing buffer
    pub fn row(&self, y: u32) -> &'a [u8] {
        let start = self.offset + y as usize * self.stride;
        &self.data[start..start + self.width as usize]
    }

    /// Copy column `x` into `out`, replacing its contents
    pub fn column_into(&self, x: u32, out: &mut Vec<u8>) {
        out.clear();
        out.extend((0..self.height).map(|y| self.get(x, y)));
    }

    /// View of `region` (in this view's coordinates) sharing the same memory.
    ///
    /// The region is clamped to the view bounds.
    pub fn sub_view(&self, region: Region) -> GrayView<'a> {
        let x = region.x.min(self.width);
        let y = region.y.min(self.height);
        let width = region.width.min(self.width - x);
        let height = region.height.min(self.height - y);
        GrayView {
            data: self.data,
            stride: self.stride,
            offset: self.offset + y as usize * self.stride + x as usize,
            width,
            height,
        }
    }

    /// Copy the view into a tightly packed buffer
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}

impl<'a> From<&'a image::GrayImage> for GrayView<'a> {
    fn from(img: &'a image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        GrayView {
            data: img.as_raw(),
            stride: width as usize,
            offset: 0,
            width,
            height,
        }
    }
}
