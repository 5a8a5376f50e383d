/// Connected component labelling over a binary image.
/// Yields foreground blobs and the background holes they enclose, each
/// reduced to a bounding rectangle, in raster order of their first pixel.
use crate::models::{BitMatrix, Region};

/// Union-Find data structure; label 0 is reserved for "unlabelled"
pub struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    /// Empty forest with label 0 reserved for background
    pub fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// Allocate a fresh singleton label
    pub fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Number of labels handed out, background included
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Root of `x`, halving paths on the way
    pub fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merge two sets, keeping the smaller root label
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x < root_y {
            self.parent[root_y as usize] = root_x;
        } else if root_y < root_x {
            self.parent[root_x as usize] = root_y;
        }
    }
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a component is ink or a hole inside ink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Pixels below the threshold, 8-connected
    Foreground,
    /// Background enclosed by foreground, 4-connected
    Hole,
}

/// One connected region of a binary image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Ink or enclosed hole
    pub kind: ComponentKind,
    /// Bounding rectangle
    pub bounds: Region,
    /// Pixels in the component
    pub pixel_count: usize,
    /// Raster index of the first pixel met while scanning
    pub first_pixel: usize,
    touches_border: bool,
}

/// Foreground components (8-connected) interleaved with enclosed holes
/// (4-connected background not touching the border), in raster order.
pub fn find_components(matrix: &BitMatrix) -> Vec<Component> {
    let foreground = label_components(matrix, true);
    let holes: Vec<Component> = label_components(matrix, false)
        .into_iter()
        .filter(|c| !c.touches_border)
        .collect();

    let mut merged = Vec::with_capacity(foreground.len() + holes.len());
    let mut fg = foreground.into_iter().peekable();
    let mut bg = holes.into_iter().peekable();
    loop {
        let take_fg = match (fg.peek(), bg.peek()) {
            (Some(a), Some(b)) => a.first_pixel < b.first_pixel,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_fg { fg.next() } else { bg.next() };
        merged.extend(next);
    }
    merged
}

/// Label pixels equal to `target`; foreground uses 8-connectivity and
/// background 4-connectivity so the two never cross each other.
fn label_components(matrix: &BitMatrix, target: bool) -> Vec<Component> {
    let width = matrix.width();
    let height = matrix.height();
    let eight_connected = target;

    let mut labels = vec![0u32; width * height];
    let mut uf = UnionFind::new();

    // First pass: provisional labels
    for y in 0..height {
        for x in 0..width {
            if matrix.get(x, y) != target {
                continue;
            }

            let mut neighbors = [0u32; 4];
            let mut count = 0;
            let mut push = |label: u32| {
                if label != 0 {
                    neighbors[count] = label;
                    count += 1;
                }
            };
            if x > 0 {
                push(labels[y * width + x - 1]);
            }
            if y > 0 {
                push(labels[(y - 1) * width + x]);
                if eight_connected {
                    if x > 0 {
                        push(labels[(y - 1) * width + x - 1]);
                    }
                    if x + 1 < width {
                        push(labels[(y - 1) * width + x + 1]);
                    }
                }
            }

            let idx = y * width + x;
            match neighbors[..count].iter().min() {
                None => labels[idx] = uf.make_set(),
                Some(&min_label) => {
                    labels[idx] = min_label;
                    for &l in &neighbors[..count] {
                        if l != min_label {
                            uf.union(min_label, l);
                        }
                    }
                }
            }
        }
    }

    // Second pass: resolve roots and accumulate boxes in discovery order
    let mut slot_of_root = vec![usize::MAX; uf.len()];
    let mut boxes: Vec<(usize, usize, usize, usize)> = Vec::new();
    let mut components: Vec<Component> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let label = labels[idx];
            if label == 0 {
                continue;
            }
            let root = uf.find(label) as usize;
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = components.len();
                boxes.push((x, y, x, y));
                components.push(Component {
                    kind: if target {
                        ComponentKind::Foreground
                    } else {
                        ComponentKind::Hole
                    },
                    bounds: Region::default(),
                    pixel_count: 0,
                    first_pixel: idx,
                    touches_border: false,
                });
            }
            let slot = slot_of_root[root];
            let entry = &mut boxes[slot];
            entry.0 = entry.0.min(x);
            entry.1 = entry.1.min(y);
            entry.2 = entry.2.max(x);
            entry.3 = entry.3.max(y);

            let component = &mut components[slot];
            component.pixel_count += 1;
            if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                component.touches_border = true;
            }
        }
    }

    for (component, (min_x, min_y, max_x, max_y)) in components.iter_mut().zip(boxes) {
        component.bounds =
            Region::from_bounds(min_x as u32, min_y as u32, max_x as u32, max_y as u32);
    }
    components
}
