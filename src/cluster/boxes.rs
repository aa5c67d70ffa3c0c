//! First-fit bounding boxes for unmatched pixels.

/// Axis-aligned inclusive rectangle with `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComparisonBox {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl ComparisonBox {
    /// Creates a degenerate box covering a single point.
    pub fn point(x: usize, y: usize) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
        }
    }

    /// Extent along x (`x2 - x1`); a singleton box has width 0.
    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    /// Extent along y (`y2 - y1`).
    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }

    /// True if `(x, y)` lies inside the box, edges included.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    /// Smallest box enclosing both `self` and `(x, y)`.
    pub fn extended_to(&self, x: usize, y: usize) -> Self {
        Self {
            x1: self.x1.min(x),
            y1: self.y1.min(y),
            x2: self.x2.max(x),
            y2: self.y2.max(y),
        }
    }
}

/// Greedy clustering of points into size-limited boxes.
///
/// Each point joins the first box (in creation order) that can absorb it
/// without exceeding the limits; otherwise it starts a new box. Boxes only
/// grow and are never merged or split, so membership depends on point order.
#[derive(Clone, Debug)]
pub struct BoxAccumulator {
    max_width: usize,
    max_height: usize,
    boxes: Vec<ComparisonBox>,
}

impl BoxAccumulator {
    pub fn new(max_width: usize, max_height: usize) -> Self {
        Self {
            max_width,
            max_height,
            boxes: Vec::new(),
        }
    }

    /// Adds a point and returns the index of the box it joined.
    pub fn add_point(&mut self, x: usize, y: usize) -> usize {
        for (idx, b) in self.boxes.iter_mut().enumerate() {
            let grown = b.extended_to(x, y);
            if grown.width() <= self.max_width && grown.height() <= self.max_height {
                *b = grown;
                return idx;
            }
        }
        self.boxes.push(ComparisonBox::point(x, y));
        self.boxes.len() - 1
    }

    /// Boxes in creation order.
    pub fn boxes(&self) -> &[ComparisonBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn into_boxes(self) -> Vec<ComparisonBox> {
        self.boxes
    }
}
