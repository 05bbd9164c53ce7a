/// Rectangle in PDF user space.
///
/// Coordinates follow the PDF convention:
/// - origin at the bottom-left corner of the page
/// - units are points (1/72 inch)
/// - `(x0, y0)` is the lower-left corner, `(x1, y1)` the upper-right
///
/// The four numbers are stored exactly as read from a `/Rect` array so a
/// widget can be written back at the very same position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdfRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PdfRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a rectangle from two arbitrary corners, normalizing so that
    /// `x0 <= x1` and `y0 <= y1`.
    ///
    /// PDF allows `/Rect` corners in any order; viewers treat them as the
    /// same rectangle.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.x0
    }

    /// Bottom edge.
    pub fn y(&self) -> f64 {
        self.y0
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The rectangle as a `[x0, y0, x1, y1]` array.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}
