//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Its origin is fixed at `(width / 2, height / 2)` with floor
//! division, the same anchor convolution kernels use.

use crate::{MorphError, MorphResult};
use rasterkit_core::{Matrix, WindowShape};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - this position takes part in the operation
    Hit = 1,
}

impl SelElement {
    /// The opposite element
    #[inline]
    pub fn complement(self) -> Self {
        match self {
            SelElement::DontCare => SelElement::Hit,
            SelElement::Hit => SelElement::DontCare,
        }
    }
}

/// Structuring Element (SEL)
///
/// A rectangular grid of [`SelElement`]s. Hit-or-miss uses two of these of
/// equal size: one for the required foreground and one for the required
/// background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    shape: WindowShape,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element with every position "don't care"
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        let shape = window(width, height)?;
        Ok(Sel {
            shape,
            data: vec![SelElement::DontCare; width as usize * height as usize],
            name: None,
        })
    }

    /// Create a structuring element from integer rows
    ///
    /// Every value must be 0 (don't care) or 1 (hit).
    ///
    /// # Errors
    ///
    /// Returns `Core(ShapeMismatch)` for empty or jagged rows and
    /// `Core(InvalidValue)` naming the first cell outside {0, 1}.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> MorphResult<Self> {
        let m = Matrix::from_rows(rows)?;
        let (width, height) = m.dimensions();
        let mut data = Vec::with_capacity(m.data().len());
        for (idx, &v) in m.data().iter().enumerate() {
            let elem = match v {
                0 => SelElement::DontCare,
                1 => SelElement::Hit,
                _ => {
                    return Err(rasterkit_core::Error::InvalidValue {
                        x: idx as u32 % width,
                        y: idx as u32 / width,
                        value: i64::from(v),
                    }
                    .into());
                }
            };
            data.push(elem);
        }
        Ok(Sel {
            shape: window(width, height)?,
            data,
            name: None,
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let shape = window(width, height)?;
        Ok(Sel {
            shape,
            data: vec![SelElement::Hit; width as usize * height as usize],
            name: Some(format!("brick_{width}x{height}")),
        })
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a horizontal line structuring element
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Self::create_brick(length, 1)
    }

    /// Create a vertical line structuring element
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Self::create_brick(1, length)
    }

    /// Create a cross (+) structuring element
    ///
    /// Hits fill the row and column through the origin.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        let mut sel = Self::new(size, size)?;
        let c = size / 2;
        for i in 0..size {
            sel.set_element(c, i, SelElement::Hit);
            sel.set_element(i, c, SelElement::Hit);
        }
        sel.name = Some(format!("cross_{size}"));
        Ok(sel)
    }

    /// Create a diamond structuring element
    ///
    /// Hits are all positions within Manhattan distance `radius` of the
    /// origin.
    pub fn create_diamond(radius: u32) -> MorphResult<Self> {
        let r = i64::from(radius);
        let mut sel = Self::from_predicate(radius, |dx, dy| dx.abs() + dy.abs() <= r)?;
        sel.name = Some(format!("diamond_{radius}"));
        Ok(sel)
    }

    /// Create a disk (approximate circle) structuring element
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let r2 = i64::from(radius) * i64::from(radius);
        let mut sel = Self::from_predicate(radius, |dx, dy| dx * dx + dy * dy <= r2)?;
        sel.name = Some(format!("disk_{radius}"));
        Ok(sel)
    }

    /// Square SEL of side `2 * radius + 1` with hits where `f(dx, dy)` holds
    fn from_predicate(radius: u32, f: impl Fn(i64, i64) -> bool) -> MorphResult<Self> {
        let shape = WindowShape::square(radius)
            .map_err(|_| MorphError::InvalidSel(format!("radius {radius} is too large")))?;
        let r = i64::from(radius);
        let data = shape
            .positions()
            .map(|(kx, ky)| {
                if f(i64::from(kx) - r, i64::from(ky) - r) {
                    SelElement::Hit
                } else {
                    SelElement::DontCare
                }
            })
            .collect();
        Ok(Sel {
            shape,
            data,
            name: None,
        })
    }

    /// Create a structuring element from a string pattern
    ///
    /// Each non-blank line is one row: `x` or `1` for hit, `.` or `0` for
    /// don't care. Leading and trailing whitespace on a line is ignored.
    ///
    /// ```
    /// use rasterkit_morph::Sel;
    ///
    /// let plus = Sel::from_string(".x.\nxxx\n.x.").unwrap();
    /// assert_eq!(plus.hit_count(), 5);
    /// ```
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let mut rows = Vec::new();
        for (y, line) in pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, c)| match c {
                    'x' | 'X' | '1' => Ok(1),
                    '.' | '0' => Ok(0),
                    other => Err(MorphError::InvalidSel(format!(
                        "unexpected character '{other}' at ({x}, {y})"
                    ))),
                })
                .collect::<MorphResult<Vec<i32>>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.shape.width()
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.shape.height()
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.shape.center_x()
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.shape.center_y()
    }

    /// Sliding window matching this SEL's size and origin
    #[inline]
    pub fn window(&self) -> WindowShape {
        self.shape
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x < self.width() && y < self.height() {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set an element at (x, y). Out-of-range positions are ignored.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width() && y < self.height() {
            let idx = self.index(x, y);
            self.data[idx] = elem;
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    /// Get raw element data
    pub fn data(&self) -> &[SelElement] {
        &self.data
    }

    /// Element grid as integer rows (1 = hit)
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.data
            .chunks(self.width() as usize)
            .map(|row| row.iter().map(|&e| e as i32).collect())
            .collect()
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Whether the origin itself is a hit
    pub fn contains_origin(&self) -> bool {
        self.get_element(self.origin_x(), self.origin_y()) == Some(SelElement::Hit)
    }

    /// Create the complementary SEL: every hit becomes don't care and vice
    /// versa
    pub fn complement(&self) -> Self {
        Sel {
            shape: self.shape,
            data: self.data.iter().map(|e| e.complement()).collect(),
            name: self.name.as_ref().map(|n| format!("{n}_c")),
        }
    }

    /// Create the reflected (180-degree rotated) SEL
    ///
    /// The origin stays at the floor center, so for even sizes the
    /// reflection is not exactly about the origin.
    pub fn reflect(&self) -> Self {
        Sel {
            shape: self.shape,
            data: self.data.iter().rev().copied().collect(),
            name: self.name.as_ref().map(|n| format!("{n}_r")),
        }
    }

    /// Iterate over hit positions `(kx, ky)` within the SEL grid
    pub fn hit_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width();
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &elem)| elem == SelElement::Hit)
            .map(move |(idx, _)| (idx as u32 % width, idx as u32 / width))
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.origin_x() as i32;
        let cy = self.origin_y() as i32;
        self.hit_positions()
            .map(move |(x, y)| (x as i32 - cx, y as i32 - cy))
    }
}

fn window(width: u32, height: u32) -> MorphResult<WindowShape> {
    WindowShape::new(width, height).map_err(|_| {
        MorphError::InvalidSel(format!("size must be at least 1x1, got {width}x{height}"))
    })
}
