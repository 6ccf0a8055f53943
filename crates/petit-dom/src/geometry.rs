//! Geometry
//!
//! Element rectangles for scroll and intersection math.

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check if a vertical offset falls within [top, bottom)
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Check if rects overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::from_xywh(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
    }

    #[test]
    fn test_contains_y_half_open() {
        let rect = Rect::from_xywh(0.0, 100.0, 800.0, 200.0);

        assert!(rect.contains_y(100.0));
        assert!(rect.contains_y(299.9));
        assert!(!rect.contains_y(300.0));
        assert!(!rect.contains_y(99.0));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let b = Rect::from_xywh(50.0, 50.0, 100.0, 100.0);
        let c = Rect::from_xywh(200.0, 200.0, 50.0, 50.0);

        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::from_xywh(50.0, 50.0, 50.0, 50.0));
        assert!(a.intersection(&c).is_none());
    }
}
