/// Rectangular page region with top-left origin coordinate system.
///
/// Coordinates are in document points:
/// - `x0`: left edge
/// - `y0`: top edge (distance from top of page)
/// - `x1`: right edge
/// - `y1`: bottom edge (distance from top of page)
///
/// A well-formed region satisfies `x1 >= x0` and `y1 >= y0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Region {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the region.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the region.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Compute the union of two regions.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns `true` if the two regions overlap or touch.
    pub fn intersects(&self, other: &Region) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    /// Return a region grown by `margin` points on every side.
    pub fn expand(&self, margin: f64) -> Region {
        Region {
            x0: self.x0 - margin,
            y0: self.y0 - margin,
            x1: self.x1 + margin,
            y1: self.y1 + margin,
        }
    }

    /// Returns `true` if either dimension is smaller than `min_size` points.
    pub fn is_degenerate(&self, min_size: f64) -> bool {
        self.width() < min_size || self.height() < min_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_new() {
        let r = Region::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.x0, 10.0);
        assert_eq!(r.y0, 20.0);
        assert_eq!(r.x1, 30.0);
        assert_eq!(r.y1, 40.0);
    }

    #[test]
    fn test_region_dimensions() {
        let r = Region::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(r.width(), 40.0);
        assert_eq!(r.height(), 40.0);
    }

    #[test]
    fn test_region_union() {
        let a = Region::new(10.0, 20.0, 30.0, 40.0);
        let b = Region::new(5.0, 25.0, 35.0, 45.0);
        let u = a.union(&b);
        assert_eq!(u, Region::new(5.0, 20.0, 35.0, 45.0));
    }

    #[test]
    fn test_region_intersects_overlapping() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_region_intersects_disjoint() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(20.0, 20.0, 30.0, 30.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_region_expand() {
        let r = Region::new(10.0, 10.0, 20.0, 20.0).expand(2.0);
        assert_eq!(r, Region::new(8.0, 8.0, 22.0, 22.0));
    }

    #[test]
    fn test_region_degenerate() {
        assert!(Region::new(0.0, 0.0, 0.5, 10.0).is_degenerate(1.0));
        assert!(Region::new(0.0, 0.0, 10.0, 0.0).is_degenerate(1.0));
        assert!(!Region::new(0.0, 0.0, 10.0, 10.0).is_degenerate(1.0));
    }
}
