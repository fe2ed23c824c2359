use glam::IVec2;

/// Integer pixel position on a display surface.
///
/// The origin is the top-left corner and `y` grows downward.
pub type Pixel = IVec2;

/// Opaque draw color token handed through to the display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Axis-aligned pixel rectangle touched by a draw call.
///
/// Both corners are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub min: Pixel,
    pub max: Pixel,
}

impl Region {
    /// Bounding rectangle of a segment between `a` and `b`.
    pub fn spanning(a: Pixel, b: Pixel) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y + 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanning_orders_corners() {
        let r = Region::spanning(IVec2::new(5, 1), IVec2::new(2, 7));
        assert_eq!(r.min, IVec2::new(2, 1));
        assert_eq!(r.max, IVec2::new(5, 7));
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 7);
    }

    #[test]
    fn single_pixel_region_has_unit_size() {
        let p = IVec2::new(3, 3);
        let r = Region::spanning(p, p);
        assert_eq!((r.width(), r.height()), (1, 1));
    }
}
