use core::fmt;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// The visible region of a chart, and how it maps onto a drawing surface.
///
/// Screen coordinates have their origin in the top left corner, `x` growing
/// rightwards and `y` downwards. With `invert_y` set (the default), data
/// coordinates follow the same convention: the lower bound of `ylim` is drawn
/// at the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    xlim: (f64, f64),
    ylim: (f64, f64),
    invert_y: bool,
}

impl Viewport {
    /// Returns an error if either range is empty or has non-finite bounds.
    ///
    /// Reversed ranges (`min > max`) are accepted, and flip that axis.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64), invert_y: bool) -> Result<Self, RenderError> {
        check_range(Axis::X, xlim)?;
        check_range(Axis::Y, ylim)?;
        Ok(Self {
            xlim,
            ylim,
            invert_y,
        })
    }

    #[inline]
    #[must_use]
    pub const fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    #[inline]
    #[must_use]
    pub const fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    #[inline]
    #[must_use]
    pub const fn invert_y(&self) -> bool {
        self.invert_y
    }

    #[inline]
    #[must_use]
    pub const fn lim(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => self.xlim,
            Axis::Y => self.ylim,
        }
    }

    /// Maps `p` to `[0, 1]²` screen space, `(0, 0)` being the top left corner.
    ///
    /// Points outside the visible range land outside of the unit square.
    #[inline]
    #[must_use]
    pub fn to_unit(&self, p: &Point) -> Point {
        let (x0, x1) = self.xlim;
        let (y0, y1) = self.ylim;

        let u = (p.x - x0) / (x1 - x0);
        let t = (p.y - y0) / (y1 - y0);

        Point::new(u, if self.invert_y { t } else { 1. - t })
    }

    /// Maps `p` to pixel coordinates on a `width` x `height` surface.
    #[inline]
    #[must_use]
    pub fn to_pixel(&self, p: &Point, (width, height): (u32, u32)) -> Point {
        let u = self.to_unit(p);
        Point::new(u.x * f64::from(width), u.y * f64::from(height))
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        let u = self.to_unit(p);
        (0. ..=1.).contains(&u.x) && (0. ..=1.).contains(&u.y)
    }

    /// Evenly spaced, round, tick values along `axis`. See [`nice_ticks`].
    #[inline]
    #[must_use]
    pub fn ticks(&self, axis: Axis, target: usize) -> Vec<f64> {
        let (min, max) = self.lim(axis);
        nice_ticks(min, max, target)
    }
}

/// Clips the segment `a -> b`, given in unit screen space, to the unit square.
///
/// Returns `None` if nothing of it is visible, or if it has a non-finite coordinate.
#[must_use]
pub fn clip_unit(a: Point, b: Point) -> Option<(Point, Point)> {
    if !(a.iter().chain(b.iter()).all(|c| c.is_finite())) {
        return None;
    }

    let d = b - a;
    let (mut t0, mut t1) = (0f64, 1f64);

    // Liang-Barsky
    for (p, q) in [(-d.x, a.x), (d.x, 1. - a.x), (-d.y, a.y), (d.y, 1. - a.y)] {
        if p == 0. {
            if q < 0. {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0. {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    Some((a + d * t0, a + d * t1))
}

fn check_range(axis: Axis, (min, max): (f64, f64)) -> Result<(), RenderError> {
    if min.is_finite() && max.is_finite() && min != max {
        Ok(())
    } else {
        Err(RenderError::InvalidRange { axis, min, max })
    }
}

/// Returns roughly `target` tick values covering `[min, max]` (in either order),
/// in ascending order, spaced by 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span = hi - lo;

    if target == 0 || !span.is_finite() || span <= 0. {
        return Vec::new();
    }

    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;

    let step = mag
        * if norm < 1.5 {
            1.
        } else if norm < 3. {
            2.
        } else if norm < 7. {
            5.
        } else {
            10.
        };

    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;

    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // avoid printing "-0"
            if v == 0. {
                0.
            } else {
                v
            }
        })
        .collect()
}
