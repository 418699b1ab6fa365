use stepmaze_core::Point;

/// Cardinal directions in expansion order: up, down, left, right.
const DIRS: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
];

/// Reusable neighbor buffer.
///
/// Enumerates the cells `step` cells away in each cardinal direction,
/// filtered by a predicate. The search uses `step = 1`; the maze carver
/// uses `step = 2`.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the cardinal neighbors of `p` at distance `step`, keeping only
    /// those for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, step: i32, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in DIRS {
            let n = p.shift(d.x * step, d.y * step);
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Like [`Neighbors::cardinal`], but the result can be reordered in place.
    pub fn cardinal_mut(
        &mut self,
        p: Point,
        step: i32,
        keep: impl Fn(Point) -> bool,
    ) -> &mut [Point] {
        self.cardinal(p, step, keep);
        &mut self.buf
    }
}
