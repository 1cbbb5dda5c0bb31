use pathviz_core::Point;

/// Cardinal offsets in expansion order: up, down, left, right.
pub const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
];

/// Append the cardinal neighbours of `p` for which `keep` returns `true`.
pub(crate) fn cardinal(p: Point, keep: impl Fn(Point) -> bool, buf: &mut Vec<Point>) {
    for d in CARDINAL {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}
