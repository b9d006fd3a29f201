use iced::{widget::canvas::Path, Point, Vector};
use std::f32::consts::{FRAC_PI_2, PI};

const HANDLE_SIZE: f32 = 2.4;
const SPREAD: f32 = 0.5;
/// how many second-circle radii the bridge can stretch across before it snaps
const REACH: f32 = 2.5;

/// the curved neck joining two nearby circles, so they read as one melting blob
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bridge {
    /// `[p1, p2, p3, p4]`, where the neck meets the circles
    ends: [Point; 4],
    /// bezier handles, one per end
    handles: [Point; 4],
}

/// `None` when the circles are too far apart, or one swallows the other
pub fn bridge(c1: Point, r1: f32, c2: Point, r2: f32) -> Option<Bridge> {
    let d = c1.distance(c2);

    if r1 <= 0.0 || r2 <= 0.0 || d > r2.mul_add(REACH, r1) || d <= (r1 - r2).abs() {
        return None;
    }

    let (u1, u2) = if d < r1 + r2 {
        (
            (r1.mul_add(r1, d * d) - r2 * r2) / (2.0 * r1 * d),
            (r2.mul_add(r2, d * d) - r1 * r1) / (2.0 * r2 * d),
        )
    } else {
        (1.0, 1.0)
    };
    let (u1, u2) = (u1.clamp(-1.0, 1.0).acos(), u2.clamp(-1.0, 1.0).acos());

    let between = (c2.y - c1.y).atan2(c2.x - c1.x);
    let max_spread = ((r1 - r2) / d).clamp(-1.0, 1.0).acos();

    let angles = [
        between + u1 + (max_spread - u1) * SPREAD,
        between - u1 - (max_spread - u1) * SPREAD,
        between + PI - u2 - (PI - u2 - max_spread) * SPREAD,
        between - PI + u2 + (PI - u2 - max_spread) * SPREAD,
    ];

    let ends = [
        polar(c1, angles[0], r1),
        polar(c1, angles[1], r1),
        polar(c2, angles[2], r2),
        polar(c2, angles[3], r2),
    ];

    let total = r1 + r2;
    let stretch =
        (SPREAD * HANDLE_SIZE).min(ends[0].distance(ends[2]) / total) * (d * 2.0 / total).min(1.0);
    let (h1, h2) = (r1 * stretch, r2 * stretch);

    let handles = [
        polar(ends[0], angles[0] - FRAC_PI_2, h1),
        polar(ends[1], angles[1] + FRAC_PI_2, h1),
        polar(ends[2], angles[2] + FRAC_PI_2, h2),
        polar(ends[3], angles[3] - FRAC_PI_2, h2),
    ];

    Some(Bridge { ends, handles })
}

fn polar(origin: Point, angle: f32, len: f32) -> Point {
    origin + Vector::new(angle.cos() * len, angle.sin() * len)
}

impl Bridge {
    #[must_use]
    pub fn map(self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            ends: self.ends.map(&f),
            handles: self.handles.map(&f),
        }
    }

    /// the closed outline; its straight edges run inside the circles, which are drawn on top
    pub fn path(&self) -> Path {
        let [p1, p2, p3, p4] = self.ends;
        let [h1, h2, h3, h4] = self.handles;

        Path::new(|builder| {
            builder.move_to(p1);
            builder.bezier_curve_to(h1, h3, p3);
            builder.line_to(p4);
            builder.bezier_curve_to(h4, h2, p2);
            builder.close();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 36.0;

    #[test]
    fn far_circles_have_no_bridge() {
        assert_eq!(
            bridge(Point::new(80.0, 80.0), R, Point::new(240.0, 80.0), R),
            None
        );
    }

    #[test]
    fn overlapping_circles_have_no_bridge() {
        let center = Point::new(160.0, 80.0);

        assert_eq!(bridge(center, R, center, R), None);
        assert_eq!(bridge(center, R, Point::new(170.0, 80.0), 10.0), None);
    }

    #[test]
    fn bridge_is_symmetric_about_the_axis() {
        let Some(bridge) = bridge(Point::new(110.0, 80.0), R, Point::new(210.0, 80.0), R) else {
            panic!("circles within reach should be bridged");
        };

        let [p1, p2, p3, p4] = bridge.ends;
        assert!((p1.x - p2.x).abs() < 1e-3);
        assert!((p1.y - 80.0 + (p2.y - 80.0)).abs() < 1e-3);
        assert!((p3.y - 80.0 + (p4.y - 80.0)).abs() < 1e-3);
        assert!((p1.x - 110.0 - (210.0 - p3.x)).abs() < 1e-3);
    }

    #[test]
    fn bridge_ends_sit_on_the_circles() {
        let (c1, c2) = (Point::new(130.0, 80.0), Point::new(190.0, 80.0));
        let bridge = bridge(c1, R, c2, R).unwrap();

        for end in &bridge.ends[..2] {
            assert!((end.distance(c1) - R).abs() < 1e-3);
        }
        for end in &bridge.ends[2..] {
            assert!((end.distance(c2) - R).abs() < 1e-3);
        }
    }

    #[test]
    fn map_moves_every_point() {
        let bridge = bridge(Point::new(110.0, 80.0), R, Point::new(210.0, 80.0), R).unwrap();
        let moved = bridge.map(|p| p + Vector::new(1.0, 2.0));

        assert_eq!(moved.ends[0], bridge.ends[0] + Vector::new(1.0, 2.0));
        assert_eq!(moved.handles[3], bridge.handles[3] + Vector::new(1.0, 2.0));
    }
}
