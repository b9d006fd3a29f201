mod dot;
pub use dot::{Dot, DotFrame, RADIUS};

mod goo;

pub mod picker_surface;
pub use picker_surface::PickerSurface;

mod scene;
pub use scene::Scene;

use crate::gooey_back::Rgb;
use iced::{Color, Point, Size, Vector};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb8(rgb.r, rgb.g, rgb.b)
    }
}

fn with_alpha(color: impl Into<Color>, alpha: f32) -> Color {
    Color {
        a: alpha,
        ..color.into()
    }
}

/// scales the alpha of `color` by `amount`, clamped to `0..=1`
pub fn fade(color: Color, amount: f32) -> Color {
    with_alpha(color, color.a * amount.clamp(0.0, 1.0))
}

fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let lerp = |a: f32, b: f32| (b - a).mul_add(t, a);

    Color {
        r: lerp(from.r, to.r),
        g: lerp(from.g, to.g),
        b: lerp(from.b, to.b),
        a: lerp(from.a, to.a),
    }
}

/// maps the fixed 320x160 scene coordinates onto the canvas, scaled to fit and centered
#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewBox {
    scale: f32,
    offset: Vector,
}

impl ViewBox {
    const SIZE: Size = Size::new(320.0, 160.0);

    fn fit(bounds: Size) -> Self {
        let scale = (bounds.width / Self::SIZE.width).min(bounds.height / Self::SIZE.height);

        Self {
            scale,
            offset: Vector::new(
                Self::SIZE.width.mul_add(-scale, bounds.width) / 2.0,
                Self::SIZE.height.mul_add(-scale, bounds.height) / 2.0,
            ),
        }
    }

    fn to_screen(self, point: Point) -> Point {
        Point::new(point.x * self.scale, point.y * self.scale) + self.offset
    }

    fn to_view(self, point: Point) -> Point {
        let point = point - self.offset;
        Point::new(point.x / self.scale, point.y / self.scale)
    }

    fn len(self, len: f32) -> f32 {
        len * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_letterboxes_wide_canvases() {
        let view = ViewBox::fit(Size::new(800.0, 160.0));

        assert!((view.scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(view.to_screen(Point::new(0.0, 0.0)), Point::new(240.0, 0.0));
        assert_eq!(view.to_view(Point::new(400.0, 80.0)), Point::new(160.0, 80.0));
    }

    #[test]
    fn view_box_scales_uniformly() {
        let view = ViewBox::fit(Size::new(640.0, 400.0));

        assert!((view.scale - 2.0).abs() < f32::EPSILON);
        assert!((view.len(36.0) - 72.0).abs() < f32::EPSILON);
        assert_eq!(view.to_screen(Point::new(160.0, 80.0)), Point::new(320.0, 200.0));
    }

    #[test]
    fn colors_interpolate_per_channel() {
        let mid = lerp_color(Color::BLACK, with_alpha(Color::WHITE, 0.0), 0.5);

        assert!((mid.r - 0.5).abs() < f32::EPSILON);
        assert!((mid.a - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn fading_scales_the_alpha() {
        let faded = fade(with_alpha(Color::WHITE, 0.5), 0.5);

        assert!((faded.a - 0.25).abs() < f32::EPSILON);
        assert!((fade(Color::WHITE, 3.0).a - 1.0).abs() < f32::EPSILON);
        assert!(fade(Color::WHITE, -1.0).a.abs() < f32::EPSILON);
    }
}
