use super::{lerp_color, with_alpha, ViewBox};
use crate::gooey_back::{
    color::{darken, grayscale, lighten},
    DotId, Rgb, Spring, SpringConfig,
};
use iced::{
    widget::canvas::{path::arc::Elliptical, Frame, Path},
    Color, Point, Radians, Vector,
};
use std::{
    f32::consts::{PI, TAU},
    time::Duration,
};

/// horizontal center of the scene, where mixed dots meet
pub const CENTER: f32 = 160.0;
/// how far an unmixed dot rests from the center
pub const SPREAD: f32 = 80.0;
pub const RADIUS: f32 = 36.0;
const CY: f32 = 80.0;

const SHADOW_CY: f32 = 150.0;
const SHADOW_RADII: Vector = Vector::new(28.0, 4.0);
const SHADOW_OPACITY: f32 = 0.9;
const SHADOW_FADE: Duration = Duration::from_millis(500);

const GLOW_PERIOD: Duration = Duration::from_secs(3);

/// where the gradient's bright spot sits, relative to the circle's bounding box
const HIGHLIGHT: Vector = Vector::new(0.3138, 0.3286);
/// gradient radius, relative to the circle's diameter
const GRADIENT_REACH: f32 = 0.9759;
/// offset of the middle gradient stop, which has the plain fill
const GRADIENT_MID: f32 = 0.6137;
const GRADIENT_LAYERS: u8 = 16;

pub fn direction(id: DotId) -> f32 {
    match id {
        DotId::Left => -1.0,
        DotId::Right => 1.0,
        DotId::Mix => 0.0,
    }
}

pub fn target_cx(id: DotId, mixed: bool) -> f32 {
    if mixed {
        CENTER
    } else {
        direction(id).mul_add(SPREAD, CENTER)
    }
}

/// the animated position, fill and glow timing of one dot
#[derive(Clone, Copy, Debug)]
pub struct Dot {
    id: DotId,
    cx: Spring,
    fill: Rgb,
    shadow: ShadowFade,
    glow_delay: Duration,
}

impl Dot {
    /// a dot resting at `cx`; `index` staggers the glow of neighbouring dots
    pub fn new(id: DotId, index: u8, cx: f32, fill: Rgb) -> Self {
        Self {
            id,
            cx: Spring::new(cx, SpringConfig::default()),
            fill,
            shadow: ShadowFade::new(fill),
            glow_delay: GLOW_PERIOD * u32::from(index) / 9,
        }
    }

    pub fn id(&self) -> DotId {
        self.id
    }

    pub fn retarget(&mut self, mixed: bool) {
        self.cx.set_target(target_cx(self.id, mixed));
    }

    /// the circle takes `fill` right away, its shadow fades over to it
    pub fn set_fill(&mut self, fill: Rgb) {
        self.fill = fill;
        self.shadow.retarget(fill);
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.cx.advance(elapsed);
        self.shadow.advance(elapsed);
    }

    /// a snapshot for drawing, `since_start` being the time since the scene was created
    pub fn frame(&self, since_start: Duration) -> DotFrame {
        let phase = ((since_start + self.glow_delay).as_secs_f32() % GLOW_PERIOD.as_secs_f32())
            / GLOW_PERIOD.as_secs_f32();

        DotFrame {
            id: self.id,
            cx: self.cx.value(),
            fill: self.fill,
            shadow: self.shadow.color(),
            glow: 0.5 - 0.5 * (TAU * phase).cos(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotFrame {
    pub id: DotId,
    /// horizontal position, in scene units
    pub cx: f32,
    pub fill: Rgb,
    pub shadow: Color,
    /// pulse strength in `0.0..=1.0`
    pub glow: f32,
}

impl DotFrame {
    pub fn center(&self) -> Point {
        Point::new(self.cx, CY)
    }

    /// `point` is in scene units
    pub fn contains(&self, point: Point) -> bool {
        self.center().distance(point) <= RADIUS
    }

    pub(super) fn draw(&self, frame: &mut Frame, view: ViewBox) {
        let center = view.to_screen(self.center());
        let radius = view.len(RADIUS);

        let halo = Path::circle(center, radius * self.glow.mul_add(0.12, 1.0));
        frame.fill(&halo, with_alpha(self.fill, 0.2 * self.glow));

        // concentric layers shrinking toward the highlight stand in for a radial gradient
        let stops = [lighten(0.2, self.fill), self.fill, darken(0.2, self.fill)].map(Color::from);
        let focal = center
            + Vector::new(
                radius * 2.0f32.mul_add(HIGHLIGHT.x, -1.0),
                radius * 2.0f32.mul_add(HIGHLIGHT.y, -1.0),
            );
        let reach = 2.0 * radius * GRADIENT_REACH;

        for layer in 0..GRADIENT_LAYERS {
            let t = f32::from(layer) / f32::from(GRADIENT_LAYERS);
            let layer_center = center + (focal - center) * t;
            let layer_radius = radius * (1.0 - t);

            // color at the layer's edge farthest from the highlight
            let offset = (layer_radius + layer_center.distance(focal)) / reach;

            frame.fill(
                &Path::circle(layer_center, layer_radius),
                gradient_at(stops, offset),
            );
        }

        let shadow = Path::new(|builder| {
            builder.ellipse(Elliptical {
                center: view.to_screen(Point::new(self.cx, SHADOW_CY)),
                radii: SHADOW_RADII * view.scale,
                rotation: Radians(0.0),
                start_angle: Radians(0.0),
                end_angle: Radians(2.0 * PI),
            });
        });
        frame.fill(&shadow, self.shadow);
    }
}

/// the color of the ground shadow, easing out toward the latest fill
#[derive(Clone, Copy, Debug)]
struct ShadowFade {
    from: Color,
    to: Color,
    elapsed: Duration,
}

impl ShadowFade {
    fn new(fill: Rgb) -> Self {
        let color = shadow_color(fill);

        Self {
            from: color,
            to: color,
            elapsed: SHADOW_FADE,
        }
    }

    fn retarget(&mut self, fill: Rgb) {
        let to = shadow_color(fill);

        if to != self.to {
            self.from = self.color();
            self.to = to;
            self.elapsed = Duration::ZERO;
        }
    }

    fn advance(&mut self, elapsed: Duration) {
        self.elapsed = (self.elapsed + elapsed).min(SHADOW_FADE);
    }

    fn color(&self) -> Color {
        if self.elapsed >= SHADOW_FADE {
            return self.to;
        }

        let t = self.elapsed.as_secs_f32() / SHADOW_FADE.as_secs_f32();
        lerp_color(self.from, self.to, 1.0 - (1.0 - t).powi(3))
    }
}

fn shadow_color(fill: Rgb) -> Color {
    with_alpha(grayscale(fill), SHADOW_OPACITY)
}

fn gradient_at([light, base, dark]: [Color; 3], offset: f32) -> Color {
    let offset = offset.clamp(0.0, 1.0);

    if offset <= GRADIENT_MID {
        lerp_color(light, base, offset / GRADIENT_MID)
    } else {
        lerp_color(base, dark, (offset - GRADIENT_MID) / (1.0 - GRADIENT_MID))
    }
}
