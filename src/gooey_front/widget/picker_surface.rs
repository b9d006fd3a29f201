use super::fade;
use crate::{
    gooey_back::{color::Hsv, Rgb},
    gooey_front::color_picker::Message,
};
use iced::{
    mouse::{self, Cursor, Interaction},
    widget::canvas::{self, event, gradient::Linear, Event, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Size, Theme, Vector,
};

pub const WIDTH: f32 = 225.0;
pub const HEIGHT: f32 = 172.0;
const SV_HEIGHT: f32 = 124.0;
const PADDING: f32 = 12.0;
const SWATCH_RADIUS: f32 = 12.0;
const HUE_HEIGHT: f32 = 10.0;
const MARKER_RADIUS: f32 = 6.0;

/// vertical center of the swatch and hue bar row
const ROW_Y: f32 = SV_HEIGHT + PADDING + SWATCH_RADIUS;
const HUE_LEFT: f32 = PADDING + 2.0 * SWATCH_RADIUS + PADDING;
const HUE_RIGHT: f32 = WIDTH - PADDING;

/// the part of the surface a drag started on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Area {
    SaturationValue,
    Hue,
}

impl Area {
    fn at(point: Point) -> Option<Self> {
        if (0.0..=WIDTH).contains(&point.x) && (0.0..=SV_HEIGHT).contains(&point.y) {
            Some(Self::SaturationValue)
        } else if (HUE_LEFT - MARKER_RADIUS..=HUE_RIGHT + MARKER_RADIUS).contains(&point.x)
            && (ROW_Y - SWATCH_RADIUS..=ROW_Y + SWATCH_RADIUS).contains(&point.y)
        {
            Some(Self::Hue)
        } else {
            None
        }
    }

    /// the color picked at `point`, which may lie outside the area while dragging
    fn pick(self, point: Point, hsv: Hsv) -> Hsv {
        match self {
            Self::SaturationValue => Hsv {
                s: (point.x / WIDTH).clamp(0.0, 1.0),
                v: (1.0 - point.y / SV_HEIGHT).clamp(0.0, 1.0),
                ..hsv
            },
            Self::Hue => Hsv {
                h: ((point.x - HUE_LEFT) / (HUE_RIGHT - HUE_LEFT)).clamp(0.0, 1.0) * 359.0,
                ..hsv
            },
        }
    }
}

/// saturation/value square, hue bar and a preview swatch, unfolding from the top edge
#[derive(Clone, Copy, Debug)]
pub struct PickerSurface {
    hsv: Hsv,
    /// `0.0` is folded away; springs may overshoot past `1.0`
    openness: f32,
    interactive: bool,
}

impl PickerSurface {
    pub fn new(hsv: Hsv, openness: f32, interactive: bool) -> Self {
        Self {
            hsv,
            openness,
            interactive,
        }
    }

    fn fade(&self, color: Color) -> Color {
        fade(color, self.openness)
    }

    fn draw_saturation_value(&self, frame: &mut Frame) {
        let size = Size::new(WIDTH, SV_HEIGHT);
        let pure = Color::from(Rgb::from(Hsv {
            h: self.hsv.h,
            s: 1.0,
            v: 1.0,
        }));

        let saturation = Linear::new(Point::ORIGIN, Point::new(WIDTH, 0.0))
            .add_stop(0.0, self.fade(Color::WHITE))
            .add_stop(1.0, self.fade(pure));
        frame.fill_rectangle(Point::ORIGIN, size, saturation);

        let value = Linear::new(Point::ORIGIN, Point::new(0.0, SV_HEIGHT))
            .add_stop(0.0, self.fade(Color::TRANSPARENT))
            .add_stop(1.0, self.fade(Color::BLACK));
        frame.fill_rectangle(Point::ORIGIN, size, value);

        let marker = Point::new(self.hsv.s * WIDTH, (1.0 - self.hsv.v) * SV_HEIGHT);
        frame.stroke(
            &Path::circle(marker, MARKER_RADIUS),
            Stroke::default()
                .with_color(self.fade(Color::WHITE))
                .with_width(2.0),
        );
    }

    fn draw_hue(&self, frame: &mut Frame) {
        let hues = (0..=6u8).fold(
            Linear::new(Point::new(HUE_LEFT, ROW_Y), Point::new(HUE_RIGHT, ROW_Y)),
            |linear, sixth| {
                let hue = Rgb::from(Hsv {
                    h: f32::from(sixth) * 60.0,
                    s: 1.0,
                    v: 1.0,
                });
                linear.add_stop(f32::from(sixth) / 6.0, self.fade(hue.into()))
            },
        );
        frame.fill_rectangle(
            Point::new(HUE_LEFT, ROW_Y - HUE_HEIGHT / 2.0),
            Size::new(HUE_RIGHT - HUE_LEFT, HUE_HEIGHT),
            hues,
        );

        let marker = Point::new(
            (self.hsv.h / 360.0).mul_add(HUE_RIGHT - HUE_LEFT, HUE_LEFT),
            ROW_Y,
        );
        let marker = Path::circle(marker, MARKER_RADIUS);
        frame.fill(&marker, self.fade(Color::WHITE));
        frame.stroke(
            &marker,
            Stroke::default()
                .with_color(self.fade(Color::from_rgba(0.0, 0.0, 0.0, 0.3)))
                .with_width(1.0),
        );
    }

    fn draw_swatch(&self, frame: &mut Frame) {
        let swatch = Path::circle(Point::new(PADDING + SWATCH_RADIUS, ROW_Y), SWATCH_RADIUS);
        frame.fill(&swatch, self.fade(Rgb::from(self.hsv).into()));
        frame.stroke(
            &swatch,
            Stroke::default()
                .with_color(self.fade(Color::from_rgba(0.0, 0.0, 0.0, 0.1)))
                .with_width(1.0),
        );
    }
}

impl canvas::Program<Message> for PickerSurface {
    type State = Option<Area>;

    fn update(
        &self,
        state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        if !self.interactive {
            *state = None;
            return (event::Status::Ignored, None);
        }

        let Event::Mouse(event) = event else {
            return (event::Status::Ignored, None);
        };

        match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return (event::Status::Ignored, None);
                };

                *state = Area::at(position);

                // presses anywhere on the surface are swallowed, so they don't reach the overlay
                (
                    event::Status::Captured,
                    state.map(|area| Message::Picked(area.pick(position, self.hsv))),
                )
            }
            mouse::Event::CursorMoved { .. } => {
                let (Some(area), Some(position)) = (*state, cursor.position_from(bounds.position()))
                else {
                    return (event::Status::Ignored, None);
                };

                (
                    event::Status::Captured,
                    Some(Message::Picked(area.pick(position, self.hsv))),
                )
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if state.take().is_some() => {
                (event::Status::Captured, None)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        if self.openness > f32::EPSILON {
            frame.with_save(|frame| {
                frame.scale_nonuniform(Vector::new(1.0, self.openness));

                self.draw_saturation_value(frame);
                self.draw_hue(frame);
                self.draw_swatch(frame);
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Interaction {
        if !self.interactive {
            Interaction::default()
        } else if state.is_some() {
            Interaction::Grabbing
        } else if cursor.position_in(bounds).and_then(Area::at).is_some() {
            Interaction::Crosshair
        } else {
            Interaction::default()
        }
    }
}
