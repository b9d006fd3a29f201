use super::{goo::bridge, DotFrame, ViewBox, RADIUS};
use crate::{
    gooey_back::{color::mix, DotId},
    gooey_front::Message,
};
use iced::{
    mouse::{self, Cursor, Interaction},
    widget::canvas::{self, event, Event, Frame, Geometry},
    Color, Point, Rectangle, Renderer, Theme,
};

/// the two side dots, blended together by a gooey bridge whenever they get close
#[derive(Clone, Copy, Debug)]
pub struct Scene {
    /// drawn in order, so the last one ends up on top
    dots: [DotFrame; 2],
}

impl Scene {
    pub fn new(left: DotFrame, right: DotFrame) -> Self {
        Self {
            dots: [left, right],
        }
    }

    /// the topmost dot under `point`, in scene units
    fn hit(&self, point: Point) -> Option<DotId> {
        self.dots
            .iter()
            .rev()
            .find(|dot| dot.contains(point))
            .map(|dot| dot.id)
    }

    fn hovered(&self, bounds: Rectangle, cursor: Cursor) -> Option<DotId> {
        let view = ViewBox::fit(bounds.size());

        cursor
            .position_in(bounds)
            .and_then(|position| self.hit(view.to_view(position)))
    }
}

impl canvas::Program<Message> for Scene {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        let Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event else {
            return (event::Status::Ignored, None);
        };

        self.hovered(bounds, cursor)
            .map_or((event::Status::Ignored, None), |id| {
                (event::Status::Captured, Some(Message::SelectDot(id)))
            })
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
        let view = ViewBox::fit(bounds.size());
        let [left, right] = self.dots;

        if let Some(bridge) = bridge(left.center(), RADIUS, right.center(), RADIUS) {
            frame.fill(
                &bridge.map(|point| view.to_screen(point)).path(),
                Color::from(mix(0.5, left.fill, right.fill)),
            );
        }

        for dot in &self.dots {
            dot.draw(&mut frame, view);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Interaction {
        if self.hovered(bounds, cursor).is_some() {
            Interaction::Pointer
        } else {
            Interaction::default()
        }
    }
}
