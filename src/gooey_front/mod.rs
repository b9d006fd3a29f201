mod button;
mod color_picker;
mod sound_player;
mod widget;

use crate::{
    config::Config,
    gooey_back::{AudioRoot, DotId, PaletteState, Playback, Rgb},
};
use button::mix_button;
use color_picker::{sound_for, Action, ColorPicker};
use iced::{
    widget::{canvas, column, container, Space, Stack},
    window::frames,
    Alignment::Center,
    Element,
    Length::Fill,
    Subscription, Task,
};
use log::{debug, info};
use std::{rc::Rc, time::Instant};
use widget::{Dot, Scene};

const SCENE_WIDTH: f32 = 640.0;
const SCENE_HEIGHT: f32 = 320.0;
const BUTTON_SLOT_HEIGHT: f32 = 112.0;

/// the layers of the window, bottom to top
///
/// presses go to the topmost layer that captures them, so the dismiss overlay
/// only sees the ones that neither the picker nor the content took
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    Overlay,
    Content,
    Picker,
}

impl Layer {
    fn stack(picker_open: bool) -> impl DoubleEndedIterator<Item = Self> {
        [Self::Overlay, Self::Content, Self::Picker]
            .into_iter()
            .filter(move |&layer| picker_open || layer != Self::Overlay)
    }
}

/// two dots that can be recolored, and mixed into one gooey blob
#[derive(Debug)]
pub struct Palette {
    state: PaletteState,
    dots: [Dot; 2],
    color_picker: ColorPicker,
    started: Instant,
    now: Instant,
}

#[derive(Clone, Debug)]
pub enum Message {
    Mix,
    SelectDot(DotId),
    ColorPicker(color_picker::Message),
    Tick(Instant),
}

impl Palette {
    pub fn create() -> (Self, Task<Message>) {
        let config = Config::read();
        info!("starting with {} and {}", config.left, config.right);

        let audio_root = if config.muted {
            AudioRoot::muted(config.sounds)
        } else {
            AudioRoot::new(config.sounds, config.volume)
        };

        audio_root.preload(sound_for(true));
        audio_root.preload(sound_for(false));

        (
            Self::new(config.left, config.right, Rc::new(audio_root)),
            Task::none(),
        )
    }

    pub fn new(left: Rgb, right: Rgb, playback: Rc<dyn Playback>) -> Self {
        let state = PaletteState::new(left, right);
        let anchors = [state.dots().left.anchor, state.dots().right.anchor];
        let now = Instant::now();

        Self {
            dots: [0, 1].map(|index| {
                let id = DotId::SIDES[index];
                Dot::new(id, index as u8, anchors[index], state.displayed_fill(id))
            }),
            color_picker: ColorPicker::new(
                playback,
                state.active_fill(),
                state.display_color_picker(),
            ),
            state,
            started: now,
            now,
        }
    }

    pub fn update(&mut self, message: Message) {
        let phase = self.state.phase();

        match message {
            Message::Mix => self.state.handle_mix(),
            Message::SelectDot(dot) => self.state.handle_select(dot),
            Message::ColorPicker(message) => match self.color_picker.update(message) {
                Some(Action::Changed(color)) => self.state.handle_change(color),
                Some(Action::Close) => self.state.handle_close(),
                None => {}
            },
            Message::Tick(now) => {
                let elapsed = now.saturating_duration_since(self.now);
                self.now = now;

                for dot in &mut self.dots {
                    dot.advance(elapsed);
                }
                self.color_picker.advance(elapsed);

                return;
            }
        }

        if phase != self.state.phase() {
            debug!("{phase} -> {}", self.state.phase());
        }

        self.sync();
    }

    /// pushes the palette state into the animated parts
    fn sync(&mut self) {
        let mixed = self.state.is_mixed();
        for dot in &mut self.dots {
            dot.retarget(mixed);
            dot.set_fill(self.state.displayed_fill(dot.id()));
        }

        self.color_picker.set_open(self.state.display_color_picker());
        self.color_picker.set_color(self.state.active_fill());
    }

    pub fn view(&self) -> Element<'_, Message> {
        Layer::stack(self.color_picker.is_open())
            .fold(Stack::new().width(Fill).height(Fill), |layers, layer| {
                layers.push(self.layer(layer))
            })
            .into()
    }

    fn layer(&self, layer: Layer) -> Element<'_, Message> {
        match layer {
            Layer::Overlay => ColorPicker::overlay().map(Message::ColorPicker),
            Layer::Content => container(self.content()).center(Fill).into(),
            Layer::Picker => container(self.picker()).center(Fill).into(),
        }
    }

    fn content(&self) -> Element<'_, Message> {
        let since_start = self.now.saturating_duration_since(self.started);
        let [left, right] = self.dots.map(|dot| dot.frame(since_start));

        column![
            canvas(Scene::new(left, right))
                .width(SCENE_WIDTH)
                .height(SCENE_HEIGHT),
            container(mix_button())
                .center_x(SCENE_WIDTH)
                .center_y(BUTTON_SLOT_HEIGHT),
            Space::with_height(color_picker::HEIGHT),
        ]
        .width(SCENE_WIDTH)
        .align_x(Center)
        .into()
    }

    /// same slots as the content, so the picker lands right below the button
    fn picker(&self) -> Element<'_, Message> {
        column![
            Space::with_height(SCENE_HEIGHT),
            Space::with_height(BUTTON_SLOT_HEIGHT),
            self.color_picker.view().map(Message::ColorPicker),
        ]
        .width(SCENE_WIDTH)
        .align_x(Center)
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        frames().map(Message::Tick)
    }
}
