use crate::{
    gooey_back::{color::Hsv, Playback, Rgb, SoundId, SoundKind, Spring, SpringConfig},
    gooey_front::{
        sound_player::SoundPlayer,
        widget::{fade, picker_surface, PickerSurface},
    },
};
use iced::{
    widget::{canvas, column, container, mouse_area, text_input, Space},
    Background, Border, Element, Font,
    Length::Fill,
};
use std::{rc::Rc, time::Duration};

const OPENNESS: SpringConfig = SpringConfig::new(216.0, 17.0);
pub const HEX_ROW_HEIGHT: f32 = 36.0;
/// total height of the picker's view
pub const HEIGHT: f32 = picker_surface::HEIGHT + HEX_ROW_HEIGHT;

#[derive(Clone, Debug)]
pub enum Message {
    Picked(Hsv),
    HexInput(String),
    Close,
}

/// what the owner of the picker has to do after an update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Changed(Rgb),
    Close,
}

pub fn sound_for(open: bool) -> SoundId {
    SoundId::new(if open {
        SoundKind::Expand
    } else {
        SoundKind::Collapse
    })
}

#[derive(Debug)]
pub struct ColorPicker {
    is_open: bool,
    openness: Spring,
    sound_player: SoundPlayer,
    /// kept apart from the rgb color so hue and saturation survive achromatic colors
    hsv: Hsv,
    hex: String,
}

impl ColorPicker {
    pub fn new(playback: Rc<dyn Playback>, color: Rgb, is_open: bool) -> Self {
        let mut sound_player = SoundPlayer::new(playback);
        sound_player.sync(sound_for(is_open));

        Self {
            is_open,
            openness: Spring::new(if is_open { 1.0 } else { 0.0 }, OPENNESS),
            sound_player,
            hsv: Hsv::from(color),
            hex: color.to_string(),
        }
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
        self.openness.set_target(if is_open { 1.0 } else { 0.0 });
        self.sound_player.sync(sound_for(is_open));
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn color(&self) -> Rgb {
        self.hsv.into()
    }

    /// shows `color`, unless it's the color already shown
    pub fn set_color(&mut self, color: Rgb) {
        if self.color() != color {
            self.show(color);
            self.hex = color.to_string();
        }
    }

    fn show(&mut self, color: Rgb) {
        let hsv = Hsv::from(color);

        self.hsv = if hsv.v == 0.0 {
            Hsv {
                v: 0.0,
                ..self.hsv
            }
        } else if hsv.s == 0.0 {
            Hsv {
                h: self.hsv.h,
                ..hsv
            }
        } else {
            hsv
        };
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.openness.advance(elapsed);
    }

    pub fn update(&mut self, message: Message) -> Option<Action> {
        match message {
            Message::Picked(hsv) => {
                self.hsv = hsv;
                let color = self.color();
                self.hex = color.to_string();
                Some(Action::Changed(color))
            }
            Message::HexInput(hex) => {
                let parsed = hex.parse::<Rgb>().ok();
                self.hex = hex;

                parsed.map(|color| {
                    if self.color() != color {
                        self.show(color);
                    }
                    Action::Changed(color)
                })
            }
            Message::Close => Some(Action::Close),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let surface = canvas(PickerSurface::new(
            self.hsv,
            self.openness.value(),
            self.is_open,
        ))
        .width(picker_surface::WIDTH)
        .height(picker_surface::HEIGHT);

        let hex = self.hex_row_openness().map_or_else(
            || Space::with_height(HEX_ROW_HEIGHT).into(),
            |openness| self.hex_row(openness),
        );

        column![surface, hex]
            .width(picker_surface::WIDTH)
            .height(HEIGHT)
            .into()
    }

    /// how much of the hex row shows, while the picker is open or still folding away
    fn hex_row_openness(&self) -> Option<f32> {
        let openness = self.openness.value();
        (openness > 0.0).then_some(openness.min(1.0))
    }

    /// the hex field, squashed and faded with the surface and read-only once closing
    fn hex_row(&self, openness: f32) -> Element<'_, Message> {
        container(
            text_input("#rrggbb", &self.hex)
                .on_input_maybe(self.is_open.then_some(Message::HexInput))
                .font(Font::MONOSPACE)
                .size(14)
                .width(picker_surface::WIDTH)
                .style(move |theme, status| {
                    let style = text_input::default(theme, status);

                    text_input::Style {
                        background: match style.background {
                            Background::Color(color) => Background::Color(fade(color, openness)),
                            background => background,
                        },
                        border: Border {
                            color: fade(style.border.color, openness),
                            ..style.border
                        },
                        icon: fade(style.icon, openness),
                        placeholder: fade(style.placeholder, openness),
                        value: fade(style.value, openness),
                        selection: fade(style.selection, openness),
                    }
                }),
        )
        .center_y(HEX_ROW_HEIGHT * openness)
        .clip(true)
        .into()
    }

    /// a transparent layer over the whole window that closes the picker when clicked
    pub fn overlay<'a>() -> Element<'a, Message> {
        mouse_area(Space::new(Fill, Fill))
            .on_press(Message::Close)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gooey_front::sound_player::tests::Recorder;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    fn picker(is_open: bool) -> (ColorPicker, Rc<Recorder>) {
        let recorder = Rc::new(Recorder::default());
        (ColorPicker::new(recorder.clone(), GREEN, is_open), recorder)
    }

    #[test]
    fn opening_and_closing_play_sounds() {
        let (mut picker, recorder) = picker(false);
        assert!(recorder.0.borrow().is_empty());

        picker.set_open(true);
        picker.set_open(true);
        picker.set_open(false);

        assert_eq!(*recorder.0.borrow(), [sound_for(true), sound_for(false)]);
    }

    #[test]
    fn opening_unfolds_the_surface() {
        let (mut picker, _) = picker(false);
        assert!(picker.openness.is_at_rest());

        picker.set_open(true);
        assert!(!picker.openness.is_at_rest());

        for _ in 0..120 {
            picker.advance(crate::gooey_back::spring::FRAME);
        }
        assert!(picker.openness.is_at_rest());
        assert!((picker.openness.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn hex_row_folds_away_with_the_surface() {
        let (mut picker, _) = picker(true);
        assert_eq!(picker.hex_row_openness(), Some(1.0));

        picker.set_open(false);
        for _ in 0..3 {
            picker.advance(crate::gooey_back::spring::FRAME);
        }
        let openness = picker.hex_row_openness();
        assert!(matches!(openness, Some(openness) if openness > 0.0 && openness < 1.0));
        assert!(!picker.is_open());

        for _ in 0..120 {
            picker.advance(crate::gooey_back::spring::FRAME);
        }
        assert_eq!(picker.hex_row_openness(), None);
    }

    #[test]
    fn hex_row_unfolds_with_the_surface() {
        let (mut picker, _) = picker(false);
        assert_eq!(picker.hex_row_openness(), None);

        picker.set_open(true);
        picker.advance(crate::gooey_back::spring::FRAME);
        assert!(matches!(picker.hex_row_openness(), Some(openness) if openness < 1.0));
    }

    #[test]
    fn picking_reports_the_color() {
        let (mut picker, _) = picker(true);

        let action = picker.update(Message::Picked(Hsv {
            h: 0.0,
            s: 1.0,
            v: 1.0,
        }));

        assert_eq!(action, Some(Action::Changed(Rgb::new(255, 0, 0))));
        assert_eq!(picker.hex, "#ff0000");
    }

    #[test]
    fn partial_hex_is_kept_but_not_reported() {
        let (mut picker, _) = picker(true);

        assert_eq!(
            picker.update(Message::HexInput("#4a9".to_owned())),
            Some(Action::Changed(Rgb::new(0x44, 0xaa, 0x99)))
        );
        assert_eq!(picker.update(Message::HexInput("#4a90".to_owned())), None);
        assert_eq!(picker.hex, "#4a90");

        assert_eq!(
            picker.update(Message::HexInput("#4a90e2".to_owned())),
            Some(Action::Changed(Rgb::new(0x4a, 0x90, 0xe2)))
        );
    }

    #[test]
    fn own_color_does_not_reset_typed_hex() {
        let (mut picker, _) = picker(true);

        picker.update(Message::HexInput("0f0".to_owned()));
        picker.set_color(GREEN);
        assert_eq!(picker.hex, "0f0");

        picker.set_color(Rgb::new(1, 2, 3));
        assert_eq!(picker.hex, "#010203");
    }

    #[test]
    fn gray_keeps_the_hue() {
        let (mut picker, _) = picker(true);

        picker.set_color(Rgb::new(128, 128, 128));
        assert!((picker.hsv.h - 120.0).abs() < 1e-3);
        assert!(picker.hsv.s.abs() < f32::EPSILON);
    }

    #[test]
    fn black_keeps_hue_and_saturation() {
        let (mut picker, _) = picker(true);

        let action = picker.update(Message::Picked(Hsv {
            h: 120.0,
            s: 0.5,
            v: 0.0,
        }));
        assert_eq!(action, Some(Action::Changed(Rgb::new(0, 0, 0))));

        picker.set_color(Rgb::new(0, 0, 0));
        assert!((picker.hsv.s - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn close_is_reported() {
        let (mut picker, _) = picker(true);

        assert_eq!(picker.update(Message::Close), Some(Action::Close));
        assert!(picker.is_open());
    }
}
