use crate::gooey_front::Message;
use iced::{
    widget::{button, text},
    Element, Font, Padding,
};

pub fn mix_button<'a>() -> Element<'a, Message> {
    button(text("MIX").font(Font::MONOSPACE).size(32))
        .padding(Padding {
            top: 8.0,
            right: 24.0,
            bottom: 8.0,
            left: 24.0,
        })
        .style(button::secondary)
        .on_press(Message::Mix)
        .into()
}
