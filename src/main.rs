mod config;
mod gooey_back;
mod gooey_front;
mod trace;

use gooey_front::Palette;
use iced::{application, Result};

fn main() -> Result {
    trace::setup();

    application("Gooey Palette", Palette::update, Palette::view)
        .subscription(Palette::subscription)
        .antialiasing(true)
        .run_with(Palette::create)
}
