use crate::gooey_back::color::{mix, Rgb};
use strum::Display;

pub const DEFAULT_LEFT: Rgb = Rgb::new(0xd0, 0x02, 0x1b);
pub const DEFAULT_RIGHT: Rgb = Rgb::new(0x4a, 0x90, 0xe2);

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum DotId {
    Left,
    Right,
    Mix,
}

impl DotId {
    /// the two dots that are drawn, in drawing order
    pub const SIDES: [Self; 2] = [Self::Left, Self::Right];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideDot {
    pub fill: Rgb,
    /// horizontal resting position, in view box units
    pub anchor: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixDot {
    pub fill: Rgb,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dots {
    pub left: SideDot,
    pub right: SideDot,
    pub mix: MixDot,
}

impl Dots {
    pub fn new(left: Rgb, right: Rgb) -> Self {
        Self {
            left: SideDot {
                fill: left,
                anchor: 80.0,
            },
            right: SideDot {
                fill: right,
                anchor: 240.0,
            },
            mix: MixDot {
                fill: mix(0.5, left, right),
                active: false,
            },
        }
    }

    pub fn fill(&self, id: DotId) -> Rgb {
        match id {
            DotId::Left => self.left.fill,
            DotId::Right => self.right.fill,
            DotId::Mix => self.mix.fill,
        }
    }

    fn fill_mut(&mut self, id: DotId) -> &mut Rgb {
        match id {
            DotId::Left => &mut self.left.fill,
            DotId::Right => &mut self.right.fill,
            DotId::Mix => &mut self.mix.fill,
        }
    }
}

/// where the palette is in its interaction cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// the picker is closed
    Idle,
    /// the picker is open on one of the side dots
    Editing(DotId),
    /// the picker is open on the blended dot
    EditingMixed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Editing(dot) => write!(f, "editing {dot}"),
            Self::EditingMixed => write!(f, "editing {}", DotId::Mix),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PaletteState {
    dots: Dots,
    active_dot: DotId,
    display_color_picker: bool,
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new(DEFAULT_LEFT, DEFAULT_RIGHT)
    }
}

impl PaletteState {
    pub fn new(left: Rgb, right: Rgb) -> Self {
        Self {
            dots: Dots::new(left, right),
            active_dot: DotId::Left,
            display_color_picker: false,
        }
    }

    pub fn dots(&self) -> &Dots {
        &self.dots
    }

    pub fn display_color_picker(&self) -> bool {
        self.display_color_picker
    }

    pub fn is_mixed(&self) -> bool {
        self.dots.mix.active
    }

    pub fn phase(&self) -> Phase {
        match (self.display_color_picker, self.active_dot) {
            (false, _) => Phase::Idle,
            (true, DotId::Mix) => Phase::EditingMixed,
            (true, dot) => Phase::Editing(dot),
        }
    }

    /// the fill a side dot is drawn with; both show the blend while mixed
    pub fn displayed_fill(&self, dot: DotId) -> Rgb {
        if self.is_mixed() {
            self.dots.mix.fill
        } else {
            self.dots.fill(dot)
        }
    }

    /// the fill the color picker is editing
    pub fn active_fill(&self) -> Rgb {
        self.dots.fill(self.active_dot)
    }

    pub fn handle_mix(&mut self) {
        let blend = &mut self.dots.mix;
        blend.active = !blend.active;

        if blend.active {
            blend.fill = mix(0.5, self.dots.left.fill, self.dots.right.fill);
            self.active_dot = DotId::Mix;
        } else {
            self.active_dot = DotId::Left;
        }
    }

    /// opens the picker on `dot`; while mixed the picker stays on the blended dot
    pub fn handle_select(&mut self, dot: DotId) {
        self.display_color_picker = true;

        if self.is_mixed() {
            self.active_dot = DotId::Mix;
        } else if dot != DotId::Mix {
            self.active_dot = dot;
        }
    }

    pub fn handle_change(&mut self, color: Rgb) {
        *self.dots.fill_mut(self.active_dot) = color;
    }

    pub fn handle_close(&mut self) {
        self.display_color_picker = false;
    }
}
