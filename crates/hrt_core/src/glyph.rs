//! Block-letter glyph table.
//!
//! Every supported letter is a short, hand-authored list of boxes placed
//! relative to the letter's origin (bottom-left of the letter cell, text
//! plane at z = 0). The set of letters is closed: only the ones needed for
//! "HELLO WORLD" exist.

use hrt_math::Vec3;

/// Depth (z size) shared by every box.
const BOX_DEPTH: f32 = 0.1;

/// One box sub-part of a letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDescriptor {
    /// Box center relative to the letter origin
    pub offset: Vec3,
    /// Box extent (full width, height, depth)
    pub size: Vec3,
}

impl BoxDescriptor {
    /// Create a box in the text plane from a 2D offset and 2D size.
    pub const fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            offset: Vec3::new(offset_x, offset_y, 0.0),
            size: Vec3::new(width, height, BOX_DEPTH),
        }
    }

    /// Box center once the letter is placed at `origin`.
    #[inline]
    pub fn center(&self, origin: Vec3) -> Vec3 {
        origin + self.offset
    }
}

// Full-height stem on the left edge, shared by most letters.
const STEM: BoxDescriptor = BoxDescriptor::new(0.0, 0.5, 0.05, 0.5);

const H_BOXES: [BoxDescriptor; 3] = [
    STEM,
    BoxDescriptor::new(0.4, 0.5, 0.05, 0.5),
    BoxDescriptor::new(0.2, 0.5, 0.2, 0.05),
];

const E_BOXES: [BoxDescriptor; 4] = [
    STEM,
    BoxDescriptor::new(0.15, 0.9, 0.15, 0.05),
    BoxDescriptor::new(0.1, 0.5, 0.1, 0.05),
    BoxDescriptor::new(0.15, 0.1, 0.15, 0.05),
];

const L_BOXES: [BoxDescriptor; 2] = [
    STEM,
    BoxDescriptor::new(0.15, 0.1, 0.15, 0.05),
];

// Square ring: left, right, top, bottom
const O_BOXES: [BoxDescriptor; 4] = [
    BoxDescriptor::new(0.0, 0.5, 0.05, 0.4),
    BoxDescriptor::new(0.35, 0.5, 0.05, 0.4),
    BoxDescriptor::new(0.2, 0.9, 0.15, 0.05),
    BoxDescriptor::new(0.2, 0.1, 0.15, 0.05),
];

const W_BOXES: [BoxDescriptor; 3] = [
    STEM,
    BoxDescriptor::new(0.2, 0.3, 0.05, 0.3),
    BoxDescriptor::new(0.4, 0.5, 0.05, 0.5),
];

const R_BOXES: [BoxDescriptor; 5] = [
    STEM,
    BoxDescriptor::new(0.15, 0.9, 0.15, 0.05),
    BoxDescriptor::new(0.15, 0.5, 0.15, 0.05),
    BoxDescriptor::new(0.3, 0.7, 0.05, 0.2),
    // Leg
    BoxDescriptor::new(0.25, 0.3, 0.1, 0.05),
];

const D_BOXES: [BoxDescriptor; 4] = [
    STEM,
    BoxDescriptor::new(0.1, 0.9, 0.1, 0.05),
    BoxDescriptor::new(0.1, 0.1, 0.1, 0.05),
    BoxDescriptor::new(0.25, 0.5, 0.05, 0.4),
];

/// A supported block letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    H,
    E,
    L,
    O,
    W,
    R,
    D,
}

impl Glyph {
    /// All supported glyphs.
    pub const ALL: [Glyph; 7] = [
        Glyph::H,
        Glyph::E,
        Glyph::L,
        Glyph::O,
        Glyph::W,
        Glyph::R,
        Glyph::D,
    ];

    /// Look up the glyph for a character (case-insensitive).
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn from_char(c: char) -> Option<Glyph> {
        match c.to_ascii_uppercase() {
            'H' => Some(Glyph::H),
            'E' => Some(Glyph::E),
            'L' => Some(Glyph::L),
            'O' => Some(Glyph::O),
            'W' => Some(Glyph::W),
            'R' => Some(Glyph::R),
            'D' => Some(Glyph::D),
            _ => None,
        }
    }

    /// The letter this glyph draws.
    pub fn as_char(self) -> char {
        match self {
            Glyph::H => 'H',
            Glyph::E => 'E',
            Glyph::L => 'L',
            Glyph::O => 'O',
            Glyph::W => 'W',
            Glyph::R => 'R',
            Glyph::D => 'D',
        }
    }

    /// Boxes making up this glyph, relative to its origin.
    pub fn boxes(self) -> &'static [BoxDescriptor] {
        match self {
            Glyph::H => &H_BOXES,
            Glyph::E => &E_BOXES,
            Glyph::L => &L_BOXES,
            Glyph::O => &O_BOXES,
            Glyph::W => &W_BOXES,
            Glyph::R => &R_BOXES,
            Glyph::D => &D_BOXES,
        }
    }
}
