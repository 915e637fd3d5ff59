//! Scene of presence markers for the Hello World text.
//!
//! The scene is not real geometry. Each glyph box contributes
//! [`MARKERS_PER_BOX`] copies of its center point, and the shader only ever
//! asks whether the scene is empty. The scene is rebuilt from scratch every
//! frame and never mutated in place.

use hrt_math::Vec3;
use thiserror::Error;

use crate::glyph::Glyph;

/// Number of markers emitted per glyph box (one per would-be box corner).
pub const MARKERS_PER_BOX: usize = 8;

/// X coordinate of the first letter's origin.
const TEXT_START_X: f32 = -4.0;

/// Horizontal advance from one letter origin to the next.
const LETTER_ADVANCE: f32 = 1.0;

/// Extra advance inserted between words.
const WORD_GAP: f32 = 0.5;

const HELLO: [Glyph; 5] = [Glyph::H, Glyph::E, Glyph::L, Glyph::L, Glyph::O];
const WORLD: [Glyph; 5] = [Glyph::W, Glyph::O, Glyph::R, Glyph::L, Glyph::D];

/// Errors from laying out arbitrary text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Unsupported glyph {character:?} in word {word:?}")]
    UnsupportedGlyph { character: char, word: String },
}

/// Position-only stand-in for a piece of letter geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceMarker {
    pub position: Vec3,
}

/// A glyph placed at its origin in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub glyph: Glyph,
    pub origin: Vec3,
}

/// Place words left to right on the x axis, starting at x = -4.
///
/// Letters advance by 1.0; each new word adds a 0.5 gap, so the first
/// letter of the second word sits 1.5 after the last letter of the first.
pub fn layout_words(words: &[&[Glyph]]) -> Vec<PlacedGlyph> {
    let mut placed = Vec::new();
    let mut x = TEXT_START_X;

    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            x += WORD_GAP;
        }
        for &glyph in word.iter() {
            placed.push(PlacedGlyph {
                glyph,
                origin: Vec3::new(x, 0.0, 0.0),
            });
            x += LETTER_ADVANCE;
        }
    }

    placed
}

/// Ordered sequence of presence markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    markers: Vec<PresenceMarker>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build markers for already-resolved glyph words.
    pub fn from_glyph_words(words: &[&[Glyph]]) -> Self {
        let placed = layout_words(words);
        let box_count: usize = placed.iter().map(|p| p.glyph.boxes().len()).sum();
        let mut markers = Vec::with_capacity(box_count * MARKERS_PER_BOX);

        for p in &placed {
            for b in p.glyph.boxes() {
                let marker = PresenceMarker {
                    position: b.center(p.origin),
                };
                markers.extend(std::iter::repeat(marker).take(MARKERS_PER_BOX));
            }
        }

        Self { markers }
    }

    /// Build markers for arbitrary words over the supported glyph set.
    ///
    /// Letters are case-insensitive. Whitespace inside a word is not a
    /// glyph and is rejected like any other unsupported character.
    pub fn from_words(words: &[&str]) -> Result<Self, SceneError> {
        let resolved = words
            .iter()
            .map(|word| {
                word.chars()
                    .map(|c| {
                        Glyph::from_char(c).ok_or_else(|| SceneError::UnsupportedGlyph {
                            character: c,
                            word: word.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let slices: Vec<&[Glyph]> = resolved.iter().map(Vec::as_slice).collect();
        Ok(Self::from_glyph_words(&slices))
    }

    /// The fixed "HELLO" "WORLD" scene.
    pub fn hello_world() -> Self {
        Self::from_glyph_words(&[&HELLO, &WORLD])
    }

    /// All markers in build order.
    pub fn markers(&self) -> &[PresenceMarker] {
        &self.markers
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// True if the scene holds no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterate over markers in build order.
    pub fn iter(&self) -> impl Iterator<Item = &PresenceMarker> {
        self.markers.iter()
    }
}

/// Build the Hello World scene.
///
/// Pure and deterministic: every call returns an identical scene.
pub fn build_scene() -> Scene {
    let scene = Scene::hello_world();
    log::trace!("Built scene with {} markers", scene.len());
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_deterministic() {
        let a = build_scene();
        let b = build_scene();
        assert_eq!(a.len(), b.len());
        assert_eq!(a, b);

        // Still identical after many rebuilds
        let c = (0..10).map(|_| build_scene()).last().unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_hello_world_marker_count() {
        // H3 E4 L2 L2 O4 + W3 O4 R5 L2 D4 = 33 boxes
        let scene = build_scene();
        assert_eq!(scene.len(), 33 * MARKERS_PER_BOX);
        assert!(!scene.is_empty());
    }

    #[test]
    fn test_letter_origins() {
        let placed = layout_words(&[&HELLO, &WORLD]);
        let xs: Vec<f32> = placed.iter().map(|p| p.origin.x).collect();
        assert_eq!(
            xs,
            vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.5, 2.5, 3.5, 4.5, 5.5]
        );
        let letters: String = placed.iter().map(|p| p.glyph.as_char()).collect();
        assert_eq!(letters, "HELLOWORLD");
    }

    #[test]
    fn test_markers_are_duplicated_box_centers() {
        let scene = build_scene();
        let markers = scene.markers();

        // First box is the H stem centered at (-4, 0.5, 0)
        for m in &markers[..MARKERS_PER_BOX] {
            assert_eq!(m.position, Vec3::new(-4.0, 0.5, 0.0));
        }
        // Every group of eight is a single repeated point
        for chunk in markers.chunks(MARKERS_PER_BOX) {
            assert!(chunk.iter().all(|m| m.position == chunk[0].position));
        }
        // Last box is the D bowl at 5.5 + 0.25
        let last = markers[markers.len() - 1].position;
        assert_eq!(last, Vec3::new(5.75, 0.5, 0.0));
    }

    #[test]
    fn test_from_words_matches_hello_world() {
        let parsed = Scene::from_words(&["Hello", "World"]).unwrap();
        assert_eq!(parsed, build_scene());
    }

    #[test]
    fn test_from_words_rejects_unsupported_glyph() {
        let err = Scene::from_words(&["HELLO", "THERE"]).unwrap_err();
        assert_eq!(
            err,
            SceneError::UnsupportedGlyph {
                character: 'T',
                word: "THERE".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_scene() {
        assert!(Scene::new().is_empty());
        assert!(Scene::from_words(&[]).unwrap().is_empty());
        assert_eq!(Scene::from_glyph_words(&[]).iter().count(), 0);
    }
}
