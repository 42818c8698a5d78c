//! Ordered font collections and style matching.

use std::sync::Arc;

use crate::font::{FakedFont, Font, FontFakery, FontStyle, Slant};

/// An ordered set of fonts registered together, e.g. one family's faces.
#[derive(Debug, Default)]
pub struct FontCollection {
    fonts: Vec<Arc<Font>>,
}

impl FontCollection {
    pub fn new(fonts: Vec<Arc<Font>>) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &[Arc<Font>] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Pick the font whose style is closest to `wanted` and the fakery needed
    /// to approximate the rest. Earlier fonts win ties. Does not load typefaces.
    pub fn closest_match(&self, wanted: FontStyle) -> Option<FakedFont<'_>> {
        let best = self
            .fonts
            .iter()
            .min_by_key(|font| match_score(wanted, font.style()))?;
        Some(FakedFont::new(best, compute_fakery(wanted, best.style())))
    }
}

/// Style distance: one point per 100 weight units, two for a slant mismatch.
fn match_score(wanted: FontStyle, actual: FontStyle) -> u32 {
    if wanted == actual {
        return 0;
    }
    let weight_distance =
        (i32::from(wanted.weight() / 100) - i32::from(actual.weight() / 100)).unsigned_abs();
    let slant_penalty = if wanted.slant() == actual.slant() { 0 } else { 2 };
    weight_distance + slant_penalty
}

fn compute_fakery(wanted: FontStyle, actual: FontStyle) -> FontFakery {
    let fake_bold = wanted.weight() >= 600
        && i32::from(wanted.weight()) - i32::from(actual.weight()) >= 200;
    let fake_italic = wanted.slant() == Slant::Italic && actual.slant() == Slant::Upright;
    FontFakery::new(fake_bold, fake_italic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{AxisTag, Typeface, weight};
    use std::any::Any;
    use std::collections::HashSet;

    #[derive(Debug)]
    struct StubTypeface;

    impl Typeface for StubTypeface {
        fn weight(&self) -> u16 {
            weight::NORMAL
        }
        fn slant(&self) -> Slant {
            Slant::Upright
        }
        fn supported_axes(&self) -> HashSet<AxisTag> {
            HashSet::new()
        }
        fn font_data(&self) -> &[u8] {
            &[]
        }
        fn face_index(&self) -> u32 {
            0
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn font(weight: u16, slant: Slant) -> Arc<Font> {
        Font::builder(Arc::new(StubTypeface))
            .style(FontStyle::new(weight, slant))
            .build()
    }

    #[test]
    fn test_empty_collection_has_no_match() {
        assert!(FontCollection::default().closest_match(FontStyle::default()).is_none());
    }

    #[test]
    fn test_exact_match_has_no_fakery() {
        let collection = FontCollection::new(vec![
            font(weight::NORMAL, Slant::Upright),
            font(weight::BOLD, Slant::Upright),
        ]);
        let matched = collection
            .closest_match(FontStyle::new(weight::BOLD, Slant::Upright))
            .unwrap();
        assert!(std::ptr::eq(matched.font, collection.fonts()[1].as_ref()));
        assert_eq!(matched.fakery, FontFakery::default());
    }

    #[test]
    fn test_fake_bold_and_italic_from_regular() {
        let collection = FontCollection::new(vec![font(weight::NORMAL, Slant::Upright)]);
        let matched = collection
            .closest_match(FontStyle::new(weight::BOLD, Slant::Italic))
            .unwrap();
        assert!(matched.fakery.is_fake_bold());
        assert!(matched.fakery.is_fake_italic());
    }

    #[test]
    fn test_medium_request_is_not_faked_bold() {
        let collection = FontCollection::new(vec![font(weight::NORMAL, Slant::Upright)]);
        let matched = collection
            .closest_match(FontStyle::new(weight::MEDIUM, Slant::Upright))
            .unwrap();
        assert!(!matched.fakery.is_fake_bold());
    }

    #[test]
    fn test_slant_outweighs_small_weight_difference() {
        let collection = FontCollection::new(vec![
            font(weight::NORMAL, Slant::Upright),
            font(weight::LIGHT, Slant::Italic),
        ]);
        let matched = collection
            .closest_match(FontStyle::new(weight::NORMAL, Slant::Italic))
            .unwrap();
        assert!(std::ptr::eq(matched.font, collection.fonts()[1].as_ref()));
        assert!(!matched.fakery.is_fake_italic());
    }

    #[test]
    fn test_ties_prefer_earlier_font() {
        let collection = FontCollection::new(vec![
            font(weight::LIGHT, Slant::Upright),
            font(weight::MEDIUM, Slant::Upright),
        ]);
        let matched = collection.closest_match(FontStyle::default()).unwrap();
        assert!(std::ptr::eq(matched.font, collection.fonts()[0].as_ref()));
    }
}
