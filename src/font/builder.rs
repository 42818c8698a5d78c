//! Eager font construction with optional style overrides.

use std::sync::Arc;

use super::Font;
use super::style::{FontStyle, Slant};
use super::typeface::Typeface;

/// Builds a [`Font`] from an already-loaded typeface.
///
/// Weight and slant default to the typeface's own OS/2 values; each can be
/// overridden independently.
pub struct FontBuilder {
    typeface: Arc<dyn Typeface>,
    weight: Option<u16>,
    slant: Option<Slant>,
}

impl FontBuilder {
    pub fn new(typeface: Arc<dyn Typeface>) -> Self {
        Self {
            typeface,
            weight: None,
            slant: None,
        }
    }

    /// Override both weight and slant.
    pub fn style(mut self, style: FontStyle) -> Self {
        self.weight = Some(style.weight());
        self.slant = Some(style.slant());
        self
    }

    /// Override the weight; slant still comes from the typeface unless set.
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Override the slant; weight still comes from the typeface unless set.
    pub fn slant(mut self, slant: Slant) -> Self {
        self.slant = Some(slant);
        self
    }

    pub fn build(self) -> Arc<Font> {
        let weight = self.weight.unwrap_or_else(|| self.typeface.weight());
        let slant = self.slant.unwrap_or_else(|| self.typeface.slant());
        Arc::new(Font::from_typeface(
            self.typeface,
            FontStyle::new(weight, slant),
        ))
    }
}
