//! System font lookup through fontdb.
//!
//! Both entry points resolve a family and style against a caller-owned
//! [`fontdb::Database`]. [`load_font`] reads the face immediately; [`lazy_font`]
//! takes the style from the database record and defers reading the file until
//! the font is first used.

use std::path::PathBuf;
use std::sync::Arc;

use fontdb::{Database, Family, Query};
use fontshelf_config::FailurePolicy;

use crate::error::FontError;
use crate::font::{Font, FontFile, FontStyle, Slant, Typeface, TypefaceLoader};

/// Load the best match for `family` and `style` as an eagerly built font.
///
/// The font's style comes from the loaded face's own metrics.
pub fn load_font(db: &Database, family: &str, style: FontStyle) -> Result<Arc<Font>, FontError> {
    let id = query_face(db, family, style)?;
    let path = db.face(id).and_then(|face| source_path(&face.source));

    let file = db
        .with_face_data(id, |data, index| {
            FontFile::from_shared(Arc::new(data.to_vec()), index, path.clone())
        })
        .ok_or_else(|| FontError::InvalidFontData {
            context: format!("face data for '{}' is unavailable", family),
        })??;

    log::info!("Loaded font '{}' ({:?})", family, file);
    Ok(Font::builder(Arc::new(file)).build())
}

/// Resolve `family` and `style` to a lazily loaded font.
///
/// Only the database record is consulted here; the face bytes are read on
/// first access to the font's typeface.
pub fn lazy_font(
    db: &Database,
    family: &str,
    style: FontStyle,
    failure_policy: FailurePolicy,
) -> Result<Arc<Font>, FontError> {
    let id = query_face(db, family, style)?;
    let face = db
        .face(id)
        .ok_or_else(|| FontError::FamilyNotFound(family.to_string()))?;

    let slant = match face.style {
        fontdb::Style::Normal => Slant::Upright,
        fontdb::Style::Italic | fontdb::Style::Oblique => Slant::Italic,
    };
    let face_style = FontStyle::new(face.weight.0, slant);
    let face_index = face.index;

    let loader: TypefaceLoader = match &face.source {
        fontdb::Source::Binary(data) => {
            let data = Arc::clone(data);
            Box::new(move || -> Result<Arc<dyn Typeface>, FontError> {
                let bytes: &[u8] = (*data).as_ref();
                Ok(Arc::new(FontFile::from_bytes(bytes.to_vec(), face_index)?))
            })
        }
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let path = path.clone();
            Box::new(move || -> Result<Arc<dyn Typeface>, FontError> {
                Ok(Arc::new(FontFile::from_path(&path, face_index)?))
            })
        }
    };

    Ok(Font::lazy_with_policy(face_style, loader, failure_policy))
}

fn query_face(db: &Database, family: &str, style: FontStyle) -> Result<fontdb::ID, FontError> {
    let families = [family_for_name(family)];
    let query = Query {
        families: &families,
        weight: fontdb::Weight(style.weight()),
        stretch: fontdb::Stretch::Normal,
        style: match style.slant() {
            Slant::Upright => fontdb::Style::Normal,
            Slant::Italic => fontdb::Style::Italic,
        },
    };
    db.query(&query).ok_or_else(|| {
        log::warn!(
            "Font family '{}' (weight {}, {:?}) not found",
            family,
            style.weight(),
            style.slant()
        );
        FontError::FamilyNotFound(family.to_string())
    })
}

/// Map CSS generic family keywords to fontdb's generic families.
fn family_for_name(name: &str) -> Family<'_> {
    match name {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

fn source_path(source: &fontdb::Source) -> Option<PathBuf> {
    match source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => Some(path.clone()),
        fontdb::Source::Binary(_) => None,
    }
}
