//! Serializable font handles with lazy typeface materialization.
//!
//! A [`Font`] is built one of two ways:
//! - eagerly with [`FontBuilder`] from an already-loaded [`Typeface`]
//! - lazily with [`Font::lazy`] or [`Font::read_from`], holding only a style and
//!   a [`TypefaceLoader`] that runs on first access
//!
//! Both paths expose the same read-only API. Every accessor that needs the
//! typeface goes through one per-font lock, so the loader runs at most once per
//! successful materialization no matter how many threads race on first access.

mod builder;
mod codec;
mod fakery;
mod font_file;
mod shaping_base;
mod style;
mod typeface;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use fontshelf_buffer::{BufferReader, BufferWrite, BufferWriter};
use fontshelf_config::{FailurePolicy, MaterializationConfig};
use parking_lot::Mutex;

use crate::error::FontError;

pub use builder::FontBuilder;
pub use codec::{FileTypefaceCodec, TypefaceCodec};
pub use fakery::{FakedFont, FontFakery};
pub use font_file::FontFile;
pub use shaping_base::{ShapedGlyph, ShapingBase};
pub use style::{FontStyle, Slant, weight};
pub use typeface::{AxisTag, Typeface, TypefaceLoader};

/// Materialization state. Exactly one of loader or resolved typeface is held.
enum FontState {
    Unmaterialized {
        loader: TypefaceLoader,
    },
    Materialized {
        typeface: Arc<dyn Typeface>,
        base: Arc<ShapingBase>,
    },
    /// Only entered under [`FailurePolicy::Cache`]; the loader has been dropped.
    Failed {
        reason: String,
    },
}

/// A single font face with a fixed style.
///
/// Identity is the instance itself: two fonts built from the same inputs are
/// distinct, and `==` compares addresses.
pub struct Font {
    style: FontStyle,
    failure_policy: FailurePolicy,
    state: Mutex<FontState>,
}

impl Font {
    /// Start an eager build from a loaded typeface.
    pub fn builder(typeface: Arc<dyn Typeface>) -> FontBuilder {
        FontBuilder::new(typeface)
    }

    pub(crate) fn from_typeface(typeface: Arc<dyn Typeface>, style: FontStyle) -> Self {
        let base = Arc::new(ShapingBase::new(Arc::clone(&typeface)));
        Self {
            style,
            failure_policy: FailurePolicy::default(),
            state: Mutex::new(FontState::Materialized { typeface, base }),
        }
    }

    /// Create a font whose typeface is loaded on first access.
    ///
    /// The loader is not invoked here. Failed loads are retried on the next access.
    pub fn lazy(style: FontStyle, loader: TypefaceLoader) -> Arc<Self> {
        Self::lazy_with_policy(style, loader, FailurePolicy::default())
    }

    pub fn lazy_with_policy(
        style: FontStyle,
        loader: TypefaceLoader,
        failure_policy: FailurePolicy,
    ) -> Arc<Self> {
        Arc::new(Self {
            style,
            failure_policy,
            state: Mutex::new(FontState::Unmaterialized { loader }),
        })
    }

    /// Create a lazy font with the failure policy from `config`.
    pub fn lazy_from_config(
        style: FontStyle,
        loader: TypefaceLoader,
        config: &MaterializationConfig,
    ) -> Arc<Self> {
        Self::lazy_with_policy(style, loader, config.failure_policy)
    }

    /// Decode a font record: the style, then the codec's typeface payload.
    ///
    /// The typeface itself is not loaded until first access.
    pub fn read_from(
        reader: &mut BufferReader<'_>,
        codec: &dyn TypefaceCodec,
    ) -> Result<Arc<Self>, FontError> {
        Self::read_from_with_policy(reader, codec, FailurePolicy::default())
    }

    pub fn read_from_with_policy(
        reader: &mut BufferReader<'_>,
        codec: &dyn TypefaceCodec,
        failure_policy: FailurePolicy,
    ) -> Result<Arc<Self>, FontError> {
        let style = FontStyle::read_from(reader);
        let loader = codec.read_typeface(reader)?;
        Ok(Self::lazy_with_policy(style, loader, failure_policy))
    }

    /// Decode a font record using the failure policy from `config`.
    pub fn read_from_config(
        reader: &mut BufferReader<'_>,
        codec: &dyn TypefaceCodec,
        config: &MaterializationConfig,
    ) -> Result<Arc<Self>, FontError> {
        Self::read_from_with_policy(reader, codec, config.failure_policy)
    }

    /// Encode the style followed by the codec's typeface payload.
    ///
    /// Materializes the typeface if it has not been loaded yet.
    pub fn write_to(
        &self,
        writer: &mut BufferWriter<'_>,
        codec: &dyn TypefaceCodec,
    ) -> Result<(), FontError> {
        self.style.write_to(writer);
        let typeface = self.typeface()?;
        codec.write_typeface(writer, typeface.as_ref())
    }

    /// Measure, allocate and write this font's record.
    pub fn encode(&self, codec: &dyn TypefaceCodec) -> Result<Vec<u8>, FontError> {
        fontshelf_buffer::encode_with(|writer| self.write_to(writer, codec))
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// The resolved typeface, loading it on first call.
    pub fn typeface(&self) -> Result<Arc<dyn Typeface>, FontError> {
        self.ensure_materialized().map(|(typeface, _)| typeface)
    }

    /// The shaping base derived from the resolved typeface.
    pub fn base_font(&self) -> Result<Arc<ShapingBase>, FontError> {
        self.ensure_materialized().map(|(_, base)| base)
    }

    /// Variation axes of the resolved typeface.
    pub fn supported_axes(&self) -> Result<HashSet<AxisTag>, FontError> {
        Ok(self.typeface()?.supported_axes())
    }

    /// Whether the typeface has been resolved. Never triggers a load.
    pub fn is_materialized(&self) -> bool {
        matches!(*self.state.lock(), FontState::Materialized { .. })
    }

    fn ensure_materialized(&self) -> Result<(Arc<dyn Typeface>, Arc<ShapingBase>), FontError> {
        let mut state = self.state.lock();
        let loaded = match &mut *state {
            FontState::Materialized { typeface, base } => {
                return Ok((Arc::clone(typeface), Arc::clone(base)));
            }
            FontState::Failed { reason } => {
                log::debug!("Skipping load for {:?}: cached failure", self.style);
                return Err(FontError::PreviouslyFailed(reason.clone()));
            }
            FontState::Unmaterialized { loader } => loader(),
        };

        match loaded {
            Ok(typeface) => {
                let base = Arc::new(ShapingBase::new(Arc::clone(&typeface)));
                log::debug!(
                    "Materialized typeface for weight {} {:?}",
                    self.style.weight(),
                    self.style.slant()
                );
                *state = FontState::Materialized {
                    typeface: Arc::clone(&typeface),
                    base: Arc::clone(&base),
                };
                Ok((typeface, base))
            }
            Err(err) => {
                log::warn!(
                    "Typeface load failed for weight {} {:?} (policy: {}): {}",
                    self.style.weight(),
                    self.style.slant(),
                    self.failure_policy.display_name(),
                    err
                );
                if self.failure_policy == FailurePolicy::Cache {
                    *state = FontState::Failed {
                        reason: err.to_string(),
                    };
                }
                Err(err)
            }
        }
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Font {}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.state.lock() {
            FontState::Unmaterialized { .. } => "unmaterialized",
            FontState::Materialized { .. } => "materialized",
            FontState::Failed { .. } => "failed",
        };
        f.debug_struct("Font")
            .field("style", &self.style)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubTypeface;

    impl Typeface for StubTypeface {
        fn weight(&self) -> u16 {
            weight::BOLD
        }
        fn slant(&self) -> Slant {
            Slant::Italic
        }
        fn supported_axes(&self) -> HashSet<AxisTag> {
            HashSet::from([AxisTag::WEIGHT])
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

    fn counting_loader(calls: Arc<AtomicUsize>, fail: bool) -> TypefaceLoader {
        Box::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            if fail {
                Err(FontError::LoadFailed("stub loader".to_string()))
            } else {
                Ok(Arc::new(StubTypeface) as Arc<dyn Typeface>)
            }
        })
    }

    #[test]
    fn test_lazy_font_defers_loader() {
        let calls = Arc::new(AtomicUsize::new(0));
        let font = Font::lazy(FontStyle::default(), counting_loader(calls.clone(), false));
        assert!(!font.is_materialized());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(font.style(), FontStyle::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let axes = font.supported_axes().unwrap();
        assert!(axes.contains(&AxisTag::WEIGHT));
        assert!(font.is_materialized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_typeface_and_base_share_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let font = Font::lazy(FontStyle::default(), counting_loader(calls.clone(), false));
        let base = font.base_font().unwrap();
        let typeface = font.typeface().unwrap();
        assert!(Arc::ptr_eq(base.typeface(), &typeface));
        assert!(Arc::ptr_eq(&font.base_font().unwrap(), &base));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retry_policy_invokes_loader_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let font = Font::lazy(FontStyle::default(), counting_loader(calls.clone(), true));
        assert!(matches!(font.typeface(), Err(FontError::LoadFailed(_))));
        assert!(matches!(font.typeface(), Err(FontError::LoadFailed(_))));
        assert!(!font.is_materialized());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_policy_remembers_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let font = Font::lazy_with_policy(
            FontStyle::default(),
            counting_loader(calls.clone(), true),
            FailurePolicy::Cache,
        );
        assert!(matches!(font.typeface(), Err(FontError::LoadFailed(_))));
        match font.base_font() {
            Err(FontError::PreviouslyFailed(reason)) => assert!(reason.contains("stub loader")),
            other => panic!("expected cached failure, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(format!("{:?}", font).contains("failed"));
    }

    #[test]
    fn test_lazy_from_config_uses_configured_policy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = MaterializationConfig {
            failure_policy: FailurePolicy::Cache,
        };
        let font = Font::lazy_from_config(
            FontStyle::default(),
            counting_loader(calls.clone(), true),
            &config,
        );
        assert_eq!(font.failure_policy(), FailurePolicy::Cache);
        assert!(font.typeface().is_err());
        assert!(matches!(font.typeface(), Err(FontError::PreviouslyFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_font_identity() {
        let a = Font::builder(Arc::new(StubTypeface)).build();
        let b = Font::builder(Arc::new(StubTypeface)).build();
        assert_eq!(*a, *a);
        assert_ne!(*a, *b);
        assert_eq!(a.style(), b.style());
    }
}
