//! Component Contract
//!
//! The static contract a concrete component class supplies: markup
//! template, style, observed attributes, attribute transforms, and the
//! lifecycle hooks. The engine drives everything else.

use weft_dom::{Fragment, HostElement};

use crate::dataset::Dataset;
use crate::descriptor::{AttributeSpec, ValidationError};

/// What the render hook decided about the artifact it populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderOutcome {
    /// Commit the artifact into the rendering subtree at the next frame
    #[default]
    Commit,
    /// Discard the artifact; the render was informational only and the
    /// currently visible content stays untouched
    Skip,
}

/// The render hook failed
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// A dataset read rejected the current attribute value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any other failure the hook reports
    #[error("render failed: {0}")]
    Failed(String),
}

impl RenderError {
    pub fn failed(message: impl Into<String>) -> Self {
        RenderError::Failed(message.into())
    }
}

/// Static contract and lifecycle hooks of a component class.
///
/// `template` is the only required member; everything else has the inert
/// default. Registration (`ComponentRegistry::define`) validates the static
/// members once per class, never per instance.
pub trait ComponentBehaviour {
    /// Static CSS text, appended after any template-embedded styles
    fn style() -> &'static str
    where
        Self: Sized,
    {
        ""
    }

    /// Static markup text; must trim to non-empty markup
    fn template() -> &'static str
    where
        Self: Sized;

    /// Attribute names whose host mutations drive the render pipeline
    fn observed_attributes() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }

    /// Per-attribute defaults and value transforms
    fn attributes_properties() -> Vec<AttributeSpec>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// One-time setup, called once per attach before defaults are applied
    /// and before the first render. Attribute values written here count as
    /// explicit and are never overwritten by declared defaults.
    fn init(&mut self, _host: &mut HostElement) {}

    /// Populate the freshly composed, detached artifact. Called exactly once
    /// per render attempt. Structural mutation must stay confined to the
    /// supplied artifact; the committed subtree is not reachable from here.
    fn render(
        &mut self,
        _artifact: &mut Fragment,
        _dataset: &Dataset<'_>,
    ) -> Result<RenderOutcome, RenderError> {
        Ok(RenderOutcome::Commit)
    }

    /// Teardown, called once per permanent detach
    fn finalize(&mut self) {}
}
