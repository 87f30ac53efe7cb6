//! Weft Behaviour - declarative component engine
//!
//! Attribute-driven reactive components: a registry of compiled component
//! classes, a per-instance lifecycle controller with rollback on render
//! failure, and frame-batched repaints. The host element and rendering
//! subtree come from `weft-dom`; templates are parsed by `weft-html`.

mod compose;
mod component;
mod dataset;
mod descriptor;
mod error;
mod lifecycle;
mod name_op;
mod registry;
mod scheduler;
pub mod validators;

pub use compose::compose;
pub use component::{ComponentBehaviour, RenderError, RenderOutcome};
pub use dataset::Dataset;
pub use descriptor::{
    AttrValue, AttributeSpec, CompiledAttribute, ParseFn, SerializeFn, ValidationError,
};
pub use error::BehaviourError;
pub use lifecycle::{ComponentInstance, LifecycleState};
pub use name_op::{camel_to_kebab, kebab_to_camel};
pub use registry::{ComponentClass, ComponentRegistry, RegistrationError};
pub use scheduler::{FrameClock, FrameRequest, RepaintScheduler};
