//! Lifecycle Controller
//!
//! Orchestrates one component instance across attach/detach and attribute
//! mutation notifications: `Unattached -> Initializing -> Idle <-> Rendering
//! <-> RollingBack`, with terminal `Disposed`.
//!
//! Rollback re-entry is synchronous: writing the previous value back inside
//! the failure path re-enters the notification pipeline before the outer
//! call returns. The recursion is bounded by the per-name rollback record,
//! never by call-stack depth - one original attempt plus one recovery
//! attempt, and a second failure for the same name is fatal.

use std::collections::HashSet;
use std::sync::Arc;

use weft_dom::{ErrorEvent, Fragment, HostElement, ShadowRootMode};

use crate::component::{ComponentBehaviour, RenderError, RenderOutcome};
use crate::compose;
use crate::dataset::Dataset;
use crate::descriptor::AttrValue;
use crate::error::BehaviourError;
use crate::registry::ComponentClass;
use crate::scheduler::{FrameClock, RepaintScheduler};

/// Lifecycle state of a component instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Not yet in the document
    Unattached,
    /// Shadow subtree created, init hook and defaults in progress;
    /// notifications are ignored until this completes
    Initializing,
    /// Ready for notifications
    Idle,
    /// Render hook executing against a fresh artifact
    Rendering,
    /// A failed change is being reverted; the nested re-entry is expected
    RollingBack,
    /// Permanently detached; terminal
    Disposed,
}

/// Which notification triggered a render attempt
#[derive(Debug, Clone, Copy)]
enum Change<'a> {
    /// Synthetic notification fired once initialization completes, forcing
    /// an initial render even when no attribute differs from its default
    Initial,
    /// A real host attribute mutation (the new value is already written)
    Attribute { name: &'a str, old: Option<&'a str> },
}

/// One live component instance, governing exactly one host element
pub struct ComponentInstance<C: ComponentBehaviour> {
    component: C,
    class: Arc<ComponentClass>,
    host: HostElement,
    state: LifecycleState,
    rollback: HashSet<String>,
    scheduler: RepaintScheduler,
}

impl<C: ComponentBehaviour> ComponentInstance<C> {
    /// Create an unattached instance of a registered class
    pub fn new(component: C, class: Arc<ComponentClass>, clock: FrameClock) -> Self {
        let host = HostElement::new(class.tag_name());
        Self {
            component,
            class,
            host,
            state: LifecycleState::Unattached,
            rollback: HashSet::new(),
            scheduler: RepaintScheduler::new(clock),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn class(&self) -> &ComponentClass {
        &self.class
    }

    /// The governed host element
    pub fn host(&self) -> &HostElement {
        &self.host
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Typed read view over the host's declared attributes
    pub fn dataset(&self) -> Dataset<'_> {
        Dataset::new(&self.host, self.class.as_ref())
    }

    /// Read a declared property through the dataset
    pub fn get_data(&self, prop: &str) -> Result<AttrValue, BehaviourError> {
        Ok(self.dataset().get(prop)?)
    }

    /// Whether an accepted artifact is waiting for the next frame tick
    pub fn has_pending_repaint(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Drain diagnostic events dispatched onto the host
    pub fn take_events(&mut self) -> Vec<ErrorEvent> {
        self.host.take_events()
    }

    /// Host element entered the document.
    ///
    /// First attach (or attach after disposal) creates the shadow subtree,
    /// runs the init hook, applies declared defaults to absent attributes,
    /// then fires the synthetic initial notification. Re-attach of a live
    /// instance re-fires only the synthetic notification.
    pub fn attach(&mut self) -> Result<(), BehaviourError> {
        match self.state {
            LifecycleState::Unattached | LifecycleState::Disposed => {
                tracing::debug!(target: "weft::lifecycle", tag = self.class.tag_name(), "initializing");
                self.state = LifecycleState::Initializing;
                self.host.attach_shadow(ShadowRootMode::Open);
                self.component.init(&mut self.host);
                self.apply_defaults();
                self.state = LifecycleState::Idle;
                self.process_change(Change::Initial)
            }
            LifecycleState::Idle => self.process_change(Change::Initial),
            _ => Ok(()),
        }
    }

    /// Host element permanently left the document. Cancels the pending
    /// repaint job, clears the rendering subtree, and runs the finalize
    /// hook. Terminal: only a fresh attach revives the instance.
    pub fn detach(&mut self) {
        if matches!(self.state, LifecycleState::Unattached | LifecycleState::Disposed) {
            return;
        }
        tracing::debug!(target: "weft::lifecycle", tag = self.class.tag_name(), "disposing");
        self.scheduler.cancel();
        if let Some(shadow) = self.host.shadow_root_mut() {
            shadow.clear();
        }
        self.component.finalize();
        self.rollback.clear();
        self.state = LifecycleState::Disposed;
    }

    /// Frame tick: commit the pending artifact, if any, into the shadow
    /// subtree (clear-then-insert, never a diff)
    pub fn animation_frame(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        if let Some(artifact) = self.scheduler.take_commit() {
            tracing::trace!(target: "weft::lifecycle", tag = self.class.tag_name(), "committing artifact");
            if let Some(shadow) = self.host.shadow_root_mut() {
                shadow.replace_content(artifact);
            }
        }
    }

    /// Write a raw attribute on the host. Observed attributes re-enter the
    /// notification pipeline; the write itself always lands.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), BehaviourError> {
        let old = self.host.set_attribute_raw(name, value);
        if self.class.is_observed(name) && old.as_deref() != Some(value) {
            self.process_change(Change::Attribute {
                name,
                old: old.as_deref(),
            })?;
        }
        Ok(())
    }

    /// Remove a raw attribute from the host, notifying if observed
    pub fn remove_attribute(&mut self, name: &str) -> Result<(), BehaviourError> {
        let Some(old) = self.host.remove_attribute_raw(name) else {
            return Ok(());
        };
        if self.class.is_observed(name) {
            self.process_change(Change::Attribute {
                name,
                old: Some(old.as_str()),
            })?;
        }
        Ok(())
    }

    /// Write a declared property through the dataset: the serialize
    /// transform runs first, then the raw write goes through the normal
    /// pipeline - dataset writes never bypass the lifecycle controller.
    pub fn set_data(&mut self, prop: &str, value: AttrValue) -> Result<(), BehaviourError> {
        let attr = self
            .class
            .attribute_by_prop(prop)
            .ok_or_else(|| crate::descriptor::ValidationError::Undeclared(prop.to_string()))?;
        let name = attr.name.clone();
        let raw = match &attr.serialize {
            Some(serialize) => serialize(&value)?,
            None => value.to_raw(),
        };
        self.set_attribute(&name, &raw)
    }

    /// Apply declared defaults to attributes without an explicit value.
    /// Runs during `Initializing`, before the synthetic notification, so no
    /// change notification is processed before every default is in place.
    fn apply_defaults(&mut self) {
        let class = self.class.clone();
        for attr in class.attributes() {
            if let Some(default) = &attr.default {
                if !self.host.has_attribute(&attr.name) {
                    self.host.set_attribute_raw(&attr.name, default);
                }
            }
        }
    }

    /// Process one change notification through the render pipeline
    fn process_change(&mut self, change: Change<'_>) -> Result<(), BehaviourError> {
        match self.state {
            LifecycleState::Idle | LifecycleState::RollingBack => {}
            _ => {
                // Not ready (or already disposed): notification is dropped
                tracing::trace!(target: "weft::lifecycle", state = ?self.state, "notification ignored");
                return Ok(());
            }
        }

        self.state = LifecycleState::Rendering;
        let result = self.render_once();
        match result {
            Ok(accepted) => {
                self.state = LifecycleState::Idle;
                if let Change::Attribute { name, .. } = change {
                    // Also clears a stale entry left by a recovered failure
                    self.rollback.remove(name);
                }
                if let Some(artifact) = accepted {
                    self.scheduler.submit(artifact);
                }
                Ok(())
            }
            Err(err) => self.handle_render_failure(change, err),
        }
    }

    /// Compose a fresh artifact and invoke the render hook exactly once.
    /// Returns the artifact when the hook accepted it for commit.
    fn render_once(&mut self) -> Result<Option<Fragment>, RenderError> {
        let mut artifact = compose::compose(self.class.template(), self.class.style())
            .map_err(|e| RenderError::failed(format!("template composition failed: {e}")))?;
        let dataset = Dataset::new(&self.host, self.class.as_ref());
        match self.component.render(&mut artifact, &dataset)? {
            RenderOutcome::Commit => Ok(Some(artifact)),
            RenderOutcome::Skip => Ok(None),
        }
    }

    /// Rollback controller: decide between recovery and fatal escalation
    fn handle_render_failure(
        &mut self,
        change: Change<'_>,
        err: RenderError,
    ) -> Result<(), BehaviourError> {
        let Change::Attribute { name, old } = change else {
            // Initial render: no prior value to revert to
            self.state = LifecycleState::Idle;
            let fatal = BehaviourError::InitialRender { source: err };
            self.host
                .dispatch_error(ErrorEvent::new("Failed initial render of element", fatal.to_string()));
            tracing::error!(target: "weft::lifecycle", tag = self.class.tag_name(), %fatal, "initial render failed");
            return Err(fatal);
        };

        self.host.dispatch_error(ErrorEvent::new(
            format!("Failed to render element on attribute <{name}> change"),
            err.to_string(),
        ));

        if self.rollback.contains(name) {
            // The recovery render itself failed; the displayed state cannot
            // be reconciled with the declared attribute state
            self.rollback.remove(name);
            self.state = LifecycleState::Idle;
            let fatal = BehaviourError::UnrecoverableState {
                attribute: name.to_string(),
                source: err,
            };
            tracing::error!(target: "weft::lifecycle", tag = self.class.tag_name(), %fatal, "rollback failed");
            return Err(fatal);
        }

        tracing::warn!(
            target: "weft::lifecycle",
            tag = self.class.tag_name(),
            attribute = name,
            "render failed, rolling back"
        );
        self.rollback.insert(name.to_string());
        self.state = LifecycleState::RollingBack;
        // Synchronous write: re-enters the pipeline with a nested render
        // attempt for the same name, whose outcome decides
        let outcome = self.write_back(name, old);
        self.rollback.remove(name);
        if self.state != LifecycleState::Disposed {
            self.state = LifecycleState::Idle;
        }
        outcome
    }

    /// Restore an attribute's previous raw value on the host
    fn write_back(&mut self, name: &str, old: Option<&str>) -> Result<(), BehaviourError> {
        let failing = self.host.get_attribute(name).map(str::to_string);
        match old {
            Some(value) => {
                self.host.set_attribute_raw(name, value);
            }
            None => {
                self.host.remove_attribute_raw(name);
            }
        }
        self.process_change(Change::Attribute {
            name,
            old: failing.as_deref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AttributeSpec;
    use crate::registry::ComponentRegistry;
    use crate::validators;

    #[derive(Default)]
    struct Marker {
        init_calls: usize,
        render_calls: usize,
        finalize_calls: usize,
    }

    impl ComponentBehaviour for Marker {
        fn template() -> &'static str {
            "<hr />"
        }
        fn observed_attributes() -> &'static [&'static str] {
            &["hour"]
        }
        fn attributes_properties() -> Vec<AttributeSpec> {
            vec![AttributeSpec::new("hour")
                .with_default("9")
                .with_parse_fn(validators::hour())]
        }
        fn init(&mut self, _host: &mut HostElement) {
            self.init_calls += 1;
        }
        fn render(
            &mut self,
            _artifact: &mut Fragment,
            dataset: &Dataset<'_>,
        ) -> Result<RenderOutcome, RenderError> {
            self.render_calls += 1;
            dataset.get("hour")?;
            Ok(RenderOutcome::Commit)
        }
        fn finalize(&mut self) {
            self.finalize_calls += 1;
        }
    }

    fn instance() -> ComponentInstance<Marker> {
        let mut registry = ComponentRegistry::new();
        let class = registry.define::<Marker>("TestMarker").unwrap();
        ComponentInstance::new(Marker::default(), class, FrameClock::new())
    }

    #[test]
    fn test_attach_runs_init_defaults_and_initial_render() {
        let mut el = instance();
        assert_eq!(el.state(), LifecycleState::Unattached);

        el.attach().unwrap();

        assert_eq!(el.state(), LifecycleState::Idle);
        assert_eq!(el.component().init_calls, 1);
        assert_eq!(el.component().render_calls, 1);
        assert_eq!(el.host().get_attribute("hour"), Some("9"));
        assert!(el.has_pending_repaint());
    }

    #[test]
    fn test_detach_is_terminal_until_fresh_attach() {
        let mut el = instance();
        el.attach().unwrap();
        el.detach();

        assert_eq!(el.state(), LifecycleState::Disposed);
        assert_eq!(el.component().finalize_calls, 1);

        // Notifications after disposal are dropped
        el.set_attribute("hour", "12").unwrap();
        assert_eq!(el.component().render_calls, 1);

        // Reattach treats the instance as fresh
        el.attach().unwrap();
        assert_eq!(el.state(), LifecycleState::Idle);
        assert_eq!(el.component().init_calls, 2);
    }

    #[test]
    fn test_reattach_live_instance_refires_synthetic_only() {
        let mut el = instance();
        el.attach().unwrap();
        el.attach().unwrap();

        assert_eq!(el.component().init_calls, 1);
        assert_eq!(el.component().render_calls, 2);
    }

    #[test]
    fn test_unchanged_value_never_renders() {
        let mut el = instance();
        el.attach().unwrap();
        let before = el.component().render_calls;

        el.set_attribute("hour", "9").unwrap();
        assert_eq!(el.component().render_calls, before);
    }

    #[test]
    fn test_unobserved_attribute_writes_silently() {
        let mut el = instance();
        el.attach().unwrap();
        let before = el.component().render_calls;

        el.set_attribute("title", "morning").unwrap();
        assert_eq!(el.host().get_attribute("title"), Some("morning"));
        assert_eq!(el.component().render_calls, before);
    }

    #[test]
    fn test_set_data_serializes_and_notifies() {
        let mut el = instance();
        el.attach().unwrap();

        el.set_data("hour", AttrValue::Int(14)).unwrap();
        assert_eq!(el.host().get_attribute("hour"), Some("14"));
        assert_eq!(el.component().render_calls, 2);
    }
}
