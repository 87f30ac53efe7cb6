//! Hour marker component walkthrough
//!
//! Defines a small clock-face component, drives it through attribute
//! changes and frame ticks, and prints the committed markup at each step.

use weft_behaviour::{
    validators, AttrValue, AttributeSpec, ComponentBehaviour, ComponentInstance,
    ComponentRegistry, Dataset, FrameClock, RenderError, RenderOutcome,
};
use weft_dom::Fragment;

#[derive(Default)]
struct HourMarker;

impl ComponentBehaviour for HourMarker {
    fn template() -> &'static str {
        r#"<span class="hour"></span>"#
    }

    fn style() -> &'static str {
        ":host { display: inline-block; font-family: monospace }"
    }

    fn observed_attributes() -> &'static [&'static str] {
        &["hour"]
    }

    fn attributes_properties() -> Vec<AttributeSpec> {
        vec![AttributeSpec::new("hour")
            .with_default("9")
            .with_parse_fn(validators::hour())]
    }

    fn render(
        &mut self,
        artifact: &mut Fragment,
        dataset: &Dataset<'_>,
    ) -> Result<RenderOutcome, RenderError> {
        let hour = dataset.get("hour")?;
        if let Some(span) = artifact.find_by_tag("span") {
            artifact.set_text(span, &format!("{:02}:00", hour.as_int().unwrap_or(0)));
        }
        Ok(RenderOutcome::Commit)
    }
}

fn show(label: &str, el: &ComponentInstance<HourMarker>) {
    let html = el
        .host()
        .shadow_root()
        .map(|shadow| shadow.content().to_html())
        .unwrap_or_default();
    println!("{label}: {html}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weft=debug".into()),
        )
        .init();

    let mut registry = ComponentRegistry::new();
    let class = registry.define::<HourMarker>("HourMarker").unwrap();
    println!("defined <{}>", class.tag_name());

    let mut el = ComponentInstance::new(HourMarker, class, FrameClock::new());

    el.attach().unwrap();
    el.animation_frame();
    show("initial (default hour)", &el);

    el.set_attribute("hour", "14").unwrap();
    el.animation_frame();
    show("after hour=14", &el);

    // Typed write through the dataset
    el.set_data("hour", AttrValue::Int(18)).unwrap();
    el.animation_frame();
    show("after set_data(18)", &el);

    // Out-of-range hour: the render rejects it and the engine rolls back
    el.set_attribute("hour", "30").unwrap();
    el.animation_frame();
    show("after rejected hour=30", &el);
    for event in el.take_events() {
        println!("error event: {} ({})", event.message, event.error);
    }

    el.detach();
    show("after detach", &el);
}
