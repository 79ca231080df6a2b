//! Retained demo driver
//!
//! Simulates a host renderer switching between a few component tabs
//! through a keep-alive point, then prints the resulting cache statistics.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load cache configuration from environment variables
//! 3. Create the keep-alive node
//! 4. Drive a render sequence, mounting instances on misses
//! 5. Dump statistics and tear the node down

use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retained::vdom::{BackingInstance, ComponentOptions, VNode};
use retained::{Config, KeepAlive};

/// The component types the demo host can render.
const TABS: [&str; 3] = ["inbox", "search", "settings"];

/// Demo instance that logs its teardown instead of releasing anything.
struct DemoInstance {
    type_name: String,
}

impl BackingInstance for DemoInstance {
    fn destroy(&self) {
        info!(type_name = self.type_name.as_str(), "instance torn down");
    }
}

/// Builds the render node the host would produce for a tab.
fn tab_node(tab: &str) -> VNode {
    let ctor_id = TABS.iter().position(|t| *t == tab).unwrap_or(0) as u64 + 1;
    VNode::component(ComponentOptions {
        ctor_id,
        type_name: tab.to_string(),
        tag: None,
        explicit_key: None,
    })
}

fn main() -> Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "debug" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retained=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting keep-alive cache demo");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max={:?}, include={:?}, exclude={:?}",
        config.max, config.include, config.exclude
    );

    let mut node = KeepAlive::new(config).context("invalid cache configuration")?;

    // A host switching between tabs, revisiting the first one
    let sequence = ["inbox", "search", "inbox", "settings", "inbox"];
    for (cycle, tab) in sequence.iter().copied().enumerate() {
        let child = tab_node(tab);
        let rendered = node
            .render(std::slice::from_ref(&child))
            .context("render cycle produced no output")?;

        if rendered.instance().is_some() {
            info!(cycle, tab, "reused cached instance");
        } else {
            // Cache miss or pass-through: the instantiation subsystem
            // builds a fresh instance and binds it to the rendered node
            rendered.bind_instance(Rc::new(DemoInstance {
                type_name: tab.to_string(),
            }));
            info!(cycle, tab, "mounted new instance");
        }
    }

    let stats = node.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    node.destroy();
    info!("Demo complete");

    Ok(())
}
