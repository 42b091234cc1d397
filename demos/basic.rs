//! Walkthrough of registration, disambiguation, lifecycle policies, and
//! injection.
//!
//! Run with: `cargo run --example basic`

use coil_di::{Consumer, DiError, Overrides, RegisterOptions, Registry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Config {
    listen: String,
}

fn main() -> Result<(), DiError> {
    let mut registry = Registry::new();

    // A lazy singleton: constructed on first use, then cached.
    registry.register_with(
        "default_config",
        || Config {
            listen: "127.0.0.1:8080".to_string(),
        },
        RegisterOptions::singleton(),
    )?;

    // Two providers for String: the primary wins over registration order,
    // the named one is reachable only by its key.
    registry.register("plain_banner", || "ready".to_string())?;
    registry.register_with(
        "fancy_banner",
        || "*** ready ***".to_string(),
        RegisterOptions::factory().as_primary(),
    )?;
    registry.register_with(
        "debug_banner",
        || "ready (debug build)".to_string(),
        RegisterOptions::factory().named("debug"),
    )?;

    // A factory: fresh value per resolution.
    let requests = Arc::new(AtomicUsize::new(0));
    let counted = requests.clone();
    registry.register::<usize, _>("request_id", move || {
        counted.fetch_add(1, Ordering::SeqCst) + 1
    })?;

    let config = registry.get::<Config>()?;
    println!("listening on {}", config.listen);
    println!("banner: {}", registry.get::<String>()?);
    println!("debug banner: {}", registry.get_named::<String>("debug")?);

    // Consumers declare what they need; the container assembles it.
    let handle_request = Consumer::new("handle_request", |args| {
        format!(
            "[req {}] {} -> {}",
            args.get::<usize>("id"),
            args.get::<Config>("config").listen,
            args.get::<String>("banner"),
        )
    })
    .param::<usize>("id")
    .param::<Config>("config")
    .param::<String>("banner");

    println!("{}", registry.inject(&handle_request)?);
    println!("{}", registry.inject(&handle_request)?);

    // Reroute one parameter through the named registration.
    let overrides = Overrides::new().bind("banner", "debug");
    println!("{}", registry.inject_with(&handle_request, &overrides)?);

    Ok(())
}
