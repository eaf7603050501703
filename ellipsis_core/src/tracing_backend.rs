// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! Configures a suitable default [`tracing`] implementation for applications using ellipsis widgets.
//!
//! Natively, logs go to the console with a short UTC timestamp, filtered by `RUST_LOG`.
//! On the web, logs go to the browser console and panics are reported there too.
//! This will include all [`DEBUG`](tracing::Level::DEBUG) messages in debug mode,
//! and all [`INFO`](tracing::Level::INFO) level messages in release mode.
//!
//! If a `tracing` backend is already configured, this will not overwrite that.

use std::error::Error;
use std::fmt;

use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
fn default_tracing_subscriber_native(
    default_level: LevelFilter,
) -> (impl Subscriber, Option<Box<dyn Error>>) {
    use time::macros::format_description;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::time::UtcTime;

    let env_filter_builder = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var("RUST_LOG");
    let err = env_filter_builder
        .from_env()
        .err()
        .map(|err| format!("failed to parse RUST_LOG environment variable: {err:#}").into());
    let env_filter = env_filter_builder.from_env_lossy();

    // Time without the date, with millisecond precision; the target is skipped as noise.
    let timer = UtcTime::new(format_description!(
        "[hour repr:24]:[minute]:[second].[subsecond digits:3]Z"
    ));
    let console_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer)
        .with_target(false)
        .with_filter(env_filter);

    (tracing_subscriber::registry().with(console_layer), err)
}

#[cfg(target_arch = "wasm32")]
fn default_tracing_subscriber_wasm(
    max_level: LevelFilter,
) -> (impl Subscriber, Option<Box<dyn Error>>) {
    // Ignored if the panic hook is already set
    console_error_panic_hook::set_once();

    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(
            max_level
                .into_level()
                .expect("for max_level to be > tracing::LevelFilter::OFF"),
        )
        .build();

    (
        tracing_subscriber::Registry::default().with(tracing_wasm::WASMLayer::new(config)),
        None,
    )
}

/// Constructs a default tracing subscriber with a given `max_level` filter.
pub fn default_tracing_subscriber(
    max_level: LevelFilter,
) -> (impl Subscriber, Option<Box<dyn Error>>) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        default_tracing_subscriber_native(max_level)
    }

    #[cfg(target_arch = "wasm32")]
    {
        default_tracing_subscriber_wasm(max_level)
    }
}

/// An Error indicating that a tracing subscriber has been set before.
#[derive(Debug)]
pub struct TracingSubscriberHasBeenSetError;

impl fmt::Display for TracingSubscriberHasBeenSetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad("A tracing subscriber has been set before.")
    }
}

impl Error for TracingSubscriberHasBeenSetError {}

fn verify_subscriber_has_not_been_set() -> Result<(), TracingSubscriberHasBeenSetError> {
    // `has_been_set` is doc(hidden), but tracing itself relies on it for the whole 0.1 series.
    if tracing_core::dispatcher::has_been_set() {
        return Err(TracingSubscriberHasBeenSetError);
    }
    Ok(())
}

fn install(default_level: LevelFilter) -> Result<(), TracingSubscriberHasBeenSetError> {
    verify_subscriber_has_not_been_set()?;

    let (subscriber, err) = default_tracing_subscriber(default_level);

    // We may ignore potential errors here because we already checked that no subscriber has been set.
    let _ = tracing::subscriber::set_global_default(subscriber);
    if let Some(err) = err {
        tracing::error!("Initialising logging encountered recoverable error: {err}");
    }

    Ok(())
}

/// Initialise tracing with a default subscriber for a test.
///
/// Only warnings and errors are shown, to limit noise.
pub fn try_init_test_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    install(LevelFilter::WARN)
}

/// Initialise tracing with a default subscriber for an end-user application.
pub fn try_init_tracing() -> Result<(), TracingSubscriberHasBeenSetError> {
    // DEBUG prints a few logs per overflow evaluation; INFO only noteworthy things.
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    install(default_level)
}
