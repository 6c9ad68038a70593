pub mod acs_types;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod tunnel;

use tracing_subscriber::prelude::*;

pub mod consts {
    pub const WEBHOOK_PORT: u16 = 3000;
    pub const CALLBACK_ROUTE: &str = "/api/callbacks";
    pub const HEALTH_ROUTE: &str = "/health";
}

/// Install the global tracing subscriber used by all three binaries.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_default(tracing_subscriber::filter::LevelFilter::INFO)
                .with_targets([
                    ("hyper", tracing_subscriber::filter::LevelFilter::OFF),
                    ("acs_call_rs", tracing_subscriber::filter::LevelFilter::DEBUG),
                ]),
        );
    tracing::subscriber::set_global_default(subscriber).unwrap();
}
