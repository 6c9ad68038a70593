use acs_call_rs::consts::{CALLBACK_ROUTE, WEBHOOK_PORT};
use acs_call_rs::{handlers, tunnel};

use tracing::{info, warn};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    acs_call_rs::init_tracing();

    let app = handlers::router();
    // The local bind is mandatory; only the tunnel below is best-effort.
    let server = axum::Server::bind(&format!("0.0.0.0:{WEBHOOK_PORT}").parse().unwrap())
        .serve(app.into_make_service());

    info!("webhook server started");
    info!("local url: http://localhost:{WEBHOOK_PORT}");
    info!("callback endpoint: http://localhost:{WEBHOOK_PORT}{CALLBACK_ROUTE}");

    info!("attempting to open an ngrok tunnel for a public url");
    let http = reqwest::Client::new();
    let _tunnel = match tunnel::open(WEBHOOK_PORT, &http).await {
        Ok(tunnel) => {
            info!("public webhook url ready: {}", tunnel.public_url);
            info!(
                "use this callback url when placing calls: {}",
                tunnel.callback_url()
            );
            Some(tunnel)
        }
        Err(e) => {
            warn!(error = %e, "could not open an ngrok tunnel");
            info!(
                "alternatives: install ngrok and run `ngrok http {WEBHOOK_PORT}` yourself, \
                 or deploy behind a public endpoint"
            );
            None
        }
    };

    info!("waiting for webhook events, press ctrl-c to stop");
    server.await.unwrap();
}
