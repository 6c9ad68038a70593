use acs_call_rs::acs_types::CallInvite;
use acs_call_rs::client::CallAutomationClient;
use acs_call_rs::config::CallConfig;
use acs_call_rs::error::AppError;

use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    acs_call_rs::init_tracing();

    // All configuration is checked before any network activity.
    let config = match CallConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            error!(
                "create a .env file (or export) with ACS_CONNECTION_STRING, \
                 TO_PHONE_NUMBER, FROM_PHONE_NUMBER and CALLBACK_URI"
            );
            std::process::exit(1);
        }
    };
    let callback_uri = match config.require_callback_uri() {
        Ok(callback_uri) => callback_uri,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!("initializing call automation client");
    let client = match CallAutomationClient::from_connection_string(&config.connection_string) {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        from = %config.from_phone_number,
        to = %config.to_phone_number,
        "placing call"
    );
    let invite = CallInvite {
        target_phone_number: config.to_phone_number.clone(),
        source_caller_id_number: config.from_phone_number.clone(),
    };

    match client.create_call(&invite, callback_uri).await {
        Ok(props) => {
            info!("call successfully initiated");
            info!(
                "call connection id: {}",
                props.call_connection_id.as_deref().unwrap_or("n/a")
            );
            info!(
                "call state: {}",
                props.call_connection_state.as_deref().unwrap_or("n/a")
            );
            info!("events will be delivered to {callback_uri}");
        }
        Err(e) => {
            report_call_failure(&e);
            std::process::exit(1);
        }
    }
}

fn report_call_failure(e: &AppError) {
    error!("error placing call: {e}");
    if let AppError::Call {
        status_code,
        error_code,
        ..
    } = e
    {
        if let Some(status) = status_code {
            error!("status code: {status}");
        }
        if let Some(code) = error_code {
            error!("error code: {code}");
        }
    }
}
