use acs_call_rs::acs_types::CallInvite;
use acs_call_rs::client::CallAutomationClient;
use acs_call_rs::config::CallConfig;
use acs_call_rs::error::AppError;

use std::io::{self, Write};
use tracing::{error, info};

fn prompt(question: &str) -> String {
    print!("{question}");
    io::stdout().flush().expect("failed to flush stdout");
    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .expect("failed to read from stdin");
    answer.trim().to_string()
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    acs_call_rs::init_tracing();

    let config = match CallConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            error!(
                "create a .env file (or export) with ACS_CONNECTION_STRING, \
                 TO_PHONE_NUMBER and FROM_PHONE_NUMBER"
            );
            std::process::exit(1);
        }
    };

    info!("you need a public webhook url to receive call events");
    info!("run the webhook_server binary in another terminal to start one");

    let callback_uri = prompt("Enter your webhook callback URL: ");
    if !callback_uri.starts_with("http") {
        error!("invalid callback url, it must start with http:// or https://");
        std::process::exit(1);
    }

    info!(
        from = %config.from_phone_number,
        to = %config.to_phone_number,
        callback = %callback_uri,
        "call configuration"
    );

    let confirm = prompt("Proceed with the call? (yes/no): ").to_lowercase();
    if confirm != "yes" && confirm != "y" {
        info!("call cancelled");
        return;
    }

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

    match client.create_call(&invite, &callback_uri).await {
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
            info!(
                "server call id: {}",
                props.server_call_id.as_deref().unwrap_or("n/a")
            );
            info!(
                "callback url: {}",
                props.callback_uri.as_deref().unwrap_or("n/a")
            );
            info!("check the webhook server for events, the phone should start ringing shortly");
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
