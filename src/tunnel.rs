use serde::Deserialize;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::debug;

const AGENT_TUNNELS_URL: &str = "http://127.0.0.1:4040/api/tunnels";
const POLL_ATTEMPTS: u32 = 20;
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Tunnel failures are reported to the operator and swallowed; the
/// receiver keeps serving on its local address without one.
#[derive(Debug, Error)]
pub enum TunnelError {
    #[error("failed to launch ngrok: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("ngrok exited early with {0}")]
    Exited(std::process::ExitStatus),
    #[error("ngrok agent did not report a tunnel in time")]
    NoTunnel,
}

/// A live ngrok tunnel.  Dropping the guard kills the agent process.
pub struct Tunnel {
    pub public_url: String,
    _child: Child,
}

impl Tunnel {
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.public_url, crate::consts::CALLBACK_ROUTE)
    }
}

#[derive(Debug, Deserialize)]
struct AgentTunnelList {
    tunnels: Vec<AgentTunnel>,
}

#[derive(Debug, Deserialize)]
struct AgentTunnel {
    public_url: String,
    proto: String,
}

impl AgentTunnelList {
    fn public_url(&self) -> Option<&str> {
        self.tunnels
            .iter()
            .find(|t| t.proto == "https")
            .or_else(|| self.tunnels.first())
            .map(|t| t.public_url.as_str())
    }
}

/// Best-effort bootstrap: spawn the ngrok agent against the local port
/// and wait for its local inspection API to report a public URL.  There
/// is no retry loop and no health monitoring after establishment.
pub async fn open(port: u16, http: &reqwest::Client) -> Result<Tunnel, TunnelError> {
    let mut child = Command::new("ngrok")
        .arg("http")
        .arg(port.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    for attempt in 0..POLL_ATTEMPTS {
        sleep(POLL_INTERVAL).await;
        if let Some(status) = child.try_wait()? {
            return Err(TunnelError::Exited(status));
        }
        let Ok(response) = http.get(AGENT_TUNNELS_URL).send().await else {
            debug!(attempt, "ngrok agent api not reachable yet");
            continue;
        };
        let Ok(list) = response.json::<AgentTunnelList>().await else {
            continue;
        };
        if let Some(url) = list.public_url() {
            return Ok(Tunnel {
                public_url: url.to_string(),
                _child: child,
            });
        }
    }
    Err(TunnelError::NoTunnel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_listing_prefers_the_https_tunnel() {
        let list: AgentTunnelList = serde_json::from_str(
            r#"{"tunnels":[
                {"public_url":"http://abc.ngrok.io","proto":"http"},
                {"public_url":"https://abc.ngrok.io","proto":"https"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(list.public_url(), Some("https://abc.ngrok.io"));
    }

    #[test]
    fn agent_listing_falls_back_to_any_tunnel() {
        let list: AgentTunnelList = serde_json::from_str(
            r#"{"tunnels":[{"public_url":"http://abc.ngrok.io","proto":"http"}]}"#,
        )
        .unwrap();
        assert_eq!(list.public_url(), Some("http://abc.ngrok.io"));

        let empty: AgentTunnelList = serde_json::from_str(r#"{"tunnels":[]}"#).unwrap();
        assert_eq!(empty.public_url(), None);
    }
}
