use crate::acs_types::{
    CallContextView, CallbackEvent, ParticipantsView, RecordingStateView, ResultInformationView,
};

use tracing::info;

/// Fixed vocabulary of call-lifecycle event kinds.  The provider grows
/// this set over time; anything unrecognized lands on `Other` and is
/// rendered generically rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallEventKind {
    CallConnected,
    CallDisconnected,
    CallTransferAccepted,
    CallTransferFailed,
    ParticipantsUpdated,
    RecordingStateChanged,
    PlayCompleted,
    PlayFailed,
    RecognizeCompleted,
    RecognizeFailed,
    Other,
}

impl CallEventKind {
    pub fn from_discriminator(discriminator: &str) -> Self {
        match discriminator {
            "Microsoft.Communication.CallConnected" => Self::CallConnected,
            "Microsoft.Communication.CallDisconnected" => Self::CallDisconnected,
            "Microsoft.Communication.CallTransferAccepted" => Self::CallTransferAccepted,
            "Microsoft.Communication.CallTransferFailed" => Self::CallTransferFailed,
            "Microsoft.Communication.ParticipantsUpdated" => Self::ParticipantsUpdated,
            "Microsoft.Communication.RecordingStateChanged" => Self::RecordingStateChanged,
            "Microsoft.Communication.PlayCompleted" => Self::PlayCompleted,
            "Microsoft.Communication.PlayFailed" => Self::PlayFailed,
            "Microsoft.Communication.RecognizeCompleted" => Self::RecognizeCompleted,
            "Microsoft.Communication.RecognizeFailed" => Self::RecognizeFailed,
            _ => Self::Other,
        }
    }
}

pub fn event_kind(event: &CallbackEvent) -> CallEventKind {
    event
        .discriminator()
        .map(CallEventKind::from_discriminator)
        .unwrap_or(CallEventKind::Other)
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}

/// Render the human-readable summary for one event.  Kept pure so the
/// vocabulary is testable without capturing log output; missing optional
/// payload fields degrade to `n/a` or drop the line, never fail.
pub fn summary_lines(event: &CallbackEvent) -> Vec<String> {
    match event_kind(event) {
        CallEventKind::CallConnected => {
            let ctx: CallContextView = event.view();
            vec![
                "CALL CONNECTED".to_string(),
                format!(
                    "  call connection id: {}",
                    or_na(ctx.call_connection_id.as_deref())
                ),
                format!("  server call id: {}", or_na(ctx.server_call_id.as_deref())),
                format!("  correlation id: {}", or_na(ctx.correlation_id.as_deref())),
            ]
        }
        CallEventKind::CallDisconnected => {
            let ctx: CallContextView = event.view();
            vec![
                "CALL DISCONNECTED".to_string(),
                format!(
                    "  call connection id: {}",
                    or_na(ctx.call_connection_id.as_deref())
                ),
                format!("  server call id: {}", or_na(ctx.server_call_id.as_deref())),
            ]
        }
        CallEventKind::CallTransferAccepted => vec!["CALL TRANSFER ACCEPTED".to_string()],
        CallEventKind::CallTransferFailed => vec!["CALL TRANSFER FAILED".to_string()],
        CallEventKind::ParticipantsUpdated => {
            let view: ParticipantsView = event.view();
            let mut lines = vec!["PARTICIPANTS UPDATED".to_string()];
            if let Some(participants) = &view.participants {
                lines.push(format!("  participants: {}", participants.len()));
            }
            lines
        }
        CallEventKind::RecordingStateChanged => {
            let view: RecordingStateView = event.view();
            vec![
                "RECORDING STATE CHANGED".to_string(),
                format!("  state: {}", or_na(view.recording_state.as_deref())),
            ]
        }
        CallEventKind::PlayCompleted => vec!["PLAY COMPLETED".to_string()],
        CallEventKind::PlayFailed => {
            let view: ResultInformationView = event.view();
            let mut lines = vec!["PLAY FAILED".to_string()];
            if let Some(result) = &view.result_information {
                lines.push(format!("  reason: {}", or_na(result.message.as_deref())));
            }
            lines
        }
        CallEventKind::RecognizeCompleted => vec!["RECOGNIZE COMPLETED".to_string()],
        CallEventKind::RecognizeFailed => vec!["RECOGNIZE FAILED".to_string()],
        CallEventKind::Other => {
            vec![format!(
                "other event: {}",
                or_na(event.discriminator())
            )]
        }
    }
}

/// Log one event in full: discriminator, specialized summary, then always
/// the raw payload.
pub fn log_event(event: &CallbackEvent) {
    info!("event type: {}", or_na(event.discriminator()));
    for line in summary_lines(event) {
        info!("{line}");
    }
    let raw = serde_json::to_string_pretty(&event.data()).unwrap_or_default();
    info!("full event data:\n{raw}");
}
