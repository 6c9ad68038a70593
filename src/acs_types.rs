mod call {
    use serde::{Deserialize, Serialize};

    /// Descriptor for one outbound call attempt: who to ring and which
    /// caller id to present.  Built fresh per attempt, discarded after
    /// submission.
    #[derive(Clone, Debug)]
    pub struct CallInvite {
        pub target_phone_number: String,
        pub source_caller_id_number: String,
    }

    #[derive(Clone, Debug, Serialize)]
    pub struct PhoneNumberIdentifierModel {
        pub value: String,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CommunicationIdentifierModel {
        pub kind: String,
        pub phone_number: PhoneNumberIdentifierModel,
    }

    impl CommunicationIdentifierModel {
        pub fn phone_number(value: &str) -> Self {
            Self {
                kind: "phoneNumber".to_string(),
                phone_number: PhoneNumberIdentifierModel {
                    value: value.to_string(),
                },
            }
        }
    }

    /// Body of the call-creation request as the provider expects it on the
    /// wire.
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateCallRequest {
        pub targets: Vec<CommunicationIdentifierModel>,
        pub source_caller_id_number: PhoneNumberIdentifierModel,
        pub callback_uri: String,
    }

    impl CreateCallRequest {
        pub fn from_invite(invite: &CallInvite, callback_uri: &str) -> Self {
            Self {
                targets: vec![CommunicationIdentifierModel::phone_number(
                    &invite.target_phone_number,
                )],
                source_caller_id_number: PhoneNumberIdentifierModel {
                    value: invite.source_caller_id_number.clone(),
                },
                callback_uri: callback_uri.to_string(),
            }
        }
    }

    /// Connection properties echoed back by the provider on success.
    /// Opaque to this crate: displayed, never stored or validated.
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CallConnectionProperties {
        #[serde(default)]
        pub call_connection_id: Option<String>,
        #[serde(default)]
        pub call_connection_state: Option<String>,
        #[serde(default)]
        pub server_call_id: Option<String>,
        #[serde(default)]
        pub callback_uri: Option<String>,
    }
}
pub use call::*;

mod error_body {
    use serde::Deserialize;

    /// Error envelope the provider returns on a rejected request.
    #[derive(Debug, Deserialize)]
    pub struct CommunicationErrorResponse {
        pub error: CommunicationError,
    }

    #[derive(Debug, Deserialize)]
    pub struct CommunicationError {
        #[serde(default)]
        pub code: Option<String>,
        #[serde(default)]
        pub message: Option<String>,
    }
}
pub use error_body::*;

mod callbacks {
    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde_json::{Map, Value};

    /// One provider-pushed call-lifecycle notification.
    ///
    /// The discriminator has two historically observed spellings: `type`
    /// on CloudEvents-shaped payloads and `eventType` on older Event Grid
    /// ones.  Which provider API version sends which is not documented, so
    /// both are read, `type` first.
    #[derive(Clone, Debug, Deserialize)]
    pub struct CallbackEvent {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(rename = "eventType", default)]
        kind_legacy: Option<String>,
        #[serde(default)]
        data: Option<Value>,
        #[serde(flatten)]
        rest: Map<String, Value>,
    }

    impl CallbackEvent {
        pub fn discriminator(&self) -> Option<&str> {
            self.kind.as_deref().or(self.kind_legacy.as_deref())
        }

        /// The event payload: the `data` member when present, otherwise
        /// the whole event object.
        pub fn data(&self) -> Value {
            match &self.data {
                Some(data) if !data.is_null() => data.clone(),
                _ => {
                    let mut whole = self.rest.clone();
                    if let Some(kind) = &self.kind {
                        whole.insert("type".to_string(), Value::String(kind.clone()));
                    }
                    if let Some(kind) = &self.kind_legacy {
                        whole.insert("eventType".to_string(), Value::String(kind.clone()));
                    }
                    Value::Object(whole)
                }
            }
        }

        /// Deserialize a tolerant field view over the payload.  Anything
        /// that does not fit the view collapses to its default rather than
        /// failing the event.
        pub fn view<T>(&self) -> T
        where
            T: Default + DeserializeOwned,
        {
            serde_json::from_value(self.data()).unwrap_or_default()
        }
    }

    /// The provider may POST a single event object or a batch of them.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum CallbackBody {
        Batch(Vec<CallbackEvent>),
        Single(CallbackEvent),
    }

    impl CallbackBody {
        pub fn into_events(self) -> Vec<CallbackEvent> {
            match self {
                CallbackBody::Batch(events) => events,
                CallbackBody::Single(event) => vec![event],
            }
        }
    }

    /// Field views over event payloads.  Every field is optional: events
    /// routinely omit pieces depending on kind and provider version.
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct CallContextView {
        pub call_connection_id: Option<String>,
        pub server_call_id: Option<String>,
        pub correlation_id: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct ParticipantsView {
        pub participants: Option<Vec<Value>>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct RecordingStateView {
        pub recording_state: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ResultInformationView {
        pub result_information: Option<ResultInformation>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct ResultInformation {
        pub code: Option<i64>,
        pub sub_code: Option<i64>,
        pub message: Option<String>,
    }
}
pub use callbacks::*;
