use actix_web::web::Bytes;
use serde::Serialize;
use std::borrow::Cow;

pub const EVENT_CONNECT: &str = "connect";
pub const EVENT_NOTIFICATION: &str = "notification";

/// One named server-sent event. `data` is either a JSON document (domain
/// events) or an informational string (the initial connect ack).
#[derive(Debug, Clone)]
pub struct SseEvent {
    pub name: Cow<'static, str>,
    pub data: String,
}

impl SseEvent {
    pub fn raw(name: impl Into<Cow<'static, str>>, data: impl Into<String>) -> Self {
        SseEvent { name: name.into(), data: data.into() }
    }

    pub fn json<T: Serialize>(
        name: impl Into<Cow<'static, str>>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(SseEvent { name: name.into(), data: serde_json::to_string(payload)? })
    }

    /// Wire framing per the SSE protocol: `event:` line, `data:` line, blank line.
    pub fn to_frame(&self) -> Bytes {
        Bytes::from(format!("event: {}\ndata: {}\n\n", self.name, self.data))
    }
}

/// Payload shape for `notification` events. The set of shapes pushed over the
/// wire is closed; arbitrary maps are never sent.
#[derive(Debug, Serialize)]
pub struct NotificationPayload<'a> {
    pub r#type: &'a str,
    pub message: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_name_and_data_lines() {
        let event = SseEvent::raw(EVENT_CONNECT, "SSE connected");
        assert_eq!(&event.to_frame()[..], b"event: connect\ndata: SSE connected\n\n");
    }

    #[test]
    fn json_payload_uses_type_key() {
        let event = SseEvent::json(
            EVENT_NOTIFICATION,
            &NotificationPayload { r#type: "FRIEND_REQUEST", message: "hello" },
        )
        .unwrap();
        assert_eq!(event.data, r#"{"type":"FRIEND_REQUEST","message":"hello"}"#);
    }
}
