//! In-memory transport double used by the unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::transport::{RequestMethod, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: RequestMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedRequest>>,
    hang: bool,
    yield_first: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, envelope: Value) -> Self {
        self.responses.lock().push_back(Ok(envelope));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn hang(mut self) -> Self {
        self.hang = true;
        self
    }

    /// Yield to the scheduler before answering so concurrent callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.calls.lock().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });

        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.yield_first {
            tokio::task::yield_now().await;
        }

        let next = self.responses.lock().pop_front();
        next.unwrap_or_else(|| Ok(json!({ "status": "success" })))
    }
}

/// A full user envelope as returned by `GET /api/users/{username}`.
pub fn user_envelope(id: u64, uuid: &str, username: &str, coins: Value) -> Value {
    json!({
        "status": "success",
        "userinfo": {
            "object": "user",
            "attributes": {
                "id": id,
                "uuid": uuid,
                "username": username,
                "email": format!("{}@example.com", username),
                "first_name": "Ada",
                "last_name": "Lovelace",
                "language": "en",
                "root_admin": false,
                "2fa": false,
                "created_at": "2021-04-12T18:22:13+00:00",
                "updated_at": null,
                "relationships": {
                    "servers": {
                        "object": "list",
                        "data": [server_payload(7, &format!("{}-srv-0001", uuid), id)]
                    }
                }
            }
        },
        "coins": coins,
        "package": { "name": "default", "ram": 1024, "disk": 5120, "cpu": 100, "servers": 1 },
        "extra": { "ram": 512, "disk": 0, "cpu": 50, "servers": 1 }
    })
}

pub fn server_payload(id: u64, uuid: &str, owner: u64) -> Value {
    json!({
        "object": "server",
        "attributes": {
            "id": id,
            "uuid": uuid,
            "identifier": &uuid[..8.min(uuid.len())],
            "name": "Survival",
            "description": "",
            "status": null,
            "suspended": false,
            "limits": { "memory": 1024, "swap": -1, "disk": 5120, "io": 500, "cpu": 100, "threads": null },
            "feature_limits": { "databases": 1, "allocations": 1, "backups": 0 },
            "user": owner,
            "node": 1,
            "allocation": 12,
            "nest": 1,
            "egg": 3,
            "container": { "startup_command": "java -jar server.jar", "image": "ghcr.io/java:17" },
            "created_at": "2021-05-01T10:00:00+00:00",
            "updated_at": "2021-06-01T10:00:00+00:00"
        }
    })
}

/// The `data` member of a `POST /api/users` envelope.
pub fn meta_payload(uuid: &str, username: &str) -> Value {
    json!({
        "data": {
            "object": "user",
            "attributes": {
                "id": 12,
                "uuid": uuid,
                "username": username,
                "email": "new@example.com",
                "first_name": "New",
                "last_name": "User",
                "language": "en",
                "root_admin": null,
                "2fa": false,
                "created_at": "2022-01-01T00:00:00+00:00",
                "updated_at": "2022-01-01T00:00:00+00:00"
            }
        },
        "meta": { "resource": "https://panel.example.com/api/application/users/12" }
    })
}
