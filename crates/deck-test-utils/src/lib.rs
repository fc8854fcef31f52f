//! Testing utilities for Deckwright workspace
//!
//! Scripted analysis services and canned service responses.

#![allow(missing_docs)]

use async_trait::async_trait;
use deck_catalog::TopicCatalog;
use deck_model::{IntentTemplate, Row, Scalar, Topic};
use deck_remote::{AnalysisService, AnalystRequest, FallbackDataProvider, RemoteAnalysisClient, RemoteError};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Responder = Box<dyn Fn(&AnalystRequest) -> Result<Value, RemoteError> + Send + Sync>;

/// Analysis service with scripted answers, latency and a call counter
pub struct ScriptedService {
    responder: Responder,
    delay: Duration,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn with_responder(
        responder: impl Fn(&AnalystRequest) -> Result<Value, RemoteError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `body`
    pub fn responding(body: Value) -> Self {
        Self::with_responder(move |_| Ok(body.clone()))
    }

    /// Always fail with `error`
    pub fn failing(error: RemoteError) -> Self {
        Self::with_responder(move |_| Err(error.clone()))
    }

    /// Answer every built-in topic with its demo rows under upper-case keys
    pub fn catalog(confidence: f64) -> Self {
        Self::with_responder(move |request| match topic_for_query(&request.query) {
            Some(topic) => Ok(topic_response(&topic, confidence)),
            None => Err(RemoteError::SemanticError(format!(
                "no topic matches query: {}",
                request.query
            ))),
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `analyze` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Query texts received, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }

    /// Wrap in an enabled client
    pub fn into_client(self: Arc<Self>) -> RemoteAnalysisClient {
        RemoteAnalysisClient::new(self, true)
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    async fn analyze(&self, request: &AnalystRequest) -> Result<Value, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(request.query.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.responder)(request)
    }

    async fn ping(&self) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// Built-in topic whose template produced `query`
pub fn topic_for_query(query: &str) -> Option<Arc<Topic>> {
    TopicCatalog::builtin()
        .list_topics()
        .iter()
        .find(|topic| query.starts_with(template_prefix(&topic.intent_template)))
        .cloned()
}

fn template_prefix(template: &IntentTemplate) -> &str {
    template
        .template
        .split(IntentTemplate::PLACEHOLDER)
        .next()
        .unwrap_or_default()
        .trim_end()
}

/// Service response carrying the topic's demo rows with upper-case keys
pub fn topic_response(topic: &Topic, confidence: f64) -> Value {
    let rows = FallbackDataProvider::new().rows(topic).unwrap();
    json!({
        "results": rows.iter().map(upper_case_row).collect::<Vec<_>>(),
        "sql": format!("SELECT * FROM {}", topic.id.to_uppercase()),
        "confidence": confidence,
        "explanation": format!("Answered {}", topic.display_name),
        "request_id": format!("req_{}", topic.id),
    })
}

/// Peak-hours response as the service sends it
pub fn peak_hours_response() -> Value {
    json!({
        "results": [
            {"HOUR": 7, "COUNT": 11234, "AVG_SPEED": 34.2},
            {"HOUR": 8, "COUNT": 12890, "AVG_SPEED": 28.5},
            {"HOUR": 12, "COUNT": 9123, "AVG_SPEED": 36.7},
            {"HOUR": 17, "COUNT": 12456, "AVG_SPEED": 29.8},
            {"HOUR": 18, "COUNT": 8873, "AVG_SPEED": 36.3},
        ],
        "sql": "SELECT HOUR(READING_TS) AS HOUR, COUNT(*) AS COUNT, AVG(SPEED) AS AVG_SPEED FROM TRAFFIC GROUP BY 1 ORDER BY 1",
        "confidence": 0.9,
        "explanation": "Readings and mean speed grouped by hour of day",
        "request_id": "req_124",
    })
}

/// Response with no rows
pub fn empty_response(confidence: f64) -> Value {
    json!({
        "results": [],
        "sql": "SELECT * FROM TRAFFIC WHERE 1 = 0",
        "confidence": confidence,
    })
}

fn upper_case_row(row: &Row) -> Value {
    let map: Map<String, Value> = row
        .iter()
        .map(|(key, value)| (key.to_uppercase(), scalar_value(value)))
        .collect();
    Value::Object(map)
}

fn scalar_value(value: &Scalar) -> Value {
    match value {
        Scalar::Int(v) => json!(v),
        Scalar::Float(v) => json!(v),
        Scalar::Text(v) => json!(v),
        Scalar::Bool(v) => json!(v),
        Scalar::Null => Value::Null,
    }
}

pub fn row(pairs: &[(&str, Scalar)]) -> Row {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}
