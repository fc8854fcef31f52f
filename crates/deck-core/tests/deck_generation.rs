//! End-to-end deck generation against scripted analysis services

use deck_catalog::{CatalogError, TopicCatalog};
use deck_core::{export_deck, DeckBuilder, DeckConfig, DeckError, SlideRecord, TopicError};
use deck_model::{BackendKind, ChartKind, ErrorKind, ResultSource};
use deck_remote::{RemoteAnalysisClient, RemoteError};
use deck_test_utils::{empty_response, peak_hours_response, ScriptedService};
use deck_viz::BackendFlags;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

fn all_topic_ids() -> Vec<String> {
    TopicCatalog::builtin().ids().map(str::to_string).collect()
}

fn builder_with(service: &Arc<ScriptedService>) -> DeckBuilder {
    DeckBuilder::with_client(&DeckConfig::default(), Arc::clone(service).into_client())
}

fn offline_builder() -> DeckBuilder {
    DeckBuilder::with_client(&DeckConfig::default(), RemoteAnalysisClient::disabled())
}

#[tokio::test]
async fn every_topic_yields_a_slide_offline() {
    let ids = all_topic_ids();
    let deck = offline_builder().generate_deck(&ids, &BTreeMap::new()).await;

    assert!(deck.is_complete());
    assert_eq!(deck.len(), ids.len());
    for slide in &deck.slides {
        let result = slide.analysis_result();
        assert_eq!(result.source, ResultSource::Fallback, "{}", slide.topic().id);
        assert_eq!(result.confidence.value(), 0.5);
        assert!(!result.is_empty(), "{}", slide.topic().id);
        assert!(!slide.insight().summary_text.is_empty());
    }
}

#[tokio::test]
async fn every_topic_yields_a_slide_remote() {
    let service = Arc::new(ScriptedService::catalog(0.85));
    let ids = all_topic_ids();
    let deck = builder_with(&service).generate_deck(&ids, &BTreeMap::new()).await;

    assert!(deck.is_complete());
    for slide in &deck.slides {
        let result = slide.analysis_result();
        assert_eq!(result.source, ResultSource::Remote, "{}", slide.topic().id);
        assert_eq!(result.error, None);
        assert_eq!(
            result.request_id.as_deref(),
            Some(format!("req_{}", slide.topic().id).as_str())
        );
    }
    assert_eq!(service.calls(), ids.len());
}

#[tokio::test]
async fn remote_and_fallback_share_column_sets() {
    let ids = all_topic_ids();
    let service = Arc::new(ScriptedService::catalog(0.9));
    let remote = builder_with(&service).generate_deck(&ids, &BTreeMap::new()).await;
    let fallback = offline_builder().generate_deck(&ids, &BTreeMap::new()).await;

    for (r, f) in remote.slides.iter().zip(&fallback.slides) {
        assert_eq!(r.topic().id, f.topic().id);
        assert_eq!(
            r.analysis_result().column_names(),
            f.analysis_result().column_names(),
            "{}",
            r.topic().id
        );
    }
}

#[tokio::test]
async fn peak_hours_from_service() {
    let service = Arc::new(ScriptedService::responding(peak_hours_response()));
    let slide = builder_with(&service)
        .generate_slide("peak_traffic_hours", None)
        .await
        .unwrap();

    let result = slide.analysis_result();
    assert_eq!(result.source, ResultSource::Remote);
    assert_eq!(result.row_count(), 5);
    assert_eq!(result.column_names(), vec!["hour", "count", "avg_speed"]);
    assert_eq!(result.request_id.as_deref(), Some("req_124"));
    assert_eq!(slide.chart_spec().chart_kind, ChartKind::Line);
    assert!(slide.insight().summary_text.contains("peaks at 12,890 for Hour 8"));
    assert_eq!(slide.insight().confidence.value(), 0.9);
}

#[tokio::test]
async fn unavailable_service_falls_back() {
    let service = Arc::new(ScriptedService::failing(RemoteError::ServiceUnavailable(
        "connection refused".into(),
    )));
    let slide = builder_with(&service)
        .generate_slide("peak_traffic_hours", None)
        .await
        .unwrap();

    let result = slide.analysis_result();
    assert_eq!(result.source, ResultSource::Fallback);
    assert_eq!(result.confidence.value(), 0.5);
    assert!(!slide.insight().summary_text.is_empty());
    let error = result.error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::ServiceUnavailable);
    assert_eq!(error.message, "connection refused");
}

#[tokio::test]
async fn semantic_and_malformed_errors_fall_back() {
    let cases = [
        (
            RemoteError::SemanticError("unknown column".into()),
            ErrorKind::SemanticError,
        ),
        (
            RemoteError::MalformedResponse("garbage".into()),
            ErrorKind::MalformedResponse,
        ),
    ];
    for (error, kind) in cases {
        let service = Arc::new(ScriptedService::failing(error));
        let slide = builder_with(&service)
            .generate_slide("volume_analysis", None)
            .await
            .unwrap();
        let result = slide.analysis_result();
        assert_eq!(result.source, ResultSource::Fallback);
        assert_eq!(result.error.as_ref().map(|e| e.kind), Some(kind));
    }
}

#[tokio::test]
async fn non_finite_value_falls_back() {
    let mut body = peak_hours_response();
    body["results"][1]["AVG_SPEED"] = serde_json::json!("NaN");
    let service = Arc::new(ScriptedService::responding(body));
    let slide = builder_with(&service)
        .generate_slide("peak_traffic_hours", None)
        .await
        .unwrap();

    let result = slide.analysis_result();
    assert_eq!(result.source, ResultSource::Fallback);
    assert_eq!(result.error.as_ref().map(|e| e.kind), Some(ErrorKind::MalformedResponse));
    assert!(!slide.insight().summary_text.contains("NaN"));
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let service = Arc::new(ScriptedService::responding(serde_json::json!({"results": []})));
    let slide = builder_with(&service)
        .generate_slide("speed_distribution", None)
        .await
        .unwrap();
    assert_eq!(
        slide.analysis_result().error.as_ref().map(|e| e.kind),
        Some(ErrorKind::MalformedResponse)
    );
}

#[tokio::test(start_paused = true)]
async fn slow_service_times_out_to_fallback() {
    let service = Arc::new(ScriptedService::catalog(0.9).with_delay(Duration::from_secs(60)));
    let config = DeckConfig::default();
    let client = Arc::clone(&service)
        .into_client()
        .with_timeout(Duration::from_secs(2));
    let builder = DeckBuilder::with_client(&config, client);

    let slide = builder.generate_slide("seasonal_trends", None).await.unwrap();
    let result = slide.analysis_result();
    assert_eq!(result.source, ResultSource::Fallback);
    assert_eq!(result.error.as_ref().map(|e| e.kind), Some(ErrorKind::ServiceUnavailable));
}

#[tokio::test]
async fn empty_result_gives_no_data_table() {
    let service = Arc::new(ScriptedService::responding(empty_response(0.8)));
    let slide = builder_with(&service)
        .generate_slide("geographic_analysis", None)
        .await
        .unwrap();

    assert_eq!(slide.analysis_result().source, ResultSource::Remote);
    assert!(slide.insight().is_no_data());
    assert_eq!(
        slide.insight().summary_text,
        "No data was available for Geographic Analysis."
    );
    assert_eq!(slide.chart_spec().chart_kind, ChartKind::Table);
    assert_eq!(slide.chart_spec().backend_used, BackendKind::PlainTable);
    assert!(slide.artifact().is_table());
}

#[tokio::test]
async fn unknown_topic_does_not_block_others() {
    let ids = ["nonexistent_topic", "traffic_overview", "peak_traffic_hours"];
    let deck = offline_builder().generate_deck(&ids, &BTreeMap::new()).await;

    assert_eq!(deck.len(), 2);
    assert_eq!(deck.failures.len(), 1);
    let failure = &deck.failures[0];
    assert_eq!(failure.position, 0);
    assert_eq!(
        failure.error,
        TopicError::Catalog(CatalogError::UnknownTopic("nonexistent_topic".into()))
    );

    let single = offline_builder().generate_slide("nonexistent_topic", None).await;
    assert!(matches!(single, Err(DeckError::Topic { .. })));
}

#[tokio::test]
async fn invalid_refinement_is_reported_per_topic() {
    let mut refinements = BTreeMap::new();
    refinements.insert("peak_traffic_hours".to_string(), "by @weather".to_string());
    let deck = offline_builder()
        .generate_deck(&["peak_traffic_hours", "speed_distribution"], &refinements)
        .await;

    assert_eq!(deck.len(), 1);
    assert!(matches!(deck.failures[0].error, TopicError::Resolve(_)));
}

#[tokio::test]
async fn refinement_reaches_the_service() {
    let service = Arc::new(ScriptedService::catalog(0.9));
    let builder = builder_with(&service);
    let mut refinements = BTreeMap::new();
    refinements.insert(
        "peak_traffic_hours".to_string(),
        "on weekdays only, grouped by @hour".to_string(),
    );

    let plain = builder.generate_slide("peak_traffic_hours", None).await.unwrap();
    let deck = builder.generate_deck(&["peak_traffic_hours"], &refinements).await;
    let refined = &deck.slides[0];

    assert_ne!(
        plain.query_request().fingerprint,
        refined.query_request().fingerprint
    );
    assert_eq!(service.calls(), 2);
    assert!(service.queries()[1].contains("on weekdays only"));
}

#[tokio::test]
async fn without_figure_backends_charts_degrade_to_table() {
    let config = DeckConfig::default().with_backends(BackendFlags {
        primary_viz: false,
        secondary_viz: false,
        native_widget: false,
    });
    let builder = DeckBuilder::with_client(&config, RemoteAnalysisClient::disabled());
    let ids = all_topic_ids();
    let deck = builder.generate_deck(&ids, &BTreeMap::new()).await;

    assert!(deck.is_complete());
    for slide in &deck.slides {
        assert_eq!(slide.chart_spec().backend_used, BackendKind::PlainTable);
        assert!(slide.artifact().is_table());
    }
    let peak = deck
        .slides
        .iter()
        .find(|s| s.topic().id == "peak_traffic_hours")
        .unwrap();
    assert_eq!(peak.chart_spec().chart_kind, ChartKind::Line);
}

#[tokio::test]
async fn native_widget_renders_when_figure_backends_are_off() {
    let config = DeckConfig::default().with_backends(BackendFlags {
        primary_viz: false,
        secondary_viz: false,
        native_widget: true,
    });
    let builder = DeckBuilder::with_client(&config, RemoteAnalysisClient::disabled());
    let ids = [
        "peak_traffic_hours",
        "traffic_overview",
        "volume_analysis",
        "speed_distribution",
    ];
    let deck = builder.generate_deck(&ids, &BTreeMap::new()).await;
    assert!(deck.is_complete());

    let outcome: Vec<(ChartKind, BackendKind)> = deck
        .slides
        .iter()
        .map(|s| (s.chart_spec().chart_kind, s.chart_spec().backend_used))
        .collect();
    assert_eq!(
        outcome,
        vec![
            (ChartKind::Line, BackendKind::NativeWidget),
            (ChartKind::Gauge, BackendKind::NativeWidget),
            (ChartKind::Bar, BackendKind::NativeWidget),
            (ChartKind::Pie, BackendKind::PlainTable),
        ]
    );
    assert!(!deck.slides[0].artifact().is_table());
    assert!(deck.slides[3].artifact().is_table());
}

#[tokio::test(start_paused = true)]
async fn cancellation_returns_no_partial_deck() {
    let service = Arc::new(ScriptedService::catalog(0.9).with_delay(Duration::from_secs(30)));
    let builder = builder_with(&service);
    let ids = all_topic_ids();

    let outcome = builder
        .generate_deck_until(
            &ids,
            &BTreeMap::new(),
            tokio::time::sleep(Duration::from_millis(10)),
        )
        .await;

    assert!(matches!(outcome, Err(DeckError::Cancelled)));
    assert!(service.calls() > 0);
}

#[tokio::test]
async fn uncancelled_run_completes() {
    let outcome = offline_builder()
        .generate_deck_until(
            &["traffic_overview"],
            &BTreeMap::new(),
            std::future::pending::<()>(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.len(), 1);
}

#[tokio::test]
async fn export_keeps_every_field() {
    let service = Arc::new(ScriptedService::responding(peak_hours_response()));
    let config = DeckConfig::default().with_sql_display(false).with_metadata(false);
    let builder = DeckBuilder::with_client(&config, Arc::clone(&service).into_client());
    let deck = builder.generate_deck(&["peak_traffic_hours"], &BTreeMap::new()).await;

    let bytes = export_deck(&deck.slides).unwrap();
    let records: Vec<SlideRecord> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.topic, "Peak Traffic Hours");
    assert_eq!(record.chart_kind, ChartKind::Line);
    assert_eq!(record.confidence, 0.9);
    assert!(record.generated_query_text.starts_with("SELECT HOUR(READING_TS)"));
    assert_eq!(record.key_metrics, deck.slides[0].insight().key_metrics);

    let raw: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(raw[0]["chart_kind"], "LINE");
    assert!(raw[0]["key_metrics"][0]["label"].is_string());
}
