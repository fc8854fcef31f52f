//! Cross-crate properties of the slide pipeline

use deck_catalog::{QueryResolver, TopicCatalog};
use deck_core::{DeckBuilder, DeckConfig, SlidePipeline};
use deck_model::Slide;
use deck_remote::RemoteAnalysisClient;
use deck_test_utils::ScriptedService;
use deck_viz::select_chart_kind;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn topic_id() -> impl Strategy<Value = String> {
    let ids: Vec<String> = TopicCatalog::builtin().ids().map(str::to_string).collect();
    proptest::sample::select(ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fingerprint_is_stable_across_pipelines(id in topic_id(), refinement in "[a-z ]{0,40}") {
        let rt = runtime();
        let config = DeckConfig::default();
        let refinement = Some(refinement.as_str());

        let (a, b) = rt.block_on(async {
            let first = SlidePipeline::new(&config, RemoteAnalysisClient::disabled());
            let second = SlidePipeline::new(&config, RemoteAnalysisClient::disabled());
            (
                first.build_slide(&id, refinement).await.unwrap(),
                second.build_slide(&id, refinement).await.unwrap(),
            )
        });

        prop_assert_eq!(a.query_request().fingerprint, b.query_request().fingerprint);
        let topic = TopicCatalog::builtin().get_topic(&id).unwrap();
        let direct = QueryResolver::new().resolve(&topic, refinement).unwrap();
        prop_assert_eq!(a.query_request().fingerprint, direct.fingerprint);
    }

    #[test]
    fn chart_kind_depends_only_on_rows_and_topic(id in topic_id()) {
        let rt = runtime();
        let config = DeckConfig::default();
        let (a, b): (Slide, Slide) = rt.block_on(async {
            let pipeline = SlidePipeline::new(&config, RemoteAnalysisClient::disabled());
            (
                pipeline.build_slide(&id, None).await.unwrap(),
                pipeline.build_slide(&id, None).await.unwrap(),
            )
        });

        prop_assert_eq!(a.chart_spec(), b.chart_spec());
        prop_assert_eq!(
            a.chart_spec().chart_kind,
            select_chart_kind(&a.analysis_result().rows, a.topic())
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_remote_call_per_fingerprint_under_concurrency() {
    let service = Arc::new(ScriptedService::catalog(0.9).with_delay(Duration::from_millis(50)));
    let config = DeckConfig::default().with_max_concurrent_topics(8);
    let builder = DeckBuilder::with_client(&config, Arc::clone(&service).into_client());

    let ids = [
        "peak_traffic_hours",
        "speed_distribution",
        "peak_traffic_hours",
        "peak_traffic_hours",
        "speed_distribution",
        "traffic_overview",
    ];
    let deck = builder.generate_deck(&ids, &BTreeMap::new()).await;

    assert_eq!(deck.len(), ids.len());
    assert_eq!(service.calls(), 3);

    let again = builder.generate_deck(&ids, &BTreeMap::new()).await;
    assert_eq!(again.len(), ids.len());
    assert_eq!(service.calls(), 3);

    builder.pipeline().cache().sync().await;
    assert_eq!(builder.pipeline().cache().stats().entry_count, 3);
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_request() {
    let service = Arc::new(ScriptedService::failing(
        deck_remote::RemoteError::ServiceUnavailable("down".into()),
    ));
    let builder = DeckBuilder::with_client(&DeckConfig::default(), Arc::clone(&service).into_client());

    for _ in 0..3 {
        let slide = builder.generate_slide("congestion_patterns", None).await.unwrap();
        assert!(slide.analysis_result().is_fallback());
    }
    assert_eq!(service.calls(), 3);
}

#[tokio::test]
async fn fallback_rows_are_deterministic() {
    let config = DeckConfig::default();
    let a = SlidePipeline::new(&config, RemoteAnalysisClient::disabled())
        .build_slide("geographic_analysis", None)
        .await
        .unwrap();
    let b = SlidePipeline::new(&config, RemoteAnalysisClient::disabled())
        .build_slide("geographic_analysis", None)
        .await
        .unwrap();

    assert_eq!(a.analysis_result().rows, b.analysis_result().rows);
    assert_eq!(a.insight(), b.insight());
}
