//! LEI resolution against a scripted GLEIF API
//!
//! Covers the validator gate, negative caching, preloading, request
//! coalescing and the per-request timeout.

mod helpers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use proptest::prelude::*;

use helpers::{fixture, lei_url, test_config, ScriptedTransport};
use refdata_enrichment::gleif::{LeiCategory, LeiRegistrationStatus, LeiStatus};
use refdata_enrichment::{
    is_valid_lei, GleifClient, HttpResponse, LeiResolver, TransportError,
};

const SOCGEN_EFFEKTEN: &str = "529900W18LQJJN6SJ336";

fn resolver(transport: Arc<ScriptedTransport>, capacity: u64) -> LeiResolver {
    let client = GleifClient::with_transport(&test_config(), transport);
    LeiResolver::new(client, capacity)
}

fn numbered_lei(n: usize) -> String {
    format!("5299000000000000{n:02}00")
}

#[tokio::test]
async fn test_resolves_registry_payload() {
    let transport = ScriptedTransport::status(404, "");
    transport.respond(
        lei_url(SOCGEN_EFFEKTEN),
        Ok(HttpResponse::new(200, fixture("gleif-api-response.json"))),
    );
    let resolver = resolver(transport.clone(), 500);

    let record = resolver.resolve(SOCGEN_EFFEKTEN).await.unwrap();

    assert_eq!(record.lei.as_deref(), Some(SOCGEN_EFFEKTEN));
    assert_eq!(record.entity_name.as_deref(), Some("Société Générale Effekten GmbH"));
    assert_eq!(record.entity_category, Some(LeiCategory::General));
    assert_eq!(record.entity_status, LeiStatus::Active);
    assert_eq!(record.branch_entity_status, LeiStatus::Null);
    assert_eq!(record.registration_status, Some(LeiRegistrationStatus::Issued));
    assert_eq!(
        record.registration_date,
        Some(DateTime::<FixedOffset>::parse_from_rfc3339("2014-01-27T07:37:54Z").unwrap())
    );
    assert!(record.published);
    assert_eq!(record.lei_validation, None);

    assert_eq!(resolver.cached_entries().await, 1);
    assert!(resolver.is_cached(SOCGEN_EFFEKTEN));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_api_error_is_cached_as_absent() {
    let transport = ScriptedTransport::status(400, "{\"errors\":[]}");
    let resolver = resolver(transport.clone(), 500);

    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(resolver.cached_entries().await, 1);

    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_not_found_is_not_requeried() {
    let transport = ScriptedTransport::status(404, "");
    let resolver = resolver(transport.clone(), 500);

    for _ in 0..5 {
        assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    }
    assert_eq!(transport.calls(), 1);

    // A later registry change is not observed while the negative entry lives
    transport.set_fallback(Ok(HttpResponse::new(
        200,
        fixture("gleif-api-response.json"),
    )));
    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_is_cached_as_absent() {
    let transport = ScriptedTransport::always(Err(TransportError::Connect(
        "connection refused".to_string(),
    )));
    let resolver = resolver(transport.clone(), 500);

    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert!(resolver.is_cached(SOCGEN_EFFEKTEN));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_unparseable_body_is_absent() {
    let transport = ScriptedTransport::status(200, "<html>maintenance</html>");
    let resolver = resolver(transport.clone(), 500);

    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_malformed_lei_skips_cache_and_network() {
    let transport = ScriptedTransport::status(200, fixture("gleif-api-response.json"));
    let resolver = resolver(transport.clone(), 500);

    for lei in ["", "529900w18lqjjn6sj336", "529900W18LQJJN6SJ3", "529900W18LQJJN6SJ3X6"] {
        assert_eq!(resolver.resolve(lei).await, None);
        assert!(!resolver.is_cached(lei));
    }
    assert_eq!(resolver.cached_entries().await, 0);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_preload_serves_without_network() {
    let transport = ScriptedTransport::status(500, "");
    let client = GleifClient::with_transport(&test_config(), transport.clone());

    let preload = HashMap::from([
        (
            SOCGEN_EFFEKTEN.to_string(),
            Some(fixture("gleif-api-response.json")),
        ),
        ("5493001KJTIIGC8Y1R12".to_string(), None),
        ("213800D1EI4B9WTWWD28".to_string(), Some("not json".to_string())),
    ]);
    let resolver = LeiResolver::with_preload(client, 500, preload).await;

    assert!(resolver.resolve(SOCGEN_EFFEKTEN).await.is_some());
    assert_eq!(resolver.resolve("5493001KJTIIGC8Y1R12").await, None);
    assert_eq!(resolver.resolve("213800D1EI4B9WTWWD28").await, None);
    assert_eq!(resolver.cached_entries().await, 3);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_fetch_uncached_bypasses_cache() {
    let transport = ScriptedTransport::status(200, fixture("gleif-api-response.json"));
    let resolver = resolver(transport.clone(), 500);

    assert!(resolver.fetch_uncached(SOCGEN_EFFEKTEN).await.is_some());
    assert!(resolver.fetch_uncached(SOCGEN_EFFEKTEN).await.is_some());
    assert!(!resolver.is_cached(SOCGEN_EFFEKTEN));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_share_one_call() {
    let transport = ScriptedTransport::delayed(
        Duration::from_millis(200),
        Ok(HttpResponse::new(200, fixture("gleif-api-response.json"))),
    );
    let resolver = Arc::new(resolver(transport.clone(), 500));

    let lookups = (0..8).map(|_| {
        let resolver = resolver.clone();
        async move { resolver.resolve(SOCGEN_EFFEKTEN).await }
    });
    let results = futures::future::join_all(lookups).await;

    assert!(results.iter().all(|r| r.is_some()));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_registry_times_out() {
    let transport = ScriptedTransport::delayed(
        Duration::from_secs(60),
        Ok(HttpResponse::new(200, fixture("gleif-api-response.json"))),
    );
    let config = test_config().with_timeout(Duration::from_secs(10));
    let client = GleifClient::with_transport(&config, transport.clone());
    let resolver = LeiResolver::new(client, 500);

    assert_eq!(resolver.resolve(SOCGEN_EFFEKTEN).await, None);
    assert!(resolver.is_cached(SOCGEN_EFFEKTEN));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_cache_respects_capacity() {
    let transport = ScriptedTransport::status(404, "");
    let resolver = resolver(transport.clone(), 3);

    for n in 0..20 {
        let lei = numbered_lei(n);
        assert!(is_valid_lei(&lei));
        assert_eq!(resolver.resolve(&lei).await, None);
    }

    assert!(resolver.cached_entries().await <= 3);
    assert_eq!(transport.calls(), 20);
}

proptest! {
    #[test]
    fn prop_malformed_lei_never_reaches_registry(lei in ".{0,24}".prop_filter("malformed", |s| !is_valid_lei(s))) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let transport = ScriptedTransport::status(200, "{}");
        let resolver = resolver(transport.clone(), 10);

        let record = runtime.block_on(resolver.resolve(&lei));

        prop_assert_eq!(record, None);
        prop_assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn prop_well_formed_lei_is_accepted(lei in "[A-Z0-9]{18}[0-9]{2}") {
        prop_assert!(is_valid_lei(&lei));
    }
}
