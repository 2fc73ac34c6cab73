
use chorus::pipeline::{Dispatcher, FetchOutcome};
use std::sync::Arc;
use test_utils::{StubReply, StubTransport, stub_config};

#[tokio::test(start_paused = true)]
async fn test_one_result_per_source_under_partial_failure() {
    let config = stub_config(&["ok", "server-error", "hung", "refused", "empty"]);
    let transport = Arc::new(StubTransport::new(vec![
        ("ok", StubReply::Ok(r#"{"result": "a perfectly fine answer"}"#.to_string())),
        ("server-error", StubReply::Status(500, "oops".to_string())),
        ("hung", StubReply::Hang),
        ("refused", StubReply::Error("connection refused".to_string())),
        ("empty", StubReply::Ok("   ".to_string())),
    ]));

    let dispatcher = Dispatcher::new(transport, &config.network);
    let results = dispatcher.dispatch("any question", &config.sources).await;

    assert_eq!(results.len(), config.sources.len());

    // Results come back in source-configuration order
    let names: Vec<_> = results.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(names, ["ok", "server-error", "hung", "refused", "empty"]);

    assert!(matches!(&results[0].outcome, FetchOutcome::Success(_)));
    assert_eq!(results[1].outcome, FetchOutcome::Status(500));
    assert_eq!(results[2].outcome, FetchOutcome::Timeout);
    assert!(matches!(&results[3].outcome, FetchOutcome::Network(_)));
    assert_eq!(results[4].outcome, FetchOutcome::EmptyBody);
}

#[tokio::test(start_paused = true)]
async fn test_prompt_is_encoded_into_each_url() {
    let config = stub_config(&["one", "two"]);
    let transport = Arc::new(StubTransport::new(vec![(
        "stub.test",
        StubReply::Ok("irrelevant body text for this test".to_string()),
    )]));

    let dispatcher = Dispatcher::new(transport.clone(), &config.network);
    let _ = dispatcher.dispatch("what is 2 + 2?", &config.sources).await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    for url in &calls {
        assert!(url.contains("prompt=what+is+2+%2B+2%3F"), "unencoded url: {url}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_stays_within_worker_limit() {
    let names: Vec<String> = (0..8).map(|i| format!("source-{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut config = stub_config(&name_refs);
    config.network.max_concurrent_calls = 2;

    let transport = Arc::new(StubTransport::new(vec![(
        "stub.test",
        StubReply::Ok("a body long enough to count".to_string()),
    )]));

    let dispatcher = Dispatcher::new(transport.clone(), &config.network);
    let results = dispatcher.dispatch("question", &config.sources).await;

    assert_eq!(results.len(), 8);
    assert!(
        transport.max_in_flight() <= 2,
        "worker limit exceeded: {} in flight",
        transport.max_in_flight()
    );
}

#[tokio::test(start_paused = true)]
async fn test_no_source_is_called_twice() {
    let config = stub_config(&["alpha", "beta", "gamma"]);
    let transport = Arc::new(StubTransport::new(vec![
        ("alpha", StubReply::Error("flaky".to_string())),
        ("beta", StubReply::Status(503, String::new())),
        ("gamma", StubReply::Ok("the only good answer here".to_string())),
    ]));

    let dispatcher = Dispatcher::new(transport.clone(), &config.network);
    let _ = dispatcher.dispatch("question", &config.sources).await;

    // Failures are absences, not retries: one fetch per source
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_broken_template_degrades_to_absence() {
    let mut config = stub_config(&["good"]);
    config.sources.push(chorus::Source::new(
        "no-placeholder",
        "https://stub.test/static-endpoint",
    ));
    let transport = Arc::new(StubTransport::new(vec![(
        "stub.test",
        StubReply::Ok("a body long enough to count".to_string()),
    )]));

    let dispatcher = Dispatcher::new(transport.clone(), &config.network);
    let results = dispatcher.dispatch("question", &config.sources).await;

    assert_eq!(results.len(), 2);
    assert!(matches!(&results[0].outcome, FetchOutcome::Success(_)));
    assert!(matches!(&results[1].outcome, FetchOutcome::Network(_)));
}
