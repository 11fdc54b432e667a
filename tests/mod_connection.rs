use async_trait::async_trait;
use broodstats::ApiError;
use broodstats::connection::{ApiPath, Connection, ResilientConnection};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted transport: pops one body per fetch, repeating the last entry
/// once the script runs out.
struct ScriptedConnection {
    bodies: Mutex<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedConnection {
    fn new(bodies: &[&str], calls: Arc<AtomicUsize>) -> Self {
        Self {
            bodies: Mutex::new(bodies.iter().rev().map(|s| (*s).to_string()).collect()),
            calls,
        }
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn fetch(&self, _path: &ApiPath) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut bodies = self.bodies.lock();
        if bodies.len() > 1 {
            Ok(bodies.pop().expect("scripted body"))
        } else {
            Ok(bodies.last().expect("scripted body").clone())
        }
    }
}

#[tokio::test]
async fn recovers_from_two_false_errors_on_the_third_attempt() {
    let calls = Arc::new(AtomicUsize::new(0));
    let connection = ResilientConnection::new(ScriptedConnection::new(
        &["Internal Error", "internal server error: oops", "{\"ok\":true}"],
        calls.clone(),
    ));

    let body = connection.fetch(&ApiPath::Gateway).await.unwrap();
    assert_eq!(body, "{\"ok\":true}");
    assert_eq!(calls.load(Ordering::SeqCst), 3, "exactly three underlying calls");
}

#[tokio::test]
async fn gives_up_after_exactly_three_attempts() {
    let calls = Arc::new(AtomicUsize::new(0));
    let connection =
        ResilientConnection::new(ScriptedConnection::new(&["internal error"], calls.clone()));

    let err = connection.fetch(&ApiPath::Gateway).await.unwrap_err();
    assert!(err.is_transient(), "exhaustion surfaces the transient failure unchanged: {err}");
    assert_eq!(calls.load(Ordering::SeqCst), 3, "no more than three underlying calls");
}

#[tokio::test]
async fn non_matching_error_text_passes_through_without_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let connection =
        ResilientConnection::new(ScriptedConnection::new(&["bad request"], calls.clone()));

    // Not a transient signature, so the body comes back verbatim and it is
    // the caller's problem once decoding fails.
    let body = connection.fetch(&ApiPath::Gateway).await.unwrap();
    assert_eq!(body, "bad request");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn valid_payloads_do_not_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let connection =
        ResilientConnection::new(ScriptedConnection::new(&["{\"rows\":[]}"], calls.clone()));

    assert_eq!(connection.fetch(&ApiPath::Gateway).await.unwrap(), "{\"rows\":[]}");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
