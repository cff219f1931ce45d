//! Parse request lifecycle tests
//!
//! Drives the explorer runtime with a scripted parse service on worker
//! threads: status transitions, stale-result rejection, error clearing,
//! tree preservation on failure, and timeouts.

mod common;

use std::sync::Arc;
use std::time::Duration;

use astscope::config::ExplorerConfig;
use astscope::messages::{EditorMsg, ParseMsg};
use astscope::model::{ErrorKind, ParseStatus};
use astscope::syntax::{Ast, AstNode, SourceRange, AUTO};
use common::{test_explorer, test_model_with_config, ScriptedService};

const WAIT: Option<Duration> = Some(Duration::from_secs(5));

fn no_timeout() -> ExplorerConfig {
    ExplorerConfig {
        parse_timeout_ms: 0,
        ..ExplorerConfig::default()
    }
}

fn tree(kind: &str, len: usize) -> Ast {
    Ast::new("python", AstNode::new(kind, SourceRange::new(0, len)))
}

fn root_kind(ast: Option<&Ast>) -> Option<&str> {
    ast.map(|a| a.root.kind.as_str())
}

// ========================================================================
// Basic transitions
// ========================================================================

#[test]
fn test_successful_parse() {
    let service = Arc::new(ScriptedService::new().respond("x = 1", Ok(tree("module", 5))));
    let mut explorer = test_explorer(
        test_model_with_config("python", no_timeout()),
        service.clone(),
    );

    explorer.dispatch(EditorMsg::CodeChanged("x = 1".to_string()));
    assert!(explorer.dispatch(ParseMsg::Start));
    assert_eq!(explorer.model().session.parse_status, ParseStatus::Loading);

    assert!(explorer.wait_for_parse(WAIT));
    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Succeeded);
    assert_eq!(root_kind(session.ast.as_ref()), Some("module"));
    assert!(session.errors.is_empty());
    assert!(session.in_flight().is_none());
    assert_eq!(service.calls(), 1);
}

#[test]
fn test_failed_parse_records_errors_in_order() {
    let service = Arc::new(ScriptedService::new().respond(
        "def",
        Err(vec!["1:0: first".to_string(), "1:3: second".to_string()]),
    ));
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    explorer.dispatch(EditorMsg::CodeChanged("def".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);

    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Failed);
    assert_eq!(session.errors.texts(), vec!["1:0: first", "1:3: second"]);
    assert!(session.errors.iter().all(|e| e.kind == ErrorKind::Service));
}

#[test]
fn test_parse_without_language_never_calls_service() {
    let service = Arc::new(ScriptedService::new());
    let mut model = test_model_with_config("python", no_timeout());
    model.session.detected_language = AUTO.to_string();
    let mut explorer = test_explorer(model, service.clone());

    explorer.dispatch(ParseMsg::Start);

    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Failed);
    assert_eq!(session.errors.len(), 1);
    assert_eq!(service.calls(), 0);
}

#[test]
fn test_edits_keep_dirty_flag_after_parse() {
    let service = Arc::new(ScriptedService::new().respond("x", Ok(tree("module", 1))));
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    assert!(!explorer.model().session.dirty);
    explorer.dispatch(EditorMsg::CodeChanged("x".to_string()));
    assert!(explorer.model().session.dirty);

    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);
    assert!(explorer.model().session.dirty);
}

// ========================================================================
// Stale responses
// ========================================================================

#[test]
fn test_slow_superseded_request_is_discarded() {
    let service = Arc::new(
        ScriptedService::new()
            .respond_after("A", 200, Ok(tree("tree_a", 1)))
            .respond("B", Ok(tree("tree_b", 1))),
    );
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    explorer.dispatch(EditorMsg::CodeChanged("A".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.dispatch(EditorMsg::CodeChanged("B".to_string()));
    explorer.dispatch(ParseMsg::Start);

    assert!(explorer.wait_for_parse(WAIT));
    assert_eq!(
        root_kind(explorer.model().session.ast.as_ref()),
        Some("tree_b")
    );

    // Let A arrive late
    std::thread::sleep(Duration::from_millis(400));
    explorer.process_async_messages();

    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Succeeded);
    assert_eq!(root_kind(session.ast.as_ref()), Some("tree_b"));
}

#[test]
fn test_fast_superseded_request_is_discarded() {
    let service = Arc::new(
        ScriptedService::new()
            .respond("A", Err(vec!["from A".to_string()]))
            .respond_after("B", 200, Ok(tree("tree_b", 1))),
    );
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    explorer.dispatch(EditorMsg::CodeChanged("A".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.dispatch(EditorMsg::CodeChanged("B".to_string()));
    explorer.dispatch(ParseMsg::Start);

    // A resolves while B is still running
    std::thread::sleep(Duration::from_millis(50));
    explorer.process_async_messages();
    {
        let session = &explorer.model().session;
        assert_eq!(session.parse_status, ParseStatus::Loading);
        assert!(session.errors.is_empty());
        assert!(session.ast.is_none());
    }

    assert!(explorer.wait_for_parse(WAIT));
    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Succeeded);
    assert!(session.errors.is_empty());
    assert_eq!(root_kind(session.ast.as_ref()), Some("tree_b"));
}

// ========================================================================
// Error clearing and tree preservation
// ========================================================================

#[test]
fn test_new_request_clears_errors() {
    let service = Arc::new(
        ScriptedService::new()
            .respond("bad", Err(vec!["e1".to_string(), "e2".to_string()]))
            .respond("good", Ok(tree("module", 4))),
    );
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    explorer.dispatch(EditorMsg::CodeChanged("bad".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);
    assert_eq!(explorer.model().session.errors.len(), 2);

    explorer.dispatch(EditorMsg::CodeChanged("good".to_string()));
    explorer.dispatch(ParseMsg::Start);
    assert_eq!(explorer.model().session.parse_status, ParseStatus::Loading);
    assert!(explorer.model().session.errors.is_empty());
}

#[test]
fn test_failure_preserves_previous_tree() {
    let service = Arc::new(
        ScriptedService::new()
            .respond("good", Ok(tree("module", 4)))
            .respond("bad", Err(vec!["oops".to_string()])),
    );
    let mut explorer = test_explorer(test_model_with_config("python", no_timeout()), service);

    explorer.dispatch(EditorMsg::CodeChanged("good".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);
    let before = explorer.model().session.ast.clone();
    assert!(before.is_some());

    explorer.dispatch(EditorMsg::CodeChanged("bad".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);

    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Failed);
    assert_eq!(session.ast, before);
    assert_eq!(session.errors.texts(), vec!["oops"]);
}

// ========================================================================
// Timeouts
// ========================================================================

#[test]
fn test_hung_request_times_out() {
    let config = ExplorerConfig {
        parse_timeout_ms: 50,
        ..ExplorerConfig::default()
    };
    let service =
        Arc::new(ScriptedService::new().respond_after("slow", 500, Ok(tree("module", 4))));
    let mut explorer = test_explorer(test_model_with_config("python", config), service);

    explorer.dispatch(EditorMsg::CodeChanged("slow".to_string()));
    explorer.dispatch(ParseMsg::Start);
    assert!(explorer.wait_for_parse(WAIT));

    {
        let session = &explorer.model().session;
        assert_eq!(session.parse_status, ParseStatus::Failed);
        assert_eq!(session.errors.len(), 1);
        assert_eq!(
            session.errors.get(0).map(|e| e.kind),
            Some(ErrorKind::Timeout)
        );
    }

    // The late result must not resurrect the request
    std::thread::sleep(Duration::from_millis(700));
    explorer.process_async_messages();
    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Failed);
    assert!(session.ast.is_none());
}

#[test]
fn test_timer_for_resolved_request_is_ignored() {
    let config = ExplorerConfig {
        parse_timeout_ms: 100,
        ..ExplorerConfig::default()
    };
    let service = Arc::new(ScriptedService::new().respond("fast", Ok(tree("module", 4))));
    let mut explorer = test_explorer(test_model_with_config("python", config), service);

    explorer.dispatch(EditorMsg::CodeChanged("fast".to_string()));
    explorer.dispatch(ParseMsg::Start);
    explorer.wait_for_parse(WAIT);
    assert_eq!(explorer.model().session.parse_status, ParseStatus::Succeeded);

    std::thread::sleep(Duration::from_millis(250));
    explorer.process_async_messages();
    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Succeeded);
    assert!(session.errors.is_empty());
}

#[test]
fn test_crashing_parser_resolves_request() {
    let service = Arc::new(ScriptedService::new().crash_on("boom"));
    let mut explorer = test_explorer(
        test_model_with_config("python", no_timeout()),
        service.clone(),
    );

    explorer.dispatch(EditorMsg::CodeChanged("boom".to_string()));
    explorer.dispatch(ParseMsg::Start);

    // No timer is armed, so only the worker can resolve the request
    assert!(explorer.wait_for_parse(None));
    let session = &explorer.model().session;
    assert_eq!(session.parse_status, ParseStatus::Failed);
    assert_eq!(
        session.errors.texts(),
        vec!["parser crashed while parsing python"]
    );
    assert!(session.in_flight().is_none());
    assert_eq!(service.calls(), 1);
}
