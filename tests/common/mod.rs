//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use astscope::config::ExplorerConfig;
use astscope::model::AppModel;
use astscope::runtime::Explorer;
use astscope::surface::{MarkHandle, SourceSurface, TreeSurface};
use astscope::syntax::{Ast, AstNode, LanguageRegistry, ParseResult, ParseService, SourceRange};

/// Registry `{auto, python: "py", go: "go"}`
pub fn test_registry() -> LanguageRegistry {
    LanguageRegistry::from_entries([("python", "Python", "py"), ("go", "Go", "go")])
        .expect("test registry is valid")
}

/// Model over `test_registry` with the given detected language
pub fn test_model(detected: &str) -> AppModel {
    test_model_with_config(detected, ExplorerConfig::default())
}

pub fn test_model_with_config(detected: &str, config: ExplorerConfig) -> AppModel {
    AppModel::new(test_registry(), config, detected)
}

/// `module [0,30)` with a single `call [10,20)` child
pub fn call_tree() -> Ast {
    Ast::new(
        "python",
        AstNode::new("module", SourceRange::new(0, 30))
            .with_children(vec![AstNode::new("call", SourceRange::new(10, 20))]),
    )
}

// ============================================================================
// Fake source surface
// ============================================================================

#[derive(Debug, Default)]
struct MarkLog {
    next_id: u64,
    live: Vec<(u64, SourceRange)>,
}

/// Editor surface that records every call
#[derive(Debug, Default)]
pub struct FakeSource {
    pub code: String,
    pub modes: Vec<String>,
    pub select_calls: Vec<SourceRange>,
    marks: Rc<RefCell<MarkLog>>,
}

pub struct FakeMark {
    id: u64,
    log: Rc<RefCell<MarkLog>>,
}

impl MarkHandle for FakeMark {
    fn clear(&mut self) {
        self.log.borrow_mut().live.retain(|(id, _)| *id != self.id);
    }
}

impl FakeSource {
    pub fn live_marks(&self) -> Vec<SourceRange> {
        self.marks.borrow().live.iter().map(|(_, r)| *r).collect()
    }

    pub fn last_mode(&self) -> Option<&str> {
        self.modes.last().map(String::as_str)
    }
}

impl SourceSurface for FakeSource {
    type Mark = FakeMark;

    fn set_mode(&mut self, mode: &str) {
        self.modes.push(mode.to_string());
    }

    fn select_range(&mut self, range: SourceRange) -> FakeMark {
        self.select_calls.push(range);
        let mut log = self.marks.borrow_mut();
        log.next_id += 1;
        let id = log.next_id;
        log.live.push((id, range));
        FakeMark {
            id,
            log: Rc::clone(&self.marks),
        }
    }

    fn code(&self) -> String {
        self.code.clone()
    }
}

// ============================================================================
// Fake tree surface
// ============================================================================

#[derive(Debug, Default)]
pub struct FakeTree {
    pub selected: Vec<usize>,
}

impl TreeSurface for FakeTree {
    fn select_node(&mut self, position: usize) {
        self.selected.push(position);
    }
}

// ============================================================================
// Scripted parse service
// ============================================================================

/// Parse service that answers by code text, optionally after a delay
#[derive(Default)]
pub struct ScriptedService {
    responses: HashMap<String, (Duration, ParseResult)>,
    crashes: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, code: &str, result: ParseResult) -> Self {
        self.responses
            .insert(code.to_string(), (Duration::ZERO, result));
        self
    }

    pub fn respond_after(mut self, code: &str, delay_ms: u64, result: ParseResult) -> Self {
        self.responses.insert(
            code.to_string(),
            (Duration::from_millis(delay_ms), result),
        );
        self
    }

    /// Panic inside the worker when asked to parse `code`
    pub fn crash_on(mut self, code: &str) -> Self {
        self.crashes.insert(code.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ParseService for ScriptedService {
    fn parse(&self, language: &str, code: &str) -> ParseResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_ne!(language, "auto", "parse service called with auto");
        if self.crashes.contains(code) {
            panic!("scripted crash for {:?}", code);
        }

        match self.responses.get(code) {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    std::thread::sleep(*delay);
                }
                result.clone()
            }
            None => Err(vec![format!("no scripted response for {:?}", code)]),
        }
    }
}

/// Explorer over fake surfaces
pub fn test_explorer(
    model: AppModel,
    service: Arc<ScriptedService>,
) -> Explorer<FakeSource, FakeTree> {
    Explorer::new(model, FakeSource::default(), FakeTree::default(), service)
}
