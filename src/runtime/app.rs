use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::messages::{Msg, ParseMsg};
use crate::model::{AppModel, ParseRequest};
use crate::surface::{SourceSurface, TreeSurface};
use crate::syntax::ParseService;
use crate::update::update;

use super::highlight::HighlightSlot;

/// Drives an `AppModel` against a pair of surfaces and a parse service
///
/// Updates run on the caller's thread. Parse requests and timeout timers run
/// on worker threads and report back over a channel that is drained by
/// `process_async_messages` or `wait_for_parse`.
pub struct Explorer<S: SourceSurface, T: TreeSurface> {
    model: AppModel,
    source: S,
    tree: T,
    highlight: HighlightSlot<S::Mark>,
    service: Arc<dyn ParseService>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl<S: SourceSurface, T: TreeSurface> Explorer<S, T> {
    pub fn new(model: AppModel, mut source: S, tree: T, service: Arc<dyn ParseService>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();

        source.set_mode(&model.edit_mode());

        Self {
            model,
            source,
            tree,
            highlight: HighlightSlot::new(),
            service,
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn highlight(&self) -> &HighlightSlot<S::Mark> {
        &self.highlight
    }

    /// Run one message through update and execute the resulting command
    ///
    /// Returns whether the message asked for a redraw.
    pub fn dispatch(&mut self, msg: impl Into<Msg>) -> bool {
        match update(&mut self.model, msg.into()) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::SetEditorMode { mode } => {
                self.source.set_mode(&mode);
            }
            Cmd::SelectTreeNode { position } => {
                self.tree.select_node(position);
            }
            Cmd::HighlightSource { range } => {
                self.highlight.replace(&mut self.source, range);
            }
            Cmd::ClearHighlight => {
                self.highlight.clear();
            }

            Cmd::RunParse { request } => {
                let tx = self.msg_tx.clone();
                let service = Arc::clone(&self.service);
                std::thread::spawn(move || {
                    let ParseRequest { id, language, code } = request;
                    // A panicking backend still has to resolve the request
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        service.parse(&language, &code)
                    }))
                    .unwrap_or_else(|_| {
                        tracing::error!("Parse worker for {} panicked", language);
                        Err(vec![format!("parser crashed while parsing {}", language)])
                    });
                    let _ = tx.send(Msg::Parse(ParseMsg::Completed {
                        request: id,
                        result,
                    }));
                });
            }
            Cmd::ScheduleParseTimeout { request, delay_ms } => {
                let tx = self.msg_tx.clone();
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                    let _ = tx.send(Msg::Parse(ParseMsg::TimedOut { request }));
                });
            }
        }
    }

    /// Drain pending worker messages without blocking
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if self.dispatch(msg) {
                needs_redraw = true;
            }
        }
        needs_redraw
    }

    /// Block until the in-flight parse resolves or `limit` elapses
    ///
    /// Returns `true` if the session is no longer loading.
    pub fn wait_for_parse(&mut self, limit: Option<Duration>) -> bool {
        let deadline = limit.map(|d| Instant::now() + d);

        while self.model.session.is_loading() {
            let msg = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match self.msg_rx.recv_timeout(remaining) {
                        Ok(msg) => msg,
                        Err(RecvTimeoutError::Timeout) => return false,
                        Err(RecvTimeoutError::Disconnected) => return false,
                    }
                }
                None => match self.msg_rx.recv() {
                    Ok(msg) => msg,
                    Err(_) => return false,
                },
            };
            self.dispatch(msg);
        }
        true
    }
}
