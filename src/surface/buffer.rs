//! Headless editor surface backed by a rope
//!
//! Keeps the code text, the current mode and the set of live marks so the
//! CLI can print highlights and tests can observe what the session did.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use ropey::Rope;

use super::{MarkHandle, SourceSurface};
use crate::messages::EditorMsg;
use crate::syntax::SourceRange;

#[derive(Debug, Default)]
struct MarkTable {
    next_id: u64,
    live: BTreeMap<u64, SourceRange>,
    /// Total marks ever created
    created: usize,
}

/// Handle to a mark in a `BufferSurface`
#[derive(Debug)]
pub struct BufferMark {
    id: u64,
    table: Weak<RefCell<MarkTable>>,
}

impl MarkHandle for BufferMark {
    fn clear(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().live.remove(&self.id);
        }
    }
}

/// In-memory editor surface
#[derive(Debug, Default)]
pub struct BufferSurface {
    text: Rope,
    mode: Option<String>,
    cursor: usize,
    marks: Rc<RefCell<MarkTable>>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Replace the text, returning the change event to dispatch
    pub fn set_text(&mut self, text: &str) -> EditorMsg {
        self.text = Rope::from_str(text);
        self.cursor = self.cursor.min(self.text.len_bytes());
        EditorMsg::CodeChanged(text.to_string())
    }

    /// Move the cursor to a byte offset, returning the event to dispatch
    pub fn move_cursor(&mut self, byte: usize) -> EditorMsg {
        self.cursor = byte.min(self.text.len_bytes());
        EditorMsg::CursorMoved(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_bytes(&self) -> usize {
        self.text.len_bytes()
    }

    /// Mode last set by the session
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Ranges of marks that are currently live, in creation order
    pub fn live_marks(&self) -> Vec<SourceRange> {
        self.marks.borrow().live.values().copied().collect()
    }

    /// Number of marks ever created
    pub fn marks_created(&self) -> usize {
        self.marks.borrow().created
    }

    /// 0-based (line, column) for a byte offset; columns count chars
    pub fn line_col(&self, byte: usize) -> (usize, usize) {
        let byte = byte.min(self.text.len_bytes());
        let line = self.text.byte_to_line(byte);
        let col = self.text.byte_to_char(byte) - self.text.line_to_char(line);
        (line, col)
    }

    /// Byte offset of a 0-based (line, column), clamped to the text
    pub fn byte_offset(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.text.len_lines().saturating_sub(1));
        let line_start = self.text.line_to_char(line);
        let line_text = self.text.line(line);
        let mut line_len = line_text.len_chars();
        // Don't step past the line break
        if line_len > 0 && line_text.char(line_len - 1) == '\n' {
            line_len -= 1;
        }
        self.text.char_to_byte(line_start + col.min(line_len))
    }

    /// Text covered by `range`, clamped to the buffer
    pub fn slice(&self, range: SourceRange) -> String {
        let len = self.text.len_bytes();
        let start = self.text.byte_to_char(range.from.min(len));
        let end = self.text.byte_to_char(range.to.min(len));
        self.text.slice(start..end).to_string()
    }
}

impl SourceSurface for BufferSurface {
    type Mark = BufferMark;

    fn set_mode(&mut self, mode: &str) {
        tracing::trace!("Editor mode set to {}", mode);
        self.mode = Some(mode.to_string());
    }

    fn select_range(&mut self, range: SourceRange) -> BufferMark {
        let mut table = self.marks.borrow_mut();
        table.next_id += 1;
        table.created += 1;
        let id = table.next_id;
        table.live.insert(id, range);
        BufferMark {
            id,
            table: Rc::downgrade(&self.marks),
        }
    }

    fn code(&self) -> String {
        self.text.to_string()
    }
}
