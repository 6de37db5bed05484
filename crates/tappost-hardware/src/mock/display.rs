//! Mock display capturing rendered frames.

use crate::traits::Display;
use std::sync::{Arc, Mutex};

/// One flushed display frame.
///
/// Each line records the text size active when it was written, so tests can
/// distinguish title lines (size 2) from body lines (size 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Written lines in order: `(text_size, text)`.
    pub lines: Vec<(u8, String)>,
}

impl Frame {
    /// The line texts without their sizes.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|(_, t)| t.as_str()).collect()
    }

    /// Whether any line equals `text` exactly.
    pub fn has_line(&self, text: &str) -> bool {
        self.lines.iter().any(|(_, t)| t == text)
    }
}

/// Mock display that records every flushed frame.
///
/// Implements the panel call sequence (clear, cursor, text size, write,
/// flush) by accumulating written lines into a pending frame; `flush`
/// snapshots the pending frame into a shared history the handle can inspect.
#[derive(Debug)]
pub struct MockDisplay {
    pending: Frame,
    text_size: u8,
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MockDisplay {
    /// Create a new display and its inspection handle.
    pub fn new() -> (Self, MockDisplayHandle) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let display = Self {
            pending: Frame::default(),
            text_size: 1,
            frames: Arc::clone(&frames),
        };
        (display, MockDisplayHandle { frames })
    }
}

impl Display for MockDisplay {
    fn clear(&mut self) {
        self.pending = Frame::default();
    }

    fn set_cursor(&mut self, _x: u8, _y: u8) {
        // Cursor position does not affect captured text content.
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn write_line(&mut self, text: &str) {
        self.pending.lines.push((self.text_size, text.to_string()));
    }

    fn flush(&mut self) {
        self.frames
            .lock()
            .expect("frame log poisoned")
            .push(self.pending.clone());
    }
}

/// Handle for inspecting frames rendered on a [`MockDisplay`].
#[derive(Debug, Clone)]
pub struct MockDisplayHandle {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MockDisplayHandle {
    /// All flushed frames, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().expect("frame log poisoned").clone()
    }

    /// The most recently flushed frame, if any.
    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.lock().expect("frame log poisoned").last().cloned()
    }

    /// Whether any flushed frame contains `text` as a full line.
    pub fn saw_line(&self, text: &str) -> bool {
        self.frames
            .lock()
            .expect("frame log poisoned")
            .iter()
            .any(|f| f.has_line(text))
    }

    /// Number of frames flushed so far.
    pub fn frame_count(&self) -> usize {
        self.frames.lock().expect("frame log poisoned").len()
    }
}
