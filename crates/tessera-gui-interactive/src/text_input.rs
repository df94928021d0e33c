//! Multi-line text buffer with a cursor
//!
//! The lines and cursor live behind a shared lock so that a [`TextWriter`]
//! handle on another thread can append output while the UI thread edits.
//! Columns are counted in characters, never bytes.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tessera_gui::{
    push_rect, theme, Color, Direction, DrawSink, Event, IVec2, Key, MouseButton, NamedKey,
    TextAlign, TextMeasure, TextRun, Vec2, Widget, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::scrollbar::Scrollbar;

/// Byte offset of character column `col`, or the end of the line
pub(crate) fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

pub(crate) fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Column and row of the text cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCursor {
    pub col: usize,
    pub row: usize,
}

impl TextCursor {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Lines and cursor guarded by the buffer lock.
///
/// There is always at least one line and the cursor always addresses a
/// position inside the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub lines: Vec<String>,
    pub cursor: TextCursor,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: TextCursor::default(),
        }
    }
}

impl TextState {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| char_len(l))
    }

    pub fn last_row(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor.row = self.cursor.row.min(self.last_row());
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.clamp_cursor();
    }

    /// Insert at the cursor, leaving the cursor after the inserted text
    pub fn insert_str(&mut self, text: &str) {
        self.clamp_cursor();
        let TextCursor { mut col, mut row } = self.cursor;
        let mut pieces = text.split('\n');

        let line = &mut self.lines[row];
        let tail = line.split_off(byte_index(line, col));
        let head = pieces.next().unwrap_or_default();
        line.push_str(head);
        col += char_len(head);

        for piece in pieces {
            row += 1;
            self.lines.insert(row, piece.to_string());
            col = char_len(piece);
        }
        self.lines[row].push_str(&tail);
        self.cursor = TextCursor { col, row };
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Delete before the cursor, joining with the previous line at column 0
    pub fn backspace(&mut self) -> bool {
        let TextCursor { col, row } = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            line.remove(byte_index(line, col - 1));
            self.cursor.col -= 1;
            true
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            let len = char_len(prev);
            prev.push_str(&tail);
            self.cursor = TextCursor::new(len, row - 1);
            true
        } else {
            false
        }
    }

    /// Delete under the cursor, joining with the next line at line end
    pub fn delete(&mut self) -> bool {
        let TextCursor { col, row } = self.cursor;
        if col < self.line_len(row) {
            let line = &mut self.lines[row];
            line.remove(byte_index(line, col));
            true
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            true
        } else {
            false
        }
    }

    pub fn split_line(&mut self) {
        let TextCursor { col, row } = self.cursor;
        let line = &mut self.lines[row];
        let tail = line.split_off(byte_index(line, col));
        self.lines.insert(row + 1, tail);
        self.cursor = TextCursor::new(0, row + 1);
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let TextCursor { col, row } = self.cursor;
        match direction {
            Direction::Left if col > 0 => self.cursor.col -= 1,
            Direction::Left if row > 0 => {
                self.cursor = TextCursor::new(self.line_len(row - 1), row - 1);
            }
            Direction::Right if col < self.line_len(row) => self.cursor.col += 1,
            Direction::Right if row + 1 < self.lines.len() => {
                self.cursor = TextCursor::new(0, row + 1);
            }
            Direction::Up if row > 0 => {
                self.cursor = TextCursor::new(col.min(self.line_len(row - 1)), row - 1);
            }
            Direction::Down if row + 1 < self.lines.len() => {
                self.cursor = TextCursor::new(col.min(self.line_len(row + 1)), row + 1);
            }
            _ => {}
        }
    }

    /// Insert `text` as new lines above the last `lines_back` lines.
    /// A single trailing newline is ignored.
    pub fn push_text(&mut self, text: &str, lines_back: usize) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let at = self.lines.len().saturating_sub(lines_back);
        let before = self.lines.len();
        self.lines
            .splice(at..at, text.split('\n').map(str::to_string));
        if self.cursor.row >= at {
            self.cursor.row += self.lines.len() - before;
        }
    }

    /// Remove `chars` characters from the end of the text above the last
    /// `lines_back` lines. Each removed line break counts as one character.
    pub fn pop_text(&mut self, chars: usize, lines_back: usize) {
        let mut remaining = chars;
        while remaining > 0 {
            let len = self.lines.len();
            if len <= lines_back {
                break;
            }
            let row = len - lines_back - 1;
            let count = self.line_len(row);
            if count >= remaining {
                let line = &mut self.lines[row];
                line.truncate(byte_index(line, count - remaining));
                remaining = 0;
            } else if len == 1 {
                self.lines[0].clear();
                break;
            } else {
                remaining -= count + 1;
                self.lines.remove(row);
                if self.cursor.row >= row && self.cursor.row > 0 {
                    self.cursor.row -= 1;
                }
            }
        }
        self.clamp_cursor();
    }
}

/// Cloneable handle for appending to a [`TextBuffer`] from any thread
#[derive(Debug, Clone)]
pub struct TextWriter {
    state: Arc<Mutex<TextState>>,
}

impl TextWriter {
    pub fn push_text(&self, text: &str, lines_back: usize) {
        self.state.lock().push_text(text, lines_back);
    }

    pub fn pop_text(&self, chars: usize, lines_back: usize) {
        self.state.lock().pop_text(chars, lines_back);
    }

    pub fn text(&self) -> String {
        self.state.lock().text()
    }
}

/// Visual styling for a text buffer
#[derive(Debug, Clone, WithBuilders)]
pub struct TextBufferStyle {
    pub text_size: f32,
    pub default_bg_color: Color,
    pub active_bg_color: Color,
    pub default_line_color: Color,
    pub active_line_color: Color,
    pub text_color: Color,
    pub cursor_color: Color,
    /// Inner margin between border and text
    pub padding: Vec2,
}

impl Default for TextBufferStyle {
    fn default() -> Self {
        Self {
            text_size: 12.0,
            default_bg_color: theme::TEXT_BG,
            active_bg_color: theme::BG_GRID.with_alpha(0.65),
            default_line_color: theme::GUI_FG,
            active_line_color: theme::GUI_FG_ACTIVE,
            text_color: theme::GUI_TEXT,
            cursor_color: theme::GUI_FG_ACTIVE,
            padding: Vec2::splat(PAD_DIST),
        }
    }
}

/// What a single event did to a text buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResponse {
    pub handled: bool,
    /// Buffer contents changed
    pub changed: bool,
    /// Enter pressed in single-line mode; holds the buffer text
    pub submitted: Option<String>,
}

/// Editable text area
#[derive(Debug)]
pub struct TextBuffer {
    pub widget: Widget,
    pub style: TextBufferStyle,
    pub scrollbar: Scrollbar,
    state: Arc<Mutex<TextState>>,
    /// Visible columns and rows
    pub size_chars: IVec2,
    /// Keep the widget size instead of deriving it from `size_chars`
    pub fixed_size: bool,
    /// Currently editable
    pub active: bool,
    /// Editing disabled
    pub locked: bool,
    /// Editable regardless of pointer position
    pub force_active: bool,
    /// Enter splits lines rather than submitting
    pub multiline: bool,
    char_size: Vec2,
}

impl Default for TextBuffer {
    fn default() -> Self {
        let style = TextBufferStyle::default();
        Self {
            char_size: Vec2::new(0.6, 1.2) * style.text_size,
            widget: Widget::default(),
            style,
            scrollbar: Scrollbar::new(),
            state: Arc::new(Mutex::new(TextState::default())),
            size_chars: IVec2::new(80, 2),
            fixed_size: false,
            active: false,
            locked: false,
            force_active: false,
            multiline: true,
        }
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_line() -> Self {
        Self {
            multiline: false,
            size_chars: IVec2::new(40, 1),
            ..Self::default()
        }
    }

    /// Handle for background writers
    pub fn writer(&self) -> TextWriter {
        TextWriter {
            state: Arc::clone(&self.state),
        }
    }

    /// Lock the shared lines and cursor. Do not hold across event handling.
    pub fn lock(&self) -> MutexGuard<'_, TextState> {
        self.state.lock()
    }

    pub fn get_text(&self) -> String {
        self.lock().text()
    }

    /// Replace the contents. With `set_size` the visible area grows to fit.
    pub fn set_text(&mut self, text: &str, set_size: bool) {
        let mut state = self.state.lock();
        state.set_text(text);
        if set_size {
            let cols = state.lines.iter().map(|l| char_len(l)).max().unwrap_or(0);
            self.size_chars = IVec2::new(cols.max(1) as i32, state.lines.len() as i32);
        }
        drop(state);
        self.sync_scroll();
    }

    pub fn set_lines(&mut self, lines: &[String]) {
        {
            let mut state = self.state.lock();
            state.lines = lines.to_vec();
            state.clamp_cursor();
        }
        self.sync_scroll();
    }

    pub fn insert_text(&mut self, text: &str) {
        self.state.lock().insert_str(text);
        self.sync_scroll();
    }

    pub fn push_text(&mut self, text: &str, lines_back: usize) {
        self.state.lock().push_text(text, lines_back);
        self.sync_scroll();
    }

    pub fn pop_text(&mut self, chars: usize) {
        self.state.lock().pop_text(chars, 1);
        self.sync_scroll();
    }

    pub fn cursor(&self) -> TextCursor {
        self.lock().cursor
    }

    pub fn set_cursor(&mut self, cursor: TextCursor) {
        let mut state = self.state.lock();
        state.cursor = cursor;
        state.clamp_cursor();
    }

    pub fn line_count(&self) -> usize {
        self.lock().lines.len()
    }

    pub fn char_size(&self) -> Vec2 {
        self.char_size
    }

    /// Refresh character metrics and, unless fixed, the widget size
    pub fn layout(&mut self, measure: &dyn TextMeasure) {
        self.char_size = measure.char_size(self.style.text_size);
        if !self.fixed_size {
            self.widget.size =
                self.size_chars.as_vec2() * self.char_size + 2.0 * self.style.padding;
        } else if self.char_size.y > 0.0 {
            let inner = self.widget.size - 2.0 * self.style.padding;
            self.size_chars = (inner / self.char_size).floor().as_ivec2().max(IVec2::ONE);
        }
        self.scrollbar.attach_to(&self.widget);
        self.sync_scroll();
    }

    fn visible_rows(&self) -> usize {
        self.size_chars.y.max(1) as usize
    }

    /// Update the scroll window after the line count changed, following the
    /// end of the buffer if the view was already there.
    pub fn sync_scroll(&mut self) {
        let count = self.line_count();
        let following = self.scrollbar.last() >= self.scrollbar.steps();
        self.scrollbar.set_window(self.visible_rows(), count);
        if following {
            self.scrollbar
                .set_first(count.saturating_sub(self.visible_rows()));
        }
    }

    /// Scroll so the last lines are visible
    pub fn scroll_for_input(&mut self) {
        let count = self.line_count();
        self.scrollbar.set_window(self.visible_rows(), count);
        self.scrollbar
            .set_first(count.saturating_sub(self.visible_rows()));
    }

    fn reveal_cursor(&mut self) {
        let row = self.cursor().row;
        self.sync_scroll();
        self.scrollbar.make_visible(row);
    }

    /// Text cell under a point, clamped to the buffer
    pub fn cursor_at(&self, pos: Vec2) -> TextCursor {
        let state = self.lock();
        let left = self.widget.min().x + self.style.padding.x;
        let top = self.widget.max().y - self.style.padding.y;
        let cell = self.char_size.max(Vec2::splat(f32::EPSILON));
        let col = ((pos.x - left) / cell.x).round().max(0.0) as usize;
        let row = self.scrollbar.first() + ((top - pos.y) / cell.y).floor().max(0.0) as usize;
        let row = row.min(state.last_row());
        TextCursor::new(col.min(state.line_len(row)), row)
    }

    fn update_active(&mut self) {
        self.active = !self.locked && (self.force_active || self.widget.hovered);
    }

    pub fn handle_event(&mut self, event: &Event) -> TextResponse {
        let mut response = TextResponse::default();
        if !self.widget.active {
            return response;
        }
        // writers may have added lines since the last event
        self.sync_scroll();
        if let Some(pos) = event.pointer_pos() {
            self.widget.hovered = self.widget.contains(pos);
        }
        self.update_active();

        if self.scrollbar.handle_event(event, Some(&self.widget)) {
            response.handled = true;
            return response;
        }

        match *event {
            Event::PointerDown {
                button: MouseButton::Left,
                pos,
            } if self.active && self.widget.hovered => {
                let cursor = self.cursor_at(pos);
                self.set_cursor(cursor);
                response.handled = true;
            }
            Event::KeyDown(key) if self.active => {
                response = self.handle_key(key);
            }
            _ => {}
        }
        response
    }

    fn handle_key(&mut self, key: Key) -> TextResponse {
        let mut response = TextResponse {
            handled: true,
            ..Default::default()
        };
        {
            let mut state = self.state.lock();
            match key {
                Key::Named(NamedKey::Home) => state.cursor.col = 0,
                Key::Named(NamedKey::End) => state.cursor.col = state.line_len(state.cursor.row),
                Key::Named(NamedKey::Backspace) => response.changed = state.backspace(),
                Key::Named(NamedKey::Delete) => response.changed = state.delete(),
                Key::Named(NamedKey::Enter) if self.multiline => {
                    state.split_line();
                    response.changed = true;
                }
                Key::Named(NamedKey::Enter) => response.submitted = Some(state.text()),
                Key::Named(
                    NamedKey::ArrowLeft
                    | NamedKey::ArrowRight
                    | NamedKey::ArrowUp
                    | NamedKey::ArrowDown,
                ) => {
                    if let Some(direction) = key.direction() {
                        state.move_cursor(direction);
                    }
                }
                _ => match key.text_char() {
                    Some(c) => {
                        state.insert_char(c);
                        response.changed = true;
                    }
                    None => response.handled = false,
                },
            }
        }
        if response.handled {
            self.reveal_cursor();
        }
        response
    }

    /// Draw the visible lines. Lines appended through a [`TextWriter`] since
    /// the last event are picked up here first.
    pub fn render(&mut self, sink: &mut dyn DrawSink) {
        self.sync_scroll();
        let alpha = self.widget.alpha;
        let (bg, line) = if self.active {
            (self.style.active_bg_color, self.style.active_line_color)
        } else {
            (self.style.default_bg_color, self.style.default_line_color)
        };
        push_rect(
            sink,
            self.widget.position,
            self.widget.half_size(),
            bg,
            line,
            alpha,
        );

        let state = self.lock();
        let left = self.widget.min().x + self.style.padding.x;
        let top = self.widget.max().y - self.style.padding.y;
        let first = self.scrollbar.first().min(state.last_row());
        let rows = self.visible_rows();
        let color = self.style.text_color.scale_alpha(alpha);

        for (i, text) in state.lines.iter().enumerate().skip(first).take(rows) {
            let y = top - ((i - first) as f32 + 0.5) * self.char_size.y;
            sink.text(
                TextRun::new(Vec2::new(left, y), text.as_str(), self.style.text_size, color)
                    .with_align(TextAlign::Left),
            );
        }

        let cursor = state.cursor;
        if self.active && cursor.row >= first && cursor.row < first + rows {
            let x = left + cursor.col as f32 * self.char_size.x;
            let y = top - ((cursor.row - first) as f32 + 0.5) * self.char_size.y;
            push_rect(
                sink,
                Vec2::new(x, y),
                Vec2::new(0.5, 0.5 * self.char_size.y),
                self.style.cursor_color,
                Color::transparent(),
                alpha,
            );
        }
        drop(state);
        self.scrollbar.render(sink, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_gui::{DrawList, MonoMeasure};

    fn key(named: NamedKey) -> Event {
        Event::KeyDown(Key::Named(named))
    }

    fn typed(buffer: &mut TextBuffer, text: &str) {
        for c in text.chars() {
            buffer.handle_event(&Event::KeyDown(Key::Char(c)));
        }
    }

    fn editable() -> TextBuffer {
        let mut buffer = TextBuffer::new();
        buffer.force_active = true;
        buffer.size_chars = IVec2::new(20, 3);
        buffer.layout(&MonoMeasure::default());
        buffer
    }

    #[test]
    fn test_set_get_text() {
        let mut buffer = TextBuffer::new();
        for text in ["", "one", "one\ntwo", "\n\nthree\n", "ünï\ncödé"] {
            buffer.set_text(text, false);
            assert_eq!(buffer.get_text(), text);
        }
    }

    #[test]
    fn test_set_text_with_size() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("ab\nabcdef\nx", true);
        assert_eq!(buffer.size_chars, IVec2::new(6, 3));
    }

    #[test]
    fn test_typing_and_enter_split() {
        let mut buffer = editable();
        typed(&mut buffer, "helo");
        buffer.handle_event(&key(NamedKey::ArrowLeft));
        typed(&mut buffer, "l");
        assert_eq!(buffer.get_text(), "hello");

        buffer.handle_event(&key(NamedKey::ArrowLeft));
        let r = buffer.handle_event(&key(NamedKey::Enter));
        assert!(r.changed);
        assert_eq!(buffer.get_text(), "hel\nlo");
        assert_eq!(buffer.cursor(), TextCursor::new(0, 1));
    }

    #[test]
    fn test_backspace_and_delete_join_lines() {
        let mut buffer = editable();
        buffer.set_text("ab\ncd", false);
        buffer.set_cursor(TextCursor::new(0, 1));
        buffer.handle_event(&key(NamedKey::Backspace));
        assert_eq!(buffer.get_text(), "abcd");
        assert_eq!(buffer.cursor(), TextCursor::new(2, 0));

        buffer.set_text("ab\ncd", false);
        buffer.set_cursor(TextCursor::new(2, 0));
        buffer.handle_event(&key(NamedKey::Delete));
        assert_eq!(buffer.get_text(), "abcd");

        buffer.set_cursor(TextCursor::new(0, 0));
        let r = buffer.handle_event(&key(NamedKey::Backspace));
        assert!(!r.changed);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buffer = editable();
        buffer.set_text("añb", false);
        buffer.set_cursor(TextCursor::new(2, 0));
        buffer.handle_event(&key(NamedKey::Backspace));
        assert_eq!(buffer.get_text(), "ab");
        typed(&mut buffer, "é");
        assert_eq!(buffer.get_text(), "aéb");
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut buffer = editable();
        buffer.set_text("long line\nab", false);
        buffer.set_cursor(TextCursor::new(8, 0));
        buffer.handle_event(&key(NamedKey::ArrowDown));
        assert_eq!(buffer.cursor(), TextCursor::new(2, 1));
        buffer.handle_event(&key(NamedKey::ArrowDown));
        assert_eq!(buffer.cursor(), TextCursor::new(2, 1));
        buffer.handle_event(&key(NamedKey::ArrowRight));
        assert_eq!(buffer.cursor(), TextCursor::new(2, 1));
        buffer.handle_event(&key(NamedKey::Home));
        buffer.handle_event(&key(NamedKey::ArrowLeft));
        assert_eq!(buffer.cursor(), TextCursor::new(9, 0));
        buffer.set_cursor(TextCursor::new(50, 9));
        assert_eq!(buffer.cursor(), TextCursor::new(2, 1));
    }

    #[test]
    fn test_single_line_submits() {
        let mut buffer = TextBuffer::single_line();
        buffer.force_active = true;
        typed(&mut buffer, "go");
        let r = buffer.handle_event(&key(NamedKey::Enter));
        assert_eq!(r.submitted.as_deref(), Some("go"));
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn test_locked_ignores_keys() {
        let mut buffer = editable();
        buffer.locked = true;
        typed(&mut buffer, "x");
        assert_eq!(buffer.get_text(), "");
    }

    #[test]
    fn test_push_text_goes_above_last_line() {
        let mut buffer = editable();
        buffer.set_text("> ", false);
        buffer.set_cursor(TextCursor::new(2, 0));
        buffer.push_text("first\nsecond", 1);
        assert_eq!(buffer.get_text(), "first\nsecond\n> ");
        assert_eq!(buffer.cursor(), TextCursor::new(2, 2));

        buffer.pop_text(3);
        assert_eq!(buffer.get_text(), "first\nsec\n> ");
        buffer.pop_text(4);
        assert_eq!(buffer.get_text(), "first\n> ");
        assert_eq!(buffer.cursor().row, 1);
    }

    #[test]
    fn test_follow_output_when_at_bottom() {
        let mut buffer = editable();
        for i in 0..10 {
            buffer.push_text(&format!("line {i}"), 1);
        }
        assert_eq!(buffer.scrollbar.first(), 8);
        assert_eq!(buffer.scrollbar.last(), 11);

        buffer.scrollbar.set_first(0);
        buffer.push_text("more", 1);
        assert_eq!(buffer.scrollbar.first(), 0);
        buffer.scroll_for_input();
        assert_eq!(buffer.scrollbar.first(), 9);
    }

    #[test]
    fn test_click_places_cursor() {
        let mut buffer = editable();
        buffer.widget.position = Vec2::ZERO;
        buffer.set_text("abcdef\nxyz", false);
        let cell = buffer.char_size();
        let left = buffer.widget.min().x + buffer.style.padding.x;
        let top = buffer.widget.max().y - buffer.style.padding.y;
        let pos = Vec2::new(left + 2.0 * cell.x, top - 1.5 * cell.y);
        buffer.handle_event(&Event::left_down(pos));
        assert_eq!(buffer.cursor(), TextCursor::new(2, 1));
    }

    #[test]
    fn test_render_visible_lines_only() {
        let mut buffer = editable();
        buffer.set_text("a\nb\nc\nd\ne", false);
        buffer.scrollbar.set_first(1);
        let mut list = DrawList::new();
        buffer.render(&mut list);
        let lines: Vec<_> = list.texts().map(|r| r.text.as_str()).collect();
        assert_eq!(lines, ["b", "c", "d"]);
    }

    #[test]
    fn test_render_follows_writer_output() {
        let mut buffer = editable();
        buffer.set_text("> ", false);
        let writer = buffer.writer();
        std::thread::spawn(move || {
            for i in 0..5 {
                writer.push_text(&format!("log {i}"), 1);
            }
        })
        .join()
        .expect("writer thread");

        let mut list = DrawList::new();
        buffer.render(&mut list);
        let lines: Vec<_> = list.texts().map(|r| r.text.as_str()).collect();
        assert_eq!(lines, ["log 3", "log 4", "> "]);
        assert_eq!(buffer.scrollbar.first(), 3);
    }

    #[test]
    fn test_writer_output_keeps_scrolled_view() {
        let mut buffer = editable();
        buffer.set_text("a\nb\nc\nd\n> ", false);
        buffer.scrollbar.set_first(0);
        buffer.writer().push_text("e", 1);

        let mut list = DrawList::new();
        buffer.render(&mut list);
        let lines: Vec<_> = list.texts().map(|r| r.text.as_str()).collect();
        assert_eq!(lines, ["a", "b", "c"]);
    }
}
