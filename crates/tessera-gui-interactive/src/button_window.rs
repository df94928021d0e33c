//! Scrollable grid of owned buttons with drag rearrange
//!
//! The window owns its buttons. They live in a [`ButtonList`] that can be
//! cloned and repopulated from another thread; every access takes the list's
//! lock for the duration of one call only.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use slotmap::SlotMap;
use tessera_gui::{
    push_rect, theme, ButtonLayout, Color, DrawSink, Event, IVec2, MouseButton, TextMeasure, Vec2,
    Widget, INPUT_ALPHA, PAD_DIST,
};
use tessera_gui_macros::WithBuilders;

use crate::button::{ButtonKey, ButtonWidget};
use crate::scrollbar::Scrollbar;

/// Button stored in a [`ButtonList`]
pub type OwnedButton = Box<dyn ButtonWidget + Send>;

#[derive(Default)]
pub struct ButtonListInner {
    buttons: SlotMap<ButtonKey, OwnedButton>,
    order: Vec<ButtonKey>,
}

impl ButtonListInner {
    pub fn order(&self) -> &[ButtonKey] {
        &self.order
    }

    pub fn get(&self, key: ButtonKey) -> Option<&dyn ButtonWidget> {
        self.buttons.get(key).map(|b| b.as_ref() as &dyn ButtonWidget)
    }

    pub fn get_mut(&mut self, key: ButtonKey) -> Option<&mut dyn ButtonWidget> {
        self.buttons
            .get_mut(key)
            .map(|b| b.as_mut() as &mut dyn ButtonWidget)
    }

    fn index_of(&self, key: ButtonKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }
}

/// Cloneable handle to the buttons of a [`ButtonWindow`]
#[derive(Clone, Default)]
pub struct ButtonList {
    inner: Arc<Mutex<ButtonListInner>>,
}

impl fmt::Debug for ButtonList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonList")
            .field("len", &self.len())
            .finish()
    }
}

impl ButtonList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, ButtonListInner> {
        self.inner.lock()
    }

    pub fn push(&self, button: impl ButtonWidget + Send + 'static) -> ButtonKey {
        self.push_boxed(Box::new(button))
    }

    pub fn push_boxed(&self, mut button: OwnedButton) -> ButtonKey {
        let mut inner = self.inner.lock();
        button.base_mut().index = Some(inner.order.len());
        let key = inner.buttons.insert(button);
        inner.order.push(key);
        key
    }

    pub fn remove(&self, key: ButtonKey) -> Option<OwnedButton> {
        let mut inner = self.inner.lock();
        inner.order.retain(|k| *k != key);
        inner.buttons.remove(key)
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.order.clear();
        inner.buttons.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: ButtonKey) -> bool {
        self.inner.lock().buttons.contains_key(key)
    }

    /// Keys in display order
    pub fn keys(&self) -> Vec<ButtonKey> {
        self.inner.lock().order.clone()
    }

    pub fn index_of(&self, key: ButtonKey) -> Option<usize> {
        self.inner.lock().index_of(key)
    }

    /// Run `f` on one button under the lock
    pub fn with<R>(&self, key: ButtonKey, f: impl FnOnce(&mut dyn ButtonWidget) -> R) -> Option<R> {
        self.inner.lock().get_mut(key).map(f)
    }
}

#[derive(Debug, Clone, WithBuilders)]
pub struct ButtonWindowStyle {
    pub bg_color: Color,
    pub line_color: Color,
    /// Pointer travel before a press turns into a drag
    pub drag_threshold: f32,
}

impl Default for ButtonWindowStyle {
    fn default() -> Self {
        Self {
            bg_color: theme::GUI_BG,
            line_color: theme::GUI_FG,
            drag_threshold: 2.0 * PAD_DIST,
        }
    }
}

/// What a single event did to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowResponse {
    pub handled: bool,
    /// A button was clicked
    pub activated: Option<ButtonKey>,
    /// A drag started on this event
    pub dragged: Option<ButtonKey>,
    /// A drag ended inside the window; the new order stands
    pub dropped: Option<ButtonKey>,
    /// A drag ended outside the window; the old order was restored
    pub cancelled: Option<ButtonKey>,
}

#[derive(Debug, Clone)]
struct DragState {
    key: ButtonKey,
    /// Button center minus pointer
    offset: Vec2,
    /// Pointer at press
    start: Vec2,
    /// Past the drag threshold
    moving: bool,
    /// Order before the drag, restored on cancel
    original: Vec<ButtonKey>,
}

#[derive(Debug)]
pub struct ButtonWindow {
    pub widget: Widget,
    pub style: ButtonWindowStyle,
    pub scrollbar: Scrollbar,
    /// Columns and visible rows
    pub dims: IVec2,
    /// Button drawn by the caller, skipped during render
    pub ext_drag: Option<ButtonKey>,
    list: ButtonList,
    drag: Option<DragState>,
}

impl Default for ButtonWindow {
    fn default() -> Self {
        Self {
            widget: Widget::default(),
            style: ButtonWindowStyle::default(),
            scrollbar: Scrollbar::new(),
            dims: IVec2::new(2, 8),
            ext_drag: None,
            list: ButtonList::new(),
            drag: None,
        }
    }
}

impl ButtonWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for populating the window, possibly from another thread
    pub fn list(&self) -> ButtonList {
        self.list.clone()
    }

    /// Button being dragged, once it has moved past the threshold
    pub fn dragging(&self) -> Option<ButtonKey> {
        self.drag.as_ref().filter(|d| d.moving).map(|d| d.key)
    }

    fn columns(&self) -> usize {
        self.dims.x.max(1) as usize
    }

    fn total_rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns())
    }

    /// Pick dims between `min` and `max` that fit every button, preferring
    /// as many rows as allowed before adding columns
    pub fn compute_dims(&mut self, min: IVec2, max: IVec2) {
        let count = self.list.len().max(1);
        let lo = min.max(IVec2::ONE);
        let hi = max.max(lo);
        let cols = (count.div_ceil(hi.y as usize) as i32).clamp(lo.x, hi.x);
        let rows = (count.div_ceil(cols as usize) as i32).clamp(lo.y, hi.y);
        self.dims = IVec2::new(cols, rows);
        log::trace!("button window dims {:?} for {} buttons", self.dims, count);
    }

    /// Scroll so the button at `index` is visible
    pub fn scroll_for(&mut self, index: usize) {
        self.sync_scrollbar();
        self.scrollbar.make_visible(index / self.columns());
    }

    fn sync_scrollbar(&mut self) {
        let count = self.list.len();
        let rows = self.dims.y.max(1) as usize;
        self.scrollbar.set_window(rows, self.total_rows(count));
        self.scrollbar.attach_to(&self.widget);
    }

    fn grid(&self) -> ButtonLayout {
        let mut area = self.widget.size;
        if self.scrollbar.is_scrollable() {
            area.x -= self.scrollbar.widget.size.x;
        }
        let mut layout = ButtonLayout::new();
        layout.button_count = self.dims.max(IVec2::ONE);
        layout.start(Vec2::new(self.widget.min().x, self.widget.max().y));
        layout.set_total_size(area);
        layout
    }

    /// Center of slot `index`, or `None` when its row is scrolled out
    fn slot_center(&self, layout: &mut ButtonLayout, index: usize) -> Option<Vec2> {
        let row = index / self.columns();
        let first = self.scrollbar.first();
        if row < first || row >= first + self.dims.y.max(1) as usize {
            return None;
        }
        layout.set_scalar_index(index - first * self.columns());
        Some(layout.button_pos())
    }

    /// Position every button from its slot. The dragged button keeps following
    /// the pointer.
    fn place(&self, inner: &mut ButtonListInner) {
        let mut layout = self.grid();
        let dragging = self.dragging();
        let order = inner.order.clone();
        for (i, key) in order.into_iter().enumerate() {
            let slot = self.slot_center(&mut layout, i);
            let Some(button) = inner.get_mut(key) else {
                continue;
            };
            let base = button.base_mut();
            base.index = Some(i);
            if Some(key) == dragging {
                base.visible = true;
                continue;
            }
            base.visible = slot.is_some();
            if let Some(center) = slot {
                base.widget.position = center;
                base.widget.size = layout.button_size;
            }
        }
    }

    /// Visible slot nearest to `point`
    fn nearest_slot(&self, point: Vec2, count: usize) -> Option<usize> {
        let mut layout = self.grid();
        (0..count)
            .filter_map(|i| self.slot_center(&mut layout, i).map(|c| (i, c.distance_squared(point))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    pub fn handle_event(&mut self, event: &Event) -> WindowResponse {
        let mut response = WindowResponse::default();
        if !self.widget.active || self.widget.alpha < INPUT_ALPHA {
            return response;
        }
        self.sync_scrollbar();

        if self.drag.is_some() {
            return self.handle_rearrange(event);
        }

        if self.scrollbar.handle_event(event, Some(&self.widget)) {
            response.handled = true;
            return response;
        }

        let list = self.list.clone();
        let mut inner = list.lock();
        self.place(&mut inner);
        let order = inner.order.clone();
        for key in order.iter().copied() {
            let Some(button) = inner.get_mut(key) else {
                continue;
            };
            let r = button.handle_event(event);
            let center = button.base().widget.position;
            response.handled |= r.handled;
            if r.activated {
                response.activated = Some(key);
            }
            if let (true, Event::PointerDown { pos, .. }) = (r.pressed, *event) {
                self.drag = Some(DragState {
                    key,
                    offset: center - pos,
                    start: pos,
                    moving: false,
                    original: order.clone(),
                });
            }
        }
        if let Some(key) = response.activated {
            log::debug!("button window activated {:?}", key);
        }
        response
    }

    /// Track an active press: promote it to a drag once the pointer travels
    /// far enough, keep the dragged button in the nearest slot, and finish on
    /// release.
    pub fn handle_rearrange(&mut self, event: &Event) -> WindowResponse {
        let mut response = WindowResponse::default();
        let Some(mut drag) = self.drag.take() else {
            return response;
        };
        let list = self.list.clone();
        let mut inner = list.lock();
        if inner.get(drag.key).is_none() {
            log::debug!("dragged button {:?} removed during drag", drag.key);
            response.cancelled = Some(drag.key);
            return response;
        }
        response.handled = true;

        match *event {
            Event::PointerMoved { pos, .. } | Event::PointerDragged { pos, .. } => {
                if !drag.moving && pos.distance(drag.start) < self.style.drag_threshold {
                    if let Some(button) = inner.get_mut(drag.key) {
                        button.handle_event(event);
                    }
                    self.drag = Some(drag);
                    return response;
                }
                if !drag.moving {
                    drag.moving = true;
                    response.dragged = Some(drag.key);
                    log::debug!("drag started on {:?}", drag.key);
                }
                let center = pos + drag.offset;
                if let Some(button) = inner.get_mut(drag.key) {
                    let base = button.base_mut();
                    base.pressed = false;
                    base.widget.position = center;
                }
                let count = inner.order.len();
                if let (Some(from), Some(to)) =
                    (inner.index_of(drag.key), self.nearest_slot(center, count))
                {
                    if from != to {
                        let key = inner.order.remove(from);
                        inner.order.insert(to, key);
                    }
                }
                self.drag = Some(drag);
                self.place(&mut inner);
            }
            Event::PointerUp {
                button: MouseButton::Left,
                pos,
            } => {
                if !drag.moving {
                    if let Some(button) = inner.get_mut(drag.key) {
                        if button.handle_event(event).activated {
                            response.activated = Some(drag.key);
                        }
                    }
                } else if self.widget.contains(pos) {
                    log::debug!("dropped {:?}", drag.key);
                    response.dropped = Some(drag.key);
                } else {
                    log::debug!("drag of {:?} cancelled outside window", drag.key);
                    inner.order = drag.original;
                    response.cancelled = Some(drag.key);
                }
                self.place(&mut inner);
            }
            Event::LostFocus => {
                if drag.moving {
                    inner.order = drag.original;
                    response.cancelled = Some(drag.key);
                }
                if let Some(button) = inner.get_mut(drag.key) {
                    button.handle_event(event);
                }
                self.place(&mut inner);
            }
            _ => self.drag = Some(drag),
        }
        response
    }

    pub fn render(&self, sink: &mut dyn DrawSink, measure: &dyn TextMeasure) {
        let alpha = self.widget.alpha;
        push_rect(
            sink,
            self.widget.position,
            self.widget.half_size(),
            self.style.bg_color,
            self.style.line_color,
            alpha,
        );
        let mut inner = self.list.lock();
        self.place(&mut inner);
        let dragging = self.dragging();
        for key in inner.order.iter().copied() {
            if Some(key) == self.ext_drag || Some(key) == dragging {
                continue;
            }
            if let Some(button) = inner.get(key) {
                button.render(sink, measure, false);
            }
        }
        if let Some(button) = dragging.and_then(|key| inner.get(key)) {
            button.render(sink, measure, true);
        }
        drop(inner);
        self.scrollbar.render(sink, alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Button;
    use tessera_gui::{DrawList, MonoMeasure};

    fn window(count: usize) -> (ButtonWindow, Vec<ButtonKey>) {
        let mut w = ButtonWindow::new();
        w.widget = Widget::new(Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0));
        w.dims = IVec2::new(2, 4);
        let list = w.list();
        let keys = (0..count)
            .map(|i| list.push(Button::new(format!("b{i}"))))
            .collect();
        w.sync_scrollbar();
        let mut inner = list.lock();
        w.place(&mut inner);
        drop(inner);
        (w, keys)
    }

    fn center(w: &ButtonWindow, key: ButtonKey) -> Vec2 {
        w.list()
            .with(key, |b| b.base().widget.position)
            .unwrap_or(Vec2::NAN)
    }

    #[test]
    fn test_grid_placement_row_major() {
        let (w, keys) = window(4);
        let (a, b, c) = (center(&w, keys[0]), center(&w, keys[1]), center(&w, keys[2]));
        assert_eq!(a.y, b.y);
        assert!(b.x > a.x);
        assert_eq!(c.x, a.x);
        assert!(c.y < a.y);
    }

    #[test]
    fn test_click_activates_without_drag() {
        let (mut w, keys) = window(4);
        let p = center(&w, keys[1]);
        w.handle_event(&Event::left_down(p));
        w.handle_event(&Event::dragged(p + Vec2::new(1.0, 0.0)));
        let r = w.handle_event(&Event::left_up(p));
        assert_eq!(r.activated, Some(keys[1]));
        assert_eq!(w.list().keys(), keys);
    }

    #[test]
    fn test_drag_reorders_by_insertion() {
        let (mut w, keys) = window(6);
        let from = center(&w, keys[0]);
        let to = center(&w, keys[3]);
        w.handle_event(&Event::left_down(from));
        let r = w.handle_event(&Event::dragged(from + Vec2::new(20.0, 0.0)));
        assert_eq!(r.dragged, Some(keys[0]));
        w.handle_event(&Event::dragged(to));
        assert_eq!(w.dragging(), Some(keys[0]));

        let r = w.handle_event(&Event::left_up(to));
        assert_eq!(r.dropped, Some(keys[0]));
        assert_eq!(r.activated, None);
        let order = w.list().keys();
        assert_eq!(
            order,
            vec![keys[1], keys[2], keys[3], keys[0], keys[4], keys[5]]
        );
    }

    #[test]
    fn test_drop_outside_restores_order() {
        let (mut w, keys) = window(4);
        let from = center(&w, keys[0]);
        w.handle_event(&Event::left_down(from));
        w.handle_event(&Event::dragged(center(&w, keys[3])));
        assert_ne!(w.list().keys(), keys);
        let r = w.handle_event(&Event::left_up(Vec2::new(900.0, 900.0)));
        assert_eq!(r.cancelled, Some(keys[0]));
        assert_eq!(w.list().keys(), keys);
        assert_eq!(w.dragging(), None);
    }

    #[test]
    fn test_compute_dims_and_scroll_for() {
        let (mut w, _) = window(20);
        w.compute_dims(IVec2::new(1, 1), IVec2::new(4, 4));
        assert_eq!(w.dims, IVec2::new(4, 4));
        w.compute_dims(IVec2::new(2, 8), IVec2::new(2, 8));
        assert_eq!(w.dims, IVec2::new(2, 8));

        w.scroll_for(19);
        assert_eq!(w.scrollbar.first(), 2);
        w.scroll_for(0);
        assert_eq!(w.scrollbar.first(), 0);
    }

    #[test]
    fn test_scrolled_out_buttons_are_hidden() {
        let (mut w, keys) = window(12);
        w.scroll_for(11);
        let list = w.list();
        w.place(&mut list.lock());
        assert!(!list.with(keys[0], |b| b.base().visible).unwrap_or(true));
        assert!(list.with(keys[11], |b| b.base().visible).unwrap_or(false));
    }

    #[test]
    fn test_render_skips_external_drag() {
        let (mut w, keys) = window(3);
        w.ext_drag = Some(keys[1]);
        let mut list = DrawList::new();
        w.render(&mut list, &MonoMeasure::default());
        assert!(list.contains_text("b0"));
        assert!(!list.contains_text("b1"));
        assert!(list.contains_text("b2"));
    }

    #[test]
    fn test_removed_during_drag_cancels() {
        let (mut w, keys) = window(3);
        w.handle_event(&Event::left_down(center(&w, keys[2])));
        w.list().remove(keys[2]);
        let r = w.handle_event(&Event::dragged(Vec2::ZERO));
        assert_eq!(r.cancelled, Some(keys[2]));
        assert_eq!(w.list().len(), 2);
    }
}
