use std::thread;

use tessera_gui::{DrawList, Event, IVec2, MonoMeasure, Vec2, Widget};
use tessera_gui_interactive::{Button, ButtonKey, ButtonWindow};

fn populated_window(names: &[&'static str]) -> (ButtonWindow, Vec<ButtonKey>) {
    let mut window = ButtonWindow::new();
    window.widget = Widget::new(Vec2::new(200.0, 100.0), Vec2::new(300.0, 200.0));
    window.dims = IVec2::new(3, 2);

    let list = window.list();
    let names = names.to_vec();
    let keys = thread::spawn(move || {
        names
            .into_iter()
            .map(|name| list.push(Button::new(name)))
            .collect::<Vec<_>>()
    })
    .join()
    .expect("loader thread");

    // any event lays the buttons out
    window.handle_event(&Event::moved(Vec2::new(-100.0, -100.0)));
    (window, keys)
}

fn center(window: &ButtonWindow, key: ButtonKey) -> Vec2 {
    window
        .list()
        .with(key, |b| b.base().widget.position)
        .unwrap_or(Vec2::NAN)
}

#[test]
fn test_loaded_buttons_drag_then_click() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (mut window, keys) = populated_window(&["alpha", "beta", "gamma", "delta", "eps", "zeta"]);
    assert_eq!(window.list().keys(), keys);

    let from = center(&window, keys[0]);
    let to = center(&window, keys[5]);
    window.handle_event(&Event::left_down(from));
    window.handle_event(&Event::dragged(from + Vec2::new(10.0, -10.0)));
    window.handle_event(&Event::dragged(to));
    let r = window.handle_event(&Event::left_up(to));
    assert_eq!(r.dropped, Some(keys[0]));
    assert_eq!(
        window.list().keys(),
        [keys[1], keys[2], keys[3], keys[4], keys[5], keys[0]]
    );
    assert_eq!(window.list().index_of(keys[0]), Some(5));

    // the dropped button settles into its new slot and still clicks
    window.handle_event(&Event::moved(Vec2::new(-100.0, -100.0)));
    let p = center(&window, keys[0]);
    assert_eq!(p, to);
    window.handle_event(&Event::left_down(p));
    let r = window.handle_event(&Event::left_up(p));
    assert_eq!(r.activated, Some(keys[0]));
}

#[test]
fn test_background_edits_show_on_next_frame() {
    let (window, keys) = populated_window(&["one", "two", "three"]);
    let list = window.list();
    let removed = keys[1];
    thread::spawn(move || {
        list.remove(removed);
        list.push(Button::new("four"));
    })
    .join()
    .expect("editor thread");

    let mut frame = DrawList::new();
    window.render(&mut frame, &MonoMeasure::default());
    assert!(frame.contains_text("one"));
    assert!(!frame.contains_text("two"));
    assert!(frame.contains_text("four"));
    assert_eq!(window.list().len(), 3);
}
