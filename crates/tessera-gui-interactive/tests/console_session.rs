use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use tessera_gui::{DrawList, Event, Key, MonoMeasure, NamedKey};
use tessera_gui_interactive::{Command, CommandLine, StdFileService, DEFAULT_PROMPT};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn type_text(console: &mut CommandLine, text: &str) {
    for c in text.chars() {
        console.handle_event(&Event::KeyDown(Key::Char(c)));
    }
}

fn press(console: &mut CommandLine, key: NamedKey) {
    console.handle_event(&Event::KeyDown(Key::Named(key)));
    console.handle_event(&Event::KeyUp(Key::Named(key)));
}

fn output(console: &CommandLine) -> Vec<String> {
    let state = console.buffer.lock();
    state.lines[..state.last_row()].to_vec()
}

#[test]
fn test_typed_session_with_history_and_errors() {
    init_logging();
    let launched = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&launched);

    let mut console = CommandLine::new();
    console
        .register(Command::new("launch", "launch a ship", move |_, args| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("launching {args}")
        }))
        .expect("register launch");
    console
        .register(Command::new("land", "land a ship", |_, _| "landed".into()))
        .expect("register land");

    type_text(&mut console, "lau scout");
    press(&mut console, NamedKey::Enter);
    type_text(&mut console, "la");
    press(&mut console, NamedKey::Enter);
    type_text(&mut console, "warp");
    press(&mut console, NamedKey::Enter);

    assert_eq!(launched.load(Ordering::SeqCst), 1);
    assert_eq!(
        output(&console),
        [
            "> lau scout",
            "launching scout",
            "> la",
            "ambiguous: land, launch",
            "> warp",
            "unknown command 'warp'",
        ]
    );
    assert_eq!(console.history(), ["lau scout", "la", "warp"]);

    // recall the first line and run it again
    for _ in 0..5 {
        press(&mut console, NamedKey::ArrowUp);
    }
    assert_eq!(console.get_line_text(), "lau scout");
    press(&mut console, NamedKey::Enter);
    assert_eq!(launched.load(Ordering::SeqCst), 2);
    assert_eq!(console.history().last().map(String::as_str), Some("lau scout"));
}

#[test]
fn test_background_output_keeps_prompt_last() {
    init_logging();
    let mut console = CommandLine::new();
    console.buffer.layout(&MonoMeasure::default());
    type_text(&mut console, "hel");

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let writer = console.writer();
            thread::spawn(move || {
                for i in 0..25 {
                    writer.print(&format!("thread {t} line {i}"));
                }
            })
        })
        .collect();
    for handle in writers {
        handle.join().expect("writer thread");
    }

    assert_eq!(output(&console).len(), 100);
    let state = console.buffer.lock();
    assert_eq!(
        state.lines.last().map(String::as_str),
        Some(format!("{DEFAULT_PROMPT}hel").as_str())
    );
    drop(state);

    // the view follows the new output down to the prompt
    let mut frame = DrawList::new();
    console.buffer.render(&mut frame);
    let shown: Vec<_> = frame.texts().map(|run| run.text.as_str()).collect();
    assert_eq!(shown.len(), 2);
    assert!(shown[0].starts_with("thread "));
    assert_eq!(shown[1], format!("{DEFAULT_PROMPT}hel"));

    // the user's draft survives and can still be finished
    type_text(&mut console, "p");
    press(&mut console, NamedKey::Enter);
    assert!(output(&console).iter().any(|l| l.starts_with("find: ")));

    let mut list = DrawList::new();
    console.buffer.layout(&MonoMeasure::default());
    console.buffer.render(&mut list);
    assert!(list.contains_text(DEFAULT_PROMPT));
}

#[test]
fn test_history_round_trips_through_disk() {
    init_logging();
    let path = std::env::temp_dir().join(format!(
        "tessera-console-history-{}.txt",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let mut console = CommandLine::new();
    assert_eq!(console.load_history(&StdFileService, &path).ok(), Some(0));
    for line in ["help", "find engine", "help"] {
        type_text(&mut console, line);
        press(&mut console, NamedKey::Enter);
    }
    console
        .save_history(&StdFileService, &path)
        .expect("save history");

    let mut restored = CommandLine::new();
    let count = restored
        .load_history(&StdFileService, &path)
        .expect("load history");
    assert_eq!(count, 3);
    assert_eq!(restored.history(), ["help", "find engine", "help"]);
    assert_eq!(restored.history_index(), 3);

    let _ = std::fs::remove_file(&path);
}
