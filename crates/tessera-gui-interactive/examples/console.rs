//! Console example
//!
//! Drives a command console with a scripted stream of key events while a
//! background thread prints status lines, then dumps the text of the final
//! frame to stdout.
//!
//! Run with `RUST_LOG=debug` to see command resolution.

use std::thread;
use std::time::Duration;

use tessera_gui::{theme, DrawList, Event, Key, MonoMeasure, NamedKey, Vec2};
use tessera_gui_interactive::{Command, CommandLine, TextBufferStyle};

fn type_line(console: &mut CommandLine, line: &str) {
    for c in line.chars() {
        console.handle_event(&Event::KeyDown(Key::Char(c)));
    }
    let enter = Key::Named(NamedKey::Enter);
    console.handle_event(&Event::KeyDown(enter));
    console.handle_event(&Event::KeyUp(enter));
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut console = CommandLine::new();
    console.buffer.style = TextBufferStyle::default()
        .with_text_size(14.0)
        .with_text_color(theme::GUI_TEXT_LOW);
    console.buffer.size_chars.y = 12;
    console.buffer.widget.position = Vec2::new(400.0, 300.0);

    let mut counter = 0;
    let registered = [
        Command::new("echo", "print the arguments", |_, args| args.to_string()),
        Command::new("count", "increment a counter", move |_, _| {
            counter += 1;
            format!("count = {counter}")
        }),
    ];
    for command in registered {
        if let Err(err) = console.register(command) {
            log::error!("{err}");
        }
    }

    let writer = console.writer();
    let status = thread::spawn(move || {
        for i in 1..=3 {
            writer.print(&format!("[status] tick {i}"));
            thread::sleep(Duration::from_millis(5));
        }
    });

    for line in ["help", "ec hello there", "count", "count", "c", "find tick"] {
        type_line(&mut console, line);
    }
    if status.join().is_err() {
        log::error!("status thread panicked");
    }

    let measure = MonoMeasure::default();
    console.buffer.layout(&measure);

    let mut frame = DrawList::new();
    console.buffer.render(&mut frame);
    for run in frame.texts() {
        println!("{}", run.text);
    }
    log::info!(
        "{} history entries, {} draw commands",
        console.history().len(),
        frame.len()
    );
}
