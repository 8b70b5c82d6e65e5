// Chunk: docs/chunks/headless_frontend - Line-command front end

//! Scripts of line commands run through the parser and the drain loop.

use std::time::{Duration, Instant};

use deskedit::command::parse_line;
use deskedit::event_channel::create_event_channel;
use deskedit::{AppContext, EventDrainLoop, MainLayout, Theme};

/// Feeds `script` through the drain loop, one line per batch, advancing the
/// clock by `step` between lines.
fn run_script(script: &str, step: Duration) -> EventDrainLoop<Vec<u8>> {
    let (sender, receiver) = create_event_channel();
    let layout = MainLayout::new(AppContext::default()).unwrap();
    let mut drain = EventDrainLoop::new(layout, receiver, Vec::new());

    let mut now = Instant::now();
    for line in script.lines() {
        for event in parse_line(line).unwrap() {
            sender.send(event).unwrap();
        }
        drain.process_pending_events(now).unwrap();
        now += step;
    }
    drain
}

fn printed(drain: &EventDrainLoop<Vec<u8>>) -> String {
    String::from_utf8_lossy(drain.writer()).into_owned()
}

#[test]
fn test_tab_script() {
    let drain = run_script(
        "new\n\
         new\n\
         close 1\n",
        Duration::from_millis(10),
    );
    assert_eq!(drain.layout().tabs().titles(), vec!["Untitled-1", "Untitled-3"]);
}

#[test]
fn test_typed_text_shows_after_quiet_period() {
    let drain = run_script(
        "type hello\\nworld\n\
         # let the sync happen\n\
         show\n",
        Duration::from_millis(400),
    );
    let frame = printed(&drain);
    assert!(frame.contains("1 | hello"), "{frame}");
    assert!(frame.contains("2 | world"), "{frame}");
    assert!(frame.contains("Lines: 2"), "{frame}");
}

#[test]
fn test_chrome_script() {
    let drain = run_script(
        "sidebar\n\
         panel\n\
         theme\n\
         resize 800 600\n",
        Duration::from_millis(10),
    );
    let layout = drain.layout();
    assert!(!layout.activity_bar().is_side_bar_visible());
    assert!(!layout.bottom_panel().is_visible());
    assert_eq!(layout.context().theme(), Theme::Light);
    assert_eq!(layout.rects().editor_size(), (760.0, 552.0));
}

#[test]
fn test_drag_and_click_script() {
    let drain = run_script(
        "drag 255 100 305 100\n\
         click 900 10\n\
         click 900 10\n",
        Duration::from_millis(100),
    );
    let layout = drain.layout();
    assert_eq!(layout.panel().width(), 270.0);
    assert_eq!(layout.tabs().tab_count(), 2);
}

#[test]
fn test_write_to_panel_and_show() {
    let drain = run_script(
        "write problems no problems\n\
         panel problems\n\
         show\n",
        Duration::from_millis(10),
    );
    assert!(printed(&drain).contains("--- Problems ---\nno problems"));
}
