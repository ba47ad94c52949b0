//! Logger behaviour tests
//!
//! Drive a `LevelLogger` into a `MemoryOutput` and check gating, layout and
//! level changes. Assertions avoid exact ANSI sequences since `colored`
//! decides on its own whether the environment supports them.

use std::sync::Arc;
use std::thread;

use weapp_sdk::logger::{render, Color, Level, LevelLogger, Logger, MemoryOutput, Segment};
use weapp_sdk::{log_error, log_info, log_warn};

fn logger_with(level: Level, colorful: bool) -> (LevelLogger, Arc<MemoryOutput>) {
    let output = Arc::new(MemoryOutput::new());
    (LevelLogger::new(output.clone(), level, colorful), output)
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn call(logger: &LevelLogger, level: Level) {
    match level {
        Level::Info => log_info!(logger, "at {}", level),
        Level::Warn => log_warn!(logger, "at {}", level),
        Level::Error => log_error!(logger, "at {}", level),
        Level::Silent => unreachable!("silent is not a call severity"),
    }
}

#[test]
fn test_gating_matrix() {
    for threshold in Level::ALL {
        for severity in [Level::Error, Level::Warn, Level::Info] {
            let (logger, output) = logger_with(threshold, false);
            call(&logger, severity);

            let emitted = !output.is_empty();
            assert_eq!(
                emitted,
                threshold >= severity,
                "threshold={threshold} severity={severity}"
            );
        }
    }
}

#[test]
fn test_silent_emits_nothing() {
    let (logger, output) = logger_with(Level::Silent, true);
    log_info!(logger, "i");
    log_warn!(logger, "w");
    log_error!(logger, "e");
    assert!(output.is_empty());
}

#[test]
fn test_warn_threshold_scenario() {
    let (logger, output) = logger_with(Level::Warn, true);

    log_error!(logger, "boom {}", "x");
    assert_eq!(strip_ansi(&output.contents()), "[error] boom x\n");

    output.clear();
    log_info!(logger, "skip");
    assert!(output.is_empty());
}

#[test]
fn test_plain_output_layout() {
    let (logger, output) = logger_with(Level::Info, false);

    log_info!(logger, "msg {}", 5);
    log_warn!(logger, "careful");

    assert_eq!(
        strip_ansi(&output.contents()),
        "[info] msg 5\n[warn] careful\n"
    );
}

#[test]
fn test_colorful_segments() {
    let segments = render(Level::Error, true, format_args!("boom {}", "x"));
    assert_eq!(
        segments,
        vec![
            Segment {
                text: "[error] ".to_string(),
                newline: false,
                color: Some(Color::Red),
            },
            Segment {
                text: "boom x".to_string(),
                newline: true,
                color: Some(Color::White),
            },
        ]
    );
}

#[test]
fn test_prefix_colors_depend_only_on_flag_and_severity() {
    let expected = [
        (Level::Info, Color::Green),
        (Level::Warn, Color::Magenta),
        (Level::Error, Color::Red),
    ];
    for (level, color) in expected {
        assert_eq!(render(level, true, format_args!("a"))[0].color, Some(color));
        assert_eq!(
            render(level, true, format_args!("something else"))[0].color,
            Some(color)
        );
        assert_eq!(
            render(level, false, format_args!("a"))[0].color,
            Some(Color::White)
        );
    }
}

#[test]
fn test_set_level_is_idempotent() {
    let (logger, output) = logger_with(Level::Info, false);

    logger.set_level(Level::Warn);
    log_info!(logger, "a");
    log_warn!(logger, "b");
    let once = output.contents();

    output.clear();
    logger.set_level(Level::Warn);
    logger.set_level(Level::Warn);
    log_info!(logger, "a");
    log_warn!(logger, "b");

    assert_eq!(output.contents(), once);
    assert_eq!(logger.level(), Level::Warn);
}

#[test]
fn test_set_level_is_not_retroactive() {
    let (logger, output) = logger_with(Level::Info, false);

    log_info!(logger, "before");
    logger.set_level(Level::Silent);
    log_info!(logger, "after");
    log_error!(logger, "after");

    let contents = strip_ansi(&output.contents());
    assert_eq!(contents, "[info] before\n");
}

#[test]
fn test_initial_level_applies_before_set_level() {
    let (logger, output) = logger_with(Level::Error, false);
    log_warn!(logger, "hidden");
    log_error!(logger, "shown");
    assert_eq!(strip_ansi(&output.contents()), "[error] shown\n");
}

#[test]
fn test_level_from_config_string() {
    let level: Level = "warn".parse().unwrap();
    let (logger, output) = logger_with(level, false);
    log_info!(logger, "hidden");
    log_warn!(logger, "shown");
    assert!(output.contents().contains("shown"));
    assert!(!output.contents().contains("hidden"));
}

#[test]
fn test_shared_across_threads() {
    let output = Arc::new(MemoryOutput::new());
    let logger = Arc::new(LevelLogger::new(output.clone(), Level::Info, false));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for j in 0..10 {
                    log_info!(logger, "t{}-{}", i, j);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = strip_ansi(&output.contents());
    for i in 0..4 {
        for j in 0..10 {
            assert!(contents.contains(&format!("t{i}-{j}\n")));
        }
    }

    logger.set_level(Level::Silent);
    output.clear();
    log_error!(logger, "quiet");
    assert!(output.is_empty());
}

#[test]
fn test_dyn_logger_handle() {
    let output = Arc::new(MemoryOutput::new());
    let logger: Arc<dyn Logger> = Arc::new(LevelLogger::new(output.clone(), Level::Info, true));

    logger.warn(format_args!("via {}", "trait object"));

    let contents = strip_ansi(&output.contents());
    assert_eq!(contents, "[warn] via trait object\n");
}
