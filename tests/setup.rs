// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use jiff::tz::TimeZone;
use multilog::BestEffortTrap;
use multilog::Config;
use multilog::ErrorKind;
use multilog::Level;
use multilog::Registry;
use multilog::SinkKind;
use multilog::append::Capture;
use multilog::append::ConsoleTarget;
use tempfile::TempDir;

// Every test uses its own identity since they share the global registry.
fn config(name: &str, dir: &Path, capture: &Capture) -> Config {
    Config::new()
        .name(name)
        .program("setup-test")
        .log_dir(dir)
        .console_target(ConsoleTarget::Capture(capture.clone()))
        .timezone(TimeZone::UTC)
        .trap(BestEffortTrap::default())
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[test]
fn test_setup_twice_attaches_sinks_once() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let first = multilog::setup(config("twice", temp_dir.path(), &capture)).unwrap();
    let second = multilog::setup(config("twice", temp_dir.path(), &capture)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&Registry::global().get("twice").unwrap(), &first));

    second.error("only once");
    second.flush();

    assert_eq!(capture.lines().len(), 1);
    let content = read(first.main_file_path());
    assert_eq!(content.matches("only once").count(), 1);
    assert_eq!(content.matches("Started setup-test").count(), 1);
}

#[test]
fn test_below_threshold_writes_nothing() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let logger = multilog::setup(config("quiet", temp_dir.path(), &capture)).unwrap();
    let banner = read(logger.main_file_path());

    logger.debug("x");
    logger.info("y");
    logger.flush();

    assert!(capture.contents().is_empty());
    let content = read(logger.main_file_path());
    assert_eq!(content[banner.len()..].lines().count(), 1);
    assert!(content.ends_with("INFO    : y\n"));
    assert!(logger.debug_file_path().is_none());
    assert!(!temp_dir.path().join("quiet-debug.log").exists());
}

#[test]
fn test_debug_lines_only_reach_the_debug_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let logger = multilog::setup(
        config("diverted", temp_dir.path(), &capture)
            .console_level(Level::Critical)
            .file_level(Level::Debug),
    )
    .unwrap();

    logger.debug("trace detail");
    logger.info("progress");
    logger.critical("meltdown");
    logger.flush();

    let main = read(logger.main_file_path());
    let debug = read(&temp_dir.path().join("diverted-debug.log"));
    assert!(!main.contains("DEBUG"), "{main}");
    assert!(main.contains("INFO    : progress"));
    assert!(debug.contains("DEBUG   : trace detail"));
    assert!(debug.contains("INFO    : progress"));
    assert!(debug.contains("CRITICAL: meltdown"));
    assert!(main.contains(&format!(
        "Debug to file {}",
        temp_dir.path().join("diverted-debug.log").display()
    )));

    assert_eq!(logger.file_level(), Level::Info);
    assert_eq!(capture.lines().len(), 1);
}

#[test]
fn test_name_takes_precedence_over_log_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let logger = multilog::setup(
        config("svc", temp_dir.path(), &capture)
            .log_file("ignored.log")
            .file_level(Level::Debug),
    )
    .unwrap();

    assert_eq!(logger.identity(), "svc");
    assert_eq!(logger.main_file_path(), temp_dir.path().join("svc.log"));
    assert_eq!(
        logger.debug_file_path(),
        Some(temp_dir.path().join("svc-debug.log").as_path())
    );
    assert!(temp_dir.path().join("svc.log").exists());
    assert!(temp_dir.path().join("svc-debug.log").exists());
    assert!(!temp_dir.path().join("ignored.log").exists());
}

#[test]
fn test_identity_from_log_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let logger = multilog::setup(
        Config::new()
            .log_file("from-file.log")
            .log_dir(temp_dir.path())
            .console_target(ConsoleTarget::Capture(capture.clone())),
    )
    .unwrap();

    assert_eq!(logger.identity(), "from-file");
    assert!(temp_dir.path().join("from-file.log").exists());
}

#[test]
fn test_nested_log_dir_is_created_and_shared() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();
    let nested = temp_dir.path().join("a").join("b").join("c");

    let one = multilog::setup(config("nested-one", &nested, &capture)).unwrap();
    let two = multilog::setup(config("nested-two", &nested, &capture)).unwrap();

    assert!(nested.is_dir());
    assert_eq!(one.log_dir(), nested.as_path());
    assert!(nested.join("nested-one.log").exists());
    assert!(nested.join("nested-two.log").exists());
    assert!(!Arc::ptr_eq(&one, &two));
}

#[test]
fn test_log_dir_that_is_a_file_fails() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();
    let file = temp_dir.path().join("plain-file");
    fs::write(&file, b"occupied").unwrap();

    let err = multilog::setup(config("blocked", &file, &capture)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert!(Registry::global().get("blocked").is_none());
}

#[test]
fn test_console_colors_and_plain_files() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();

    let logger = multilog::setup(
        config("colored", temp_dir.path(), &capture).console_level(Level::Debug),
    )
    .unwrap();
    capture.clear();

    logger.warning("x");
    logger.error("e");
    logger.critical("c");
    logger.debug("d");
    logger.flush();

    let lines = capture.lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("\x1b[93mx\x1b[0m"), "{:?}", lines[0]);
    assert!(lines[1].contains("\x1b[91me\x1b[0m"), "{:?}", lines[1]);
    assert!(lines[2].contains("\x1b[101mc\x1b[0m"), "{:?}", lines[2]);
    assert!(!lines[3].contains('\x1b'), "{:?}", lines[3]);

    let content = read(logger.main_file_path());
    assert!(!content.contains('\x1b'), "{content:?}");
    assert!(content.contains("WARNING : x\n"));
}

#[test]
fn test_failed_sink_is_degraded_while_others_continue() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();
    let log_dir = temp_dir.path().join("vanishing");

    let logger = multilog::setup(
        config("degraded", &log_dir, &capture)
            .console_level(Level::Info)
            .console_color(false)
            .max_bytes(256)
            .retention(2),
    )
    .unwrap();
    capture.clear();

    fs::remove_dir_all(&log_dir).unwrap();
    for i in 0..32 {
        logger.info(format_args!("entry {i} {}", "A".repeat(40)));
    }

    assert_eq!(logger.degraded_sinks(), vec![SinkKind::File]);
    assert!(logger.enabled(Level::Info));

    logger.warning("still on console");
    let lines = capture.lines();
    assert_eq!(lines.len(), 33);
    assert!(lines[32].ends_with("WARNING : still on console"));

    // the file sink picks up again once its directory is back
    fs::create_dir_all(&log_dir).unwrap();
    logger.info("recovered");
    logger.flush();
    assert!(logger.degraded_sinks().is_empty());

    let content = read(logger.main_file_path());
    assert_eq!(content.lines().count(), 1, "{content}");
    assert!(content.ends_with("INFO    : recovered\n"));
    assert_eq!(capture.lines().len(), 34);
}

#[test]
fn test_concurrent_lines_never_interleave() {
    const THREADS: u8 = 8;
    const LINES: usize = 200;

    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let capture = Capture::default();
    let logger = multilog::setup(
        config("concurrent", temp_dir.path(), &capture)
            .console_level(Level::Critical)
            .max_bytes(0),
    )
    .unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let logger = &logger;
            s.spawn(move || {
                let message = char::from(b'a' + t).to_string().repeat(64);
                for _ in 0..LINES {
                    logger.info(&message);
                }
            });
        }
    });
    logger.flush();

    let content = read(logger.main_file_path());
    let messages = content
        .lines()
        .skip(7)
        .map(|line| line.split_once(": ").unwrap().1)
        .collect::<Vec<_>>();
    assert_eq!(messages.len(), THREADS as usize * LINES);

    for t in 0..THREADS {
        let c = char::from(b'a' + t);
        let count = messages
            .iter()
            .filter(|message| message.len() == 64 && message.chars().all(|m| m == c))
            .count();
        assert_eq!(count, LINES, "lines of {c:?} were torn");
    }
    assert!(capture.lines().is_empty());
}
