// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end runs against a stand-in transform.

use crate::prelude::*;

#[test]
fn invalid_input_dir_exits_one() {
    let ws = Workspace::empty();
    ws.config(&ws.path().join("ffmpeg"));

    ws.loudq()
        .args(&["does-not-exist", "out"])
        .fails()
        .stderr_has("input directory does not exist");
    assert!(!ws.error_log().exists(), "no job may start before validation");
}

#[test]
fn missing_config_exits_one() {
    let ws = Workspace::empty();
    ws.file("in/a.mp3", "a");

    ws.run(&[]).fails().stderr_has("config.ini");
    assert!(!ws.output().join("a.mp3").exists());
}

#[test]
fn config_without_ffmpeg_path_exits_one() {
    let ws = Workspace::empty();
    ws.file("config.ini", "ffmpeg_path=\n");

    ws.run(&[]).fails().stderr_has("no ffmpeg_path entry");
}

#[test]
fn config_location_comes_from_env() {
    let ws = Workspace::empty();
    ws.file("elsewhere.ini", "nothing=here\n");

    ws.run(&[])
        .env("LOUDQ_CONFIG", ws.path().join("elsewhere.ini").to_str().unwrap())
        .fails()
        .stderr_has("elsewhere.ini");
}

#[cfg(unix)]
mod with_transform {
    use super::*;
    use similar_asserts::assert_eq;

    fn scenario() -> Workspace {
        let ws = Workspace::empty();
        ws.fake_ffmpeg();
        ws.file("in/a.mp3", "alpha").file("in/bad.mp3", "broken").file("in/c.txt", "notes");
        ws
    }

    #[test]
    fn partial_failure_still_exits_zero() {
        let ws = scenario();

        ws.run(&["2"])
            .passes()
            .stdout_has("1 processed, 1 failed, 0 skipped")
            .stdout_has("See:");

        assert_eq!(ws.read("out/a.mp3"), "alpha".to_string());
        assert!(!ws.output().join("c.txt").exists());
        assert_eq!(
            ws.read("failed_jobs.txt"),
            format!("{}\n", ws.input().join("bad.mp3").display())
        );
    }

    #[test]
    fn clean_run_has_no_error_log_hint() {
        let ws = Workspace::empty();
        ws.fake_ffmpeg();
        ws.file("in/one.mp3", "1").file("in/two.MP3", "2");

        ws.run(&[]).passes().stdout_has("2 processed, 0 failed").stdout_lacks("See:");
        assert_eq!(ws.read("failed_jobs.txt"), String::new());
    }

    #[test]
    fn empty_input_dir_completes() {
        let ws = Workspace::empty();
        ws.fake_ffmpeg();

        ws.run(&["0"]).passes().stdout_has("0 processed, 0 failed, 0 skipped");
        assert!(ws.output().is_dir());
    }

    #[test]
    fn existing_outputs_are_skipped_unless_forced() {
        let ws = Workspace::empty();
        ws.fake_ffmpeg();
        ws.file("in/a.mp3", "fresh").file("out/a.mp3", "stale");

        ws.run(&[]).passes().stdout_has("0 processed, 0 failed, 1 skipped");
        assert_eq!(ws.read("out/a.mp3"), "stale".to_string());

        ws.run(&["--force"]).passes().stdout_has("1 processed, 0 failed, 0 skipped");
        assert_eq!(ws.read("out/a.mp3"), "fresh".to_string());
    }

    #[test]
    fn error_log_is_truncated_each_run() {
        let ws = scenario();
        ws.file("failed_jobs.txt", "leftover\n");

        ws.run(&[]).passes();

        let log = ws.read("failed_jobs.txt");
        assert!(!log.contains("leftover"), "log: {log}");
        assert_eq!(log.lines().count(), 1);
    }

    #[test]
    fn custom_extension_and_error_log() {
        let ws = Workspace::empty();
        ws.fake_ffmpeg();
        ws.file("in/a.wav", "w").file("in/bad.wav", "x").file("in/skip.mp3", "m");

        ws.run(&["--ext", "wav", "--error-log", "logs/errors.txt"])
            .passes()
            .stdout_has("1 processed, 1 failed");

        assert!(ws.output().join("a.wav").exists());
        assert!(!ws.output().join("skip.mp3").exists());
        assert!(ws.read("logs/errors.txt").contains("bad.wav"));
    }

    #[test]
    fn json_summary_reports_each_job() {
        let ws = scenario();

        let ran = ws.run(&["--format", "json", "--no-dashboard"]).passes();
        let value: serde_json::Value = serde_json::from_str(&ran.stdout()).unwrap();

        assert_eq!(value["jobs"]["a.mp3"].as_str(), Some("done"));
        assert_eq!(value["jobs"]["bad.mp3"].as_str(), Some("error"));
        assert!(value["jobs"].get("c.txt").is_none());
        assert_eq!(value["counts"]["done"].as_u64(), Some(1));
        assert_eq!(value["error_log_has_entries"].as_bool(), Some(true));
    }

    #[test]
    fn log_file_receives_tracing_output() {
        let ws = scenario();

        ws.run(&[])
            .env("LOUDQ_LOG", "info")
            .env("LOUDQ_LOG_FILE", ws.path().join("loudq.log").to_str().unwrap())
            .passes();

        assert!(ws.read("loudq.log").contains("run finished"));
    }
}
