//! End-to-end job control: background launch, foreground wait, stop and
//! resume, signal death, table capacity.

use crate::prelude::*;

#[test]
fn background_job_is_announced_and_listed() {
    let run = tsh().script(&["sleep 1 &", "jobs"]).passes();
    let lines = run.lines();

    assert_eq!(lines.len(), 2, "{lines:?}");
    let pid = pid_in(lines[0]);
    assert_eq!(lines[0], format!("[1] ({pid}) sleep 1 &"));
    assert_eq!(lines[1], format!("[1] ({pid}) Running sleep 1 &"));
}

#[test]
fn foreground_job_blocks_until_it_exits() {
    // `jobs` only runs after `sleep` is reaped, so it prints nothing.
    tsh()
        .script(&["sleep 1", "jobs", "/bin/echo done"])
        .passes()
        .stdout_eq("done\n");
}

#[test]
fn stopped_job_is_reported_and_resumed_with_fg() {
    let run = tsh()
        .script(&["sh -c 'kill -TSTP $$'", "jobs", "fg %1", "jobs"])
        .passes();
    let lines = run.lines();

    assert_eq!(lines.len(), 2, "{lines:?}");
    let pid = pid_in(lines[0]);
    assert_eq!(lines[0], format!("Job [1] ({pid}) stopped by signal 20"));
    assert_eq!(lines[1], format!("[1] ({pid}) Stopped sh -c 'kill -TSTP $$'"));
}

#[test]
fn stopped_job_is_resumed_with_bg() {
    let run = tsh()
        .script(&["sh -c 'kill -STOP $$; sleep 1'", "bg %1", "jobs"])
        .passes();
    let lines = run.lines();

    let pid = pid_in(lines[0]);
    assert_eq!(lines[0], format!("Job [1] ({pid}) stopped by signal 19"));
    assert_eq!(lines[1], format!("[1] ({pid}) sh -c 'kill -STOP $$; sleep 1'"));
    assert_eq!(lines[2], format!("[1] ({pid}) Running sh -c 'kill -STOP $$; sleep 1'"));
}

#[test]
fn killed_job_is_reported_and_removed() {
    let run = tsh()
        .script(&["sh -c 'kill -TERM $$'", "jobs"])
        .passes();
    let lines = run.lines();

    assert_eq!(lines.len(), 1, "{lines:?}");
    let pid = pid_in(lines[0]);
    assert_eq!(lines[0], format!("Job [1] ({pid}) terminated by signal 15"));
}

#[test]
fn full_table_rejects_registration() {
    let run = tsh()
        .env("TSH_MAX_JOBS", "2")
        .script(&["sleep 1 &", "sleep 1 &", "sleep 1 &", "jobs"])
        .passes();
    let lines = run.lines();

    assert_eq!(lines.len(), 5, "{lines:?}");
    assert!(lines[0].starts_with("[1] ("));
    assert!(lines[1].starts_with("[2] ("));
    assert_eq!(lines[2], "Tried to create too many jobs");
    assert!(lines[3].starts_with("[1] (") && lines[3].ends_with(") Running sleep 1 &"));
    assert!(lines[4].starts_with("[2] (") && lines[4].ends_with(") Running sleep 1 &"));
}

#[test]
fn jids_restart_after_table_empties() {
    tsh()
        .script(&["sleep 0.2 &", "sleep 1", "sleep 1 &", "jobs"])
        .passes()
        .stdout_lacks("[2]")
        .stdout_has(") Running sleep 1 &");
}
