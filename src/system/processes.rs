//! Process enumeration from `/proc`
//!
//! Every readable `/proc/<pid>` directory becomes one [`ProcessRawRecord`].
//! A process that exits between listing and reading its `stat` file is
//! skipped; any other missing field falls back to an empty or zero value.

use std::collections::HashMap;

use log::{debug, warn};
use nix::unistd::{Uid, User};
use procfs::process::{all_processes, Process};

use crate::constants::MAX_PROCESSES;

/// Raw, absolute counters for one process as read from the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessRawRecord {
    pub pid: i32,
    pub parent_pid: i32,
    /// Owning user name, or the numeric uid if it has no name
    pub owner: String,
    /// Short process name (`comm`)
    pub name: String,
    /// Full command line joined by spaces; empty for kernel threads
    pub cmdline: String,
    pub state: char,
    /// Cumulative `utime + stime` in clock ticks
    pub cpu_ticks: u64,
    pub virtual_kb: u64,
    pub resident_kb: u64,
    pub priority: i64,
    pub nice: i64,
    pub thread_count: i64,
}

impl ProcessRawRecord {
    /// Display string: the command line, or the short name when it is empty.
    pub fn display_command(&self) -> String {
        let cmdline = self.cmdline.trim();
        if cmdline.is_empty() {
            self.name.clone()
        } else {
            cmdline.to_string()
        }
    }
}

/// Resolves uids to user names, remembering every answer.
#[derive(Debug, Default)]
pub struct UserCache {
    names: HashMap<u32, String>,
}

impl UserCache {
    /// Returns the user name for `uid`, or the uid itself as a string.
    pub fn name_for(&mut self, uid: u32) -> String {
        self.names
            .entry(uid)
            .or_insert_with(|| lookup_user_name(uid).unwrap_or_else(|| uid.to_string()))
            .clone()
    }
}

fn lookup_user_name(uid: u32) -> Option<String> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => Some(user.name),
        Ok(None) => None,
        Err(e) => {
            debug!("passwd lookup for uid {} failed: {}", uid, e);
            None
        }
    }
}

/// Reads one process; `None` if it vanished or its `stat` file is unreadable.
fn read_process(process: &Process, users: &mut UserCache, page_kb: u64) -> Option<ProcessRawRecord> {
    let stat = process.stat().ok()?;
    let owner = match process.uid() {
        Ok(uid) => users.name_for(uid),
        Err(_) => "unknown".to_string(),
    };
    let cmdline = process
        .cmdline()
        .map(|args| args.join(" "))
        .unwrap_or_default();

    Some(ProcessRawRecord {
        pid: stat.pid,
        parent_pid: stat.ppid,
        owner,
        name: stat.comm,
        cmdline,
        state: stat.state,
        cpu_ticks: stat.utime as u64 + stat.stime as u64,
        virtual_kb: stat.vsize as u64 / 1024,
        resident_kb: stat.rss as u64 * page_kb,
        priority: stat.priority as i64,
        nice: stat.nice as i64,
        thread_count: stat.num_threads as i64,
    })
}

/// Enumerates all processes visible to the current user.
///
/// Returns at most [`MAX_PROCESSES`] records; an unreadable `/proc` yields an
/// empty list.
pub fn enumerate_processes(users: &mut UserCache) -> Vec<ProcessRawRecord> {
    let listing = match all_processes() {
        Ok(listing) => listing,
        Err(e) => {
            warn!("cannot list /proc: {}", e);
            return Vec::new();
        }
    };

    let page_kb = (procfs::page_size() / 1024).max(1);
    let mut records = Vec::new();

    for entry in listing {
        if records.len() >= MAX_PROCESSES {
            debug!("process cap of {} reached, ignoring the rest", MAX_PROCESSES);
            break;
        }
        let Ok(process) = entry else {
            continue;
        };
        if process.pid <= 0 {
            continue;
        }
        if let Some(record) = read_process(&process, users, page_kb) {
            records.push(record);
        }
    }

    records
}
