/// One parsed line of `shell ps` output. Never persisted, lives only for the
/// duration of a lookup.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
}

/// Parse a process listing into records. Columns are whitespace-delimited
/// (USER PID PPID ... NAME); the pid is the second column and the command
/// name the last. Lines that do not fit (headers, truncated output) are
/// skipped. `lines()` already strips the `\r` of CRLF-terminated output.
pub fn parse_process_list(raw: &str) -> Vec<ProcessRecord> {
    raw.lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 3 {
                return None;
            }
            let pid = cols[1].parse().ok()?;
            let name = (*cols.last()?).to_string();
            Some(ProcessRecord { pid, name })
        })
        .collect()
}

/// Pid of the first process whose command name ends with `package`, or
/// `None` if nothing matches. The match is end-anchored so that
/// `com.foo.bar` is not shadowed by an earlier `com.foo.bar.persistent`
/// line. An empty or unparseable listing is "process absent", not an error.
pub fn find_pid(raw: &str, package: &str) -> Option<u32> {
    parse_process_list(raw)
        .into_iter()
        .find(|p| p.name.ends_with(package))
        .map(|p| p.pid)
}
