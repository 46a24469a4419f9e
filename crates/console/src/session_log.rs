#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const FILE_NAME: &str = "tidemark_last_session.txt";

pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Small key=value record of the most recent session, rewritten on every note.
///
/// Never contains request bodies. Write failures are ignored.
#[derive(Clone, Debug)]
pub(crate) struct SessionLog {
    path: PathBuf,
    start_rfc3339: String,
    pid: u32,
    build: &'static str,
    framing: Option<String>,
    requests: u64,
    last_method: Option<String>,
    last_error: Option<String>,
    exit: Option<String>,
}

impl SessionLog {
    pub(crate) fn new(state_dir: &Path) -> Self {
        let this = Self {
            path: state_dir.join(FILE_NAME),
            start_rfc3339: now_rfc3339(),
            pid: std::process::id(),
            build: crate::config::VERSION,
            framing: None,
            requests: 0,
            last_method: None,
            last_error: None,
            exit: None,
        };
        this.flush();
        this
    }

    /// A log that is never written, for in-process tests.
    #[cfg(test)]
    pub(crate) fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            start_rfc3339: now_rfc3339(),
            pid: std::process::id(),
            build: crate::config::VERSION,
            framing: None,
            requests: 0,
            last_method: None,
            last_error: None,
            exit: None,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn note_framing(&mut self, framing: &str) {
        self.framing = Some(framing.to_string());
        self.flush();
    }

    pub(crate) fn note_method(&mut self, method: &str) {
        let method = method.trim();
        if method.is_empty() {
            return;
        }
        self.requests += 1;
        self.last_method = Some(truncate(method, 96));
        self.flush();
    }

    pub(crate) fn note_error(&mut self, error: &str) {
        let error = error.trim();
        if error.is_empty() {
            return;
        }
        self.last_error = Some(truncate(error, 300));
        self.flush();
    }

    pub(crate) fn note_exit(&mut self, reason: &str) {
        self.exit = Some(truncate(reason.trim(), 120));
        self.flush();
    }

    pub(crate) fn render(&self) -> String {
        let mut out = String::new();
        push_kv(&mut out, "ts_start", &self.start_rfc3339);
        push_kv(&mut out, "pid", &self.pid.to_string());
        push_kv(&mut out, "build", self.build);
        if let Some(framing) = &self.framing {
            push_kv(&mut out, "framing", framing);
        }
        push_kv(&mut out, "requests", &self.requests.to_string());
        if let Some(method) = &self.last_method {
            push_kv(&mut out, "last_method", method);
        }
        if let Some(err) = &self.last_error {
            push_kv(&mut out, "last_error", err);
        }
        if let Some(exit) = &self.exit {
            push_kv(&mut out, "exit", exit);
        }
        out
    }

    fn flush(&self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        let Some(dir) = self.path.parent() else {
            return;
        };
        let _ = std::fs::create_dir_all(dir);
        let _ = std::fs::write(&self.path, self.render());
    }
}

fn push_kv(out: &mut String, key: &str, value: &str) {
    use std::fmt::Write as _;
    let _ = writeln!(out, "{key}={value}");
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
