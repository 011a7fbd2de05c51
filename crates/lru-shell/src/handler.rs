//! Command handler for the shell

use std::fmt;

use lrucache::SharedLruCache;
use tracing::{debug, warn};

use crate::command::Command;

/// Reply to a single command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Pong,
    Value(String),
    Nil,
    Integer(i64),
    List(Vec<String>),
    Json(String),
    Error(String),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Pong => write!(f, "PONG"),
            Reply::Value(v) => write!(f, "\"{}\"", v),
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::List(items) if items.is_empty() => write!(f, "(empty list)"),
            Reply::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) \"{}\"", i + 1, item)?;
                }
                Ok(())
            }
            Reply::Json(json) => write!(f, "{}", json),
            Reply::Error(msg) => write!(f, "{}", msg),
        }
    }
}

pub struct CommandHandler {
    cache: SharedLruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: SharedLruCache<String, String>) -> Self {
        Self { cache }
    }

    /// Parse and run one input line. Blank lines and comments yield `None`.
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        let reply = match Command::parse(line) {
            Ok(Some(cmd)) => self.handle(cmd),
            Ok(None) => return None,
            Err(msg) => Reply::Error(msg),
        };

        if let Reply::Error(msg) = &reply {
            warn!("{}", msg);
        }
        Some(reply)
    }

    pub fn handle(&self, cmd: Command) -> Reply {
        debug!(?cmd, "handling command");
        match cmd {
            Command::Ping => Reply::Pong,
            Command::Get(key) => self.cache.get(&key).map_or(Reply::Nil, Reply::Value),
            Command::Peek(key) => self.cache.peek(&key).map_or(Reply::Nil, Reply::Value),
            Command::Set(key, value) => {
                if let Some((evicted, _)) = self.cache.push(key, value) {
                    debug!(key = %evicted, "evicted");
                }
                Reply::Ok
            }
            Command::Exists(key) => Reply::Integer(i64::from(self.cache.contains(&key))),
            Command::Del(key) => Reply::Integer(i64::from(self.cache.remove(&key).is_some())),
            Command::Keys => Reply::List(self.cache.keys()),
            Command::Len => Reply::Integer(self.cache.len() as i64),
            Command::Stats => match serde_json::to_string(&self.cache.stats()) {
                Ok(json) => Reply::Json(json),
                Err(e) => Reply::Error(format!("ERR {}", e)),
            },
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
        }
    }
}
