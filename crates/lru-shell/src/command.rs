//! Text command parsing for the shell

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Get(String),
    Set(String, String),
    Peek(String),
    Exists(String),
    Del(String),
    Keys,
    Len,
    Stats,
    Clear,
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments. The verb is
    /// case-insensitive; the value of `SET` is the rest of the line.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let verb = verb.to_uppercase();

        let command = match verb.as_str() {
            "PING" => no_args(&verb, rest, Command::Ping)?,
            "GET" => Command::Get(single_key(&verb, rest)?),
            "PEEK" => Command::Peek(single_key(&verb, rest)?),
            "EXISTS" => Command::Exists(single_key(&verb, rest)?),
            "DEL" => Command::Del(single_key(&verb, rest)?),
            "SET" => match rest.split_once(char::is_whitespace) {
                Some((key, value)) => Command::Set(key.to_string(), value.trim().to_string()),
                None => return Err(wrong_arity(&verb)),
            },
            "KEYS" => no_args(&verb, rest, Command::Keys)?,
            "LEN" => no_args(&verb, rest, Command::Len)?,
            "STATS" => no_args(&verb, rest, Command::Stats)?,
            "CLEAR" => no_args(&verb, rest, Command::Clear)?,
            _ => return Err(format!("ERR unknown command '{}'", verb)),
        };

        Ok(Some(command))
    }
}

fn single_key(verb: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(wrong_arity(verb));
    }
    Ok(rest.to_string())
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(wrong_arity(verb))
    }
}

fn wrong_arity(verb: &str) -> String {
    format!(
        "ERR wrong number of arguments for '{}' command",
        verb.to_lowercase()
    )
}
