use wheelpick_shared::{SessionError, SessionResult};

pub const HELP: &str = "\
commands:
  add <name>        put a name on the wheel
  quick <n>         add quick suggestion n (see `suggest`)
  remove <n>        remove the n-th name (1-based)
  clear             remove every name and the winner
  list              show the wheel
  suggest           show quick-add suggestions
  spin              spin the wheel
  duration <secs>   set spin length (2-8, step 0.5)
  palette <name>    switch colour palette
  font <name>       switch label font
  history           winners so far
  help              this text
  quit              leave (cancels a running spin)";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Quick(usize),
    Remove(usize),
    Clear,
    List,
    Suggest,
    Spin,
    Duration(f64),
    Palette(String),
    Font(String),
    History,
    Help,
    Quit,
}

impl Command {
    /// Whether the command edits the name list, which is frozen mid-spin.
    pub fn edits_names(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Quick(_) | Command::Remove(_) | Command::Clear
        )
    }
}

fn one_based(arg: &str) -> SessionResult<usize> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(SessionError::Invalid(format!("expected a position, got `{arg}`"))),
    }
}

fn required<'a>(verb: &str, arg: &'a str) -> SessionResult<&'a str> {
    if arg.is_empty() {
        return Err(SessionError::Invalid(format!("`{verb}` needs an argument")));
    }
    Ok(arg)
}

pub fn parse_command(line: &str) -> SessionResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => Command::Add(required(verb, arg)?.to_string()),
        "quick" => Command::Quick(one_based(required(verb, arg)?)?),
        "remove" | "rm" => Command::Remove(one_based(required(verb, arg)?)?),
        "clear" => Command::Clear,
        "list" | "ls" => Command::List,
        "suggest" => Command::Suggest,
        "spin" => Command::Spin,
        "duration" => {
            let secs = required(verb, arg)?
                .parse::<f64>()
                .map_err(|_| SessionError::Invalid(format!("`{arg}` is not a number")))?;
            Command::Duration(secs)
        }
        "palette" => Command::Palette(required(verb, arg)?.to_string()),
        "font" => Command::Font(required(verb, arg)?.to_string()),
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(SessionError::Invalid(format!("unknown command `{other}`"))),
    };
    Ok(Some(command))
}
