//! Line-oriented input: every plain line is one edit of the draft, lines
//! starting with `:` are commands.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use intellidebug_core::{Msg, ProjectFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append(String),
    Submit,
    Clear,
    Project(Vec<PathBuf>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    // `::` escapes a literal leading colon.
    if let Some(rest) = line.strip_prefix("::") {
        return Command::Append(format!(":{rest}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Command::Append(line.to_string());
    };

    let mut words = command.split_whitespace();
    match words.next().unwrap_or_default() {
        "submit" | "s" => Command::Submit,
        "clear" | "c" => Command::Clear,
        "project" | "p" => Command::Project(words.map(PathBuf::from).collect()),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Splits a byte stream into lines, replacing invalid UTF-8 instead of
/// failing, so one bad byte costs one line and not the session.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        loop {
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Some(Err(err)),
            }
        }
        let line = String::from_utf8_lossy(&self.buf);
        Some(Ok(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Appends one line to the draft.
pub fn append_line(draft: &str, line: &str) -> String {
    if draft.is_empty() {
        line.to_string()
    } else {
        format!("{draft}\n{line}")
    }
}

/// Maps a draft-affecting command to its message; `Help`, `Quit` and
/// `Unknown` are handled by the caller.
pub fn command_to_msg(command: Command, draft: &str) -> Option<Msg> {
    match command {
        Command::Append(line) => Some(Msg::InputChanged(append_line(draft, &line))),
        Command::Submit => Some(Msg::SubmitClicked),
        Command::Clear => Some(Msg::ClearDraft),
        Command::Project(paths) => Some(Msg::ProjectSubmitted(load_project_files(&paths))),
        Command::Help | Command::Quit | Command::Unknown(_) => None,
    }
}

/// Reads every readable path; unreadable ones are logged and skipped.
pub fn load_project_files(paths: &[PathBuf]) -> Vec<ProjectFile> {
    paths
        .iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(content) => Some(ProjectFile::new(display_name(path), content)),
            Err(err) => {
                engine_warn!("Skipping {:?}: {}", path, err);
                None
            }
        })
        .inspect(|file| engine_info!("Project file {} ({} bytes)", file.name, file.content.len()))
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_lines_append_to_draft() {
        assert_eq!(parse_line("x = 1"), Command::Append("x = 1".to_string()));
        assert_eq!(parse_line("    return x\r\n"), Command::Append("    return x".to_string()));
        assert_eq!(parse_line(""), Command::Append(String::new()));
        assert_eq!(parse_line("::tag"), Command::Append(":tag".to_string()));

        let draft = append_line("", "def f():");
        let draft = append_line(&draft, "    return 1");
        assert_eq!(draft, "def f():\n    return 1");
    }

    #[test]
    fn invalid_utf8_only_spoils_its_own_line() {
        let lines: Vec<String> = LossyLines::new(&b"x\n\xff\ny\n"[..])
            .collect::<io::Result<_>>()
            .expect("in-memory read");

        assert_eq!(
            lines,
            vec!["x".to_string(), "\u{FFFD}".to_string(), "y".to_string()]
        );
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let lines: Vec<String> = LossyLines::new(&b"a\r\nb"[..])
            .collect::<io::Result<_>>()
            .expect("in-memory read");

        assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn commands_are_recognized() {
        assert_eq!(parse_line(":submit"), Command::Submit);
        assert_eq!(parse_line(":s"), Command::Submit);
        assert_eq!(parse_line(":clear"), Command::Clear);
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line(":help"), Command::Help);
        assert_eq!(
            parse_line(":project a.py src/b.py"),
            Command::Project(vec![PathBuf::from("a.py"), PathBuf::from("src/b.py")])
        );
        assert_eq!(parse_line(":frobnicate"), Command::Unknown("frobnicate".to_string()));
        assert_eq!(parse_line(":"), Command::Unknown(String::new()));
    }

    #[test]
    fn append_becomes_input_changed_with_full_draft() {
        let msg = command_to_msg(Command::Append("b".to_string()), "a");
        assert_eq!(msg, Some(Msg::InputChanged("a\nb".to_string())));
        assert_eq!(command_to_msg(Command::Quit, "a"), None);
    }

    #[test]
    fn project_files_skip_unreadable_paths() {
        let dir = tempfile::tempdir().expect("temp dir");
        let good = dir.path().join("utils.py");
        fs::write(&good, "def f(): pass").expect("write");
        let missing = dir.path().join("missing.py");

        let files = load_project_files(&[good, missing]);
        assert_eq!(files, vec![ProjectFile::new("utils.py", "def f(): pass")]);
    }
}
