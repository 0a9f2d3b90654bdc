use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::LazyLock;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{debug, trace, warn};
use regex::Regex;

use crate::error::{InterpreterError, InterpreterResult};

use super::{Event, Interpreter};

/// How long stdout must stay quiet before the prompt check runs.
const IDLE: Duration = Duration::from_millis(150);
/// Quiet periods to wait for a `>` prompt before asking for input anyway.
const PATIENCE: u32 = 20;

static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\S.*?\s{2,}.*\bmoves:\s*\d+\s*$").unwrap());

/// Turns raw stdout reads into text without splitting multi-byte characters.
///
/// Bytes of a character cut off at the end of a read are held back until the
/// next read completes them. Invalid sequences become U+FFFD.
#[derive(Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut text = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.pending.clear();
                    return text;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    text.push_str(std::str::from_utf8(&self.pending[..valid]).unwrap_or_default());
                    match e.error_len() {
                        Some(bad) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.pending = self.pending.split_off(valid + bad);
                        }
                        None => {
                            self.pending = self.pending.split_off(valid);
                            return text;
                        }
                    }
                }
            }
        }
    }

    /// Whatever is still held back once the stream has ended.
    fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}

enum ReaderMsg {
    Chunk(String),
    Eof,
    Failed(io::Error),
}

/// Drives an external interpreter (such as `dfrotz`) over stdin/stdout.
///
/// A reader thread forwards stdout as it arrives. Input is requested once
/// the output has gone quiet and ends with a `>` prompt, or once the
/// patience limit runs out.
pub struct ProcessInterpreter {
    child: Child,
    stdin: ChildStdin,
    rx: Receiver<ReaderMsg>,
    pending: VecDeque<Event>,
    tail: String,
    partial: String,
    max_len: usize,
    idle: Duration,
    patience: u32,
    awaiting: bool,
    finished: bool,
}

impl ProcessInterpreter {
    /// Start `program` with `args`.
    ///
    /// `max_len` is the input length reported with every request.
    pub fn spawn(program: &str, args: &[String], max_len: usize) -> InterpreterResult<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(InterpreterError::Spawn)?;

        let missing = |what: &str| InterpreterError::Spawn(io::Error::other(format!("no {what} pipe")));
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("interpreter-stdout".to_string())
            .spawn(move || {
                let mut stdout = stdout;
                let mut buf = [0u8; 4096];
                let mut decoder = Utf8Decoder::default();
                loop {
                    let msg = match stdout.read(&mut buf) {
                        Ok(0) => {
                            let rest = decoder.finish();
                            if !rest.is_empty() && tx.send(ReaderMsg::Chunk(rest)).is_err() {
                                break;
                            }
                            ReaderMsg::Eof
                        }
                        Ok(n) => ReaderMsg::Chunk(decoder.push(&buf[..n])),
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) => ReaderMsg::Failed(e),
                    };
                    let last = !matches!(msg, ReaderMsg::Chunk(_));
                    if tx.send(msg).is_err() || last {
                        break;
                    }
                }
            })
            .map_err(InterpreterError::Spawn)?;

        debug!("spawned interpreter {program} {args:?} (pid {})", child.id());
        Ok(Self {
            child,
            stdin,
            rx,
            pending: VecDeque::new(),
            tail: String::new(),
            partial: String::new(),
            max_len,
            idle: IDLE,
            patience: PATIENCE,
            awaiting: false,
            finished: false,
        })
    }

    /// Set how long output must stay quiet before the prompt check.
    pub fn with_idle(mut self, idle: Duration) -> Self {
        self.idle = idle;
        self
    }

    /// Set how many quiet periods to wait for a prompt.
    pub fn with_patience(mut self, patience: u32) -> Self {
        self.patience = patience;
        self
    }

    /// Split stdout text into output and status events.
    ///
    /// Only complete lines are classified. A trailing unterminated line waits
    /// in `partial` until its newline arrives or the output goes quiet.
    fn absorb(&mut self, chunk: &str) {
        self.partial.push_str(chunk);
        let Some(end) = self.partial.rfind('\n') else {
            return;
        };
        let rest = self.partial.split_off(end + 1);
        let complete = std::mem::replace(&mut self.partial, rest);
        let mut narrative = String::new();
        for line in complete.split_inclusive('\n') {
            let line = line.trim_end_matches('\n').trim_end_matches('\r');
            if STATUS_LINE.is_match(line) {
                self.emit_narrative(std::mem::take(&mut narrative));
                self.pending.push_back(Event::Status(line.trim().to_string()));
            } else {
                narrative.push_str(line);
                narrative.push('\n');
            }
        }
        self.emit_narrative(narrative);
    }

    /// Release an unterminated line, such as the `>` prompt.
    fn flush_partial(&mut self) {
        let line = std::mem::take(&mut self.partial);
        if STATUS_LINE.is_match(line.trim_end_matches('\r')) {
            self.pending.push_back(Event::Status(line.trim().to_string()));
        } else {
            self.emit_narrative(line);
        }
    }

    fn emit_narrative(&mut self, text: String) {
        if !text.is_empty() {
            self.tail.push_str(&text);
            self.pending.push_back(Event::Output(text));
        }
    }

    fn prompt_visible(&self) -> bool {
        self.tail.trim_end().ends_with('>')
    }
}

impl Interpreter for ProcessInterpreter {
    fn step(&mut self) -> InterpreterResult<Event> {
        if self.awaiting {
            return Ok(Event::InputRequest { max_len: self.max_len });
        }
        let mut quiet = 0;
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            if self.finished {
                return Ok(Event::Done);
            }
            match self.rx.recv_timeout(self.idle) {
                Ok(ReaderMsg::Chunk(chunk)) => {
                    trace!("interpreter wrote {} bytes", chunk.len());
                    self.absorb(&chunk);
                }
                Ok(ReaderMsg::Failed(e)) => return Err(InterpreterError::Io(e)),
                Ok(ReaderMsg::Eof) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("interpreter closed its output");
                    self.flush_partial();
                    self.finished = true;
                }
                Err(RecvTimeoutError::Timeout) if !self.partial.is_empty() => {
                    self.flush_partial();
                }
                Err(RecvTimeoutError::Timeout) => {
                    quiet += 1;
                    let prompt = self.prompt_visible();
                    if prompt || quiet > self.patience {
                        if !prompt {
                            warn!("no prompt after {quiet} quiet periods, asking for input");
                        }
                        self.tail.clear();
                        self.awaiting = true;
                        return Ok(Event::InputRequest { max_len: self.max_len });
                    }
                }
            }
        }
    }

    fn resume(&mut self, input: &str) -> InterpreterResult<()> {
        if !self.awaiting {
            return Err(InterpreterError::NotAwaitingInput);
        }
        let written = self
            .stdin
            .write_all(input.as_bytes())
            .and_then(|()| self.stdin.flush());
        match written {
            Ok(()) => {
                self.awaiting = false;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                Err(InterpreterError::Exited("input pipe closed".to_string()))
            }
            Err(e) => Err(InterpreterError::Io(e)),
        }
    }
}

impl Drop for ProcessInterpreter {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            trace!("interpreter already gone: {e}");
        }
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> ProcessInterpreter {
        ProcessInterpreter::spawn("sh", &["-c".to_string(), script.to_string()], 80)
            .unwrap()
            .with_idle(Duration::from_millis(50))
            .with_patience(40)
    }

    fn collect_until_input(interp: &mut ProcessInterpreter) -> (String, Vec<String>, Event) {
        let mut text = String::new();
        let mut status = Vec::new();
        loop {
            match interp.step().unwrap() {
                Event::Output(t) => text.push_str(&t),
                Event::Status(s) => status.push(s),
                other => return (text, status, other),
            }
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let result = ProcessInterpreter::spawn("/nonexistent/dfrotz", &[], 80);
        assert!(matches!(result, Err(InterpreterError::Spawn(_))));
    }

    #[cfg(unix)]
    #[test]
    fn status_lines_are_lifted() {
        let mut interp = shell("exit 0");
        interp.absorb(" West of House        Score: 0     Moves: 1\r\nYou are standing in an open field.\r\n");
        assert_eq!(
            interp.pending.pop_front(),
            Some(Event::Status("West of House        Score: 0     Moves: 1".into()))
        );
        assert_eq!(
            interp.pending.pop_front(),
            Some(Event::Output("You are standing in an open field.\n".into()))
        );
    }

    #[test]
    fn decoder_holds_back_split_character() {
        let mut decoder = Utf8Decoder::default();
        let bytes = "café".as_bytes();
        assert_eq!(decoder.push(&bytes[..4]), "caf");
        assert_eq!(decoder.push(&bytes[4..]), "é");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn decoder_replaces_invalid_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.push(b"a\xffb"), "a\u{FFFD}b");
    }

    #[test]
    fn decoder_finish_flushes_truncated_tail() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.push(b"x\xc3"), "x");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }

    #[cfg(unix)]
    #[test]
    fn lines_split_across_reads() {
        let mut interp = shell("exit 0");
        interp.absorb("You are in a\r");
        assert!(interp.pending.is_empty());
        interp.absorb("\n West of House        Score: 0");
        interp.absorb("     Moves: 1\r\n>");
        assert_eq!(
            interp.pending.pop_front(),
            Some(Event::Output("You are in a\n".into()))
        );
        assert_eq!(
            interp.pending.pop_front(),
            Some(Event::Status("West of House        Score: 0     Moves: 1".into()))
        );
        assert!(interp.pending.is_empty());
        assert_eq!(interp.partial, ">");

        interp.flush_partial();
        assert_eq!(interp.pending.pop_front(), Some(Event::Output(">".into())));
        assert!(interp.prompt_visible());
    }

    #[cfg(unix)]
    #[test]
    fn accented_text_across_read_boundary() {
        // Pad so that the two bytes of the accent straddle the 4096-byte read.
        let mut interp = shell(r"printf '%4095s\303\251 done\n>' ''");
        let (text, _, event) = collect_until_input(&mut interp);
        assert!(text.contains("é done"));
        assert!(!text.contains('\u{FFFD}'));
        assert_eq!(event, Event::InputRequest { max_len: 80 });
    }

    #[cfg(unix)]
    #[test]
    fn prompt_then_echo() {
        let mut interp = shell(r#"printf 'West of House\n\n>'; read line; printf 'You said %s\n' "$line""#);
        let (text, _, event) = collect_until_input(&mut interp);
        assert_eq!(text, "West of House\n\n>");
        assert_eq!(event, Event::InputRequest { max_len: 80 });

        interp.resume("hello\n").unwrap();
        let (text, _, event) = collect_until_input(&mut interp);
        assert_eq!(text, "You said hello\n");
        assert_eq!(event, Event::Done);
    }

    #[cfg(unix)]
    #[test]
    fn resume_before_request_fails() {
        let mut interp = shell("read line");
        assert!(matches!(
            interp.resume("look\n"),
            Err(InterpreterError::NotAwaitingInput)
        ));
    }
}
