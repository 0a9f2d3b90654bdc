//! Merging human and queued commands onto one input channel.
//!
//! The interpreter accepts exactly one line each time it asks for input.
//! [`CommandSource`] remembers whether such a request is open and serves
//! it either from the queue or from the player, never both.

use std::collections::VecDeque;

use log::{debug, trace};

/// A command bound for the interpreter, with the length limit of the
/// request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// The command text, untruncated.
    pub command: String,
    /// Longest input the request accepts.
    pub max_len: usize,
}

/// An open request for one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputSlot {
    max_len: usize,
}

/// FIFO of queued commands plus the interpreter's pending input request.
#[derive(Debug, Clone, Default)]
pub struct CommandSource {
    queue: VecDeque<String>,
    slot: Option<InputSlot>,
}

impl CommandSource {
    /// Create an empty source with no open request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the interpreter is asking for input.
    ///
    /// Replaces any request already open.
    pub fn request(&mut self, max_len: usize) {
        trace!("input requested (max {max_len})");
        self.slot = Some(InputSlot { max_len });
    }

    /// Whether an input request is open.
    pub fn is_waiting(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether queued commands remain.
    pub fn has_queued(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Queued commands, next first.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Number of queued commands.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Hand a typed command to the open request.
    ///
    /// Returns `None`, leaving everything untouched, when no request is
    /// open.
    pub fn submit_human(&mut self, command: &str) -> Option<Delivery> {
        let slot = self.slot.take()?;
        Some(Delivery {
            command: command.to_string(),
            max_len: slot.max_len,
        })
    }

    /// Append commands to the queue.
    ///
    /// If a request is open it is served at once with the first queued
    /// command; the rest wait for later requests.
    pub fn enqueue<I, S>(&mut self, commands: I) -> Option<Delivery>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.queue.len();
        self.queue.extend(commands.into_iter().map(Into::into));
        debug!("queued {} command(s)", self.queue.len() - before);
        if self.is_waiting() {
            self.serve_queued()
        } else {
            None
        }
    }

    /// Serve the open request from the head of the queue.
    ///
    /// Returns `None` when no request is open or the queue is empty.
    pub fn serve_queued(&mut self) -> Option<Delivery> {
        if self.queue.is_empty() {
            return None;
        }
        let slot = self.slot.take()?;
        let command = self.queue.pop_front()?;
        Some(Delivery {
            command,
            max_len: slot.max_len,
        })
    }

    /// Drop every queued command.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_submit_without_request_is_ignored() {
        let mut source = CommandSource::new();
        assert_eq!(source.submit_human("look"), None);
        assert!(!source.is_waiting());
    }

    #[test]
    fn human_submit_consumes_request() {
        let mut source = CommandSource::new();
        source.request(80);
        let delivery = source.submit_human("look").unwrap();
        assert_eq!(delivery.command, "look");
        assert_eq!(delivery.max_len, 80);
        assert!(!source.is_waiting());
        assert_eq!(source.submit_human("look"), None);
    }

    #[test]
    fn enqueue_without_request_only_queues() {
        let mut source = CommandSource::new();
        assert_eq!(source.enqueue(["n", "e"]), None);
        assert_eq!(source.pending().collect::<Vec<_>>(), ["n", "e"]);
    }

    #[test]
    fn enqueue_with_open_request_serves_exactly_one() {
        let mut source = CommandSource::new();
        source.request(80);
        let delivery = source.enqueue(["n", "e", "open window"]).unwrap();
        assert_eq!(delivery.command, "n");
        assert!(!source.is_waiting());
        assert_eq!(source.pending().collect::<Vec<_>>(), ["e", "open window"]);
    }

    #[test]
    fn queued_commands_served_in_order() {
        let mut source = CommandSource::new();
        source.enqueue(["a", "b"]);
        source.enqueue(["c"]);
        let mut served = Vec::new();
        loop {
            source.request(10);
            match source.serve_queued() {
                Some(d) => served.push(d.command),
                None => break,
            }
        }
        assert_eq!(served, ["a", "b", "c"]);
        assert!(source.is_waiting());
    }

    #[test]
    fn serve_queued_keeps_request_when_queue_empty() {
        let mut source = CommandSource::new();
        source.request(80);
        assert_eq!(source.serve_queued(), None);
        assert!(source.is_waiting());
    }

    #[test]
    fn clear_queue_drops_pending() {
        let mut source = CommandSource::new();
        source.enqueue(["n", "n"]);
        source.clear_queue();
        assert!(!source.has_queued());
        assert_eq!(source.queued_len(), 0);
    }
}
