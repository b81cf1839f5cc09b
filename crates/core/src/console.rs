//! Console abstraction for user interaction
//!
//! All user-facing output and prompting goes through the [`Console`] trait
//! instead of a module-global console. Components receive a console as an
//! explicit dependency, which lets tests substitute a scripted
//! implementation and assert on what was printed.

use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Output sink and prompt source for interactive components
///
/// Implementations decide how lines are displayed and where replies come
/// from. The terminal implementation lives in the CLI crate; tests use
/// [`ScriptedConsole`].
pub trait Console {
    /// Print a line of output
    fn print(&self, message: &str);

    /// Prompt for a single value
    ///
    /// An empty reply resolves to `default` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user interrupts the prompt.
    fn prompt(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user interrupts the prompt.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Present a numbered list of choices and return the selected index
    ///
    /// Choices are numbered from 1 in the order given; the returned index
    /// is zero-based. Input outside the valid range is re-prompted, never
    /// silently defaulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the user interrupts the prompt.
    fn choose(&self, prompt: &str, labels: &[String]) -> Result<usize>;
}

/// Scripted console for deterministic tests
///
/// Replies are consumed front-to-back; every printed line is recorded and
/// can be inspected after the fact.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: RefCell<VecDeque<String>>,
    printed: RefCell<Vec<String>>,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `replies`, in order
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(Into::into).collect()),
            printed: RefCell::new(Vec::new()),
        }
    }

    /// All lines printed so far
    pub fn printed_lines(&self) -> Vec<String> {
        self.printed.borrow().clone()
    }

    fn next_reply(&self) -> Result<String> {
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or(Error::Cancelled)
    }
}

impl Console for ScriptedConsole {
    fn print(&self, message: &str) {
        self.printed.borrow_mut().push(message.to_string());
    }

    fn prompt(&self, _prompt: &str, default: Option<&str>) -> Result<String> {
        let reply = self.next_reply()?;
        if reply.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
        Ok(reply)
    }

    fn confirm(&self, _prompt: &str) -> Result<bool> {
        let reply = self.next_reply()?;
        Ok(matches!(reply.as_str(), "y" | "yes" | "true"))
    }

    fn choose(&self, _prompt: &str, labels: &[String]) -> Result<usize> {
        // Invalid replies are skipped, mirroring terminal re-prompting.
        loop {
            let reply = self.next_reply()?;
            if let Ok(number) = reply.trim().parse::<usize>() {
                if (1..=labels.len()).contains(&number) {
                    return Ok(number - 1);
                }
            }
        }
    }
}
