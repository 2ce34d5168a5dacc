use std::collections::VecDeque;
use std::future::ready;

/// A source of user input, like a console.
pub trait InputSource: Send {
    /// Reads the next line of user input.
    ///
    /// Returns `None` when the input has been exhausted, which ends the
    /// conversation normally.
    fn read_line(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Replays queued lines, handy for scripted sessions.
impl InputSource for VecDeque<String> {
    #[inline]
    fn read_line(&mut self) -> impl Future<Output = Option<String>> + Send {
        ready(self.pop_front())
    }
}
