//! Keyboard input polling.
//!
//! The countdown asks for at most one key per tick. Only `s` (skip) and
//! `q` (quit) mean anything; every other byte is consumed and dropped so a
//! stray keystroke cannot fire on a later tick.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, Stdin};
use tokio::time::{sleep, sleep_until, timeout_at, Instant};
use tracing::{debug, trace};

/// Length of one countdown tick.
pub const TICK: Duration = Duration::from_secs(1);

/// A recognised control key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `s`: end the current phase early
    Skip,
    /// `q`: end the whole run
    Quit,
}

impl Key {
    /// Maps an input byte to a control key.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b's' => Some(Key::Skip),
            b'q' => Some(Key::Quit),
            _ => None,
        }
    }

    /// Returns the character that triggers this key.
    #[must_use]
    pub fn as_char(&self) -> char {
        match self {
            Key::Skip => 's',
            Key::Quit => 'q',
        }
    }
}

/// Source of control keys for the countdown.
#[allow(async_fn_in_trait)]
pub trait KeySource {
    /// Waits at most `timeout` for a control key.
    ///
    /// Returns `None` when the budget elapsed without a recognised key.
    /// Read failures are reported as `None` as well.
    async fn poll_key(&mut self, timeout: Duration) -> Option<Key>;
}

/// Reads control keys one byte at a time from an async reader.
#[derive(Debug)]
pub struct KeyReader<R> {
    reader: R,
    closed: bool,
}

/// Key reader over the process's standard input.
pub type StdinKeys = KeyReader<Stdin>;

impl StdinKeys {
    /// Creates a key reader over standard input.
    #[must_use]
    pub fn stdin() -> Self {
        KeyReader::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> KeyReader<R> {
    /// Creates a key reader over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            closed: false,
        }
    }

    /// Returns true once the reader hit end-of-file or an error.
    ///
    /// A closed reader never yields keys; every poll just waits out its
    /// budget.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<R: AsyncRead + Unpin> KeySource for KeyReader<R> {
    async fn poll_key(&mut self, timeout: Duration) -> Option<Key> {
        let deadline = Instant::now() + timeout;
        let mut byte = [0u8; 1];

        while !self.closed {
            match timeout_at(deadline, self.reader.read(&mut byte)).await {
                Err(_) => return None,
                Ok(Ok(0)) => {
                    debug!("Key input closed, countdown continues without keys");
                    self.closed = true;
                }
                Ok(Ok(_)) => match Key::from_byte(byte[0]) {
                    Some(key) => {
                        debug!("Key pressed: {}", key.as_char());
                        return Some(key);
                    }
                    None => trace!("Ignoring input byte {:#04x}", byte[0]),
                },
                Ok(Err(e)) => {
                    debug!("Key input read failed, treating as timeout: {}", e);
                    self.closed = true;
                }
            }
        }

        sleep_until(deadline).await;
        None
    }
}

/// Scripted key source for testing.
///
/// Each poll consumes one script entry: `Some(key)` is returned immediately,
/// `None` (or an exhausted script) waits out the full timeout.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Option<Key>>,
    polls: usize,
}

impl ScriptedKeys {
    /// Creates a source that never presses a key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that replays `script`, one entry per poll.
    #[must_use]
    pub fn with_script(script: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls: 0,
        }
    }

    /// Presses `key` on the given poll (zero-based).
    #[must_use]
    pub fn press_at(mut self, poll: usize, key: Key) -> Self {
        if self.script.len() <= poll {
            self.script.resize(poll + 1, None);
        }
        self.script[poll] = Some(key);
        self
    }

    /// Returns how many times the source was polled.
    #[must_use]
    pub fn poll_count(&self) -> usize {
        self.polls
    }
}

impl KeySource for ScriptedKeys {
    async fn poll_key(&mut self, timeout: Duration) -> Option<Key> {
        self.polls += 1;
        match self.script.pop_front().flatten() {
            Some(key) => Some(key),
            None => {
                sleep(timeout).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod key_tests {
        use super::*;

        #[test]
        fn test_from_byte() {
            assert_eq!(Key::from_byte(b's'), Some(Key::Skip));
            assert_eq!(Key::from_byte(b'q'), Some(Key::Quit));
            assert_eq!(Key::from_byte(b'S'), None);
            assert_eq!(Key::from_byte(b'x'), None);
            assert_eq!(Key::from_byte(b'\n'), None);
        }

        #[test]
        fn test_as_char() {
            assert_eq!(Key::Skip.as_char(), 's');
            assert_eq!(Key::Quit.as_char(), 'q');
        }

        #[test]
        fn test_tick_is_one_second() {
            assert_eq!(TICK, Duration::from_secs(1));
        }
    }

    mod key_reader_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_returns_key_immediately() {
            let mut keys = KeyReader::new(&b"s"[..]);
            let start = Instant::now();
            assert_eq!(keys.poll_key(TICK).await, Some(Key::Skip));
            assert_eq!(start.elapsed(), Duration::ZERO);
        }

        #[tokio::test(start_paused = true)]
        async fn test_discards_unrecognised_bytes() {
            let mut keys = KeyReader::new(&b"xyz\nq"[..]);
            assert_eq!(keys.poll_key(TICK).await, Some(Key::Quit));
        }

        #[tokio::test(start_paused = true)]
        async fn test_noise_does_not_fire_on_next_tick() {
            let mut keys = KeyReader::new(&b"abc"[..]);
            let start = Instant::now();

            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(keys.poll_key(TICK).await, None);
            assert!(keys.is_closed());
            assert_eq!(start.elapsed(), Duration::from_secs(2));
        }

        #[tokio::test(start_paused = true)]
        async fn test_times_out_without_input() {
            let (_writer, reader) = tokio::io::duplex(8);
            let mut keys = KeyReader::new(reader);
            let start = Instant::now();

            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(start.elapsed(), TICK);
            assert!(!keys.is_closed());
        }

        #[tokio::test(start_paused = true)]
        async fn test_key_written_later_is_seen() {
            use tokio::io::AsyncWriteExt;

            let (mut writer, reader) = tokio::io::duplex(8);
            let mut keys = KeyReader::new(reader);

            assert_eq!(keys.poll_key(TICK).await, None);
            writer.write_all(b"s").await.unwrap();
            assert_eq!(keys.poll_key(TICK).await, Some(Key::Skip));
        }

        #[tokio::test(start_paused = true)]
        async fn test_closed_input_waits_full_budget() {
            let mut keys = KeyReader::new(&b""[..]);
            let start = Instant::now();

            assert_eq!(keys.poll_key(Duration::from_millis(500)).await, None);
            assert!(keys.is_closed());
            assert_eq!(start.elapsed(), Duration::from_millis(500));
        }
    }

    mod scripted_keys_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_never_presses_by_default() {
            let mut keys = ScriptedKeys::new();
            let start = Instant::now();
            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(start.elapsed(), TICK);
            assert_eq!(keys.poll_count(), 1);
        }

        #[tokio::test(start_paused = true)]
        async fn test_press_at() {
            let mut keys = ScriptedKeys::new().press_at(2, Key::Skip);
            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(keys.poll_key(TICK).await, Some(Key::Skip));
            assert_eq!(keys.poll_key(TICK).await, None);
            assert_eq!(keys.poll_count(), 4);
        }

        #[tokio::test(start_paused = true)]
        async fn test_with_script() {
            let mut keys = ScriptedKeys::with_script([Some(Key::Quit)]);
            assert_eq!(keys.poll_key(TICK).await, Some(Key::Quit));
        }
    }
}
