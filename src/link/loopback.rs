//! Testing aid, an in-memory stand-in for the machine.
//!
//! Replies are queued in advance.  Each time a carriage return is written, the line typed so
//! far is recorded and the next queued reply becomes readable.  Once a reply is drained the
//! loopback reads as idle, just like a serial port after its timeout.

use std::collections::VecDeque;
use std::io::{Read,Write,ErrorKind};

#[derive(Default)]
pub struct Loopback {
    replies: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    line: Vec<u8>,
    sent: Vec<String>,
    closed: bool
}

impl Loopback {
    pub fn new() -> Self {
        Self::default()
    }
    /// Queue a raw reply, which should include the echo and prompt if the test wants them
    pub fn reply(mut self,raw: &str) -> Self {
        self.replies.push_back(raw.as_bytes().to_vec());
        self
    }
    /// Queue a well formed reply: the echo of `command`, the `body` lines, and the prompt,
    /// separated by LF CR as the machine does it.
    pub fn answer(self,command: &str,body: &[&str]) -> Self {
        let mut raw = command.to_string();
        for line in body {
            raw += "\n\r";
            raw += line;
        }
        raw += "\n\r>";
        self.reply(&raw)
    }
    /// Lines that have been typed so far, without the carriage return
    pub fn sent(&self) -> &[String] {
        &self.sent
    }
    /// Simulate the port going away, further reads and writes fail
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl Read for Loopback {
    fn read(&mut self,buf: &mut [u8]) -> std::io::Result<usize> {
        if self.closed {
            return Err(std::io::Error::new(ErrorKind::BrokenPipe,"loopback closed"));
        }
        let mut n = 0;
        while n < buf.len() {
            match self.pending.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                },
                None => break
            }
        }
        Ok(n)
    }
}

impl Write for Loopback {
    fn write(&mut self,buf: &[u8]) -> std::io::Result<usize> {
        if self.closed {
            return Err(std::io::Error::new(ErrorKind::BrokenPipe,"loopback closed"));
        }
        for b in buf {
            if *b==super::TERMINATOR {
                self.sent.push(String::from_utf8_lossy(&self.line).to_string());
                self.line = Vec::new();
                if let Some(reply) = self.replies.pop_front() {
                    self.pending.extend(reply);
                }
            } else {
                self.line.push(*b);
            }
        }
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
