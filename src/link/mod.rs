//! # Serial Link Module
//!
//! Handles the conversation with the machine one command at a time.  A command is written
//! followed by a carriage return, then everything the machine prints is collected until the
//! line goes idle.  The machine prints `>` when it is ready for the next command, so a reply
//! that does not end in `>` was cut short.
//!
//! The transport is anything that implements `Read` and `Write`.  For real hardware see `serial`,
//! for tests see `loopback`.

pub mod serial;
pub mod loopback;

use std::io::{Read,Write,ErrorKind};
use log::{debug,error};

/// The prompt the machine prints when it is ready for another command
pub const PROMPT: u8 = b'>';
/// What the machine expects at the end of a typed line
pub const TERMINATOR: u8 = b'\r';

const READ_CHUNK: usize = 64;

/// Enumerates link errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("serial transport failed: {0}")]
    Transport(#[from] std::io::Error),
    #[error("line went idle after `{command}` without a prompt ({received} bytes received)")]
    Timeout { command: String, received: usize },
    #[error("reply to `{command}` is out of frame, expected `{expected}`, found `{found}`")]
    Framing { command: String, expected: String, found: String },
    #[error("reply to `{command}` is not valid text")]
    Encoding { command: String }
}

/// Split a reply into lines.  The machine separates lines with LF CR, but CR LF is
/// tolerated as well, since stray carriage returns are stripped from both ends of every line.
pub fn split_reply(reply: &str) -> Vec<&str> {
    reply.split('\n').map(|line| line.trim_matches('\r')).collect()
}

/// Check that `reply` starts with the echo of `command` and ends with a bare prompt line,
/// and return the lines in between.
pub fn reply_body<'a>(command: &str,reply: &'a str) -> Result<Vec<&'a str>,Error> {
    let lines = split_reply(reply);
    let prompt = (PROMPT as char).to_string();
    if lines[0]!=command {
        error!("echo mismatch for `{}`",command);
        return Err(Error::Framing {
            command: command.to_string(),
            expected: command.to_string(),
            found: lines[0].to_string()
        });
    }
    // one line holding the echo cannot also be the prompt
    let last = lines[lines.len()-1];
    if lines.len() < 2 || last!=prompt {
        error!("prompt line missing after `{}`",command);
        return Err(Error::Framing {
            command: command.to_string(),
            expected: prompt,
            found: last.to_string()
        });
    }
    Ok(lines[1..lines.len()-1].to_vec())
}

/// Exclusive owner of the transport for the duration of a run.
/// Dropping the session drops the transport, which for a serial port closes it.
pub struct Session<T: Read + Write> {
    port: T
}

impl<T: Read + Write> Session<T> {
    pub fn new(port: T) -> Self {
        Self { port }
    }
    pub fn get_ref(&self) -> &T {
        &self.port
    }
    pub fn into_inner(self) -> T {
        self.port
    }
    /// Collect bytes until the transport reports that the line is idle.
    /// Idle shows up either as a zero length read, or as a timeout error from a serial port.
    fn read_until_idle(&mut self) -> Result<Vec<u8>,Error> {
        let mut reply: Vec<u8> = Vec::new();
        let mut buf = [0u8;READ_CHUNK];
        loop {
            match self.port.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => reply.extend_from_slice(&buf[0..n]),
                Err(e) if e.kind()==ErrorKind::TimedOut || e.kind()==ErrorKind::WouldBlock => break,
                Err(e) if e.kind()==ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Transport(e))
            }
        }
        Ok(reply)
    }
    /// Type `command` at the machine and return everything it printed in response,
    /// including the echo and the trailing prompt.  The last character is always `>`.
    pub fn send_and_receive(&mut self,command: &str) -> Result<String,Error> {
        debug!("sending `{}`",command);
        let mut line = command.as_bytes().to_vec();
        line.push(TERMINATOR);
        self.port.write_all(&line)?;
        self.port.flush()?;
        let reply = self.read_until_idle()?;
        debug!("received {} bytes",reply.len());
        if reply.last()!=Some(&PROMPT) {
            error!("no prompt at end of reply to `{}`",command);
            return Err(Error::Timeout { command: command.to_string(), received: reply.len() });
        }
        match String::from_utf8(reply) {
            Ok(s) => Ok(s),
            Err(_) => Err(Error::Encoding { command: command.to_string() })
        }
    }
    /// Send `command`, verify the framing of the reply, and return the body lines
    pub fn command(&mut self,command: &str) -> Result<Vec<String>,Error> {
        let reply = self.send_and_receive(command)?;
        let body = reply_body(command,&reply)?;
        Ok(body.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod link_test;
