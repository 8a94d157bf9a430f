//! # Record Parsers
//!
//! Turns single lines of the machine's output into records.  There are two kinds:
//! * `FileInfo` from a line of `*INFO *.*`, e.g. `$.PROG     FF1900 FF8023 000123 00A`
//! * `DumpFragment` from a line of `*DUMP`, e.g. `000010 41 42 43 0D 00 00 00 00 ABC.....`
//!
//! Dump lines are positional.  The offset is 6 hex digits in columns 0..6, then 8 byte slots
//! of 2 hex digits each, starting at column 7 with a stride of 3.  On the last line of a file
//! unused slots are blank.  Whatever follows column 30 is the ASCII rendering of the bytes,
//! which is only looked at if `ParseOptions::check_ascii` is set.

use log::{trace,error};

/// Maximum number of bytes on one dump line
pub const BYTES_PER_LINE: usize = 8;
const OFFSET_DIGITS: usize = 6;
const FIRST_SLOT: usize = 7;
const SLOT_STRIDE: usize = 3;
const ASCII_COLUMN: usize = FIRST_SLOT + SLOT_STRIDE * BYTES_PER_LINE - 1;
const BLANK_SLOT: &str = "  ";

/// Enumerates parsing errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("dump line is too short: `{0}`")]
    LineTooShort(String),
    #[error("bad offset field in dump line `{0}`")]
    BadOffset(String),
    #[error("bad byte `{text}` in slot {slot} of dump line `{line}`")]
    BadByte { slot: usize, text: String, line: String },
    #[error("byte follows blank slot {slot} in dump line `{line}`")]
    Gap { slot: usize, line: String },
    #[error("ascii column disagrees with bytes in dump line `{0}`")]
    AsciiMismatch(String),
    #[error("too few fields in info line `{0}`")]
    MissingFields(String),
    #[error("bad size field in info line `{0}`")]
    BadSize(String)
}

#[derive(Clone,Copy,Debug,Default)]
pub struct ParseOptions {
    /// compare the ASCII column of each dump line with the parsed bytes
    pub check_ascii: bool
}

/// Up to 8 bytes of a file, as printed on one line of `*DUMP`
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct DumpFragment {
    offset: usize,
    data: Vec<u8>
}

/// Name and length of one file, as printed on one line of `*INFO`
#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct FileInfo {
    name: String,
    size: usize
}

fn is_hex(s: &str) -> bool {
    s.len() > 0 && s.chars().all(|c| c.is_ascii_hexdigit())
}

impl DumpFragment {
    pub fn new(offset: usize,data: Vec<u8>) -> Self {
        Self { offset, data }
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn from_dump_line(line: &str,options: &ParseOptions) -> Result<Self,Error> {
        let offset_field = match line.get(0..OFFSET_DIGITS) {
            Some(s) => s,
            None => return Err(Error::LineTooShort(line.to_string()))
        };
        if !is_hex(offset_field) {
            error!("offset field `{}` is not hex",offset_field);
            return Err(Error::BadOffset(line.to_string()));
        }
        let offset = match usize::from_str_radix(offset_field,16) {
            Ok(x) => x,
            Err(_) => return Err(Error::BadOffset(line.to_string()))
        };
        let mut data: Vec<u8> = Vec::new();
        let mut blank: Option<usize> = None;
        for slot in 0..BYTES_PER_LINE {
            let beg = FIRST_SLOT + SLOT_STRIDE * slot;
            let text = match line.get(beg..beg+2) {
                Some(s) => s,
                None => return Err(Error::LineTooShort(line.to_string()))
            };
            if text==BLANK_SLOT {
                blank = blank.or(Some(slot));
                continue;
            }
            if let Some(first_blank) = blank {
                return Err(Error::Gap { slot: first_blank, line: line.to_string() });
            }
            match hex::decode(text) {
                Ok(v) => data.push(v[0]),
                Err(_) => return Err(Error::BadByte { slot, text: text.to_string(), line: line.to_string() })
            }
        }
        if options.check_ascii {
            let column = line.get(ASCII_COLUMN..).unwrap_or("");
            let expected: String = data.iter().map(|b| crate::printable(*b)).collect();
            if !column.ends_with(&expected) && !column.trim_end().ends_with(expected.trim_end()) {
                error!("expected ascii `{}`",expected);
                return Err(Error::AsciiMismatch(line.to_string()));
            }
        }
        trace!("fragment at {:06X} with {} bytes",offset,data.len());
        Ok(Self { offset, data })
    }
}

impl FileInfo {
    pub fn new(name: &str,size: usize) -> Self {
        Self { name: name.to_string(), size }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn size(&self) -> usize {
        self.size
    }
    /// The first field is the name, the next to last is the length in hex.
    /// Everything else (load and exec addresses, lock flag, start sector) is ignored.
    pub fn from_info_line(line: &str) -> Result<Self,Error> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::MissingFields(line.to_string()));
        }
        let size_field = fields[fields.len()-2];
        if !is_hex(size_field) {
            error!("size field `{}` is not hex",size_field);
            return Err(Error::BadSize(line.to_string()));
        }
        match usize::from_str_radix(size_field,16) {
            Ok(size) => Ok(Self { name: fields[0].to_string(), size }),
            Err(_) => Err(Error::BadSize(line.to_string()))
        }
    }
}

/// Parse one line of `*DUMP` output without checking the ASCII column
pub fn parse_dump_line(line: &str) -> Result<DumpFragment,Error> {
    DumpFragment::from_dump_line(line,&ParseOptions::default())
}

/// Parse one line of `*INFO` output
pub fn parse_info_line(line: &str) -> Result<FileInfo,Error> {
    FileInfo::from_info_line(line)
}

#[cfg(test)]
mod records_test;
