//! # `bbcdump` main library
//!
//! This library retrieves files from a BBC Micro disc by talking to the machine over a
//! serial line.  The machine is driven the same way a person at the keyboard would drive it:
//! star commands are typed, and the text the machine prints back is captured and decoded.
//! Nothing on the disc is interpreted directly, the machine's own `*INFO` and `*DUMP`
//! commands do that work.
//!
//! ## Architecture
//!
//! Working up from the wire:
//! * `link::Session` sends one command line and captures the reply up to the `>` prompt
//! * `records` turns single lines of a reply into `FileInfo` or `DumpFragment` records
//! * `assemble` stitches the fragments of one file into a verified `DiskFile`
//! * `controller::Controller` runs a whole disc: drive select, listing, and one dump per file
//! * `archive` writes the resulting files to a JSON document and reads them back
//!
//! The serial line has no checksum and the machine cannot resend, so every layer is strict.
//! Any failure aborts the run, there is no attempt to patch up a partial disc.
//!
//! ## Serial Line
//!
//! The defaults in `link::serial::SerialConfig` match a BBC Micro with its RS423 port set up
//! for 9600 baud, 7 data bits, even parity, one stop bit.  The machine's output has to be
//! redirected to the serial port (e.g. `*FX3,5` and `*FX2,1`) before any of this will work.

pub mod link;
pub mod records;
pub mod assemble;
pub mod controller;
pub mod archive;
pub mod commands;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Render a byte as the machine's `*DUMP` command would in its ASCII column
pub fn printable(byte: u8) -> char {
    match byte {
        x if x>=32 && x<127 => x as char,
        _ => '.'
    }
}

/// Display binary to stdout in columns of hex and ascii
pub fn display_block(start_addr: usize,block: &[u8]) {
    let mut slice_start = 0;
    loop {
        let row_label = start_addr + slice_start;
        let mut slice_end = slice_start + 16;
        if slice_end > block.len() {
            slice_end = block.len();
        }
        let slice = &block[slice_start..slice_end];
        let txt: String = slice.iter().map(|c| printable(*c)).collect();
        print!("{:06X} : ",row_label);
        for byte in slice {
            print!("{:02X} ",byte);
        }
        for _blank in slice_end..slice_start+16 {
            print!("   ");
        }
        println!("| {}",txt);
        slice_start += 16;
        if slice_end==block.len() {
            break;
        }
    }
}
