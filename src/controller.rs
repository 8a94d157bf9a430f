//! # Disc Controller
//!
//! Runs a whole disc through the machine, strictly one command at a time:
//! 1. `*DRIVE n` selects the drive, only the prompt is checked
//! 2. `*INFO *.*` lists the files
//! 3. `*DUMP NAME` for each listed file that is not skipped
//!
//! Any failure ends the run.  There is no retry because the machine has no way to resend,
//! and a partial disc is never returned.  The error says which stage, and which file if any.

use std::collections::HashSet;
use std::fmt;
use std::io::{Read,Write};
use log::{info,warn};
use crate::link::{self,Session};
use crate::records::{self,DumpFragment,FileInfo,ParseOptions};
use crate::assemble::{self,DiskFile};

pub const INFO_COMMAND: &str = "*INFO *.*";

pub fn drive_command(drive: u8) -> String {
    format!("*DRIVE {}",drive)
}

pub fn dump_command(name: &str) -> String {
    format!("*DUMP {}",name)
}

/// Where in the run a failure happened
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum Stage {
    DriveSelect,
    Listing,
    Dumping
}

impl fmt::Display for Stage {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DriveSelect => write!(f,"drive select"),
            Self::Listing => write!(f,"listing"),
            Self::Dumping => write!(f,"dump")
        }
    }
}

/// The underlying cause of a failed run
#[derive(thiserror::Error,Debug)]
pub enum Failure {
    #[error(transparent)]
    Link(#[from] link::Error),
    #[error(transparent)]
    Parse(#[from] records::Error),
    #[error(transparent)]
    Reassembly(#[from] assemble::Error)
}

fn on_file(file: &Option<String>) -> String {
    match file {
        Some(name) => format!(" of {}",name),
        None => String::new()
    }
}

#[derive(thiserror::Error,Debug)]
#[error("{stage}{} failed: {failure}",on_file(.file))]
pub struct DumpError {
    pub stage: Stage,
    pub file: Option<String>,
    #[source]
    pub failure: Failure
}

impl DumpError {
    fn new(stage: Stage,file: Option<&str>,failure: impl Into<Failure>) -> Self {
        Self { stage, file: file.map(|s| s.to_string()), failure: failure.into() }
    }
}

/// Things the controller reports as the run goes along
pub enum Event<'a> {
    Listed(&'a FileInfo),
    Skipped(&'a FileInfo),
    Dumped(&'a DiskFile)
}

pub trait Progress {
    fn report(&mut self,event: Event<'_>);
}

impl<F: FnMut(Event<'_>)> Progress for F {
    fn report(&mut self,event: Event<'_>) {
        self(event)
    }
}

/// Progress reporter that reports nothing
pub struct Quiet;

impl Progress for Quiet {
    fn report(&mut self,_event: Event<'_>) {}
}

pub struct Controller<T: Read + Write> {
    session: Session<T>,
    options: ParseOptions
}

impl<T: Read + Write> Controller<T> {
    pub fn new(session: Session<T>) -> Self {
        Self { session, options: ParseOptions::default() }
    }
    pub fn with_options(session: Session<T>,options: ParseOptions) -> Self {
        Self { session, options }
    }
    pub fn session(&self) -> &Session<T> {
        &self.session
    }
    pub fn into_session(self) -> Session<T> {
        self.session
    }
    /// Select the drive, the reply is not interpreted beyond the prompt
    pub fn select_drive(&mut self,drive: u8) -> Result<(),DumpError> {
        info!("selecting drive {}",drive);
        match self.session.send_and_receive(&drive_command(drive)) {
            Ok(_) => Ok(()),
            Err(e) => Err(DumpError::new(Stage::DriveSelect,None,e))
        }
    }
    /// List every file on the selected drive, in the order the machine lists them
    pub fn disc_listing(&mut self) -> Result<Vec<FileInfo>,DumpError> {
        let lines = self.session.command(INFO_COMMAND)
            .map_err(|e| DumpError::new(Stage::Listing,None,e))?;
        let mut ans: Vec<FileInfo> = Vec::new();
        for line in lines {
            ans.push(FileInfo::from_info_line(&line).map_err(|e| DumpError::new(Stage::Listing,None,e))?);
        }
        info!("listing has {} files",ans.len());
        Ok(ans)
    }
    /// Dump one file and check it against its catalog entry
    pub fn file_dump(&mut self,info: &FileInfo) -> Result<DiskFile,DumpError> {
        let name = Some(info.name());
        let lines = self.session.command(&dump_command(info.name()))
            .map_err(|e| DumpError::new(Stage::Dumping,name,e))?;
        let mut fragments: Vec<DumpFragment> = Vec::new();
        for line in lines {
            fragments.push(DumpFragment::from_dump_line(&line,&self.options)
                .map_err(|e| DumpError::new(Stage::Dumping,name,e))?);
        }
        DiskFile::from_info_and_fragments(info.clone(),&fragments)
            .map_err(|e| DumpError::new(Stage::Dumping,name,e))
    }
    /// Dump every file on `drive` whose name is not in `skip`.
    /// The result is in listing order with skipped files left out.
    pub fn dump_whole_disc(&mut self,drive: u8,skip: &HashSet<String>,progress: &mut dyn Progress) -> Result<Vec<DiskFile>,DumpError> {
        self.select_drive(drive)?;
        let infos = self.disc_listing()?;
        for i in &infos {
            progress.report(Event::Listed(i));
        }
        for name in skip {
            if !infos.iter().any(|i| i.name()==name) {
                warn!("{} is in the skip list but not on the disc",name);
            }
        }
        let mut ans: Vec<DiskFile> = Vec::new();
        for i in &infos {
            if skip.contains(i.name()) {
                info!("skipping {}",i.name());
                progress.report(Event::Skipped(i));
                continue;
            }
            let file = self.file_dump(i)?;
            progress.report(Event::Dumped(&file));
            ans.push(file);
        }
        Ok(ans)
    }
}
