//! Subcommands that talk to the machine.
//! Each one opens the port, runs, and closes the port when the controller goes out of scope.

use std::collections::HashSet;
use std::io::Write;
use log::{info,error};
use serialport::SerialPort;
use super::CommandError;
use crate::controller::{Controller,Event,Progress};
use crate::link::{self,Session};
use crate::{STDRESULT,DYNERR};

/// Reports progress on stderr so that stdout stays clean for the pipeline
pub struct Console;

impl Progress for Console {
    fn report(&mut self,event: Event<'_>) {
        match event {
            Event::Listed(i) => eprintln!("{}  {}",i.name(),i.size()),
            Event::Skipped(i) => eprintln!("skipped {}",i.name()),
            Event::Dumped(f) => eprintln!("dumped {}",f.name())
        }
    }
}

fn open_controller(cmd: &clap::ArgMatches) -> Result<Controller<Box<dyn SerialPort>>,DYNERR> {
    let config = super::line_config(cmd)?;
    let port = link::serial::open(&config)?;
    Ok(Controller::with_options(Session::new(port),super::parse_options(cmd)))
}

fn drive(cmd: &clap::ArgMatches) -> u8 {
    cmd.get_one::<u8>("drive").copied().unwrap_or(0)
}

pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let mut bbc = open_controller(cmd)?;
    bbc.select_drive(drive(cmd))?;
    for i in bbc.disc_listing()? {
        println!("{:10} {:>6}",i.name(),i.size());
    }
    return Ok(());
}

pub fn get(cmd: &clap::ArgMatches) -> STDRESULT {
    let name = cmd.get_one::<String>("file").ok_or(CommandError::InvalidCommand)?;
    let mut bbc = open_controller(cmd)?;
    bbc.select_drive(drive(cmd))?;
    // the listing is the only source for the length
    let info = match bbc.disc_listing()?.into_iter().find(|i| i.name()==name) {
        Some(i) => i,
        None => {
            error!("{} is not in the listing",name);
            return Err(Box::new(CommandError::FileNotFound));
        }
    };
    let file = bbc.file_dump(&info)?;
    if atty::is(atty::Stream::Stdout) {
        crate::display_block(0,file.data());
    } else {
        std::io::stdout().write_all(file.data())?;
    }
    return Ok(());
}

pub fn dump(cmd: &clap::ArgMatches) -> STDRESULT {
    let archive_path = cmd.get_one::<String>("output").ok_or(CommandError::InvalidCommand)?;
    let skip: HashSet<String> = match cmd.get_many::<String>("skip") {
        Some(names) => names.cloned().collect(),
        None => HashSet::new()
    };
    let files = {
        let mut bbc = open_controller(cmd)?;
        bbc.dump_whole_disc(drive(cmd),&skip,&mut Console)?
    };
    info!("saving {} files to {}",files.len(),archive_path);
    crate::archive::save(archive_path,&files,cmd.get_one::<u16>("indent").copied())?;
    return Ok(());
}
