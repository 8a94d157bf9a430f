use std::path::Path;
use log::{info,error};
use super::CommandError;
use crate::STDRESULT;

/// Write every file in the archive to `<output>/<name>`
pub fn unpack(cmd: &clap::ArgMatches) -> STDRESULT {
    let archive_path = cmd.get_one::<String>("archive").ok_or(CommandError::InvalidCommand)?;
    let out_dir = cmd.get_one::<String>("output").ok_or(CommandError::InvalidCommand)?;
    let files = crate::archive::load(archive_path)?;
    let dir = Path::new(out_dir);
    if dir.is_file() {
        error!("{} is a file, expected a directory",out_dir);
        return Err(Box::new(CommandError::InvalidCommand));
    }
    std::fs::create_dir_all(dir)?;
    for f in &files {
        let host = dir.join(crate::archive::host_name(f.name()));
        info!("writing {} to {}",f.name(),host.display());
        std::fs::write(&host,f.data())?;
    }
    eprintln!("unpacked {} files",files.len());
    return Ok(());
}
