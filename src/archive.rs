//! # Disc Archive
//!
//! A dumped disc is saved as a JSON array with one object per file:
//! ```json
//! [{"name":"$.!BOOT","size":3,"data":[42,70,88]}]
//! ```
//! The archive is the hand-off to whatever uses the files next, `unpack` being one such.

use std::io::Write;
use serde::{Serialize,Deserialize};
use log::error;
use crate::assemble::DiskFile;
use crate::records::FileInfo;
use crate::{STDRESULT,DYNERR};

/// Enumerates archive errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("archive is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("{name} holds {found} bytes, archive says {expected}")]
    SizeMismatch { name: String, expected: usize, found: usize }
}

#[derive(Serialize,Deserialize)]
struct Entry {
    name: String,
    size: usize,
    data: Vec<u8>
}

/// Put files into the JSON string representation, if indent is None use unpretty form
pub fn to_json(files: &[DiskFile],indent: Option<u16>) -> Result<String,Error> {
    let entries: Vec<Entry> = files.iter().map(|f| Entry {
        name: f.name().to_string(),
        size: f.size(),
        data: f.data().to_vec()
    }).collect();
    let mut buf: Vec<u8> = Vec::new();
    match indent {
        Some(spaces) => {
            let tab = vec![b' ';spaces as usize];
            let fmt = serde_json::ser::PrettyFormatter::with_indent(&tab);
            let mut ser = serde_json::Serializer::with_formatter(&mut buf,fmt);
            entries.serialize(&mut ser)?
        },
        None => {
            let mut ser = serde_json::Serializer::new(&mut buf);
            entries.serialize(&mut ser)?
        }
    };
    Ok(String::from_utf8_lossy(&buf).to_string())
}

/// Get files from the JSON string representation, every size is checked against its data
pub fn from_json(json_str: &str) -> Result<Vec<DiskFile>,Error> {
    let entries: Vec<Entry> = serde_json::from_str(json_str)?;
    let mut ans: Vec<DiskFile> = Vec::new();
    for e in entries {
        let found = e.data.len();
        match DiskFile::from_parts(FileInfo::new(&e.name,e.size),e.data) {
            Ok(f) => ans.push(f),
            Err(_) => {
                error!("size mismatch in archive entry {}",e.name);
                return Err(Error::SizeMismatch { name: e.name, expected: e.size, found });
            }
        }
    }
    Ok(ans)
}

/// Write the archive to `path`, replacing any existing file
pub fn save(path: &str,files: &[DiskFile],indent: Option<u16>) -> STDRESULT {
    let mut f = std::fs::File::create(path)?;
    f.write_all(to_json(files,indent)?.as_bytes())?;
    Ok(())
}

pub fn load(path: &str) -> Result<Vec<DiskFile>,DYNERR> {
    let s = std::fs::read_to_string(path)?;
    Ok(from_json(&s)?)
}

/// Turn a disc file name into something safe to use as a host file name.
/// The DFS directory prefix is kept (`$.!BOOT` stays as it is), but path
/// separators and other troublesome characters become `_`.
pub fn host_name(name: &str) -> String {
    let ans: String = name.chars().map(|c| match c {
        '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
        c if c.is_control() => '_',
        c => c
    }).collect();
    match ans.as_str() {
        "" | "." | ".." => format!("_{}",ans),
        _ => ans
    }
}

#[cfg(test)]
fn sample() -> Vec<DiskFile> {
    vec![
        DiskFile::from_parts(FileInfo::new("$.!BOOT",3),vec![42,70,88]).unwrap(),
        DiskFile::from_parts(FileInfo::new("$.EMPTY",0),vec![]).unwrap()
    ]
}

#[test]
fn minified() {
    let expected = r#"[{"name":"$.!BOOT","size":3,"data":[42,70,88]},{"name":"$.EMPTY","size":0,"data":[]}]"#;
    assert_eq!(to_json(&sample(),None).expect("archive error"),expected);
}

#[test]
fn indented() {
    let s = to_json(&sample()[0..1],Some(2)).expect("archive error");
    assert!(s.starts_with("[\n  {\n    \"name\": \"$.!BOOT\""));
    assert_eq!(from_json(&s).expect("archive error"),sample()[0..1].to_vec());
}

#[test]
fn size_disagrees() {
    let bad = r#"[{"name":"X","size":4,"data":[1,2,3]}]"#;
    assert!(matches!(from_json(bad),Err(Error::SizeMismatch { expected: 4, found: 3, .. })));
}

#[test]
fn not_bytes() {
    assert!(matches!(from_json(r#"[{"name":"X","size":1,"data":[256]}]"#),Err(Error::Syntax(_))));
    assert!(matches!(from_json("{}"),Err(Error::Syntax(_))));
}

#[test]
fn host_names() {
    assert_eq!(host_name("$.!BOOT"),"$.!BOOT");
    assert_eq!(host_name("A.B/C"),"A.B_C");
    assert_eq!(host_name(".."),"_..");
}
