//! # Reassembly
//!
//! Stitches the fragments of one `*DUMP` into the file's bytes.  The line has no checksum,
//! so the only protection against a dropped or garbled line is structural:
//! * fragment `i` must start at byte `8*i`, in the order received
//! * every fragment but the last must be a full line of 8 bytes, the last has 1 to 8
//! * the total must equal the length that `*INFO` reported
//!
//! Fragments are never sorted or patched, the order the machine printed them is the only
//! ordering that can be trusted.

use log::{debug,error};
use crate::records::{DumpFragment,FileInfo,BYTES_PER_LINE};

/// Enumerates reassembly errors.  The `Display` trait will print equivalent long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("fragment {index} starts at {found:#X}, expected {expected:#X}")]
    OffsetLadder { index: usize, expected: usize, found: usize },
    #[error("fragment {index} holds {len} bytes, only the last line may be short")]
    ShortLine { index: usize, len: usize },
    #[error("file holds {found} bytes, catalog says {expected}")]
    SizeMismatch { expected: usize, found: usize }
}

/// A file retrieved in full and checked against its catalog entry
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct DiskFile {
    info: FileInfo,
    data: Vec<u8>
}

impl DiskFile {
    /// Combine the catalog entry with every fragment of the dump, in the order received
    pub fn from_info_and_fragments(info: FileInfo,fragments: &[DumpFragment]) -> Result<Self,Error> {
        let mut data: Vec<u8> = Vec::with_capacity(info.size());
        for (index,frag) in fragments.iter().enumerate() {
            let expected = index * BYTES_PER_LINE;
            if frag.offset()!=expected {
                error!("{}: offset ladder broken at fragment {}",info.name(),index);
                return Err(Error::OffsetLadder { index, expected, found: frag.offset() });
            }
            let last = index+1 == fragments.len();
            if (!last && frag.len()!=BYTES_PER_LINE) || frag.is_empty() {
                error!("{}: short line at fragment {}",info.name(),index);
                return Err(Error::ShortLine { index, len: frag.len() });
            }
            data.extend_from_slice(frag.data());
        }
        if data.len()!=info.size() {
            error!("{}: expected {} bytes, got {}",info.name(),info.size(),data.len());
            return Err(Error::SizeMismatch { expected: info.size(), found: data.len() });
        }
        debug!("assembled {} from {} fragments",info.name(),fragments.len());
        Ok(Self { info, data })
    }
    /// Used when restoring from an archive, where there are no fragments to check
    pub(crate) fn from_parts(info: FileInfo,data: Vec<u8>) -> Result<Self,Error> {
        if data.len()!=info.size() {
            return Err(Error::SizeMismatch { expected: info.size(), found: data.len() });
        }
        Ok(Self { info, data })
    }
    pub fn info(&self) -> &FileInfo {
        &self.info
    }
    pub fn name(&self) -> &str {
        self.info.name()
    }
    pub fn size(&self) -> usize {
        self.info.size()
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Same as `DiskFile::from_info_and_fragments`
pub fn assemble(info: FileInfo,fragments: &[DumpFragment]) -> Result<DiskFile,Error> {
    DiskFile::from_info_and_fragments(info,fragments)
}

#[cfg(test)]
fn ladder(offsets: &[usize],lens: &[usize]) -> Vec<DumpFragment> {
    let mut ans = Vec::new();
    let mut val: u8 = 0;
    for (off,len) in offsets.iter().zip(lens) {
        let mut dat = Vec::new();
        for _i in 0..*len {
            dat.push(val);
            val = val.wrapping_add(1);
        }
        ans.push(DumpFragment::new(*off,dat));
    }
    ans
}

#[test]
fn three_full_lines() {
    let frags = ladder(&[0,8,16],&[8,8,8]);
    let file = assemble(FileInfo::new("F",24),&frags).expect("reassembly error");
    assert_eq!(file.data(),(0..24).collect::<Vec<u8>>().as_slice());
    assert_eq!(file.name(),"F");
    assert_eq!(file.size(),24);
    // same input, same output
    assert_eq!(assemble(FileInfo::new("F",24),&frags).expect("reassembly error"),file);
}

#[test]
fn short_last_line() {
    let frags = ladder(&[0,8],&[8,3]);
    let file = assemble(FileInfo::new("F",11),&frags).expect("reassembly error");
    assert_eq!(file.data().len(),11);
}

#[test]
fn empty_file() {
    let file = assemble(FileInfo::new("EMPTY",0),&[]).expect("reassembly error");
    assert!(file.data().is_empty());
}

#[test]
fn out_of_order() {
    let frags = ladder(&[0,16,8],&[8,8,8]);
    assert!(matches!(assemble(FileInfo::new("F",24),&frags),
        Err(Error::OffsetLadder { index: 1, expected: 8, found: 16 })));
}

#[test]
fn duplicate_line() {
    let frags = ladder(&[0,8,8],&[8,8,8]);
    assert!(matches!(assemble(FileInfo::new("F",24),&frags),Err(Error::OffsetLadder { index: 2, .. })));
}

#[test]
fn missing_last_line() {
    let frags = ladder(&[0,8],&[8,8]);
    assert!(matches!(assemble(FileInfo::new("F",24),&frags),
        Err(Error::SizeMismatch { expected: 24, found: 16 })));
}

#[test]
fn total_falls_short() {
    let frags = ladder(&[0,8,16],&[8,8,4]);
    assert!(matches!(assemble(FileInfo::new("F",24),&frags),
        Err(Error::SizeMismatch { expected: 24, found: 20 })));
}

#[test]
fn short_line_in_the_middle() {
    let frags = ladder(&[0,8,16],&[8,4,8]);
    assert!(matches!(assemble(FileInfo::new("F",20),&frags),Err(Error::ShortLine { index: 1, len: 4 })));
}

#[test]
fn blank_last_line() {
    let frags = ladder(&[0,8],&[8,0]);
    assert!(matches!(assemble(FileInfo::new("F",8),&frags),Err(Error::ShortLine { index: 1, len: 0 })));
}
