use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

use memmap2::MmapOptions;

/// Holds file data — either zero-copy mmap or an owned Vec.
/// Dereferences to `&[u8]` for transparent use.
pub enum FileData {
    Mmap(memmap2::Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Threshold below which we use read() instead of mmap. Record files are
/// usually tiny; mmap setup/teardown only pays off past this size.
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read a file with zero-copy mmap for large files or read() for small ones.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let mut file = File::open(path)?;
    let metadata = file.metadata()?;
    let len = metadata.len();

    if len >= MMAP_THRESHOLD && metadata.file_type().is_file() {
        // SAFETY: read-only mapping of a regular file.
        if let Ok(mmap) = unsafe { MmapOptions::new().map(&file) } {
            return Ok(FileData::Mmap(mmap));
        }
        // mmap failed — fall through to read
    }

    let mut buf = Vec::with_capacity(len as usize);
    file.read_to_end(&mut buf)?;
    Ok(FileData::Owned(buf))
}

/// Compute (start, end) byte offsets of each line in `data`, using
/// SIMD-accelerated memchr for newline detection. Strips CR before LF and
/// handles a final line without a trailing newline.
pub fn split_lines(data: &[u8]) -> Vec<(usize, usize)> {
    let mut offsets = Vec::with_capacity(data.len() / 40 + 1);
    let mut start = 0usize;

    for pos in memchr::memchr_iter(b'\n', data) {
        let mut end = pos;
        if end > start && data[end - 1] == b'\r' {
            end -= 1;
        }
        offsets.push((start, end));
        start = pos + 1;
    }

    if start < data.len() {
        let mut end = data.len();
        if end > start && data[end - 1] == b'\r' {
            end -= 1;
        }
        offsets.push((start, end));
    }

    offsets
}
