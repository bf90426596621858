//! Whole-file read helpers. Every buffer they produce is NUL terminated so
//! it can be handed straight to C code expecting a string.

use core::error::Error;
use core::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

use crate::GrowArr;
use crate::alloc::ArrAllocator;
use crate::alloc::Global;
use crate::errors::ErrorReason;
use crate::errors::GrowArrErr;
use crate::len_type::LengthType;

#[derive(Debug)]
pub enum ReadError {
    /// The file could not be opened, sized or read.
    Io(io::Error),
    /// The buffer for the contents could not be grown.
    Alloc(GrowArrErr),
    /// The destination buffer has no room, not even for the terminator.
    EmptyBuffer,
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::Alloc(e) => Some(e),
            ReadError::EmptyBuffer => None,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "Failed to read file: {e}"),
            ReadError::Alloc(e) => write!(f, "Failed to grow buffer: {e}"),
            ReadError::EmptyBuffer => f.write_str("Buffer has no room for the terminator."),
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(e: io::Error) -> Self {
        return ReadError::Io(e);
    }
}

impl From<GrowArrErr> for ReadError {
    fn from(e: GrowArrErr) -> Self {
        return ReadError::Alloc(e);
    }
}

/// The contents of a file followed by a NUL byte.
pub struct FileBytes {
    data: GrowArr<u8, Global, usize>,
}

impl FileBytes {
    /// The number of bytes read, not counting the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        return self.data.len() - 1;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        return &self.data.as_slice()[..self.len()];
    }

    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        return self.data.as_slice();
    }

    /// The backing array, terminator included.
    pub fn into_array(self) -> GrowArr<u8, Global, usize> {
        return self.data;
    }
}

impl fmt::Debug for FileBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_struct("FileBytes").field("len", &self.len()).finish();
    }
}

fn open(path: &Path) -> io::Result<File> {
    return File::open(path).inspect_err(|e| {
        log::debug!("cannot open {}: {}", path.display(), e);
    });
}

/// The size in bytes of an open file. The read position is left alone.
pub fn file_size(file: &File) -> io::Result<usize> {
    let len = file.metadata()?.len();
    let Ok(len) = usize::try_from(len) else {
        return Err(io::Error::from(io::ErrorKind::FileTooLarge));
    };
    return Ok(len);
}

/// Reads until `buf` is full or the source ends.
fn fill<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut got = 0;
    while got < buf.len() {
        match src.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    return Ok(got);
}

/// Reads the whole file at `path` into a freshly allocated buffer of one
/// byte more than the file, the last byte being a NUL.
pub fn read_all<P: AsRef<Path>>(path: P) -> Result<FileBytes, ReadError> {
    let path = path.as_ref();
    let mut file = open(path)?;
    let size = file_size(&file)?;
    let Some(total) = size.checked_add(1) else {
        return Err(ReadError::Alloc(GrowArrErr::new(ErrorReason::CapacityOverflow)));
    };

    let mut data = GrowArr::<u8, Global, usize>::with_capacity(total)?;
    let got = fill(&mut file, data.get_space(size)?)?;
    if got < size {
        log::debug!("{} shrank while reading, got {} of {} bytes", path.display(), got, size);
        data.truncate(got);
    }
    data.push(0)?;

    return Ok(FileBytes { data: data });
}

/// Reads the file at `path` into `buffer`, keeping at most
/// `buffer.len() - 1` bytes and writing a NUL right after them.
///
/// Returns the number of bytes written, terminator included.
pub fn read_into<P: AsRef<Path>>(buffer: &mut [u8], path: P) -> Result<usize, ReadError> {
    let Some(room) = buffer.len().checked_sub(1) else {
        return Err(ReadError::EmptyBuffer);
    };
    let path = path.as_ref();
    let mut file = open(path)?;
    let size = file_size(&file)?;

    let want = size.min(room);
    if want < size {
        log::debug!("truncating {} from {} to {} bytes", path.display(), size, want);
    }

    let got = fill(&mut file, &mut buffer[..want])?;
    buffer[got] = 0;
    return Ok(got + 1);
}

/// Appends the contents of the file at `path` and a NUL byte to `arr`.
///
/// The array grows exactly to fit, as with [`GrowArr::get_space`]. Returns
/// the number of bytes appended, terminator included.
pub fn read_append<A, L, P>(arr: &mut GrowArr<u8, A, L>, path: P) -> Result<usize, ReadError>
where
    A: ArrAllocator,
    L: LengthType,
    P: AsRef<Path>,
    usize: TryFrom<L>,
{
    let mut file = open(path.as_ref())?;
    let size = file_size(&file)?;
    return append_from(arr, &mut file, size);
}

/// Appends up to `size` bytes of `src` and a NUL byte to `arr`. On error
/// `arr` keeps its old length.
fn append_from<A, L, R>(arr: &mut GrowArr<u8, A, L>, src: &mut R, size: usize) -> Result<usize, ReadError>
where
    A: ArrAllocator,
    L: LengthType,
    R: Read,
    usize: TryFrom<L>,
{
    let overflow = GrowArrErr::new(ErrorReason::CapacityOverflow);
    let Some(total) = size.checked_add(1) else {
        return Err(ReadError::Alloc(overflow));
    };
    let Ok(n) = L::try_from(total) else {
        return Err(ReadError::Alloc(overflow));
    };

    let start = arr.len();
    let space = arr.get_space(n)?;
    // The slots come zeroed, so the byte after the last one read is
    // already the terminator.
    let got = match fill(src, &mut space[..size]) {
        Ok(got) => got,
        Err(e) => {
            arr.truncate(start);
            return Err(ReadError::Io(e));
        }
    };

    if got < size {
        // got + 1 <= total, which already fit `L`.
        let Ok(keep) = L::try_from(got + 1) else {
            arr.truncate(start);
            return Err(ReadError::Alloc(overflow));
        };
        arr.truncate(start + keep);
    }
    return Ok(got + 1);
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;
    use tempfile::TempDir;

    use super::*;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        return file;
    }

    fn missing_path() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does_not_exist.txt");
        return (dir, path);
    }

    #[test]
    fn read_all_missing_file() {
        let (_dir, path) = missing_path();
        let ret = read_all(&path);
        assert!(matches!(ret, Err(ReadError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn read_all_terminates() {
        let file = temp_with(b"abc");
        let bytes = read_all(file.path()).unwrap();
        assert_eq!(bytes.len(), 3);
        assert_eq!(bytes.as_bytes(), b"abc");
        assert_eq!(bytes.as_bytes_with_nul(), b"abc\0");

        let arr = bytes.into_array();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.capacity(), 4);
    }

    #[test]
    fn read_all_empty_file() {
        let file = temp_with(b"");
        let bytes = read_all(file.path()).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(bytes.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn read_into_fits() {
        let file = temp_with(b"abc");
        let mut buf = [0xffu8; 8];
        assert_eq!(read_into(&mut buf, file.path()).unwrap(), 4);
        assert_eq!(&buf[..4], b"abc\0");
        assert_eq!(buf[4], 0xff);
    }

    #[test]
    fn read_into_truncates() {
        let file = temp_with(b"abcdef");
        let mut buf = [0xffu8; 4];
        assert_eq!(read_into(&mut buf, file.path()).unwrap(), 4);
        assert_eq!(&buf, b"abc\0");

        let mut one = [0xffu8; 1];
        assert_eq!(read_into(&mut one, file.path()).unwrap(), 1);
        assert_eq!(one, [0]);
    }

    #[test]
    fn read_into_errors() {
        let file = temp_with(b"abc");
        let mut empty: [u8; 0] = [];
        assert!(matches!(read_into(&mut empty, file.path()), Err(ReadError::EmptyBuffer)));

        let (_dir, path) = missing_path();
        let mut buf = [0u8; 4];
        assert!(matches!(read_into(&mut buf, &path), Err(ReadError::Io(_))));
        assert_eq!(buf, [0u8; 4]);
    }

    #[test]
    fn read_append_to_array() {
        let file = temp_with(b"abc");
        let mut arr = GrowArr::<u8, Global>::new();
        arr.push(b'>').unwrap();

        assert_eq!(read_append(&mut arr, file.path()).unwrap(), 4);
        assert_eq!(arr.as_slice(), b">abc\0");
        assert_eq!(arr.capacity(), 5);

        assert_eq!(read_append(&mut arr, file.path()).unwrap(), 4);
        assert_eq!(arr.as_slice(), b">abc\0abc\0");
    }

    #[test]
    fn read_append_overflow() {
        let file = temp_with(&[7u8; 300]);
        let mut arr = GrowArr::<u8, Global, u8>::new();
        let ret = read_append(&mut arr, file.path());
        match ret {
            Err(ReadError::Alloc(e)) => assert_eq!(e.reason(), ErrorReason::CapacityOverflow),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(arr.is_empty());
    }

    #[test]
    fn read_append_failed_read_keeps_array() {
        // A directory opens on some platforms but cannot be read.
        let dir = TempDir::new().unwrap();
        let mut arr = GrowArr::<u8, Global>::new();
        arr.push(b'>').unwrap();

        let ret = read_append(&mut arr, dir.path());
        assert!(matches!(ret, Err(ReadError::Io(_))));
        assert_eq!(arr.len(), 1);
        assert_eq!(arr.as_slice(), b">");
    }

    #[test]
    fn append_short_source() {
        // The source ends before the announced size.
        let mut src: &[u8] = b"ab";
        let mut arr = GrowArr::<u8, Global, u16>::new();
        arr.push(b'>').unwrap();

        assert_eq!(append_from(&mut arr, &mut src, 5).unwrap(), 3);
        assert_eq!(arr.as_slice(), b">ab\0");
        assert_eq!(arr.len(), 4);
    }

    #[test]
    fn file_size_of_open_file() {
        let file = temp_with(b"abcdef");
        let opened = File::open(file.path()).unwrap();
        assert_eq!(file_size(&opened).unwrap(), 6);

        let empty = temp_with(b"");
        assert_eq!(file_size(empty.as_file()).unwrap(), 0);
    }
}
