//! Unbuffered block reader for physical disks, shadow-copy devices, and
//! image files.

use shadowscan_core::{BlockSource, CoreError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// A read-only block source backed by a raw device handle.
///
/// The handle is opened without OS-level buffering where the platform
/// supports it, so that every `read_chunk` reflects what the device actually
/// supplies rather than cache contents:
///
/// - Linux: `O_DIRECT`, falling back to a plain read-only open when the
///   medium refuses it (tmpfs, some image files).
/// - Windows: `FILE_FLAG_NO_BUFFERING | FILE_FLAG_RANDOM_ACCESS`, with
///   read/write/delete sharing, the access mode shadow-copy device paths
///   (`\\?\GLOBALROOT\Device\HarddiskVolumeShadowCopyN`) require.
///
/// Unbuffered access requires sector-aligned offsets, lengths, and
/// destination memory; callers read through `AlignedBuffer`.
///
/// A `DiskReader` is meant to live for exactly one operation (one scan, or
/// one read-and-dump); the handle closes when it is dropped, on success and
/// error paths alike.
#[derive(Debug)]
pub struct DiskReader {
    file: File,
    size: u64,
}

impl DiskReader {
    /// Opens the device or image at `path` read-only and unbuffered.
    ///
    /// The size is probed by seeking to the end; raw devices that cannot be
    /// sized this way report 0, which consumers tolerate; scan termination
    /// relies on short reads, not on the reported size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path.as_ref(), true)
    }

    /// Opens `path` through the page cache. Unaligned reads against image
    /// files go through here; device inspection wants `open`.
    pub fn open_regular(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path.as_ref(), false)
    }

    fn open_with_options(path: &Path, direct: bool) -> Result<Self> {
        let open_result = if direct {
            open_unbuffered(path)
        } else {
            OpenOptions::new().read(true).open(path)
        };

        let mut file = open_result.map_err(|source| CoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{fadvise, Advice};

            let _ = fadvise(&file, 0, None, Advice::Sequential);
        }

        let size = file.seek(SeekFrom::End(0)).unwrap_or(0);
        file.seek(SeekFrom::Start(0))
            .map_err(|source| CoreError::Seek { offset: 0, source })?;

        Ok(Self { file, size })
    }
}

impl BlockSource for DiskReader {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|source| CoreError::Seek { offset, source })?;

        // Exactly one read per chunk; a short count signals end-of-device.
        self.file
            .read(buffer)
            .map_err(|source| CoreError::Read { offset, source })
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(target_os = "linux")]
fn open_unbuffered(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    match OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_DIRECT)
        .open(path)
    {
        Ok(file) => Ok(file),
        Err(_) => OpenOptions::new().read(true).open(path),
    }
}

#[cfg(windows)]
fn open_unbuffered(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    const FILE_SHARE_READ: u32 = 0x0000_0001;
    const FILE_SHARE_WRITE: u32 = 0x0000_0002;
    const FILE_SHARE_DELETE: u32 = 0x0000_0004;
    const FILE_FLAG_RANDOM_ACCESS: u32 = 0x1000_0000;
    const FILE_FLAG_NO_BUFFERING: u32 = 0x2000_0000;

    OpenOptions::new()
        .read(true)
        .share_mode(FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE)
        .custom_flags(FILE_FLAG_NO_BUFFERING | FILE_FLAG_RANDOM_ACCESS)
        .open(path)
}

#[cfg(not(any(target_os = "linux", windows)))]
fn open_unbuffered(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn open_reports_size_and_reads_at_offset() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let data = b"shadowscan reader test data, sixty-four bytes of it altogether!!";
        temp_file.write_all(data).unwrap();
        temp_file.flush().unwrap();

        let mut reader = DiskReader::open_regular(temp_file.path()).unwrap();
        assert_eq!(reader.size(), data.len() as u64);

        let mut buffer = vec![0u8; 10];
        let n = reader.read_chunk(0, &mut buffer).unwrap();
        assert_eq!(n, 10);
        assert_eq!(&buffer, b"shadowscan");

        let n = reader.read_chunk(11, &mut buffer).unwrap();
        assert_eq!(n, 10);
        assert_eq!(&buffer, b"reader tes");
    }

    #[test]
    fn read_beyond_end_is_a_short_read_not_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"short").unwrap();
        temp_file.flush().unwrap();

        let mut reader = DiskReader::open_regular(temp_file.path()).unwrap();

        let mut buffer = vec![0u8; 100];
        let n = reader.read_chunk(0, &mut buffer).unwrap();
        assert_eq!(n, 5);

        let n = reader.read_chunk(100, &mut buffer).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn open_missing_path_fails_with_open_error() {
        let err = DiskReader::open("/nonexistent/shadowscan-device").unwrap_err();
        assert!(matches!(err, CoreError::Open { .. }));
    }
}
