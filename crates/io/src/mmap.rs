/// A read-only, memory-mapped UTF-8 file.
///
/// The only constructor validates the whole mapping once, so [`MmapFile::as_str`]
/// is free afterwards.
#[derive(Debug)]
pub struct MmapFile {
    _file: std::fs::File,
    mmap: memmap2::Mmap,
}

impl MmapFile {
    /// Opens a file, maps it and checks that the content is valid UTF-8.
    ///
    /// # Errors
    ///
    /// - `std::io::Error` if the file cannot be opened or mapped.
    /// - `std::io::ErrorKind::InvalidData` if the content is not UTF-8.
    pub fn open_utf8(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;

        // SAFETY:
        // - File is opened read-only
        // - We keep the file handle alive in struct
        // - Caller only gets immutable &str
        let mmap = unsafe { memmap2::Mmap::map(&file)? };

        std::str::from_utf8(&mmap)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(Self { _file: file, mmap })
    }

    /// The mapped content as text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY:
        // - `open_utf8` is the only constructor and rejects non UTF-8 content
        // - The mapping is read-only and never changes after validation
        unsafe { std::str::from_utf8_unchecked(&self.mmap) }
    }
}
