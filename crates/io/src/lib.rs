//! Read-only file access used to load documents from disk.

pub mod mmap;
