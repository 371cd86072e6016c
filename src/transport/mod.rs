/// Filesystem listing and decoding of script files.
pub mod fs;
