pub mod fs;

pub use fs::{
    compile_patterns, is_excluded, is_markdown, read_to_string, resolve_files, write_atomic,
    FsStore,
};
