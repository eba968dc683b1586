//! Mutating file operations.
//!
//! Writes go through a sibling temporary file that receives its final
//! permission bits before it is moved into place.

mod operations;

pub use operations::{
    create_file, delete_file, delete_files, file_permissions, save_file, trash_file, trash_files,
    DEFAULT_CREATE_MODE,
};
