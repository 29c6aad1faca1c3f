//! Content reader for DeltaVision.
//!
//! Every text-reading path in the workspace goes through this crate so the
//! same rules apply everywhere: files above [`MAX_FILE_SIZE`] are refused,
//! and files whose extension is on the [`BINARY_EXTENSIONS`] denylist are
//! refused without looking at their bytes.

pub mod error;
pub mod policy;
pub mod reader;

pub use error::{ReadError, ReadResult};
pub use policy::{check_policy, is_binary_path, BINARY_EXTENSIONS, MAX_FILE_SIZE};
pub use reader::{decode_text, read_content, read_content_blocking};
