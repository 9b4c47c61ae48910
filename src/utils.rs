mod fs;
mod hash;

pub use fs::{base_name, list_candidates, parse_separator};
pub use hash::{ContentHash, compute_file_hash, hash_bytes};
