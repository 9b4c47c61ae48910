use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// SHA-256 摘要的十六进制长度
pub const DIGEST_HEX_LEN: usize = 64;

/// 小写十六进制形式的 SHA-256 摘要
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    fn from_digest(digest: impl AsRef<[u8]>) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(Error::InvalidRecord(format!(
                "expected {DIGEST_HEX_LEN} lowercase hex characters, got {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

/// 计算内存数据的 SHA256 校验和
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    ContentHash::from_digest(Sha256::digest(data))
}

/// 计算文件的 SHA256 校验和
///
/// 返回原始的 `io::Error`，由调用方决定文件缺失时是跳过还是中止。
pub fn compute_file_hash(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::from_digest(hasher.finalize()))
}
