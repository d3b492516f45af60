use crate::errors::CoreError;
use crate::models::portfolio::PortfolioData;

use super::encryption::{self, KdfParams, Sealed, NONCE_LEN, SALT_LEN};

/// Magic bytes identifying a dashboard backup.
pub const MAGIC: &[u8; 4] = b"FIDB";

pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf(12) + salt(16) + nonce(12) + payload_len(8)
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Password-protected export of the portfolio record.
///
/// ```text
/// [FIDB: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
/// [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [payload_len: 8B LE]
/// [AES-256-GCM(JSON portfolio) + tag]
/// ```
pub struct Backup;

impl Backup {
    pub fn export(data: &PortfolioData, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::export_with_params(data, password, &KdfParams::default())
    }

    pub fn export_with_params(
        data: &PortfolioData,
        password: &str,
        params: &KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        params.validate()?;
        let json = serde_json::to_vec(data)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        let sealed = encryption::seal(&json, password, params)?;

        let mut buf = Vec::with_capacity(HEADER_LEN + sealed.ciphertext.len());
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
        for word in [params.memory_cost, params.time_cost, params.parallelism] {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        buf.extend_from_slice(&sealed.salt);
        buf.extend_from_slice(&sealed.nonce);
        buf.extend_from_slice(&(sealed.ciphertext.len() as u64).to_le_bytes());
        buf.extend_from_slice(&sealed.ciphertext);
        Ok(buf)
    }

    pub fn import(bytes: &[u8], password: &str) -> Result<PortfolioData, CoreError> {
        let (params, sealed) = Self::parse(bytes)?;
        let json = encryption::open(&sealed, password, &params)?;
        let mut data: PortfolioData = serde_json::from_slice(&json)
            .map_err(|e| CoreError::Deserialization(format!("Backup payload is not a portfolio: {e}")))?;
        data.normalize();
        Ok(data)
    }

    fn parse(bytes: &[u8]) -> Result<(KdfParams, Sealed), CoreError> {
        let mut reader = Reader { bytes, pos: 0 };

        if bytes.len() < HEADER_LEN {
            return Err(CoreError::InvalidFileFormat("Too short to be a backup".into()));
        }
        if reader.take(4)? != MAGIC {
            return Err(CoreError::InvalidFileFormat("Missing FIDB magic bytes".into()));
        }
        let version = u16::from_le_bytes(reader.array()?);
        if version == 0 || version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedVersion(version));
        }

        let params = KdfParams {
            memory_cost: u32::from_le_bytes(reader.array()?),
            time_cost: u32::from_le_bytes(reader.array()?),
            parallelism: u32::from_le_bytes(reader.array()?),
        };
        params.validate()?;

        let salt = reader.array()?;
        let nonce = reader.array()?;
        let len = u64::from_le_bytes(reader.array()?);
        let len = usize::try_from(len)
            .map_err(|_| CoreError::InvalidFileFormat(format!("Payload length {len} too large")))?;
        let ciphertext = reader.take(len)?.to_vec();

        Ok((
            params,
            Sealed {
                salt,
                nonce,
                ciphertext,
            },
        ))
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], CoreError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!(
                    "Backup truncated: needed {n} bytes at offset {}, have {}",
                    self.pos,
                    self.bytes.len().saturating_sub(self.pos)
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
