use crate::errors::CoreError;

/// Magic bytes identifying an IVTK (Investment Tracker) snapshot file.
pub const MAGIC: &[u8; 4] = b"IVTK";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes: magic(4) + version(2) + payload_len(8) = 14
pub const HEADER_SIZE: usize = 14;

/// File header read from a snapshot file.
#[derive(Debug)]
pub struct FileHeader {
    pub version: u16,
    pub payload_len: u64,
}

/// Write a complete snapshot file to bytes.
///
/// Layout:
/// ```text
/// [IVTK: 4B] [version: 2B LE] [payload_len: 8B LE] [payload: variable]
/// ```
pub fn write_file(version: u16, payload: &[u8]) -> Vec<u8> {
    let payload_len = payload.len() as u64;
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(payload);

    buf
}

/// Parse the header from raw file bytes.
/// Returns the header and the payload slice.
pub fn read_file(data: &[u8]) -> Result<(FileHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid IVTK file".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not an IVTK file".into(),
        ));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let payload_len = u64::from_le_bytes(
        data[6..14]
            .try_into()
            .map_err(|_| CoreError::InvalidFileFormat("Failed to read payload length".into()))?,
    );

    let expected_end = HEADER_SIZE + payload_len as usize;
    if data.len() < expected_end {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {} bytes of payload, got {}",
            payload_len,
            data.len() - HEADER_SIZE
        )));
    }

    let payload = &data[HEADER_SIZE..expected_end];

    Ok((
        FileHeader {
            version,
            payload_len,
        },
        payload,
    ))
}
