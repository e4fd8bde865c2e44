/// Background decoding of candidate files into data URLs
///
/// Reading and base64-encoding run on tokio's blocking pool so the UI
/// thread never waits on disk. A batch is decoded one file at a time, in
/// order, and either every file succeeds or the whole batch fails.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::task;

use crate::error::InputError;
use crate::state::{FileHandle, FileSource, ImageRecord};

/// Media type used in the data URL when a file declares none
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Sequence number tagging one decode batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchSeq(u64);

/// Hands out batch sequence numbers and remembers the latest one
#[derive(Debug, Default)]
pub struct BatchCounter {
    latest: u64,
}

impl BatchCounter {
    /// Start a new batch, superseding every earlier one
    pub fn start(&mut self) -> BatchSeq {
        self.latest += 1;
        BatchSeq(self.latest)
    }

    /// True if no batch has started since `seq`
    pub fn is_current(&self, seq: BatchSeq) -> bool {
        seq.0 == self.latest
    }
}

/// Build a `data:` URL for `bytes`
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        FALLBACK_MIME_TYPE
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Extract the payload of a base64 `data:` URL
pub fn data_url_bytes(data_url: &str) -> Option<Vec<u8>> {
    let rest = data_url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    STANDARD.decode(payload).ok()
}

/// Read one file and return its data URL
pub async fn decode(file: FileHandle) -> Result<String, InputError> {
    decode_record(file).await.map(|record| record.data_url)
}

/// Read one file into a record; its size is the number of bytes read
async fn decode_record(file: FileHandle) -> Result<ImageRecord, InputError> {
    let name = file.name().to_string();

    // Spawn blocking because file reads and encoding of large images take a while
    task::spawn_blocking(move || decode_blocking(file))
        .await
        .map_err(|e| InputError::decode(name, format!("Task join error: {}", e)))?
}

/// Blocking implementation of `decode_record`
fn decode_blocking(file: FileHandle) -> Result<ImageRecord, InputError> {
    let (size, data_url) = match file.source() {
        FileSource::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| InputError::decode(file.name(), e))?;
            (bytes.len() as u64, to_data_url(file.mime_type(), &bytes))
        }
        FileSource::Memory(bytes) => (bytes.len() as u64, to_data_url(file.mime_type(), bytes)),
    };

    Ok(ImageRecord {
        name: file.name().to_string(),
        size,
        mime_type: file.mime_type().to_string(),
        data_url,
    })
}

/// Decode every file of a batch, in order.
///
/// Record `i` corresponds to file `i`. The first failure aborts the batch
/// and nothing decoded so far is returned.
pub async fn decode_batch(files: Vec<FileHandle>) -> Result<Vec<ImageRecord>, InputError> {
    let mut records = Vec::with_capacity(files.len());

    for file in files {
        records.push(decode_record(file).await?);
    }

    log::info!("📸 Decoded batch of {} image(s)", records.len());
    Ok(records)
}
