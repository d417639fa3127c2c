use log::{debug, info};
use modular_bitfield::prelude::*;
use std::{
    error, fmt,
    fs::File,
    io::{self, ErrorKind, Read, Write},
    path::Path,
};

use super::{ProcessControlBlock, ReadyQueue};

const RECORD_COUNT_SIZE: usize = 4;
const RECORD_SIZE: usize = 12;

/// One process as stored on disk: three little-endian `u32`s.
#[bitfield(bits = 96)]
#[derive(Debug, Clone, Copy)]
pub struct ProcessRecord {
    pub remaining_burst_time: B32,
    pub priority: B32,
    pub arrival: B32,
}

impl From<ProcessRecord> for ProcessControlBlock {
    fn from(record: ProcessRecord) -> Self {
        ProcessControlBlock::with_priority(
            record.remaining_burst_time(),
            record.priority(),
            record.arrival(),
        )
    }
}

impl From<&ProcessControlBlock> for ProcessRecord {
    fn from(process: &ProcessControlBlock) -> Self {
        ProcessRecord::new()
            .with_remaining_burst_time(process.remaining_burst_time())
            .with_priority(process.priority())
            .with_arrival(process.arrival())
    }
}

#[derive(Debug)]
pub enum LoadError {
    InvalidPath,
    Open(io::Error),
    MissingRecordCount(io::Error),
    NoRecords,
    TruncatedRecord { index: u32, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath => write!(f, "no process file was given"),
            Self::Open(err) => write!(f, "failed to open the process file: {err}"),
            Self::MissingRecordCount(err) => write!(f, "failed to read the record count: {err}"),
            Self::NoRecords => write!(f, "the process file declares no records"),
            Self::TruncatedRecord { index, source } => {
                write!(f, "failed to read process record {index}: {source}")
            }
        }
    }
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Open(err)
            | Self::MissingRecordCount(err)
            | Self::TruncatedRecord { source: err, .. } => Some(err),
            Self::InvalidPath | Self::NoRecords => None,
        }
    }
}

/// Fills `buffer` completely, retrying reads that were interrupted.
fn read_file_bytes<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<()> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => return Err(io::Error::from(ErrorKind::UnexpectedEof)),
            Ok(read) => filled += read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Decodes a record count followed by that many process records.
///
/// Any short read throws away everything decoded so far.
pub fn read_process_control_blocks<R: Read>(mut reader: R) -> Result<ReadyQueue, LoadError> {
    let mut count_bytes = [0u8; RECORD_COUNT_SIZE];
    read_file_bytes(&mut reader, &mut count_bytes).map_err(LoadError::MissingRecordCount)?;

    let record_count = u32::from_le_bytes(count_bytes);
    if record_count == 0 {
        return Err(LoadError::NoRecords);
    }
    debug!("Process file declares {record_count} records");

    let mut ready_queue = ReadyQueue::new();
    for index in 0..record_count {
        let mut record_bytes = [0u8; RECORD_SIZE];
        read_file_bytes(&mut reader, &mut record_bytes)
            .map_err(|source| LoadError::TruncatedRecord { index, source })?;

        ready_queue.push_back(ProcessRecord::from_bytes(record_bytes).into());
    }

    Ok(ready_queue)
}

/// Loads the ready queue stored at `input_file`.
pub fn load_process_control_blocks<P: AsRef<Path>>(input_file: P) -> Result<ReadyQueue, LoadError> {
    let path = input_file.as_ref();
    if path.as_os_str().is_empty() || path.as_os_str() == "\n" {
        return Err(LoadError::InvalidPath);
    }

    let file = File::open(path).map_err(LoadError::Open)?;
    let ready_queue = read_process_control_blocks(file)?;
    info!(
        "Loaded {} processes from {}",
        ready_queue.len(),
        path.display()
    );
    Ok(ready_queue)
}

/// Writes `processes` in the format [`read_process_control_blocks`] expects.
pub fn save_process_control_blocks<'a, W, I>(mut writer: W, processes: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ProcessControlBlock>,
    I::IntoIter: ExactSizeIterator,
{
    let processes = processes.into_iter();
    let record_count = u32::try_from(processes.len())
        .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "too many processes"))?;

    writer.write_all(&record_count.to_le_bytes())?;
    for process in processes {
        writer.write_all(&ProcessRecord::from(process).into_bytes())?;
    }
    writer.flush()
}
