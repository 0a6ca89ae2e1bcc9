//! Blocking reader for fixed-size event records.
//!
//! Reads `/dev/input/eventN` (or any [`Read`], such as a captured event file)
//! one record at a time.  A read may return fewer bytes than one record, so
//! the reader keeps reading until the record is complete.  End of stream
//! exactly at a record boundary is a clean stop; end of stream inside a
//! record is a fatal [`DecodeError`] because the stream cannot be
//! resynchronised.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use touchpad_core::{decode_record, DecodeError, EventRecord, RecordLayout};

use crate::application::process_events::{PipelineError, RecordSource};

/// Reads records of one [`RecordLayout`] from a byte stream.
pub struct DeviceReader<R> {
    inner: R,
    layout: RecordLayout,
    buf: Vec<u8>,
}

impl DeviceReader<File> {
    /// Opens a device node or event capture file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from opening `path`.
    pub fn open(path: &Path, layout: RecordLayout) -> std::io::Result<Self> {
        Ok(Self::new(File::open(path)?, layout))
    }
}

impl<R: Read> DeviceReader<R> {
    pub fn new(inner: R, layout: RecordLayout) -> Self {
        Self {
            inner,
            layout,
            buf: vec![0; layout.record_size()],
        }
    }

    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Reads the next full record.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] on a read failure and
    /// [`PipelineError::Decode`] if the stream ends mid-record.
    pub fn read_record(&mut self) -> Result<Option<EventRecord>, PipelineError> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.buf.len() {
            return Err(DecodeError::InsufficientData {
                needed: self.buf.len(),
                available: filled,
            }
            .into());
        }
        Ok(Some(decode_record(&self.buf, self.layout)?))
    }
}

impl<R: Read> RecordSource for DeviceReader<R> {
    fn next_record(&mut self) -> Result<Option<EventRecord>, PipelineError> {
        self.read_record()
    }
}
