//! PAUSE-mode streaming: a producer thread runs the transcoder while the
//! caller pulls chunks through the [`Chunks`] iterator.
//!
//! The output buffer is the shared resource. The producer owns it between
//! handshakes; on a full chunk it moves the buffer into the shared cell,
//! wakes the consumer, and blocks until the cell is drained. Chunks arrive
//! in emission order and split only at capacity boundaries, so their
//! concatenation equals the REALLOC-mode output byte for byte.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::error::TranscodeError;
use crate::sink::Sink;
use crate::transcoder::Transcoder;
use crate::TranscodeOptions;

/// Chunk handoff state shared between producer and consumer.
pub(crate) struct Shared {
    cell: Mutex<ChunkCell>,
    pub(crate) produced: Condvar,
    pub(crate) drained: Condvar,
}

#[derive(Default)]
pub(crate) struct ChunkCell {
    /// The output buffer, parked here while a chunk awaits consumption.
    pub buf: Vec<u8>,
    /// Length of the pending chunk.
    pub len: usize,
    /// A chunk is parked and not yet drained.
    pub full: bool,
    /// The producer finished (successfully or not).
    pub done: bool,
    /// The consumer went away; the producer must unwind.
    pub abandoned: bool,
    /// A mid-stream failure, reported once in place of end-of-stream.
    pub err: Option<TranscodeError>,
}

impl Shared {
    fn new() -> Self {
        Self {
            cell: Mutex::new(ChunkCell::default()),
            produced: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ChunkCell> {
        match self.cell.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn wait_drained<'a>(
        &self,
        guard: MutexGuard<'a, ChunkCell>,
    ) -> MutexGuard<'a, ChunkCell> {
        match self.drained.wait(guard) {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn wait_produced<'a>(
        &self,
        guard: MutexGuard<'a, ChunkCell>,
    ) -> MutexGuard<'a, ChunkCell> {
        match self.produced.wait(guard) {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Spawns the producer thread and returns the chunk iterator.
pub(crate) fn spawn(input: Vec<u8>, opts: TranscodeOptions) -> Chunks {
    let shared = Arc::new(Shared::new());
    let producer = Arc::clone(&shared);
    let spawned = thread::Builder::new()
        .name("bson2json-producer".into())
        .spawn(move || {
            let result = run_producer(&input, opts, &producer);
            publish_done(&producer, result);
        });
    let handle = match spawned {
        Ok(handle) => Some(handle),
        Err(_) => {
            let mut cell = shared.lock();
            cell.err = Some(TranscodeError::Allocation);
            cell.done = true;
            None
        }
    };
    Chunks {
        shared,
        handle,
        finished: false,
    }
}

fn run_producer(
    input: &[u8],
    opts: TranscodeOptions,
    shared: &Arc<Shared>,
) -> Result<(Vec<u8>, usize), TranscodeError> {
    let sink = Sink::pause(
        input.len(),
        opts.chunk_size,
        opts.fixed_buffer,
        Arc::clone(shared),
    )?;
    let mut transcoder = Transcoder::new(input, sink);
    transcoder.transcode_document(opts.is_array)?;
    Ok(transcoder.into_sink().into_parts())
}

/// Publishes the final partial chunk (on success) or the error, and the
/// done flag. On failure the unflushed tail is discarded: the caller sees
/// the error, not more JSON bytes.
fn publish_done(shared: &Shared, result: Result<(Vec<u8>, usize), TranscodeError>) {
    let mut cell = shared.lock();
    match result {
        Ok((buf, len)) => {
            if len > 0 {
                cell.buf = buf;
                cell.len = len;
                cell.full = true;
            }
        }
        Err(TranscodeError::Abandoned) => {}
        Err(err) => cell.err = Some(err),
    }
    cell.done = true;
    shared.produced.notify_one();
}

/// Iterator over the JSON chunks of a streaming transcode.
///
/// Yields `Ok(chunk)` for each chunk in emission order; a mid-stream
/// failure yields one `Err` and ends the stream. There is no cancellation
/// in the protocol, but dropping the iterator wakes the producer so the
/// worker thread exits instead of blocking forever.
pub struct Chunks {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
    finished: bool,
}

impl Chunks {
    fn join_producer(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Iterator for Chunks {
    type Item = Result<Vec<u8>, TranscodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut cell = self.shared.lock();
        loop {
            if cell.full {
                let chunk = cell.buf[..cell.len].to_vec();
                cell.full = false;
                cell.len = 0;
                self.shared.drained.notify_one();
                return Some(Ok(chunk));
            }
            if cell.done {
                let err = cell.err.take();
                drop(cell);
                self.finished = true;
                self.join_producer();
                return err.map(Err);
            }
            cell = self.shared.wait_produced(cell);
        }
    }
}

impl Drop for Chunks {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        {
            let mut cell = self.shared.lock();
            cell.abandoned = true;
            cell.full = false;
            self.shared.drained.notify_one();
        }
        self.join_producer();
    }
}
