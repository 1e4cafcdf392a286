//! Latest-value handoff from the capture callback to the display
//!
//! Backed by a triple buffer: one slot for the writer, one for the reader and
//! one in flight. `publish` overwrites anything the reader has not seen yet,
//! and neither side ever waits for the other.

use triple_buffer::{Input, Output, TripleBuffer};

use crate::note::TuningResult;

/// Write half, owned by the audio callback.
pub struct ResultPublisher {
    input: Input<Option<TuningResult>>,
}

/// Read half, owned by the render loop.
pub struct ResultReader {
    output: Output<Option<TuningResult>>,
}

pub fn channel() -> (ResultPublisher, ResultReader) {
    let (input, output) = TripleBuffer::new(&None).split();
    (ResultPublisher { input }, ResultReader { output })
}

impl ResultPublisher {
    pub fn publish(&mut self, result: TuningResult) {
        self.input.write(Some(result));
    }
}

impl ResultReader {
    /// Most recent published result, or `None` if nothing was published yet.
    pub fn latest(&mut self) -> Option<TuningResult> {
        *self.output.read()
    }

    /// Whether a result arrived since the last call to [`ResultReader::latest`].
    pub fn has_update(&self) -> bool {
        self.output.updated()
    }
}
