//! Streaming engine (spec.md §5): keeps two tuner reads in flight so that
//! processing the current block overlaps the next transfer.
//!
//! The spec's scheduling model is a single-threaded cooperative loop driven
//! by async reads; there is no async runtime in this stack, so the same
//! "read N+1 while processing N" overlap is realized with a reader thread
//! feeding a depth-2 channel. The main thread remains the only place that
//! touches DSP state or the sink, matching "no shared mutable state crosses
//! tasks because there is only one logical task" for everything but the
//! tuner reads themselves.

use crate::adapter::SourceAdapter;
use crate::error::DeviceError;
use crate::sink::AudioSink;
use crate::tuner::Tuner;
use heterodyne_core::IqBlock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Depth of the in-flight read channel (spec.md §5: "two outstanding read
/// requests are kept in flight").
const IN_FLIGHT_READS: usize = 2;

enum ReadResult {
    Block(IqBlock),
    Err(DeviceError),
}

/// Drives a background reader thread against a [`SourceAdapter`] and hands
/// each block to a processing closure on the calling thread, which writes
/// its output to an [`AudioSink`].
///
/// `T` must be `Send + 'static` because reads happen on a dedicated thread;
/// [`SimulatedTuner`](crate::simulated_tuner::SimulatedTuner) and
/// [`CpalSink`](crate::cpal_backend::CpalSink) both satisfy this.
pub struct StreamEngine<T: Tuner + Send + 'static> {
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<SourceAdapter<T>>>,
    blocks: Receiver<ReadResult>,
}

impl<T: Tuner + Send + 'static> StreamEngine<T> {
    /// Spawn the reader thread, issuing `block_len`-sample reads against
    /// `adapter` until [`stop`](Self::stop) is called.
    pub fn start(mut adapter: SourceAdapter<T>, block_len: usize) -> Result<Self, DeviceError> {
        adapter.tuner_mut().reset_buffer()?;

        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx): (SyncSender<ReadResult>, Receiver<ReadResult>) = sync_channel(IN_FLIGHT_READS);
        let reader_stop = Arc::clone(&stop);

        let reader = std::thread::spawn(move || {
            while !reader_stop.load(Ordering::Acquire) {
                let result = match adapter.read_block(block_len) {
                    Ok(block) => ReadResult::Block(block),
                    Err(e) => ReadResult::Err(e),
                };
                if tx.send(result).is_err() {
                    break;
                }
            }
            adapter
        });

        Ok(Self {
            stop,
            reader: Some(reader),
            blocks: rx,
        })
    }

    /// Block until the next read completes, then run `process` over it and
    /// write the result to `sink`. Returns `Ok(None)` once the engine has
    /// been stopped and drained.
    pub fn pump<S: AudioSink>(
        &mut self,
        sink: &mut S,
        mut process: impl FnMut(IqBlock) -> heterodyne_core::AudioBlock,
    ) -> Result<Option<()>, DeviceError> {
        match self.blocks.recv() {
            Ok(ReadResult::Block(block)) => {
                let audio = process(block);
                sink.play(&audio.left, &audio.right)?;
                Ok(Some(()))
            }
            Ok(ReadResult::Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }

    /// Stop issuing further reads (spec.md §5 "Cancellation"). In-flight
    /// reads are allowed to resolve; their blocks are discarded by dropping
    /// the receiver. Returns the adapter so the tuner can be closed.
    pub fn stop(mut self) -> SourceAdapter<T> {
        self.stop.store(true, Ordering::Release);
        // Drain so the reader thread's blocking send doesn't wedge forever.
        while self.blocks.try_recv().is_ok() {}
        self.reader
            .take()
            .expect("reader thread only taken once")
            .join()
            .expect("reader thread panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording_sink::RecordingSink;
    use crate::simulated_tuner::{Generator, SimulatedTuner};

    fn tone_adapter() -> SourceAdapter<SimulatedTuner> {
        let generator: Generator = Box::new(|_c, _r, len| {
            let i: Vec<f32> = (0..len).map(|n| (n as f32 * 0.2).sin() * 0.5).collect();
            let q: Vec<f32> = (0..len).map(|n| (n as f32 * 0.2).cos() * 0.5).collect();
            (i, q)
        });
        SourceAdapter::new(SimulatedTuner::new(generator, 48_000, 100_000_000.0), 4)
    }

    #[test]
    fn pump_delivers_processed_blocks_to_sink() {
        let adapter = tone_adapter();
        let mut engine = StreamEngine::start(adapter, 64).unwrap();
        let mut sink = RecordingSink::new(48_000);

        for _ in 0..3 {
            engine
                .pump(&mut sink, |block| heterodyne_core::AudioBlock::mono(block.i, 10.0))
                .unwrap()
                .unwrap();
        }

        assert_eq!(sink.blocks().len(), 3);
        assert_eq!(sink.blocks()[0].0.len(), 64);
        engine.stop();
    }

    #[test]
    fn stop_joins_reader_thread_cleanly() {
        let adapter = tone_adapter();
        let engine = StreamEngine::start(adapter, 64).unwrap();
        let _adapter_back = engine.stop();
    }
}
