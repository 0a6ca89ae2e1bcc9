//! TouchPipeline: drives records through decoder, tracker and translator.
//!
//! The pipeline is synchronous.  One caller thread pulls records from a
//! [`RecordSource`] and every record is fully handled (including any key
//! emulation it triggers) before the next one is read.
//!
//! ```text
//! RecordSource ─► EventDecoder ─► TouchTracker ─► KeyActionTranslator ─► KeyEmulator
//!                                      ▲                  │
//!                                      └── purge_ended ◄──┘  (on every sync separator)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info};
use touchpad_core::{DecodeError, EventDecoder, EventRecord, TouchTracker, Transition};

use crate::application::translate_keys::{EmulationError, KeyActionTranslator};

/// Fatal pipeline errors.  Anything recoverable is absorbed by the tracker.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("key emulation failed: {0}")]
    Emulation(#[from] EmulationError),
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A blocking source of event records.
pub trait RecordSource {
    /// Blocks until the next record is available.
    ///
    /// Returns `Ok(None)` on a clean end of stream.
    fn next_record(&mut self) -> Result<Option<EventRecord>, PipelineError>;
}

/// Statistics for one [`TouchPipeline::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub records: u64,
    pub passes: u64,
    pub presses: u64,
    pub releases: u64,
}

/// Decoder, tracker and translator wired in lock-step.
pub struct TouchPipeline {
    decoder: EventDecoder,
    tracker: TouchTracker,
    translator: KeyActionTranslator,
    summary: RunSummary,
}

impl TouchPipeline {
    pub fn new(translator: KeyActionTranslator) -> Self {
        Self {
            decoder: EventDecoder::new(),
            tracker: TouchTracker::new(),
            translator,
            summary: RunSummary::default(),
        }
    }

    /// Handles one record.
    ///
    /// On a sync separator this runs one translation pass over every contact
    /// and then purges the ended ones.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Emulation`] if the key emulator fails.
    pub fn handle_record(&mut self, record: &EventRecord) -> Result<(), PipelineError> {
        self.summary.records += 1;

        let Some(event) = self.decoder.decode(record) else {
            return Ok(());
        };
        debug!(?event, "sub-event");

        if self.tracker.apply(event) == Transition::PassRequested {
            let pass = self.translator.run_pass(self.tracker.contacts_mut())?;
            self.summary.passes += 1;
            self.summary.presses += pass.presses as u64;
            self.summary.releases += pass.releases as u64;

            let purged = self.tracker.purge_ended();
            if !purged.is_empty() {
                debug!(?purged, "purged ended contacts");
            }
        }
        Ok(())
    }

    /// Pulls records from `source` until end of stream, an error, or
    /// `running` is cleared.
    ///
    /// `running` is checked before each read and again after it returns, so a
    /// record that arrives after shutdown was requested is dropped unhandled
    /// and no key is pressed behind the final release.  A read blocked on an
    /// idle device is not interrupted.
    ///
    /// # Errors
    ///
    /// Returns the first decode, I/O or emulation error.
    pub fn run(
        &mut self,
        source: &mut dyn RecordSource,
        running: &AtomicBool,
    ) -> Result<RunSummary, PipelineError> {
        while running.load(Ordering::Relaxed) {
            let Some(record) = source.next_record()? else {
                info!("end of event stream");
                break;
            };
            if !running.load(Ordering::Relaxed) {
                debug!(?record, "shutdown requested; dropping record");
                break;
            }
            self.handle_record(&record)?;
        }
        Ok(self.summary)
    }

    pub fn tracker(&self) -> &TouchTracker {
        &self.tracker
    }

    pub fn translator(&self) -> &KeyActionTranslator {
        &self.translator
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Arc;

    use touchpad_core::protocol::record::{
        ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_SLOT, ABS_MT_TRACKING_ID, EV_ABS,
        TRACKING_ID_END,
    };
    use touchpad_core::{Button, GeometryTable};

    use crate::application::translate_keys::{KeyEmulator, SlidePolicy};
    use crate::infrastructure::input_emulation::mock::MockKeyEmulator;

    /// Feeds a fixed list of results, then reports end of stream.
    struct ScriptedSource {
        items: VecDeque<Result<Option<EventRecord>, PipelineError>>,
    }

    impl ScriptedSource {
        fn records(records: &[(u16, u16, u32)]) -> Self {
            Self {
                items: records
                    .iter()
                    .map(|&(t, c, v)| Ok(Some(EventRecord::new(t, c, v))))
                    .collect(),
            }
        }
    }

    impl RecordSource for ScriptedSource {
        fn next_record(&mut self) -> Result<Option<EventRecord>, PipelineError> {
            self.items.pop_front().unwrap_or(Ok(None))
        }
    }

    fn pipeline(emulator: Arc<MockKeyEmulator>) -> TouchPipeline {
        let table = GeometryTable::new(vec![Button::circle("a", 726, 296, 20)]).unwrap();
        TouchPipeline::new(KeyActionTranslator::new(table, emulator, SlidePolicy::PressOnly))
    }

    const TOUCH_A: [(u16, u16, u32); 5] = [
        (EV_ABS, ABS_MT_SLOT, 0),
        (EV_ABS, ABS_MT_TRACKING_ID, 12),
        (EV_ABS, ABS_MT_POSITION_X, 726),
        (EV_ABS, ABS_MT_POSITION_Y, 296),
        (0, 0, 0),
    ];

    #[test]
    fn test_no_pass_runs_before_sync_separator() {
        // Arrange
        let emulator = Arc::new(MockKeyEmulator::new());
        let mut p = pipeline(emulator.clone());

        // Act
        for &(t, c, v) in &TOUCH_A[..4] {
            p.handle_record(&EventRecord::new(t, c, v)).unwrap();
        }

        // Assert
        assert!(emulator.presses.lock().unwrap().is_empty());
        assert_eq!(p.summary().passes, 0);
        assert_eq!(p.tracker().len(), 1);
    }

    #[test]
    fn test_run_presses_then_releases_and_purges() {
        let emulator = Arc::new(MockKeyEmulator::new());
        let mut p = pipeline(emulator.clone());
        let mut script = TOUCH_A.to_vec();
        script.push((EV_ABS, ABS_MT_TRACKING_ID, TRACKING_ID_END));
        script.push((0, 0, 0));
        let mut source = ScriptedSource::records(&script);

        let summary = p.run(&mut source, &AtomicBool::new(true)).unwrap();

        assert_eq!(*emulator.presses.lock().unwrap(), vec!["a"]);
        assert_eq!(*emulator.releases.lock().unwrap(), vec!["a"]);
        assert_eq!(
            summary,
            RunSummary {
                records: 7,
                passes: 2,
                presses: 1,
                releases: 1
            }
        );
        assert!(p.tracker().is_empty());
    }

    #[test]
    fn test_run_stops_immediately_when_not_running() {
        let emulator = Arc::new(MockKeyEmulator::new());
        let mut p = pipeline(emulator);
        let mut source = ScriptedSource::records(&TOUCH_A);

        let summary = p.run(&mut source, &AtomicBool::new(false)).unwrap();

        assert_eq!(summary.records, 0);
        assert_eq!(source.items.len(), 5);
    }

    /// Clears `running` while handing out the record at index `stop_at`,
    /// the way a signal lands while `read` is blocked.
    struct StopDuring {
        inner: ScriptedSource,
        running: Arc<AtomicBool>,
        stop_at: usize,
        served: usize,
    }

    impl RecordSource for StopDuring {
        fn next_record(&mut self) -> Result<Option<EventRecord>, PipelineError> {
            if self.served == self.stop_at {
                self.running.store(false, Ordering::Relaxed);
            }
            self.served += 1;
            self.inner.next_record()
        }
    }

    #[test]
    fn test_record_read_after_shutdown_is_not_handled() {
        // Arrange: shutdown arrives while the sync separator is being read.
        let emulator = Arc::new(MockKeyEmulator::new());
        let mut p = pipeline(emulator.clone());
        let running = Arc::new(AtomicBool::new(true));
        let mut source = StopDuring {
            inner: ScriptedSource::records(&TOUCH_A),
            running: Arc::clone(&running),
            stop_at: 4,
            served: 0,
        };

        // Act
        let summary = p.run(&mut source, &running).unwrap();

        // Assert
        assert!(emulator.presses.lock().unwrap().is_empty());
        assert!(!emulator.is_pressed("a"));
        assert_eq!(summary.records, 4);
        assert_eq!(summary.passes, 0);
    }

    #[test]
    fn test_source_error_aborts_run() {
        let emulator = Arc::new(MockKeyEmulator::new());
        let mut p = pipeline(emulator);
        let mut source = ScriptedSource::records(&TOUCH_A[..2]);
        source.items.push_back(Err(PipelineError::Decode(DecodeError::InsufficientData {
            needed: 24,
            available: 3,
        })));
        source.items.push_back(Ok(Some(EventRecord::sync())));

        let err = p.run(&mut source, &AtomicBool::new(true)).unwrap_err();

        assert!(matches!(err, PipelineError::Decode(_)));
        assert_eq!(p.summary().records, 2);
    }

    #[test]
    fn test_emulator_failure_aborts_run() {
        let emulator = Arc::new(MockKeyEmulator::failing());
        let mut p = pipeline(emulator);
        let mut source = ScriptedSource::records(&TOUCH_A);

        let err = p.run(&mut source, &AtomicBool::new(true)).unwrap_err();

        assert!(matches!(err, PipelineError::Emulation(EmulationError::Platform(_))));
    }
}
