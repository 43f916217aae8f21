use crate::utils::error::{ConfigError, Result};

/// Trigger length mirrored by the native sampling heap.
///
/// The allocator counts samples and forces a newline into its output stream
/// when the counter reaches `trigger_length + 1`. If the two sides disagree the
/// stream framing read by the profiler breaks, so any value read back from the
/// native side should go through [`SyncedThreshold::verify_rollover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncedThreshold {
    trigger_length: u64,
}

impl SyncedThreshold {
    pub const fn new(trigger_length: u64) -> Self {
        Self { trigger_length }
    }

    pub const fn trigger_length(self) -> u64 {
        self.trigger_length
    }

    /// The native rollover constant this threshold corresponds to.
    pub const fn rollover(self) -> u64 {
        self.trigger_length + 1
    }

    pub fn verify_rollover(self, native: u64) -> Result<()> {
        if native != self.rollover() {
            tracing::warn!(
                "native rollover {} does not match trigger length {} + 1",
                native,
                self.trigger_length
            );
            return Err(ConfigError::NativeDriftError {
                expected: self.rollover(),
                found: native,
            });
        }
        tracing::debug!("native rollover {} in sync", native);
        Ok(())
    }
}
