use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use defi_types::SwapError;

/// Held for the duration of one broadcast; a second acquire fails until it is dropped.
pub(crate) struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    pub(crate) fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, SwapError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).map_err(|_| SwapError::SwapInFlight)?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
