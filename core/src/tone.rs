use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::devices::Speaker;

/// Whether a tone should currently be playing.
///
/// The interpreter flips this from `tick`; whatever produces the sound keeps a
/// clone and polls `is_playing`, possibly from its own thread.
#[derive(Clone, Default)]
pub struct ToneFlag {
    playing: Arc<AtomicBool>,
}

impl ToneFlag {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Speaker for ToneFlag {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    fn start(&mut self) {
        debug!("tone on");
        self.playing.store(true, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        debug!("tone off");
        self.playing.store(false, Ordering::Relaxed);
    }
}
