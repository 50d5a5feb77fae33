//! Progress lines on stdout.

use blueprint_core::{RunEvent, RunObserver};

/// Prints each run event on its own line as it happens.
pub struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn notify(&self, event: &RunEvent) {
        println!("{event}");
    }
}
