// src/progress.rs
/// Lightweight progress reporting used by batch runs.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of creatures.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called before a creature's pages are fetched.
    fn item_start(&mut self, _name: &str) {}

    /// Called when every requested kind for a creature is extracted.
    fn item_done(&mut self, _name: &str) {}

    /// Called when a creature's main page could not be loaded.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one line per step to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    seen: usize,
    failed: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("# Start fetching");
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_start(&mut self, name: &str) {
        self.seen += 1;
        let failed = if self.failed > 0 { format!(" [Failed: {}]", self.failed) } else { s!() };
        eprintln!("= Fetching: {name} [{}/{}]{failed}", self.seen, self.total);
    }

    fn item_done(&mut self, _name: &str) {
        eprintln!("+ Parsed!");
    }

    fn item_failed(&mut self, name: &str, reason: &str) {
        self.failed += 1;
        eprintln!("- Failed: {name}: {reason}");
    }

    fn finish(&mut self) {
        eprintln!("# Done: {} ok, {} failed", self.seen - self.failed, self.failed);
    }
}
