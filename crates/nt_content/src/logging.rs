use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Install the global `fmt` subscriber writing to stderr. Later calls, and
/// calls made after another subscriber was set, are ignored.
pub fn init_logging(verbose: bool) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
        assert!(tracing::dispatcher::has_been_set());
    }
}
