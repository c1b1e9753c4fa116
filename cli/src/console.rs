//! Terminal implementations of the notification and confirmation capabilities.

use std::io::{self, BufRead, Write};

use dpi_core::{Confirm, Level, Notification, Notifier};

/// Prints notifications to stderr, one line each.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}: {}", tag(notification.level), notification.message);
    }
}

fn tag(level: Level) -> &'static str {
    match level {
        Level::Success => "ok",
        Level::Info => "info",
        Level::Error => "error",
    }
}

/// Asks on stderr, reads `y`/`yes` from stdin. Anything else, including a
/// read error, means no.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("n"));
        assert!(!is_yes("yeah"));
    }

    #[test]
    fn levels_map_to_short_tags() {
        assert_eq!(tag(Level::Success), "ok");
        assert_eq!(tag(Level::Info), "info");
        assert_eq!(tag(Level::Error), "error");
    }
}
