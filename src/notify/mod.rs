//! Completion alert delivery.
//!
//! Scheduling and cancellation live with the persisted timer state (the
//! `alert_due`/`alert_fired` columns change in the same statement as the
//! phase). This module only delivers: fire-and-forget, no confirmation
//! consumed.

use crate::utils::colors::{BOLD, GREEN, RESET};

pub const ALERT_TITLE: &str = "Timer Complete";
pub const ALERT_BODY: &str = "Your work session timer has finished!";

pub trait Notifier {
    fn deliver(&self, title: &str, body: &str);
}

/// Terminal bell plus a highlighted line; the CLI's stand-in for a desktop
/// notification center.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn deliver(&self, title: &str, body: &str) {
        println!("\x07{}{}🔔 {}{} {}", GREEN, BOLD, title, RESET, body);
    }
}
