//! Fixed-layout screens for the station's small OLED panel.
//!
//! Every function here is a full repaint: clear the frame buffer, write the
//! screen's text blocks, flush. Nothing is retained between calls, so the
//! panel always reflects exactly the last render. Title lines use text size
//! 2, body lines size 1; long strings are truncated to fixed character
//! budgets so they never wrap off the panel.

use tappost_core::constants::{
    EVENT_NAME_DISPLAY_CHARS, STUDENT_NAME_DISPLAY_CHARS, UID_DISPLAY_CHARS,
};
use tappost_core::CardUid;
use tappost_hardware::Display;

/// Truncate text to a maximum number of characters.
///
/// # Examples
///
/// ```
/// use tappost_station::screen::truncate_text;
///
/// assert_eq!(truncate_text("Spring Gala", 5), "Sprin");
/// assert_eq!(truncate_text("Gala", 10), "Gala");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate text, appending an ellipsis when something was cut.
///
/// # Examples
///
/// ```
/// use tappost_station::screen::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Spring Gala", 10), "Spring Gal...");
/// assert_eq!(truncate_with_ellipsis("Gala", 10), "Gala");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", truncate_text(text, max_chars))
    } else {
        text.to_string()
    }
}

/// Registration-mode ready screen.
pub fn show_ready<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(2);
    display.set_cursor(0, 0);
    display.write_line("Ready");
    display.set_text_size(1);
    display.set_cursor(0, 24);
    display.write_line("Tap card to");
    display.set_cursor(0, 40);
    display.write_line("register...");
    display.flush();
}

/// Card detected in registration mode, submission in flight.
pub fn show_sending<D: Display>(display: &mut D, uid: &CardUid) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 0);
    display.write_line("Card Detected!");
    display.write_line("");
    display.write_line("UID:");
    display.write_line(&truncate_text(uid.as_str(), UID_DISPLAY_CHARS));
    display.write_line("");
    display.write_line("Sending...");
    display.flush();
}

/// Card submitted; an administrator activates it out-of-band.
pub fn show_waiting<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 10);
    display.write_line("Card sent!");
    display.write_line("");
    display.write_line("Admin: activate");
    display.write_line("in browser");
    display.flush();
}

/// Two-line error screen used by registration mode.
pub fn show_error<D: Display>(display: &mut D, line1: &str, line2: &str) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 20);
    display.write_line(line1);
    display.write_line(line2);
    display.flush();
}

/// Attendance mode with nothing loaded.
pub fn show_no_event<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 10);
    display.write_line("No event found");
    display.write_line("");
    display.write_line("Press button to");
    display.write_line("fetch event");
    display.flush();
}

/// Event lookup in flight.
pub fn show_fetching_event<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 20);
    display.write_line("Fetching event");
    display.write_line("from server...");
    display.flush();
}

/// Attendance ready screen, naming the loaded event.
pub fn show_attendance_ready<D: Display>(display: &mut D, event_name: &str) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 0);
    display.write_line("Ready:");
    display.write_line("");
    display.set_text_size(2);
    display.write_line(&truncate_with_ellipsis(event_name, EVENT_NAME_DISPLAY_CHARS));
    display.set_text_size(1);
    display.write_line("");
    display.write_line("Tap card to check in");
    display.flush();
}

/// Check-in call in flight for a tapped card.
pub fn show_checking_in<D: Display>(display: &mut D, uid: &CardUid) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 10);
    display.write_line("Card detected!");
    display.write_line("");
    display.write_line("UID:");
    display.write_line(&truncate_text(uid.as_str(), UID_DISPLAY_CHARS));
    display.write_line("");
    display.write_line("Checking in...");
    display.flush();
}

/// Welcome screen after a successful check-in.
pub fn show_welcome<D: Display>(display: &mut D, student_name: &str) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 10);
    display.write_line("Welcome!");
    display.write_line("");
    display.set_text_size(2);
    display.write_line(&truncate_text(student_name, STUDENT_NAME_DISPLAY_CHARS));
    display.flush();
}

/// One-line error screen used by attendance mode.
pub fn show_attendance_error<D: Display>(display: &mut D, message: &str) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 20);
    display.write_line("Error:");
    display.write_line(message);
    display.flush();
}

/// Provisioning portal instructions shown while waiting for credentials.
pub fn show_portal<D: Display>(display: &mut D, ap_name: &str) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 0);
    display.write_line("Network Setup Mode");
    display.write_line("");
    display.write_line("1. Connect phone to:");
    display.set_text_size(2);
    display.write_line(ap_name);
    display.set_text_size(1);
    display.write_line("");
    display.write_line("2. Follow popup to");
    display.write_line("   select your network");
    display.flush();
}

/// Uplink attached, station about to go ready.
pub fn show_connected<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(2);
    display.set_cursor(0, 0);
    display.write_line("Network OK!");
    display.set_text_size(1);
    display.set_cursor(0, 24);
    display.write_line("Connected!");
    display.flush();
}

/// Provisioning failed; the device will restart.
pub fn show_provision_failed<D: Display>(display: &mut D) {
    display.clear();
    display.set_text_size(1);
    display.set_cursor(0, 20);
    display.write_line("Network failed");
    display.write_line("Restarting...");
    display.flush();
}
