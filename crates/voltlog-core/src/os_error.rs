use std::io;

/// `io::Error` text without the ` (os error N)` suffix std appends, which
/// leaves the plain strerror description.
pub fn describe(e: &io::Error) -> String {
    let text = e.to_string();
    if let Some(code) = e.raw_os_error() {
        if let Some(plain) = text.strip_suffix(&format!(" (os error {code})")) {
            return plain.to_owned();
        }
    }
    text
}
