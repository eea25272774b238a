//! Path notation conversion: Mac-style project paths <-> Windows drive paths.
//!
//! The project share is mounted at `/Volumes/Projects` on Mac and as drive `Z:`
//! on Windows, so the same file is referenced two ways in chat. This rewrites
//! whichever notation a message uses into the other one.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Mount point of the project share on Mac.
const MAC_PREFIX: &str = "/Volumes/Projects";

/// Drive letter of the same share on Windows.
const DRIVE_PREFIX: &str = "Z:";

const OVERRIDE_TRIGGER: &str = "123456";
const OVERRIDE_REPLY: &str = "hello sir";

/// Cached regex for Mac-style paths: the mount prefix plus the rest of the
/// path up to the first whitespace (paths with spaces truncate there).
fn mac_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/Volumes/Projects(\S+)").unwrap())
}

/// Cached regex for Windows-style paths: the drive marker, one or more
/// separators (mixed `\` and `/` both occur in pasted paths), then the rest.
fn drive_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Z:[\\/]+(\S+)").unwrap())
}

/// Rewrite every Mac-style project path in `text` to Windows drive notation,
/// or, when no Mac marker is present at all, every Windows drive path to Mac
/// notation. The two directions never both fire on one input. Afterwards, a
/// text containing `123456` is replaced wholesale with a fixed reply.
///
/// Returns `None` when the text comes out unchanged; callers must send
/// nothing in that case. Total over all inputs, no side effects.
pub fn convert_path(text: &str) -> Option<String> {
    let mut converted = if text.contains(MAC_PREFIX) {
        mac_path_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                format!("{}{}", DRIVE_PREFIX, caps[1].replace('/', "\\"))
            })
            .into_owned()
    } else if drive_path_regex().is_match(text) {
        drive_path_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                format!("{}/{}", MAC_PREFIX, caps[1].replace('\\', "/"))
            })
            .into_owned()
    } else {
        text.to_string()
    };

    if converted.contains(OVERRIDE_TRIGGER) {
        converted = OVERRIDE_REPLY.to_string();
    }

    if converted == text {
        None
    } else {
        Some(converted)
    }
}
