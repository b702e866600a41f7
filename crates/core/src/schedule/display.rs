use alloc::string::String;
use core::fmt::{Display, Write};

use crate::schedule::types::Action;

/// Format a schedule in the compact text notation.
///
/// Actions are space separated on a single line and the output ends with
/// a newline, so it round-trips through `parse_schedule` without fixup.
#[must_use]
pub fn format_schedule<Object>(schedule: &[Action<Object>]) -> String
where
    Object: Display,
{
    let mut output = String::new();
    for (i, action) in schedule.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        let _ = write!(output, "{action}");
    }
    if !schedule.is_empty() {
        output.push('\n');
    }
    output
}
