//! Utility functions

use log::*;
use std::borrow::Cow;

/// Convert a number to its ordinal form (first, second, ..., 21st, 112th)
pub fn nth(n: u32) -> Cow<'static, str> {
    let result = match n {
        smaller @ (0..=10) => Cow::Borrowed(match smaller {
            0 => "zeroth",
            1 => "first",
            2 => "second",
            3 => "third",
            4 => "fourth",
            5 => "fifth",
            6 => "sixth",
            7 => "seventh",
            8 => "eighth",
            9 => "ninth",
            10 => "tenth",
            _ => unreachable!(),
        }),
        teen if (11..=13).contains(&(teen % 100)) => Cow::Owned(format!("{teen}th")),
        larger => Cow::Owned(match larger % 10 {
            1 => format!("{larger}st"),
            2 => format!("{larger}nd"),
            3 => format!("{larger}rd"),
            _ => format!("{larger}th"),
        }),
    };
    debug!("Converted {} to ordinal: {}", n, result);
    result
}

/// Human readable duration: `4.2s`, `3m 7s`, `1h 12m`
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{seconds:.1}s")
    } else if seconds < 3600.0 {
        let whole = seconds as u64;
        format!("{}m {}s", whole / 60, whole % 60)
    } else {
        let whole = seconds as u64;
        format!("{}h {}m", whole / 3600, (whole % 3600) / 60)
    }
}
