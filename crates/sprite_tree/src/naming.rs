use std::sync::LazyLock;

use regex::Regex;

static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+$").expect("trailing number pattern is valid"));

/// Name for the state following `name`: the trailing number is bumped by one
/// and everything before it is kept verbatim, so `WALK_3` becomes `WALK_4`.
/// A name without a trailing number gets `_0` appended.
pub fn next_state_name(name: &str) -> String {
    let Some(found) = TRAILING_NUMBER.find(name) else {
        return format!("{name}_0");
    };
    let stem = &name[..found.start()];
    let number: Option<u64> = found.as_str().parse().ok();
    match number.and_then(|n| n.checked_add(1)) {
        Some(next) => format!("{stem}{next}"),
        None => format!("{name}_0"),
    }
}
