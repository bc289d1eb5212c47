/// One measurement row for a core group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterSample {
    /// Instructions per cycle
    pub ipc: f64,
    /// LLC misses per second, with any `k` suffix already expanded
    pub misses_per_sec: f64,
    /// LLC occupancy in KB
    pub llc_kb: u64,
}

/// Outcome of classifying a single log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineClass {
    /// A core-range row whose three metric fields all parsed
    DataRow(CounterSample),
    /// A `TIME` section header (including the column title line)
    Header,
    /// Blank, too short, or not starting with a core range
    Ignored,
    /// A core-range row with an unparseable IPC, miss or LLC field
    Malformed,
}

/// Minimum number of whitespace separated fields in a data row.
const MIN_FIELDS: usize = 4;

/// Classifies one raw line of a counter log.
///
/// Fields after the fourth (memory bandwidth columns) are ignored.
///
/// # Examples
///
/// ```
/// use counter_log::{classify_line, CounterSample, LineClass};
///
/// let class = classify_line("     20-27    0.27      53k      9520     2.21       0.00");
/// assert_eq!(
///     class,
///     LineClass::DataRow(CounterSample { ipc: 0.27, misses_per_sec: 53000.0, llc_kb: 9520 })
/// );
/// assert_eq!(classify_line("TIME 2025-06-02 11:12:29"), LineClass::Header);
/// ```
pub fn classify_line(line: &str) -> LineClass {
    let line = line.trim();
    if line.is_empty() {
        return LineClass::Ignored;
    }
    if line.starts_with("TIME") {
        return LineClass::Header;
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS || !is_core_range(fields[0]) {
        return LineClass::Ignored;
    }

    let ipc = match fields[1].parse::<f64>() {
        Ok(v) => v,
        Err(_) => return LineClass::Malformed,
    };
    let misses_per_sec = match parse_misses(fields[2]) {
        Some(v) => v,
        None => return LineClass::Malformed,
    };
    let llc_kb = match fields[3].parse::<u64>() {
        Ok(v) => v,
        Err(_) => return LineClass::Malformed,
    };

    LineClass::DataRow(CounterSample {
        ipc,
        misses_per_sec,
        llc_kb,
    })
}

/// Returns true for fields of the form `<digits>-<digits>`, e.g. `20-27`.
pub fn is_core_range(field: &str) -> bool {
    match field.split_once('-') {
        Some((low, high)) => is_ascii_number(low) && is_ascii_number(high),
        None => false,
    }
}

fn is_ascii_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a miss count, expanding a trailing `k`/`K` to thousands.
fn parse_misses(field: &str) -> Option<f64> {
    let lower = field.to_ascii_lowercase();
    match lower.strip_suffix('k') {
        Some(thousands) => thousands.parse::<f64>().ok().map(|v| v * 1000.0),
        None => lower.parse::<f64>().ok(),
    }
}
