//! Touchstone reader.
//!
//! Accepts version 1 files and the version 2 keywords that matter for
//! S-parameter data. Numbers are read as one token stream, so line wrapping
//! of wide matrices does not matter.

use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use ndarray::{Array1, Array3};
use num_complex::Complex64;
use regex::Regex;
use stouchtool_core::domain::{DataFormat, Frequency, FrequencyUnit, Network};
use tracing::{debug, trace};

use super::TouchstoneError;

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.s(\d+)p$").expect("extension pattern is valid"));

/// Port count encoded in a `.sNp` file name.
pub fn ports_from_path(path: &Path) -> Result<usize, TouchstoneError> {
    let name = path.to_string_lossy();
    EXTENSION
        .captures(&name)
        .and_then(|c| c[1].parse::<usize>().ok())
        .filter(|&n| n > 0)
        .ok_or_else(|| TouchstoneError::BadExtension {
            name: name.into_owned(),
        })
}

/// Parsed `# <unit> <parameter> <format> R <z0>` line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OptionLine {
    unit: FrequencyUnit,
    format: DataFormat,
    z0: f64,
}

impl Default for OptionLine {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::GHz,
            format: DataFormat::Ma,
            z0: 50.0,
        }
    }
}

impl OptionLine {
    fn parse(body: &str, line: usize) -> Result<Self, TouchstoneError> {
        let bad = |reason: String| TouchstoneError::BadOptionLine { line, reason };
        let mut options = Self::default();
        let mut tokens = body.split_whitespace();

        while let Some(token) = tokens.next() {
            let lower = token.to_ascii_lowercase();
            match lower.as_str() {
                "hz" | "khz" | "mhz" | "ghz" | "thz" => {
                    options.unit = FrequencyUnit::from_str(&lower).map_err(|e| bad(e.to_string()))?;
                }
                "ri" | "ma" | "db" => {
                    options.format = DataFormat::from_str(&lower).map_err(|e| bad(e.to_string()))?;
                }
                "s" => {}
                "y" | "z" | "h" | "g" => {
                    return Err(TouchstoneError::Unsupported {
                        what: "network parameter",
                        value: token.to_uppercase(),
                    });
                }
                "r" => {
                    let value = tokens
                        .next()
                        .ok_or_else(|| bad("R without a reference impedance".into()))?;
                    options.z0 = value
                        .parse()
                        .map_err(|_| bad(format!("'{value}' is not an impedance")))?;
                }
                _ => return Err(bad(format!("unknown option '{token}'"))),
            }
        }
        Ok(options)
    }

    fn decode(&self, a: f64, b: f64) -> Complex64 {
        match self.format {
            DataFormat::Ri => Complex64::new(a, b),
            DataFormat::Ma => Complex64::from_polar(a, b.to_radians()),
            DataFormat::Db => Complex64::from_polar(10f64.powf(a / 20.0), b.to_radians()),
        }
    }
}

/// Everything collected from the text before the numbers are decoded.
#[derive(Debug, Default)]
struct RawFile {
    comments: Vec<String>,
    options: Option<OptionLine>,
    values: Vec<f64>,
    ports_keyword: Option<usize>,
    order_12_21: bool,
    declared_frequencies: Option<usize>,
    reference: Vec<f64>,
}

/// Parse Touchstone text. `ports` comes from the file extension and may be
/// overridden by a `[Number of Ports]` keyword.
pub fn parse_touchstone(text: &str, ports: usize) -> Result<Network, TouchstoneError> {
    let raw = scan(text)?;
    let ports = raw.ports_keyword.unwrap_or(ports);
    let options = raw.options.unwrap_or_default();
    debug!(ports, ?options, values = raw.values.len(), "Scanned Touchstone text");

    let per_point = ports
        .checked_mul(ports)
        .and_then(|entries| entries.checked_mul(2))
        .and_then(|values| values.checked_add(1))
        .ok_or_else(|| TouchstoneError::Unsupported {
            what: "port count",
            value: ports.to_string(),
        })?;
    let mut freqs = Vec::new();
    let mut pos = 0;
    while pos < raw.values.len() {
        let f = raw.values[pos];
        // Two-port files may append noise parameters, which restart the sweep.
        if ports == 2 && freqs.last().is_some_and(|&last| f * options.unit.multiplier() <= last) {
            trace!(at = pos, "Noise block detected");
            break;
        }
        if raw.values.len() - pos < per_point {
            return Err(TouchstoneError::Truncated {
                extra: raw.values.len() - pos,
                ports,
            });
        }
        freqs.push(f * options.unit.multiplier());
        pos += per_point;
    }

    if freqs.is_empty() {
        return Err(TouchstoneError::NoData);
    }
    if let Some(declared) = raw.declared_frequencies {
        if declared != freqs.len() {
            return Err(TouchstoneError::FrequencyCount {
                declared,
                found: freqs.len(),
            });
        }
    }

    let mut s = Array3::<Complex64>::zeros((freqs.len(), ports, ports));
    for (k, point) in raw.values.chunks_exact(per_point).take(freqs.len()).enumerate() {
        for (idx, pair) in point[1..].chunks_exact(2).enumerate() {
            let (out, input) = entry_position(idx, ports, raw.order_12_21);
            s[[k, out, input]] = options.decode(pair[0], pair[1]);
        }
    }

    let z0 = if raw.reference.is_empty() {
        Array1::from_elem(ports, Complex64::new(options.z0, 0.0))
    } else if raw.reference.len() == ports {
        raw.reference.iter().map(|&r| Complex64::new(r, 0.0)).collect()
    } else {
        return Err(TouchstoneError::BadKeyword {
            line: 0,
            reason: format!(
                "[Reference] lists {} impedances for {ports} ports",
                raw.reference.len()
            ),
        });
    };

    let frequency = Frequency::new(freqs, options.unit)?;
    Ok(Network::new(frequency, s, z0)?.with_comments(raw.comments))
}

/// Matrix position of the `idx`-th complex value of a frequency point.
fn entry_position(idx: usize, ports: usize, order_12_21: bool) -> (usize, usize) {
    if ports == 2 && !order_12_21 {
        // S11 S21 S12 S22
        [(0, 0), (1, 0), (0, 1), (1, 1)][idx]
    } else {
        (idx / ports, idx % ports)
    }
}

fn scan(text: &str) -> Result<RawFile, TouchstoneError> {
    let mut raw = RawFile::default();
    let mut awaiting_reference = 0usize;
    let mut in_noise = false;

    for (index, full_line) in text.lines().enumerate() {
        let line = index + 1;
        let (content, comment) = match full_line.split_once('!') {
            Some((content, comment)) => (content, Some(comment.trim())),
            None => (full_line, None),
        };
        if let Some(comment) = comment {
            if raw.values.is_empty() && !comment.is_empty() {
                raw.comments.push(comment.to_string());
            }
        }

        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        if awaiting_reference > 0 && !content.starts_with('[') {
            let before = raw.reference.len();
            parse_numbers(content, line, &mut raw.reference)?;
            awaiting_reference =
                awaiting_reference.saturating_sub(raw.reference.len() - before);
            continue;
        }

        if let Some(body) = content.strip_prefix('#') {
            // Only the first option line counts.
            if raw.options.is_none() {
                raw.options = Some(OptionLine::parse(body, line)?);
            }
            continue;
        }

        if let Some(rest) = content.strip_prefix('[') {
            let (keyword, argument) = rest.split_once(']').ok_or_else(|| {
                TouchstoneError::BadKeyword {
                    line,
                    reason: format!("unterminated keyword '{content}'"),
                }
            })?;
            let argument = argument.trim();
            match keyword.trim().to_ascii_lowercase().as_str() {
                "number of ports" => raw.ports_keyword = Some(parse_count(argument, line)?),
                "two-port data order" => raw.order_12_21 = argument == "12_21",
                "number of frequencies" => {
                    raw.declared_frequencies = Some(parse_count(argument, line)?);
                }
                "reference" => {
                    parse_numbers(argument, line, &mut raw.reference)?;
                    awaiting_reference = raw
                        .ports_keyword
                        .map_or(0, |p| p.saturating_sub(raw.reference.len()));
                }
                "matrix format" if !argument.eq_ignore_ascii_case("full") => {
                    return Err(TouchstoneError::Unsupported {
                        what: "matrix format",
                        value: argument.to_string(),
                    });
                }
                "noise data" => in_noise = true,
                "end" => break,
                other => trace!(keyword = other, "Ignoring keyword"),
            }
            continue;
        }

        if !in_noise {
            parse_numbers(content, line, &mut raw.values)?;
        }
    }

    Ok(raw)
}

fn parse_numbers(content: &str, line: usize, into: &mut Vec<f64>) -> Result<(), TouchstoneError> {
    for token in content.split_whitespace() {
        let value = token.parse::<f64>().map_err(|_| TouchstoneError::BadNumber {
            line,
            token: token.to_string(),
        })?;
        into.push(value);
    }
    Ok(())
}

fn parse_count(argument: &str, line: usize) -> Result<usize, TouchstoneError> {
    argument
        .parse()
        .map_err(|_| TouchstoneError::BadKeyword {
            line,
            reason: format!("'{argument}' is not a count"),
        })
}
