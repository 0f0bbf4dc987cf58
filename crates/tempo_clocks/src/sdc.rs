//! Seeding the registry from SDC `create_clock` directives.
//!
//! Only `create_clock` is interpreted:
//!
//! ```text
//! create_clock -period <ns> [-name <clock>] [-waveform {rise fall}] <target>...
//! ```
//!
//! Targets may be bare wire names or `[get_ports ...]`/`[get_nets ...]`
//! substitutions. The reader is line-based (backslash continuation, `#`
//! comments) and does not attempt full Tcl interpretation. Problems with
//! the input are logged and the directive is skipped.

use crate::netlist::WireNames;
use crate::registry::ClockRegistry;
use tempo_common::is_half_period;
use tracing::{debug, warn};

/// Registers every clock target found in `source` into `registry`.
///
/// Targets are resolved through `design`. Returns the number of
/// (clock, wire) registrations made.
pub fn read_sdc(source: &str, design: &dyn WireNames, registry: &mut ClockRegistry) -> usize {
    let mut registered = 0;

    for line in join_continuation_lines(source).lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens = tokenize_sdc_line(trimmed);
        match tokens.first() {
            Some(&"create_clock") => {
                registered += apply_create_clock(&tokens[1..], design, registry);
            }
            Some(cmd) => debug!(command = %cmd, "ignoring SDC command"),
            None => {}
        }
    }

    registered
}

fn apply_create_clock(args: &[&str], design: &dyn WireNames, registry: &mut ClockRegistry) -> usize {
    let mut period: Option<f64> = None;
    let mut name: Option<&str> = None;
    let mut waveform: Option<(f64, f64)> = None;
    let mut targets: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "-period" => {
                i += 1;
                period = args.get(i).and_then(|v| v.parse().ok());
            }
            "-name" => {
                i += 1;
                name = args.get(i).copied();
            }
            "-waveform" => {
                i += 1;
                waveform = args.get(i).and_then(|v| parse_waveform(v));
            }
            "-comment" => i += 1,
            s if !s.starts_with('-') => targets.extend(s.split_whitespace()),
            _ => {}
        }
        i += 1;
    }

    let Some(period) = period.filter(|p| *p > 0.0) else {
        warn!("create_clock: missing or non-positive -period");
        return 0;
    };
    let Some(clock_name) = name.or_else(|| targets.first().copied()) else {
        warn!("create_clock: no -name and no target");
        return 0;
    };
    let (rising, falling) = waveform.unwrap_or((0.0, period / 2.0));
    if !is_half_period(period, rising, falling) {
        warn!(
            clock = clock_name,
            rising, falling, period, "create_clock: only 50% duty waveforms are supported"
        );
        return 0;
    }

    let mut registered = 0;
    for target in targets {
        match design.wire_by_name(target) {
            Some(wire) => {
                registry.add_clock_wire_with_waveform(clock_name, wire, period, rising, falling);
                registered += 1;
            }
            None => warn!(clock = clock_name, target, "create_clock: unknown target wire"),
        }
    }
    registered
}

fn parse_waveform(value: &str) -> Option<(f64, f64)> {
    let mut parts = value.split_whitespace();
    let rising = parts.next()?.parse().ok()?;
    let falling = parts.next()?.parse().ok()?;
    Some((rising, falling))
}

/// Joins backslash-continuation lines into single logical lines.
fn join_continuation_lines(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut continuation = false;

    for line in source.lines() {
        if continuation {
            result.push(' ');
        }
        let trimmed = line.trim_end();
        if let Some(stripped) = trimmed.strip_suffix('\\') {
            result.push_str(stripped);
            continuation = true;
        } else {
            result.push_str(trimmed);
            result.push('\n');
            continuation = false;
        }
    }

    result
}

/// Splits an SDC line into tokens. `{...}` and `"..."` group words;
/// `[get_ports x]`, `[get_nets x]` and `[get_pins x]` become `x`.
fn tokenize_sdc_line(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            ' ' | '\t' => {
                chars.next();
            }
            '{' | '"' => {
                let close = if ch == '{' { '}' } else { '"' };
                chars.next();
                let inner_start = chars.peek().map_or(line.len(), |&(i, _)| i);
                let mut end = inner_start;
                for (i, c) in chars.by_ref() {
                    if c == close {
                        break;
                    }
                    end = i + c.len_utf8();
                }
                tokens.push(&line[inner_start..end]);
            }
            '[' => {
                chars.next();
                let mut depth = 1;
                let mut end = line.len();
                for (i, c) in chars.by_ref() {
                    if c == '[' {
                        depth += 1;
                    } else if c == ']' {
                        depth -= 1;
                        if depth == 0 {
                            end = i;
                            break;
                        }
                    }
                }
                let inner = line[start + 1..end].trim();
                let object = ["get_ports", "get_nets", "get_pins"]
                    .iter()
                    .find_map(|cmd| inner.strip_prefix(cmd))
                    .map(|rest| rest.trim().trim_matches(|c| c == '{' || c == '}').trim());
                match object {
                    Some(name) if !name.is_empty() => tokens.push(name),
                    Some(_) => {}
                    None => tokens.push(inner),
                }
            }
            _ => {
                let mut end = line.len();
                for (i, c) in chars.by_ref() {
                    if c == ' ' || c == '\t' {
                        end = i;
                        break;
                    }
                }
                tokens.push(&line[start..end]);
            }
        }
    }

    tokens
}
