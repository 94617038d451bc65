//! Reader for textual road network descriptions
//!
//! A description is a sequence of lines:
//!
//! ```text
//! -- comments run from `--` to the end of the line
//! intersection A source 0.0 3 5.0
//! intersection B nostop 1.5
//! intersection C stoplight 1.0 10.0
//! intersection D sink
//! road A B 2.0
//! ```
//!
//! A malformed line is reported once through the world's diagnostics and
//! then skipped, so a single pass reports every problem in the file.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

use crate::simulation::{Diagnostics, SimTime, SimWorld};

/// Read a description file and build the world it describes
pub fn read_network_file(path: &Path, seed: u64) -> Result<SimWorld> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Can't open the file {}", path.display()))?;
    let mut world = SimWorld::new_with_seed(seed);
    read_network(&text, &mut world);
    Ok(world)
}

/// Add everything `text` describes to `world`, then check the result
pub fn read_network(text: &str, world: &mut SimWorld) {
    for text_line in text.lines() {
        let mut line = Line::new(text_line);
        let Some(command) = line.next_token() else {
            continue;
        };
        match command {
            "intersection" => read_intersection(&mut line, world),
            "road" => read_road(&mut line, world),
            _ => world
                .diagnostics_mut()
                .warn(format!("Unknown command: {}", command)),
        }
    }
    world.check_topology();
}

fn read_intersection(line: &mut Line<'_>, world: &mut SimWorld) {
    let Some(name) = line.next_name(world.diagnostics_mut(), || "Intersection ???".to_string())
    else {
        return;
    };
    if world.road_network.find_intersection(name).is_some() {
        world
            .diagnostics_mut()
            .warn(format!("Intersection redefined: {}", name));
        return;
    }
    let Some(kind) = line.next_name(world.diagnostics_mut(), || {
        format!("Intersection {} ???", name)
    }) else {
        return;
    };

    let added = match kind {
        "nostop" => {
            let Some(delay) =
                line.next_float(world.diagnostics_mut(), "Floating point delay", || {
                    format!("Intersection {} nostop", name)
                })
            else {
                return;
            };
            world.add_no_stop(name, delay)
        }
        "stoplight" => {
            let Some(delay) =
                line.next_float(world.diagnostics_mut(), "Floating point delay", || {
                    format!("Intersection {} stoplight", name)
                })
            else {
                return;
            };
            let Some(interval) = line.next_float(
                world.diagnostics_mut(),
                "Floating point light interval",
                || format!("Intersection {} stoplight {:?}", name, delay),
            ) else {
                return;
            };
            world.add_stop_light(name, delay, interval)
        }
        "source" => {
            let Some(start) =
                line.next_float(world.diagnostics_mut(), "Floating point start time", || {
                    format!("Intersection {} source", name)
                })
            else {
                return;
            };
            let Some(count) =
                line.next_int(world.diagnostics_mut(), "Integer vehicle count", || {
                    format!("Intersection {} source {:?}", name, start)
                })
            else {
                return;
            };
            let Some(interval) = line.next_float(
                world.diagnostics_mut(),
                "Floating point departure interval",
                || format!("Intersection {} source {:?} {}", name, start, count),
            ) else {
                return;
            };
            world.add_source(name, start, count, interval)
        }
        "sink" => world.add_sink(name),
        _ => {
            world
                .diagnostics_mut()
                .warn(format!("Intersection {} {}: unknown type", name, kind));
            return;
        }
    };

    match added {
        Ok(id) => {
            let description = world
                .road_network
                .get_intersection(id)
                .map(|i| i.to_string())
                .unwrap_or_default();
            line.expect_end(world.diagnostics_mut(), description);
        }
        Err(e) => world.diagnostics_mut().warn(e),
    }
}

fn read_road(line: &mut Line<'_>, world: &mut SimWorld) {
    let Some(source) = line.next_name(world.diagnostics_mut(), || "Road ???".to_string()) else {
        return;
    };
    let Some(destination) =
        line.next_name(world.diagnostics_mut(), || format!("Road {} ???", source))
    else {
        return;
    };

    let Some(source_id) = world.road_network.find_intersection(source) else {
        world.diagnostics_mut().warn(format!(
            "No such source intersection: Road {} {}",
            source, destination
        ));
        return;
    };
    let Some(destination_id) = world.road_network.find_intersection(destination) else {
        world.diagnostics_mut().warn(format!(
            "No such destination intersection: Road {} {}",
            source, destination
        ));
        return;
    };

    let Some(travel_time) =
        line.next_float(world.diagnostics_mut(), "Floating point travel time", || {
            format!("Road {} {}", source, destination)
        })
    else {
        return;
    };

    match world.add_road(source_id, destination_id, travel_time) {
        Ok(id) => {
            let description = world
                .road_network
                .get_road(id)
                .map(|r| r.to_string())
                .unwrap_or_default();
            line.expect_end(world.diagnostics_mut(), description);
        }
        Err(e) => world.diagnostics_mut().warn(e),
    }
}

/// The tokens of one line, with any trailing comment dropped
struct Line<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Line<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .split_whitespace()
            .take_while(|token| !token.starts_with("--"))
            .collect();
        Self { tokens, pos: 0 }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    /// Take the next token if `accept` likes it, otherwise report that
    /// `what` was expected in `context`
    fn next_matching(
        &mut self,
        diagnostics: &mut Diagnostics,
        accept: fn(&str) -> bool,
        what: &str,
        context: impl FnOnce() -> String,
    ) -> Option<&'a str> {
        match self.next_token() {
            Some(token) if accept(token) => Some(token),
            _ => {
                diagnostics.warn(format!("{} expected: {}", what, context()));
                None
            }
        }
    }

    fn next_name(
        &mut self,
        diagnostics: &mut Diagnostics,
        context: impl FnOnce() -> String,
    ) -> Option<&'a str> {
        self.next_matching(diagnostics, is_name, "Name", context)
    }

    fn next_float(
        &mut self,
        diagnostics: &mut Diagnostics,
        what: &str,
        context: impl FnOnce() -> String,
    ) -> Option<SimTime> {
        self.next_matching(diagnostics, is_float, what, context)?
            .parse()
            .ok()
    }

    fn next_int(
        &mut self,
        diagnostics: &mut Diagnostics,
        what: &str,
        context: impl FnOnce() -> String,
    ) -> Option<i32> {
        let token = self.next_matching(diagnostics, is_int, what, context)?;
        match token.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                diagnostics.warn(format!("Integer out of range: {}", token));
                None
            }
        }
    }

    /// Complain about anything left on the line after `entity`
    fn expect_end(&self, diagnostics: &mut Diagnostics, entity: impl fmt::Display) {
        if self.pos < self.tokens.len() {
            diagnostics.warn(format!(
                "{} followed unexpected by '{}'",
                entity,
                self.tokens[self.pos..].join(" ")
            ));
        }
    }
}

fn all_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}

fn is_name(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_int(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && all_digits(digits)
}

fn is_float(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    match body.split_once('.') {
        None => !body.is_empty() && all_digits(body),
        Some((whole, fraction)) => {
            all_digits(whole)
                && all_digits(fraction)
                && !(whole.is_empty() && fraction.is_empty())
        }
    }
}
