//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Tokenizer and classifier: walks the argument vector left to right,
// resolving long options, two-character shorts, joined key-value switches
// and short clusters against the registry.  The scan is a greedy
// single-pass state machine with one character of lookahead; it never
// backtracks.
//

use crate::error::{Error, Result};
use crate::option::{OptId, Registry};

/// Everything after this token is an operand.
const END_OF_OPTIONS: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    None,
    Single(String),
    Pairs(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Matched(OptId, Value),
    Positional(String),
    Failed(Error),
}

pub(crate) fn scan(registry: &Registry, args: &[String]) -> Vec<Event> {
    Scanner {
        registry,
        args,
        pos: 0,
        events: Vec::new(),
        done: false,
        only_operands: false,
    }
    .run()
}

struct Scanner<'a> {
    registry: &'a Registry,
    args: &'a [String],
    pos: usize,
    events: Vec<Event>,
    done: bool,
    only_operands: bool,
}

impl Scanner<'_> {
    fn run(mut self) -> Vec<Event> {
        while !self.done && self.pos < self.args.len() {
            let token = self.args[self.pos].clone();
            self.pos += 1;

            // empty arguments are silently ignored
            if token.is_empty() {
                continue;
            }

            if self.only_operands {
                self.operand(token);
                continue;
            }
            if token == END_OF_OPTIONS {
                self.only_operands = true;
                continue;
            }

            if let Some(body) = token.strip_prefix(self.registry.long_switch.as_str()) {
                if !body.is_empty() {
                    self.long_option(&token, body);
                    continue;
                }
            }

            let mut chars = token.chars();
            if chars.next() == Some(self.registry.short_switch) {
                let body: Vec<char> = chars.collect();
                match body.len() {
                    0 => self.operand(token),
                    1 => self.single_short(&token, body[0]),
                    _ => self.multi_short(&body),
                }
                continue;
            }

            self.operand(token);
        }
        self.events
    }

    fn operand(&mut self, token: String) {
        log::trace!("operand '{}'", token);
        self.events.push(Event::Positional(token));
    }

    fn matched(&mut self, id: OptId, value: Value) {
        log::trace!("matched {}", self.registry.spec(id).name());
        self.events.push(Event::Matched(id, value));
    }

    /// Unrecoverable-for-the-scan errors stop token processing.
    fn fail(&mut self, err: Error) {
        log::debug!("scan stopped: {}", err);
        self.events.push(Event::Failed(err));
        self.done = true;
    }

    /// A missing argument is reported but does not stop the scan; the
    /// dispatcher decides whether it is fatal.
    fn missing_argument(&mut self, id: OptId) {
        let spec = self.registry.spec(id);
        self.events.push(Event::Failed(Error::MissingArgument {
            option: self.registry.switch_label(spec),
            placeholder: String::from(spec.placeholder_or_default()),
        }));
    }

    fn next_token(&mut self) -> Option<String> {
        if self.pos < self.args.len() {
            let arg = self.args[self.pos].clone();
            self.pos += 1;
            Some(arg)
        } else {
            None
        }
    }

    fn long_option(&mut self, token: &str, body: &str) {
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let id = match self.registry.lookup_long(name) {
            Some(id) => id,
            None => return self.fail(Error::UnknownOption(String::from(token))),
        };
        let spec = self.registry.spec(id);

        if !spec.takes_value {
            if inline.is_some() {
                log::debug!("ignoring value attached to switch {}", token);
            }
            return self.matched(id, Value::None);
        }

        let raw = match inline {
            Some("") => return self.missing_argument(id),
            Some(value) => Some(String::from(value)),
            None => self.next_token(),
        };
        match raw {
            Some(raw) if spec.key_values => self.key_value_argument(id, &raw),
            Some(raw) => self.matched(id, Value::Single(raw)),
            None => self.missing_argument(id),
        }
    }

    fn single_short(&mut self, token: &str, c: char) {
        let id = match self.registry.lookup_short(c) {
            Some(id) => id,
            None => return self.fail(Error::UnknownOption(String::from(token))),
        };
        let spec = self.registry.spec(id);

        if spec.key_values {
            if !spec.can_split {
                return self.missing_argument(id);
            }
            return match self.next_token() {
                Some(raw) => self.key_value_argument(id, &raw),
                None => self.missing_argument(id),
            };
        }
        if spec.takes_value {
            return match self.next_token() {
                Some(arg) => self.matched(id, Value::Single(arg)),
                None => self.missing_argument(id),
            };
        }
        self.matched(id, Value::None);
    }

    fn multi_short(&mut self, body: &[char]) {
        // a joined switch takes the whole token remainder as its value
        if let Some(id) = self.registry.lookup_short(body[0]) {
            if self.registry.spec(id).key_values {
                let raw: String = body[1..].iter().collect();
                return self.key_value_argument(id, &raw);
            }
        }
        self.cluster(body);
    }

    /// Combined short switches, e.g. `-12`.  Argument options consume the
    /// token remainder unless the remainder itself starts with a
    /// registered switch, which is the ambiguous combination case.
    fn cluster(&mut self, body: &[char]) {
        let mut idx = 0;
        while idx < body.len() {
            let c = body[idx];
            let id = match self.registry.lookup_short(c) {
                Some(id) => id,
                None => return self.fail(Error::UnknownSwitch(c)),
            };
            let spec = self.registry.spec(id);

            if spec.key_values {
                // joined switches are only recognized leading a token
                return self.fail(Error::UnknownSwitch(c));
            }
            if !spec.takes_value {
                self.matched(id, Value::None);
                idx += 1;
                continue;
            }

            let rest: String = body[idx + 1..].iter().collect();
            if rest.is_empty() {
                match self.next_token() {
                    Some(arg) => self.matched(id, Value::Single(arg)),
                    None => self.missing_argument(id),
                }
            } else if self.registry.lookup_short(body[idx + 1]).is_some() {
                self.fail(Error::InvalidCombination(body.iter().collect()));
            } else {
                self.matched(id, Value::Single(rest));
            }
            return;
        }
    }

    fn key_value_argument(&mut self, id: OptId, raw: &str) {
        match parse_pairs(raw) {
            Ok(pairs) => self.matched(id, Value::Pairs(pairs)),
            Err(err) => self.fail(err),
        }
    }
}

/// Split a KEY=VALUE[,KEY=VALUE...] argument.  Malformed pieces are
/// rejected eagerly; nothing is dropped on the floor.
fn parse_pairs(raw: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for piece in raw.split(',') {
        match piece.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                pairs.push((String::from(key), String::from(value)));
            }
            _ => return Err(Error::MalformedKeyValue(String::from(piece))),
        }
    }
    Ok(pairs)
}
