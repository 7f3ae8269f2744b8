//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{Error, Result};

/// A single recognized command-line option.  Immutable once registered
/// with the parser; match state lives in the per-run accumulator, not
/// here.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) long: Option<String>,
    pub(crate) short: Option<char>,
    pub(crate) takes_value: bool,
    pub(crate) placeholder: Option<String>,
    pub(crate) description: String,
    pub(crate) group: Option<String>,
    pub(crate) key_values: bool,
    pub(crate) can_split: bool,
    pub(crate) show_in_help: bool,
    pub(crate) default_value: Option<String>,
}

impl OptionSpec {
    fn base(short: Option<char>, long: Option<&str>, description: &str) -> Self {
        OptionSpec {
            long: long.map(String::from),
            short,
            takes_value: false,
            placeholder: None,
            description: String::from(description),
            group: None,
            key_values: false,
            can_split: true,
            show_in_help: true,
            default_value: None,
        }
    }

    /// A plain switch with both forms, e.g. `-1|--one`.
    pub fn flag(short: char, long: &str, description: &str) -> Self {
        Self::base(Some(short), Some(long), description)
    }

    /// A switch with only a long form, e.g. `--usage`.
    pub fn long_flag(long: &str, description: &str) -> Self {
        Self::base(None, Some(long), description)
    }

    /// An option requiring one argument, e.g. `-A|--arg ARG`.
    pub fn with_value(short: char, long: &str, placeholder: &str, description: &str) -> Self {
        let mut spec = Self::base(Some(short), Some(long), description);
        spec.takes_value = true;
        spec.placeholder = Some(String::from(placeholder));
        spec
    }

    /// A long-only option requiring one argument.
    pub fn long_value(long: &str, placeholder: &str, description: &str) -> Self {
        let mut spec = Self::base(None, Some(long), description);
        spec.takes_value = true;
        spec.placeholder = Some(String::from(placeholder));
        spec
    }

    /// A repeatable short-only option whose argument is a comma list of
    /// KEY=VALUE pairs joined to the switch, e.g. `-DKEY=VALUE`.  The
    /// pairs accumulate across occurrences; later keys overwrite earlier.
    pub fn key_values(short: char, placeholder: &str, description: &str) -> Self {
        let mut spec = Self::base(Some(short), None, description);
        spec.takes_value = true;
        spec.placeholder = Some(String::from(placeholder));
        spec.key_values = true;
        spec.can_split = false;
        spec
    }

    /// Place the option in a mutual-exclusion group.
    pub fn group(mut self, id: &str) -> Self {
        self.group = Some(String::from(id));
        self
    }

    /// Allow (or forbid) the argument to arrive as the next token instead
    /// of joined to the switch.
    pub fn can_split(mut self, yes: bool) -> Self {
        self.can_split = yes;
        self
    }

    /// Hide the option from generated help and usage.
    pub fn hidden(mut self) -> Self {
        self.show_in_help = false;
        self
    }

    /// Informational default, reported when the option was not matched.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(String::from(value));
        self
    }

    /// Canonical name: the long name, or the short char for short-only
    /// options.  This is the key used for match lookups and constraints.
    pub fn name(&self) -> String {
        match &self.long {
            Some(long) => long.clone(),
            None => self.short.map(String::from).unwrap_or_default(),
        }
    }

    pub(crate) fn placeholder_or_default(&self) -> &str {
        self.placeholder.as_deref().unwrap_or("<arg>")
    }
}

/// Identifies a registered option during scanning.  The two automatic
/// help options are not stored with the user sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptId {
    User(usize),
    Help,
    Usage,
}

/// The full option vocabulary: user sections in registration order plus
/// the automatic help section, with derived short/long lookup indices.
/// Read-only while a parse runs.
#[derive(Debug)]
pub(crate) struct Registry {
    pub(crate) short_switch: char,
    pub(crate) long_switch: String,
    specs: Vec<OptionSpec>,
    sections: Vec<(String, Range<usize>)>,
    short_index: HashMap<char, OptId>,
    long_index: HashMap<String, OptId>,
    groups: Vec<(String, Vec<usize>)>,
    pub(crate) autohelp: bool,
    help_spec: OptionSpec,
    usage_spec: OptionSpec,
}

impl Registry {
    pub(crate) fn new(short_switch: char, long_switch: &str) -> Result<Self> {
        if long_switch.chars().count() < 2 {
            return Err(Error::LongSwitchTooShort);
        }

        let help_spec = OptionSpec::flag('?', "help", "show this help message");
        let usage_spec = OptionSpec::long_flag("usage", "show brief usage message");

        let mut registry = Registry {
            short_switch,
            long_switch: String::from(long_switch),
            specs: Vec::new(),
            sections: Vec::new(),
            short_index: HashMap::new(),
            long_index: HashMap::new(),
            groups: Vec::new(),
            autohelp: true,
            help_spec,
            usage_spec,
        };
        registry.short_index.insert('?', OptId::Help);
        registry.long_index.insert(String::from("help"), OptId::Help);
        registry.long_index.insert(String::from("usage"), OptId::Usage);
        Ok(registry)
    }

    pub(crate) fn disable_autohelp(&mut self) {
        self.autohelp = false;
        self.short_index.remove(&'?');
        self.long_index.remove("help");
        self.long_index.remove("usage");
    }

    pub(crate) fn add_section(&mut self, description: &str, options: Vec<OptionSpec>) -> Result<()> {
        let start = self.specs.len();
        for spec in options {
            if spec.short.is_none() && spec.long.is_none() {
                return Err(Error::UnnamedOption);
            }

            let id = OptId::User(self.specs.len());
            if let Some(c) = spec.short {
                if self.short_index.contains_key(&c) {
                    return Err(Error::DuplicateShort(c));
                }
                self.short_index.insert(c, id);
            }
            if let Some(long) = &spec.long {
                if self.long_index.contains_key(long.as_str()) {
                    return Err(Error::DuplicateLong(long.clone()));
                }
                self.long_index.insert(long.clone(), id);
            }

            if let Some(group) = &spec.group {
                let next = self.specs.len();
                match self.groups.iter().position(|(name, _)| name == group) {
                    Some(slot) => {
                        let first = self.groups[slot].1[0];
                        if self.specs[first].takes_value != spec.takes_value {
                            return Err(Error::MixedGroup(group.clone()));
                        }
                        self.groups[slot].1.push(next);
                    }
                    None => self.groups.push((group.clone(), vec![next])),
                }
            }

            self.specs.push(spec);
        }
        self.sections
            .push((String::from(description), start..self.specs.len()));
        Ok(())
    }

    pub(crate) fn lookup_short(&self, c: char) -> Option<OptId> {
        self.short_index.get(&c).copied()
    }

    pub(crate) fn lookup_long(&self, name: &str) -> Option<OptId> {
        self.long_index.get(name).copied()
    }

    pub(crate) fn spec(&self, id: OptId) -> &OptionSpec {
        match id {
            OptId::User(n) => &self.specs[n],
            OptId::Help => &self.help_spec,
            OptId::Usage => &self.usage_spec,
        }
    }

    /// The switch form used in diagnostics: `--arg`, or `-D` for
    /// short-only options.
    pub(crate) fn switch_label(&self, spec: &OptionSpec) -> String {
        match &spec.long {
            Some(long) => format!("{}{}", self.long_switch, long),
            None => match spec.short {
                Some(c) => format!("{}{}", self.short_switch, c),
                None => String::new(),
            },
        }
    }

    /// Every visible option in registration order, automatic help options
    /// last: the order both renderers use.
    pub(crate) fn visible(&self) -> Vec<&OptionSpec> {
        let mut out: Vec<&OptionSpec> = self.specs.iter().filter(|s| s.show_in_help).collect();
        if self.autohelp {
            out.push(&self.help_spec);
            out.push(&self.usage_spec);
        }
        out
    }

    /// Help sections: user sections, then the automatic help section.
    pub(crate) fn help_sections(&self) -> Vec<(&str, Vec<&OptionSpec>)> {
        let mut out: Vec<(&str, Vec<&OptionSpec>)> = self
            .sections
            .iter()
            .map(|(desc, range)| {
                (
                    desc.as_str(),
                    self.specs[range.clone()]
                        .iter()
                        .filter(|s| s.show_in_help)
                        .collect(),
                )
            })
            .collect();
        if self.autohelp {
            out.push(("Help options", vec![&self.help_spec, &self.usage_spec]));
        }
        out
    }

    /// Mutual-exclusion groups in registration order, as canonical names.
    pub(crate) fn exclusion_groups(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.groups
            .iter()
            .map(|(_, members)| members.iter().map(|&n| self.specs[n].name()).collect())
    }

    pub(crate) fn defaults(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.specs.iter().filter_map(|spec| {
            spec.default_value
                .as_ref()
                .map(|value| (spec.name(), value.clone()))
        })
    }
}
