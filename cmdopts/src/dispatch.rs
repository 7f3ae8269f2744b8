//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// The dispatcher: owns the registry, the post-parse constraints and the
// exit-code policy, and turns one argument vector into one Execution.
// Diagnostics accumulate in the execution's two ordered line buffers;
// nothing is written to the process streams until the caller asks.
//

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{self, Write};

use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::help;
use crate::option::{OptId, OptionSpec, Registry};
use crate::scan::{self, Event, Value};

/// What to do when an option's required argument is absent.
#[derive(Debug, Clone, Copy)]
enum MissingArgPolicy {
    /// Report the diagnostic, skip the option, keep going.
    Lenient,
    /// Report, show usage and exit with the given status.
    Strict { status: i32 },
}

pub struct CommandParser {
    app_name: String,
    arg_help: Option<String>,
    registry: Registry,
    constraints: Vec<Constraint>,
    missing_arg: MissingArgPolicy,
    conflict_status: i32,
    allow_zero_args: bool,
}

impl CommandParser {
    /// Parser with the standard `-` and `--` switches.
    pub fn new(app_name: &str, arg_help: Option<&str>) -> Self {
        Self::with_switches(app_name, arg_help, '-', "--")
            .expect("default switches are valid")
    }

    /// Parser with caller-chosen switch characters.
    pub fn with_switches(
        app_name: &str,
        arg_help: Option<&str>,
        short_switch: char,
        long_switch: &str,
    ) -> Result<Self> {
        Ok(CommandParser {
            app_name: String::from(app_name),
            arg_help: arg_help.map(String::from),
            registry: Registry::new(short_switch, long_switch)?,
            constraints: Vec::new(),
            missing_arg: MissingArgPolicy::Lenient,
            conflict_status: 2,
            allow_zero_args: true,
        })
    }

    /// Register a titled section of options; the title becomes the help
    /// section heading.
    pub fn add_options(&mut self, description: &str, options: Vec<OptionSpec>) -> Result<()> {
        self.registry.add_section(description, options)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Fail with `status` when a required argument is missing, instead of
    /// the default report-and-ignore behavior.
    pub fn exit_on_missing_arg(&mut self, status: i32) {
        self.missing_arg = MissingArgPolicy::Strict { status };
    }

    /// Exit status used when a mutual-exclusion group is violated.
    pub fn conflict_status(&mut self, status: i32) {
        self.conflict_status = status;
    }

    /// Drop the automatic `-?`/`--help`/`--usage` handling.
    pub fn disable_autohelp(&mut self) {
        self.registry.disable_autohelp();
    }

    /// Print the usage summary instead of parsing an empty command line.
    pub fn require_args(&mut self) {
        self.allow_zero_args = false;
    }

    pub fn usage_text(&self) -> String {
        join_lines(help::usage_lines(
            &self.app_name,
            self.arg_help.as_deref(),
            &self.registry,
        ))
    }

    pub fn help_text(&self) -> String {
        join_lines(help::help_lines(
            &self.app_name,
            self.arg_help.as_deref(),
            &self.registry,
        ))
    }

    /// Parse one argument vector.  Never touches process state; the
    /// returned execution carries the exit code and both diagnostic
    /// buffers.
    pub fn run(&self, args: &[String]) -> Execution {
        let mut exec = Execution::new(&self.registry);

        if args.is_empty() && !self.allow_zero_args {
            self.push_usage(&mut exec);
            return self.finish(exec);
        }

        for event in scan::scan(&self.registry, args) {
            match event {
                Event::Matched(OptId::Help, _) => {
                    log::debug!("help requested");
                    exec.output = help::help_lines(
                        &self.app_name,
                        self.arg_help.as_deref(),
                        &self.registry,
                    );
                    return exec;
                }
                Event::Matched(OptId::Usage, _) => {
                    log::debug!("usage requested");
                    self.push_usage(&mut exec);
                    return exec;
                }
                Event::Matched(id, value) => exec.record(self.registry.spec(id), value),
                Event::Positional(operand) => exec.operands.push(operand),
                Event::Failed(err) => {
                    if let Error::MissingArgument { .. } = err {
                        match self.missing_arg {
                            MissingArgPolicy::Strict { status } => {
                                exec.errors.push(format!("error:  {}  Exiting.", err));
                                self.push_usage(&mut exec);
                                exec.exit_code = status;
                                return exec;
                            }
                            MissingArgPolicy::Lenient => {
                                exec.errors.push(format!("error:  {}  Ignored.", err));
                            }
                        }
                    } else if err.recoverable() {
                        exec.errors.push(format!("error:  {}", err));
                        self.push_usage(&mut exec);
                        // the scan stopped here; constraints still apply
                    } else {
                        exec.errors.push(format!("error:  {}  Exiting.", err));
                        self.push_usage(&mut exec);
                        exec.exit_code = 1;
                        return exec;
                    }
                }
            }
        }

        self.finish(exec)
    }

    /// Mutual exclusion first, then the registered constraints, in order.
    fn finish(&self, mut exec: Execution) -> Execution {
        for group in self.registry.exclusion_groups() {
            let active: Vec<&String> = group
                .iter()
                .filter(|name| exec.matched.contains(*name))
                .collect();
            if active.len() >= 2 {
                let err = Error::MutuallyExclusive(active[0].clone(), active[1].clone());
                exec.errors.push(format!("error:  {}  Exiting.", err));
                self.push_usage(&mut exec);
                exec.exit_code = self.conflict_status;
                return exec;
            }
        }

        for constraint in &self.constraints {
            if let Err(err) = constraint.check(&exec.matched) {
                exec.errors.push(format!("error:  {}  Exiting.", err));
                self.push_usage(&mut exec);
                exec.exit_code = constraint.status();
                return exec;
            }
        }

        exec
    }

    fn push_usage(&self, exec: &mut Execution) {
        if exec.output.is_empty() {
            exec.output = help::usage_lines(
                &self.app_name,
                self.arg_help.as_deref(),
                &self.registry,
            );
        }
    }
}

/// The outcome of one `run`: exit code, both diagnostic line buffers, and
/// the resolved option state keyed by canonical option name.
#[derive(Debug)]
pub struct Execution {
    pub exit_code: i32,
    output: Vec<String>,
    errors: Vec<String>,
    matched: HashSet<String>,
    values: HashMap<String, String>,
    pairs: HashMap<String, BTreeMap<String, String>>,
    operands: Vec<String>,
}

impl Execution {
    fn new(registry: &Registry) -> Self {
        Execution {
            exit_code: 0,
            output: Vec::new(),
            errors: Vec::new(),
            matched: HashSet::new(),
            values: registry.defaults().collect(),
            pairs: HashMap::new(),
            operands: Vec::new(),
        }
    }

    fn record(&mut self, spec: &OptionSpec, value: Value) {
        let name = spec.name();
        match value {
            Value::None => {}
            Value::Single(v) => {
                self.values.insert(name.clone(), v);
            }
            Value::Pairs(kv) => {
                self.pairs.entry(name.clone()).or_default().extend(kv);
            }
        }
        self.matched.insert(name);
    }

    /// Lines destined for stdout, in emission order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Lines destined for stderr, in emission order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Was the named option present?  Defaults do not count.
    pub fn matched(&self, name: &str) -> bool {
        self.matched.contains(name)
    }

    /// The option's argument, or its registered default.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Accumulated KEY=VALUE map for a key-value option.
    pub fn key_values(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.pairs.get(name)
    }

    /// Operands in command-line order.
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    /// Copy the diagnostic buffers to the given sinks, one line each.
    pub fn emit(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        for line in &self.output {
            writeln!(out, "{}", line)?;
        }
        for line in &self.errors {
            writeln!(err, "{}", line)?;
        }
        Ok(())
    }
}

fn join_lines(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
