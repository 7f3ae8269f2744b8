//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Help and usage rendering.  Both renderers are pure functions of the
// registry and reproduce the classic two-block layout: a one-line
// synopsis wrapped on bracket groups, and a sectioned listing with the
// description column at a fixed offset.
//

use crate::option::Registry;

/// Column the usage synopsis wraps at, cutting after a bracket group.
const USAGE_WIDTH: usize = 72;
/// Hanging indent for continued usage lines.
const USAGE_INDENT: usize = 8;

/// Column where option descriptions start in the help listing.
const SWITCH_COLUMN: usize = 35;
/// Column the help listing wraps at, cutting on spaces.
const HELP_WIDTH: usize = 80;

pub(crate) fn usage_lines(
    app_name: &str,
    arg_help: Option<&str>,
    registry: &Registry,
) -> Vec<String> {
    let mut buf = format!("Usage:  {}", app_name);

    for spec in registry.visible() {
        buf.push_str(" [");
        if let Some(c) = spec.short {
            buf.push(registry.short_switch);
            buf.push(c);
            if spec.key_values {
                buf.push_str(spec.placeholder_or_default());
            } else if spec.long.is_some() {
                buf.push('|');
            }
        }
        if let Some(long) = &spec.long {
            buf.push_str(&registry.long_switch);
            buf.push_str(long);
        }
        if spec.takes_value && !spec.key_values {
            buf.push(' ');
            buf.push_str(spec.placeholder_or_default());
        }
        buf.push(']');
    }

    if let Some(arg_help) = arg_help {
        buf.push(' ');
        buf.push_str(arg_help);
    }

    wrap(&buf, ']', USAGE_WIDTH, USAGE_INDENT)
}

pub(crate) fn help_lines(
    app_name: &str,
    arg_help: Option<&str>,
    registry: &Registry,
) -> Vec<String> {
    let mut lines = Vec::new();

    let mut synopsis = format!("Usage:  {} [OPTION...]", app_name);
    if let Some(arg_help) = arg_help {
        synopsis.push(' ');
        synopsis.push_str(arg_help);
    }
    lines.push(synopsis);

    for (description, specs) in registry.help_sections() {
        lines.push(String::new());
        lines.push(format!("{}:", description));

        for spec in specs {
            let mut buf = String::from("  ");
            if let Some(c) = spec.short {
                buf.push(registry.short_switch);
                buf.push(c);
                if spec.long.is_some() {
                    buf.push_str(", ");
                }
            }
            if let Some(long) = &spec.long {
                buf.push_str(&registry.long_switch);
                buf.push_str(long);
            }
            if spec.takes_value {
                buf.push(if spec.long.is_some() { '=' } else { ' ' });
                buf.push_str(spec.placeholder_or_default());
            }

            if buf.len() >= SWITCH_COLUMN {
                buf.push(' ');
            }
            while buf.len() < SWITCH_COLUMN {
                buf.push(' ');
            }
            buf.push_str(&spec.description);

            lines.extend(wrap(&buf, ' ', HELP_WIDTH, SWITCH_COLUMN));
        }
    }

    lines
}

/// Multi-line formatting: break `text` at `cut_char` near `width`,
/// falling back to spaces, then to a hard chop; continuation lines get a
/// hanging indent and a correspondingly narrower width.
pub(crate) fn wrap(text: &str, cut_char: char, width: usize, indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line: Vec<char> = text.chars().collect();
    let mut lwidth = width;
    let mut first = true;

    while line.len() > lwidth {
        let c = line[lwidth];
        let cut;
        let kept: String;

        if c != cut_char {
            let found = (0..=lwidth)
                .rev()
                .find(|&j| line[j] == cut_char)
                .or_else(|| (0..=lwidth).rev().find(|&j| line[j] == ' '));
            cut = found.unwrap_or(lwidth - 1);
            kept = line[..=cut].iter().collect();
        } else if c.is_whitespace() {
            cut = lwidth;
            kept = line[..cut].iter().collect();
        } else {
            cut = lwidth + 1;
            kept = line[..cut].iter().collect();
        }

        lines.push(decorate(first, indent, kept));

        let rest: String = if cut + 1 < line.len() {
            line[cut + 1..].iter().collect()
        } else {
            String::new()
        };
        line = rest.trim().chars().collect();
        first = false;
        lwidth = width - indent;
    }

    lines.push(decorate(first, indent, line.iter().collect()));
    lines
}

fn decorate(first: bool, indent: usize, text: String) -> String {
    if first {
        text
    } else {
        format!("{}{}", " ".repeat(indent), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionSpec;

    const TEST1_USAGE: &str = "\
Usage:  test1 [-1|--one] [-2|--two] [-A|--arg ARG] [-?|--help] [--usage]
        FILE...
";

    const TEST2_USAGE: &str = "\
Usage:  test1 [-1|--one] [-2|--two] [-A|--arg ARG]
        [-DKEY=VALUE[,KEY=VALUE...]] [-?|--help] [--usage] FILE...
";

    const TEST1_HELP: &str = "\
Usage:  test1 [OPTION...] FILE...

options:
  -1, --one                        option one description
  -2, --two                        option two description
  -A, --arg=ARG                    option arg description

Help options:
  -?, --help                       show this help message
  --usage                          show brief usage message
";

    fn base_options() -> Vec<OptionSpec> {
        vec![
            OptionSpec::flag('1', "one", "option one description"),
            OptionSpec::flag('2', "two", "option two description"),
            OptionSpec::with_value('A', "arg", "ARG", "option arg description"),
        ]
    }

    fn registry(with_pairs: bool) -> Registry {
        let mut reg = Registry::new('-', "--").unwrap();
        let mut options = base_options();
        if with_pairs {
            options.push(OptionSpec::key_values(
                'D',
                "KEY=VALUE[,KEY=VALUE...]",
                "joined description",
            ));
        }
        reg.add_section("options", options).unwrap();
        reg
    }

    fn joined(lines: Vec<String>) -> String {
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    #[test]
    fn usage_matches_fixture() {
        let lines = usage_lines("test1", Some("FILE..."), &registry(false));
        assert_eq!(joined(lines), TEST1_USAGE);
    }

    #[test]
    fn usage_with_joined_option_matches_fixture() {
        let lines = usage_lines("test1", Some("FILE..."), &registry(true));
        assert_eq!(joined(lines), TEST2_USAGE);
    }

    #[test]
    fn help_matches_fixture() {
        let lines = help_lines("test1", Some("FILE..."), &registry(false));
        assert_eq!(joined(lines), TEST1_HELP);
    }

    #[test]
    fn hidden_options_are_omitted() {
        let mut reg = Registry::new('-', "--").unwrap();
        reg.add_section("options", vec![
            OptionSpec::flag('1', "one", "option one description"),
            OptionSpec::flag('s', "secret", "internal").hidden(),
        ])
        .unwrap();
        let usage = joined(usage_lines("prog", None, &reg));
        assert!(!usage.contains("secret"));
        let help = joined(help_lines("prog", None, &reg));
        assert!(!help.contains("secret"));
    }

    #[test]
    fn wrap_passes_short_text_through() {
        assert_eq!(wrap("hello", ']', 72, 8), vec![String::from("hello")]);
    }

    #[test]
    fn wrap_cuts_after_bracket_groups() {
        // 68 chars up to the last ']', then an operand past the width
        let text = format!("Usage:  prog {} OPERAND", "[-x|--example]".repeat(4));
        let lines = wrap(&text, ']', 72, 8);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(']'));
        assert_eq!(lines[1], "        OPERAND");
    }

    #[test]
    fn wrap_indents_continuations_against_narrower_width() {
        let word = "x".repeat(30);
        let text = format!("{w} {w} {w} {w}", w = word);
        let lines = wrap(&text, ' ', 80, 35);
        assert!(lines.len() >= 2);
        for line in &lines[1..] {
            assert!(line.starts_with(&" ".repeat(35)));
        }
    }
}
