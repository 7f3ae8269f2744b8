//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// test2 - regression program: the test1 registry plus the joined -D
// KEY=VALUE option, with the default lenient missing-argument policy.
//

use cmdopts::{CommandParser, Constraint, OptionSpec, PROJECT_NAME};
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use std::io;

fn build_parser() -> Result<CommandParser, cmdopts::Error> {
    let mut parser = CommandParser::new("test1", Some("FILE..."));
    parser.add_options(
        &gettext("options"),
        vec![
            OptionSpec::flag('1', "one", &gettext("option one description")).group("12"),
            OptionSpec::flag('2', "two", &gettext("option two description")).group("12"),
            OptionSpec::with_value('A', "arg", "ARG", &gettext("option arg description")),
            OptionSpec::key_values('D', "KEY=VALUE[,KEY=VALUE...]", &gettext("joined description"))
                .can_split(true),
        ],
    )?;
    parser.add_constraint(Constraint::requires_any(3, "arg", &["one", "two"]));
    parser.conflict_status(2);
    Ok(parser)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setlocale(LocaleCategory::LcAll, "");
    textdomain(PROJECT_NAME)?;
    bind_textdomain_codeset(PROJECT_NAME, "UTF-8")?;
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let parser = build_parser()?;
    let exec = parser.run(&args);
    exec.emit(&mut io::stdout(), &mut io::stderr())?;

    std::process::exit(exec.exit_code)
}
