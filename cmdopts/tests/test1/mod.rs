//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Command parser regression tests, script #1: the basic registry with
// the strict missing-argument policy.
//

use fqa::testing::{run_test, run_test_with_checker, TestPlan};

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

const TEST1_USAGE: &str = "\
Usage:  test1 [-1|--one] [-2|--two] [-A|--arg ARG] [-?|--help] [--usage]
        FILE...
";

fn plan(args: &[&str], expected_out: &str, expected_err: &str, expected_exit_code: i32) -> TestPlan {
    TestPlan {
        cmd: String::from("test1"),
        args: args.iter().map(|s| String::from(*s)).collect(),
        expected_out: String::from(expected_out),
        expected_err: String::from(expected_err),
        expected_exit_code,
    }
}

/// Only the exit code is pinned for these cases.
fn exit_code_test(args: &[&str], expected_exit_code: i32) {
    run_test_with_checker(plan(args, "", "", expected_exit_code), |_, output| {
        assert_eq!(output.status.code(), Some(expected_exit_code));
    });
}

#[test]
fn mutex_long_error() {
    // 1 & 2 are mutex options
    exit_code_test(&["--one", "--two"], 2);
}

#[test]
fn requires_arg_long() {
    // arg requires one or two
    exit_code_test(&["--arg", "foo"], 3);
}

#[test]
fn requires_arg_short() {
    exit_code_test(&["-A", "foo"], 3);
}

#[test]
fn help_long() {
    run_test(plan(&["--help"], TEST1_HELP, "", 0));
}

#[test]
fn help_short() {
    run_test(plan(&["-?"], TEST1_HELP, "", 0));
}

#[test]
fn usage() {
    run_test(plan(&["--usage"], TEST1_USAGE, "", 0));
}

#[test]
fn missing_arg() {
    // exit on missing arg detected
    exit_code_test(&["--one", "--arg"], 1);
}

#[test]
fn unknown_option_recovers_with_usage() {
    run_test(plan(
        &["-x"],
        TEST1_USAGE,
        "error:  unknown option specified (-x).\n",
        0,
    ));
}

#[test]
fn unknown_switch_recovers_with_usage() {
    run_test(plan(
        &["-x1A"],
        TEST1_USAGE,
        "error:  unknown switch 'x' specified.\n",
        0,
    ));
}

#[test]
fn positionals_alone_succeed() {
    run_test(plan(&["file1", "file2"], "", "", 0));
}
