//
// Copyright (c) 2024 Jeff Garzik
//
// This file is part of the cmdopts-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Command parser regression tests, script #2: adds the joined -D option
// and the lenient missing-argument policy.
//

use fqa::testing::{run_test, run_test_with_checker, TestPlan};

const TEST2_MISSING_ARG: &str = "error:  option --arg requires parameter 'ARG'.  Ignored.\n";

const TEST2_MUTEX_ERROR: &str = "error:  cannot specify both 'one' and 'two'.  Exiting.\n";

const TEST2_INVALID_COMBO_ERROR: &str = "error:  invalid option combination 'A1'.\n";

const TEST2_UNKNOWN_COMBO_SWITCH: &str = "error:  unknown switch 'x' specified.\n";

const TEST2_UNKNOWN_COMBO_SWITCH2: &str = "error:  unknown switch 'D' specified.\n";

const TEST2_UNKNOWN_OPTION: &str = "error:  unknown option specified (-x).\n";

const TEST2_USAGE: &str = "\
Usage:  test1 [-1|--one] [-2|--two] [-A|--arg ARG]
        [-DKEY=VALUE[,KEY=VALUE...]] [-?|--help] [--usage] FILE...
";

fn plan(args: &[&str], expected_out: &str, expected_err: &str, expected_exit_code: i32) -> TestPlan {
    TestPlan {
        cmd: String::from("test2"),
        args: args.iter().map(|s| String::from(*s)).collect(),
        expected_out: String::from(expected_out),
        expected_err: String::from(expected_err),
        expected_exit_code,
    }
}

#[test]
fn missing_arg_is_ignored() {
    // same command line as script #1, but the parse keeps going
    run_test_with_checker(plan(&["--one", "--arg"], "", TEST2_MISSING_ARG, 0), |_, output| {
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8_lossy(&output.stderr), TEST2_MISSING_ARG);
    });
}

#[test]
fn mutex_short_error() {
    run_test(plan(&["-12"], TEST2_USAGE, TEST2_MUTEX_ERROR, 2));
}

#[test]
fn invalid_combo() {
    // they're backwards: the argument text is itself a switch
    run_test(plan(&["-A1"], TEST2_USAGE, TEST2_INVALID_COMBO_ERROR, 0));
}

#[test]
fn unknown_combo_switch() {
    run_test(plan(&["-x1A"], TEST2_USAGE, TEST2_UNKNOWN_COMBO_SWITCH, 0));
}

#[test]
fn unknown_option() {
    run_test(plan(&["-x"], TEST2_USAGE, TEST2_UNKNOWN_OPTION, 0));
}

#[test]
fn unknown_joined_switch() {
    run_test(plan(&["-1D"], TEST2_USAGE, TEST2_UNKNOWN_COMBO_SWITCH2, 0));
}

#[test]
fn joined_values_parse_silently() {
    run_test(plan(&["--one", "-Da=1,b=2", "file"], "", "", 0));
}

#[test]
fn malformed_joined_value_is_fatal() {
    run_test(plan(
        &["-Dbogus"],
        TEST2_USAGE,
        "error:  malformed KEY=VALUE pair 'bogus' specified.  Exiting.\n",
        1,
    ));
}
