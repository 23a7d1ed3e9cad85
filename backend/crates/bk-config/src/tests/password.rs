use crate::Config;
use crate::tests::{EnvGuard, setup_valid_env};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_small_but_valid_argon2_params_when_validate_then_ok() {
    let (_temp, _dir, _secret) = setup_valid_env();
    let _memory = EnvGuard::set("BK_PASSWORD_MEMORY_KIB", "1024");
    let _iterations = EnvGuard::set("BK_PASSWORD_ITERATIONS", "1");

    let result = Config::load().unwrap().validate();

    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_memory_below_lane_minimum_when_validate_then_error() {
    let (_temp, _dir, _secret) = setup_valid_env();
    let _memory = EnvGuard::set("BK_PASSWORD_MEMORY_KIB", "16");
    let _parallelism = EnvGuard::set("BK_PASSWORD_PARALLELISM", "4");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("password.memory_kib"));
}

#[test]
#[serial]
fn given_zero_iterations_when_validate_then_error() {
    let (_temp, _dir, _secret) = setup_valid_env();
    let _iterations = EnvGuard::set("BK_PASSWORD_ITERATIONS", "0");

    let result = Config::load().unwrap().validate();

    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("password.iterations"));
}
