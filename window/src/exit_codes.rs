// exit_codes.rs - Process exit codes for the launcher

/// Window closed normally.
pub const OK: i32 = 0;
/// Unknown program, interrupted run, or the program stopped on a failure.
pub const FAILURE: i32 = 1;
