/// Exit codes of the clipsearch binary.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Any failed operation: clipboard, empty buffer, decoding, unknown browser,
/// browser launch, or configuration.
pub const FAILURE: i32 = 1;
