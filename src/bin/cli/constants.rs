pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
// Event poll interval; also how often finished requests get drawn.
pub const TICK_MS: u64 = 16;
pub const HELP_HINT: &str =
    "F5 run │ F6 help │ F7 submit │ F8 theme │ F9 hint │ F2 focus │ Ctrl+R reset │ Esc quit";
