use crate::constants::DEFAULT_SPEED;

/// Interpreter settings chosen by the host.
///
/// Colors and window size are the display's business, not the interpreter's.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Wrap sprites that run off the bottom of the screen back to the top.
    /// Some programs need this on (e.g. VERS), others off (e.g. BLITZ).
    pub wrap_y: bool,
    /// Instructions executed per 60Hz tick.
    pub speed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wrap_y: false,
            speed: DEFAULT_SPEED,
        }
    }
}
