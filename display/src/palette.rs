use std::str::FromStr;

/// A 24-bit RGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn gray(level: u8) -> Self {
        Rgb(level, level, level)
    }

    fn bytes(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

/// Parses `R,G,B` with each channel in 0..=255.
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|e| format!("invalid color '{}': {}", s, e))?;
        match channels[..] {
            [r, g, b] => Ok(Rgb(r, g, b)),
            _ => Err(format!("invalid color '{}': expected R,G,B", s)),
        }
    }
}

/// The named color schemes a display can start from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    BlackWhite,
    WhiteBlack,
    Grays,
    Gameboy,
    BlueWhite,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 5] = [
        ColorScheme::BlackWhite,
        ColorScheme::WhiteBlack,
        ColorScheme::Grays,
        ColorScheme::Gameboy,
        ColorScheme::BlueWhite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::BlackWhite => "black-white",
            ColorScheme::WhiteBlack => "white-black",
            ColorScheme::Grays => "grays",
            ColorScheme::Gameboy => "gameboy",
            ColorScheme::BlueWhite => "blue-white",
        }
    }

    pub fn palette(self) -> Palette {
        let (foreground, background) = match self {
            ColorScheme::BlackWhite => (Rgb::gray(255), Rgb::gray(0)),
            ColorScheme::WhiteBlack => (Rgb::gray(0), Rgb::gray(255)),
            ColorScheme::Grays => (Rgb::gray(84), Rgb::gray(169)),
            ColorScheme::Gameboy => (Rgb(15, 56, 15), Rgb(155, 188, 15)),
            ColorScheme::BlueWhite => (Rgb(5, 65, 255), Rgb(242, 242, 242)),
        };
        Palette {
            foreground,
            background,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == s)
            .ok_or_else(|| format!("unknown color scheme '{}'", s))
    }
}

/// # Palette
/// Lit pixels are drawn in `foreground`, unlit ones in `background`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Palette {
    pub fn with_foreground(self, foreground: Option<Rgb>) -> Self {
        Palette {
            foreground: foreground.unwrap_or(self.foreground),
            ..self
        }
    }

    pub fn with_background(self, background: Option<Rgb>) -> Self {
        Palette {
            background: background.unwrap_or(self.background),
            ..self
        }
    }

    /// The RGB24 bytes for a single pixel.
    pub fn pixel(&self, lit: u8) -> [u8; 3] {
        if lit == 0 {
            self.background.bytes()
        } else {
            self.foreground.bytes()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        ColorScheme::default().palette()
    }
}
