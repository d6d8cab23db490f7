use clap::ValueEnum;
use std::fmt;

/// Bay Club locations with squash courts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Club {
    /// Bay Club Courtside, Cupertino
    Bccu,
    /// Bay Club Santa Clara
    Bcsc,
}

impl Club {
    /// Value of the club's option in the court sheet's location dropdown.
    pub fn location_id(&self) -> &'static str {
        match self {
            Club::Bccu => "3",
            Club::Bcsc => "17",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Club::Bccu => "Cupertino",
            Club::Bcsc => "Santa Clara",
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Club::Bccu => f.write_str("bccu"),
            Club::Bcsc => f.write_str("bcsc"),
        }
    }
}
