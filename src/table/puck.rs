use crate::error::Error;
use crate::error::Result;
use crate::table::config::Config;

/// Where the puck sits: a point number while ON, nothing while OFF.
pub type PuckLocation = Option<u8>;

/// The ON/OFF puck marking whether a point is established.
///
/// Sole source of truth for point state. Toggleable bets consult it for
/// their default activity and the table consults it for line-bet legality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Puck {
    location: PuckLocation,
}

impl Puck {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_on(&self) -> bool {
        self.location.is_some()
    }
    pub fn is_off(&self) -> bool {
        self.location.is_none()
    }
    pub fn location(&self) -> PuckLocation {
        self.location
    }
    /// Set the puck ON at a point. The point must come from the ruleset and
    /// the puck must currently be OFF.
    pub fn place(&mut self, location: u8, config: &Config) -> Result<()> {
        if self.is_on() {
            return Err(Error::IllegalMove("puck already placed".into()));
        }
        if !config.is_valid_point(location) {
            return Err(Error::IllegalMove(format!(
                "{} is not a valid puck location",
                location
            )));
        }
        self.location = Some(location);
        Ok(())
    }
    /// Take the puck OFF. Fails if it already is.
    pub fn remove(&mut self) -> Result<()> {
        if self.is_off() {
            return Err(Error::IllegalMove("puck is already off".into()));
        }
        self.location = None;
        Ok(())
    }
}

impl std::fmt::Display for Puck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.location {
            Some(point) => write!(f, "ON {}", point),
            None => write!(f, "OFF"),
        }
    }
}
