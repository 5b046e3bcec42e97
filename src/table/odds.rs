use crate::error::Error;
use crate::error::Result;
use crate::Chips;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Points a standard table recognizes.
pub const STANDARD_POINTS: [u8; 6] = [4, 5, 6, 8, 9, 10];
/// Points a crapless table recognizes: everything but 7.
pub const CRAPLESS_POINTS: [u8; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];

/// Maximum fair-odds multiples, keyed by point.
///
/// The key set fixes the shape of the game: a standard table defines odds
/// for 4-10 (excluding 7), a crapless table for every total but 7. The set
/// of keys is also the authoritative list of valid points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Odds {
    multiples: BTreeMap<u8, Chips>,
}

impl Odds {
    /// Traditional 3x4x5x odds.
    pub fn mirrored345() -> Self {
        Self {
            multiples: BTreeMap::from([(4, 3), (5, 4), (6, 5), (8, 5), (9, 4), (10, 3)]),
        }
    }
    /// The same multiple for every standard point.
    pub fn flat(multiple: Chips) -> Self {
        Self {
            multiples: STANDARD_POINTS.iter().map(|&p| (p, multiple)).collect(),
        }
    }
    /// The same multiple for every crapless point.
    pub fn flat_crapless(multiple: Chips) -> Self {
        Self {
            multiples: CRAPLESS_POINTS.iter().map(|&p| (p, multiple)).collect(),
        }
    }
    /// An explicit standard-shaped table. Fails unless the keys are exactly 4-10.
    pub fn standard(multiples: BTreeMap<u8, Chips>) -> Result<Self> {
        match multiples.keys().eq(STANDARD_POINTS.iter()) {
            true => Ok(Self { multiples }),
            false => Err(Error::InconsistentConfig(
                "odds must be defined for exactly the standard points".into(),
            )),
        }
    }
    /// An explicit crapless-shaped table. Fails unless the keys are exactly 2-12 sans 7.
    pub fn crapless(multiples: BTreeMap<u8, Chips>) -> Result<Self> {
        match multiples.keys().eq(CRAPLESS_POINTS.iter()) {
            true => Ok(Self { multiples }),
            false => Err(Error::InconsistentConfig(
                "crapless odds must be defined for every total but 7".into(),
            )),
        }
    }

    pub fn valid_points(&self) -> Vec<u8> {
        self.multiples.keys().copied().collect()
    }
    pub fn covers(&self, point: u8) -> bool {
        self.multiples.contains_key(&point)
    }
    pub fn multiple(&self, point: u8) -> Result<Chips> {
        self.multiples
            .get(&point)
            .copied()
            .ok_or(Error::UnknownOdds(point))
    }
    pub fn is_crapless_shape(&self) -> bool {
        self.multiples.keys().eq(CRAPLESS_POINTS.iter())
    }
    fn flat_multiple(&self) -> Option<Chips> {
        let mut values = self.multiples.values();
        let first = values.next().copied()?;
        values.all(|&v| v == first).then_some(first)
    }
}

/// Wire form: `"mirrored345()"`, `"flat(N)"`, or the explicit map.
impl Serialize for Odds {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if *self == Self::mirrored345() {
            serializer.serialize_str("mirrored345()")
        } else if let Some(multiple) = self.flat_multiple() {
            serializer.serialize_str(&format!("flat({})", multiple))
        } else {
            let mut map = serializer.serialize_map(Some(self.multiples.len()))?;
            for (point, multiple) in &self.multiples {
                map.serialize_entry(point, multiple)?;
            }
            map.end()
        }
    }
}

/// Deserialized shape of the `odds` config field, resolved against the
/// crapless flag once the whole config is known. JSON object keys arrive
/// as strings and are parsed into points during resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OddsSpec {
    Named(String),
    Table(BTreeMap<String, Chips>),
}

impl OddsSpec {
    pub fn resolve(self, crapless: bool) -> Result<Odds> {
        match self {
            Self::Table(multiples) => {
                let multiples = multiples
                    .into_iter()
                    .map(|(point, multiple)| match point.parse::<u8>() {
                        Ok(point) => Ok((point, multiple)),
                        Err(_) => Err(Error::InconsistentConfig(format!(
                            "{} is not a point",
                            point
                        ))),
                    })
                    .collect::<Result<BTreeMap<u8, Chips>>>()?;
                match crapless {
                    true => Odds::crapless(multiples),
                    false => Odds::standard(multiples),
                }
            }
            Self::Named(name) => {
                let (method, args) = name
                    .strip_suffix(')')
                    .and_then(|s| s.split_once('('))
                    .ok_or_else(|| Error::InconsistentConfig("unknown odds format".into()))?;
                match (method, crapless) {
                    ("mirrored345", false) => Ok(Odds::mirrored345()),
                    ("flat", _) => {
                        let multiple = args.trim().parse::<Chips>().map_err(|_| {
                            Error::InconsistentConfig("unknown odds method".into())
                        })?;
                        match crapless {
                            true => Ok(Odds::flat_crapless(multiple)),
                            false => Ok(Odds::flat(multiple)),
                        }
                    }
                    _ => Err(Error::InconsistentConfig("unknown odds method".into())),
                }
            }
        }
    }
}
