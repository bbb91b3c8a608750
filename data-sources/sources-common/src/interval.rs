use std::{borrow::Cow, fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer};

/// Candle bucket widths offered by the interval selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interval {
    #[default]
    OneMinute,
    FiveMinutes,
    OneHour,
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::OneHour,
        Interval::OneDay,
    ];

    /// Exchange notation, as sent in the `interval` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1 minute",
            Interval::FiveMinutes => "5 minutes",
            Interval::OneHour => "1 hour",
            Interval::OneDay => "1 day",
        }
    }

    fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|i| i == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Interval::OneMinute),
            "5m" => Ok(Interval::FiveMinutes),
            "1h" => Ok(Interval::OneHour),
            "1d" => Ok(Interval::OneDay),
            _ => Err(format!("Incorrect interval: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string_value = Cow::<str>::deserialize(deserializer)?;
        Interval::from_str(&string_value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>(), Ok(interval));
        }
        assert!("3m".parse::<Interval>().is_err());
        assert_eq!(Interval::OneHour.to_string(), "1h");
    }

    #[test]
    fn cycling_wraps_around() {
        assert_eq!(Interval::OneMinute.next(), Interval::FiveMinutes);
        assert_eq!(Interval::OneDay.next(), Interval::OneMinute);
        assert_eq!(Interval::OneMinute.prev(), Interval::OneDay);
        assert_eq!(Interval::OneHour.prev(), Interval::FiveMinutes);
    }

    #[test]
    fn deserialize_from_config_value() {
        let interval: Interval = serde_json::from_str(r#""5m""#).unwrap();
        assert_eq!(interval, Interval::FiveMinutes);
        assert!(serde_json::from_str::<Interval>(r#""7m""#).is_err());
    }
}
