use std::ops::Deref;

use serde::Deserialize;

/// Duration parsed from strings like `"1d 2h 3m 4s 500ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn parse_part(part: &str) -> Option<std::time::Duration> {
    let split = part.find(|c: char| !c.is_ascii_digit())?;
    let (value, unit) = part.split_at(split);
    let value = value.parse::<u64>().ok()?;
    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return None,
    };
    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |acc, part| {
                parse_part(part).map(|x| acc + x)
            })
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}
