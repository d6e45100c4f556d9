// Wire formats for calendar dates and clock times
//
// Dates travel as `DD.MM.YYYY`, times of day as `HH:MM`.

use chrono::{NaiveDate, NaiveTime};

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `DD.MM.YYYY` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date '{}', expected DD.MM.YYYY", raw))
}

/// Parse an `HH:MM` time of day
pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
        .map_err(|_| format!("invalid time '{}', expected HH:MM", raw))
}

/// serde adapter for `NaiveDate` as `DD.MM.YYYY`
pub mod dotted_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }

    /// Same format for optional fields (partial updates)
    pub mod option {
        use chrono::NaiveDate;
        use serde::{de, Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::super::parse_date(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}

/// serde adapter for `NaiveTime` as `HH:MM`
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::super::parse_time(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Visit {
        #[serde(with = "dotted_date")]
        day: NaiveDate,
        #[serde(with = "clock_time")]
        at: NaiveTime,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "dotted_date::option::deserialize")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn test_date_round_trip() {
        let visit: Visit =
            serde_json::from_str(r#"{"day": "15.03.2024", "at": "09:30"}"#).unwrap();
        assert_eq!(visit.day, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(visit.at, NaiveTime::from_hms_opt(9, 30, 0).unwrap());

        let json = serde_json::to_value(&visit).unwrap();
        assert_eq!(json["day"], "15.03.2024");
        assert_eq!(json["at"], "09:30");
    }

    #[test]
    fn test_rejects_iso_date() {
        assert!(parse_date("2024-03-15").is_err());
        assert!(serde_json::from_str::<Visit>(r#"{"day": "2024-03-15", "at": "09:30"}"#).is_err());
    }

    #[test]
    fn test_rejects_impossible_values() {
        assert!(parse_date("31.02.2024").is_err());
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("9h30").is_err());
    }

    #[test]
    fn test_optional_date() {
        let patch: Patch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(patch.day, None);

        let patch: Patch = serde_json::from_str(r#"{"day": "01.09.2023"}"#).unwrap();
        assert_eq!(patch.day, NaiveDate::from_ymd_opt(2023, 9, 1));

        assert!(serde_json::from_str::<Patch>(r#"{"day": "soon"}"#).is_err());
    }
}
