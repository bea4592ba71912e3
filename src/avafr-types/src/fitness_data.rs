use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kinds of health payload a client may upload.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Sleep,
    Hrv,
    Run,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::DataType;

    #[test]
    fn string_forms_match_wire_format() {
        assert_eq!(DataType::Hrv.to_string(), "hrv");
        assert_eq!(DataType::from_str("run").unwrap(), DataType::Run);
        assert!(DataType::from_str("steps").is_err());
        assert_eq!(serde_json::to_string(&DataType::Sleep).unwrap(), "\"sleep\"");
    }
}
