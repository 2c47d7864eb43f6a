// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Values carried by composed service configuration.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Attribute name to value, ordered so that rendering is stable.
pub type Attributes = BTreeMap<String, ConfigValue>;

/// A boolean whose wire form is the literal string `True` or `False`.
///
/// The wrapped services parse these fields as strings, so they must never be
/// emitted as native booleans.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LegacyBool(pub bool);

impl LegacyBool {
    pub const fn as_str(self) -> &'static str {
        if self.0 {
            "True"
        } else {
            "False"
        }
    }
}

impl From<bool> for LegacyBool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Display for LegacyBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegacyBool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" | "true" => Ok(Self(true)),
            "False" | "false" => Ok(Self(false)),
            other => Err(format!("invalid legacy boolean {other:?}")),
        }
    }
}

impl Serialize for LegacyBool {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'d> Deserialize<'d> for LegacyBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// A resolved attribute value.
///
/// `Absent` is an attribute that is present in the record but deliberately
/// unset (an unset public interface, for instance); it serializes as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Absent,
    Bool(bool),
    Str(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Either the given string, or `false` when there is none.
    ///
    /// Several legacy attributes (`floating_range`, `vncproxy_host`) use
    /// `false` to mean "not configured".
    pub fn str_or_false(value: Option<&str>) -> Self {
        match value {
            Some(s) => ConfigValue::Str(s.to_owned()),
            None => ConfigValue::Bool(false),
        }
    }

    pub fn str_or_absent(value: Option<&str>) -> Self {
        match value {
            Some(s) => ConfigValue::Str(s.to_owned()),
            None => ConfigValue::Absent,
        }
    }
}

impl Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Absent => f.write_str("null"),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Str(s) => write!(f, "{s:?}"),
            ConfigValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                f.write_str("]")
            }
            ConfigValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?} = {v:?}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<LegacyBool> for ConfigValue {
    fn from(value: LegacyBool) -> Self {
        ConfigValue::Str(value.as_str().to_owned())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<&String> for ConfigValue {
    fn from(value: &String) -> Self {
        ConfigValue::Str(value.clone())
    }
}

impl From<BTreeMap<String, String>> for ConfigValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        ConfigValue::Map(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn legacy_bool_is_a_string_on_the_wire() {
        assert_tokens(&LegacyBool(true), &[Token::Str("True")]);
        assert_tokens(&LegacyBool(false), &[Token::Str("False")]);
    }

    #[test]
    fn legacy_bool_accepts_lowercase_input() {
        assert_eq!("true".parse::<LegacyBool>(), Ok(LegacyBool(true)));
        assert_eq!("false".parse::<LegacyBool>(), Ok(LegacyBool(false)));
        assert!("yes".parse::<LegacyBool>().is_err());
    }

    #[test]
    fn legacy_bool_becomes_string_value() {
        assert_eq!(
            ConfigValue::from(LegacyBool(false)),
            ConfigValue::Str("False".to_string())
        );
    }

    #[test]
    fn json_shape() {
        let values = vec![
            ConfigValue::Absent,
            ConfigValue::Bool(false),
            ConfigValue::from("eth0"),
            ConfigValue::List(vec!["a:9292".into(), "b:9292".into()]),
            ConfigValue::Map(BTreeMap::new()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,false,"eth0",["a:9292","b:9292"],{}]"#);
    }

    #[test]
    fn display_quotes_strings() {
        assert_eq!(ConfigValue::from("x").to_string(), "\"x\"");
        assert_eq!(ConfigValue::Bool(true).to_string(), "true");
        assert_eq!(ConfigValue::Absent.to_string(), "null");
        assert_eq!(
            ConfigValue::List(vec!["a".into(), "b".into()]).to_string(),
            "[\"a\", \"b\"]"
        );
    }
}
