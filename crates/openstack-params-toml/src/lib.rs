// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loads a [`ParameterSet`] from a TOML file.
//!
//! A parameter file only names what differs from a base parameter set
//! (usually [`ParameterSet::default`]). Tables in the file are merged into
//! the base key by key, so
//!
//! ```toml
//! [roles]
//! controller = true
//!
//! [nova.db]
//! password = "nova"
//! ```
//!
//! changes the controller flag and nova's database password and nothing
//! else.

use std::path::Path;

use openstack_compose::ParameterSet;
use thiserror::Error;

/// Errors which may be returned when loading a parameter file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Cannot parse toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot represent base parameters as toml: {0}")]
    Base(#[from] toml::ser::Error),

    #[error("Base parameters did not serialize to a table")]
    BaseNotTable,
}

/// Parses a TOML file over the default parameters.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<ParameterSet, ParseError> {
    parse_with_base(path, &ParameterSet::default())
}

/// Parses a TOML file over `base`.
pub fn parse_with_base<P: AsRef<Path>>(
    path: P,
    base: &ParameterSet,
) -> Result<ParameterSet, ParseError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    from_str_with_base(&contents, base)
}

/// Parses TOML text over `base`.
pub fn from_str_with_base(
    contents: &str,
    base: &ParameterSet,
) -> Result<ParameterSet, ParseError> {
    let file = toml::from_str::<toml::Table>(contents)?;
    let mut merged = match toml::Value::try_from(base)? {
        toml::Value::Table(table) => table,
        _ => return Err(ParseError::BaseNotTable),
    };
    overlay(&mut merged, file);
    let params = toml::Value::Table(merged).try_into::<ParameterSet>()?;
    Ok(params)
}

/// Renders `params` as a complete parameter file.
pub fn to_string(params: &ParameterSet) -> Result<String, ParseError> {
    Ok(toml::to_string(params)?)
}

/// Merges `top` into `base`: tables present in both are merged recursively,
/// anything else in `top` replaces what `base` had.
fn overlay(base: &mut toml::Table, top: toml::Table) {
    for (key, value) in top {
        if let toml::Value::Table(table) = value {
            if let Some(toml::Value::Table(inner)) = base.get_mut(&key) {
                overlay(inner, table);
                continue;
            }
            base.insert(key, toml::Value::Table(table));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_str(raw: &str) -> ParameterSet {
        from_str_with_base(raw, &ParameterSet::default()).unwrap()
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse_str(""), ParameterSet::default());
    }

    #[test]
    fn defaults_survive_a_round_trip() {
        let defaults = ParameterSet::default();
        let rendered = to_string(&defaults).unwrap();
        assert_eq!(parse_str(&rendered), defaults);
    }

    #[test]
    fn parse_controller_file() {
        let raw = r#"
verbose = true

[roles]
controller = true
multi_host = true

[network]
public_interface = "eth1"
public_address = "10.0.0.1"
floating_range = "172.16.0.0/24"

[network.network_config]
dhcp_lease_time = "120"

[nova]
glance_api_servers = ["controller:9292"]

[nova.db]
password = "nova"

[cinder.db]
user = "baz"
dbname = "blah"
"#;
        let params = parse_str(raw);

        assert!(params.verbose);
        assert!(params.roles.controller);
        assert!(params.roles.multi_host);
        assert!(!params.roles.compute);
        assert!(params.roles.cinder);

        assert_eq!(params.network.public_interface.as_deref(), Some("eth1"));
        assert_eq!(params.network.public_address, "10.0.0.1");
        assert_eq!(params.network.internal_address, "127.0.0.1");
        assert_eq!(
            params.network.floating_range.as_deref(),
            Some("172.16.0.0/24")
        );
        assert_eq!(
            params.network.network_config.get("dhcp_lease_time"),
            Some(&"120".to_string())
        );

        assert_eq!(
            params.nova.glance_api_servers,
            Some(vec!["controller:9292".to_string()])
        );
        assert_eq!(params.nova.db.user, "nova");
        assert_eq!(params.nova.db.password, "nova");
        assert_eq!(params.nova.db.dbname, "nova");

        assert_eq!(params.cinder.db.user, "baz");
        assert_eq!(params.cinder.db.password, "cinder_pass");
        assert_eq!(params.cinder.db.dbname, "blah");
    }

    #[test]
    fn custom_base_is_respected() {
        let mut base = ParameterSet::default();
        base.rabbit.password = "site_rabbit".to_string();
        base.roles.compute = true;

        let params =
            from_str_with_base("[roles]\nmulti_host = true\n", &base).unwrap();
        assert_eq!(params.rabbit.password, "site_rabbit");
        assert!(params.roles.compute);
        assert!(params.roles.multi_host);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = from_str_with_base(
            "[roles]\ncontroler = true\n",
            &ParameterSet::default(),
        );
        assert!(matches!(res, Err(ParseError::Toml(_))));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let res = from_str_with_base(
            "[roles]\ncontroller = \"yes\"\n",
            &ParameterSet::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn backend_is_not_checked_here() {
        let params = parse_str("[database]\ndb_type = \"sqlite\"\n");
        assert_eq!(params.database.db_type, "sqlite");
    }
}
