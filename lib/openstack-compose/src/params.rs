// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input parameters for a composition run.
//!
//! Every field has a default, collected in the `Default` impls below. Callers
//! that load parameters from somewhere else start from
//! [`ParameterSet::default`] (or their own base) and overlay what they read.

use std::collections::BTreeMap;

use serde_derive::{Deserialize, Serialize};

/// The full set of inputs for one host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterSet {
    pub verbose: bool,
    pub debug: bool,
    pub roles: Roles,
    pub network: NetworkParams,
    pub database: DatabaseParams,
    pub rabbit: RabbitParams,
    pub keystone: KeystoneParams,
    pub glance: GlanceParams,
    pub nova: NovaParams,
    pub cinder: CinderParams,
    pub quantum: QuantumParams,
    pub horizon: HorizonParams,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
            roles: Roles::default(),
            network: NetworkParams::default(),
            database: DatabaseParams::default(),
            rabbit: RabbitParams::default(),
            keystone: KeystoneParams::default(),
            glance: GlanceParams::default(),
            nova: NovaParams::default(),
            cinder: CinderParams::default(),
            quantum: QuantumParams::default(),
            horizon: HorizonParams::default(),
        }
    }
}

/// Which roles this host plays and which optional services are wanted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Roles {
    pub controller: bool,
    pub compute: bool,
    pub multi_host: bool,
    /// Use Quantum for networking instead of nova-network.
    pub quantum: bool,
    pub cinder: bool,
    pub horizon: bool,
    /// Master switch for the services this host runs. When false, services
    /// are still composed but marked disabled.
    pub enabled: bool,
    /// Keystone switch; disabling it also drops every auth registration.
    pub identity: bool,
}

impl Default for Roles {
    fn default() -> Self {
        Self {
            controller: false,
            compute: false,
            multi_host: false,
            quantum: false,
            cinder: true,
            horizon: true,
            enabled: true,
            identity: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkParams {
    pub public_address: String,
    pub internal_address: String,
    /// Keystone admin endpoint address; the internal address when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_interface: Option<String>,
    pub private_interface: String,
    pub fixed_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_range: Option<String>,
    pub auto_assign_floating_ip: bool,
    /// Extra nova-network settings passed through untouched.
    pub network_config: BTreeMap<String, String>,
}

impl NetworkParams {
    pub fn admin_address(&self) -> &str {
        self.admin_address.as_deref().unwrap_or(&self.internal_address)
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            public_address: "127.0.0.1".to_string(),
            internal_address: "127.0.0.1".to_string(),
            admin_address: None,
            public_interface: None,
            private_interface: "eth0".to_string(),
            fixed_range: "10.0.0.0/24".to_string(),
            floating_range: None,
            auto_assign_floating_ip: false,
            network_config: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseParams {
    /// Backend name; only `mysql` passes validation.
    pub db_type: String,
    pub host: String,
    pub bind_address: String,
    pub root_password: String,
    pub account_security: bool,
    pub allowed_hosts: String,
}

impl Default for DatabaseParams {
    fn default() -> Self {
        Self {
            db_type: "mysql".to_string(),
            host: "127.0.0.1".to_string(),
            bind_address: "0.0.0.0".to_string(),
            root_password: "sql_pass".to_string(),
            account_security: true,
            allowed_hosts: "%".to_string(),
        }
    }
}

/// Per-service database account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbCredentials {
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl DbCredentials {
    pub fn new<S: Into<String>>(user: S, password: S, dbname: S) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            dbname: dbname.into(),
        }
    }

    /// The conventional account for `service`: user and database named after
    /// the service, password `<service>_pass`.
    fn conventional(service: &str) -> Self {
        Self::new(
            service.to_string(),
            format!("{service}_pass"),
            service.to_string(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RabbitParams {
    pub host: String,
    pub user: String,
    pub password: String,
    pub virtual_host: String,
}

impl Default for RabbitParams {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            user: "nova".to_string(),
            password: "rabbit_pw".to_string(),
            virtual_host: "/".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeystoneParams {
    /// Where other services reach keystone for token validation.
    pub host: String,
    pub admin_token: String,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_tenant: String,
    pub region: String,
    pub db: DbCredentials,
}

impl Default for KeystoneParams {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            admin_token: "keystone_admin_token".to_string(),
            admin_email: "admin@localhost".to_string(),
            admin_password: "ChangeMe".to_string(),
            admin_tenant: "admin".to_string(),
            region: "RegionOne".to_string(),
            db: DbCredentials::conventional("keystone"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlanceParams {
    pub user_password: String,
    /// Image store backend.
    pub backend: String,
    pub db: DbCredentials,
}

impl Default for GlanceParams {
    fn default() -> Self {
        Self {
            user_password: "glance_pass".to_string(),
            backend: "file".to_string(),
            db: DbCredentials::conventional("glance"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NovaParams {
    pub user_password: String,
    pub enabled_apis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glance_api_servers: Option<Vec<String>>,
    pub libvirt_type: String,
    pub vnc_enabled: bool,
    /// Overrides the VNC proxy host handed to compute nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vncproxy_host: Option<String>,
    pub db: DbCredentials,
}

impl Default for NovaParams {
    fn default() -> Self {
        Self {
            user_password: "nova_pass".to_string(),
            enabled_apis: "ec2,osapi_compute,metadata".to_string(),
            glance_api_servers: None,
            libvirt_type: "kvm".to_string(),
            vnc_enabled: true,
            vncproxy_host: None,
            db: DbCredentials::conventional("nova"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CinderParams {
    pub user_password: String,
    /// Run the volume service on this host.
    pub manage_volumes: bool,
    pub volume_group: String,
    pub db: DbCredentials,
}

impl Default for CinderParams {
    fn default() -> Self {
        Self {
            user_password: "cinder_pass".to_string(),
            manage_volumes: false,
            volume_group: "cinder-volumes".to_string(),
            db: DbCredentials::conventional("cinder"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantumParams {
    pub user_password: String,
    pub db: DbCredentials,
}

impl Default for QuantumParams {
    fn default() -> Self {
        Self {
            user_password: "quantum_pass".to_string(),
            db: DbCredentials::conventional("quantum"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonParams {
    pub secret_key: String,
    pub cache_port: u16,
    pub swift: bool,
    pub app_links: bool,
}

impl Default for HorizonParams {
    fn default() -> Self {
        Self {
            secret_key: "dummy_secret_key".to_string(),
            cache_port: 11211,
            swift: false,
            app_links: false,
        }
    }
}
