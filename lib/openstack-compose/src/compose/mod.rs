// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composition of per-service configuration records.
//!
//! Each service module turns the parameters, role flags and connection
//! strings into at most one [`ServiceConfig`]. Services that do not apply to
//! the deployment (block storage without Cinder, nova-network under Quantum,
//! ...) are left out of the [`Deployment`] entirely rather than marked
//! disabled. Daemons that only run on controllers appear as components only
//! when the host is one.

use std::collections::BTreeMap;

use serde_derive::Serialize;
use slog::Logger;

use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::{Attributes, ConfigValue, LegacyBool};

mod block_storage;
mod compute;
mod dashboard;
mod database;
mod identity;
mod image;
mod network;
mod quantum;

/// Port glance and quantum validate tokens against.
const KEYSTONE_ADMIN_PORT: &str = "35357";

/// The services a deployment may contain, in rendering order.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceName {
    Identity,
    Image,
    Compute,
    BlockStorage,
    Network,
    Quantum,
    Dashboard,
    Database,
}

/// Resolved configuration for one service.
///
/// Built once per composition run and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    enabled: bool,
    attributes: Attributes,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    components: BTreeMap<String, Attributes>,
    /// Raw entries for the service's own configuration file. Always strings,
    /// so booleans here carry their legacy `True`/`False` spelling.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    config_entries: BTreeMap<String, String>,
}

impl ServiceConfig {
    pub(crate) fn new(enabled: bool, attributes: Attributes) -> Self {
        Self {
            enabled,
            attributes,
            components: BTreeMap::new(),
            config_entries: BTreeMap::new(),
        }
    }

    pub(crate) fn with_component<S: Into<String>>(
        mut self,
        name: S,
        attributes: Attributes,
    ) -> Self {
        self.components.insert(name.into(), attributes);
        self
    }

    pub(crate) fn with_config_entry<S: Into<String>>(
        mut self,
        key: S,
        value: LegacyBool,
    ) -> Self {
        self.config_entries.insert(key.into(), value.to_string());
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&ConfigValue> {
        self.attributes.get(name)
    }

    pub fn components(&self) -> &BTreeMap<String, Attributes> {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&Attributes> {
        self.components.get(name)
    }

    pub fn config_entries(&self) -> &BTreeMap<String, String> {
        &self.config_entries
    }

    pub fn config_entry(&self, key: &str) -> Option<&str> {
        self.config_entries.get(key).map(String::as_str)
    }
}

/// Every service composed for one host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deployment {
    services: BTreeMap<ServiceName, ServiceConfig>,
}

impl Deployment {
    pub fn get(&self, name: ServiceName) -> Option<&ServiceConfig> {
        self.services.get(&name)
    }

    pub fn contains(&self, name: ServiceName) -> bool {
        self.services.contains_key(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceName, &ServiceConfig)> {
        self.services.iter().map(|(name, svc)| (*name, svc))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builds an attribute map from literal pairs.
pub(crate) fn attrs<const N: usize>(
    pairs: [(&str, ConfigValue); N],
) -> Attributes {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

/// Composes every service that applies to the host described by `params`.
///
/// Callers are expected to have run [`crate::validate::validate`] first;
/// composition itself never fails.
pub fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
    log: &Logger,
) -> Deployment {
    let candidates = [
        (
            ServiceName::Identity,
            Some(identity::compose(params, flags, conns)),
        ),
        (ServiceName::Image, Some(image::compose(params, flags, conns))),
        (ServiceName::Compute, Some(compute::compose(params, flags, conns))),
        (
            ServiceName::BlockStorage,
            block_storage::compose(params, flags, conns),
        ),
        (ServiceName::Network, network::compose(params, flags)),
        (ServiceName::Quantum, quantum::compose(params, flags, conns)),
        (ServiceName::Dashboard, dashboard::compose(params, flags)),
        (ServiceName::Database, database::compose(params)),
    ];

    let mut services = BTreeMap::new();
    for (name, svc) in candidates {
        match svc {
            Some(svc) => {
                slog::debug!(log, "composed service";
                    "service" => %name,
                    "enabled" => svc.enabled(),
                    "components" => svc.components().len());
                services.insert(name, svc);
            }
            None => {
                slog::debug!(log, "service does not apply to host";
                    "service" => %name);
            }
        }
    }

    Deployment { services }
}
