// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checks run before anything is composed.

use std::fmt::Display;

use serde_derive::Serialize;
use thiserror::Error;

use crate::params::ParameterSet;

/// Database backends the composed services can be pointed at.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum DatabaseBackend {
    Mysql,
}

/// Errors which abort a composition run. No configuration is produced when
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("unsupported database backend {0:?}")]
    UnsupportedBackend(String),

    #[error("multi-host networking requires a public interface")]
    MissingPublicInterface,
}

/// Checks `params` for combinations that cannot be composed.
///
/// The backend is checked before the network settings, so a parameter set
/// with both problems reports `UnsupportedBackend`.
pub fn validate(params: &ParameterSet) -> Result<(), CompositionError> {
    backend(params)?;

    if params.roles.multi_host && params.network.public_interface.is_none() {
        return Err(CompositionError::MissingPublicInterface);
    }

    Ok(())
}

/// The configured database backend, if it is one we support.
pub fn backend(
    params: &ParameterSet,
) -> Result<DatabaseBackend, CompositionError> {
    params.database.db_type.parse::<DatabaseBackend>().map_err(|_| {
        CompositionError::UnsupportedBackend(params.database.db_type.clone())
    })
}

/// A questionable but accepted input, reported by [`audit`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub service: &'static str,
    pub field: &'static str,
}

impl Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is enabled but {} is empty", self.service, self.field)
    }
}

/// Reports enabled services with empty credentials.
///
/// These combinations have always been accepted and composition still
/// proceeds with them; the findings only exist so a caller can warn or
/// refuse.
pub fn audit(params: &ParameterSet) -> Vec<Finding> {
    let roles = &params.roles;
    let identity = roles.enabled && roles.identity;

    let checks: [(bool, &'static str, &'static str, &str); 15] = [
        (
            roles.controller,
            "database",
            "database.root_password",
            &params.database.root_password,
        ),
        (
            identity,
            "identity",
            "keystone.admin_token",
            &params.keystone.admin_token,
        ),
        (
            identity,
            "identity",
            "keystone.admin_password",
            &params.keystone.admin_password,
        ),
        (
            identity,
            "identity",
            "keystone.db.password",
            &params.keystone.db.password,
        ),
        (true, "image", "glance.user_password", &params.glance.user_password),
        (true, "image", "glance.db.password", &params.glance.db.password),
        (true, "compute", "nova.user_password", &params.nova.user_password),
        (true, "compute", "nova.db.password", &params.nova.db.password),
        (true, "compute", "rabbit.password", &params.rabbit.password),
        (
            roles.cinder,
            "block-storage",
            "cinder.user_password",
            &params.cinder.user_password,
        ),
        (
            roles.cinder,
            "block-storage",
            "cinder.db.password",
            &params.cinder.db.password,
        ),
        (
            identity && roles.quantum,
            "identity",
            "quantum.user_password",
            &params.quantum.user_password,
        ),
        (
            roles.quantum,
            "quantum",
            "quantum.user_password",
            &params.quantum.user_password,
        ),
        (
            roles.quantum,
            "quantum",
            "quantum.db.password",
            &params.quantum.db.password,
        ),
        (
            roles.horizon,
            "dashboard",
            "horizon.secret_key",
            &params.horizon.secret_key,
        ),
    ];

    checks
        .into_iter()
        .filter(|(enabled, _, _, value)| *enabled && value.is_empty())
        .map(|(_, service, field, _)| Finding { service, field })
        .collect()
}
