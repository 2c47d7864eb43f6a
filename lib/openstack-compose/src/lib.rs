// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derives OpenStack service configuration from a host's role and
//! credentials.
//!
//! A composition run is a pipeline over one immutable [`ParameterSet`]:
//!
//! 1. [`validate`] rejects combinations that cannot be composed.
//! 2. [`roles::resolve`] turns the role flags into [`RoleFlags`].
//! 3. [`Connections::new`] builds each service's database URI.
//! 4. [`compose::compose`] produces a [`ServiceConfig`] per applicable
//!    service, collected into a [`Deployment`].
//!
//! [`compose_deployment`] runs all of it. Nothing here performs I/O; the
//! resulting [`Deployment`] is handed to whatever realizes it on a host.

pub mod compose;
pub mod connection;
pub mod params;
pub mod render;
pub mod roles;
pub mod validate;
pub mod value;

pub use compose::{Deployment, ServiceConfig, ServiceName};
pub use connection::{ConnectionString, Connections};
pub use params::ParameterSet;
pub use roles::RoleFlags;
pub use validate::{audit, validate, CompositionError, DatabaseBackend, Finding};
pub use value::{Attributes, ConfigValue, LegacyBool};

use slog::Logger;

/// Validates `params` and resolves its role flags.
pub fn resolve_roles(
    params: &ParameterSet,
) -> Result<RoleFlags, CompositionError> {
    validate(params)?;
    Ok(roles::resolve(params))
}

/// Validates `params` and composes every service that applies to the host.
///
/// Either the whole deployment is produced or an error is returned; there is
/// no partial output.
pub fn compose_deployment(
    params: &ParameterSet,
    log: &Logger,
) -> Result<Deployment, CompositionError> {
    validate(params)?;
    let backend = validate::backend(params)?;

    let flags = roles::resolve(params);
    slog::debug!(log, "resolved roles";
        "controller" => params.roles.controller,
        "compute" => params.roles.compute,
        "multi_host" => flags.multi_host,
        "network_enabled" => flags.network_enabled,
        "network_created" => flags.network_created,
        "nova_network" => flags.nova_network);

    let conns = Connections::new(params, backend);
    let deployment = compose::compose(params, &flags, &conns, log);
    slog::info!(log, "composed deployment";
        "services" => deployment.len(),
        "backend" => %backend);

    Ok(deployment)
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn invalid_params_produce_nothing() {
        let mut params = ParameterSet::default();
        params.database.db_type = "sqlite".to_string();
        let res = compose_deployment(&params, &test_logger());
        assert_eq!(
            res,
            Err(CompositionError::UnsupportedBackend("sqlite".to_string()))
        );
    }

    #[test]
    fn roles_are_not_resolved_for_invalid_params() {
        let mut params = ParameterSet::default();
        params.roles.multi_host = true;
        params.roles.compute = true;
        assert_eq!(
            resolve_roles(&params),
            Err(CompositionError::MissingPublicInterface)
        );

        params.network.public_interface = Some("eth1".to_string());
        let flags = resolve_roles(&params).unwrap();
        assert!(flags.network_enabled);
        assert!(flags.send_arp_for_ha);
    }

    #[test]
    fn defaults_compose() {
        let deployment =
            compose_deployment(&ParameterSet::default(), &test_logger())
                .unwrap();
        assert!(deployment.contains(ServiceName::Compute));
        assert!(!deployment.contains(ServiceName::Database));
    }
}
