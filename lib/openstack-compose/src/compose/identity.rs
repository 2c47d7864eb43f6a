// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keystone.
//!
//! Every host carries the keystone settings; the admin role, endpoints and
//! service registrations are only made from controllers.

use super::{attrs, ServiceConfig};
use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::LegacyBool;

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
) -> ServiceConfig {
    let roles = &params.roles;
    let keystone = &params.keystone;
    let net = &params.network;
    let enabled = roles.enabled && roles.identity;

    let svc = ServiceConfig::new(
        enabled,
        attrs([
            ("verbose", LegacyBool(params.verbose).into()),
            ("debug", LegacyBool(params.debug).into()),
            ("catalog_type", "sql".into()),
            ("admin_token", (&keystone.admin_token).into()),
            ("sql_connection", conns.keystone.clone().into()),
        ]),
    );

    // Without keystone there is nothing to register with, and only
    // controllers register anything.
    if !enabled || !flags.controller_services {
        return svc;
    }

    let mut svc = svc
        .with_component(
            "roles_admin",
            attrs([
                ("email", (&keystone.admin_email).into()),
                ("password", (&keystone.admin_password).into()),
                ("admin_tenant", (&keystone.admin_tenant).into()),
            ]),
        )
        .with_component(
            "endpoint",
            attrs([
                ("public_address", (&net.public_address).into()),
                ("internal_address", (&net.internal_address).into()),
                ("admin_address", net.admin_address().into()),
                ("region", (&keystone.region).into()),
            ]),
        );

    let mut registrations = vec![
        ("nova", &params.nova.user_password),
        ("glance", &params.glance.user_password),
    ];
    if roles.cinder {
        registrations.push(("cinder", &params.cinder.user_password));
    }
    if roles.quantum {
        registrations.push(("quantum", &params.quantum.user_password));
    }

    for (service, password) in registrations {
        svc = svc.with_component(
            format!("auth_{service}"),
            attrs([
                ("password", password.into()),
                ("public_address", (&net.public_address).into()),
                ("internal_address", (&net.public_address).into()),
                ("admin_address", (&net.public_address).into()),
                ("region", (&keystone.region).into()),
            ]),
        );
    }

    svc
}
