// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantum, which takes over networking from nova-network when enabled.

use super::{attrs, ServiceConfig, KEYSTONE_ADMIN_PORT};
use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::LegacyBool;

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
) -> Option<ServiceConfig> {
    if !params.roles.quantum {
        return None;
    }

    let enabled = params.roles.enabled;
    let rabbit = &params.rabbit;

    let svc = ServiceConfig::new(
        enabled,
        attrs([
            ("verbose", LegacyBool(params.verbose).into()),
            ("debug", LegacyBool(params.debug).into()),
            ("sql_connection", conns.quantum.clone().into()),
            ("rabbit_host", (&rabbit.host).into()),
            ("rabbit_userid", (&rabbit.user).into()),
            ("rabbit_password", (&rabbit.password).into()),
            ("rabbit_virtual_host", (&rabbit.virtual_host).into()),
        ]),
    );

    if !flags.controller_services {
        return Some(svc);
    }

    Some(svc.with_component(
        "server",
        attrs([
            ("enabled", enabled.into()),
            ("auth_host", (&params.keystone.host).into()),
            ("auth_port", KEYSTONE_ADMIN_PORT.into()),
            ("keystone_tenant", "services".into()),
            ("keystone_user", "quantum".into()),
            ("keystone_password", (&params.quantum.user_password).into()),
        ]),
    ))
}
