// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Glance.
//!
//! The API and registry daemons, and the image store behind them, only run
//! on controllers.

use super::{attrs, ServiceConfig, KEYSTONE_ADMIN_PORT};
use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::{Attributes, LegacyBool};

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
) -> ServiceConfig {
    let enabled = params.roles.enabled;
    let svc = ServiceConfig::new(enabled, Attributes::new());
    if !flags.controller_services {
        return svc;
    }

    // The API and registry daemons authenticate identically.
    let daemon = || -> Attributes {
        attrs([
            ("verbose", LegacyBool(params.verbose).into()),
            ("debug", LegacyBool(params.debug).into()),
            ("auth_type", "keystone".into()),
            ("auth_host", (&params.keystone.host).into()),
            ("auth_port", KEYSTONE_ADMIN_PORT.into()),
            ("keystone_tenant", "services".into()),
            ("keystone_user", "glance".into()),
            ("keystone_password", (&params.glance.user_password).into()),
            ("sql_connection", conns.glance.clone().into()),
            ("enabled", enabled.into()),
        ])
    };

    svc.with_component("api", daemon())
        .with_component("registry", daemon())
        .with_component(
            "backend",
            attrs([("store", (&params.glance.backend).into())]),
        )
}
