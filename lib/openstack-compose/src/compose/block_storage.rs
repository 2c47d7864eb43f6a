// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cinder.
//!
//! The API and scheduler run on controllers. Any host that manages volumes
//! runs the volume service.

use super::{attrs, ServiceConfig};
use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::LegacyBool;

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
) -> Option<ServiceConfig> {
    if !params.roles.cinder {
        return None;
    }

    let enabled = params.roles.enabled;
    let cinder = &params.cinder;
    let rabbit = &params.rabbit;

    let mut svc = ServiceConfig::new(
        enabled,
        attrs([
            ("verbose", LegacyBool(params.verbose).into()),
            ("sql_connection", conns.cinder.clone().into()),
            ("rabbit_host", (&rabbit.host).into()),
            ("rabbit_userid", (&rabbit.user).into()),
            ("rabbit_password", (&rabbit.password).into()),
            ("rabbit_virtual_host", (&rabbit.virtual_host).into()),
        ]),
    );

    if flags.controller_services {
        svc = svc
            .with_component(
                "api",
                attrs([
                    ("keystone_password", (&cinder.user_password).into()),
                    ("keystone_auth_host", (&params.keystone.host).into()),
                    ("enabled", enabled.into()),
                ]),
            )
            .with_component("scheduler", attrs([("enabled", enabled.into())]));
    }

    if !cinder.manage_volumes {
        return Some(svc);
    }

    Some(svc.with_component(
        "volume",
        attrs([
            ("volume_group", (&cinder.volume_group).into()),
            ("enabled", enabled.into()),
        ]),
    ))
}
