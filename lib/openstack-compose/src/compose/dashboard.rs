// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Horizon, and the memcached instance it caches sessions in.

use super::{attrs, ServiceConfig};
use crate::params::ParameterSet;
use crate::roles::RoleFlags;

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
) -> Option<ServiceConfig> {
    if !params.roles.horizon {
        return None;
    }

    let horizon = &params.horizon;
    let cache_ip = &params.network.internal_address;

    // Horizon is served from controllers only.
    let mut svc = ServiceConfig::new(
        params.roles.enabled && flags.controller_services,
        attrs([
            ("secret_key", (&horizon.secret_key).into()),
            ("cache_server_ip", cache_ip.into()),
            ("cache_server_port", horizon.cache_port.to_string().into()),
            ("swift", horizon.swift.into()),
            ("quantum", params.roles.quantum.into()),
            ("horizon_app_links", horizon.app_links.into()),
        ]),
    );
    if flags.controller_services {
        svc = svc.with_component(
            "memcached",
            attrs([("listen_ip", cache_ip.into())]),
        );
    }

    Some(svc)
}
