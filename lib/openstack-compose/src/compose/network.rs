// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! nova-network with the FlatDHCP manager.

use super::{attrs, ServiceConfig};
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::ConfigValue;

const NETWORK_MANAGER: &str = "nova.network.manager.FlatDHCPManager";

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
) -> Option<ServiceConfig> {
    // Quantum replaces nova-network outright.
    if !flags.nova_network {
        return None;
    }

    let net = &params.network;
    let role = flags.network_role();

    Some(ServiceConfig::new(
        role.enabled,
        attrs([
            ("install_service", role.install_service.into()),
            ("create_networks", role.create_networks.into()),
            ("private_interface", (&net.private_interface).into()),
            (
                "public_interface",
                ConfigValue::str_or_absent(net.public_interface.as_deref()),
            ),
            ("fixed_range", (&net.fixed_range).into()),
            (
                "floating_range",
                ConfigValue::str_or_false(net.floating_range.as_deref()),
            ),
            ("network_manager", NETWORK_MANAGER.into()),
            ("config_overrides", net.network_config.clone().into()),
        ]),
    ))
}
