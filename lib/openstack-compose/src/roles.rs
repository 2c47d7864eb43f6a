// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derivation of per-host enablement flags from role flags.

use serde_derive::Serialize;

use crate::params::ParameterSet;

/// What nova-network does on a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkRole {
    /// Run the network service.
    pub enabled: bool,
    /// Install the network service package.
    pub install_service: bool,
    /// Seed the fixed and floating networks.
    pub create_networks: bool,
}

impl NetworkRole {
    const fn new(
        enabled: bool,
        install_service: bool,
        create_networks: bool,
    ) -> Self {
        Self { enabled, install_service, create_networks }
    }

    /// Network role for a (controller, compute, multi_host) combination.
    ///
    /// Multi-host networking runs the network service on every compute node;
    /// otherwise it runs on the controller. Only controllers seed networks.
    pub const fn for_roles(
        controller: bool,
        compute: bool,
        multi_host: bool,
    ) -> Self {
        match (controller, compute, multi_host) {
            (true, true, true) => Self::new(true, true, true),
            (true, false, true) => Self::new(false, false, true),
            (false, true, true) => Self::new(true, true, false),
            (false, false, true) => Self::new(false, false, false),
            (true, true, false) => Self::new(true, true, true),
            (true, false, false) => Self::new(true, true, true),
            (false, true, false) => Self::new(false, false, false),
            (false, false, false) => Self::new(false, false, false),
        }
    }
}

/// Flags derived from the role section of a [`ParameterSet`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleFlags {
    pub network_enabled: bool,
    pub network_service_installed: bool,
    pub network_created: bool,
    /// Compose nova-network. False when Quantum provides networking.
    pub nova_network: bool,
    pub multi_host: bool,
    pub send_arp_for_ha: bool,
    /// Controller-only nova services are composed.
    pub controller_services: bool,
    /// Compute-node services are composed.
    pub compute_services: bool,
    pub vncproxy_enabled: bool,
    /// VNC proxy host handed to compute nodes; `None` renders as `false`.
    pub vncproxy_target: Option<String>,
    pub api_sync_db: bool,
}

/// Resolves the role flags for `params`.
pub fn resolve(params: &ParameterSet) -> RoleFlags {
    let roles = &params.roles;
    let network = NetworkRole::for_roles(
        roles.controller,
        roles.compute,
        roles.multi_host,
    );

    let vncproxy_target = match &params.nova.vncproxy_host {
        Some(host) => Some(host.clone()),
        None if roles.multi_host => {
            Some(params.network.internal_address.clone())
        }
        None => None,
    };

    RoleFlags {
        network_enabled: network.enabled,
        network_service_installed: network.install_service,
        network_created: network.create_networks,
        nova_network: !roles.quantum,
        multi_host: roles.multi_host,
        send_arp_for_ha: roles.multi_host,
        controller_services: roles.controller,
        compute_services: roles.compute,
        vncproxy_enabled: roles.controller
            && roles.enabled
            && params.nova.vnc_enabled,
        vncproxy_target,
        api_sync_db: roles.controller,
    }
}

impl RoleFlags {
    pub fn network_role(&self) -> NetworkRole {
        NetworkRole {
            enabled: self.network_enabled,
            install_service: self.network_service_installed,
            create_networks: self.network_created,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // (controller, compute, multi_host) => (enabled, install, create)
    const TABLE: &[((bool, bool, bool), (bool, bool, bool))] = &[
        ((true, true, true), (true, true, true)),
        ((true, false, true), (false, false, true)),
        ((false, true, true), (true, true, false)),
        ((true, true, false), (true, true, true)),
        ((false, true, false), (false, false, false)),
        ((true, false, false), (true, true, true)),
    ];

    fn params_for(
        controller: bool,
        compute: bool,
        multi_host: bool,
    ) -> ParameterSet {
        let mut params = ParameterSet::default();
        params.roles.controller = controller;
        params.roles.compute = compute;
        params.roles.multi_host = multi_host;
        params.network.public_interface = Some("eth0".to_string());
        params
    }

    #[test]
    fn network_truth_table() {
        for &((controller, compute, multi_host), expected) in TABLE {
            let flags = resolve(&params_for(controller, compute, multi_host));
            let role = flags.network_role();
            assert_eq!(
                (role.enabled, role.install_service, role.create_networks),
                expected,
                "controller={controller} compute={compute} \
                 multi_host={multi_host}"
            );
        }
    }

    #[test]
    fn install_mirrors_enabled() {
        for controller in [false, true] {
            for compute in [false, true] {
                for multi_host in [false, true] {
                    let role =
                        NetworkRole::for_roles(controller, compute, multi_host);
                    assert_eq!(role.enabled, role.install_service);
                }
            }
        }
    }

    #[test]
    fn multi_host_points_vnc_proxy_at_internal_address() {
        let mut params = params_for(false, true, true);
        params.network.internal_address = "10.0.0.7".to_string();
        let flags = resolve(&params);
        assert!(flags.send_arp_for_ha);
        assert_eq!(flags.vncproxy_target.as_deref(), Some("10.0.0.7"));

        let flags = resolve(&params_for(false, true, false));
        assert!(!flags.send_arp_for_ha);
        assert_eq!(flags.vncproxy_target, None);
    }

    #[test]
    fn explicit_vncproxy_host_wins() {
        let mut params = params_for(false, true, false);
        params.nova.vncproxy_host = Some("127.0.0.2".to_string());
        assert_eq!(
            resolve(&params).vncproxy_target.as_deref(),
            Some("127.0.0.2")
        );
    }

    #[test]
    fn quantum_suppresses_nova_network() {
        let mut params = params_for(true, false, false);
        params.roles.quantum = true;
        assert!(!resolve(&params).nova_network);
    }

    #[test]
    fn vncproxy_follows_master_switch() {
        let mut params = params_for(true, false, false);
        assert!(resolve(&params).vncproxy_enabled);
        params.roles.enabled = false;
        assert!(!resolve(&params).vncproxy_enabled);
        params.roles.enabled = true;
        params.nova.vnc_enabled = false;
        assert!(!resolve(&params).vncproxy_enabled);
    }
}
