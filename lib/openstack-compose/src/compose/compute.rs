// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nova.
//!
//! Every host gets the common settings and the API. Controllers add the
//! control-plane daemons; compute nodes add the hypervisor side.

use super::{attrs, ServiceConfig};
use crate::connection::Connections;
use crate::params::ParameterSet;
use crate::roles::RoleFlags;
use crate::value::{ConfigValue, LegacyBool};

const IMAGE_SERVICE: &str = "nova.image.glance.GlanceImageService";
const VOLUME_API_CLASS: &str = "nova.volume.cinder.API";
const SERVICE_DOWN_TIME: &str = "60";
const GLANCE_API_PORT: u16 = 9292;

/// Glance endpoints handed to nova, comma separated.
fn glance_api_servers(params: &ParameterSet) -> String {
    match &params.nova.glance_api_servers {
        Some(servers) => servers.join(","),
        None if params.roles.controller => {
            format!("{}:{}", params.network.public_address, GLANCE_API_PORT)
        }
        None => format!("localhost:{GLANCE_API_PORT}"),
    }
}

pub(super) fn compose(
    params: &ParameterSet,
    flags: &RoleFlags,
    conns: &Connections,
) -> ServiceConfig {
    let enabled = params.roles.enabled;
    let nova = &params.nova;
    let rabbit = &params.rabbit;
    let net = &params.network;

    let mut svc = ServiceConfig::new(
        enabled,
        attrs([
            ("sql_connection", conns.nova.clone().into()),
            ("rabbit_host", (&rabbit.host).into()),
            ("rabbit_userid", (&rabbit.user).into()),
            ("rabbit_password", (&rabbit.password).into()),
            ("rabbit_virtual_host", (&rabbit.virtual_host).into()),
            ("image_service", IMAGE_SERVICE.into()),
            ("glance_api_servers", glance_api_servers(params).into()),
            ("verbose", LegacyBool(params.verbose).into()),
            ("service_down_time", SERVICE_DOWN_TIME.into()),
        ]),
    )
    .with_config_entry("multi_host", flags.multi_host.into())
    .with_config_entry("send_arp_for_ha", flags.send_arp_for_ha.into())
    .with_config_entry(
        "auto_assign_floating_ip",
        net.auto_assign_floating_ip.into(),
    )
    .with_component(
        "api",
        attrs([
            ("enabled", enabled.into()),
            ("admin_tenant_name", "services".into()),
            ("admin_user", "nova".into()),
            ("admin_password", (&nova.user_password).into()),
            ("auth_host", (&params.keystone.host).into()),
            ("enabled_apis", (&nova.enabled_apis).into()),
            ("volume_api_class", VOLUME_API_CLASS.into()),
            ("sync_db", flags.api_sync_db.into()),
        ]),
    );

    if flags.controller_services {
        svc = svc.with_component(
            "rabbitmq",
            attrs([
                ("userid", (&rabbit.user).into()),
                ("password", (&rabbit.password).into()),
                ("virtual_host", (&rabbit.virtual_host).into()),
                ("enabled", enabled.into()),
            ]),
        );
        for daemon in ["cert", "consoleauth", "scheduler", "objectstore"] {
            svc = svc
                .with_component(daemon, attrs([("enabled", enabled.into())]));
        }
        svc = svc.with_component(
            "vncproxy",
            attrs([
                ("host", (&net.public_address).into()),
                ("enabled", flags.vncproxy_enabled.into()),
            ]),
        );
    }

    if flags.compute_services {
        svc = svc
            .with_component(
                "compute",
                attrs([
                    ("enabled", enabled.into()),
                    ("vnc_enabled", nova.vnc_enabled.into()),
                    (
                        "vncserver_proxyclient_address",
                        (&net.internal_address).into(),
                    ),
                    (
                        "vncproxy_host",
                        ConfigValue::str_or_false(
                            flags.vncproxy_target.as_deref(),
                        ),
                    ),
                ]),
            )
            .with_component(
                "libvirt",
                attrs([
                    ("libvirt_type", (&nova.libvirt_type).into()),
                    ("vncserver_listen", (&net.internal_address).into()),
                ]),
            );
    }

    svc
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn glance_servers_default_by_role() {
        let mut params = ParameterSet::default();
        assert_eq!(glance_api_servers(&params), "localhost:9292");

        params.roles.controller = true;
        params.network.public_address = "10.0.0.1".to_string();
        assert_eq!(glance_api_servers(&params), "10.0.0.1:9292");

        params.nova.glance_api_servers =
            Some(vec!["c1:9292".to_string(), "c2:9292".to_string()]);
        assert_eq!(glance_api_servers(&params), "c1:9292,c2:9292");
    }
}
