// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The database server and the per-service accounts on it.
//!
//! Only describes them; creating the accounts is the consumer's job.

use super::{attrs, ServiceConfig};
use crate::params::{DbCredentials, ParameterSet};

pub(super) fn compose(params: &ParameterSet) -> Option<ServiceConfig> {
    let roles = &params.roles;
    if !roles.controller {
        return None;
    }

    let enabled = roles.enabled;
    let db = &params.database;
    let mut svc = ServiceConfig::new(
        enabled,
        attrs([("backend", (&db.db_type).into())]),
    )
    .with_component(
        "server",
        attrs([
            ("enabled", enabled.into()),
            ("bind_address", (&db.bind_address).into()),
            ("root_password", (&db.root_password).into()),
        ]),
    );

    // Removes anonymous users and the test database.
    if db.account_security {
        svc = svc.with_component(
            "account_security",
            attrs([("enabled", enabled.into())]),
        );
    }

    let mut accounts: Vec<(&str, &DbCredentials)> = vec![
        ("keystone", &params.keystone.db),
        ("glance", &params.glance.db),
        ("nova", &params.nova.db),
    ];
    if roles.cinder {
        accounts.push(("cinder", &params.cinder.db));
    }
    if roles.quantum {
        accounts.push(("quantum", &params.quantum.db));
    }

    for (service, creds) in accounts {
        svc = svc.with_component(
            format!("grant_{service}"),
            attrs([
                ("user", (&creds.user).into()),
                ("password", (&creds.password).into()),
                ("dbname", (&creds.dbname).into()),
                ("allowed_hosts", (&db.allowed_hosts).into()),
            ]),
        );
    }

    Some(svc)
}
