// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use openstack_compose::render::render_text;
use openstack_compose::{compose_deployment, ParameterSet};
use slog::Logger;

fn test_logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}

#[test]
fn default_deployment_text() {
    let deployment =
        compose_deployment(&ParameterSet::default(), &test_logger()).unwrap();
    let output = render_text(&deployment);
    expectorate::assert_contents(
        "tests/output/default-deployment.txt",
        &output,
    );
}

#[test]
fn json_services_are_keyed_by_name() {
    let mut params = ParameterSet::default();
    params.roles.controller = true;
    params.roles.quantum = true;

    let deployment = compose_deployment(&params, &test_logger()).unwrap();
    let json = serde_json::to_value(&deployment).unwrap();
    let services = json.as_object().unwrap();

    let names: Vec<&str> = services.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        [
            "block-storage",
            "compute",
            "dashboard",
            "database",
            "identity",
            "image",
            "quantum"
        ]
    );
    assert_eq!(json["compute"]["config_entries"]["multi_host"], "False");
    assert_eq!(json["identity"]["attributes"]["verbose"], "False");
    assert!(json["identity"]["components"]["auth_quantum"].is_object());
    assert_eq!(json["dashboard"]["attributes"]["quantum"], true);
}

#[test]
fn absent_attributes_are_null() {
    let deployment =
        compose_deployment(&ParameterSet::default(), &test_logger()).unwrap();
    let json = serde_json::to_value(&deployment).unwrap();
    let network = &json["network"]["attributes"];
    assert!(network["public_interface"].is_null());
    assert_eq!(network["floating_range"], false);
    assert!(json["network"].get("components").is_none());
}
