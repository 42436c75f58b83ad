//! End-to-end resolution over HTTP: login-free client, real enumerator.

use crate::{
    IPV4, IPV6, ProxmoxError,
    cli::{Action, ConnectionString, Outcome, execute},
    tests::create_authenticated_client,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_json(mock_server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

async fn mount_nodes(mock_server: &MockServer, nodes: &[&str]) {
    let data: Vec<_> = nodes
        .iter()
        .map(|node| serde_json::json!({ "node": node, "status": "online", "type": "node" }))
        .collect();
    mount_json(mock_server, "/api2/json/nodes", serde_json::json!({ "data": data })).await;
}

async fn mount_vms(mock_server: &MockServer, node: &str, vms: &[(u32, &str)]) {
    let data: Vec<_> = vms
        .iter()
        .map(|(vmid, name)| serde_json::json!({ "vmid": vmid, "name": name, "status": "running" }))
        .collect();
    mount_json(
        mock_server,
        &format!("/api2/json/nodes/{}/qemu", node),
        serde_json::json!({ "data": data }),
    )
    .await;
}

async fn mount_interfaces(
    mock_server: &MockServer,
    node: &str,
    vmid: u32,
    interfaces: serde_json::Value,
) {
    mount_json(
        mock_server,
        &format!(
            "/api2/json/nodes/{}/qemu/{}/agent/network-get-interfaces",
            node, vmid
        ),
        serde_json::json!({ "data": { "result": interfaces } }),
    )
    .await;
}

fn loopback() -> serde_json::Value {
    serde_json::json!({
        "name": "lo",
        "hardware-address": "00:00:00:00:00:00",
        "ip-addresses": [
            { "ip-address": "127.0.0.1", "ip-address-type": "ipv4", "prefix": 8 },
            { "ip-address": "::1", "ip-address-type": "ipv6", "prefix": 128 }
        ]
    })
}

fn nic(mac: &str, addresses: &[(&str, &str)]) -> serde_json::Value {
    let addresses: Vec<_> = addresses
        .iter()
        .map(|(address, family)| {
            serde_json::json!({ "ip-address": address, "ip-address-type": family, "prefix": 24 })
        })
        .collect();
    serde_json::json!({ "name": "ens18", "hardware-address": mac, "ip-addresses": addresses })
}

#[tokio::test]
async fn test_find_ip_address_across_cluster() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1", "pve2"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "db")]).await;
    mount_vms(&mock_server, "pve2", &[(200, "web"), (201, "cache")]).await;
    mount_interfaces(
        &mock_server,
        "pve2",
        200,
        serde_json::json!([
            loopback(),
            nic(
                "bc:24:11:00:00:02",
                &[("fd00::200", IPV6), ("10.0.2.200", IPV4)]
            )
        ]),
    )
    .await;

    assert_eq!(client.find_ip_address("web", IPV4).await.unwrap(), "10.0.2.200");
    assert_eq!(client.find_ip_address("web", IPV6).await.unwrap(), "fd00::200");
}

#[tokio::test]
async fn test_find_ip_address_continues_to_second_vm_with_same_name() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "web"), (101, "web")]).await;
    mount_interfaces(&mock_server, "pve1", 100, serde_json::json!([loopback()])).await;
    mount_interfaces(
        &mock_server,
        "pve1",
        101,
        serde_json::json!([nic("bc:24:11:00:01:01", &[("10.0.1.101", IPV4)])]),
    )
    .await;

    assert_eq!(client.find_ip_address("web", IPV4).await.unwrap(), "10.0.1.101");
}

#[tokio::test]
async fn test_find_ip_address_unknown_name_lists_no_interfaces() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "web")]).await;
    Mock::given(method("GET"))
        .and(path(
            "/api2/json/nodes/pve1/qemu/100/agent/network-get-interfaces",
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client.find_ip_address("mail", IPV4).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "No VM or network interfaces found for name \"mail\""
    );
}

#[tokio::test]
async fn test_find_ip_address_aborts_on_late_failure() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    // pve1 already yields a usable address, but pve2 cannot be listed.
    mount_nodes(&mock_server, &["pve1", "pve2"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "web")]).await;
    mount_interfaces(
        &mock_server,
        "pve1",
        100,
        serde_json::json!([nic("bc:24:11:00:00:01", &[("10.0.1.100", IPV4)])]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve2/qemu"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = client.find_ip_address("web", IPV4).await;
    assert!(matches!(result, Err(ProxmoxError::Enumeration { .. })));
}

#[tokio::test]
async fn test_ssh_action_falls_back_to_ipv6() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "v6only")]).await;
    mount_interfaces(
        &mock_server,
        "pve1",
        100,
        serde_json::json!([
            loopback(),
            nic("bc:24:11:00:00:01", &[("2001:db8::100", IPV6)])
        ]),
    )
    .await;

    let action = Action::Ssh(ConnectionString::parse("admin@v6only").unwrap());
    let outcome = execute(&client, action).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Shell {
            user: "admin".to_string(),
            address: "2001:db8::100".to_string()
        }
    );
}

#[tokio::test]
async fn test_ssh_action_reports_vm_when_nothing_resolves() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "dark")]).await;
    mount_interfaces(&mock_server, "pve1", 100, serde_json::json!([loopback()])).await;

    let action = Action::Ssh(ConnectionString::parse("admin@dark").unwrap());
    let err = execute(&client, action).await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot determine IP for VM \"dark\".");
}

#[tokio::test]
async fn test_lookup_action_prints_address() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    mount_nodes(&mock_server, &["pve1"]).await;
    mount_vms(&mock_server, "pve1", &[(100, "web")]).await;
    mount_interfaces(
        &mock_server,
        "pve1",
        100,
        serde_json::json!([nic("bc:24:11:00:00:01", &[("10.0.1.100", IPV4)])]),
    )
    .await;

    let action = Action::Lookup {
        name: "web".to_string(),
        family: IPV4,
    };
    let outcome = execute(&client, action).await.unwrap();
    assert_eq!(outcome, Outcome::Print("10.0.1.100".to_string()));
}
