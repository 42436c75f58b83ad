use crate::{IPV4, IPV6, ProxmoxError, tests::create_authenticated_client};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_interfaces_list_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(
            "/api2/json/nodes/pve1/qemu/100/agent/network-get-interfaces",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "result": [
                    {
                        "name": "lo",
                        "hardware-address": "00:00:00:00:00:00",
                        "ip-addresses": [
                            { "ip-address": "127.0.0.1", "ip-address-type": "ipv4", "prefix": 8 },
                            { "ip-address": "::1", "ip-address-type": "ipv6", "prefix": 128 }
                        ],
                        "statistics": {
                            "rx-bytes": 3200, "rx-dropped": 0, "rx-errs": 0, "rx-packets": 40,
                            "tx-bytes": 3200, "tx-dropped": 0, "tx-errs": 0, "tx-packets": 40
                        }
                    },
                    {
                        "name": "ens18",
                        "hardware-address": "bc:24:11:6a:2f:01",
                        "ip-addresses": [
                            { "ip-address": "192.168.1.50", "ip-address-type": "ipv4", "prefix": 24 },
                            { "ip-address": "fe80::be24:11ff:fe6a:2f01", "ip-address-type": "ipv6", "prefix": 64 }
                        ],
                        "statistics": { "rx-bytes": 987654321, "tx-bytes": 123456789 }
                    }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let interfaces = client.network_interfaces("pve1", 100).await.unwrap();
    assert_eq!(interfaces.len(), 2);

    let lo = &interfaces[0];
    assert_eq!(lo.name, "lo");
    assert!(lo.is_loopback());
    assert_eq!(lo.statistics.len(), 8);

    let ens18 = &interfaces[1];
    assert_eq!(ens18.hardware_address.as_deref(), Some("bc:24:11:6a:2f:01"));
    assert_eq!(ens18.first_address_of(IPV4).unwrap().address, "192.168.1.50");
    assert_eq!(ens18.first_address_of(IPV6).unwrap().prefix, 64);
    assert_eq!(ens18.statistics.get("rx-bytes"), Some(&987654321));
}

#[tokio::test]
async fn test_interfaces_agent_not_running() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(
            "/api2/json/nodes/pve1/qemu/100/agent/network-get-interfaces",
        ))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "data": null,
                "message": "QEMU guest agent is not running\n"
            })),
        )
        .mount(&mock_server)
        .await;

    let err = client.network_interfaces("pve1", 100).await.unwrap_err();
    match &err {
        ProxmoxError::Enumeration { resource, source } => {
            assert_eq!(resource, "network interfaces of VM 100 on node 'pve1'");
            assert!(source.to_string().contains("guest agent is not running"));
        }
        other => panic!("expected enumeration error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_interfaces_missing_result_wrapper() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path(
            "/api2/json/nodes/pve1/qemu/100/agent/network-get-interfaces",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [ { "name": "eth0" } ]
        })))
        .mount(&mock_server)
        .await;

    let result = client.network_interfaces("pve1", 100).await;
    assert!(matches!(result, Err(ProxmoxError::Enumeration { .. })));
}
