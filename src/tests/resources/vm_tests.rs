use crate::{ProxmoxError, tests::create_authenticated_client};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_vms_list_success() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "vmid": 100,
                    "name": "ubuntu-vm",
                    "status": "running",
                    "cpu": 0.23,
                    "cpus": 4,
                    "mem": 4294967296_i64,
                    "maxmem": 8589934592_i64,
                    "disk": 0,
                    "maxdisk": 42949672960_i64,
                    "diskread": 1048576,
                    "diskwrite": 2097152,
                    "netin": 4096,
                    "netout": 8192,
                    "uptime": 123456,
                    "pid": 4321,
                    "tags": "ubuntu;production"
                },
                {
                    "vmid": 101,
                    "status": "stopped",
                    "maxmem": 17179869184_i64,
                    "maxdisk": 107374182400_i64
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let vms = client.vms("pve1").await.unwrap();
    assert_eq!(vms.len(), 2);

    let vm1 = &vms[0];
    assert_eq!(vm1.vmid, 100);
    assert_eq!(vm1.name.as_deref(), Some("ubuntu-vm"));
    assert_eq!(vm1.status, "running");
    assert_eq!(vm1.cpu, Some(0.23));
    assert_eq!(vm1.cpus, Some(4));
    assert_eq!(vm1.mem, Some(4294967296));
    assert_eq!(vm1.maxdisk, Some(42949672960));
    assert_eq!(vm1.diskwrite, Some(2097152));
    assert_eq!(vm1.netout, Some(8192));
    assert_eq!(vm1.pid, Some(4321));
    assert_eq!(vm1.tags.as_deref(), Some("ubuntu;production"));

    let vm2 = &vms[1];
    assert_eq!(vm2.vmid, 101);
    assert_eq!(vm2.name, None);
    assert_eq!(vm2.status, "stopped");
    assert_eq!(vm2.cpu, None);
    assert_eq!(vm2.uptime, None);
}

#[tokio::test]
async fn test_vms_list_empty() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let vms = client.vms("pve1").await.unwrap();
    assert!(vms.is_empty());
}

#[tokio::test]
async fn test_vms_list_unknown_node() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/ghost/qemu"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no such node"))
        .mount(&mock_server)
        .await;

    let err = client.vms("ghost").await.unwrap_err();
    assert!(matches!(err, ProxmoxError::Enumeration { .. }));
    assert!(err.to_string().contains("VMs on node 'ghost'"));
}
