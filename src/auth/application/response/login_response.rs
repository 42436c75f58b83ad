use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginResponse {
    pub data: Option<LoginResponseData>,
}

#[derive(Deserialize)]
pub struct LoginResponseData {
    pub ticket: String,
    #[serde(rename = "CSRFPreventionToken", default)]
    #[allow(dead_code)] // Only needed for write requests, which pmox never sends
    pub csrf_token: Option<String>,
    #[serde(rename = "clustername", default)]
    pub cluster_name: Option<String>,
}
