use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    Attendance, AttendanceRecord, CreateYouthRequest, ErrorResponse, NewAttendance, Role, Youth,
    ROLE_HEADER,
};

/// Base URL used when none is baked in at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";

/// API client for communicating with the backend server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
    role: Option<Role>,
}

impl ApiClient {
    /// Create a new API client; `NETCOMPASSION_API_URL` at build time
    /// overrides the default base URL
    pub fn new() -> Self {
        let base_url = option_env!("NETCOMPASSION_API_URL").unwrap_or(DEFAULT_API_BASE_URL);
        Self::with_base_url(base_url.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            role: None,
        }
    }

    /// Send the caller's role with every request
    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_role_header(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.role {
            Some(role) => builder.header(ROLE_HEADER, role.as_str()),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.with_role_header(Request::get(&self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.with_role_header(Request::post(&self.url(path)))
    }

    /// Get every youth record
    pub async fn get_youth(&self) -> Result<Vec<Youth>, String> {
        match self.get("/api/youth").send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Create a youth record
    pub async fn create_youth(&self, request: &CreateYouthRequest) -> Result<Youth, String> {
        let request = self
            .post("/api/youth")
            .json(request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;

        match request.send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Get every attendance record with youth expanded
    pub async fn get_attendance(&self) -> Result<Vec<AttendanceRecord>, String> {
        match self.get("/api/attendance").send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }

    /// Submit a batch of attendance in one request
    pub async fn submit_attendance(&self, records: &[NewAttendance]) -> Result<Vec<Attendance>, String> {
        let request = self
            .post("/api/attendance")
            .json(&records)
            .map_err(|e| format!("Failed to serialize request: {}", e))?;

        match request.send().await {
            Ok(response) => read_json(response).await,
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a success body, or surface the server's error message
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e));
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ErrorResponse::message_from_body(&body, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_custom_base_url() {
        let client = ApiClient::with_base_url("http://example.test".to_string());
        assert_eq!(client.url("/api/youth"), "http://example.test/api/youth");
    }

    #[wasm_bindgen_test]
    fn test_role_changes_equality() {
        let anonymous = ApiClient::with_base_url("http://example.test".to_string());
        let pcd = anonymous.clone().with_role(Some(Role::Pcd));
        assert_ne!(anonymous, pcd);
        assert_eq!(pcd, anonymous.with_role(Some(Role::Pcd)));
    }
}
