use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

pub(crate) struct BaseClient {
    address: String,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    BadClientData,
    ServiceUnavailable,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self { address }
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let client = Client::new();
        let url = format!("{}/{}", self.address, path);
        client.request(method, &url)
    }

    fn check_status_code(
        &self,
        res: &Response,
        expected_status_code: StatusCode,
    ) -> Result<(), APIError> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(());
        }
        match status {
            StatusCode::BAD_REQUEST => Err(APIError::BadClientData),
            StatusCode::SERVICE_UNAVAILABLE => Err(APIError::ServiceUnavailable),
            _ => Err(APIError::UnexpectedStatusCode(status)),
        }
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.check_status_code(&res, expected_status_code)?;
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match self.get_client(Method::GET, path).send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = match self.get_client(Method::POST, path).send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_code).await
    }
}
