//! Default Http Client

use std::time::Duration;

use reqwest::{ClientBuilder, Response};

use crate::types::{HttpRequest, HttpResponse, OpenIdHttpClient};

/// The default HttpClient
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHttpClient;

impl DefaultHttpClient {
    async fn to_response(response: Response) -> Result<HttpResponse, String> {
        let status_code = response.status().as_u16();

        // a failure here (timeout included) must not look like an empty body
        let body_string = response.text().await.map_err(|e| format!("{e}"))?;
        let body = if body_string.is_empty() {
            None
        } else {
            Some(body_string)
        };

        Ok(HttpResponse {
            body,
            status_code,
        })
    }
}

impl OpenIdHttpClient for DefaultHttpClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, String> {
        let mut client_builder = ClientBuilder::new().connect_timeout(Duration::from_secs(10));

        if let Some(timeout) = req.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().map_err(|e| format!("{e}"))?;

        let mut req_builder = client.get(req.url);

        for (name, values) in req.headers {
            for value in values {
                req_builder = req_builder.header(name.clone(), value);
            }
        }

        match req_builder.send().await {
            Ok(res) => Self::to_response(res).await,
            Err(e) => Err(format!("{e}")),
        }
    }
}
