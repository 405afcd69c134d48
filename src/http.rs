use crate::types::{HttpRequest, HttpResponse, OpenIdError, OpenIdHttpClient, OpenIdReturnType};

pub(crate) const USER_AGENT: &str = "openid-consumer";

/// Sends `request` with `http_client` and checks the response for a 2xx
/// status and a body. Every failure is a handshake error.
pub(crate) async fn request_async<H>(
    request: HttpRequest,
    http_client: &H,
) -> OpenIdReturnType<HttpResponse>
where
    H: OpenIdHttpClient,
{
    let request = request.header("User-Agent", USER_AGENT);

    let response = http_client
        .request(request)
        .await
        .map_err(|e| request_send_error(&e))?;

    process_response(response)
}

fn process_response(response: HttpResponse) -> OpenIdReturnType<HttpResponse> {
    let response = return_error_if_not_success_status(response)?;
    return_error_if_body_is_absent(response)
}

#[inline]
fn request_send_error(e: &str) -> OpenIdError {
    OpenIdError::new_handshake_error(&format!("error while sending the request: {e}"), None)
}

#[inline]
fn return_error_if_not_success_status(response: HttpResponse) -> OpenIdReturnType<HttpResponse> {
    if !(200..300).contains(&response.status_code) {
        return Err(OpenIdError::new_handshake_error(
            &format!("expected 2xx, got: {}", response.status_code),
            Some(response),
        ));
    }
    Ok(response)
}

#[inline]
fn return_error_if_body_is_absent(response: HttpResponse) -> OpenIdReturnType<HttpResponse> {
    if response.body.is_none() {
        return Err(OpenIdError::new_handshake_error(
            &format!(
                "expected {} with body but no body was returned",
                response.status_code
            ),
            Some(response),
        ));
    }
    Ok(response)
}
