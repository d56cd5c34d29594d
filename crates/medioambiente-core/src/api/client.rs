//! API client for the Ministerio de Medio Ambiente REST service.
//!
//! This module provides the `ApiClient` struct for the public content
//! endpoints, the form-encoded account endpoints and the bearer-protected
//! report endpoints.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{
    ApiMessage, AreaProtegida, LoginResponse, Medida, Normativa, Noticia, NuevoReporte, Personal,
    Reporte, Servicio, Video, Voluntario,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the ministry API
pub const DEFAULT_BASE_URL: &str = "https://adamix.net/medioambiente/def";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Whether an endpoint needs the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Public,
    Bearer,
}

/// API client for the ministry service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client against the production API with the default timeout
    pub fn new() -> Result<Self, ApiError> {
        Self::with_settings(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against a custom base URL
    pub fn with_settings(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `<base>/<resource>/` or `<base>/<resource>/<id>`
    fn url(&self, resource: &str, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}/{}/{}", self.base_url, resource, id),
            None => format!("{}/{}/", self.base_url, resource),
        }
    }

    fn auth_headers(&self, auth: Auth) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        if auth == Auth::Bearer {
            let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Malformed("token contains invalid header characters".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful and decode its JSON body.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| {
            ApiError::Malformed(format!("could not decode response from {}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str, auth: Auth) -> Result<T, ApiError> {
        debug!(url = url, "GET");
        let response = self
            .client
            .get(url)
            .headers(self.auth_headers(auth)?)
            .send()
            .await?;
        Self::read_json(response, url).await
    }

    /// POST an `application/x-www-form-urlencoded` body
    async fn post_form<T: DeserializeOwned, F: Serialize + ?Sized>(
        &self,
        url: &str,
        form: &F,
        auth: Auth,
    ) -> Result<T, ApiError> {
        debug!(url = url, "POST form");
        let response = self
            .client
            .post(url)
            .headers(self.auth_headers(auth)?)
            .form(form)
            .send()
            .await?;
        Self::read_json(response, url).await
    }

    /// Turn an `{exito, mensaje}` envelope into an error when `exito` is false
    fn expect_success(message: ApiMessage, fallback: &str) -> Result<ApiMessage, ApiError> {
        if message.exito {
            Ok(message)
        } else {
            let text = message.message().unwrap_or(fallback).to_string();
            Err(ApiError::Rejected(text))
        }
    }

    // ===== Account Methods =====

    /// Send credentials to `iniciar_sesion/`.
    ///
    /// Returns the raw envelope; deciding whether it is a usable session is
    /// the auth service's job.
    pub async fn login(&self, correo: &str, clave: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url("iniciar_sesion", None);
        self.post_form(&url, &[("correo", correo), ("clave", clave)], Auth::Public)
            .await
    }

    /// Request a password reset email
    pub async fn recover_password(&self, correo: &str) -> Result<ApiMessage, ApiError> {
        let url = self.url("recuperar_clave", None);
        self.post_form(&url, &[("correo", correo)], Auth::Public).await
    }

    /// Change the signed-in user's password
    pub async fn change_password(
        &self,
        clave_actual: &str,
        clave_nueva: &str,
    ) -> Result<ApiMessage, ApiError> {
        let url = self.url("cambiar_clave", None);
        let message: ApiMessage = self
            .post_form(
                &url,
                &[("clave_actual", clave_actual), ("clave_nueva", clave_nueva)],
                Auth::Bearer,
            )
            .await?;
        Self::expect_success(message, "No se pudo cambiar la contraseña")
    }

    /// Register as a volunteer
    pub async fn register_volunteer(&self, voluntario: &Voluntario) -> Result<ApiMessage, ApiError> {
        let url = self.url("voluntarios", None);
        let message: ApiMessage = self
            .post_form(&url, &voluntario.form_fields(), Auth::Public)
            .await?;
        Self::expect_success(message, "No se pudo registrar")
    }

    // ===== Report Methods =====

    /// Submit a new incident report with photo and coordinates
    pub async fn submit_report(&self, reporte: &NuevoReporte) -> Result<ApiMessage, ApiError> {
        let url = self.url("reportes", None);
        let message: ApiMessage = self
            .post_form(&url, &reporte.form_fields(), Auth::Bearer)
            .await?;
        Self::expect_success(message, "No se pudo enviar el reporte")
    }

    /// Fetch the signed-in user's reports
    pub async fn fetch_reports(&self) -> Result<Vec<Reporte>, ApiError> {
        self.get(&self.url("reportes", None), Auth::Bearer).await
    }

    pub async fn fetch_report(&self, id: i64) -> Result<Reporte, ApiError> {
        self.get(&self.url("reportes", Some(id)), Auth::Bearer).await
    }

    pub async fn fetch_regulations(&self) -> Result<Vec<Normativa>, ApiError> {
        self.get(&self.url("normativas", None), Auth::Bearer).await
    }

    // ===== Public Content Methods =====

    pub async fn fetch_news(&self) -> Result<Vec<Noticia>, ApiError> {
        self.get(&self.url("noticias", None), Auth::Public).await
    }

    pub async fn fetch_videos(&self) -> Result<Vec<Video>, ApiError> {
        self.get(&self.url("videos", None), Auth::Public).await
    }

    pub async fn fetch_protected_areas(&self) -> Result<Vec<AreaProtegida>, ApiError> {
        self.get(&self.url("areas_protegidas", None), Auth::Public)
            .await
    }

    pub async fn fetch_protected_area(&self, id: i64) -> Result<AreaProtegida, ApiError> {
        self.get(&self.url("areas_protegidas", Some(id)), Auth::Public)
            .await
    }

    pub async fn fetch_measures(&self) -> Result<Vec<Medida>, ApiError> {
        self.get(&self.url("medidas", None), Auth::Public).await
    }

    pub async fn fetch_measure(&self, id: i64) -> Result<Medida, ApiError> {
        self.get(&self.url("medidas", Some(id)), Auth::Public).await
    }

    pub async fn fetch_services(&self) -> Result<Vec<Servicio>, ApiError> {
        self.get(&self.url("servicios", None), Auth::Public).await
    }

    pub async fn fetch_staff(&self) -> Result<Vec<Personal>, ApiError> {
        self.get(&self.url("personal", None), Auth::Public).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;

    use super::*;

    /// Serve one HTTP exchange on a local port. Yields the base URL and a
    /// receiver for the raw request (header block lowercased, body verbatim).
    fn one_shot_server(response_json: &'static str) -> (String, mpsc::Receiver<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).expect("read");
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).expect("read body");
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..]).into_owned();

            let reply = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response_json.len(),
                response_json
            );
            stream.write_all(reply.as_bytes()).expect("write");
            tx.send((head, body)).expect("send");
        });

        (format!("http://{}", addr), rx)
    }

    fn local_client(base_url: &str) -> ApiClient {
        ApiClient::with_settings(base_url, Duration::from_secs(5)).expect("build client")
    }

    fn client() -> ApiClient {
        ApiClient::with_settings("https://example.test/api/", Duration::from_secs(5))
            .expect("build client")
    }

    #[test]
    fn test_url_building() {
        let c = client();
        assert_eq!(c.base_url(), "https://example.test/api");
        assert_eq!(c.url("noticias", None), "https://example.test/api/noticias/");
        assert_eq!(c.url("reportes", Some(12)), "https://example.test/api/reportes/12");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = ApiClient::with_settings("ftp://example.test", Duration::from_secs(5))
            .expect_err("ftp must be rejected");
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_bearer_header_requires_token() {
        let c = client();
        assert!(matches!(c.auth_headers(Auth::Bearer), Err(ApiError::MissingToken)));
        assert!(c.auth_headers(Auth::Public).is_ok());

        let authed = c.with_token("abc".to_string());
        let headers = authed.auth_headers(Auth::Bearer).expect("headers");
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc")
        );
        // Original client is untouched
        assert!(!c.has_token());
    }

    #[test]
    fn test_expect_success() {
        let ok = ApiMessage {
            exito: true,
            mensaje: Some("Registrado".into()),
        };
        assert_eq!(
            ApiClient::expect_success(ok, "fallback").expect("ok").message(),
            Some("Registrado")
        );

        let rejected = ApiMessage {
            exito: false,
            mensaje: None,
        };
        match ApiClient::expect_success(rejected, "No se pudo registrar") {
            Err(ApiError::Rejected(m)) => assert_eq!(m, "No se pudo registrar"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bearer_endpoint_without_token_fails_before_network() {
        let c = client();
        assert!(matches!(c.fetch_reports().await, Err(ApiError::MissingToken)));
    }

    // -------------------------------------------------------------------------
    // Wire Format Tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_posts_urlencoded_form_without_auth() {
        let (base, rx) = one_shot_server(
            r#"{"exito":true,"token":"abc","usuario":{"id":1,"nombre":"Ana","correo":"ana@test.com"}}"#,
        );
        let response = local_client(&base)
            .login("ana@test.com", "clave secreta&1")
            .await
            .expect("login");
        assert!(response.exito);
        assert_eq!(response.token.as_deref(), Some("abc"));

        let (head, body) = rx.recv().expect("request");
        assert!(head.starts_with("post /iniciar_sesion/ http/1.1"));
        assert!(head.contains("content-type: application/x-www-form-urlencoded"));
        assert!(!head.contains("authorization:"));
        assert_eq!(body, "correo=ana%40test.com&clave=clave+secreta%261");
    }

    #[tokio::test]
    async fn test_change_password_sends_bearer_and_form() {
        let (base, rx) = one_shot_server(r#"{"exito":true,"mensaje":"Clave actualizada"}"#);
        let message = local_client(&base)
            .with_token("abc".to_string())
            .change_password("vieja clave", "nueva&=1")
            .await
            .expect("change password");
        assert_eq!(message.message(), Some("Clave actualizada"));

        let (head, body) = rx.recv().expect("request");
        assert!(head.starts_with("post /cambiar_clave/ http/1.1"));
        assert!(head.contains("authorization: bearer abc"));
        assert_eq!(body, "clave_actual=vieja+clave&clave_nueva=nueva%26%3D1");
    }

    #[tokio::test]
    async fn test_submit_report_sends_bearer_and_base64_photo() {
        let (base, rx) = one_shot_server(r#"{"exito":true,"mensaje":"Reporte recibido"}"#);
        let reporte = NuevoReporte {
            titulo: "Tala ilegal".into(),
            descripcion: "Árboles".into(),
            foto: b"img".to_vec(),
            latitud: 18.5,
            longitud: -69.9,
        };
        local_client(&base)
            .with_token("abc".to_string())
            .submit_report(&reporte)
            .await
            .expect("submit");

        let (head, body) = rx.recv().expect("request");
        assert!(head.starts_with("post /reportes/ http/1.1"));
        assert!(head.contains("authorization: bearer abc"));
        assert!(head.contains("content-type: application/x-www-form-urlencoded"));
        assert_eq!(
            body,
            "titulo=Tala+ilegal&descripcion=%C3%81rboles&foto=aW1n&latitud=18.5&longitud=-69.9"
        );
    }
}
