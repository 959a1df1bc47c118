//! Blocking SOAP client implementing the remote service ports.

use std::io::Read;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use oas_common::{AgentStatus, CatalogEntry, ItemKind};

use crate::application::ports::{AgentApi, CatalogApi, SessionApi, SessionToken};
use crate::domain::RemoteError;
use crate::domain::config::Endpoint;
use crate::domain::document::Element;
use crate::infra::soap::envelope::{self, deep_text, field, flag, nested, param};

/// Web service bound at `saw.dll?SoapImpl=<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Session,
    Catalog,
    Agent,
}

impl Service {
    #[must_use]
    pub fn soap_impl(self) -> &'static str {
        match self {
            Self::Session => "nQSessionService",
            Self::Catalog => "webCatalogService",
            Self::Agent => "ibotService",
        }
    }
}

/// One HTTP agent for the whole run, shared by every service call.
pub struct SoapClient {
    agent: ureq::Agent,
    base_url: String,
}

impl SoapClient {
    #[must_use]
    pub fn new(endpoint: &Endpoint) -> Self {
        Self::with_base_url(endpoint.base_url(), endpoint.timeout)
    }

    /// Client against an explicit `.../saw.dll` URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("oas-cli/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    fn call(
        &self,
        service: Service,
        operation: &str,
        params: Vec<Element>,
    ) -> Result<Element, RemoteError> {
        let url = format!("{}?SoapImpl={}", self.base_url, service.soap_impl());
        let body = envelope::request(operation, params);
        tracing::debug!(url = %url, operation, "SOAP call");

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=utf-8")
            .set("SOAPAction", &format!("#{operation}"))
            .send_string(&body);

        match response {
            Ok(resp) => {
                let text = read_body(resp).map_err(|e| RemoteError::Transport {
                    endpoint: url.clone(),
                    reason: format!("reading response: {e}"),
                })?;
                envelope::response_payload(operation, &text)
            }
            Err(ureq::Error::Status(status, resp)) => {
                // Faults arrive with HTTP 500; surface them instead of the bare status.
                let text = read_body(resp).unwrap_or_default();
                match envelope::response_payload(operation, &text) {
                    Err(fault @ RemoteError::Fault { .. }) => Err(fault),
                    _ => Err(RemoteError::Http {
                        endpoint: url,
                        status,
                    }),
                }
            }
            Err(ureq::Error::Transport(transport)) => Err(RemoteError::Transport {
                endpoint: url,
                reason: transport.to_string(),
            }),
        }
    }
}

fn read_body(resp: ureq::Response) -> std::io::Result<String> {
    let mut text = String::new();
    resp.into_reader().read_to_string(&mut text)?;
    Ok(text)
}

fn unexpected(operation: &str, reason: impl Into<String>) -> RemoteError {
    RemoteError::UnexpectedResponse {
        operation: operation.to_string(),
        reason: reason.into(),
    }
}

// ── Session service ──────────────────────────────────────────────────────────

impl SessionApi for SoapClient {
    fn logon(&self, username: &str, password: &str) -> Result<SessionToken, RemoteError> {
        let result = self.call(
            Service::Session,
            "logon",
            vec![param("name", username), param("password", password)],
        )?;
        let raw = field(&result, "sessionID").unwrap_or_else(|| deep_text(&result).trim().to_string());
        if raw.is_empty() {
            return Err(unexpected("logon", "no session id in response"));
        }
        Ok(SessionToken::new(raw))
    }

    fn logoff(&self, token: &SessionToken) -> Result<(), RemoteError> {
        self.call(
            Service::Session,
            "logoff",
            vec![param("sessionID", token.expose())],
        )?;
        Ok(())
    }
}

// ── Catalog service ──────────────────────────────────────────────────────────

impl CatalogApi for SoapClient {
    fn list_children(
        &self,
        folder: &str,
        token: &SessionToken,
    ) -> Result<Vec<CatalogEntry>, RemoteError> {
        let result = self.call(
            Service::Catalog,
            "getSubItems",
            vec![
                param("path", folder),
                param("mask", "*"),
                flag("resolveLinks", false),
                param("sessionID", token.expose()),
            ],
        )?;

        result
            .elements()
            .filter(|el| el.local_name() == "itemInfo")
            .map(|item| -> Result<CatalogEntry, RemoteError> {
                let path = item
                    .child_text("path")
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| unexpected("getSubItems", "itemInfo without path"))?;
                let item_type = item.child_text("type").unwrap_or_default();
                Ok(CatalogEntry {
                    path,
                    kind: ItemKind::from_item_type(item_type.trim()),
                    signature: item
                        .child_text("signature")
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    fn read_object(&self, path: &str, token: &SessionToken) -> Result<Vec<u8>, RemoteError> {
        let result = self.call(
            Service::Catalog,
            "readObjects",
            vec![
                param("paths", path),
                flag("resolveLinks", false),
                param("errorMode", "ErrorCodeAndText"),
                param("returnOptions", "ObjectAsText"),
                param("sessionID", token.expose()),
            ],
        )?;

        let object = result
            .child("catalogObject")
            .ok_or_else(|| unexpected("readObjects", "no catalogObject in response"))?;

        if let Some(error) = object.child("errorInfo") {
            let code = error.child_text("code").unwrap_or_default();
            if !code.trim().is_empty() {
                return Err(RemoteError::Fault {
                    code: code.trim().to_string(),
                    message: error
                        .child_text("message")
                        .map(|m| m.trim().to_string())
                        .unwrap_or_default(),
                });
            }
        }

        let body = object.child_text("catalogObject").unwrap_or_default();
        if body.trim().is_empty() {
            return Err(unexpected("readObjects", format!("empty object body for {path}")));
        }
        Ok(body.into_bytes())
    }

    fn copy_snapshot(&self, path: &str, token: &SessionToken) -> Result<Vec<u8>, RemoteError> {
        let result = self.call(
            Service::Catalog,
            "copyItem2",
            vec![
                param("path", path),
                flag("recursive", false),
                flag("permissions", true),
                flag("timestamps", true),
                flag("useMtom", false),
                param("sessionID", token.expose()),
            ],
        )?;

        let encoded: String = deep_text(&result)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if encoded.is_empty() {
            return Err(unexpected("copyItem2", format!("empty archive for {path}")));
        }
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| unexpected("copyItem2", format!("archive is not base64: {e}")))
    }
}

// ── Agent service ────────────────────────────────────────────────────────────

impl AgentApi for SoapClient {
    fn write_agent(&self, path: &str, body: &[u8], token: &SessionToken) -> Result<(), RemoteError> {
        let object = String::from_utf8_lossy(body);
        self.call(
            Service::Agent,
            "writeIBot",
            vec![
                nested("obj", vec![param("catalogObject", &object)]),
                param("path", path),
                flag("resolveLinks", false),
                flag("allowOverwrite", true),
                param("sessionID", token.expose()),
            ],
        )?;
        Ok(())
    }

    fn agent_status(&self, path: &str, token: &SessionToken) -> Result<AgentStatus, RemoteError> {
        let result = self.call(
            Service::Agent,
            "getIBotStatus",
            vec![param("path", path), param("sessionID", token.expose())],
        )?;
        let value = |name: &str| field(&result, name).filter(|v| !v.is_empty());
        Ok(AgentStatus {
            last_run: value("lastRun"),
            next_run: value("nextRun"),
            last_run_status: value("lastRunStatus"),
            priority: value("priority"),
            agent_enabled: value("agentEnabled"),
            subscribed: value("subscribed"),
            specific_recipient: value("specificRecipient"),
        })
    }

    fn set_enabled(&self, path: &str, enabled: bool, token: &SessionToken) -> Result<(), RemoteError> {
        self.call(
            Service::Agent,
            "enableIBot",
            vec![
                param("path", path),
                flag("enable", enabled),
                param("sessionID", token.expose()),
            ],
        )?;
        Ok(())
    }
}
