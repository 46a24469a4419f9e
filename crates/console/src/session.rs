#![forbid(unsafe_code)]

use crate::error::ConsoleError;
use crate::fingerprint::view_fingerprint;
use crate::jsonrpc::{
    JsonRpcRequest, METHOD_NOT_FOUND, NOT_INITIALIZED, json_rpc_error, json_rpc_response,
};
use crate::params::{self, TopLevelRequest};
use crate::session_log::SessionLog;
use serde_json::{Value, json};
use tm_core::facets::{DataSource, SubFacet};
use tm_core::upload::UploadWizard;
use tm_core::{Engine, FacetState, MemoryRegistry, PartitionPolicy};
use tracing::{debug, warn};

pub(crate) const SERVER_NAME: &str = "tidemark-console";

pub(crate) const METHODS: &[&str] = &[
    "initialize",
    "ping",
    "facets/get",
    "facets/set_mode",
    "facets/set_top_level",
    "facets/set",
    "facets/reset",
    "view/get",
    "upload/attach",
    "upload/metadata",
    "upload/back",
    "upload/get",
];

/// One user's query session: facet state, the view engine and the upload wizard.
pub(crate) struct Session {
    initialized: bool,
    facets: FacetState,
    default_source: DataSource,
    engine: Engine<MemoryRegistry>,
    wizard: UploadWizard,
    log: SessionLog,
}

impl Session {
    pub(crate) fn new(
        registry: MemoryRegistry,
        policy: PartitionPolicy,
        default_source: DataSource,
        log: SessionLog,
    ) -> Self {
        let mut facets = FacetState::new();
        facets.set_sub_facet(SubFacet::DataSource(default_source));
        Self {
            initialized: false,
            facets,
            default_source,
            engine: Engine::new(registry, policy),
            wizard: UploadWizard::new(),
            log,
        }
    }

    pub(crate) fn log_mut(&mut self) -> &mut SessionLog {
        &mut self.log
    }

    /// Answers one request. `None` for notifications, which get no reply.
    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        self.log.note_method(method);
        let is_notification = request.id.is_none();

        if method == "initialized" {
            self.initialized = true;
            return None;
        }
        if method != "initialize" && !self.initialized {
            warn!(method, "request before initialize");
            self.log.note_error("request before initialize");
            if is_notification {
                return None;
            }
            return Some(json_rpc_error(
                request.id,
                NOT_INITIALIZED,
                "Session not initialized",
            ));
        }

        let outcome = self.dispatch(method, request.params.as_ref());
        if is_notification {
            return None;
        }
        Some(match outcome {
            Some(Ok(result)) => json_rpc_response(request.id, result),
            Some(Err(err)) => {
                let message = err.to_string();
                warn!(method, error = %message, "request rejected");
                self.log.note_error(&message);
                json_rpc_error(request.id, err.code(), &message)
            }
            None => {
                warn!(method, "unknown method");
                json_rpc_error(
                    request.id,
                    METHOD_NOT_FOUND,
                    &format!("Method not found: {method}"),
                )
            }
        })
    }

    fn dispatch(
        &mut self,
        method: &str,
        params: Option<&Value>,
    ) -> Option<Result<Value, ConsoleError>> {
        let result = match method {
            "initialize" => {
                self.initialized = true;
                Ok(json!({
                    "serverInfo": { "name": SERVER_NAME, "version": crate::config::VERSION },
                    "capabilities": { "methods": METHODS },
                }))
            }
            "ping" => Ok(json!({})),
            "facets/get" => Ok(json!({ "facets": self.facets })),
            "facets/set_mode" => params::parse_mode(params).and_then(|mode| {
                let changed = self.facets.set_mode(mode);
                self.snapshot(changed)
            }),
            "facets/set_top_level" => {
                params::parse_top_level(self.facets.mode(), params).and_then(|request| {
                    let changed = match request {
                        TopLevelRequest::Set(top) => self.facets.set_top_level(top),
                        TopLevelRequest::InactiveFamily(top) => {
                            self.facets.set_top_level(Some(top))
                        }
                    };
                    self.snapshot(changed)
                })
            }
            "facets/set" => params::parse_sub_facet(params).and_then(|facet| {
                let changed = self.facets.set_sub_facet(facet);
                self.snapshot(changed)
            }),
            "facets/reset" => {
                let before = self.facets.clone();
                self.facets.reset_all();
                self.facets.set_sub_facet(SubFacet::DataSource(self.default_source));
                let changed = before != self.facets;
                self.snapshot(changed)
            }
            "view/get" => self.snapshot(false),
            "upload/attach" => params::parse_files(params).and_then(|files| {
                self.wizard.attach(&files)?;
                self.wizard_json()
            }),
            "upload/metadata" => params::parse_metadata(params).and_then(|metadata| {
                self.wizard.submit_metadata(metadata)?;
                self.wizard_json()
            }),
            "upload/back" => {
                self.wizard.back();
                self.wizard_json()
            }
            "upload/get" => self.wizard_json(),
            _ => return None,
        };
        Some(result)
    }

    fn snapshot(&mut self, changed: bool) -> Result<Value, ConsoleError> {
        let facets = serde_json::to_value(&self.facets)?;
        let view = self.engine.view(&self.facets);
        let fingerprint = view_fingerprint(view)?;
        debug!(changed, fingerprint = %fingerprint, "view snapshot");
        Ok(json!({
            "changed": changed,
            "facets": facets,
            "view": view,
            "fingerprint": fingerprint,
        }))
    }

    fn wizard_json(&self) -> Result<Value, ConsoleError> {
        Ok(serde_json::to_value(&self.wizard)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let registry = tm_datasets::builtin().expect("builtin datasets");
        Session::new(
            registry,
            PartitionPolicy::default(),
            DataSource::Platform,
            SessionLog::disabled(),
        )
    }

    fn call(session: &mut Session, id: i64, method: &str, params: Value) -> Value {
        let request = JsonRpcRequest {
            _jsonrpc: Some("2.0".to_string()),
            method: method.to_string(),
            id: Some(json!(id)),
            params: Some(params),
        };
        session.handle(request).expect("response")
    }

    #[test]
    fn requests_before_initialize_are_refused() {
        let mut session = session();
        let resp = call(&mut session, 1, "view/get", json!({}));
        assert_eq!(resp["error"]["code"], json!(NOT_INITIALIZED));

        let init = call(&mut session, 2, "initialize", json!({}));
        assert_eq!(init["result"]["serverInfo"]["name"], json!(SERVER_NAME));
        let ping = call(&mut session, 3, "ping", json!({}));
        assert_eq!(ping["result"], json!({}));
    }

    #[test]
    fn inactive_family_top_level_is_ignored_not_rejected() {
        let mut session = session();
        call(&mut session, 1, "initialize", json!({}));
        let resp = call(
            &mut session,
            2,
            "facets/set_top_level",
            json!({ "type": "ecology" }),
        );
        assert_eq!(resp["result"]["changed"], json!(false));
        assert_eq!(
            resp["result"]["view"]["variant"]["kind"],
            json!("free-text-prompt")
        );
    }

    #[test]
    fn reset_restores_the_configured_data_source() {
        let registry = tm_datasets::builtin().expect("builtin datasets");
        let mut session = Session::new(
            registry,
            PartitionPolicy::default(),
            DataSource::Select,
            SessionLog::disabled(),
        );
        call(&mut session, 1, "initialize", json!({}));
        call(
            &mut session,
            2,
            "facets/set",
            json!({ "facet": "data_source", "value": "uploaded" }),
        );
        let reset = call(&mut session, 3, "facets/reset", json!({}));
        assert_eq!(reset["result"]["facets"]["data_source"], json!("select"));
    }

    #[test]
    fn reset_of_a_pristine_session_reports_no_change() {
        let registry = tm_datasets::builtin().expect("builtin datasets");
        let mut session = Session::new(
            registry,
            PartitionPolicy::default(),
            DataSource::Select,
            SessionLog::disabled(),
        );
        call(&mut session, 1, "initialize", json!({}));
        let before = call(&mut session, 2, "facets/get", json!({}));
        let reset = call(&mut session, 3, "facets/reset", json!({}));
        assert_eq!(reset["result"]["changed"], json!(false));
        assert_eq!(reset["result"]["facets"], before["result"]["facets"]);

        call(
            &mut session,
            4,
            "facets/set",
            json!({ "facet": "location", "value": "goa-coast" }),
        );
        let again = call(&mut session, 5, "facets/reset", json!({}));
        assert_eq!(again["result"]["changed"], json!(true));
    }

    fn notification(method: &str) -> JsonRpcRequest {
        JsonRpcRequest {
            _jsonrpc: None,
            method: method.to_string(),
            id: None,
            params: None,
        }
    }

    #[test]
    fn notifications_get_no_reply() {
        let mut session = session();
        assert!(session.handle(notification("initialized")).is_none());
        let resp = call(&mut session, 1, "facets/get", json!({}));
        assert_eq!(resp["result"]["facets"]["mode"], json!("search"));
    }

    #[test]
    fn only_the_plain_initialized_notification_opens_the_session() {
        let mut session = session();
        assert!(session.handle(notification("notifications/initialized")).is_none());
        let refused = call(&mut session, 1, "ping", json!({}));
        assert_eq!(refused["error"]["code"], json!(NOT_INITIALIZED));

        let init = call(&mut session, 2, "initialize", json!({}));
        let result = &init["result"];
        assert!(result.get("protocolVersion").is_none());
        assert_eq!(result["serverInfo"]["version"], json!(crate::config::VERSION));
    }
}
