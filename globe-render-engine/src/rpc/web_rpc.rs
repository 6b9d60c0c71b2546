use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tools::hover_pick::HoverState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing notifications and responses, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn queued_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Read-only view of the app that requests are answered from.
pub struct RpcContext<'a> {
    pub hover: &'a HoverState,
    pub fps: Option<f32>,
}

pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Filled from the browser event loop, drained once per frame.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Ownership passes to JS for the lifetime of the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message text received from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    hover_state: Res<HoverState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let context = RpcContext {
        hover: &hover_state,
        fps: smoothed_fps(&diagnostics),
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
            }
        }
    }
}

pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f32> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .map(|value| value as f32)
}

/// Answer one request. Messages without an ID are notifications and get no response.
pub fn handle_rpc_request(request: &RpcRequest, context: &RpcContext) -> Option<RpcResponse> {
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "get_country_info" => handle_get_country_info(&request.params),
        "list_countries" => handle_list_countries(),
        "get_hover_state" => handle_get_hover_state(context.hover),
        "get_fps" => handle_get_fps(context.fps),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_get_country_info(params: &serde_json::Value) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct CountryInfoParams {
        id: String,
    }

    let parsed = serde_json::from_value::<CountryInfoParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;

    let country = country_data::lookup(&parsed.id)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown country: {}", parsed.id)))?;

    Ok(serde_json::json!({ "country": country }))
}

fn handle_list_countries() -> Result<serde_json::Value, RpcError> {
    let countries: Vec<_> = country_data::country::iter().collect();
    Ok(serde_json::json!({ "countries": countries }))
}

fn handle_get_hover_state(hover: &HoverState) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "country": hover.country,
        "mesh": hover.mesh_index(),
    }))
}

fn handle_get_fps(fps: Option<f32>) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "fps": fps.unwrap_or(0.0)
    }))
}

fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, params: serde_json::Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: Some(json!(7)),
        }
    }

    fn answer(request: &RpcRequest, hover: &HoverState) -> RpcResponse {
        let context = RpcContext {
            hover,
            fps: Some(59.5),
        };
        handle_rpc_request(request, &context).unwrap()
    }

    #[test]
    fn country_info_returns_the_record() {
        let response = answer(
            &request("get_country_info", json!({ "id": "france" })),
            &HoverState::default(),
        );

        assert_eq!(response.id, Some(json!(7)));
        assert!(response.error.is_none());
        assert_eq!(
            response.result.unwrap()["country"],
            json!({
                "id": "france",
                "name": "France",
                "capital": "Paris",
                "population": 65273511
            })
        );
    }

    #[test]
    fn unknown_country_is_an_invalid_params_error() {
        let response = answer(
            &request("get_country_info", json!({ "id": "atlantis" })),
            &HoverState::default(),
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32602));

        let response = answer(&request("get_country_info", json!({})), &HoverState::default());
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
    }

    #[test]
    fn list_countries_returns_the_whole_table() {
        let response = answer(&request("list_countries", json!(null)), &HoverState::default());
        let result = response.result.unwrap();
        let countries = result["countries"].as_array().unwrap();

        assert_eq!(countries.len(), country_data::country::len());
        assert_eq!(countries[0]["id"], json!("albania"));
    }

    #[test]
    fn hover_state_reports_current_country() {
        let hover = HoverState {
            entity: None,
            country: country_data::lookup("italy"),
        };
        let response = answer(&request("get_hover_state", json!(null)), &hover);
        assert_eq!(response.result.unwrap()["country"]["capital"], json!("Rome"));

        let response = answer(&request("get_hover_state", json!(null)), &HoverState::default());
        assert_eq!(response.result.unwrap()["country"], json!(null));
    }

    #[test]
    fn get_fps_reports_the_context_value() {
        let response = answer(&request("get_fps", json!(null)), &HoverState::default());
        assert_eq!(response.result.unwrap()["fps"], json!(59.5));
    }

    #[test]
    fn unknown_method_is_not_found() {
        let response = answer(&request("tool_selection", json!({})), &HoverState::default());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.data, Some(json!({ "method": "tool_selection" })));
    }

    #[test]
    fn notifications_get_no_response() {
        let mut notification = request("get_fps", json!(null));
        notification.id = None;
        let context = RpcContext {
            hover: &HoverState::default(),
            fps: None,
        };
        assert!(handle_rpc_request(&notification, &context).is_none());
    }

    #[test]
    fn requests_parse_without_params() {
        let parsed: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"list_countries","id":"a"}"#).unwrap();
        assert_eq!(parsed.params, json!(null));
        assert_eq!(parsed.id, Some(json!("a")));
    }
}
