//! JSON-RPC 2.0 bridge to the page embedding the globe.
//!
//! On wasm the viewer runs inside an iframe and talks to its parent window
//! through `postMessage`. Native builds keep the same queues but never send.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Globe viewer (iframe)
//!        │                                            │
//!        ├─ Request (with ID) ──────────────────────> │
//!        │                                            ├─ handle_rpc_request()
//!        │ <───────────────────── Response (with ID) ─┤
//!        │                                            │
//!        │ <────────────────── Notification (no ID) ──┤
//! ```
//!
//! ## Requests
//!
//! - `get_country_info { id }`: record for one country identifier
//! - `list_countries`: every record in identifier order
//! - `get_hover_state`: the country and mesh under the pointer, or nulls
//! - `get_fps`: smoothed frame rate
//!
//! ## Notifications
//!
//! - `loading_progress { stage, fraction }`
//! - `globe_loaded { candidate_meshes, countries }`
//! - `globe_load_failed { message }`
//! - `country_hovered { country, mesh }` when the pointer moves onto a country
//! - `country_hover_cleared { mesh }` when no country is shown; `mesh` is the
//!   entity index of a highlighted mesh without a record, or null
//! - `fps_update { fps }`
//!
//! ## Error Codes
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params, including unknown country identifiers

/// Message queues, request handling and the wasm message listener.
pub mod web_rpc;
