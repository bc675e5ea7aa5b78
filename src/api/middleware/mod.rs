pub mod request_id;
pub mod session_gate;

pub use request_id::{RequestId, RequestIdMiddleware};
pub use session_gate::SessionGate;
