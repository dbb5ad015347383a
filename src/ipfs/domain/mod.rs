mod add_response;
mod rpc_error;

pub use add_response::AddResponse;
pub use rpc_error::RpcError;
