mod client;
mod domain;
mod node;

pub use client::new_client;
pub use node::IpfsNode;
