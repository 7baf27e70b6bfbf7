//! Inbound adapters translating external requests into account service
//! calls while keeping framework details at the edge.

pub mod http;
