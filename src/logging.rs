mod rpc_root_span_builder;

pub use self::rpc_root_span_builder::RpcRootSpanBuilder;
