use actix_web::{
    Error,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
};
use tracing::{Span, field::Empty, info};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder, root_span};

/// Wraps every call into a span with a unique request id, and logs the method before dispatch and
/// the resulting status after.
pub struct RpcRootSpanBuilder;

impl RootSpanBuilder for RpcRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let span = root_span!(request, rpc.method = Empty);
        span.record("rpc.method", request.path());
        span.in_scope(|| info!("Received call."));
        span
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        let status = match outcome {
            Ok(response) => response.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        span.in_scope(|| info!(http.status = status.as_u16(), "Finished call."));

        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
