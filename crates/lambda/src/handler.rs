//! API Gateway proxy handler.
//!
//! Every outcome is returned as a response object, never as an invocation
//! error, so API Gateway passes the status code through to the caller.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use lambda_runtime::{Error, LambdaEvent};

use courier_common::error::AppError;
use courier_common::types::Message;
use courier_notifier::Dispatcher;

pub async fn handle(
    dispatcher: &Dispatcher,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    tracing::debug!(
        request_id = %event.context.request_id,
        method = %event.payload.http_method,
        path = event.payload.path.as_deref().unwrap_or(""),
        "Handling API Gateway request"
    );

    Ok(process(dispatcher, event.payload.body.as_deref()).await)
}

/// Decode `body`, relay it, and map the outcome to a proxy response.
pub async fn process(dispatcher: &Dispatcher, body: Option<&str>) -> ApiGatewayProxyResponse {
    match relay(dispatcher, body).await {
        Ok(()) => response(200, None),
        Err(e) => {
            tracing::debug!(error = %e, "Returning errors back to the caller");
            response(i64::from(e.status_code().as_u16()), Some(e.to_string()))
        }
    }
}

async fn relay(dispatcher: &Dispatcher, body: Option<&str>) -> Result<(), AppError> {
    let message = Message::from_json(body.unwrap_or_default().as_bytes())?;
    dispatcher.send_message(&message).await.into_result()
}

fn response(status_code: i64, body: Option<String>) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body: body.map(Body::Text),
        ..Default::default()
    }
}
