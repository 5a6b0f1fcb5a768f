use crate::model::{ApiError, ApiReply, ApiRequest};
use crate::state::form::{SubmitAction, SubmitFuture};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LengthDelimitedCodec};

/// Connection settings for the account API. Cheap to clone; each submit
/// action it hands out opens its own connection per call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    addr: String,
}

impl ApiClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// A submit action performing one framed request/reply exchange per
    /// invocation. Suitable for boxing into a form controller.
    pub fn submit_action(&self) -> impl SubmitAction + 'static {
        let addr = self.addr.clone();
        move |request: ApiRequest| -> SubmitFuture {
            let addr = addr.clone();
            Box::pin(async move { exchange(&addr, request).await })
        }
    }
}

/// One request/reply round trip. Transport-level failures surface as an
/// opaque error: no message, no field annotations, nothing for the form
/// to display.
async fn exchange(addr: &str, request: ApiRequest) -> Result<(), ApiError> {
    let stream = TcpStream::connect(addr).await.map_err(|e| {
        tracing::warn!(error = %e, addr, "api connect failed");
        ApiError::opaque()
    })?;
    let mut framed = Framed::new(stream, LengthDelimitedCodec::new());

    let payload = bincode::serialize(&request).map_err(|e| {
        tracing::warn!(error = %e, "request serialization failed");
        ApiError::opaque()
    })?;
    framed.send(payload.into()).await.map_err(|e| {
        tracing::warn!(error = %e, "api send failed");
        ApiError::opaque()
    })?;

    match framed.next().await {
        Some(Ok(bytes)) => match bincode::deserialize::<ApiReply>(&bytes) {
            Ok(ApiReply::Ok) => Ok(()),
            Ok(ApiReply::Err(failure)) => Err(failure),
            Err(e) => {
                tracing::warn!(error = %e, "malformed api reply");
                Err(ApiError::opaque())
            }
        },
        Some(Err(e)) => {
            tracing::warn!(error = %e, "api read failed");
            Err(ApiError::opaque())
        }
        None => {
            tracing::warn!("api closed connection without replying");
            Err(ApiError::opaque())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::form::SubmitAction;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    /// Accepts one connection, asserts nothing about the request, replies
    /// with the scripted frame, then closes.
    async fn one_shot_server(reply: ApiReply) -> (String, tokio::task::JoinHandle<ApiRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut framed = Framed::new(stream, LengthDelimitedCodec::new());
            let bytes = framed.next().await.unwrap().unwrap();
            let request = bincode::deserialize::<ApiRequest>(&bytes).unwrap();
            let payload = bincode::serialize(&reply).unwrap();
            framed.send(payload.into()).await.unwrap();
            request
        });
        (addr, handle)
    }

    #[tokio::test]
    async fn login_round_trip_succeeds() {
        let (addr, server) = one_shot_server(ApiReply::Ok).await;
        let mut action = ApiClient::new(addr).submit_action();

        let outcome = action
            .call(ApiRequest::Login {
                username: "my-user-name".into(),
                password: "P4ssword".into(),
            })
            .await;

        assert_eq!(outcome, Ok(()));
        assert_eq!(
            server.await.unwrap(),
            ApiRequest::Login {
                username: "my-user-name".into(),
                password: "P4ssword".into(),
            }
        );
    }

    #[tokio::test]
    async fn validation_failure_payload_comes_back_intact() {
        let mut errors = HashMap::new();
        errors.insert("username".to_string(), "Username is taken".to_string());
        let failure = ApiError {
            message: None,
            validation_errors: Some(errors),
        };
        let (addr, _server) = one_shot_server(ApiReply::Err(failure.clone())).await;
        let mut action = ApiClient::new(addr).submit_action();

        let outcome = action
            .call(ApiRequest::SignUp {
                display_name: "d".into(),
                username: "u".into(),
                password: "p".into(),
            })
            .await;

        assert_eq!(outcome, Err(failure));
    }

    #[tokio::test]
    async fn unreachable_api_yields_an_opaque_failure() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let mut action = ApiClient::new(addr).submit_action();
        let outcome = action
            .call(ApiRequest::Login {
                username: "u".into(),
                password: "p".into(),
            })
            .await;

        assert_eq!(outcome, Err(ApiError::opaque()));
    }
}
