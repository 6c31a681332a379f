//! Feed transports.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use crate::error::ListenerError;

/// Text frames received on one connection. The stream ends when the
/// connection does.
pub type FrameStream = BoxStream<'static, Result<String, ListenerError>>;

/// Opens a connection to a feed URL.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<FrameStream, ListenerError>;
}

/// Websocket transport.
///
/// Text and binary frames are yielded as text. Control frames are
/// handled by the websocket layer and never reach the caller.
#[derive(Debug, Clone, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<FrameStream, ListenerError> {
        let (socket, response) = connect_async(url).await?;
        debug!("Websocket handshake with {} returned {}", url, response.status());

        let frames = socket.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text.to_string())),
                Ok(Message::Binary(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
                Ok(Message::Close(frame)) => {
                    debug!("Close frame received: {:?}", frame);
                    Some(Err(ListenerError::Closed))
                }
                Ok(_) => None,
                Err(e) => Some(Err(ListenerError::from(e))),
            }
        });

        Ok(frames.boxed())
    }
}
