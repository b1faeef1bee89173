use crate::AppState;
use axum::extract::ws::{Message as Frame, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use domain::GatewayEvent;
use futures::{SinkExt, StreamExt};
use log::*;
use tokio::sync::mpsc;

/// Built-in gateway: accepts a WebSocket, assigns it a connection id and turns its
/// lifecycle and inbound frames into gateway events.
pub(crate) async fn ws_handler(
    State(app_state): State<AppState>,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connection_id = app_state.hub.register(tx);
    debug!("Accepted websocket {connection_id}");

    // Outbound frames for this socket arrive through the hub.
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sink.send(Frame::Text(frame.into())).await {
                debug!("Websocket writer stopped: {e}");
                break;
            }
        }
    });

    app_state
        .event_handler
        .handle(&GatewayEvent::Connect {
            connection_id: connection_id.to_string(),
        })
        .await;

    while let Some(frame) = stream.next().await {
        let body = match frame {
            Ok(Frame::Text(text)) => text.to_string(),
            Ok(Frame::Binary(data)) => String::from_utf8_lossy(&data).into_owned(),
            Ok(Frame::Close(_)) => break,
            Ok(Frame::Ping(_)) | Ok(Frame::Pong(_)) => continue,
            Err(e) => {
                debug!("Websocket {connection_id} read error: {e}");
                break;
            }
        };

        app_state
            .event_handler
            .handle(&GatewayEvent::Message {
                connection_id: connection_id.to_string(),
                body,
            })
            .await;
    }

    debug!("Websocket {connection_id} closed, cleaning up");
    app_state.hub.unregister(connection_id.as_str());
    writer.abort();

    app_state
        .event_handler
        .handle(&GatewayEvent::Disconnect {
            connection_id: connection_id.into(),
        })
        .await;
}
