use crate::client::{Client, Clients, Sender};
use crate::game::{Game, Games};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{error, info};
use warp::ws::{Message, WebSocket};

pub async fn client_connection(
    ws: WebSocket,
    id: String,
    clients: Clients,
    mut client: Client,
    games: Games,
) {
    let (client_ws_sender, mut client_ws_rcv) = ws.split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();

    let client_rcv = UnboundedReceiverStream::new(client_rcv);
    tokio::task::spawn(client_rcv.forward(client_ws_sender).map(|result| {
        if let Err(e) = result {
            error!("error sending websocket msg: {}", e);
        }
    }));

    client.sender = Some(Sender(client_sender));
    clients.write().await.insert(id.clone(), client);
    games.write().await.insert(id.clone(), Game::new());

    info!("{} connected", id);

    // One countdown driver per session. The controller ignores ticks outside
    // an active turn, so the interval can run for the whole connection.
    let ticker = tokio::task::spawn(run_ticker(id.clone(), clients.clone(), games.clone()));

    while let Some(result) = client_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                error!("error receiving ws message for id {}: {}", id, e);
                break;
            }
        };
        client_msg(&id, msg, &clients, &games).await;
    }

    ticker.abort();
    games.write().await.remove(&id);
    clients.write().await.remove(&id);
    info!("{} disconnected", id);
}

async fn run_ticker(id: String, clients: Clients, games: Games) {
    let mut interval = time::interval(Duration::from_secs(1));
    // The first interval tick completes immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        tick_game(&id, &clients, &games).await;
    }
}

async fn tick_game(id: &str, clients: &Clients, games: &Games) {
    let clients_map = clients.read().await;
    let sender = match clients_map.get(id).and_then(|c| c.sender.as_ref()) {
        Some(sender) => sender,
        None => return,
    };
    let mut games_map = games.write().await;
    if let Some(game) = games_map.get_mut(id) {
        game.handle_tick(sender);
    }
}

#[tracing::instrument]
async fn client_msg(id: &str, msg: Message, clients: &Clients, games: &Games) {
    info!("received message from {}: {:?}", id, msg);
    let message = match msg.to_str() {
        Ok(v) => v.trim(),
        Err(_) => return,
    };

    if message == "ping" {
        return;
    }

    let clients_map = clients.read().await;
    let sender = match clients_map.get(id).and_then(|c| c.sender.as_ref()) {
        Some(sender) => sender,
        None => {
            error!(
                "Message from client {} did not match any connected clients",
                id
            );
            return;
        }
    };
    let mut games_map = games.write().await;
    match games_map.get_mut(id) {
        Some(game) => game.handle_message(message, sender),
        None => error!("Client {} has no game session", id),
    }
}
