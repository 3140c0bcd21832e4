//! WebSocket client session management.
//!
//! One session is one connection: the relay greets us with a session id, a
//! fresh store is built around it, and a single loop multiplexes command
//! lines and relay frames into the engine. The socket writer runs in its own
//! task, fed through the engine's transport.

use std::{path::Path, time::Duration};

use futures_util::{SinkExt, Stream, StreamExt};
use sketchboard_shared::{domain::ParticipantId, dto::websocket::WireMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::{Command, HELP, parse_command},
    config::ClientConfig,
    error::ClientError,
    formatter::MessageFormatter,
    id::UuidStrokeIdGenerator,
    render::{RenderSink, SvgSurface},
    store::StrokeStore,
    sync::{InboundOutcome, SyncEngine, Transport},
    tool::Brush,
    ui::redisplay_prompt,
};

const GREETING_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport handing frames to the socket writer task
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Message>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, message: WireMessage) -> Result<(), ClientError> {
        let json = message.to_json()?;
        self.tx
            .send(Message::Text(json.into()))
            .map_err(|_| ClientError::ConnectionError("Socket writer has stopped".to_string()))
    }
}

/// Whether the session loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run one WebSocket client session.
///
/// Returns `Ok(())` when the user leaves, an error when the connection could
/// not be established or was lost. `brush` carries the tool selection across
/// sessions.
pub async fn run_client_session(
    config: &ClientConfig,
    brush: &mut Brush,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    let (mut write, mut read) = ws_stream.split();

    let session_id = wait_for_session(&mut read).await?;
    tracing::info!("Connected to {} as '{}'", config.url, session_id);
    print!("{}", MessageFormatter::format_session_started(&session_id));
    redisplay_prompt();

    // Spawn the socket writer; it closes the socket once every sender is dropped
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
    let mut write_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if let Err(e) = write.send(frame).await {
                tracing::warn!("Failed to send frame: {}", e);
                return;
            }
        }
        write.close().await.ok();
    });

    let store = StrokeStore::new(session_id, Box::new(UuidStrokeIdGenerator));
    let surface = SvgSurface::new(
        config.surface_width,
        config.surface_height,
        brush.background().clone(),
    );
    let mut engine = SyncEngine::new(
        store,
        surface,
        ChannelTransport::new(out_tx),
        brush.clone(),
    );

    let result = loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else {
                    break Ok(());
                };
                if execute_line(&mut engine, &line).await == Flow::Quit {
                    break Ok(());
                }
                redisplay_prompt();
            }
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let InboundOutcome::OnlineCount(count) =
                        engine.apply_inbound_text(text.as_str())
                    {
                        print!("{}", MessageFormatter::format_online_count(count));
                        redisplay_prompt();
                    }
                }
                Some(Ok(Message::Binary(data))) => {
                    tracing::warn!("Ignoring {} bytes of binary data", data.len());
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("Server closed the connection");
                    break Err(ClientError::ConnectionError(
                        "Server closed the connection".to_string(),
                    ));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break Err(ClientError::ConnectionError(e.to_string()));
                }
                None => {
                    break Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
            },
            _ = &mut write_task => {
                break Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    };

    *brush = engine.brush().clone();

    // Dropping the engine drops the last sender, letting the writer close the socket
    drop(engine);
    if result.is_ok() {
        write_task.await.ok();
    } else {
        write_task.abort();
    }

    result
}

/// Wait for the relay's `session` greeting and return the assigned id.
async fn wait_for_session<S>(read: &mut S) -> Result<ParticipantId, ClientError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    match tokio::time::timeout(GREETING_TIMEOUT, read_greeting(read)).await {
        Ok(result) => result,
        Err(_) => Err(ClientError::HandshakeRejected(format!(
            "no session greeting within {} seconds",
            GREETING_TIMEOUT.as_secs()
        ))),
    }
}

async fn read_greeting<S>(read: &mut S) -> Result<ParticipantId, ClientError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                return match WireMessage::from_json(text.as_str())? {
                    WireMessage::Session(session) => Ok(ParticipantId::new(session.id)?),
                    other => Err(ClientError::HandshakeRejected(format!(
                        "expected a session greeting, got {:?}",
                        other.kind()
                    ))),
                };
            }
            Some(Ok(Message::Close(_))) | None => {
                return Err(ClientError::ConnectionError(
                    "Connection closed before the session greeting".to_string(),
                ));
            }
            // Ping/pong before the greeting
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(ClientError::ConnectionError(e.to_string())),
        }
    }
}

/// Apply one command line to the engine and print its result
async fn execute_line<T: Transport>(
    engine: &mut SyncEngine<SvgSurface, T>,
    line: &str,
) -> Flow {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            print!("{}", MessageFormatter::format_error(&e.to_string()));
            return Flow::Continue;
        }
    };

    match command {
        Command::Input(event) => engine.handle_input(event),
        Command::SelectTool(tool) => engine.brush_mut().select(tool),
        Command::SetColor(color) => engine.brush_mut().set_color(color),
        Command::SetWidth(width) => engine.brush_mut().set_width(width),
        Command::Status => {
            print!(
                "{}",
                MessageFormatter::format_status(
                    engine.store(),
                    engine.brush(),
                    engine.online_count()
                )
            );
        }
        Command::Save(path) => match save_image(engine.sink(), &path).await {
            Ok(bytes) => print!("{}", MessageFormatter::format_saved(&path, bytes)),
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                print!("{}", MessageFormatter::format_error(&e.to_string()));
            }
        },
        Command::Help => println!("{}", HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Write the exported surface to `path`, returning the number of bytes written
async fn save_image<R: RenderSink>(sink: &R, path: &Path) -> Result<usize, ClientError> {
    let image = sink.export_image();
    tokio::fs::write(path, image.as_bytes()).await?;
    Ok(image.len())
}
