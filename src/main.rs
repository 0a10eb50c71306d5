mod assistant;
mod catalog;
mod config;
mod network;
mod progression;
mod protocol;
mod session;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::assistant::{AssistantPanel, AssistantService, GeneratedText};
use crate::config::ServerConfig;
use crate::network::server::LeagueServer;
use crate::protocol::{ClientAction, ServerMessage};
use crate::session::Session;

/// Finished assistant requests, delivered back to the event loop.
type AssistantTx = mpsc::UnboundedSender<(AssistantPanel, GeneratedText)>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let mut assistant = AssistantService::new(&config);
    let mut session = Session::seed();

    let mut server = match LeagueServer::start(&config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start league server on {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    send_snapshot(&mut server, &session, &assistant);

    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(AssistantPanel, GeneratedText)>();

    loop {
        tokio::select! {
            action = server.action_rx.recv() => {
                let Some(action) = action else {
                    info!("Client disconnected, ending session");
                    break;
                };
                handle_action(action, &mut session, &mut assistant, &mut server, &result_tx);
            }
            Some((panel, reply)) = result_rx.recv() => {
                // Whichever request for a panel lands last wins that panel
                session.note_assistant(format!("{:?} panel updated", panel));
                server.send_message(&ServerMessage::AssistantResult { panel, text: reply.text });
            }
        }
    }
}

fn send_snapshot(server: &mut LeagueServer, session: &Session, assistant: &AssistantService) {
    let snapshot = session.snapshot(assistant.has_api_key());
    server.send_message(&ServerMessage::Snapshot(Box::new(snapshot)));
}

fn handle_action(
    action: ClientAction,
    session: &mut Session,
    assistant: &mut AssistantService,
    server: &mut LeagueServer,
    result_tx: &AssistantTx,
) {
    let outcome: Result<(), String> = match action {
        ClientAction::RequestSnapshot => Ok(()),
        ClientAction::UpdateHIndex { h_index } => {
            session.update_h_index(h_index);
            Ok(())
        }
        ClientAction::AdjustCredits { amount } => {
            session.adjust_credits(amount);
            Ok(())
        }
        ClientAction::LinkProfile {
            platform,
            external_id,
            observed_h_index,
        } => session.link_profile(platform, &external_id, observed_h_index),
        ClientAction::FetchAndLinkProfile {
            platform,
            external_id,
        } => session
            .fetch_and_link_profile(platform, &external_id)
            .map(|_| ()),
        ClientAction::UnlinkProfile { platform } => {
            session.unlink_profile(platform);
            Ok(())
        }
        ClientAction::CompleteTutorial { tutorial_id } => session.complete_tutorial(&tutorial_id),
        ClientAction::HireResearcher { listing_id } => session.hire_researcher(&listing_id),
        ClientAction::MarkNotificationRead { id } => session.mark_notification_read(&id),
        ClientAction::MarkAllNotificationsRead => {
            session.mark_all_notifications_read();
            Ok(())
        }
        ClientAction::SetAssistantApiKey { key } => {
            if assistant.set_api_key(key) {
                session.note_assistant("Assistant API key updated");
                Ok(())
            } else {
                Err("That API key looks like a placeholder".to_string())
            }
        }
        ClientAction::GenerateIdea { prompt } => {
            if prompt.trim().is_empty() {
                Err("Please enter a prompt for the research idea".to_string())
            } else {
                session.note_assistant("Research idea requested");
                let service = assistant.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    let reply = service.generate_idea(&prompt).await;
                    let _ = tx.send((AssistantPanel::Idea, reply));
                });
                server.send_message(&ServerMessage::AssistantPending {
                    panel: AssistantPanel::Idea,
                });
                Ok(())
            }
        }
        ClientAction::GenerateGrantSnippet { topic, section } => {
            if topic.trim().is_empty() {
                Err("Please enter a research topic".to_string())
            } else {
                session.note_assistant(format!("Grant snippet requested ({})", section));
                let service = assistant.clone();
                let tx = result_tx.clone();
                tokio::spawn(async move {
                    let reply = service.generate_grant_snippet(&topic, section).await;
                    let _ = tx.send((AssistantPanel::Grant, reply));
                });
                server.send_message(&ServerMessage::AssistantPending {
                    panel: AssistantPanel::Grant,
                });
                Ok(())
            }
        }
    };

    match outcome {
        Ok(()) => send_snapshot(server, session, assistant),
        Err(reason) => {
            warn!("Action rejected: {}", reason);
            server.send_message(&ServerMessage::ActionRejected { reason });
        }
    }
}
