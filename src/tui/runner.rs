// Runs `lazy` invocations off the UI loop and reports back through events.
use crate::lazy::LazyCli;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

async fn load_assignments(cli: &LazyCli, event_tx: &Sender<AppEvent>) {
    let _ = event_tx
        .send(AppEvent::Status("Loading assignments...".to_string()))
        .await;
    match cli.assignment_todo().await {
        Ok(records) => {
            let count = records.len();
            let _ = event_tx.send(AppEvent::AssignmentsLoaded(records)).await;
            let _ = event_tx
                .send(AppEvent::Status(format!("Ready. {} pending.", count)))
                .await;
        }
        Err(e) => {
            log::error!("Loading assignments failed: {:#}", e);
            let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
        }
    }
}

pub async fn run_cli_actor(
    cli: LazyCli,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    load_assignments(&cli, &event_tx).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Refresh => load_assignments(&cli, &event_tx).await,

            Action::ViewAssignment(assignment_id) => {
                match cli.assignment_view(&assignment_id).await {
                    Ok(content) => {
                        let _ = event_tx
                            .send(AppEvent::DetailLoaded {
                                assignment_id,
                                content,
                            })
                            .await;
                    }
                    Err(e) => {
                        log::error!("Viewing {} failed: {:#}", assignment_id, e);
                        let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
                    }
                }
            }

            Action::Submit {
                assignment_id,
                path,
            } => {
                let _ = event_tx
                    .send(AppEvent::Status(format!("Uploading {}...", path.display())))
                    .await;
                match cli.submit_file(&assignment_id, &path).await {
                    Ok(submission) => {
                        log::info!(
                            "Submitted {} (resource {}) to {}",
                            submission.file_name,
                            submission.resource_id,
                            submission.assignment_id
                        );
                        let _ = event_tx
                            .send(AppEvent::Submitted {
                                assignment_id: submission.assignment_id,
                                resource_id: submission.resource_id,
                                file_name: submission.file_name,
                            })
                            .await;
                    }
                    Err(e) => {
                        log::error!("Submitting to {} failed: {:#}", assignment_id, e);
                        let _ = event_tx.send(AppEvent::Error(format!("{:#}", e))).await;
                    }
                }
            }
        }
    }
}
