//! Messaging command handlers.

use tabled::Tabled;

use campus_core::{Message, NewMessage, Portal};

use crate::cli::{GlobalOpts, MessagesArgs, MessagesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MessageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Sent")]
    sent: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Subject")]
    subject: String,
}

impl From<&&Message> for MessageRow {
    fn from(message: &&Message) -> Self {
        Self {
            id: message.id.to_string(),
            sent: message.sent_at.map_or_else(
                || "-".into(),
                |ts| ts.format("%Y-%m-%d %H:%M").to_string(),
            ),
            from: message.sender.clone(),
            to: message.recipient.clone(),
            subject: message.subject.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub async fn handle(
    portal: &Portal,
    args: MessagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MessagesCommand::List => {
            let mut handle = portal.messages();
            let messages = util::fetch(&mut handle, global).await?;

            let rows: Vec<&Message> = messages.iter().collect();
            let out = output::render_list(
                &global.output,
                &rows,
                |message| MessageRow::from(message),
                |message| message.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MessagesCommand::Send {
            from,
            to,
            subject,
            body,
        } => {
            let sent = portal
                .send_message(NewMessage {
                    sender: from,
                    recipient: to,
                    subject,
                    body,
                })
                .await?;
            util::notify(
                &format!("Message {} sent to {}", sent.id, sent.recipient),
                global.quiet,
            );
            Ok(())
        }

        MessagesCommand::Rm { id } => {
            if !util::confirm(&format!("Delete message {id}?"), global.yes)? {
                return Ok(());
            }
            portal.delete_message(id).await?;
            util::notify("Message deleted", global.quiet);
            Ok(())
        }
    }
}
