//! Purpose: Hold top-level CLI command dispatch for `bento`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and map each subcommand to one client call.
//! Invariants: Every API subcommand emits exactly one JSON value on success.
//! Invariants: `completion` never requires credentials.

use super::*;
use bento::api::EmailValidation;
use clap::CommandFactory;

pub(super) fn dispatch_command(command: Command, credentials: &Credentials) -> Result<(), Error> {
    let client = match &command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(*shell, &mut cmd, "bento", &mut io::stdout());
            return Ok(());
        }
        _ => credentials.client()?,
    };
    let value = match command {
        Command::Subscriber {
            command: SubscriberCommand::Get { email, uuid },
        } => client.get_subscriber(email.as_deref(), uuid.as_deref())?,
        Command::Subscriber {
            command: SubscriberCommand::Create { email },
        } => client.create_subscriber(&email)?,
        Command::Batch { command } => match command {
            BatchCommand::Subscribers { records } => {
                client.batch_create_subscribers(&read_json_records(&records)?)?
            }
            BatchCommand::Emails { records } => {
                client.batch_create_emails(&read_json_records(&records)?)?
            }
            BatchCommand::Events { records } => {
                client.batch_create_events(&read_json_records(&records)?)?
            }
            BatchCommand::Broadcasts { records } => {
                client.batch_create_broadcasts(&read_json_records(&records)?)?
            }
        },
        Command::Broadcasts {
            command: BroadcastsCommand::List,
        } => Value::Array(client.get_broadcasts()?),
        Command::Fields {
            command: FieldsCommand::List,
        } => Value::Array(client.get_fields()?),
        Command::Fields {
            command: FieldsCommand::Create { key },
        } => client.create_field(&key)?,
        Command::Tags {
            command: TagsCommand::List,
        } => Value::Array(client.get_tags()?),
        Command::Tags {
            command: TagsCommand::Create { name },
        } => client.create_tag(&name)?,
        Command::Commands { commands } => client.execute_commands(&read_json_records(&commands)?)?,
        Command::Stats {
            command: StatsCommand::Site,
        } => client.get_site_stats()?,
        Command::Stats {
            command: StatsCommand::Segment { segment_id },
        } => client.get_segment_stats(&segment_id)?,
        Command::Experimental { command } => match command {
            ExperimentalCommand::Blacklist { domain, ip } => {
                client.check_blacklist(domain.as_deref(), ip.as_deref())?
            }
            ExperimentalCommand::ValidateEmail {
                email,
                name,
                user_agent,
                ip,
            } => {
                let validation = EmailValidation {
                    email,
                    name,
                    user_agent,
                    ip,
                };
                client.validate_email(&validation)?
            }
            ExperimentalCommand::Moderate { content } => client.moderate_content(&content)?,
            ExperimentalCommand::Gender { name } => client.guess_gender(&name)?,
            ExperimentalCommand::Geolocate { ip } => client.geolocate_ip(&ip)?,
        },
        Command::Completion { .. } => return Ok(()),
    };

    emit_json(value);
    Ok(())
}
