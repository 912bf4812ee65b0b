use std::{error::Error, io::Write};

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, NewEvent, NewTicketType};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// The admin tool opens no sessions, so this never signs a token.
const ADMIN_TOKEN_SECRET: &str = "eventhub-admin";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Parser, Debug)]
#[command(name = "eventhub_admin")]
#[command(about = "Admin utilities for Eventhub (seed events, tickets, hotels and users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./eventhub.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Event(EventCommand),
    #[command(subcommand)]
    TicketType(TicketTypeCommand),
    #[command(subcommand)]
    Hotel(HotelCommand),
    #[command(subcommand)]
    Room(RoomCommand),
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum EventCommand {
    Create(EventCreateArgs),
}

#[derive(Args, Debug)]
struct EventCreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    background: String,
    #[arg(long)]
    logo: String,
    /// RFC 3339 timestamp, e.g. `2026-11-01T09:00:00Z`.
    #[arg(long, value_parser = parse_timestamp)]
    starts_at: DateTime<Utc>,
    #[arg(long, value_parser = parse_timestamp)]
    ends_at: DateTime<Utc>,
}

#[derive(Subcommand, Debug)]
enum TicketTypeCommand {
    Create(TicketTypeCreateArgs),
}

#[derive(Args, Debug)]
struct TicketTypeCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: i32,
    #[arg(long)]
    remote: bool,
    #[arg(long)]
    with_hotel: bool,
}

#[derive(Subcommand, Debug)]
enum HotelCommand {
    Create(HotelCreateArgs),
}

#[derive(Args, Debug)]
struct HotelCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    image: String,
}

#[derive(Subcommand, Debug)]
enum RoomCommand {
    Create(RoomCreateArgs),
}

#[derive(Args, Debug)]
struct RoomCreateArgs {
    #[arg(long)]
    hotel_id: i32,
    #[arg(long)]
    name: String,
    #[arg(long)]
    capacity: i32,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    email: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| format!("invalid timestamp `{raw}`: {err}"))
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.chars().count() < MIN_PASSWORD_LEN {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print(format!(
                    "Password must have at least {MIN_PASSWORD_LEN} characters.\r\n"
                ))
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .token_secret(ADMIN_TOKEN_SECRET)
        .build()
        .await?;

    match cli.command {
        Command::Event(EventCommand::Create(args)) => {
            let event = engine
                .create_event(NewEvent {
                    title: args.title,
                    background_image_url: args.background,
                    logo_image_url: args.logo,
                    starts_at: args.starts_at,
                    ends_at: args.ends_at,
                })
                .await?;
            println!("created event: {} ({})", event.title, event.id);
        }
        Command::TicketType(TicketTypeCommand::Create(args)) => {
            let ticket_type = engine
                .create_ticket_type(NewTicketType {
                    name: args.name,
                    price: args.price,
                    is_remote: args.remote,
                    includes_hotel: args.with_hotel,
                })
                .await?;
            println!(
                "created ticket type: {} ({})",
                ticket_type.name, ticket_type.id
            );
        }
        Command::Hotel(HotelCommand::Create(args)) => {
            let hotel = engine.create_hotel(&args.name, &args.image).await?;
            println!("created hotel: {} ({})", hotel.name, hotel.id);
        }
        Command::Room(RoomCommand::Create(args)) => {
            let room = engine
                .create_room(args.hotel_id, &args.name, args.capacity)
                .await?;
            println!(
                "created room: {} ({}) in hotel {}",
                room.name, room.id, room.hotel_id
            );
        }
        Command::User(UserCommand::Create(args)) => {
            let password = prompt_password_twice()?;
            match engine.create_account(&args.email, &password).await {
                Ok(user) => println!("created user: {} ({})", user.email, user.id),
                Err(engine::EngineError::ExistingKey(_)) => {
                    eprintln!("user already exists: {}", args.email);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_rfc3339() {
        let ts = parse_timestamp("2026-11-01T09:00:00-03:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-11-01T12:00:00+00:00");
        assert!(parse_timestamp("01/11/2026").is_err());
    }

    #[test]
    fn cli_parses_room_creation() {
        let cli = Cli::try_parse_from([
            "eventhub_admin",
            "room",
            "create",
            "--hotel-id",
            "3",
            "--name",
            "101",
            "--capacity",
            "2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Room(RoomCommand::Create(RoomCreateArgs { hotel_id: 3, capacity: 2, .. }))
        ));
    }

    #[test]
    fn cli_parses_ticket_type_flags() {
        let cli = Cli::try_parse_from([
            "eventhub_admin",
            "ticket-type",
            "create",
            "--name",
            "Presencial",
            "--price",
            "600",
            "--with-hotel",
        ])
        .unwrap();
        let Command::TicketType(TicketTypeCommand::Create(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert!(!args.remote);
        assert!(args.with_hotel);
    }
}
