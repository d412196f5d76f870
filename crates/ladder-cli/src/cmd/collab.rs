//! `lad collab` — collaborators and the management tree.

use clap::{Args, Subcommand};
use ladder_core::Collaborator;
use ladder_core::db::store;
use ladder_core::service::{self, InfoType};
use rusqlite::Connection;
use std::io::Write as _;

use crate::output::{self, OutputMode};

#[derive(Subcommand, Debug)]
pub enum CollabCommand {
    /// Hire a collaborator into a company; the manager starts unset.
    Create(CreateArgs),
    /// List a company's collaborators.
    List(ListArgs),
    /// Show one collaborator, or one of its relationship views.
    Show(ShowArgs),
    /// Assign a collaborator's manager. The edge is written once;
    /// re-parenting is always rejected.
    SetManager(SetManagerArgs),
    /// Delete a collaborator; everyone it managed becomes a root.
    Delete(IdArg),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Owning company ID.
    #[arg(long)]
    pub company: String,

    /// Collaborator name.
    #[arg(short, long)]
    pub name: String,

    /// Collaborator email (globally unique, case-insensitive).
    #[arg(short, long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Owning company ID.
    #[arg(long)]
    pub company: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Collaborator ID.
    pub id: String,

    /// Relationship view: peers, managed, or second_level_managed.
    #[arg(long)]
    pub info: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetManagerArgs {
    /// Collaborator ID.
    pub id: String,

    /// Manager's collaborator ID (must be in the same company).
    #[arg(long)]
    pub manager: String,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Collaborator ID.
    pub id: String,
}

pub fn run(command: &CollabCommand, conn: &Connection, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        CollabCommand::Create(args) => {
            match store::create_collaborator(conn, &args.company, &args.name, &args.email) {
                Ok(collaborator) => render_collaborator(mode, &collaborator),
                Err(err) => output::fail(mode, err),
            }
        }
        CollabCommand::List(args) => match store::list_collaborators(conn, &args.company) {
            Ok(collaborators) => render_collaborators(mode, &collaborators),
            Err(err) => output::fail(mode, err),
        },
        CollabCommand::Show(args) => run_show(args, conn, mode),
        CollabCommand::SetManager(args) => {
            match service::assign_manager(conn, &args.id, &args.manager) {
                Ok(collaborator) => render_collaborator(mode, &collaborator),
                Err(err) => output::fail(mode, err),
            }
        }
        CollabCommand::Delete(args) => match store::delete_collaborator(conn, &args.id) {
            Ok(()) => {
                if !mode.is_json() {
                    println!("deleted {}", args.id);
                }
                Ok(())
            }
            Err(err) => output::fail(mode, err),
        },
    }
}

fn run_show(args: &ShowArgs, conn: &Connection, mode: OutputMode) -> anyhow::Result<()> {
    let collaborator = match store::get_collaborator(conn, &args.id) {
        Ok(collaborator) => collaborator,
        Err(err) => return output::fail(mode, err),
    };

    let Some(info) = args.info.as_deref() else {
        return render_collaborator(mode, &collaborator);
    };

    let info_type = match info.parse::<InfoType>() {
        Ok(info_type) => info_type,
        Err(err) => return output::fail(mode, err),
    };

    match service::find_collaborators(conn, &collaborator, info_type) {
        Ok(collaborators) => render_collaborators(mode, &collaborators),
        Err(err) => output::fail(mode, err),
    }
}

fn render_collaborator(mode: OutputMode, collaborator: &Collaborator) -> anyhow::Result<()> {
    output::render(mode, collaborator, |w, c| {
        output::pretty_kv(w, "id", &c.collaborator_id)?;
        output::pretty_kv(w, "name", &c.name)?;
        output::pretty_kv(w, "email", &c.email)?;
        output::pretty_kv(w, "company", &c.company_id)?;
        output::pretty_kv(w, "manager", c.manager_id.as_deref().unwrap_or("-"))
    })
}

fn render_collaborators(mode: OutputMode, collaborators: &[Collaborator]) -> anyhow::Result<()> {
    output::render(mode, &collaborators, |w, list| {
        for collaborator in *list {
            writeln!(
                w,
                "{}  {} <{}>",
                collaborator.collaborator_id, collaborator.name, collaborator.email
            )?;
        }
        Ok(())
    })
}
