//! `lad company` — create, list, show, and delete companies.

use clap::{Args, Subcommand};
use ladder_core::Company;
use ladder_core::db::store;
use rusqlite::Connection;
use std::io::Write as _;

use crate::output::{self, OutputMode};

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
    /// Create a company.
    Create(CreateArgs),
    /// List all companies.
    List,
    /// Show one company.
    Show(IdArg),
    /// Delete a company and all of its collaborators.
    Delete(IdArg),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Company name.
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct IdArg {
    /// Company ID.
    pub id: String,
}

pub fn run(command: &CompanyCommand, conn: &Connection, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        CompanyCommand::Create(args) => match store::create_company(conn, &args.name) {
            Ok(company) => render_company(mode, &company),
            Err(err) => output::fail(mode, err),
        },
        CompanyCommand::List => match store::list_companies(conn) {
            Ok(companies) => output::render(mode, &companies, |w, list| {
                for company in list {
                    writeln!(w, "{}  {}", company.company_id, company.name)?;
                }
                Ok(())
            }),
            Err(err) => output::fail(mode, err),
        },
        CompanyCommand::Show(args) => match store::get_company(conn, &args.id) {
            Ok(company) => render_company(mode, &company),
            Err(err) => output::fail(mode, err),
        },
        CompanyCommand::Delete(args) => match store::delete_company(conn, &args.id) {
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

fn render_company(mode: OutputMode, company: &Company) -> anyhow::Result<()> {
    output::render(mode, company, |w, c| {
        output::pretty_kv(w, "id", &c.company_id)?;
        output::pretty_kv(w, "name", &c.name)
    })
}
