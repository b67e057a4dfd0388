use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use hamlog_lib::commands::{adif, qso, settings, AppState};
use hamlog_lib::config::{LogbookConfig, DB_PATH_ENV, DEFAULT_DB_FILE, DUPE_WINDOW_ENV};
use hamlog_lib::contact::Contact;
use hamlog_lib::db::{self, OperatorProfile};
use hamlog_lib::dupes::DEFAULT_WINDOW_SECS;

#[derive(Parser)]
#[command(name = "hamlog", about = "Amateur radio logbook with ADIF import/export", version)]
struct Cli {
    /// SQLite logbook file
    #[arg(long, global = true, env = DB_PATH_ENV, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Seconds within which two contacts count as the same QSO
    #[arg(
        long,
        global = true,
        env = DUPE_WINDOW_ENV,
        default_value_t = DEFAULT_WINDOW_SECS,
        value_parser = clap::value_parser!(u64)
    )]
    dupe_window: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import an ADIF file, skipping duplicates of logged contacts
    Import {
        file: PathBuf,
        /// Write skipped duplicates to an ADIF report (default DupeImport.adi)
        #[arg(long, num_args = 0..=1, default_missing_value = "DupeImport.adi")]
        report: Option<PathBuf>,
        /// Classify records without storing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Export the log to an ADIF file
    Export {
        file: PathBuf,
        /// Header OPERATOR field (defaults to the configured operator)
        #[arg(long)]
        operator: Option<String>,
        /// Only contacts matching this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Check whether a file looks like ADIF
    Check { file: PathBuf },

    /// Log a contact
    Add {
        callsign: String,
        band: String,
        mode: String,
        /// Report sent (e.g. 59, 599, -12)
        #[arg(allow_hyphen_values = true)]
        rst_sent: String,
        /// Report received
        #[arg(allow_hyphen_values = true)]
        rst_received: String,
        #[arg(long)]
        dxcc: Option<String>,
        #[arg(long)]
        locator: Option<String>,
        #[arg(long)]
        operator: Option<String>,
        /// UTC time as YYYYMMDDHHMMSS (default now)
        #[arg(long)]
        at: Option<String>,
    },

    /// List all contacts, newest first
    List {
        #[arg(long)]
        json: bool,
    },

    /// Search callsign, band, mode and DXCC
    Search {
        term: String,
        #[arg(long)]
        json: bool,
    },

    /// Delete a contact by id
    Delete { id: i64 },

    /// Show logbook statistics
    Stats,

    /// Save the operator profile
    Setup {
        callsign: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        locator: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging - default to info level for our crate
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("hamlog=info,hamlog_lib=info")
    ).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = LogbookConfig {
        db_path: cli.db,
        dupe_window_secs: cli.dupe_window,
    };

    // Header sniffing needs no database
    if let Command::Check { file } = &cli.command {
        if adif::is_valid_adif_file(file) {
            println!("{}: ADIF file", file.display());
            return Ok(());
        }
        return Err(format!("{} does not look like an ADIF file", file.display()));
    }

    let state = AppState::open(&config).await.map_err(|e| e.to_string())?;
    log::debug!("Logbook opened at {}", config.db_path.display());

    match cli.command {
        Command::Check { .. } => {}
        Command::Import { file, report, dry_run } => {
            let result = adif::import_into_store(&state, &file, dry_run)
                .await
                .map_err(|e| e.to_string())?;
            if !result.success {
                return Err(result.error_message.unwrap_or_default());
            }

            println!("Total records: {}", result.total_records);
            println!("Imported: {}{}", result.successful_imports, if dry_run { " (dry run)" } else { "" });
            println!("Duplicates: {}", result.duplicates_found);
            if result.invalid_records > 0 {
                println!("Invalid: {}", result.invalid_records);
            }

            if let Some(path) = report.filter(|_| result.duplicates_found > 0) {
                let operator = db::settings::operator_call(state.pool())
                    .await
                    .map_err(|e| e.to_string())?;
                if adif::generate_duplicate_report(&path, &result.duplicate_contacts, operator.as_deref(), &state.codec) {
                    println!("Duplicates saved to {}", path.display());
                } else {
                    return Err(format!("Could not write duplicate report {}", path.display()));
                }
            }
        }
        Command::Export { file, operator, search } => {
            let result = adif::export_from_store(&state, &file, operator.as_deref(), search.as_deref())
                .await
                .map_err(|e| e.to_string())?;
            if !result.success {
                return Err(result.error_message.unwrap_or_default());
            }
            println!(
                "Exported {} of {} contacts to {}",
                result.successful_exports,
                result.total_records,
                file.display()
            );
        }
        Command::Add { callsign, band, mode, rst_sent, rst_received, dxcc, locator, operator, at } => {
            let contact = qso::add_contact(
                &state,
                qso::NewContact {
                    callsign,
                    band,
                    mode,
                    rst_sent,
                    rst_received,
                    dxcc,
                    locator,
                    operator_call: operator,
                    date_time: at,
                },
            )
            .await?;
            println!("Added contact {} ({})", contact.id.unwrap_or_default(), contact.callsign);
        }
        Command::List { json } => {
            let contacts = qso::get_contacts(&state).await?;
            print_contacts(&contacts, json)?;
        }
        Command::Search { term, json } => {
            let contacts = qso::search_contacts(&state, &term).await?;
            print_contacts(&contacts, json)?;
        }
        Command::Delete { id } => {
            qso::delete_contact(&state, id).await?;
            println!("Deleted contact {}", id);
        }
        Command::Stats => {
            let stats = settings::get_db_stats(&state).await?;
            let profile = settings::get_operator_profile(&state).await?;
            if !profile.callsign.is_empty() {
                println!("Operator: {}", profile.callsign);
            }
            println!("Contacts: {}", stats.contact_count);
            println!("Bands: {}", stats.band_count);
            println!("Modes: {}", stats.mode_count);
            println!("DXCC: {}", stats.dxcc_count);
        }
        Command::Setup { callsign, first_name, last_name, locator } => {
            let profile = settings::setup_operator(
                &state,
                OperatorProfile { callsign, first_name, last_name, locator },
            )
            .await?;
            println!("Operator set to {}", profile.callsign);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

fn print_contacts(contacts: &[Contact], json: bool) -> Result<(), String> {
    if json {
        return print_json(&contacts);
    }

    for c in contacts {
        println!(
            "{:>5}  {}  {:<10} {:<5} {:<7} {:>4} {:>4}  {:<20} {:<6} {}",
            c.id.unwrap_or_default(),
            c.date_time.format("%Y-%m-%d %H:%M:%S"),
            c.callsign,
            c.band,
            c.mode,
            c.rst_sent,
            c.rst_received,
            c.dxcc,
            c.locator,
            c.operator_call
        );
    }
    println!("{} contacts", contacts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dupe_window_flag() {
        let cli = Cli::try_parse_from(["hamlog", "--dupe-window", "600", "stats"]).unwrap();
        assert_eq!(cli.dupe_window, 600);

        assert!(Cli::try_parse_from(["hamlog", "--dupe-window", "-5", "stats"]).is_err());
        assert!(Cli::try_parse_from(["hamlog", "--dupe-window=-5", "stats"]).is_err());
        assert!(Cli::try_parse_from(["hamlog", "--dupe-window", "five", "stats"]).is_err());
    }

    #[test]
    fn test_add_accepts_negative_reports() {
        let cli = Cli::try_parse_from(["hamlog", "add", "W1AW", "20m", "FT8", "-12", "+03"]).unwrap();
        match cli.command {
            Command::Add { rst_sent, rst_received, .. } => {
                assert_eq!(rst_sent, "-12");
                assert_eq!(rst_received, "+03");
            }
            _ => panic!("expected add"),
        }
    }
}
