//! `dpi`: terminal front-end for the DPI SMUR patient record API.
//!
//! Every command mounts the relevant view (a fresh fetch), runs one action
//! through its state machine and prints the resulting state. Notifications go
//! to stderr; the exit status is non-zero when the requested action failed.

mod console;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dpi_core::config::{DEFAULT_API_BASE_URL, DEFAULT_FHIR_BASE_URL};
use dpi_core::{
    Api, ClientConfig, Confirm, Context, Dashboard, DeleteOutcome, DirectorySink, DpiClient,
    FixedAnswer, InterventionSection, Notification, Notifier, PatientSection, SubmitOutcome,
    Transport, UreqTransport,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::console::{ConsoleNotifier, StdinConfirm};

#[derive(Parser)]
#[command(name = "dpi")]
#[command(about = "DPI SMUR patient record client")]
struct Cli {
    /// Base URL of the DPI REST API
    #[arg(long, env = "DPI_API_URL", default_value = DEFAULT_API_BASE_URL, global = true)]
    api_url: String,
    /// Base URL of the FHIR server used for patient links
    #[arg(long, env = "DPI_FHIR_URL", default_value = DEFAULT_FHIR_BASE_URL, global = true)]
    fhir_url: String,
    /// Directory receiving exported reports and HL7 messages
    #[arg(long, env = "DPI_EXPORT_DIR", default_value = ".", global = true)]
    export_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show patient and intervention counters
    Stats,
    /// Manage patients
    #[command(subcommand)]
    Patients(PatientCommand),
    /// Manage interventions
    #[command(subcommand)]
    Interventions(InterventionCommand),
}

#[derive(Subcommand)]
enum PatientCommand {
    /// List patients, optionally filtered by name
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a patient
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: String,
    },
    /// Edit a patient; omitted fields keep their current value
    Update {
        id: Uuid,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        birth_date: Option<String>,
    },
    /// Delete a patient
    Delete {
        id: Uuid,
        #[command(flatten)]
        confirm: AssumeYes,
    },
    /// Show a patient's recent stays
    Summary { id: Uuid },
    /// Print the FHIR Patient URL
    FhirLink { id: Uuid },
}

#[derive(Subcommand)]
enum InterventionCommand {
    /// List interventions, optionally filtered by location or notes
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Create an intervention
    Create {
        /// Date and time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        datetime: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Edit an intervention; omitted fields keep their current value
    Update {
        id: Uuid,
        #[arg(long)]
        datetime: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an intervention
    Delete {
        id: Uuid,
        #[command(flatten)]
        confirm: AssumeYes,
    },
    /// Show Glasgow/NEWS scores
    Scores { id: Uuid },
    /// Download the PDF report
    ExportPdf { id: Uuid },
    /// Download the HL7 message
    ExportHl7 { id: Uuid },
}

#[derive(Args)]
struct AssumeYes {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
}

struct App<T> {
    api: Api<T>,
    notifier: ConsoleNotifier,
    sink: DirectorySink,
    fhir_base_url: String,
}

impl App<UreqTransport> {
    fn new(config: &ClientConfig) -> Self {
        Self {
            api: Api::new(DpiClient::new(config.api_base_url()), UreqTransport::new()),
            notifier: ConsoleNotifier,
            sink: DirectorySink::new(config.export_dir()),
            fhir_base_url: config.fhir_base_url().to_string(),
        }
    }
}

impl<T: Transport> App<T> {
    fn context<'a>(&'a self, confirm: &'a dyn Confirm) -> Context<'a, T> {
        Context::new(&self.api, &self.notifier, confirm, &self.sink)
    }

    fn missing(&self, noun: &str, id: Uuid) {
        self.notifier
            .notify(Notification::error(format!("No {noun} with id {id}")));
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.api_url, &cli.fhir_url, cli.export_dir)?;
    debug!(api = config.api_base_url(), "resolved configuration");

    let app = App::new(&config);
    let succeeded = match cli.command {
        Commands::Stats => stats(&app),
        Commands::Patients(command) => patients(&app, command),
        Commands::Interventions(command) => interventions(&app, command),
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn confirm_for(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(FixedAnswer::yes())
    } else {
        Box::new(StdinConfirm)
    }
}

/// Whether a delete ended the way the user asked; a declined prompt is not a failure.
fn delete_succeeded(outcome: DeleteOutcome) -> bool {
    outcome != DeleteOutcome::Failed
}

fn saved<R>(outcome: Option<SubmitOutcome<R>>) -> bool {
    matches!(outcome, Some(SubmitOutcome::Saved(_)))
}

fn print_path(path: Option<PathBuf>) -> bool {
    match path {
        Some(path) => {
            println!("{}", path.display());
            true
        }
        None => false,
    }
}

fn stats<T: Transport>(app: &App<T>) -> bool {
    let ctx = app.context(&StdinConfirm);
    let mut dashboard = Dashboard::new();
    if !dashboard.reload(&ctx) {
        return false;
    }
    print!("{}", render::stats(&dashboard.stats()));
    true
}

/// Runs one patient command. Returns whether the requested action succeeded,
/// independent of the mount fetch that precedes it.
fn patients<T: Transport>(app: &App<T>, command: PatientCommand) -> bool {
    let confirm = match &command {
        PatientCommand::Delete { confirm, .. } => confirm_for(confirm.yes),
        _ => confirm_for(false),
    };
    let ctx = app.context(confirm.as_ref());
    let mut section = PatientSection::new(&app.fhir_base_url);

    let succeeded = match command {
        PatientCommand::List { search } => {
            if !section.reload(&ctx) {
                return false;
            }
            if let Some(search) = search {
                section.records.list_mut().set_search(search);
            }
            true
        }
        PatientCommand::Create {
            first_name,
            last_name,
            birth_date,
        } => {
            section.reload(&ctx);
            let fields = section.records.open_new_form().fields_mut();
            fields.first_name = first_name;
            fields.last_name = last_name;
            fields.birth_date = birth_date;
            saved(section.records.submit_form(&ctx))
        }
        PatientCommand::Update {
            id,
            first_name,
            last_name,
            birth_date,
        } => {
            section.reload(&ctx);
            let Some(form) = section.records.open_edit_form(id) else {
                app.missing("patient", id);
                return false;
            };
            let fields = form.fields_mut();
            if let Some(first_name) = first_name {
                fields.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                fields.last_name = last_name;
            }
            if let Some(birth_date) = birth_date {
                fields.birth_date = birth_date;
            }
            saved(section.records.submit_form(&ctx))
        }
        PatientCommand::Delete { id, .. } => {
            section.reload(&ctx);
            delete_succeeded(section.records.delete(&ctx, id))
        }
        PatientCommand::Summary { id } => {
            if !section.view_summary(&ctx, id) {
                return false;
            }
            print!("{}", render::summary(section.summary().unwrap_or_default()));
            section.close_summary();
            return true;
        }
        PatientCommand::FhirLink { id } => {
            println!("{}", section.fhir_link(id));
            return true;
        }
    };

    print!("{}", render::patients(section.records.list().visible()));
    succeeded
}

fn interventions<T: Transport>(app: &App<T>, command: InterventionCommand) -> bool {
    let confirm = match &command {
        InterventionCommand::Delete { confirm, .. } => confirm_for(confirm.yes),
        _ => confirm_for(false),
    };
    let ctx = app.context(confirm.as_ref());
    let mut section = InterventionSection::new();

    let succeeded = match command {
        InterventionCommand::List { search } => {
            if !section.reload(&ctx) {
                return false;
            }
            if let Some(search) = search {
                section.records.list_mut().set_search(search);
            }
            true
        }
        InterventionCommand::Create {
            datetime,
            location,
            notes,
        } => {
            section.reload(&ctx);
            let fields = section.records.open_new_form().fields_mut();
            fields.datetime = datetime;
            fields.location = location;
            fields.notes = notes;
            saved(section.records.submit_form(&ctx))
        }
        InterventionCommand::Update {
            id,
            datetime,
            location,
            notes,
        } => {
            section.reload(&ctx);
            let Some(form) = section.records.open_edit_form(id) else {
                app.missing("intervention", id);
                return false;
            };
            let fields = form.fields_mut();
            if let Some(datetime) = datetime {
                fields.datetime = datetime;
            }
            if let Some(location) = location {
                fields.location = location;
            }
            if let Some(notes) = notes {
                fields.notes = notes;
            }
            saved(section.records.submit_form(&ctx))
        }
        InterventionCommand::Delete { id, .. } => {
            section.reload(&ctx);
            delete_succeeded(section.records.delete(&ctx, id))
        }
        InterventionCommand::Scores { id } => {
            let Some(scores) = section.show_scores(&ctx, id) else {
                return false;
            };
            print!("{}", render::scores(&scores));
            return true;
        }
        InterventionCommand::ExportPdf { id } => return print_path(section.download_pdf(&ctx, id)),
        InterventionCommand::ExportHl7 { id } => return print_path(section.download_hl7(&ctx, id)),
    };

    print!("{}", render::interventions(section.records.list().visible()));
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use clap::CommandFactory;
    use dpi_core::{ApiError, HttpRequest, HttpResponse};

    const PATIENT: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","firstName":"Jeanne","lastName":"Martin","birthDate":"1980-02-14"}"#;

    /// Replays canned responses in order.
    struct Canned(RefCell<VecDeque<HttpResponse>>);

    impl Transport for Canned {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.0
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no response left".to_string()))
        }
    }

    fn app_replaying<const N: usize>(responses: [HttpResponse; N]) -> App<Canned> {
        App {
            api: Api::new(
                DpiClient::new("http://dpi.test"),
                Canned(RefCell::new(responses.into())),
            ),
            notifier: ConsoleNotifier,
            sink: DirectorySink::new(std::env::temp_dir()),
            fhir_base_url: DEFAULT_FHIR_BASE_URL.to_string(),
        }
    }

    fn create_jeanne() -> PatientCommand {
        PatientCommand::Create {
            first_name: "Jeanne".to_string(),
            last_name: "Martin".to_string(),
            birth_date: "1980-02-14".to_string(),
        }
    }

    #[test]
    fn create_succeeds_when_only_the_mount_fetch_failed() {
        let app = app_replaying([
            HttpResponse::new(500, "boom"),
            HttpResponse::new(201, PATIENT),
            HttpResponse::new(200, format!("[{PATIENT}]")),
        ]);
        assert!(patients(&app, create_jeanne()));
    }

    #[test]
    fn rejected_create_fails() {
        let app = app_replaying([HttpResponse::new(200, "[]"), HttpResponse::new(422, "invalid")]);
        assert!(!patients(&app, create_jeanne()));
    }

    #[test]
    fn failed_delete_fails() {
        let app = app_replaying([HttpResponse::new(200, "[]"), HttpResponse::new(500, "boom")]);
        let command = PatientCommand::Delete {
            id: Uuid::from_u128(1),
            confirm: AssumeYes { yes: true },
        };
        assert!(!patients(&app, command));
    }

    #[test]
    fn unknown_id_update_fails() {
        let app = app_replaying([HttpResponse::new(200, "[]")]);
        let command = InterventionCommand::Update {
            id: Uuid::from_u128(3),
            datetime: None,
            location: Some("Lyon".to_string()),
            notes: None,
        };
        assert!(!interventions(&app, command));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delete_accepts_short_yes_flag() {
        let cli = Cli::try_parse_from([
            "dpi",
            "patients",
            "delete",
            "00000000-0000-0000-0000-000000000000",
            "-y",
        ])
        .unwrap();
        match cli.command {
            Commands::Patients(PatientCommand::Delete { id, confirm }) => {
                assert!(id.is_nil());
                assert!(confirm.yes);
            }
            _ => panic!("parsed the wrong command"),
        }
    }

    #[test]
    fn invalid_id_is_rejected() {
        assert!(Cli::try_parse_from(["dpi", "interventions", "scores", "not-a-uuid"]).is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "dpi",
            "stats",
            "--api-url",
            "http://dpi.local:8080",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://dpi.local:8080");
    }
}
