//! Command implementations.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use eco_catalog::FormCatalog;
use eco_core::Route;
use eco_model::NewInspector;
use eco_persistence::{AppState, FileStore, PersistenceError};
use eco_report::{HtmlPrinter, PrintDocument, PrintSession, render_text};

use eco_cli::access;
use eco_cli::inspect::{RunOptions, run_script};
use eco_cli::listing::{
    EMPTY_ARCHIVE, forms_table, history_table, inspectors_table, status_table,
    write_history_csv, write_history_json,
};
use eco_cli::script::InspectionScript;
use eco_cli::settings::Settings;

use crate::cli::{
    AddInspectorArgs, HistoryArgs, HistoryFormatArg, InspectArgs, InspectorCommand, PrintArgs,
    PrintFormatArg,
};

/// Everything a command needs from the environment.
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
}

impl Context {
    fn open(&self) -> AppState<FileStore> {
        AppState::load(FileStore::new(&self.data_dir))
    }
}

fn explain(err: PersistenceError) -> anyhow::Error {
    let message = match err.suggestion() {
        Some(hint) => format!("{} {hint}", err.user_message()),
        None => err.user_message(),
    };
    anyhow::Error::new(err).context(message)
}

pub fn run_login(ctx: &Context, name: &str) -> Result<()> {
    let mut app = ctx.open();
    if access::enter(&app, "/login")? != Route::Login {
        let current = app.user().map(|user| user.name.as_str()).unwrap_or_default();
        println!("Sudah login sebagai {current}.");
        return Ok(());
    }
    let user = app.login(name).map_err(explain)?;
    println!("Selamat datang, {}.", user.name);
    Ok(())
}

pub fn run_logout(ctx: &Context) -> Result<()> {
    let mut app = ctx.open();
    app.logout().map_err(explain)?;
    println!("Berhasil logout.");
    Ok(())
}

pub fn run_status(ctx: &Context) -> Result<()> {
    let app = ctx.open();
    access::enter(&app, "/")?;
    println!("{}", status_table(&app.status()));
    println!("Data: {}", ctx.data_dir.display());
    Ok(())
}

pub fn run_forms(ctx: &Context) -> Result<()> {
    let app = ctx.open();
    access::enter(&app, "/")?;
    let catalog = FormCatalog::load_embedded().context("failed to load form catalog")?;
    println!("{}", forms_table(&catalog));
    Ok(())
}

pub fn run_inspector(ctx: &Context, command: &InspectorCommand) -> Result<()> {
    let mut app = ctx.open();
    access::enter(&app, "/new-inspection")?;
    match command {
        InspectorCommand::List => {
            if app.inspectors().is_empty() {
                println!("Belum ada pejabat pengawas terdaftar.");
            } else {
                println!("{}", inspectors_table(app.inspectors().iter()));
            }
        }
        InspectorCommand::Add(args) => {
            let inspector = app
                .add_inspector(new_inspector(args))
                .map_err(explain)?;
            println!("Pejabat {} terdaftar dengan ID {}.", inspector.name, inspector.id);
        }
        InspectorCommand::Remove { id } => {
            let referenced = app
                .remove_inspector(id)
                .map_err(explain)?;
            println!("Pejabat {id} dihapus.");
            if referenced > 0 {
                println!("{referenced} arsip tetap menyimpan data pejabat ini.");
            }
        }
    }
    Ok(())
}

fn new_inspector(args: &AddInspectorArgs) -> NewInspector {
    NewInspector {
        name: args.name.clone(),
        nip: args.nip.clone(),
        rank: args.rank.clone(),
        job_title: args.job_title.clone(),
        official_number: args.official_number.clone(),
        agency: args.agency.clone(),
        assignment_letter_ref: args.assignment_letter.clone(),
    }
}

pub async fn run_inspect(ctx: &Context, args: &InspectArgs) -> Result<()> {
    let mut app = ctx.open();
    let path = match &args.form {
        Some(form) => Route::new_inspection(form).path(),
        None => Route::NewInspection { form: None }.path(),
    };
    let route = access::enter(&app, &path)?;
    let entry = route.entry_context().unwrap_or_default();

    let catalog = FormCatalog::load_embedded().context("failed to load form catalog")?;
    let (script, base_dir) = InspectionScript::load(&args.script)?;
    let options = RunOptions {
        submit_latency: ctx.settings.submit_latency(),
        location_timeout: ctx.settings.location_timeout(),
    };

    let spinner = spinner();
    let result = run_script(&mut app, &catalog, &script, &base_dir, entry, options, &spinner).await;
    spinner.finish_and_clear();
    let outcome = result?;

    if let Some(id) = &outcome.created_inspector {
        println!("Pejabat baru terdaftar dengan ID {id}.");
    }
    if let Some(warning) = &outcome.location_warning {
        eprintln!("warning: {warning} Koordinat dicatat sebagai input manual.");
    }
    for failure in &outcome.photo_failures {
        eprintln!("warning: foto tidak dilampirkan: {failure}");
    }
    let record = &outcome.record;
    println!(
        "Berita acara {} tersimpan: Form {}, {}, {} foto.",
        record.id,
        record.form_id,
        record.business.name,
        record.photos.len()
    );
    Ok(())
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn run_history(ctx: &Context, args: &HistoryArgs) -> Result<()> {
    let app = ctx.open();
    access::enter(&app, "/history")?;
    let records = app.archive().filter(&args.query);
    let stdout = io::stdout();
    match args.format {
        HistoryFormatArg::Table => {
            if records.is_empty() {
                println!("{EMPTY_ARCHIVE}");
            } else {
                println!("{}", history_table(&records));
            }
        }
        HistoryFormatArg::Json => write_history_json(stdout.lock(), &records)?,
        HistoryFormatArg::Csv => write_history_csv(stdout.lock(), &records)?,
    }
    Ok(())
}

pub async fn run_print(ctx: &Context, args: &PrintArgs) -> Result<()> {
    let app = ctx.open();
    access::enter(&app, "/history")?;
    let record = app
        .archive()
        .find(&args.id)
        .ok_or_else(|| anyhow!("arsip {} tidak ditemukan", args.id))?;
    let catalog = FormCatalog::load_embedded().context("failed to load form catalog")?;
    let form = catalog.find(&record.form_id);
    let printed_on = Local::now().date_naive();

    match args.format {
        PrintFormatArg::Text => {
            let document = PrintDocument::project(record, form, printed_on);
            write_output(args.output.as_ref(), render_text(&document).as_bytes())?;
        }
        PrintFormatArg::Html => {
            let out: Box<dyn Write> = match &args.output {
                Some(path) => Box::new(BufWriter::new(File::create(path).with_context(
                    || format!("failed to create {}", path.display()),
                )?)),
                None => Box::new(io::stdout().lock()),
            };
            let mut session = PrintSession::with_delay(HtmlPrinter::new(out), ctx.settings.print_delay());
            session.print_record(record, form, printed_on).await?;
        }
    }
    if let Some(path) = &args.output {
        info!(id = %record.id, path = %path.display(), "document written");
        eprintln!("Dokumen {} ditulis ke {}", record.id, path.display());
    }
    Ok(())
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
        }
        None => io::stdout()
            .lock()
            .write_all(bytes)
            .context("failed to write to stdout"),
    }
}
