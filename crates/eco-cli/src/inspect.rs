//! Drive a [`WizardSession`] from an [`InspectionScript`].
//!
//! Every step goes through the session API, in the order a person would
//! click through the wizard, so the CLI gets exactly the same validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use tracing::{info, warn};

use eco_catalog::FormCatalog;
use eco_core::{
    EntryContext, FilePhotoSource, FixedLocation, NoLocation, PhotoSource,
    PositionOptions, Step, WizardError, WizardSession,
};
use eco_model::{Coordinates, InspectionRecord, SignatureParty};
use eco_persistence::{AppState, KeyValueStore};

use crate::script::{InspectionScript, InspectorChoice, SignatureScript};

/// Timing knobs for a scripted run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub submit_latency: Duration,
    pub location_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            submit_latency: Duration::from_millis(1500),
            location_timeout: PositionOptions::default().timeout,
        }
    }
}

/// What happened during a scripted run, besides the record itself.
#[derive(Debug)]
pub struct RunOutcome {
    pub record: InspectionRecord,
    /// Inspector registered by the script, if any.
    pub created_inspector: Option<String>,
    /// Why no GPS fix was stored, if none was.
    pub location_warning: Option<String>,
    /// Photos that could not be attached, with the reason.
    pub photo_failures: Vec<String>,
}

/// Run every wizard step of `script` and archive the resulting record.
///
/// `base_dir` resolves relative photo and signature paths. `progress` shows
/// what the session is waiting on; pass [`ProgressBar::hidden`] when there
/// is no terminal.
pub async fn run_script<S: KeyValueStore>(
    app: &mut AppState<S>,
    catalog: &FormCatalog,
    script: &InspectionScript,
    base_dir: &Path,
    entry: EntryContext,
    options: RunOptions,
    progress: &ProgressBar,
) -> Result<RunOutcome> {
    let mut session = WizardSession::new(catalog, entry).map_err(explain)?;
    if let (Some(preselected), Some(requested)) =
        (session.entry().preselected_form.as_deref(), script.form.as_deref())
        && preselected != requested
    {
        warn!(preselected, requested, "script form ignored, form already chosen");
    }

    // Step 1
    let created_inspector = match &script.inspector {
        InspectorChoice::Existing { id } => {
            session.select_inspector(app.inspectors(), id).map_err(explain)?;
            None
        }
        InspectorChoice::New(draft) => {
            let inspector = session
                .create_inspector(app, draft.clone())
                .map_err(explain)?;
            Some(inspector.id)
        }
    };
    session.next().map_err(explain)?;

    // Step 2
    session
        .update_business(|entity| script.business.apply(entity))
        .map_err(explain)?;
    progress.set_message("Mengambil koordinat GPS...");
    let position = PositionOptions::default().with_timeout(options.location_timeout);
    let located = match script.location {
        Some(location) => {
            let provider = FixedLocation(Coordinates::new(location.latitude, location.longitude));
            session.capture_location(&provider, position).await
        }
        None => session.capture_location(&NoLocation, position).await,
    };
    let location_warning = match located {
        Ok(_) => None,
        Err(err @ WizardError::Location(_)) => Some(err.user_message()),
        Err(err) => return Err(explain(err)),
    };

    // Step 3, unless the form came with the entry
    if session.next().map_err(explain)? == Step::SelectForm {
        let Some(form_id) = script.form.as_deref() else {
            bail!("the script does not name a form; add `form = \"<ID>\"` or pass --form");
        };
        session.choose_form(catalog, form_id).map_err(explain)?;
    }

    // Step 4
    for (field_id, value) in &script.responses {
        session
            .set_response(field_id, value.clone())
            .map_err(explain)?;
    }
    session.set_notes(script.notes.clone()).map_err(explain)?;
    let sources: Vec<FilePhotoSource> = script
        .photos
        .iter()
        .map(|path| FilePhotoSource::new(resolve(base_dir, path)))
        .collect();
    let batch = session.attach_photos(&sources).await.map_err(explain)?;
    let photo_failures = batch
        .failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    session.next().map_err(explain)?;

    // Step 5
    sign(&mut session, SignatureParty::Inspector, &script.signatures.inspector, base_dir).await?;
    sign(
        &mut session,
        SignatureParty::Responsible,
        &script.signatures.responsible,
        base_dir,
    )
    .await?;

    progress.set_message("Menyimpan berita acara...");
    let record = session
        .finalize(app, options.submit_latency)
        .await
        .map_err(explain)?;
    info!(id = %record.id, photos = record.photos.len(), "scripted inspection archived");

    Ok(RunOutcome {
        record,
        created_inspector,
        location_warning,
        photo_failures,
    })
}

async fn sign(
    session: &mut WizardSession,
    party: SignatureParty,
    signature: &SignatureScript,
    base_dir: &Path,
) -> Result<()> {
    if let Some(path) = &signature.image {
        let source = FilePhotoSource::new(resolve(base_dir, path));
        let url = source
            .read()
            .await
            .with_context(|| format!("failed to load {} signature", party.label()))?;
        return session.sign(party, url.to_string()).map_err(explain);
    }

    for (index, stroke) in signature.strokes.iter().enumerate() {
        let Some(([x, y], rest)) = stroke.split_first() else {
            continue;
        };
        let pointer = index as u64;
        let pad = session.pad_mut(party).map_err(explain)?;
        pad.begin_stroke(pointer, *x, *y);
        for [x, y] in rest {
            pad.move_to(pointer, *x, *y);
        }
        session.end_stroke(party).map_err(explain)?;
    }
    Ok(())
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Convert a wizard error into the message shown to the inspector.
fn explain(err: WizardError) -> anyhow::Error {
    let message = err.user_message();
    if message == err.to_string() {
        anyhow::Error::new(err)
    } else {
        anyhow::Error::new(err).context(message)
    }
}
