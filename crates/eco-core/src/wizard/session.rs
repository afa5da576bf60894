use std::time::Duration;

use chrono::{Local, NaiveDateTime, Utc};
use tracing::{debug, info, warn};

use eco_catalog::FormCatalog;
use eco_model::{
    BusinessEntity, Coordinates, FormDefinition, InspectionRecord, Inspector, NewInspector,
    ResponseSet, ResponseValue, SignatureParty, Signatures,
};
use eco_persistence::{AppState, InspectorDirectory, KeyValueStore};

use super::step::{EntryContext, Phase, Step};
use crate::error::{LocationError, MediaError, Result, WizardError};
use crate::geolocation::{self, LocationProvider, PositionOptions};
use crate::media::{self, DataUrl, PhotoSource};
use crate::signature::SignaturePad;

/// Display size of the signature pads.
pub const PAD_WIDTH: u32 = 320;
pub const PAD_HEIGHT: u32 = 176;

/// Outcome of a multi-photo attachment.
#[derive(Debug, Default)]
pub struct PhotoBatch {
    pub attached: usize,
    pub failures: Vec<MediaError>,
}

/// One in-progress inspection.
///
/// The session owns the draft data for every step and enforces the order in
/// which steps may be visited. It emits exactly one [`InspectionRecord`],
/// from [`finalize`](Self::finalize), after which it is closed.
#[derive(Debug)]
pub struct WizardSession {
    step: Step,
    phase: Phase,
    entry: EntryContext,
    selected_inspector: Option<String>,
    business: BusinessEntity,
    locating: bool,
    form: Option<FormDefinition>,
    responses: ResponseSet,
    notes: String,
    photos: Vec<String>,
    signatures: Signatures,
    inspector_pad: SignaturePad,
    responsible_pad: SignaturePad,
}

impl WizardSession {
    pub fn new(catalog: &FormCatalog, entry: EntryContext) -> Result<Self> {
        Self::start_at(catalog, entry, Local::now().naive_local())
    }

    /// Start a session whose business draft is stamped with `now`.
    ///
    /// A preselected form must exist in `catalog`.
    pub fn start_at(catalog: &FormCatalog, entry: EntryContext, now: NaiveDateTime) -> Result<Self> {
        let form = match entry.preselected_form.as_deref() {
            Some(form_id) => Some(catalog.find(form_id).cloned().ok_or_else(|| {
                WizardError::UnknownForm {
                    form_id: form_id.to_string(),
                }
            })?),
            None => None,
        };
        debug!(
            preselected = ?entry.preselected_form,
            "starting inspection session"
        );
        Ok(Self {
            step: Step::SelectInspector,
            phase: Phase::Editing,
            entry,
            selected_inspector: None,
            business: BusinessEntity::starting_at(now),
            locating: false,
            form,
            responses: ResponseSet::new(),
            notes: String::new(),
            photos: Vec::new(),
            signatures: Signatures::default(),
            inspector_pad: SignaturePad::new(PAD_WIDTH, PAD_HEIGHT)?,
            responsible_pad: SignaturePad::new(PAD_WIDTH, PAD_HEIGHT)?,
        })
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn entry(&self) -> &EntryContext {
        &self.entry
    }

    pub fn selected_inspector_id(&self) -> Option<&str> {
        self.selected_inspector.as_deref()
    }

    pub fn selected_inspector<'a>(&self, directory: &'a InspectorDirectory) -> Option<&'a Inspector> {
        directory.find(self.selected_inspector.as_deref()?)
    }

    pub fn business(&self) -> &BusinessEntity {
        &self.business
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn form(&self) -> Option<&FormDefinition> {
        self.form.as_ref()
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn signatures(&self) -> &Signatures {
        &self.signatures
    }

    fn form_preselected(&self) -> bool {
        self.entry.preselected_form.is_some()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Steps shown in the step indicator.
    pub fn visible_steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|step| self.is_visible(*step))
            .collect()
    }

    fn is_visible(&self, step: Step) -> bool {
        step != Step::SelectForm || !self.form_preselected()
    }

    /// Whether the indicator button for `step` can be pressed.
    pub fn is_step_enabled(&self, step: Step) -> bool {
        if !self.is_visible(step) {
            return false;
        }
        step <= self.step || self.can_skip_ahead_to(step)
    }

    fn can_skip_ahead_to(&self, step: Step) -> bool {
        matches!(step, Step::Checklist | Step::SignAndFinalize)
            && self.step >= Step::BusinessIdentity
            && self.form.is_some()
    }

    /// Advance one step.
    pub fn next(&mut self) -> Result<Step> {
        self.ensure_open()?;
        let target = match self.step {
            Step::SelectInspector => {
                if self.selected_inspector.is_none() {
                    return Err(WizardError::InspectorRequired);
                }
                Step::BusinessIdentity
            }
            Step::BusinessIdentity if self.form_preselected() => Step::Checklist,
            Step::BusinessIdentity => Step::SelectForm,
            Step::SelectForm => {
                if self.form.is_none() {
                    return Err(WizardError::FormRequired);
                }
                Step::Checklist
            }
            Step::Checklist => Step::SignAndFinalize,
            Step::SignAndFinalize => {
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    target: "next step".to_string(),
                });
            }
        };
        self.go(target);
        Ok(target)
    }

    /// Go back one step. Backward moves keep every answer.
    pub fn back(&mut self) -> Result<Step> {
        self.ensure_open()?;
        let target = match self.step {
            Step::Checklist if self.form_preselected() => Some(Step::BusinessIdentity),
            step => step.previous(),
        };
        let target = target.ok_or_else(|| WizardError::InvalidTransition {
            from: self.step,
            target: "previous step".to_string(),
        })?;
        self.go(target);
        Ok(target)
    }

    /// Jump straight to a step from the step indicator.
    pub fn jump_to(&mut self, target: Step) -> Result<Step> {
        self.ensure_open()?;
        if target == self.step {
            return Ok(target);
        }
        let backward = target < self.step && self.is_visible(target);
        if !backward && !self.can_skip_ahead_to(target) {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                target: target.to_string(),
            });
        }
        self.go(target);
        Ok(target)
    }

    fn go(&mut self, target: Step) {
        debug!(from = %self.step, to = %target, "wizard step");
        self.step = target;
    }

    fn ensure_open(&self) -> Result<()> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Submitting => Err(WizardError::SubmissionInProgress),
            Phase::Finished => Err(WizardError::SessionClosed),
        }
    }

    fn ensure_step(&self, operation: &'static str, expected: Step) -> Result<()> {
        self.ensure_open()?;
        if self.step != expected {
            return Err(WizardError::WrongStep {
                operation,
                expected,
                current: self.step,
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Step 1: inspector
    // -------------------------------------------------------------------------

    pub fn select_inspector(&mut self, directory: &InspectorDirectory, id: &str) -> Result<()> {
        self.ensure_step("select_inspector", Step::SelectInspector)?;
        if !directory.contains(id) {
            return Err(WizardError::UnknownInspector { id: id.to_string() });
        }
        self.selected_inspector = Some(id.to_string());
        Ok(())
    }

    pub fn clear_inspector_selection(&mut self) -> Result<()> {
        self.ensure_step("clear_inspector_selection", Step::SelectInspector)?;
        self.selected_inspector = None;
        Ok(())
    }

    /// Register a new inspector and select it.
    pub fn create_inspector<S: KeyValueStore>(
        &mut self,
        app: &mut AppState<S>,
        draft: NewInspector,
    ) -> Result<Inspector> {
        self.ensure_step("create_inspector", Step::SelectInspector)?;
        let inspector = app.add_inspector(draft)?;
        self.selected_inspector = Some(inspector.id.clone());
        Ok(inspector)
    }

    // -------------------------------------------------------------------------
    // Step 2: business identity
    // -------------------------------------------------------------------------

    /// Edit the business draft. Coordinates are kept as they were; only
    /// [`capture_location`](Self::capture_location) writes them.
    pub fn update_business(&mut self, edit: impl FnOnce(&mut BusinessEntity)) -> Result<()> {
        self.ensure_step("update_business", Step::BusinessIdentity)?;
        let coordinates = self.business.coordinates();
        edit(&mut self.business);
        match coordinates {
            Some(coordinates) => self.business.set_coordinates(coordinates),
            None => self.business.clear_coordinates(),
        }
        Ok(())
    }

    /// Query the device position once and store it on the business draft.
    ///
    /// On any failure the previous coordinates are kept.
    pub async fn capture_location<P: LocationProvider>(
        &mut self,
        provider: &P,
        options: PositionOptions,
    ) -> Result<Coordinates> {
        self.ensure_step("capture_location", Step::BusinessIdentity)?;
        if !provider.is_supported() {
            return Err(LocationError::Unsupported.into());
        }
        if self.locating {
            return Err(LocationError::InProgress.into());
        }

        let result = {
            let _guard = LocatingGuard::enter(&mut self.locating);
            geolocation::locate(provider, options).await
        };
        let coordinates = result?;
        self.business.set_coordinates(coordinates);
        info!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "captured location"
        );
        Ok(coordinates)
    }

    // -------------------------------------------------------------------------
    // Step 3: form
    // -------------------------------------------------------------------------

    /// Make a catalog form active and continue to the checklist.
    ///
    /// Switching to a different form discards answers given for the old one.
    pub fn choose_form(&mut self, catalog: &FormCatalog, form_id: &str) -> Result<()> {
        self.ensure_step("choose_form", Step::SelectForm)?;
        let form = catalog
            .find(form_id)
            .ok_or_else(|| WizardError::UnknownForm {
                form_id: form_id.to_string(),
            })?;
        let switched = self.form.as_ref().is_some_and(|active| active.id != form.id);
        if switched && !self.responses.is_empty() {
            debug!(discarded = self.responses.len(), "form changed, clearing answers");
            self.responses = ResponseSet::new();
        }
        self.form = Some(form.clone());
        self.go(Step::Checklist);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Step 4: checklist
    // -------------------------------------------------------------------------

    pub fn set_response(&mut self, field_id: &str, value: ResponseValue) -> Result<()> {
        self.ensure_step("set_response", Step::Checklist)?;
        let form = self.form.as_ref().ok_or(WizardError::FormRequired)?;
        let field = form.field(field_id).ok_or_else(|| WizardError::UnknownField {
            form_id: form.id.clone(),
            field_id: field_id.to_string(),
        })?;
        if !field.field_type.accepts(&value) {
            return Err(WizardError::ResponseTypeMismatch {
                field_id: field_id.to_string(),
                expected: field.field_type,
            });
        }
        self.responses.set(field_id, value);
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.ensure_step("set_notes", Step::Checklist)?;
        self.notes = notes.into();
        Ok(())
    }

    /// Attach an already encoded image payload.
    pub fn attach_photo(&mut self, payload: String) -> Result<()> {
        self.ensure_step("attach_photo", Step::Checklist)?;
        let url = DataUrl::parse(&payload)?;
        if !url.is_image() {
            return Err(MediaError::UnsupportedImage {
                name: url.media_type,
            }
            .into());
        }
        self.photos.push(payload);
        Ok(())
    }

    /// Read photos concurrently and attach them in selection order.
    ///
    /// A photo that cannot be read is reported in the batch; the others are
    /// still attached.
    pub async fn attach_photos<P: PhotoSource>(&mut self, sources: &[P]) -> Result<PhotoBatch> {
        self.ensure_step("attach_photos", Step::Checklist)?;
        let mut batch = PhotoBatch::default();
        for result in media::read_photos(sources).await {
            match result {
                Ok(url) => {
                    self.photos.push(url.to_string());
                    batch.attached += 1;
                }
                Err(err) => {
                    warn!(error = %err, "photo not attached");
                    batch.failures.push(err);
                }
            }
        }
        Ok(batch)
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<String> {
        self.ensure_step("remove_photo", Step::Checklist)?;
        if index >= self.photos.len() {
            return Err(WizardError::PhotoIndexOutOfRange {
                index,
                len: self.photos.len(),
            });
        }
        Ok(self.photos.remove(index))
    }

    // -------------------------------------------------------------------------
    // Step 5: signatures and finalize
    // -------------------------------------------------------------------------

    pub fn pad_mut(&mut self, party: SignatureParty) -> Result<&mut SignaturePad> {
        self.ensure_step("sign", Step::SignAndFinalize)?;
        Ok(match party {
            SignatureParty::Inspector => &mut self.inspector_pad,
            SignatureParty::Responsible => &mut self.responsible_pad,
        })
    }

    pub fn inspector_pad_mut(&mut self) -> Result<&mut SignaturePad> {
        self.pad_mut(SignatureParty::Inspector)
    }

    pub fn responsible_pad_mut(&mut self) -> Result<&mut SignaturePad> {
        self.pad_mut(SignatureParty::Responsible)
    }

    /// Finish the stroke on a pad and store its payload as the signature.
    pub fn end_stroke(&mut self, party: SignatureParty) -> Result<()> {
        let payload = self.pad_mut(party)?.end_stroke()?;
        self.signatures.set(party, payload);
        Ok(())
    }

    /// Store an existing signature payload and show it on the pad.
    pub fn sign(&mut self, party: SignatureParty, payload: String) -> Result<()> {
        self.pad_mut(party)?.seed(&payload)?;
        self.signatures.set(party, payload);
        Ok(())
    }

    pub fn sign_inspector(&mut self, payload: String) -> Result<()> {
        self.sign(SignatureParty::Inspector, payload)
    }

    pub fn sign_responsible(&mut self, payload: String) -> Result<()> {
        self.sign(SignatureParty::Responsible, payload)
    }

    pub fn clear_signature(&mut self, party: SignatureParty) -> Result<()> {
        let payload = self.pad_mut(party)?.clear();
        self.signatures.set(party, payload);
        Ok(())
    }

    pub fn clear_inspector_signature(&mut self) -> Result<()> {
        self.clear_signature(SignatureParty::Inspector)
    }

    pub fn clear_responsible_signature(&mut self) -> Result<()> {
        self.clear_signature(SignatureParty::Responsible)
    }

    /// Whether the finalize button is enabled.
    pub fn can_finalize(&self) -> bool {
        self.step == Step::SignAndFinalize
            && self.phase == Phase::Editing
            && self.signatures.is_complete()
    }

    /// Assemble the record, wait out the commit latency and archive it.
    ///
    /// On success the session is finished. A rejected finalize appends
    /// nothing and leaves the session at step 5.
    pub async fn finalize<S: KeyValueStore>(
        &mut self,
        app: &mut AppState<S>,
        latency: Duration,
    ) -> Result<InspectionRecord> {
        self.ensure_step("finalize", Step::SignAndFinalize)?;
        if let Some(party) = self.signatures.missing() {
            return Err(WizardError::SignatureRequired { party });
        }
        let inspector = match self.selected_inspector.as_deref() {
            Some(id) => app.inspectors().find(id).cloned().ok_or_else(|| {
                WizardError::InvalidSession {
                    reason: format!("inspector {id} is no longer in the directory"),
                }
            })?,
            None => {
                return Err(WizardError::InvalidSession {
                    reason: "no inspector selected".to_string(),
                });
            }
        };
        let form = self.form.as_ref().ok_or_else(|| WizardError::InvalidSession {
            reason: "no checklist form is active".to_string(),
        })?;

        let record = InspectionRecord {
            id: app.next_record_id()?,
            inspector,
            business: self.business.clone(),
            form_id: form.id.clone(),
            form_title: form.title.clone(),
            responses: self.responses.clone(),
            notes: self.notes.clone(),
            photos: self.photos.clone(),
            signatures: self.signatures.clone(),
            created_at: Utc::now(),
        };

        let submitting = SubmittingGuard::enter(&mut self.phase);
        tokio::time::sleep(latency).await;
        app.add_record(record.clone())?;
        submitting.finish();
        info!(id = %record.id, form = %record.form_id, "inspection finalized");
        Ok(record)
    }
}

/// Marks a finalize in flight. Unless finished, dropping it (a storage
/// failure, or the caller abandoning the future) returns to editing.
struct SubmittingGuard<'a>(&'a mut Phase);

impl<'a> SubmittingGuard<'a> {
    fn enter(phase: &'a mut Phase) -> Self {
        *phase = Phase::Submitting;
        Self(phase)
    }

    fn finish(self) {
        *self.0 = Phase::Finished;
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        if *self.0 == Phase::Submitting {
            *self.0 = Phase::Editing;
        }
    }
}

/// Holds the locating flag for the duration of one position query.
struct LocatingGuard<'a>(&'a mut bool);

impl<'a> LocatingGuard<'a> {
    fn enter(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LocatingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
