//! # TUI Application Core
//!
//! Main application state, screen navigation, and the new-entry form. The
//! app stays free of I/O: key actions either mutate state or return a
//! `StoreRequest` the binary executes against the record store.

use crate::core::dates::{format_display_date, format_iso_date, parse_due_date};
use crate::core::{TreatmentRecord, TREATMENT_CHOICES};
use crate::features::scheduler::{compute_next_due_date, IntervalPolicy};
use crate::tui::event::KeyAction;
use crate::tui::state::RecordsState;
use chrono::NaiveDate;

/// Available screens in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    NewEntry,
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Overview => "Genel Bakış",
            Screen::NewEntry => "Yeni Kayıt",
            Screen::Help => "Yardım",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Screen::Overview => '1',
            Screen::NewEntry => '2',
            Screen::Help => '?',
        }
    }

    pub fn all() -> &'static [Screen] {
        &[Screen::Overview, Screen::NewEntry, Screen::Help]
    }
}

/// Subject selection mode in the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetMode {
    /// Pick an existing pet from the record set
    FromList,
    /// Type a new pet name
    NewName,
}

/// Interval-policy selection mode in the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMode {
    /// Month-based: next due = applied + months * 30 days
    Months,
    /// Manually chosen date
    ManualDate,
}

/// Focusable fields of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PetMode,
    PetSelect,
    PetName,
    Treatment,
    AppliedDate,
    PolicyMode,
    Months,
    ManualDate,
    Weight,
    Submit,
}

/// State of the new-entry form
#[derive(Debug)]
pub struct EntryForm {
    pub pet_mode: PetMode,
    pub pet_index: usize,
    pub pet_name: String,
    pub treatment_index: usize,
    pub applied_date: String,
    pub policy_mode: PolicyMode,
    pub months: u32,
    pub manual_date: String,
    pub weight: String,
    pub focus: FormField,
}

impl EntryForm {
    pub fn new(today: NaiveDate) -> Self {
        EntryForm {
            pet_mode: PetMode::FromList,
            pet_index: 0,
            pet_name: String::new(),
            treatment_index: 0,
            applied_date: format_iso_date(today),
            policy_mode: PolicyMode::Months,
            months: 12,
            manual_date: String::new(),
            weight: String::new(),
            focus: FormField::PetMode,
        }
    }

    /// The fields visible under the current mode selections.
    pub fn fields(&self, has_existing_pets: bool) -> Vec<FormField> {
        let mut fields = vec![FormField::PetMode];
        if self.pet_mode == PetMode::FromList && has_existing_pets {
            fields.push(FormField::PetSelect);
        } else {
            fields.push(FormField::PetName);
        }
        fields.push(FormField::Treatment);
        fields.push(FormField::AppliedDate);
        fields.push(FormField::PolicyMode);
        match self.policy_mode {
            PolicyMode::Months => fields.push(FormField::Months),
            PolicyMode::ManualDate => fields.push(FormField::ManualDate),
        }
        fields.push(FormField::Weight);
        fields.push(FormField::Submit);
        fields
    }

    pub fn focus_next(&mut self, has_existing_pets: bool) {
        let fields = self.fields(has_existing_pets);
        let position = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(position + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self, has_existing_pets: bool) {
        let fields = self.fields(has_existing_pets);
        let position = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(position + fields.len() - 1) % fields.len()];
    }

    /// Adjust the focused selector by one step left or right.
    pub fn adjust(&mut self, step: i64, existing_pet_count: usize) {
        match self.focus {
            FormField::PetMode => {
                self.pet_mode = match self.pet_mode {
                    PetMode::FromList => PetMode::NewName,
                    PetMode::NewName => PetMode::FromList,
                };
            }
            FormField::PetSelect if existing_pet_count > 0 => {
                self.pet_index = cycle(self.pet_index, step, existing_pet_count);
            }
            FormField::Treatment => {
                self.treatment_index = cycle(self.treatment_index, step, TREATMENT_CHOICES.len());
            }
            FormField::PolicyMode => {
                self.policy_mode = match self.policy_mode {
                    PolicyMode::Months => PolicyMode::ManualDate,
                    PolicyMode::ManualDate => PolicyMode::Months,
                };
            }
            FormField::Months => {
                let months = i64::from(self.months) + step;
                self.months = months.clamp(1, 12) as u32;
            }
            _ => {}
        }
    }

    /// Insert a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::PetName => self.pet_name.push(c),
            FormField::AppliedDate if c.is_ascii_digit() || c == '-' || c == '.' => {
                self.applied_date.push(c);
            }
            FormField::ManualDate if c.is_ascii_digit() || c == '-' || c == '.' => {
                self.manual_date.push(c);
            }
            FormField::Weight if c.is_ascii_digit() || c == '.' || c == ',' => {
                self.weight.push(c);
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::PetName => {
                self.pet_name.pop();
            }
            FormField::AppliedDate => {
                self.applied_date.pop();
            }
            FormField::ManualDate => {
                self.manual_date.pop();
            }
            FormField::Weight => {
                self.weight.pop();
            }
            _ => {}
        }
    }

    /// The subject name the current selections resolve to.
    pub fn subject_name(&self, existing_pets: &[String]) -> String {
        if self.pet_mode == PetMode::FromList && !existing_pets.is_empty() {
            let index = self.pet_index.min(existing_pets.len() - 1);
            existing_pets[index].clone()
        } else {
            self.pet_name.trim().to_string()
        }
    }

    /// The next-due date the current inputs compute to, for live preview.
    pub fn computed_next_due(&self) -> Option<NaiveDate> {
        let applied = parse_due_date(&self.applied_date)?;
        match self.policy_mode {
            PolicyMode::Months => Some(compute_next_due_date(
                applied,
                &IntervalPolicy::Months(self.months),
            )),
            PolicyMode::ManualDate => parse_due_date(&self.manual_date),
        }
    }

    /// Validate the form and build the record to append.
    pub fn build_record(&self, existing_pets: &[String]) -> Result<TreatmentRecord, String> {
        let subject_name = self.subject_name(existing_pets);
        if subject_name.is_empty() {
            return Err("Lütfen bir evcil hayvan ismi girin.".to_string());
        }

        let applied = parse_due_date(&self.applied_date)
            .ok_or_else(|| "Uygulama tarihi geçersiz (YYYY-AA-GG).".to_string())?;

        let policy = match self.policy_mode {
            PolicyMode::Months => IntervalPolicy::Months(self.months),
            PolicyMode::ManualDate => {
                let manual = parse_due_date(&self.manual_date)
                    .ok_or_else(|| "Sonraki tarih geçersiz (YYYY-AA-GG).".to_string())?;
                if manual < applied {
                    return Err("Sonraki tarih uygulama tarihinden önce olamaz.".to_string());
                }
                IntervalPolicy::Manual(manual)
            }
        };
        let next_due = compute_next_due_date(applied, &policy);

        let weight_kg = match self.weight.trim() {
            "" => None,
            raw => Some(
                raw.replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| "Kilo değeri geçersiz.".to_string())?,
            ),
        };

        Ok(TreatmentRecord {
            subject_name,
            treatment_type: TREATMENT_CHOICES[self.treatment_index].to_string(),
            applied_date: format_iso_date(applied),
            next_due_date: format_iso_date(next_due),
            weight_kg,
        })
    }
}

fn cycle(index: usize, step: i64, len: usize) -> usize {
    let len = len as i64;
    ((index as i64 + step).rem_euclid(len)) as usize
}

/// A store operation requested by the UI, executed by the binary.
#[derive(Debug, PartialEq)]
pub enum StoreRequest {
    Reload,
    Append(TreatmentRecord),
    ReplaceAll(Vec<TreatmentRecord>),
}

/// Main application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Today, fixed at startup
    pub today: NaiveDate,
    /// Loaded record set and overview selection
    pub records: RecordsState,
    /// New-entry form state
    pub form: EntryForm,
    /// Status message to display
    pub status_message: Option<String>,
    /// Error message to display
    pub error_message: Option<String>,
}

impl App {
    pub fn new(today: NaiveDate) -> Self {
        App {
            current_screen: Screen::Overview,
            should_quit: false,
            today,
            records: RecordsState::default(),
            form: EntryForm::new(today),
            status_message: None,
            error_message: None,
        }
    }

    /// Whether key events should be mapped with the form's key bindings.
    pub fn in_form(&self) -> bool {
        self.current_screen == Screen::NewEntry
    }

    /// Apply a key action; returns a store request when one is needed.
    pub fn apply(&mut self, action: KeyAction) -> Option<StoreRequest> {
        if action != KeyAction::None {
            self.status_message = None;
            self.error_message = None;
        }

        match self.current_screen {
            Screen::Overview => self.apply_overview(action),
            Screen::NewEntry => self.apply_form(action),
            Screen::Help => {
                self.apply_help(action);
                None
            }
        }
    }

    fn apply_overview(&mut self, action: KeyAction) -> Option<StoreRequest> {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SwitchScreen(screen) => self.current_screen = screen,
            KeyAction::Up => self.records.select_prev(),
            KeyAction::Down => self.records.select_next(),
            KeyAction::Home => self.records.select_first(),
            KeyAction::End => self.records.select_last(),
            KeyAction::ToggleMark => self.records.toggle_mark_selected(),
            KeyAction::Refresh => return Some(StoreRequest::Reload),
            KeyAction::Delete => {
                if self.records.marked_count() == 0 {
                    self.status_message =
                        Some("Silmek için önce satırları boşluk ile işaretleyin.".to_string());
                } else {
                    return Some(StoreRequest::ReplaceAll(self.records.remaining_after_delete()));
                }
            }
            _ => {}
        }
        None
    }

    fn apply_form(&mut self, action: KeyAction) -> Option<StoreRequest> {
        let existing_pets = self.records.existing_pets();
        let has_existing = !existing_pets.is_empty();

        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Back => self.current_screen = Screen::Overview,
            KeyAction::NextField => self.form.focus_next(has_existing),
            KeyAction::PrevField => self.form.focus_prev(has_existing),
            KeyAction::AdjustLeft => self.form.adjust(-1, existing_pets.len()),
            KeyAction::AdjustRight => self.form.adjust(1, existing_pets.len()),
            KeyAction::Char(c) => self.form.insert_char(c),
            KeyAction::Backspace => self.form.backspace(),
            KeyAction::Submit => {
                if self.form.focus == FormField::Submit {
                    match self.form.build_record(&existing_pets) {
                        Ok(record) => return Some(StoreRequest::Append(record)),
                        Err(message) => self.error_message = Some(message),
                    }
                } else {
                    self.form.focus_next(has_existing);
                }
            }
            _ => {}
        }
        None
    }

    fn apply_help(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SwitchScreen(screen) => self.current_screen = screen,
            KeyAction::Back => self.current_screen = Screen::Overview,
            _ => {}
        }
    }

    pub fn on_records_loaded(&mut self, records: Vec<TreatmentRecord>) {
        self.records.set_records(records);
    }

    pub fn on_append_ok(&mut self) {
        self.status_message = Some("✅ Kayıt başarılı!".to_string());
        self.form = EntryForm::new(self.today);
    }

    pub fn on_delete_ok(&mut self, deleted: usize) {
        self.status_message = Some(format!("🗑️ {deleted} kayıt silindi."));
    }

    pub fn on_store_error(&mut self, context: &str, error: String) {
        self.error_message = Some(format!("{context}: {error}"));
    }

    /// Display string for the computed next-due preview line.
    pub fn next_due_preview(&self) -> Option<String> {
        self.form.computed_next_due().map(format_display_date)
    }
}
