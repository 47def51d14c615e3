//! Central application state for the writing receipt app.
//!
//! One struct owns everything: the backend facade, the cached entry list
//! and its projected receipt, the form state machine, and the channels of
//! the in-flight export/insight workers. The UI thread is the only
//! writer; workers get owned copies and report back over mpsc.

use eframe::egui;
use log::{error, info, warn};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use backend::Backend;
use shared::{ExportResult, Receipt, WritingEntry};

use crate::ui::entry_form::{EntryFormState, FormSubmit};

pub struct WritingReceiptApp {
    pub backend: Backend,

    // Data state: the collection plus its derived receipt view. The
    // receipt is recomputed after every mutation, never cached across
    // them.
    pub entries: Vec<WritingEntry>,
    pub receipt: Receipt,

    // Form state machine
    pub form: EntryFormState,

    // UI state
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub insight_text: Option<String>,
    pub insight_pending: bool,

    // Export capture state: while a capture is in flight the receipt
    // panel draws without row action buttons so they stay out of the
    // snapshot.
    pub capture_in_progress: bool,
    pub screenshot_requested: bool,
    pub receipt_capture_rect: Option<egui::Rect>,

    // Fire-and-forget worker channels. Replacing a receiver abandons
    // the previous request's late result (last response wins).
    pub export_rx: Option<Receiver<ExportResult>>,
    pub insight_rx: Option<Receiver<String>>,
}

impl WritingReceiptApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, anyhow::Error> {
        info!("🚀 Initializing writing receipt app");

        crate::ui::components::fonts::setup_cjk_fonts(&cc.egui_ctx);

        let backend = Backend::new()?;
        let entries = backend.list_entries()?;
        let receipt = backend.build_receipt(&entries);
        info!("Loaded {} entries from the slot", entries.len());

        Ok(Self {
            backend,
            entries,
            receipt,
            form: EntryFormState::new(shared::Month::current()),
            error_message: None,
            success_message: None,
            insight_text: None,
            insight_pending: false,
            capture_in_progress: false,
            screenshot_requested: false,
            receipt_capture_rect: None,
            export_rx: None,
            insight_rx: None,
        })
    }

    /// Re-read the collection and re-project the receipt.
    pub fn refresh_entries(&mut self) {
        match self.backend.list_entries() {
            Ok(entries) => {
                self.receipt = self.backend.build_receipt(&entries);
                self.entries = entries;
            }
            Err(e) => {
                error!("Failed to reload entries: {}", e);
                self.error_message = Some(format!("加载失败: {}", e));
            }
        }
    }

    /// Dispatch a validated form submit to the store.
    pub fn handle_form_submit(&mut self, submit: FormSubmit) {
        let result = match submit {
            FormSubmit::Create(request) => self.backend.create_entry(request).map(|_| ()),
            FormSubmit::Update(request) => self.backend.update_entry(request).map(|_| ()),
        };

        match result {
            Ok(()) => self.refresh_entries(),
            Err(e) => {
                error!("Failed to save entry: {}", e);
                self.error_message = Some(format!("保存失败: {}", e));
            }
        }
    }

    pub fn handle_delete(&mut self, id: &str) {
        match self.backend.delete_entry(id) {
            Ok(_) => {
                // The form must observe its edit target disappearing.
                self.form.notice_deleted(id);
                self.refresh_entries();
            }
            Err(e) => {
                error!("Failed to delete entry {}: {}", id, e);
                self.error_message = Some(format!("删除失败: {}", e));
            }
        }
    }

    pub fn handle_clear(&mut self) {
        // Unconditional, no confirmation step: deliberate UX decision.
        match self.backend.clear_entries() {
            Ok(()) => {
                self.form.cancel_edit();
                self.refresh_entries();
            }
            Err(e) => {
                error!("Failed to clear entries: {}", e);
                self.error_message = Some(format!("清空失败: {}", e));
            }
        }
    }

    /// Begin an export: the next frames render the receipt without
    /// overlay controls, then a viewport screenshot is requested.
    pub fn start_export(&mut self) {
        if self.receipt.is_empty || self.capture_in_progress {
            return;
        }
        self.capture_in_progress = true;
        self.screenshot_requested = false;
    }

    /// Hand a captured snapshot to the export worker.
    pub fn finish_export(&mut self, snapshot: backend::domain::export_service::ReceiptSnapshot) {
        let (tx, rx): (Sender<ExportResult>, Receiver<ExportResult>) = std::sync::mpsc::channel();
        self.export_rx = Some(rx);

        let export_service = self.backend.export_service();
        std::thread::spawn(move || {
            let result = match export_service.export_snapshot(&snapshot, None) {
                Ok(result) => result,
                Err(e) => ExportResult {
                    success: false,
                    message: format!("导出失败: {}", e),
                    file_path: String::new(),
                },
            };
            // Receiver may be gone if the app shut down; nothing to do.
            let _ = tx.send(result);
        });
    }

    /// Fire a new insight request for the current entries. Not
    /// cancellable; a newer request simply supersedes the older one.
    pub fn start_insight(&mut self) {
        let (tx, rx) = std::sync::mpsc::channel();
        self.insight_rx = Some(rx);
        self.insight_pending = true;

        let insight_service = self.backend.insight_service();
        let entries = self.entries.clone();
        std::thread::spawn(move || {
            let text = insight_service.request_insight(&entries);
            let _ = tx.send(text);
        });
    }

    /// Drain worker channels; called once per frame. A worker that dies
    /// without reporting must not leave the UI waiting forever.
    pub fn poll_workers(&mut self) {
        match poll_worker(&mut self.export_rx) {
            WorkerPoll::Received(result) => {
                if result.success {
                    self.success_message = Some(result.message);
                } else {
                    self.error_message = Some(result.message);
                }
            }
            WorkerPoll::Died => {
                warn!("Export worker stopped without reporting a result");
                self.error_message = Some("导出失败: 后台任务中断".to_string());
            }
            WorkerPoll::Pending => {}
        }

        match poll_worker(&mut self.insight_rx) {
            WorkerPoll::Received(text) => {
                self.insight_text = Some(text);
                self.insight_pending = false;
            }
            WorkerPoll::Died => {
                warn!("Insight worker stopped without reporting a result");
                self.insight_pending = false;
            }
            WorkerPoll::Pending => {}
        }
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }
}

/// Outcome of one non-blocking poll of a worker channel.
enum WorkerPoll<T> {
    Pending,
    Received(T),
    /// The worker dropped its sender without sending anything.
    Died,
}

/// Poll a fire-and-forget worker slot. The receiver is cleared as soon as
/// the worker has reported or died, so the slot never sticks around for a
/// channel that can no longer produce a value.
fn poll_worker<T>(slot: &mut Option<Receiver<T>>) -> WorkerPoll<T> {
    let Some(rx) = slot else {
        return WorkerPoll::Pending;
    };
    match rx.try_recv() {
        Ok(value) => {
            *slot = None;
            WorkerPoll::Received(value)
        }
        Err(TryRecvError::Empty) => WorkerPoll::Pending,
        Err(TryRecvError::Disconnected) => {
            *slot = None;
            WorkerPoll::Died
        }
    }
}
