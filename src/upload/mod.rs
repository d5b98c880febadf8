// Upload dialogs - DIALux report and image sketch
//
// One state machine, two profiles. Nothing is transmitted: "processing" is a
// timer followed by a canned success message.
//
//   Empty ──accept──▶ Ready ──submit──▶ Processing ──processing_delay──▶ Empty
//     ▲                 │ ▲                  │
//     │                 └─┘ accept           └── accept: rejected (Busy)
//     └──────── reset (dialog closed) ────────── from any state
//
// Each accept also raises a cosmetic loading flag cleared after
// settle_delay. The image profile asks the caller to decode a preview off
// the event loop; results come back tagged with a generation so a preview
// for a file that was replaced or reset in the meantime is dropped.

mod file_ref;
mod format;
pub mod preview;

pub use file_ref::FileRef;
pub use format::{file_type_of, format_file_size};
pub use preview::Preview;

use crate::config::UploadTiming;
use crate::error::UploadError;
use crate::scheduler::{Scheduler, TimerId};
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Which dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    Dialux,
    Image,
}

/// Fixed texts and behavior of one dialog
#[derive(Debug)]
pub struct UploadProfile {
    pub id: &'static str,
    pub title: &'static str,
    pub extensions: &'static [&'static str],
    pub submit_label: &'static str,
    pub success_message: &'static str,
    pub preview: bool,
}

const DIALUX: UploadProfile = UploadProfile {
    id: "dialux",
    title: "Analyze DIALux Report",
    extensions: &["pdf", "ldt", "xlsx"],
    submit_label: "Process Report",
    success_message: "Dialux report processed successfully! The analysis has been completed and results are ready.",
    preview: false,
};

const IMAGE: UploadProfile = UploadProfile {
    id: "image",
    title: "Sketch From Image",
    extensions: &["jpg", "jpeg", "png", "gif", "webp"],
    submit_label: "Process Image",
    success_message: "Image processed successfully! Lighting analysis has been completed.",
    preview: true,
};

pub const PROCESSING_LABEL: &str = "Processing...";

impl UploadKind {
    pub const ALL: [UploadKind; 2] = [Self::Dialux, Self::Image];

    pub fn profile(&self) -> &'static UploadProfile {
        match self {
            Self::Dialux => &DIALUX,
            Self::Image => &IMAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Empty,
    Ready,
    Processing,
}

/// Metadata shown for the accepted file
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub file_name: String,
    pub file_size_bytes: u64,
    pub file_type: &'static str,
    pub received_at: DateTime<Local>,
    pub path: PathBuf,
}

impl UploadRecord {
    fn new(file: FileRef) -> Self {
        Self {
            file_type: file_type_of(&file.name),
            file_name: file.name,
            file_size_bytes: file.size,
            received_at: Local::now(),
            path: file.path,
        }
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.file_size_bytes)
    }

    /// Local date, e.g. `3/14/2025`
    pub fn date_label(&self) -> String {
        self.received_at.format("%-m/%-d/%Y").to_string()
    }
}

/// Timer payloads owned by the upload dialogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTimer {
    /// Loading indicator elapsed
    Settled(UploadKind),
    /// Simulated processing finished
    Processed(UploadKind),
}

impl UploadTimer {
    pub fn kind(&self) -> UploadKind {
        match self {
            Self::Settled(kind) | Self::Processed(kind) => *kind,
        }
    }
}

/// Ask the caller to decode a preview off the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub kind: UploadKind,
    pub generation: u64,
    pub path: PathBuf,
}

/// Result of a finished simulated processing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub kind: UploadKind,
    pub file_name: String,
    pub message: &'static str,
}

/// One upload dialog
#[derive(Debug)]
pub struct UploadStub {
    kind: UploadKind,
    timing: UploadTiming,
    state: UploadState,
    record: Option<UploadRecord>,
    loading: bool,
    preview: Option<Preview>,
    preview_error: Option<String>,
    /// Bumped on every accept and reset
    generation: u64,
    settle_timer: Option<TimerId>,
    process_timer: Option<TimerId>,
}

impl UploadStub {
    pub fn new(kind: UploadKind, timing: UploadTiming) -> Self {
        Self {
            kind,
            timing,
            state: UploadState::Empty,
            record: None,
            loading: false,
            preview: None,
            preview_error: None,
            generation: 0,
            settle_timer: None,
            process_timer: None,
        }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn profile(&self) -> &'static UploadProfile {
        self.kind.profile()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn record(&self) -> Option<&UploadRecord> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn preview_error(&self) -> Option<&str> {
        self.preview_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit(&self) -> bool {
        self.state == UploadState::Ready
    }

    pub fn submit_label(&self) -> &'static str {
        match self.state {
            UploadState::Processing => PROCESSING_LABEL,
            _ => self.profile().submit_label,
        }
    }

    /// Take a file into the dialog
    ///
    /// Replaces any previous file unless one is processing, which is
    /// rejected with `Busy` and leaves that file untouched.
    pub fn accept<T: From<UploadTimer>>(
        &mut self,
        file: FileRef,
        scheduler: &mut Scheduler<T>,
    ) -> Result<Option<PreviewRequest>, UploadError> {
        if self.state == UploadState::Processing {
            tracing::warn!(
                dialog = self.profile().id,
                file = %file.name,
                "file offered while processing, ignored"
            );
            return Err(UploadError::Busy);
        }

        if let Some(id) = self.settle_timer.take() {
            scheduler.cancel(id);
        }

        let record = UploadRecord::new(file);
        tracing::info!(
            dialog = self.profile().id,
            file = %record.file_name,
            size = record.file_size_bytes,
            kind = record.file_type,
            "file accepted"
        );

        self.generation += 1;
        self.preview = None;
        self.preview_error = None;
        self.loading = true;
        self.settle_timer = Some(scheduler.schedule(
            self.timing.settle_delay,
            UploadTimer::Settled(self.kind).into(),
        ));

        let request = self.profile().preview.then(|| PreviewRequest {
            kind: self.kind,
            generation: self.generation,
            path: record.path.clone(),
        });

        self.record = Some(record);
        self.state = UploadState::Ready;
        Ok(request)
    }

    /// Start simulated processing of the accepted file
    pub fn submit<T: From<UploadTimer>>(
        &mut self,
        scheduler: &mut Scheduler<T>,
    ) -> Result<(), UploadError> {
        if self.state != UploadState::Ready {
            return Err(UploadError::NotReady);
        }

        self.state = UploadState::Processing;
        self.process_timer = Some(scheduler.schedule(
            self.timing.processing_delay,
            UploadTimer::Processed(self.kind).into(),
        ));
        tracing::info!(
            dialog = self.profile().id,
            delay_ms = self.timing.processing_delay.as_millis() as u64,
            "processing started"
        );
        Ok(())
    }

    /// Dispatch a fired timer
    pub fn on_timer<T: From<UploadTimer>>(
        &mut self,
        timer: UploadTimer,
        scheduler: &mut Scheduler<T>,
    ) -> Option<UploadOutcome> {
        match timer {
            UploadTimer::Settled(_) => {
                self.settle_timer = None;
                self.loading = false;
                None
            }
            UploadTimer::Processed(_) => {
                self.process_timer = None;
                if self.state != UploadState::Processing {
                    return None;
                }
                let file_name = self
                    .record
                    .as_ref()
                    .map(|r| r.file_name.clone())
                    .unwrap_or_default();
                tracing::info!(dialog = self.profile().id, file = %file_name, "processing complete");
                self.reset(scheduler);
                Some(UploadOutcome {
                    kind: self.kind,
                    file_name,
                    message: self.profile().success_message,
                })
            }
        }
    }

    /// Back to Empty, cancelling whatever is pending
    pub fn reset<T>(&mut self, scheduler: &mut Scheduler<T>) {
        for id in [self.settle_timer.take(), self.process_timer.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(id);
        }
        if self.state == UploadState::Processing {
            tracing::debug!(dialog = self.profile().id, "processing cancelled");
        }
        self.state = UploadState::Empty;
        self.record = None;
        self.loading = false;
        self.preview = None;
        self.preview_error = None;
        self.generation += 1;
    }

    /// Apply a decoded preview; returns false when it is stale
    pub fn preview_loaded(&mut self, generation: u64, result: Result<Preview, String>) -> bool {
        if generation != self.generation || self.record.is_none() {
            tracing::debug!(
                dialog = self.profile().id,
                generation,
                current = self.generation,
                "stale preview dropped"
            );
            return false;
        }
        match result {
            Ok(preview) => {
                tracing::debug!(
                    width = preview.width,
                    height = preview.height,
                    format = preview.format,
                    "preview ready"
                );
                self.preview = Some(preview);
            }
            Err(reason) => {
                tracing::warn!(dialog = self.profile().id, %reason, "preview failed");
                self.preview_error = Some(reason);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn timing() -> UploadTiming {
        UploadTiming {
            settle_delay: Duration::from_millis(500),
            processing_delay: Duration::from_millis(3000),
        }
    }

    fn file(name: &str, size: u64) -> FileRef {
        FileRef {
            name: name.to_string(),
            size,
            path: PathBuf::from("/tmp").join(name),
        }
    }

    fn fire_until(
        stub: &mut UploadStub,
        scheduler: &mut Scheduler<UploadTimer>,
        until: Duration,
    ) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::new();
        while let Some(timer) = scheduler.next_due(until) {
            if let Some(outcome) = stub.on_timer(timer, scheduler) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn thumb() -> Preview {
        Preview {
            width: 1,
            height: 1,
            format: "PNG",
            data_url: "data:image/png;base64,".to_string(),
            thumbnail: preview::Thumbnail {
                width: 1,
                height: 1,
                pixels: vec![[0, 0, 0]],
            },
        }
    }

    #[test]
    fn test_profiles() {
        assert_eq!(UploadKind::Dialux.profile().submit_label, "Process Report");
        assert!(!UploadKind::Dialux.profile().preview);
        assert_eq!(UploadKind::Image.profile().title, "Sketch From Image");
        assert!(UploadKind::Image.profile().preview);
    }

    #[test]
    fn test_accept_records_metadata() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();

        let request = stub.accept(file("office.ldt", 1536), &mut scheduler).unwrap();
        assert!(request.is_none());
        assert_eq!(stub.state(), UploadState::Ready);
        assert!(stub.can_submit());

        let record = stub.record().unwrap();
        assert_eq!(record.file_name, "office.ldt");
        assert_eq!(record.file_type, "DIALux Project");
        assert_eq!(record.size_label(), "1.5 KB");
        assert!(!record.date_label().is_empty());
    }

    #[test]
    fn test_loading_indicator_clears_after_settle_delay() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("a.pdf", 10), &mut scheduler).unwrap();
        assert!(stub.is_loading());

        fire_until(&mut stub, &mut scheduler, Duration::from_millis(499));
        assert!(stub.is_loading());
        fire_until(&mut stub, &mut scheduler, Duration::from_millis(500));
        assert!(!stub.is_loading());
    }

    #[test]
    fn test_submit_without_file_is_not_ready() {
        let mut stub = UploadStub::new(UploadKind::Image, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        assert_eq!(stub.submit(&mut scheduler), Err(UploadError::NotReady));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_processing_completes_after_delay() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("report.pdf", 2048), &mut scheduler).unwrap();
        fire_until(&mut stub, &mut scheduler, Duration::from_millis(1000));

        stub.submit(&mut scheduler).unwrap();
        assert_eq!(stub.state(), UploadState::Processing);
        assert!(!stub.can_submit());
        assert_eq!(stub.submit_label(), PROCESSING_LABEL);

        assert!(fire_until(&mut stub, &mut scheduler, Duration::from_millis(3999)).is_empty());
        let outcomes = fire_until(&mut stub, &mut scheduler, Duration::from_millis(4000));
        assert_eq!(
            outcomes,
            vec![UploadOutcome {
                kind: UploadKind::Dialux,
                file_name: "report.pdf".to_string(),
                message: DIALUX.success_message,
            }]
        );
        assert_eq!(stub.state(), UploadState::Empty);
        assert!(stub.record().is_none());
        assert_eq!(stub.submit_label(), "Process Report");
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("a.pdf", 1), &mut scheduler).unwrap();
        stub.submit(&mut scheduler).unwrap();
        assert_eq!(stub.submit(&mut scheduler), Err(UploadError::NotReady));
    }

    #[test]
    fn test_accept_while_processing_is_busy() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("first.pdf", 1), &mut scheduler).unwrap();
        stub.submit(&mut scheduler).unwrap();

        let err = stub.accept(file("second.pdf", 1), &mut scheduler).unwrap_err();
        assert_eq!(err, UploadError::Busy);
        assert_eq!(stub.record().unwrap().file_name, "first.pdf");

        let outcomes = fire_until(&mut stub, &mut scheduler, Duration::from_secs(10));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].file_name, "first.pdf");
    }

    #[test]
    fn test_accept_replaces_ready_file() {
        let mut stub = UploadStub::new(UploadKind::Dialux, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("a.pdf", 1), &mut scheduler).unwrap();
        stub.accept(file("b.xlsx", 1), &mut scheduler).unwrap();

        assert_eq!(stub.record().unwrap().file_type, "Excel Spreadsheet");
        // Only the latest settle timer remains
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_reset_during_processing_cancels_completion() {
        let mut stub = UploadStub::new(UploadKind::Image, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        stub.accept(file("s.png", 1), &mut scheduler).unwrap();
        stub.submit(&mut scheduler).unwrap();

        stub.reset(&mut scheduler);
        assert!(scheduler.is_empty());
        assert_eq!(stub.state(), UploadState::Empty);
        assert!(fire_until(&mut stub, &mut scheduler, Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_image_accept_requests_preview() {
        let mut stub = UploadStub::new(UploadKind::Image, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        let request = stub
            .accept(file("sketch.png", 100), &mut scheduler)
            .unwrap()
            .unwrap();
        assert_eq!(request.kind, UploadKind::Image);
        assert_eq!(request.generation, stub.generation());
        assert_eq!(request.path, PathBuf::from("/tmp/sketch.png"));

        assert!(stub.preview_loaded(request.generation, Ok(thumb())));
        assert!(stub.preview().is_some());
    }

    #[test]
    fn test_stale_preview_is_dropped() {
        let mut stub = UploadStub::new(UploadKind::Image, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        let first = stub.accept(file("one.png", 1), &mut scheduler).unwrap().unwrap();
        let second = stub.accept(file("two.png", 1), &mut scheduler).unwrap().unwrap();

        assert!(!stub.preview_loaded(first.generation, Ok(thumb())));
        assert!(stub.preview().is_none());

        stub.reset(&mut scheduler);
        assert!(!stub.preview_loaded(second.generation, Ok(thumb())));
        assert!(stub.preview().is_none());
    }

    #[test]
    fn test_preview_failure_is_kept_for_display() {
        let mut stub = UploadStub::new(UploadKind::Image, timing());
        let mut scheduler = Scheduler::<UploadTimer>::new();
        let req = stub.accept(file("bad.png", 1), &mut scheduler).unwrap().unwrap();
        assert!(stub.preview_loaded(req.generation, Err("decoding image".into())));
        assert_eq!(stub.preview_error(), Some("decoding image"));
        assert_eq!(stub.state(), UploadState::Ready);
    }
}
