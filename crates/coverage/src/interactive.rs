//! Interactive entry: layer selection through a dialog, progress and results reported through the host.

use std::ops::{Deref, DerefMut};

use crate::{
    collector::{self, LayerCandidates, LayerSelection},
    materialize::{self, RESULT_LAYER_NAME},
    pipeline,
    session::{LayerId, LayerRegistry},
};

const TITLE: &str = "Quadrat Coverage";
const RUNNING_MESSAGE: &str = "Running Quadrat Coverage Plugin...";

/// Status bar, event loop and message boxes of the host application
pub trait HostInterface {
    fn show_status(&mut self, message: &str);
    fn clear_status(&mut self);
    /// Gives the host the opportunity to repaint before a long running operation
    fn process_events(&mut self);
    fn information(&mut self, title: &str, message: &str);
    fn warning(&mut self, title: &str, message: &str);
    fn critical(&mut self, title: &str, message: &str);
}

/// Lets the user pick the layers and threshold, `None` when the dialog is cancelled
pub trait LayerSelectionDialog {
    fn select(&mut self, candidates: &LayerCandidates) -> Option<LayerSelection>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractiveOutcome {
    Cancelled,
    /// The selection was incomplete, the pipeline did not run
    InvalidSelection(String),
    Completed(LayerId),
    Failed(String),
}

/// Clears the status message of the host when dropped
struct StatusGuard<'a, H: HostInterface> {
    host: &'a mut H,
}

impl<'a, H: HostInterface> StatusGuard<'a, H> {
    fn show(host: &'a mut H, message: &str) -> Self {
        host.show_status(message);
        StatusGuard { host }
    }
}

impl<H: HostInterface> Deref for StatusGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: HostInterface> DerefMut for StatusGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: HostInterface> Drop for StatusGuard<'_, H> {
    fn drop(&mut self) {
        self.host.clear_status();
    }
}

/// Runs the coverage pipeline once for the layers selected in the dialog and adds the result to the session
pub fn run_interactive(registry: &mut impl LayerRegistry, dialog: &mut impl LayerSelectionDialog, host: &mut impl HostInterface) -> InteractiveOutcome {
    let candidates = LayerCandidates::from_registry(&*registry);
    let Some(selection) = dialog.select(&candidates) else {
        log::debug!("Layer selection cancelled");
        return InteractiveOutcome::Cancelled;
    };

    let job = match collector::collect_job(&*registry, &selection) {
        Ok(job) => job,
        Err(err) => {
            let msg = err.to_string();
            host.warning(TITLE, &msg);
            return InteractiveOutcome::InvalidSelection(msg);
        }
    };

    let crs = selection.grid.and_then(|grid| registry.layer_crs(grid));

    let mut host = StatusGuard::show(host, RUNNING_MESSAGE);
    host.process_events();

    let result = pipeline::compute_coverage(&job).and_then(|result| materialize::materialize(registry, &result, crs));
    match result {
        Ok(id) => {
            host.information(TITLE, &format!("Result layer added: {RESULT_LAYER_NAME}"));
            InteractiveOutcome::Completed(id)
        }
        Err(err) => {
            log::error!("Quadrat coverage failed: {err}");
            let msg = err.to_string();
            host.critical(TITLE, &msg);
            InteractiveOutcome::Failed(msg)
        }
    }
}
