//! Per-run mutable state shared across convergence steps
//!
//! The three outcome accumulators and the reboot flag are the only
//! cross-component mutable state in the whole run; the context is owned by
//! the top-level orchestrator and passed into every converge call.

use crate::domain::{ComponentId, Outcome, OutcomeKind};

#[derive(Debug, Default)]
pub struct RunContext {
    pub installed: Vec<Outcome>,
    pub updated: Vec<Outcome>,
    pub skipped: Vec<Outcome>,
    reboot_required: bool,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_installed(&mut self, component: ComponentId, detail: impl Into<String>) {
        self.installed.push(Outcome {
            component,
            kind: OutcomeKind::Installed,
            detail: detail.into(),
        });
    }

    pub fn record_updated(
        &mut self,
        component: ComponentId,
        before: impl Into<String>,
        after: impl Into<String>,
    ) {
        let before = before.into();
        let after = after.into();
        let detail = format!("{before} -> {after}");
        self.updated.push(Outcome {
            component,
            kind: OutcomeKind::Updated { before, after },
            detail,
        });
    }

    pub fn record_skipped(&mut self, component: ComponentId, detail: impl Into<String>) {
        self.skipped.push(Outcome {
            component,
            kind: OutcomeKind::Skipped,
            detail: detail.into(),
        });
    }

    /// Flag that a disruptive action (kernel module, group membership)
    /// happened. Monotonic: nothing ever clears it within a run.
    pub fn require_reboot(&mut self) {
        self.reboot_required = true;
    }

    pub fn reboot_required(&self) -> bool {
        self.reboot_required
    }

    /// Whether the run changed anything at all
    pub fn changed(&self) -> bool {
        !self.installed.is_empty() || !self.updated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_land_in_their_accumulator() {
        let mut ctx = RunContext::new();
        ctx.record_installed(ComponentId::Driver, "amdgpu-dkms 6.2.4");
        ctx.record_updated(ComponentId::AppCheckout, "abc123", "def456");
        ctx.record_skipped(ComponentId::Runtime, "already at 6.2.4");

        assert_eq!(ctx.installed.len(), 1);
        assert_eq!(ctx.updated.len(), 1);
        assert_eq!(ctx.skipped.len(), 1);
        assert!(ctx.changed());

        match &ctx.updated[0].kind {
            OutcomeKind::Updated { before, after } => {
                assert_eq!(before, "abc123");
                assert_eq!(after, "def456");
            }
            other => panic!("expected Updated, got {other:?}"),
        }
    }

    #[test]
    fn test_reboot_flag_is_monotonic() {
        let mut ctx = RunContext::new();
        assert!(!ctx.reboot_required());
        ctx.require_reboot();
        ctx.record_skipped(ComponentId::Runtime, "no change");
        ctx.require_reboot();
        assert!(ctx.reboot_required());
    }

    #[test]
    fn test_all_skips_means_unchanged() {
        let mut ctx = RunContext::new();
        ctx.record_skipped(ComponentId::Driver, "current");
        assert!(!ctx.changed());
    }
}
