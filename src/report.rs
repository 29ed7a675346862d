//! Status table rendering
//!
//! Pure row construction over a [`StackSnapshot`] plus a thin printing
//! layer with `console` styling. The table is rendered once, before any
//! convergence action, from a single inspection pass.

use console::Style;

use crate::domain::{ComponentState, SnapshotRow, StackSnapshot};

/// One rendered table row: component label, status word, detail
pub fn render_row(row: &SnapshotRow) -> (String, &'static str, String) {
    let label = row.component.label().to_string();
    match &row.state {
        ComponentState::NotInstalled => (label, "missing", String::new()),
        ComponentState::Current { version } => (label, "current", version.clone()),
        ComponentState::Stale { current, available } => (
            label,
            "update available",
            format!("{current} -> {available}"),
        ),
    }
}

/// Render all rows for display or assertion
pub fn render_rows(snapshot: &StackSnapshot) -> Vec<(String, &'static str, String)> {
    snapshot.rows.iter().map(render_row).collect()
}

/// Print the aligned, styled status table
pub fn print_table(snapshot: &StackSnapshot) {
    let rows = render_rows(snapshot);
    let label_width = rows.iter().map(|(l, _, _)| l.len()).max().unwrap_or(0);
    let status_width = rows.iter().map(|(_, s, _)| s.len()).max().unwrap_or(0);

    println!();
    println!("{}", Style::new().bold().apply_to("Stack status"));
    for (label, status, detail) in rows {
        let styled_status = match status {
            "missing" => Style::new().red().apply_to(format!("{status:<status_width$}")),
            "current" => Style::new()
                .green()
                .apply_to(format!("{status:<status_width$}")),
            _ => Style::new()
                .yellow()
                .apply_to(format!("{status:<status_width$}")),
        };
        if detail.is_empty() {
            println!("  {label:<label_width$}  {styled_status}");
        } else {
            println!(
                "  {label:<label_width$}  {styled_status}  {}",
                Style::new().dim().apply_to(detail)
            );
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ComponentId, ComponentState, SnapshotRow, StackSnapshot};

    fn snapshot() -> StackSnapshot {
        StackSnapshot::new(vec![
            SnapshotRow {
                component: ComponentId::Driver,
                state: ComponentState::NotInstalled,
            },
            SnapshotRow {
                component: ComponentId::Runtime,
                state: ComponentState::Current {
                    version: "6.2.4.60204-139499".to_string(),
                },
            },
            SnapshotRow {
                component: ComponentId::AppCheckout,
                state: ComponentState::Stale {
                    current: "abc1234".to_string(),
                    available: "def5678".to_string(),
                },
            },
        ])
    }

    #[test]
    fn test_render_rows_vocabulary() {
        let rows = render_rows(&snapshot());
        assert_eq!(rows[0].1, "missing");
        assert_eq!(rows[1].1, "current");
        assert_eq!(rows[2].1, "update available");
    }

    #[test]
    fn test_render_stale_detail_shows_both_versions() {
        let rows = render_rows(&snapshot());
        assert_eq!(rows[2].2, "abc1234 -> def5678");
    }

    #[test]
    fn test_render_uses_component_labels() {
        let rows = render_rows(&snapshot());
        assert_eq!(rows[0].0, "AMDGPU driver");
        assert_eq!(rows[2].0, "ComfyUI checkout");
    }
}
