use crate::application::read_models::{BomReadModel, ComponentView, CycleView, NodeView, NodeViewKind};
use crate::bom_structure::domain::{BomHeader, ComponentType};
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

const LOCK_MARKER: &str = "🔒";

/// TextTreeFormatter adapter drawing the forest with box-drawing guides
///
/// One line per node. Components show code, description, quantity and a
/// lock marker when the line is ERP read-only; routing steps show the step
/// number, operation, work center and `HH:MM:SS` times.
pub struct TextTreeFormatter;

impl TextTreeFormatter {
    pub fn new() -> Self {
        Self
    }

    fn header_line(header: &BomHeader) -> String {
        let mut line = format!("BOM {}", header.bom_id.as_deref().unwrap_or("(unnamed)"));
        if let Some(version) = &header.version {
            line.push_str(&format!(" v{}", version));
        }
        if let Some(item) = &header.item_id {
            line.push_str(&format!(" · {}", item));
        }
        if let Some(description) = &header.description {
            line.push_str(&format!(" - {}", description));
        }
        if header.bom_stato_erp == Some(1) {
            line.push_str(&format!(" {} ERP", LOCK_MARKER));
        }
        line
    }

    fn component_label(view: &ComponentView) -> String {
        let row = &view.row;
        let mut label = row.code.clone();
        if let Some(description) = &row.description {
            label.push_str(&format!(" - {}", description));
        }
        if let Some(quantity) = row.quantity {
            label.push_str(&format!("  x{}", format_quantity(quantity)));
            if let Some(uom) = &row.uom {
                label.push_str(&format!(" {}", uom));
            }
        }
        if row.component_type == ComponentType::Phantom {
            label.push_str("  (phantom)");
        }
        if view.locks.is_read_only() {
            label.push_str(&format!("  {}", LOCK_MARKER));
        }
        label
    }

    fn cycle_label(view: &CycleView) -> String {
        let row = &view.row;
        let mut label = format!("⚙ {}", row.step());
        match (&row.operation, &view.operation_description) {
            (Some(code), Some(description)) => {
                label.push_str(&format!(" {} {}", code, description));
            }
            (Some(code), None) => {
                label.push_str(&format!(" {}", code));
            }
            _ => {}
        }
        match (&row.work_center, &view.work_center_description) {
            (Some(code), Some(description)) => {
                label.push_str(&format!(" @ {} ({})", code, description));
            }
            (Some(code), None) => {
                label.push_str(&format!(" @ {}", code));
            }
            _ => {}
        }
        label.push_str(&format!("  setup {}  run {}", view.setup, view.processing));
        if let Some(notes) = row.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            label.push_str(&format!("  \"{}\"", notes.trim()));
        }
        label
    }

    fn label(node: &NodeView) -> String {
        match &node.kind {
            NodeViewKind::Component(view) => Self::component_label(view),
            NodeViewKind::Cycle(view) => Self::cycle_label(view),
        }
    }

    fn write_children(out: &mut String, children: &[NodeView], prefix: &str) {
        for (index, child) in children.iter().enumerate() {
            let last = index + 1 == children.len();
            let (branch, continuation) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            out.push_str(&format!("{}{}{}\n", prefix, branch, Self::label(child)));
            Self::write_children(out, &child.children, &format!("{}{}", prefix, continuation));
        }
    }
}

impl Default for TextTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Integral quantities print without decimals
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

impl TreeFormatter for TextTreeFormatter {
    fn format(&self, model: &BomReadModel) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("{}\n", Self::header_line(&model.header)));
        out.push('\n');

        if model.roots.is_empty() {
            out.push_str("(no components)\n");
        }
        for root in &model.roots {
            out.push_str(&format!("{}\n", Self::label(root)));
            Self::write_children(&mut out, &root.children, "");
        }

        out.push('\n');
        out.push_str(&format!(
            "{} components, {} routing steps\n",
            model.summary.component_count, model.summary.cycle_count
        ));

        if !model.anomalies.is_empty() {
            out.push('\n');
            out.push_str(&format!("⚠️  {} structure anomalies:\n", model.anomalies.len()));
            for anomaly in &model.anomalies {
                out.push_str(&format!("  - {}\n", anomaly));
            }
        }

        Ok(out)
    }
}
