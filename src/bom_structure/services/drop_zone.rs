use crate::bom_structure::domain::{is_root_level, ComponentSource, DropMode, NodeId};
use serde::{Deserialize, Serialize};

/// Bounding box of a rendered node, in pointer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// DropZoneClassifier service mapping a pointer position to a drop mode
///
/// Root-level nodes (level 0 or 1) are split in three equal zones:
/// replace | add under | add sibling. Deeper nodes only have two halves:
/// replace | add under.
pub struct DropZoneClassifier;

impl DropZoneClassifier {
    pub fn classify(level: i64, rect: NodeRect, pointer_x: f64, force_replace: bool) -> DropMode {
        if force_replace || !(rect.width > 0.0) || !pointer_x.is_finite() {
            return DropMode::Replace;
        }

        let offset = (pointer_x - rect.left).clamp(0.0, rect.width);

        if is_root_level(level) {
            if offset < rect.width / 3.0 {
                DropMode::Replace
            } else if offset < rect.width * 2.0 / 3.0 {
                DropMode::AddUnder
            } else {
                DropMode::AddSibling
            }
        } else if offset < rect.width / 2.0 {
            DropMode::Replace
        } else {
            DropMode::AddUnder
        }
    }
}

/// Final `(target, mode, payload)` of a completed gesture
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDrop {
    pub target: NodeId,
    pub mode: DropMode,
    pub payload: ComponentSource,
}

#[derive(Debug, Clone)]
struct Hover {
    node_id: NodeId,
    level: i64,
    rect: NodeRect,
    pointer_x: f64,
}

/// State of one drag gesture
///
/// The mode is recomputed on every pointer move, but callers are only told
/// about a change when the `(target, mode)` pair actually differs.
#[derive(Debug, Clone)]
pub struct DragGesture {
    payload: ComponentSource,
    force_replace: bool,
    hover: Option<Hover>,
    drop_mode: Option<DropMode>,
}

impl DragGesture {
    pub fn start(payload: ComponentSource) -> Self {
        Self {
            payload,
            force_replace: false,
            hover: None,
            drop_mode: None,
        }
    }

    pub fn drop_target(&self) -> Option<&NodeId> {
        self.hover.as_ref().map(|h| &h.node_id)
    }

    pub fn drop_mode(&self) -> Option<DropMode> {
        self.drop_mode
    }

    pub fn force_replace(&self) -> bool {
        self.force_replace
    }

    /// Pointer moved over a node; returns true when target or mode changed
    pub fn hover(&mut self, node_id: &NodeId, level: i64, rect: NodeRect, pointer_x: f64) -> bool {
        let target_changed = self.drop_target() != Some(node_id);
        self.hover = Some(Hover {
            node_id: node_id.clone(),
            level,
            rect,
            pointer_x,
        });
        self.recompute() || target_changed
    }

    /// Modifier key pressed or released; returns true when the mode changed
    pub fn set_force_replace(&mut self, held: bool) -> bool {
        self.force_replace = held;
        self.recompute()
    }

    /// Pointer left every valid drop target
    pub fn leave(&mut self) {
        self.hover = None;
        self.drop_mode = None;
    }

    /// Aborts the gesture, e.g. after an error
    pub fn cancel(&mut self) {
        self.leave();
        self.force_replace = false;
    }

    /// Completes the gesture; `None` when nothing was hovered
    pub fn drop(self) -> Option<ResolvedDrop> {
        let hover = self.hover?;
        let mode = self.drop_mode?;
        Some(ResolvedDrop {
            target: hover.node_id,
            mode,
            payload: self.payload,
        })
    }

    fn recompute(&mut self) -> bool {
        let next = self.hover.as_ref().map(|h| {
            DropZoneClassifier::classify(h.level, h.rect, h.pointer_x, self.force_replace)
        });
        if next == self.drop_mode {
            return false;
        }
        self.drop_mode = next;
        true
    }
}
